pub mod canvas;
pub mod circos;
pub mod font;
pub mod linear;
pub mod palette;
pub mod png;

/// Output raster size and the resolution recorded in the PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}
