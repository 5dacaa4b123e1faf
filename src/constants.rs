pub const DEFAULT_PADDING_FACTOR: f64 = 1.10;
pub const DEFAULT_LINEAR_OUTPUT: &str = "linear_plot.png";
pub const DEFAULT_CIRCOS_OUTPUT: &str = "circos_plot.png";
pub const DEFAULT_LINEAR_WIDTH: u32 = 2000;
pub const DEFAULT_LINEAR_HEIGHT: u32 = 1200;
pub const DEFAULT_CIRCOS_SIZE: u32 = 2000;
pub const DEFAULT_DPI: u32 = 300;
pub const DEFAULT_GAP_DEGREES: f64 = 2.0;
pub const DEFAULT_START_DEGREES: f64 = 90.0;
pub const DEFAULT_SKIP_MALFORMED: bool = false;
pub const DEFAULT_STRICT_BOUNDS: bool = false;

// SV caller columns (0-based)
pub const SV_MIN_FIELDS: usize = 13;
pub const SV_COL_CHR_A: usize = 0;
pub const SV_COL_START_A: usize = 1;
pub const SV_COL_END_A: usize = 2;
pub const SV_COL_CHR_B: usize = 6;
pub const SV_COL_START_B: usize = 7;
pub const SV_COL_END_B: usize = 8;
pub const SV_COL_TYPE: usize = 12;

pub const METERS_PER_INCH: f64 = 0.0254;
