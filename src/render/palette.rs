use crate::core::svtype::SvKind;
use image::Rgb;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const BACKBONE_GREY: Rgb<u8> = Rgb([190, 190, 190]);
pub const LABEL_GREY: Rgb<u8> = Rgb([64, 64, 64]);

/// Fixed SV-kind to color map. Indexed by [`SvKind::index`], so every kind has a color.
#[derive(Debug, Clone, PartialEq)]
pub struct SvPalette {
    colors: [Rgb<u8>; SvKind::ALL.len()],
}

impl SvPalette {
    pub fn new(colors: [Rgb<u8>; SvKind::ALL.len()]) -> Self {
        Self { colors }
    }

    pub fn color(&self, kind: SvKind) -> Rgb<u8> {
        self.colors[kind.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (SvKind, Rgb<u8>)> + '_ {
        SvKind::ALL.iter().map(|&kind| (kind, self.color(kind)))
    }
}

impl Default for SvPalette {
    /// ColorBrewer Set1.
    fn default() -> Self {
        Self::new([
            Rgb([228, 26, 28]),  // INV red
            Rgb([55, 126, 184]), // TRANS blue
            Rgb([77, 175, 74]),  // INVTR green
            Rgb([152, 78, 163]), // DUP purple
            Rgb([255, 127, 0]),  // INVDP orange
        ])
    }
}

/// Colors of the linear plot, which are independent of the SV kind.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearColors {
    pub reference: Rgb<u8>,
    pub query: Rgb<u8>,
    pub link: Rgb<u8>,
}

impl Default for LinearColors {
    fn default() -> Self {
        Self {
            reference: Rgb([31, 120, 180]),
            query: Rgb([227, 26, 28]),
            link: Rgb([99, 99, 99]),
        }
    }
}
