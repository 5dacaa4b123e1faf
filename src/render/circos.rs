use super::{
    canvas::{quadratic_bezier, Canvas, Point},
    font::text_width,
    palette::{SvPalette, BACKBONE_GREY, BLACK, LABEL_GREY, WHITE},
    CanvasSpec,
};
use crate::{
    core::{
        chromosome::{ChromId, ChromosomeRegistry},
        sv_record::{Span, ValidatedSvTable},
    },
    utils::util::Result,
};
use image::RgbImage;

const OUTER_RADIUS_FRACTION: f64 = 0.38;
const TRACK_FRACTION: f64 = 0.03;
const LINK_INSET_PX: f64 = 6.0;
const LABEL_OFFSET_PX: f64 = 30.0;
const LABEL_SCALE: u32 = 3;
const LINK_ALPHA: f64 = 0.5;
const ARC_STEP_DEGREES: f64 = 0.5;
const LINK_SEGMENTS: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub struct CircosOptions {
    /// Gap between neighbouring sectors, in degrees.
    pub gap_degrees: f64,
    /// Angle of the start of the first sector, counter-clockwise from 3 o'clock.
    pub start_degrees: f64,
}

#[derive(Debug, Clone)]
struct Sector {
    start_degrees: f64,
    span_degrees: f64,
    length: f64,
}

/// Angular geometry of the circos plot. Sectors run clockwise in registry order.
#[derive(Debug, Clone)]
pub struct CircosLayout {
    center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    sectors: Vec<Sector>,
}

impl CircosLayout {
    pub fn new(
        registry: &ChromosomeRegistry,
        spec: &CanvasSpec,
        options: &CircosOptions,
    ) -> Result<Self> {
        if registry.is_empty() {
            return Err(crate::svplot_error!("Cannot lay out an empty chromosome registry"));
        }
        let total_gap = options.gap_degrees * registry.len() as f64;
        let available = 360.0 - total_gap;
        if options.gap_degrees < 0.0 || available <= 0.0 {
            return Err(crate::svplot_error!(
                "Sector gap of {} degrees leaves no room for {} chromosomes",
                options.gap_degrees,
                registry.len()
            ));
        }

        let degrees_per_bp = available / registry.total_length();
        let mut cursor = options.start_degrees;
        let sectors = registry
            .iter()
            .map(|(_, entry)| {
                let span_degrees = entry.length * degrees_per_bp;
                let sector = Sector {
                    start_degrees: cursor,
                    span_degrees,
                    length: entry.length,
                };
                cursor -= span_degrees + options.gap_degrees;
                sector
            })
            .collect();

        let size = spec.width.min(spec.height) as f64;
        let outer_radius = size * OUTER_RADIUS_FRACTION;
        Ok(Self {
            center: (spec.width as f64 / 2.0, spec.height as f64 / 2.0),
            outer_radius,
            inner_radius: outer_radius - size * TRACK_FRACTION,
            sectors,
        })
    }

    /// Angle in degrees of `position` (bp) on `chrom`.
    pub fn angle(&self, chrom: ChromId, position: f64) -> f64 {
        let sector = &self.sectors[chrom.index()];
        sector.start_degrees - position / sector.length * sector.span_degrees
    }

    pub fn point(&self, degrees: f64, radius: f64) -> Point {
        let radians = degrees.to_radians();
        (
            self.center.0 + radius * radians.cos(),
            self.center.1 - radius * radians.sin(),
        )
    }

    pub fn sector_bounds(&self, chrom: ChromId) -> (f64, f64) {
        let sector = &self.sectors[chrom.index()];
        (sector.start_degrees, sector.start_degrees - sector.span_degrees)
    }

    fn arc(&self, from_degrees: f64, to_degrees: f64, radius: f64) -> Vec<Point> {
        let steps = ((from_degrees - to_degrees).abs() / ARC_STEP_DEGREES).ceil().max(1.0) as usize;
        (0..=steps)
            .map(|i| {
                let t = i as f64 / steps as f64;
                self.point(from_degrees + (to_degrees - from_degrees) * t, radius)
            })
            .collect()
    }

    fn span_degrees(&self, span: &Span) -> (f64, f64) {
        (
            self.angle(span.chrom, span.start as f64 - 1.0),
            self.angle(span.chrom, span.end as f64),
        )
    }

    /// Closed outline of the ribbon joining the two spans of an SV through the center.
    pub fn ribbon(&self, a: &Span, b: &Span) -> Vec<Point> {
        let radius = self.inner_radius - LINK_INSET_PX;
        let (a0, a1) = self.span_degrees(a);
        let (b0, b1) = self.span_degrees(b);

        let mut outline = self.arc(a0, a1, radius);
        outline.extend(quadratic_bezier(
            self.point(a1, radius),
            self.center,
            self.point(b0, radius),
            LINK_SEGMENTS,
        ));
        outline.extend(self.arc(b0, b1, radius));
        outline.extend(quadratic_bezier(
            self.point(b1, radius),
            self.center,
            self.point(a0, radius),
            LINK_SEGMENTS,
        ));
        outline
    }
}

fn draw_sectors(canvas: &mut Canvas, registry: &ChromosomeRegistry, layout: &CircosLayout) {
    for (id, entry) in registry.iter() {
        let (start, end) = layout.sector_bounds(id);
        let mut outline = layout.arc(start, end, layout.outer_radius);
        outline.extend(layout.arc(end, start, layout.inner_radius));
        canvas.fill_polygon(&outline, BACKBONE_GREY, 1.0);
        let mut border = outline.clone();
        border.push(outline[0]);
        canvas.draw_polyline(&border, LABEL_GREY, 1.0);

        let (x, y) = layout.point((start + end) / 2.0, layout.outer_radius + LABEL_OFFSET_PX);
        let half_width = text_width(&entry.name, LABEL_SCALE) as f64 / 2.0;
        let half_height = Canvas::text_height(LABEL_SCALE) as f64 / 2.0;
        canvas.draw_text(x - half_width, y - half_height, &entry.name, LABEL_SCALE, BLACK);
    }
}

fn draw_legend(canvas: &mut Canvas, palette: &SvPalette) {
    let box_size = Canvas::text_height(LABEL_SCALE) as f64;
    let (x, mut y) = (40.0, 40.0);
    for (kind, color) in palette.entries() {
        canvas.fill_rect(x, y, x + box_size, y + box_size, color, LINK_ALPHA);
        canvas.draw_polyline(
            &[(x, y), (x + box_size, y), (x + box_size, y + box_size), (x, y + box_size), (x, y)],
            color,
            2.0,
        );
        canvas.draw_text(x + box_size + 12.0, y, kind.as_str(), LABEL_SCALE, LABEL_GREY);
        y += box_size + 14.0;
    }
}

/// Draws chromosomes as sectors of a ring and every SV as a ribbon colored by its kind.
pub fn render_circos(
    registry: &ChromosomeRegistry,
    table: &ValidatedSvTable,
    palette: &SvPalette,
    spec: &CanvasSpec,
    options: &CircosOptions,
) -> Result<RgbImage> {
    let layout = CircosLayout::new(registry, spec, options)?;
    let mut canvas = Canvas::new(spec.width, spec.height, WHITE);
    log::debug!(
        "Circos layout: {} sectors, radius {:.0}px",
        registry.len(),
        layout.outer_radius
    );

    draw_sectors(&mut canvas, registry, &layout);

    for record in table {
        let color = palette.color(record.kind);
        let mut outline = layout.ribbon(&record.a, &record.b);
        canvas.fill_polygon(&outline, color, LINK_ALPHA);
        outline.push(outline[0]);
        canvas.draw_polyline(&outline, color, 1.0);
    }

    draw_legend(&mut canvas, palette);
    Ok(canvas.into_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        chromosome::ChromosomeEntry,
        sv_record::{FilterStats, SvRecord},
        svtype::SvKind,
    };

    fn registry(lengths: &[u64]) -> ChromosomeRegistry {
        let mut registry = ChromosomeRegistry::new();
        for (i, raw) in lengths.iter().enumerate() {
            registry
                .push(ChromosomeEntry {
                    name: format!("CHR{}", i + 1),
                    raw_length: *raw,
                    length: *raw as f64 * 1.1,
                })
                .unwrap();
        }
        registry
    }

    fn spec() -> CanvasSpec {
        CanvasSpec {
            width: 2000,
            height: 2000,
            dpi: 300,
        }
    }

    fn options() -> CircosOptions {
        CircosOptions {
            gap_degrees: 2.0,
            start_degrees: 90.0,
        }
    }

    #[test]
    fn test_sectors_are_proportional_and_clockwise() -> Result<()> {
        let registry = registry(&[300, 100]);
        let layout = CircosLayout::new(&registry, &spec(), &options())?;
        let (chr1, chr2) = (registry.id_of("CHR1").unwrap(), registry.id_of("CHR2").unwrap());

        let (s1, e1) = layout.sector_bounds(chr1);
        let (s2, e2) = layout.sector_bounds(chr2);
        assert!((s1 - 90.0).abs() < 1e-9);
        assert!(((s1 - e1) - 3.0 * (s2 - e2)).abs() < 1e-9);
        assert!(((e1 - s2) - 2.0).abs() < 1e-9);
        let covered = (s1 - e1) + (s2 - e2) + 2.0 * 2.0;
        assert!((covered - 360.0).abs() < 1e-9);

        assert!((layout.angle(chr1, 0.0) - s1).abs() < 1e-9);
        assert!((layout.angle(chr1, registry.get(chr1).length) - e1).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_first_sector_starts_at_twelve_o_clock() -> Result<()> {
        let layout = CircosLayout::new(&registry(&[100]), &spec(), &options())?;
        let (x, y) = layout.point(90.0, layout.outer_radius);
        assert!((x - 1000.0).abs() < 1e-6);
        assert!((y - (1000.0 - layout.outer_radius)).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_gap_too_large() {
        let too_wide = CircosOptions {
            gap_degrees: 180.0,
            start_degrees: 90.0,
        };
        assert!(CircosLayout::new(&registry(&[1, 2]), &spec(), &too_wide).is_err());
    }

    #[test]
    fn test_render_circos_colors_link_by_kind() -> Result<()> {
        let registry = registry(&[1_000_000, 1_000_000]);
        let (chr1, chr2) = (registry.id_of("CHR1").unwrap(), registry.id_of("CHR2").unwrap());
        let record = SvRecord {
            line: 1,
            a: Span::normalized(chr1, 1, 1_000_000),
            b: Span::normalized(chr2, 1, 1_000_000),
            kind: SvKind::DUPLICATION,
        };
        let table = ValidatedSvTable::new(vec![record], FilterStats::default());
        let palette = SvPalette::default();
        let image = render_circos(&registry, &table, &palette, &spec(), &options())?;
        assert_eq!(image.dimensions(), (2000, 2000));

        // The ribbon joins two nearly half-circle spans, so it covers the center.
        let center = image.get_pixel(1000, 1000);
        assert_ne!(center, &WHITE);
        let dup = palette.color(SvKind::DUPLICATION);
        let expected: Vec<u8> = dup
            .0
            .iter()
            .map(|&c| (c as f64 * LINK_ALPHA + 255.0 * (1.0 - LINK_ALPHA)).round() as u8)
            .collect();
        assert_eq!(center.0.to_vec(), expected);
        Ok(())
    }

    #[test]
    fn test_render_circos_draws_sector_track() -> Result<()> {
        let registry = registry(&[1_000]);
        let layout = CircosLayout::new(&registry, &spec(), &options())?;
        let image = render_circos(
            &registry,
            &ValidatedSvTable::default(),
            &SvPalette::default(),
            &spec(),
            &options(),
        )?;
        // Mid-track point on the opposite side of the start.
        let radius = (layout.outer_radius + layout.inner_radius) / 2.0;
        let (x, y) = layout.point(-90.0, radius);
        assert_eq!(image.get_pixel(x as u32, y as u32), &BACKBONE_GREY);
        assert_eq!(image.get_pixel(1000, 1000), &WHITE);
        Ok(())
    }
}
