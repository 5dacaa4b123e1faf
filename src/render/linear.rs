use super::{
    canvas::{cubic_bezier, Canvas},
    font::text_width,
    palette::{LinearColors, BACKBONE_GREY, LABEL_GREY, WHITE},
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

const MARGIN: f64 = 40.0;
const LEGEND_HEIGHT: f64 = 60.0;
const LABEL_SCALE: u32 = 3;
const LINK_ALPHA: f64 = 0.6;
const LINK_SEGMENTS: usize = 48;
const MIN_SPAN_PX: f64 = 2.0;

/// Pixel geometry of the linear plot, one row per chromosome.
#[derive(Debug, Clone)]
pub struct LinearLayout {
    pub plot_left: f64,
    pub plot_width: f64,
    pub top: f64,
    pub row_height: f64,
    pub bar_height: f64,
    pub bp_per_px: f64,
}

impl LinearLayout {
    pub fn new(registry: &ChromosomeRegistry, spec: &CanvasSpec) -> Result<Self> {
        if registry.is_empty() {
            return Err(crate::svplot_error!("Cannot lay out an empty chromosome registry"));
        }
        let label_width = registry
            .iter()
            .map(|(_, entry)| text_width(&entry.name, LABEL_SCALE))
            .max()
            .unwrap_or(0) as f64;
        let plot_left = MARGIN + label_width + MARGIN / 2.0;
        let plot_width = spec.width as f64 - plot_left - MARGIN;
        let top = MARGIN + LEGEND_HEIGHT;
        let plot_height = spec.height as f64 - top - MARGIN;
        if plot_width < 1.0 || plot_height < 1.0 {
            return Err(crate::svplot_error!(
                "Canvas {}x{} is too small for the linear plot",
                spec.width,
                spec.height
            ));
        }
        let row_height = plot_height / registry.len() as f64;
        Ok(Self {
            plot_left,
            plot_width,
            top,
            row_height,
            bar_height: (row_height * 0.2).clamp(1.0, 24.0),
            bp_per_px: registry.max_length() / plot_width,
        })
    }

    pub fn row_center(&self, chrom: ChromId) -> f64 {
        self.top + (chrom.index() as f64 + 0.5) * self.row_height
    }

    pub fn x(&self, position: f64) -> f64 {
        self.plot_left + position / self.bp_per_px
    }

    /// Horizontal pixel extent of a span, widened to stay visible.
    pub fn span_x(&self, span: &Span) -> (f64, f64) {
        let (x0, x1) = (self.x(span.start as f64 - 1.0), self.x(span.end as f64));
        if x1 - x0 < MIN_SPAN_PX {
            let mid = (x0 + x1) / 2.0;
            (mid - MIN_SPAN_PX / 2.0, mid + MIN_SPAN_PX / 2.0)
        } else {
            (x0, x1)
        }
    }
}

fn draw_legend(canvas: &mut Canvas, colors: &LinearColors) {
    let box_size = (LABEL_SCALE * 8) as f64;
    let mut x = MARGIN;
    for (label, color) in [
        ("REFERENCE", colors.reference),
        ("QUERY", colors.query),
        ("LINK", colors.link),
    ] {
        canvas.fill_rect(x, MARGIN, x + box_size, MARGIN + box_size, color, 1.0);
        x += box_size + 10.0;
        canvas.draw_text(x, MARGIN, label, LABEL_SCALE, LABEL_GREY);
        x += text_width(label, LABEL_SCALE) as f64 + 40.0;
    }
}

/// Draws chromosome backbones with reference spans above, query spans below
/// and a curve joining the two halves of every SV.
pub fn render_linear(
    registry: &ChromosomeRegistry,
    table: &ValidatedSvTable,
    colors: &LinearColors,
    spec: &CanvasSpec,
) -> Result<RgbImage> {
    let layout = LinearLayout::new(registry, spec)?;
    let mut canvas = Canvas::new(spec.width, spec.height, WHITE);
    log::debug!(
        "Linear layout: {} rows of {:.1}px, {:.1} bp/px",
        registry.len(),
        layout.row_height,
        layout.bp_per_px
    );

    draw_legend(&mut canvas, colors);

    let half_bar = layout.bar_height / 2.0;
    for (id, entry) in registry.iter() {
        let y = layout.row_center(id);
        canvas.fill_rect(
            layout.x(0.0),
            y - half_bar,
            layout.x(entry.length),
            y + half_bar,
            BACKBONE_GREY,
            1.0,
        );
        let label_y = y - Canvas::text_height(LABEL_SCALE) as f64 / 2.0;
        canvas.draw_text(MARGIN, label_y, &entry.name, LABEL_SCALE, LABEL_GREY);
    }

    let segment_height = layout.bar_height;
    for record in table {
        let (ax0, ax1) = layout.span_x(&record.a);
        let ref_top = layout.row_center(record.a.chrom) - half_bar - segment_height;
        canvas.fill_rect(ax0, ref_top, ax1, ref_top + segment_height, colors.reference, 1.0);

        let (bx0, bx1) = layout.span_x(&record.b);
        let query_top = layout.row_center(record.b.chrom) + half_bar;
        canvas.fill_rect(bx0, query_top, bx1, query_top + segment_height, colors.query, 1.0);

        let start = ((ax0 + ax1) / 2.0, ref_top);
        let end = ((bx0 + bx1) / 2.0, query_top + segment_height);
        let bulge = layout.row_height * 0.5;
        let curve = cubic_bezier(
            start,
            (start.0, start.1 - bulge),
            (end.0, end.1 + bulge),
            end,
            LINK_SEGMENTS,
        );
        for pair in curve.windows(2) {
            draw_blended_segment(&mut canvas, pair[0], pair[1], colors, LINK_ALPHA);
        }
    }

    Ok(canvas.into_image())
}

fn draw_blended_segment(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    colors: &LinearColors,
    alpha: f64,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    // Skip the final point, it is the first point of the next segment.
    for step in 0..steps {
        let t = step as f64 / steps as f64;
        let (x, y) = (from.0 + dx * t, from.1 + dy * t);
        canvas.blend_pixel(x.round() as i64, y.round() as i64, colors.link, alpha);
    }
}
