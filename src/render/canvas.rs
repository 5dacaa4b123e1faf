use super::font::{glyph, GLYPH_ADVANCE, GLYPH_HEIGHT};
use image::{Rgb, RgbImage};

pub type Point = (f64, f64);

/// Raster drawing surface with alpha blending over an RGB image.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Blends `color` into the pixel at (`x`, `y`); out-of-canvas pixels are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f64) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for channel in 0..3 {
            let under = pixel.0[channel] as f64;
            let over = color.0[channel] as f64;
            pixel.0[channel] = (over * alpha + under * (1.0 - alpha)).round() as u8;
        }
    }

    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb<u8>, alpha: f64) {
        let (left, right) = (x0.min(x1).round() as i64, x0.max(x1).round() as i64);
        let (top, bottom) = (y0.min(y1).round() as i64, y0.max(y1).round() as i64);
        for y in top..bottom.max(top + 1) {
            for x in left..right.max(left + 1) {
                self.blend_pixel(x, y, color, alpha);
            }
        }
    }

    pub fn draw_line(&mut self, from: Point, to: Point, color: Rgb<u8>, thickness: f64) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        let half = thickness.max(1.0) / 2.0;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            let (x, y) = (from.0 + dx * t, from.1 + dy * t);
            self.fill_rect(x - half, y - half, x + half, y + half, color, 1.0);
        }
    }

    pub fn draw_polyline(&mut self, points: &[Point], color: Rgb<u8>, thickness: f64) {
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], color, thickness);
        }
    }

    /// Fills a closed polygon using the even-odd rule, sampling pixel centers.
    pub fn fill_polygon(&mut self, points: &[Point], color: Rgb<u8>, alpha: f64) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let first_row = min_y.floor().max(0.0) as i64;
        let last_row = max_y.ceil().min(self.height() as f64) as i64;

        let mut crossings: Vec<f64> = Vec::new();
        for row in first_row..last_row {
            let y = row as f64 + 0.5;
            crossings.clear();
            for (i, &(x0, y0)) in points.iter().enumerate() {
                let (x1, y1) = points[(i + 1) % points.len()];
                if (y0 <= y && y1 > y) || (y1 <= y && y0 > y) {
                    crossings.push(x0 + (y - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i64;
                let end = (pair[1] - 0.5).floor() as i64;
                for x in start..=end {
                    self.blend_pixel(x, row, color, alpha);
                }
            }
        }
    }

    /// Draws `text` with its top-left corner at (`x`, `y`), each font unit `scale` pixels wide.
    pub fn draw_text(&mut self, x: f64, y: f64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1);
        let (x, y) = (x.round() as i64, y.round() as i64);
        for (i, c) in text.chars().enumerate() {
            let base_x = x + (i as u32 * GLYPH_ADVANCE * scale) as i64;
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..8u32 {
                    if (bits >> (7 - col)) & 1 == 1 {
                        let px = base_x + (col * scale) as i64;
                        let py = y + (row as u32 * scale) as i64;
                        for ox in 0..scale as i64 {
                            for oy in 0..scale as i64 {
                                self.blend_pixel(px + ox, py + oy, color, 1.0);
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn text_height(scale: u32) -> u32 {
        GLYPH_HEIGHT * scale.max(1)
    }
}

pub fn cubic_bezier(p0: Point, p1: Point, p2: Point, p3: Point, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let u = 1.0 - t;
            let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
            (
                a * p0.0 + b * p1.0 + c * p2.0 + d * p3.0,
                a * p0.1 + b * p1.1 + c * p2.1 + d * p3.1,
            )
        })
        .collect()
}

pub fn quadratic_bezier(p0: Point, control: Point, p1: Point, segments: usize) -> Vec<Point> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f64 / segments as f64;
            let u = 1.0 - t;
            (
                u * u * p0.0 + 2.0 * u * t * control.0 + t * t * p1.0,
                u * u * p0.1 + 2.0 * u * t * control.1 + t * t * p1.1,
            )
        })
        .collect()
}
