//! Drawing-surface capability and an in-memory implementation.
//!
//! The renderer never touches pixels directly; it drives a [`Canvas`], which
//! any host can implement over its own frame buffer. The trait carries the
//! handful of primitives the overlay needs plus an explicit scratch/blend
//! pair for the translucent path, so the core never assumes in-place
//! aliasing semantics.
//!
//! [`PixelCanvas`] is the built-in implementation over a packed 3-channel
//! byte buffer. It is what the CLI renders onto and what the tests inspect.

use crate::color::Color;

/// Abstract drawing surface consumed by the renderer.
pub trait Canvas {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill an axis-aligned rectangle. Out-of-bounds parts are clipped.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color);

    /// Outline an axis-aligned rectangle with the given border thickness.
    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32, thickness: u32, color: Color);

    /// Draw a straight line segment of the given thickness.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: u32, color: Color);

    /// Fill a triangle given its three corners.
    fn fill_triangle(&mut self, points: [(i32, i32); 3], color: Color);

    /// Draw `text` with its bottom-left corner at (`x`, `baseline_y`).
    /// Implementations may support digits only; that covers hour labels.
    fn text(&mut self, x: i32, baseline_y: i32, text: &str, color: Color);

    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> u32;

    /// An independent copy of the current pixels to draw the overlay on.
    fn scratch(&self) -> Self
    where
        Self: Sized;

    /// Blend `overlay` back onto this surface:
    /// `pixel = alpha * overlay + (1 - alpha) * pixel` per channel.
    fn blend_from(&mut self, overlay: &Self, alpha: f64)
    where
        Self: Sized;
}

/// 3×5 pixel digit glyphs, one row per byte, most significant of the low
/// three bits on the left.
const DIGIT_GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Packed 3-channel byte buffer with clipped primitives.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelCanvas {
    /// A black canvas of the given size.
    pub fn new(width: u32, height: u32) -> PixelCanvas {
        PixelCanvas {
            width,
            height,
            data: vec![0; (width * height * 3) as usize],
        }
    }

    /// Wrap an existing packed row-major 3-channel buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> anyhow::Result<PixelCanvas> {
        let expected = (width * height * 3) as usize;
        if data.len() != expected {
            anyhow::bail!(
                "pixel buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            );
        }
        Ok(PixelCanvas {
            width,
            height,
            data,
        })
    }

    /// A canvas filled with a uniform color.
    pub fn filled(width: u32, height: u32, color: Color) -> PixelCanvas {
        let mut canvas = PixelCanvas::new(width, height);
        canvas.fill_rect(0, 0, width, height, color);
        canvas
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
        Some(Color([self.data[idx], self.data[idx + 1], self.data[idx + 2]]))
    }

    /// Raw packed bytes, row-major, 3 channels per pixel.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.data[idx..idx + 3].copy_from_slice(&color.0);
    }

    fn line_thin(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl Canvas for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i32).min(self.width as i32);
        let y1 = (y + height as i32).min(self.height as i32);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.set_pixel(xx, yy, color);
            }
        }
    }

    fn stroke_rect(&mut self, x: i32, y: i32, width: u32, height: u32, thickness: u32, color: Color) {
        let t = thickness.max(1);
        self.fill_rect(x, y, width, t, color);
        self.fill_rect(x, y + height as i32 - t as i32, width, t, color);
        self.fill_rect(x, y, t, height, color);
        self.fill_rect(x + width as i32 - t as i32, y, t, height, color);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, thickness: u32, color: Color) {
        let t = thickness.max(1) as i32;
        // Offset parallel strokes along the minor axis
        let horizontal_ish = (x1 - x0).abs() >= (y1 - y0).abs();
        for i in 0..t {
            let offset = i - (t - 1) / 2;
            if horizontal_ish {
                self.line_thin(x0, y0 + offset, x1, y1 + offset, color);
            } else {
                self.line_thin(x0 + offset, y0, x1 + offset, y1, color);
            }
        }
    }

    fn fill_triangle(&mut self, points: [(i32, i32); 3], color: Color) {
        let orient = |a: (i32, i32), b: (i32, i32), p: (i32, i32)| -> i64 {
            i64::from(b.0 - a.0) * i64::from(p.1 - a.1)
                - i64::from(b.1 - a.1) * i64::from(p.0 - a.0)
        };
        let [a, b, c] = points;
        let min_x = a.0.min(b.0).min(c.0).max(0);
        let max_x = a.0.max(b.0).max(c.0).min(self.width as i32 - 1);
        let min_y = a.1.min(b.1).min(c.1).max(0);
        let max_y = a.1.max(b.1).max(c.1).min(self.height as i32 - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x, y);
                let w0 = orient(a, b, p);
                let w1 = orient(b, c, p);
                let w2 = orient(c, a, p);
                let inside =
                    (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0);
                if inside {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    fn text(&mut self, x: i32, baseline_y: i32, text: &str, color: Color) {
        let mut pen_x = x;
        for ch in text.chars() {
            if let Some(digit) = ch.to_digit(10) {
                let glyph = DIGIT_GLYPHS[digit as usize];
                for (row, bits) in glyph.iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits >> (GLYPH_WIDTH - 1 - col) & 1 == 1 {
                            self.set_pixel(
                                pen_x + col as i32,
                                baseline_y - GLYPH_HEIGHT + row as i32,
                                color,
                            );
                        }
                    }
                }
            }
            pen_x += GLYPH_ADVANCE as i32;
        }
    }

    fn text_width(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            0
        } else {
            chars * GLYPH_ADVANCE - 1
        }
    }

    fn scratch(&self) -> PixelCanvas {
        self.clone()
    }

    fn blend_from(&mut self, overlay: &PixelCanvas, alpha: f64) {
        debug_assert_eq!(self.data.len(), overlay.data.len());
        let a = alpha.clamp(0.0, 1.0);
        for (dst, src) in self.data.iter_mut().zip(&overlay.data) {
            *dst = (a * f64::from(*src) + (1.0 - a) * f64::from(*dst)).round() as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color([255, 255, 255]);
    const GRAY: Color = Color([100, 100, 100]);

    #[test]
    fn fill_rect_clips_to_the_canvas() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_rect(-5, -5, 8, 8, WHITE);
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(3, 3), Some(Color([0, 0, 0])));
    }

    #[test]
    fn stroke_rect_leaves_the_interior_untouched() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.stroke_rect(2, 2, 10, 10, 1, WHITE);
        assert_eq!(canvas.pixel(2, 2), Some(WHITE));
        assert_eq!(canvas.pixel(11, 11), Some(WHITE));
        assert_eq!(canvas.pixel(6, 6), Some(Color([0, 0, 0])));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.line(1, 1, 15, 9, 1, WHITE);
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
        assert_eq!(canvas.pixel(15, 9), Some(WHITE));
    }

    #[test]
    fn vertical_line_thickness_spreads_horizontally() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.line(10, 0, 10, 19, 2, WHITE);
        assert_eq!(canvas.pixel(10, 5), Some(WHITE));
        assert_eq!(canvas.pixel(11, 5), Some(WHITE));
        assert_eq!(canvas.pixel(9, 5), Some(Color([0, 0, 0])));
    }

    #[test]
    fn triangle_contains_its_centroid_and_not_the_far_corner() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_triangle([(0, 0), (10, 0), (0, 10)], WHITE);
        assert_eq!(canvas.pixel(3, 3), Some(WHITE));
        assert_eq!(canvas.pixel(9, 9), Some(Color([0, 0, 0])));
    }

    #[test]
    fn blend_is_the_weighted_average() {
        let mut base = PixelCanvas::filled(4, 4, Color([100, 0, 200]));
        let overlay = PixelCanvas::filled(4, 4, Color([200, 0, 0]));
        base.blend_from(&overlay, 0.5);
        assert_eq!(base.pixel(0, 0), Some(Color([150, 0, 100])));
    }

    #[test]
    fn blend_at_full_opacity_replaces_pixels() {
        let mut base = PixelCanvas::filled(2, 2, GRAY);
        let overlay = PixelCanvas::filled(2, 2, WHITE);
        base.blend_from(&overlay, 1.0);
        assert_eq!(base.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn digit_text_has_predictable_width() {
        let canvas = PixelCanvas::new(10, 10);
        assert_eq!(canvas.text_width("08"), 7);
        assert_eq!(canvas.text_width(""), 0);
    }

    #[test]
    fn text_draws_above_the_baseline() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.text(0, 8, "1", WHITE);
        // Glyph occupies rows baseline-5 .. baseline-1
        assert!(canvas.pixel(1, 3).is_some_and(|c| c == WHITE));
        assert_eq!(canvas.pixel(1, 8), Some(Color([0, 0, 0])));
    }
}
