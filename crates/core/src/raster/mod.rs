//! Raster Canvas
//!
//! An 8-bit greyscale canvas that vector shapes are drawn onto before PNG
//! encoding. Edges snap to whole pixels so bars stay crisp.

use thiserror::Error;

use crate::symbology::{Shape, Symbol};

mod text;

pub use text::text_width;

/// Ink colour.
pub const BLACK: u8 = 0;

/// Paper colour.
pub const WHITE: u8 = 255;

/// Errors raised while producing raster output.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The canvas has no pixels.
    #[error("canvas is empty ({width}x{height})")]
    Empty {
        /// Canvas width.
        width: u32,
        /// Canvas height.
        height: u32,
    },

    /// The PNG encoder failed.
    #[error("failed to encode png")]
    Encode(#[from] png::EncodingError),
}

/// Greyscale pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Create a canvas filled with a single shade.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shade at a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, shade: u8) {
        let x0 = snap(x, self.width);
        let x1 = snap(x + width, self.width);
        let y0 = snap(y, self.height);
        let y1 = snap(y + height, self.height);

        if x0 >= x1 {
            return;
        }

        let stride = self.width as usize;

        for row in y0..y1 {
            let start = row as usize * stride + x0 as usize;
            let end = row as usize * stride + x1 as usize;

            if let Some(span) = self.pixels.get_mut(start..end) {
                span.fill(shade);
            }
        }
    }

    /// Draw a line of text horizontally centred on `center_x`.
    ///
    /// `size` is the height of the text box. When `max_width` is given and the
    /// text is wider, glyphs are condensed horizontally to fit.
    pub fn draw_text(
        &mut self,
        content: &str,
        center_x: f64,
        top: f64,
        size: f64,
        max_width: Option<f64>,
        shade: u8,
    ) {
        text::draw(self, content, center_x, top, size, max_width, shade);
    }

    /// Draw a symbol with its top-left corner at `(x, y)`, scaled uniformly.
    pub fn draw_symbol(&mut self, symbol: &Symbol, x: f64, y: f64, scale: f64, shade: u8) {
        for shape in symbol.shapes() {
            match shape {
                Shape::Rect {
                    x: left,
                    y: top,
                    width,
                    height,
                } => self.fill_rect(
                    x + left * scale,
                    y + top * scale,
                    width * scale,
                    height * scale,
                    shade,
                ),
                Shape::Text {
                    x: center,
                    y: top,
                    size,
                    content,
                } => self.draw_text(
                    content,
                    x + center * scale,
                    y + top * scale,
                    size * scale,
                    None,
                    shade,
                ),
            }
        }
    }

    /// Encode as an 8-bit greyscale PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Empty`] for a zero-sized canvas and
    /// [`RasterError::Encode`] when the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        if self.pixels.is_empty() {
            return Err(RasterError::Empty {
                width: self.width,
                height: self.height,
            });
        }

        let mut bytes = Vec::new();

        let mut encoder = png::Encoder::new(&mut bytes, self.width, self.height);
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.pixels)?;
        writer.finish()?;

        Ok(bytes)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to the canvas bounds first"
)]
fn snap(value: f64, max: u32) -> u32 {
    if value.is_nan() {
        return 0;
    }

    value.round().clamp(0.0, f64::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_canvas_is_uniform() {
        let canvas = Canvas::new(4, 3, WHITE);

        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
        assert_eq!(canvas.pixel(3, 2), Some(WHITE));
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn fill_rect_snaps_and_clips() {
        let mut canvas = Canvas::new(10, 10, WHITE);

        canvas.fill_rect(1.4, 2.6, 2.2, 100.0, BLACK);

        assert_eq!(canvas.pixel(0, 5), Some(WHITE));
        assert_eq!(canvas.pixel(1, 5), Some(BLACK));
        assert_eq!(canvas.pixel(3, 5), Some(BLACK));
        assert_eq!(canvas.pixel(4, 5), Some(WHITE));
        assert_eq!(canvas.pixel(1, 2), Some(WHITE), "row 2 is above the snapped top");
        assert_eq!(canvas.pixel(1, 9), Some(BLACK), "clipped at the bottom edge");
    }

    #[test]
    fn fill_rect_outside_is_ignored() {
        let mut canvas = Canvas::new(5, 5, WHITE);

        canvas.fill_rect(-20.0, -20.0, 5.0, 5.0, BLACK);
        canvas.fill_rect(f64::NAN, 0.0, 3.0, 3.0, BLACK);

        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn png_has_signature_and_dimensions() -> TestResult {
        let bytes = Canvas::new(400, 200, WHITE).encode_png()?;

        assert_eq!(bytes.get(..8), Some(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A][..]));
        assert_eq!(bytes.get(16..20), Some(&400u32.to_be_bytes()[..]));
        assert_eq!(bytes.get(20..24), Some(&200u32.to_be_bytes()[..]));

        Ok(())
    }

    #[test]
    fn empty_canvas_cannot_be_encoded() {
        let result = Canvas::new(0, 10, WHITE).encode_png();

        assert!(
            matches!(result, Err(RasterError::Empty { width: 0, height: 10 })),
            "expected Empty, got {result:?}"
        );
    }
}
