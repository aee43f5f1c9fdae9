//! Bitmap text.

use font8x8::{BASIC_FONTS, LATIN_FONTS, UnicodeFonts};

use super::Canvas;

/// Glyph cell size in font units.
const CELL: f64 = 8.0;

/// Width of `content` drawn at `size` without condensing.
pub fn text_width(content: &str, size: f64) -> f64 {
    let glyphs = u32::try_from(content.chars().count()).unwrap_or(u32::MAX);

    f64::from(glyphs) * size
}

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or_default()
}

pub(super) fn draw(
    canvas: &mut Canvas,
    content: &str,
    center_x: f64,
    top: f64,
    size: f64,
    max_width: Option<f64>,
    shade: u8,
) {
    if content.is_empty() || size <= 0.0 {
        return;
    }

    let natural = text_width(content, size);
    let condense = match max_width {
        Some(limit) if limit > 0.0 && natural > limit => limit / natural,
        _ => 1.0,
    };

    let dot_height = size / CELL;
    let dot_width = dot_height * condense;
    let advance = size * condense;
    let mut pen = center_x - natural * condense / 2.0;

    for c in content.chars() {
        for (row, bits) in (0u32..).zip(glyph(c)) {
            for col in 0u32..8 {
                if bits & (1 << col) != 0 {
                    canvas.fill_rect(
                        pen + f64::from(col) * dot_width,
                        top + f64::from(row) * dot_height,
                        dot_width,
                        dot_height,
                        shade,
                    );
                }
            }
        }

        pen += advance;
    }
}
