//! Labels
//!
//! A label is a fixed-size card: the item name across the top, the barcode
//! symbol in the middle and the price line along the bottom.

use crate::{
    items::{ItemCode, ItemName, Mrp},
    raster::{BLACK, Canvas, WHITE},
    symbology::Symbol,
};

pub mod print;

/// Confirmed label content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelContent {
    /// Item name.
    pub name: ItemName,

    /// 12-digit item code.
    pub code: ItemCode,

    /// Price.
    pub mrp: Mrp,
}

impl LabelContent {
    /// Price line printed at the bottom of the label.
    pub fn price_line(&self) -> String {
        format!("MRP: {}", self.mrp)
    }
}

/// Geometry of a composed label, in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Canvas width.
    pub width: u32,

    /// Canvas height.
    pub height: u32,

    /// Space kept clear around the edges.
    pub padding: f64,

    /// Item name text height.
    pub name_size: f64,

    /// Price text height.
    pub price_size: f64,

    /// Target symbol width.
    pub symbol_width: f64,

    /// Top of the symbol slot.
    pub symbol_top: f64,

    /// Minimum gap between the symbol and the price line.
    pub gap: f64,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            padding: 20.0,
            name_size: 24.0,
            price_size: 28.0,
            symbol_width: 320.0,
            symbol_top: 52.0,
            gap: 4.0,
        }
    }
}

/// Where a symbol lands on the label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolFrame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Uniform scale applied to the symbol.
    pub scale: f64,
}

impl LabelLayout {
    fn canvas_width(&self) -> f64 {
        f64::from(self.width)
    }

    fn canvas_height(&self) -> f64 {
        f64::from(self.height)
    }

    /// Top of the price line.
    pub fn price_top(&self) -> f64 {
        self.canvas_height() - self.padding - self.price_size
    }

    /// Place a symbol: scaled to the target width with its aspect ratio
    /// kept, shrunk further if it would run into the price line, and
    /// centred in its slot.
    pub fn symbol_frame(&self, symbol: &Symbol) -> SymbolFrame {
        let slot_height = (self.price_top() - self.gap - self.symbol_top).max(0.0);

        let scale = if symbol.width() > 0.0 && symbol.height() > 0.0 {
            (self.symbol_width / symbol.width()).min(slot_height / symbol.height())
        } else {
            0.0
        };

        let width = symbol.width() * scale;
        let height = symbol.height() * scale;

        SymbolFrame {
            x: (self.canvas_width() - width) / 2.0,
            y: self.symbol_top + (slot_height - height) / 2.0,
            scale,
        }
    }

    /// Compose the label image.
    pub fn compose(&self, content: &LabelContent, symbol: &Symbol) -> Canvas {
        let mut canvas = Canvas::new(self.width, self.height, WHITE);
        let center = self.canvas_width() / 2.0;
        let text_width = (self.canvas_width() - self.padding * 2.0).max(0.0);

        canvas.draw_text(
            content.name.as_str(),
            center,
            self.padding,
            self.name_size,
            Some(text_width),
            BLACK,
        );

        let frame = self.symbol_frame(symbol);
        canvas.draw_symbol(symbol, frame.x, frame.y, frame.scale, BLACK);

        canvas.draw_text(
            &content.price_line(),
            center,
            self.price_top(),
            self.price_size,
            Some(text_width),
            BLACK,
        );

        canvas
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        symbology::{Ean13Renderer, SymbolOptions, SymbolRenderer},
        validation::LabelInput,
    };

    use super::*;

    fn fixture() -> TestResult<(LabelContent, Symbol)> {
        let content = LabelInput::new("Basmati Rice 1kg", "590123412345", "25.5").validate()?;
        let symbol = Ean13Renderer::new().render(&content.code, &SymbolOptions::label())?;

        Ok((content, symbol))
    }

    #[test]
    fn price_line_has_two_decimals() -> TestResult {
        let (content, _) = fixture()?;

        assert_eq!(content.price_line(), "MRP: 25.50");

        Ok(())
    }

    #[test]
    fn symbol_fits_between_name_and_price() -> TestResult {
        let (_, symbol) = fixture()?;
        let layout = LabelLayout::default();
        let frame = layout.symbol_frame(&symbol);

        let bottom = frame.y + symbol.height() * frame.scale;
        let right = frame.x + symbol.width() * frame.scale;

        assert!(frame.y >= layout.symbol_top, "symbol starts below the name");
        assert!(bottom <= layout.price_top() - layout.gap + 1e-9, "symbol ends above the price");
        assert!(symbol.width() * frame.scale <= layout.symbol_width + 1e-9);
        assert!(((frame.x) - (400.0 - right)).abs() < 1e-9, "symbol is centred");

        Ok(())
    }

    #[test]
    fn wide_slot_uses_target_width() -> TestResult {
        let (_, symbol) = fixture()?;
        let layout = LabelLayout {
            height: 400,
            ..LabelLayout::default()
        };

        let frame = layout.symbol_frame(&symbol);

        assert!((symbol.width() * frame.scale - 320.0).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn composed_label_has_ink_in_each_band() -> TestResult {
        let (content, symbol) = fixture()?;
        let layout = LabelLayout::default();
        let canvas = layout.compose(&content, &symbol);

        let band_has_ink = |from: u32, to: u32| {
            (from..to).any(|y| (0..canvas.width()).any(|x| canvas.pixel(x, y) == Some(BLACK)))
        };

        assert_eq!((canvas.width(), canvas.height()), (400, 200));
        assert!(band_has_ink(20, 44), "name band");
        assert!(band_has_ink(52, 148), "symbol band");
        assert!(band_has_ink(152, 180), "price band");
        assert!(!band_has_ink(0, 20), "top padding stays blank");

        Ok(())
    }
}
