//! Vector Symbols

use std::fmt::Write;

use crate::symbology::SymbolOptions;

/// A single drawing primitive in symbol coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled bar.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Bar width.
        width: f64,
        /// Bar height.
        height: f64,
    },

    /// Human-readable text run, horizontally centred on `x`.
    Text {
        /// Horizontal centre.
        x: f64,
        /// Top of the text box.
        y: f64,
        /// Font size (text box height).
        size: f64,
        /// Characters to draw.
        content: String,
    },
}

/// A rendered barcode symbol.
///
/// Symbols are resolution independent: the same shapes are written out as SVG
/// markup and rasterized into label images at any scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    text: String,
    check_digit: u8,
    width: f64,
    height: f64,
    shapes: Vec<Shape>,
    options: SymbolOptions,
}

impl Symbol {
    /// Assemble a symbol from already laid out shapes.
    pub fn new(
        text: String,
        check_digit: u8,
        (width, height): (f64, f64),
        shapes: Vec<Shape>,
        options: SymbolOptions,
    ) -> Self {
        Self {
            text,
            check_digit,
            width,
            height,
            shapes,
            options,
        }
    }

    /// Full human-readable payload, including the check digit.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Computed check digit.
    pub fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// Natural width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Natural height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Drawing primitives, bars first.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Options the symbol was rendered with.
    pub fn options(&self) -> &SymbolOptions {
        &self.options
    }

    /// Bars only.
    pub fn bars(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|shape| matches!(shape, Shape::Rect { .. }))
    }

    /// Serialize as standalone SVG markup.
    pub fn to_svg(&self) -> String {
        let options = &self.options;
        let mut svg = String::new();

        // Writing into a `String` cannot fail.
        _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );

        if let Some(background) = &options.background {
            _ = write!(
                svg,
                r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
                self.width,
                self.height,
                escape_attr(background),
            );
        }

        _ = write!(svg, r#"<g fill="{}">"#, escape_attr(&options.line_color));

        for shape in &self.shapes {
            if let Shape::Rect {
                x,
                y,
                width,
                height,
            } = shape
            {
                _ = write!(
                    svg,
                    r#"<rect x="{x}" y="{y}" width="{width}" height="{height}"/>"#
                );
            }
        }

        svg.push_str("</g>");

        let texts = self.shapes.iter().filter_map(|shape| match shape {
            Shape::Text {
                x,
                y,
                size,
                content,
            } => Some((x, y + size, content)),
            Shape::Rect { .. } => None,
        });

        let mut texts = texts.peekable();

        if texts.peek().is_some() {
            _ = write!(
                svg,
                r#"<g fill="{}" font-family="{}" font-weight="bold" font-size="{}px" text-anchor="middle">"#,
                escape_attr(&options.text_color),
                escape_attr(&options.font_family),
                options.font_size,
            );

            for (x, baseline, content) in texts {
                _ = write!(svg, r#"<text x="{x}" y="{baseline}">{content}</text>"#);
            }

            svg.push_str("</g>");
        }

        svg.push_str("</svg>");

        svg
    }
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
