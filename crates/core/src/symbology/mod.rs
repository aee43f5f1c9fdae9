//! Barcode Symbology
//!
//! Symbol rendering is a capability: callers hand a [`SymbolRenderer`] an item
//! code and [`SymbolOptions`] and get back a vector [`Symbol`] carrying the
//! computed check digit. [`Ean13Renderer`] is the built-in implementation.

use mockall::automock;
use thiserror::Error;

use crate::items::ItemCode;

pub mod ean13;
pub mod symbol;

pub use ean13::{Ean13, Ean13Renderer};
pub use symbol::{Shape, Symbol};

/// Errors raised while rendering a symbol.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolError {
    /// A payload digit fell outside `0..=9`.
    #[error("invalid payload digit {0}")]
    InvalidDigit(u8),

    /// A geometric option is zero, negative or not finite.
    #[error("invalid symbol option `{name}`: {value}")]
    InvalidOption {
        /// Option name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Visual parameters of a rendered symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolOptions {
    /// Width of a single module (narrowest bar).
    pub module_width: f64,

    /// Height of the data bars.
    pub bar_height: f64,

    /// Space around the symbol.
    pub margin: f64,

    /// Human-readable digit size.
    pub font_size: f64,

    /// Gap between the bars and the digits.
    pub text_margin: f64,

    /// Print the digits beneath the bars.
    pub display_value: bool,

    /// Bar colour.
    pub line_color: String,

    /// Background colour, `None` for transparent.
    pub background: Option<String>,

    /// Digit colour.
    pub text_color: String,

    /// Digit font family (SVG output only).
    pub font_family: String,
}

impl SymbolOptions {
    /// Black on white, used for labels and printing.
    pub fn label() -> Self {
        Self {
            module_width: 2.0,
            bar_height: 60.0,
            margin: 10.0,
            font_size: 16.0,
            text_margin: 4.0,
            display_value: true,
            line_color: "#000000".to_string(),
            background: Some("#FFFFFF".to_string()),
            text_color: "#000000".to_string(),
            font_family: "Inter".to_string(),
        }
    }

    /// Light bars on a transparent background, used for saved-item previews.
    pub fn preview() -> Self {
        Self {
            line_color: "#e2e8f0".to_string(),
            background: None,
            text_color: "#94a3b8".to_string(),
            ..Self::label()
        }
    }

    /// Reject geometry that cannot produce a drawable symbol.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidOption`] naming the first bad option.
    pub fn check(&self) -> Result<(), SymbolError> {
        let positive = [
            ("module_width", self.module_width),
            ("bar_height", self.bar_height),
        ];

        let non_negative = [
            ("margin", self.margin),
            ("font_size", self.font_size),
            ("text_margin", self.text_margin),
        ];

        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SymbolError::InvalidOption { name, value });
            }
        }

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SymbolError::InvalidOption { name, value });
            }
        }

        if self.display_value && self.font_size <= 0.0 {
            return Err(SymbolError::InvalidOption {
                name: "font_size",
                value: self.font_size,
            });
        }

        Ok(())
    }
}

impl Default for SymbolOptions {
    fn default() -> Self {
        Self::label()
    }
}

/// Renders scannable symbols for item codes.
#[automock]
pub trait SymbolRenderer: Send + Sync {
    /// Render the symbol for `code`.
    ///
    /// # Errors
    ///
    /// Returns a [`SymbolError`] when the symbol cannot be produced.
    fn render(&self, code: &ItemCode, options: &SymbolOptions) -> Result<Symbol, SymbolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_pass_checks() {
        assert_eq!(SymbolOptions::label().check(), Ok(()));
        assert_eq!(SymbolOptions::preview().check(), Ok(()));
    }

    #[test]
    fn preview_keeps_label_geometry() {
        let label = SymbolOptions::label();
        let preview = SymbolOptions::preview();

        assert!((label.module_width - preview.module_width).abs() < f64::EPSILON);
        assert!(preview.background.is_none());
    }

    #[test]
    fn check_rejects_zero_module_width() {
        let options = SymbolOptions {
            module_width: 0.0,
            ..SymbolOptions::label()
        };

        assert_eq!(
            options.check(),
            Err(SymbolError::InvalidOption {
                name: "module_width",
                value: 0.0
            })
        );
    }

    #[test]
    fn check_rejects_nan_margin() {
        let options = SymbolOptions {
            margin: f64::NAN,
            ..SymbolOptions::label()
        };

        assert!(matches!(
            options.check(),
            Err(SymbolError::InvalidOption { name: "margin", .. })
        ));
    }

    #[test]
    fn hidden_digits_allow_zero_font() {
        let options = SymbolOptions {
            font_size: 0.0,
            display_value: false,
            ..SymbolOptions::label()
        };

        assert_eq!(options.check(), Ok(()));
    }

    #[test]
    fn shown_digits_need_a_font_size() {
        let options = SymbolOptions {
            font_size: 0.0,
            ..SymbolOptions::label()
        };

        assert!(options.check().is_err());
    }
}
