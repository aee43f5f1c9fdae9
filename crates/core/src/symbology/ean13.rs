//! EAN-13
//!
//! An EAN-13 symbol is 95 modules wide: a `101` start guard, six left-hand
//! digits, a `01010` centre guard, six right-hand digits and a `101` end
//! guard. Left-hand digits use odd (L) or even (G) parity patterns; the
//! leading digit is not drawn as bars at all but is encoded by which parity
//! sequence the left half uses.

use crate::{
    items::ItemCode,
    symbology::{Shape, Symbol, SymbolError, SymbolOptions, SymbolRenderer},
};

/// Total modules in a symbol.
pub const MODULES: usize = 95;

/// Modules per encoded digit.
const DIGIT_MODULES: u32 = 7;

/// Quiet zone to the left of the symbol, in modules. The leading digit is
/// printed here.
const LEFT_QUIET_ZONE: f64 = 11.0;

/// Quiet zone to the right of the symbol, in modules.
const RIGHT_QUIET_ZONE: f64 = 7.0;

const L_CODES: [u8; 10] = [
    0b000_1101, 0b001_1001, 0b001_0011, 0b011_1101, 0b010_0011, 0b011_0001, 0b010_1111,
    0b011_1011, 0b011_0111, 0b000_1011,
];

const G_CODES: [u8; 10] = [
    0b010_0111, 0b011_0011, 0b001_1011, 0b010_0001, 0b001_1101, 0b011_1001, 0b000_0101,
    0b001_0001, 0b000_1001, 0b001_0111,
];

const R_CODES: [u8; 10] = [
    0b111_0010, 0b110_0110, 0b110_1100, 0b100_0010, 0b101_1100, 0b100_1110, 0b101_0000,
    0b100_0100, 0b100_1000, 0b111_0100,
];

/// Left-half parity per leading digit, first digit in the high bit; a set bit
/// selects the G pattern.
const PARITY: [u8; 10] = [
    0b00_0000, 0b00_1011, 0b00_1101, 0b00_1110, 0b01_0011, 0b01_1001, 0b01_1100, 0b01_0101,
    0b01_0110, 0b01_1010,
];

/// Compute the EAN-13 check digit for twelve payload digits.
///
/// Digits in odd positions (counting from one on the left) weigh 1, digits in
/// even positions weigh 3; the check digit brings the weighted sum up to the
/// next multiple of ten.
pub fn check_digit(digits: impl IntoIterator<Item = u8>) -> u8 {
    let sum: u32 = digits
        .into_iter()
        .enumerate()
        .map(|(idx, digit)| {
            let weight = if idx % 2 == 0 { 1 } else { 3 };
            u32::from(digit) * weight
        })
        .sum();

    let remainder = u8::try_from(sum % 10).unwrap_or_default();

    (10 - remainder) % 10
}

/// Encoded EAN-13 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ean13 {
    digits: Vec<u8>,
    modules: Vec<bool>,
}

impl Ean13 {
    /// Encode an item code, appending its check digit.
    ///
    /// # Errors
    ///
    /// Returns [`SymbolError::InvalidDigit`] if a digit has no pattern, which
    /// cannot happen for a parsed [`ItemCode`].
    pub fn encode(code: &ItemCode) -> Result<Self, SymbolError> {
        let mut digits: Vec<u8> = code.digits().collect();
        digits.push(check_digit(digits.iter().copied()));

        let (leading, rest) = digits
            .split_first()
            .ok_or(SymbolError::InvalidDigit(0))?;

        let (left, right) = rest.split_at(rest.len() / 2);
        let parity = pattern(&PARITY, *leading)?;

        let mut modules = Vec::with_capacity(MODULES);

        push_pattern(&mut modules, 0b101, 3);

        for (position, &digit) in (0u32..).zip(left) {
            let even = (parity >> (5 - position)) & 1 == 1;
            let table = if even { &G_CODES } else { &L_CODES };

            push_pattern(&mut modules, pattern(table, digit)?, DIGIT_MODULES);
        }

        push_pattern(&mut modules, 0b01010, 5);

        for &digit in right {
            push_pattern(&mut modules, pattern(&R_CODES, digit)?, DIGIT_MODULES);
        }

        push_pattern(&mut modules, 0b101, 3);

        Ok(Self { digits, modules })
    }

    /// All 13 digits.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// The computed check digit.
    pub fn check_digit(&self) -> u8 {
        self.digits.last().copied().unwrap_or_default()
    }

    /// The 13 digits as text.
    pub fn text(&self) -> String {
        self.digits.iter().map(|digit| char::from(b'0' + digit)).collect()
    }

    /// Module sequence, `true` for a dark module.
    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Runs of dark modules as `(start, len)` pairs.
    pub fn bars(&self) -> Vec<(usize, usize)> {
        let mut bars = Vec::new();
        let mut start = None;

        for (idx, &dark) in self.modules.iter().enumerate() {
            match (dark, start) {
                (true, None) => start = Some(idx),
                (false, Some(begin)) => {
                    bars.push((begin, idx - begin));
                    start = None;
                }
                _ => {}
            }
        }

        if let Some(begin) = start {
            bars.push((begin, self.modules.len() - begin));
        }

        bars
    }
}

/// Whether a module belongs to one of the three guard patterns.
pub fn is_guard(module: usize) -> bool {
    matches!(module, 0..=2 | 45..=49 | 92..=94)
}

fn pattern(table: &[u8; 10], digit: u8) -> Result<u8, SymbolError> {
    table
        .get(usize::from(digit))
        .copied()
        .ok_or(SymbolError::InvalidDigit(digit))
}

fn push_pattern(modules: &mut Vec<bool>, pattern: u8, width: u32) {
    modules.extend((0..width).rev().map(|shift| (pattern >> shift) & 1 == 1));
}

/// Built-in EAN-13 renderer.
///
/// Guard bars extend halfway into the digit row, the leading digit sits in
/// the left quiet zone and the two halves are printed under their bars.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ean13Renderer;

impl Ean13Renderer {
    /// Create a renderer.
    pub fn new() -> Self {
        Self
    }
}

impl SymbolRenderer for Ean13Renderer {
    fn render(&self, code: &ItemCode, options: &SymbolOptions) -> Result<Symbol, SymbolError> {
        options.check()?;

        let encoded = Ean13::encode(code)?;
        let module = options.module_width;

        let (left_pad, right_pad, text_height) = if options.display_value {
            (
                options.margin.max(LEFT_QUIET_ZONE * module),
                options.margin.max(RIGHT_QUIET_ZONE * module),
                options.text_margin + options.font_size,
            )
        } else {
            (options.margin, options.margin, 0.0)
        };

        let symbol_modules = f64::from(u32::try_from(MODULES).unwrap_or(u32::MAX));
        let width = left_pad + symbol_modules * module + right_pad;
        let height = options.margin * 2.0 + options.bar_height + text_height;
        let guard_extension = if options.display_value {
            options.text_margin + options.font_size / 2.0
        } else {
            0.0
        };

        let at = |module_idx: usize| {
            left_pad + f64::from(u32::try_from(module_idx).unwrap_or(u32::MAX)) * module
        };

        let mut shapes: Vec<Shape> = encoded
            .bars()
            .into_iter()
            .map(|(start, len)| Shape::Rect {
                x: at(start),
                y: options.margin,
                width: at(start + len) - at(start),
                height: if is_guard(start) {
                    options.bar_height + guard_extension
                } else {
                    options.bar_height
                },
            })
            .collect();

        if options.display_value {
            let text = encoded.text();
            let top = options.margin + options.bar_height + options.text_margin;
            let (leading, rest) = text.split_at(1);
            let (left, right) = rest.split_at(6);

            shapes.push(Shape::Text {
                x: left_pad / 2.0,
                y: top,
                size: options.font_size,
                content: leading.to_string(),
            });

            shapes.push(Shape::Text {
                x: f64::midpoint(at(3), at(45)),
                y: top,
                size: options.font_size,
                content: left.to_string(),
            });

            shapes.push(Shape::Text {
                x: f64::midpoint(at(50), at(92)),
                y: top,
                size: options.font_size,
                content: right.to_string(),
            });
        }

        Ok(Symbol::new(
            encoded.text(),
            encoded.check_digit(),
            (width, height),
            shapes,
            options.clone(),
        ))
    }
}
