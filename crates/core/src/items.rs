//! Item Values
//!
//! The three values printed on a label: the item name, the 12-digit item code
//! used as the EAN-13 payload, and the maximum retail price.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing item values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// The item name is blank.
    #[error("item name cannot be empty")]
    EmptyName,

    /// The item code is not exactly 12 ASCII digits.
    #[error("item code must be exactly 12 digits, got {0:?}")]
    InvalidItemCode(String),

    /// The price could not be parsed as a number.
    #[error("price is not a number: {0:?}")]
    InvalidPrice(String),

    /// The price is zero or negative.
    #[error("price must be greater than zero, got {0}")]
    NonPositivePrice(Decimal),
}

/// Display name of an item, kept as typed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    /// Create an item name from user input.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::EmptyName`] when the input is blank.
    pub fn new(name: &str) -> Result<Self, ValueError> {
        if name.trim().is_empty() {
            return Err(ValueError::EmptyName);
        }

        Ok(Self(name.to_string()))
    }

    /// Name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// 12-digit item code.
///
/// The 13th EAN-13 digit is a check digit derived from these twelve by the
/// symbology, so it is never part of the stored code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemCode(String);

impl ItemCode {
    /// Number of digits in an item code.
    pub const LEN: usize = 12;

    /// Parse an item code.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidItemCode`] unless the input is exactly 12
    /// ASCII digits.
    pub fn parse(code: &str) -> Result<Self, ValueError> {
        if code.len() == Self::LEN && code.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(Self(code.to_string()))
        } else {
            Err(ValueError::InvalidItemCode(code.to_string()))
        }
    }

    /// Code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of each digit, most significant first.
    pub fn digits(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.bytes().map(|byte| byte - b'0')
    }
}

impl FromStr for ItemCode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ItemCode {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ItemCode> for String {
    fn from(value: ItemCode) -> Self {
        value.0
    }
}

impl Display for ItemCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// Maximum retail price.
///
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mrp(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Mrp {
    /// Significant digits a price keeps, the most a JSON number holds exactly.
    pub const SIGNIFICANT_DIGITS: u32 = 15;

    /// Create a price from an amount.
    ///
    /// The amount is rounded to [`Self::SIGNIFICANT_DIGITS`] so a stored price
    /// reloads unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::NonPositivePrice`] when the amount is zero or
    /// negative, and [`ValueError::InvalidPrice`] when it cannot be stored as a
    /// JSON number.
    pub fn new(amount: Decimal) -> Result<Self, ValueError> {
        if amount <= Decimal::ZERO {
            return Err(ValueError::NonPositivePrice(amount));
        }

        let stored = amount
            .round_sf(Self::SIGNIFICANT_DIGITS)
            .filter(|rounded| reload(*rounded) == Some(*rounded))
            .ok_or_else(|| ValueError::InvalidPrice(amount.to_string()))?;

        Ok(Self(stored))
    }

    /// Parse a price typed by the user, e.g. `"25.50"` or `"2.5e1"`.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidPrice`] when the input is not a number and
    /// [`ValueError::NonPositivePrice`] when it is not strictly positive.
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let trimmed = input.trim();

        let amount = Decimal::from_str(trimmed)
            .or_else(|_err| Decimal::from_scientific(trimmed))
            .map_err(|_err| ValueError::InvalidPrice(input.to_string()))?;

        Self::new(amount)
    }

    /// Underlying decimal amount.
    pub fn amount(self) -> Decimal {
        self.0
    }
}

/// The amount a stored price reads back as.
fn reload(amount: Decimal) -> Option<Decimal> {
    Decimal::from_str(&amount.to_f64()?.to_string()).ok()
}

/// Formats with exactly two decimal places, rounding half away from zero.
impl Display for Mrp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        write!(f, "{rounded:.2}")
    }
}
