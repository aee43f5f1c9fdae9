//! Label Input Validation

use thiserror::Error;

use crate::{
    items::{ItemCode, ItemName, Mrp},
    label::LabelContent,
};

/// Reasons a label form is rejected.
///
/// The messages are written for the person filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more inputs are blank.
    #[error("All fields are required.")]
    MissingFields,

    /// The item code is not 12 digits.
    #[error("Item Code must be exactly 12 digits.")]
    InvalidItemCode,

    /// The price is not a number or not above zero.
    #[error("MRP must be a positive number.")]
    InvalidMrp,
}

/// Raw label form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelInput {
    /// Item name field.
    pub name: String,

    /// Item code field.
    pub code: String,

    /// Price field.
    pub mrp: String,
}

impl LabelInput {
    /// Create a form input from its three fields.
    pub fn new(name: impl Into<String>, code: impl Into<String>, mrp: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            mrp: mrp.into(),
        }
    }

    /// Validate the form.
    ///
    /// Rules apply in order and the first failure wins: every field must be
    /// non-blank, the code must be exactly 12 digits, and the price must be a
    /// number above zero. Whitespace only matters to the blank check; the name
    /// and code are kept exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first rule that fails.
    pub fn validate(&self) -> Result<LabelContent, ValidationError> {
        let blank = [&self.name, &self.code, &self.mrp]
            .iter()
            .any(|field| field.trim().is_empty());

        if blank {
            return Err(ValidationError::MissingFields);
        }

        let code = ItemCode::parse(&self.code).map_err(|_err| ValidationError::InvalidItemCode)?;
        let mrp = Mrp::parse(&self.mrp).map_err(|_err| ValidationError::InvalidMrp)?;
        let name = ItemName::new(&self.name).map_err(|_err| ValidationError::MissingFields)?;

        Ok(LabelContent { name, code, mrp })
    }
}
