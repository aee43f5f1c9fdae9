//! Labels
//!
//! Validation, EAN-13 symbology and label composition for printable shelf
//! labels.

pub mod items;
pub mod label;
pub mod raster;
pub mod symbology;
pub mod validation;
