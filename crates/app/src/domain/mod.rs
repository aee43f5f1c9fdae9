//! Labels Domain Concerns

pub mod barcodes;
