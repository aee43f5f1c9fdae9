//! Barcodes

pub mod errors;
pub mod models;
mod repository;
pub mod search;
pub mod service;

pub use errors::BarcodesServiceError;
pub use search::filter_barcodes;
pub use service::*;
