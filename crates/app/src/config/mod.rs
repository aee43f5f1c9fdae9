//! Application configuration

use clap::Args;

use crate::config::{
    exports::{PrintConfig, ShareConfig},
    storage::StorageConfig,
};

pub mod exports;
pub mod observability;
pub mod storage;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Saved collection storage.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Printing.
    #[command(flatten)]
    pub print: PrintConfig,

    /// Sharing.
    #[command(flatten)]
    pub share: ShareConfig,
}
