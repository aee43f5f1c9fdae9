//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Saved collection settings.
#[derive(Debug, Args)]
pub struct StorageConfig {
    /// Directory holding the storage slots
    #[arg(long, env = "LABELS_DATA_DIR", default_value = ".labels", global = true)]
    pub data_dir: PathBuf,

    /// Slot holding the saved barcodes
    #[arg(long, env = "LABELS_SLOT", default_value = "barcodes", global = true)]
    pub slot: String,
}
