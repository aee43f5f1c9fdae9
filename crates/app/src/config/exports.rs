//! Print & Share Config

use std::path::PathBuf;

use clap::Args;

/// Print settings.
#[derive(Debug, Args)]
pub struct PrintConfig {
    /// Print area directory
    #[arg(long, env = "LABELS_PRINT_DIR", default_value = ".labels/print", global = true)]
    pub print_dir: PathBuf,

    /// Command run with the print document path appended, e.g. `lp`
    #[arg(long, env = "LABELS_PRINT_COMMAND", global = true)]
    pub print_command: Option<String>,
}

/// Share settings.
#[derive(Debug, Args)]
pub struct ShareConfig {
    /// Command run with the label image path appended; sharing is unavailable
    /// without one
    #[arg(long, env = "LABELS_SHARE_COMMAND", global = true)]
    pub share_command: Option<String>,
}
