//! Export flags shared by `generate` and `export`.

use std::path::PathBuf;

use clap::Args;
use labels_app::workbench::{ShareOutcome, Workbench};

use super::error_chain;

#[derive(Debug, Args)]
pub(crate) struct ExportFlags {
    /// Write the label PNG into this directory
    #[arg(long, value_name = "DIR")]
    download: Option<PathBuf>,

    /// Send the label to the printer
    #[arg(long)]
    print: bool,

    /// Share the label image
    #[arg(long)]
    share: bool,
}

pub(crate) async fn run(workbench: &Workbench, flags: &ExportFlags) -> Result<(), String> {
    if let Some(dir) = &flags.download {
        let path = workbench
            .download(dir)
            .await
            .map_err(|error| format!("failed to download label: {}", error_chain(&error)))?;

        println!("downloaded: {}", path.display());
    }

    if flags.print {
        let document = workbench
            .print()
            .await
            .map_err(|error| format!("failed to print label: {}", error_chain(&error)))?;

        println!("printed: {}", document.display());
    }

    if flags.share {
        let outcome = workbench
            .share()
            .await
            .map_err(|error| format!("failed to share label: {}", error_chain(&error)))?;

        match outcome {
            ShareOutcome::Shared => println!("shared"),
            ShareOutcome::Cancelled => println!("share cancelled"),
        }
    }

    Ok(())
}
