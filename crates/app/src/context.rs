//! App Context

use std::{io, path::PathBuf, sync::Arc};

use labels::symbology::Ean13Renderer;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::AppConfig,
    domain::barcodes::{BarcodesService, JsonBarcodesService},
    exports::{
        CommandShareSheet, CommandSpooler, NoopSpooler, PrintArea, PrintSpooler, ShareSheet,
        UnavailableShareSheet,
    },
    storage::{FileSlotStore, StorageError, check_slot},
    workbench::{Workbench, WorkbenchServices},
};

/// Directory under the data directory where shared images are staged.
const SHARE_STAGING_DIR: &str = "share";

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("invalid storage configuration")]
    Storage(#[from] StorageError),

    #[error("failed to prepare print area {path}")]
    PrintArea {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone)]
pub struct AppContext {
    pub barcodes: Arc<dyn BarcodesService>,
    pub print_area: PrintArea,
    pub spooler: Arc<dyn PrintSpooler>,
    pub share_sheet: Arc<dyn ShareSheet>,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the slot name is invalid or the print area
    /// cannot be created.
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        check_slot(&config.storage.slot)?;

        let store = Arc::new(FileSlotStore::new(&config.storage.data_dir));
        let barcodes = JsonBarcodesService::load(store, config.storage.slot.clone()).await;

        let print_area = PrintArea::new(&config.print.print_dir);
        print_area
            .prepare()
            .await
            .map_err(|source| AppInitError::PrintArea {
                path: config.print.print_dir.clone(),
                source,
            })?;

        let spooler: Arc<dyn PrintSpooler> = match config
            .print
            .print_command
            .as_deref()
            .and_then(CommandSpooler::parse)
        {
            Some(spooler) => Arc::new(spooler),
            None => Arc::new(NoopSpooler),
        };

        let staging_dir = config.storage.data_dir.join(SHARE_STAGING_DIR);
        let share_sheet: Arc<dyn ShareSheet> = match config
            .share
            .share_command
            .as_deref()
            .and_then(|command| CommandShareSheet::parse(command, &staging_dir))
        {
            Some(sheet) => Arc::new(sheet),
            None => Arc::new(UnavailableShareSheet),
        };

        debug!(
            data_dir = %config.storage.data_dir.display(),
            slot = %config.storage.slot,
            print_dir = %config.print.print_dir.display(),
            can_share = share_sheet.is_available(),
            "initialised app context"
        );

        Ok(Self {
            barcodes: Arc::new(barcodes),
            print_area,
            spooler,
            share_sheet,
        })
    }

    /// A fresh workbench driving this context's services.
    pub fn workbench(&self) -> Workbench {
        Workbench::new(WorkbenchServices {
            barcodes: Arc::clone(&self.barcodes),
            renderer: Arc::new(Ean13Renderer::new()),
            print_area: self.print_area.clone(),
            spooler: Arc::clone(&self.spooler),
            share_sheet: Arc::clone(&self.share_sheet),
        })
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("print_area", &self.print_area)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::{
        exports::{PrintConfig, ShareConfig},
        storage::StorageConfig,
    };

    use super::*;

    fn config(dir: &std::path::Path, slot: &str, share_command: Option<&str>) -> AppConfig {
        AppConfig {
            storage: StorageConfig {
                data_dir: dir.join("data"),
                slot: slot.to_string(),
            },
            print: PrintConfig {
                print_dir: dir.join("print"),
                print_command: None,
            },
            share: ShareConfig {
                share_command: share_command.map(str::to_string),
            },
        }
    }

    #[tokio::test]
    async fn creates_print_area() -> TestResult {
        let dir = tempfile::tempdir()?;

        let ctx = AppContext::from_config(&config(dir.path(), "barcodes", None)).await?;

        assert!(dir.path().join("print").is_dir());
        assert!(!ctx.share_sheet.is_available());
        assert_eq!(ctx.barcodes.count().await, 0);

        Ok(())
    }

    #[tokio::test]
    async fn share_command_enables_sharing() -> TestResult {
        let dir = tempfile::tempdir()?;

        let ctx = AppContext::from_config(&config(dir.path(), "barcodes", Some("xdg-open"))).await?;

        assert!(ctx.workbench().can_share());

        Ok(())
    }

    #[tokio::test]
    async fn rejects_invalid_slot() -> TestResult {
        let dir = tempfile::tempdir()?;

        let result = AppContext::from_config(&config(dir.path(), "../etc", None)).await;

        assert!(
            matches!(result, Err(AppInitError::Storage(StorageError::InvalidSlot(_)))),
            "expected InvalidSlot, got {result:?}"
        );

        Ok(())
    }
}
