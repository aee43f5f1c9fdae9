//! Printing
//!
//! The print fragment is injected into the print area, a directory holding a
//! print-only HTML document, which is then handed to a [`PrintSpooler`].

use std::{
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::{fs, process::Command};
use tracing::info;

use super::split_command;

/// File name of the document inside the print area.
pub const PRINT_DOCUMENT: &str = "label.html";

/// Errors raised while printing.
#[derive(Debug, Error)]
pub enum PrintError {
    /// Nothing has been generated yet.
    #[error("no barcode has been generated")]
    NothingGenerated,

    /// The print area directory does not exist.
    #[error("print area {0} is missing")]
    MissingPrintArea(PathBuf),

    /// Writing the print document failed.
    #[error("failed to write print document {path}")]
    Io {
        /// Document path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The print command could not be started.
    #[error("failed to start print command `{program}`")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The print command exited unsuccessfully.
    #[error("print command `{program}` failed with {status}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
    },
}

/// The directory print documents are written into.
#[derive(Debug, Clone)]
pub struct PrintArea {
    dir: PathBuf,
}

impl PrintArea {
    /// A print area rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Print area directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the print area directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error when the directory cannot be created.
    pub async fn prepare(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    /// Write `fragment` into the print document and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`PrintError::MissingPrintArea`] when the directory is gone and
    /// [`PrintError::Io`] when the document cannot be written.
    pub async fn inject(&self, fragment: &str) -> Result<PathBuf, PrintError> {
        if !fs::metadata(&self.dir).await.is_ok_and(|meta| meta.is_dir()) {
            return Err(PrintError::MissingPrintArea(self.dir.clone()));
        }

        let path = self.dir.join(PRINT_DOCUMENT);

        fs::write(&path, labels::label::print::print_document(fragment))
            .await
            .map_err(|source| PrintError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(path)
    }
}

/// Sends print documents to a printer.
#[automock]
#[async_trait]
pub trait PrintSpooler: Send + Sync {
    /// Print the document at `document`.
    async fn spool(&self, document: &Path) -> Result<(), PrintError>;
}

/// Runs a configured command with the document path appended.
#[derive(Debug, Clone)]
pub struct CommandSpooler {
    program: String,
    args: Vec<String>,
}

impl CommandSpooler {
    /// Parse a command line such as `lp -d office`. Blank commands give
    /// `None`.
    pub fn parse(command: &str) -> Option<Self> {
        split_command(command).map(|(program, args)| Self { program, args })
    }
}

#[async_trait]
impl PrintSpooler for CommandSpooler {
    #[tracing::instrument(
        name = "exports.print.spool",
        skip(self),
        fields(program = %self.program, document = %document.display()),
        err
    )]
    async fn spool(&self, document: &Path) -> Result<(), PrintError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(document)
            .status()
            .await
            .map_err(|source| PrintError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(PrintError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        info!("sent label to printer");

        Ok(())
    }
}

/// Leaves the document in the print area without printing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpooler;

#[async_trait]
impl PrintSpooler for NoopSpooler {
    async fn spool(&self, document: &Path) -> Result<(), PrintError> {
        info!(document = %document.display(), "no print command configured, document left in print area");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn inject_writes_print_document() -> TestResult {
        let dir = tempfile::tempdir()?;
        let area = PrintArea::new(dir.path());

        let path = area.inject("<div class=\"printable-label\"></div>").await?;
        let document = std::fs::read_to_string(&path)?;

        assert_eq!(path, dir.path().join(PRINT_DOCUMENT));
        assert!(document.contains("<div id=\"print-area\"><div class=\"printable-label\"></div></div>"));

        Ok(())
    }

    #[tokio::test]
    async fn inject_into_missing_area_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let area = PrintArea::new(dir.path().join("gone"));

        let result = area.inject("<div></div>").await;

        assert!(
            matches!(result, Err(PrintError::MissingPrintArea(_))),
            "expected MissingPrintArea, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn prepare_creates_area() -> TestResult {
        let dir = tempfile::tempdir()?;
        let area = PrintArea::new(dir.path().join("print"));

        area.prepare().await?;

        assert!(area.dir().is_dir());

        Ok(())
    }

    #[test]
    fn blank_print_command_is_none() {
        assert!(CommandSpooler::parse("  ").is_none());
        assert!(CommandSpooler::parse("lp").is_some());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_command_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let document = dir.path().join(PRINT_DOCUMENT);
        let spooler = CommandSpooler {
            program: "false".to_string(),
            args: Vec::new(),
        };

        let result = spooler.spool(&document).await;

        assert!(
            matches!(result, Err(PrintError::Failed { .. })),
            "expected Failed, got {result:?}"
        );

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_cannot_spawn() -> TestResult {
        let dir = tempfile::tempdir()?;
        let spooler = CommandSpooler {
            program: "labels-print-command-that-does-not-exist".to_string(),
            args: Vec::new(),
        };

        let result = spooler.spool(&dir.path().join(PRINT_DOCUMENT)).await;

        assert!(
            matches!(result, Err(PrintError::Spawn { .. })),
            "expected Spawn, got {result:?}"
        );

        Ok(())
    }
}
