//! Sharing

use std::{io, path::PathBuf, process::ExitStatus};

use async_trait::async_trait;
use labels::label::LabelContent;
use mockall::automock;
use thiserror::Error;
use tokio::{fs, process::Command};
use tracing::info;

use super::{download_file_name, split_command};

/// Title attached to every shared label.
pub const SHARE_TITLE: &str = "Barcode Label";

/// Exit status a share command uses to report that the user dismissed it.
pub const CANCELLED_EXIT_CODE: i32 = 130;

/// Errors raised while sharing.
#[derive(Debug, Error)]
pub enum ShareError {
    /// The user dismissed the share sheet.
    #[error("share was cancelled")]
    Cancelled,

    /// No share sheet is available on this system.
    #[error("sharing is not available")]
    Unavailable,

    /// Staging the image failed.
    #[error("failed to stage shared image {path}")]
    Io {
        /// Staged file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The share command could not be started.
    #[error("failed to start share command `{program}`")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The share command exited unsuccessfully.
    #[error("share command `{program}` failed with {status}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
    },
}

/// What gets handed to the share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    /// Share title.
    pub title: String,

    /// Descriptive text.
    pub text: String,

    /// Attached file name.
    pub file_name: String,

    /// Attached file media type.
    pub mime_type: &'static str,

    /// Attached file contents.
    pub png: Vec<u8>,
}

impl SharePayload {
    /// Package a label image for sharing.
    pub fn for_label(content: &LabelContent, png: Vec<u8>) -> Self {
        Self {
            title: SHARE_TITLE.to_string(),
            text: format!("Barcode for {} (MRP: {})", content.name, content.mrp),
            file_name: download_file_name(content),
            mime_type: "image/png",
            png,
        }
    }
}

/// A system share sheet.
#[automock]
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether sharing can be offered at all.
    fn is_available(&self) -> bool;

    /// Share a payload. A dismissed sheet is [`ShareError::Cancelled`].
    async fn share(&self, payload: SharePayload) -> Result<(), ShareError>;
}

/// Stages the image in a directory and runs a configured command with the
/// file path appended. Title, text and media type are passed in
/// `LABELS_SHARE_TITLE`, `LABELS_SHARE_TEXT` and `LABELS_SHARE_MIME_TYPE`.
#[derive(Debug, Clone)]
pub struct CommandShareSheet {
    program: String,
    args: Vec<String>,
    staging_dir: PathBuf,
}

impl CommandShareSheet {
    /// Parse a command line; blank commands give `None`.
    pub fn parse(command: &str, staging_dir: impl Into<PathBuf>) -> Option<Self> {
        split_command(command).map(|(program, args)| Self {
            program,
            args,
            staging_dir: staging_dir.into(),
        })
    }
}

#[async_trait]
impl ShareSheet for CommandShareSheet {
    fn is_available(&self) -> bool {
        true
    }

    #[tracing::instrument(
        name = "exports.share.share",
        skip(self, payload),
        fields(program = %self.program, file_name = %payload.file_name),
        err
    )]
    async fn share(&self, payload: SharePayload) -> Result<(), ShareError> {
        let path = self.staging_dir.join(&payload.file_name);

        let stage_error = |source| ShareError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(stage_error)?;
        fs::write(&path, &payload.png).await.map_err(stage_error)?;

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&path)
            .env("LABELS_SHARE_TITLE", &payload.title)
            .env("LABELS_SHARE_TEXT", &payload.text)
            .env("LABELS_SHARE_MIME_TYPE", payload.mime_type)
            .status()
            .await
            .map_err(|source| ShareError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        match status.code() {
            Some(0) => {
                info!("shared label");
                Ok(())
            }
            Some(CANCELLED_EXIT_CODE) => Err(ShareError::Cancelled),
            _ => Err(ShareError::Failed {
                program: self.program.clone(),
                status,
            }),
        }
    }
}

/// Used when no share command is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableShareSheet;

#[async_trait]
impl ShareSheet for UnavailableShareSheet {
    fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use labels::validation::LabelInput;
    use testresult::TestResult;

    use super::*;

    fn payload() -> TestResult<SharePayload> {
        let content = LabelInput::new("Basmati Rice", "590123412345", "25.5").validate()?;

        Ok(SharePayload::for_label(&content, vec![1, 2, 3]))
    }

    #[test]
    fn payload_describes_label() -> TestResult {
        let payload = payload()?;

        assert_eq!(payload.title, "Barcode Label");
        assert_eq!(payload.text, "Barcode for Basmati Rice (MRP: 25.50)");
        assert_eq!(payload.file_name, "Basmati_Rice-590123412345.png");
        assert_eq!(payload.mime_type, "image/png");

        Ok(())
    }

    #[tokio::test]
    async fn unavailable_sheet_refuses() -> TestResult {
        let sheet = UnavailableShareSheet;

        let result = sheet.share(payload()?).await;

        assert!(!sheet.is_available());
        assert!(
            matches!(result, Err(ShareError::Unavailable)),
            "expected Unavailable, got {result:?}"
        );

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn command_sheet_stages_image() -> TestResult {
        let dir = tempfile::tempdir()?;
        let sheet = CommandShareSheet {
            program: "true".to_string(),
            args: Vec::new(),
            staging_dir: dir.path().join("share"),
        };

        sheet.share(payload()?).await?;

        let staged = dir.path().join("share").join("Basmati_Rice-590123412345.png");

        assert_eq!(std::fs::read(staged)?, vec![1, 2, 3]);

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_130_is_cancelled() -> TestResult {
        let dir = tempfile::tempdir()?;
        let sheet = CommandShareSheet {
            program: "sh".to_string(),
            args: vec!["-c".to_string(), "exit 130".to_string()],
            staging_dir: dir.path().to_path_buf(),
        };

        let result = sheet.share(payload()?).await;

        assert!(
            matches!(result, Err(ShareError::Cancelled)),
            "expected Cancelled, got {result:?}"
        );

        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn other_exit_codes_fail() -> TestResult {
        let dir = tempfile::tempdir()?;
        let sheet = CommandShareSheet {
            program: "false".to_string(),
            args: Vec::new(),
            staging_dir: dir.path().to_path_buf(),
        };

        let result = sheet.share(payload()?).await;

        assert!(
            matches!(result, Err(ShareError::Failed { .. })),
            "expected Failed, got {result:?}"
        );

        Ok(())
    }
}
