//! Label Exports
//!
//! A ready label leaves the generator as a PNG file, a printed page or a
//! shared image.

use std::{io, path::PathBuf, sync::Arc};

use labels::{
    label::{LabelContent, LabelLayout},
    raster::RasterError,
    symbology::{SymbolError, SymbolOptions, SymbolRenderer},
};
use thiserror::Error;
use tokio::task::{self, JoinError};

pub mod download;
pub mod print;
pub mod share;

pub use download::{download_file_name, write_download};
pub use print::{
    CommandSpooler, MockPrintSpooler, NoopSpooler, PrintArea, PrintError, PrintSpooler,
};
pub use share::{
    CommandShareSheet, MockShareSheet, ShareError, SharePayload, ShareSheet,
    UnavailableShareSheet,
};

/// Errors raised while producing an image export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing has been generated yet.
    #[error("no barcode has been generated")]
    NothingGenerated,

    /// The symbol could not be rendered.
    #[error("failed to render barcode")]
    Symbol(#[from] SymbolError),

    /// The composed label could not be encoded.
    #[error("failed to encode label image")]
    Raster(#[from] RasterError),

    /// The blocking render task did not complete.
    #[error("label rendering task failed")]
    Join(#[from] JoinError),

    /// Writing the file failed.
    #[error("failed to write {path}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Render `content` into PNG bytes: symbol, then composition, then encoding.
///
/// The work runs on the blocking thread pool.
///
/// # Errors
///
/// Returns the error of the first stage that fails.
pub async fn render_label_png(
    renderer: Arc<dyn SymbolRenderer>,
    content: LabelContent,
    layout: LabelLayout,
) -> Result<Vec<u8>, ExportError> {
    task::spawn_blocking(move || -> Result<Vec<u8>, ExportError> {
        let symbol = renderer.render(&content.code, &SymbolOptions::label())?;
        let canvas = layout.compose(&content, &symbol);

        canvas.encode_png().map_err(ExportError::from)
    })
    .await?
}

/// Split a configured command line into a program and its arguments.
pub(crate) fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut parts = command.split_whitespace().map(str::to_string);
    let program = parts.next()?;

    Some((program, parts.collect()))
}

#[cfg(test)]
mod tests {
    use labels::{symbology::Ean13Renderer, validation::LabelInput};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn renders_png_of_label_size() -> TestResult {
        let content = LabelInput::new("Rice", "590123412345", "25.5").validate()?;

        let png = render_label_png(
            Arc::new(Ean13Renderer::new()),
            content,
            LabelLayout::default(),
        )
        .await?;

        assert_eq!(png.get(1..4), Some(&b"PNG"[..]));
        assert_eq!(png.get(16..20), Some(&400u32.to_be_bytes()[..]));
        assert_eq!(png.get(20..24), Some(&200u32.to_be_bytes()[..]));

        Ok(())
    }

    #[tokio::test]
    async fn symbol_failure_short_circuits() -> TestResult {
        let mut renderer = labels::symbology::MockSymbolRenderer::new();
        renderer
            .expect_render()
            .returning(|_, _| Err(SymbolError::InvalidDigit(11)));

        let content = LabelInput::new("Rice", "590123412345", "25.5").validate()?;
        let result = render_label_png(Arc::new(renderer), content, LabelLayout::default()).await;

        assert!(
            matches!(result, Err(ExportError::Symbol(SymbolError::InvalidDigit(11)))),
            "expected Symbol, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn splits_command_lines() {
        assert_eq!(
            split_command("  lp -d office "),
            Some(("lp".to_string(), vec!["-d".to_string(), "office".to_string()]))
        );
        assert_eq!(split_command("   "), None);
    }
}
