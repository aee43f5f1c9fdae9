//! PNG downloads.

use std::path::{Path, PathBuf};

use labels::label::LabelContent;
use tokio::fs;
use tracing::info;

use super::ExportError;

/// `<name>-<code>.png`, with whitespace and path-hostile characters in the
/// name replaced by `_`. An empty name becomes `barcode`.
pub fn download_file_name(content: &LabelContent) -> String {
    let name: String = content
        .name
        .as_str()
        .chars()
        .map(|c| if is_path_hostile(c) { '_' } else { c })
        .collect();

    let stem = if name.is_empty() { "barcode" } else { &name };

    format!("{stem}-{}.png", content.code)
}

fn is_path_hostile(c: char) -> bool {
    c.is_whitespace()
        || c.is_control()
        || matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Write PNG bytes into `dir` under the label's download file name.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when the directory or file cannot be written.
pub async fn write_download(
    dir: &Path,
    content: &LabelContent,
    png: &[u8],
) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(download_file_name(content));

    fs::write(&path, png)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), bytes = png.len(), "downloaded label");

    Ok(path)
}
