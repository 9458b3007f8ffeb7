//! Writing the current image to disk.
//!
//! Only the decoded bitmap is exported. Filters, zoom and pan are preview
//! state and are not baked into the file.
//!
//! The write is all-or-nothing from the caller's point of view: bytes go to
//! a temporary sibling of the destination which is then renamed over it. If
//! any step fails the temporary file is removed and the destination is left
//! as it was. There is no retry.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::decode::DecodedImage;
use crate::encode::{encode_image, EncodeError, ExportFormat};

/// File name suggested by the save dialog.
pub const DEFAULT_EXPORT_NAME: &str = "edited_image.png";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// There is no image in the session.
    #[error("No image to export")]
    NoImage,

    /// The image could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Writing or renaming the file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Details of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub bytes_written: usize,
}

impl ExportReport {
    /// Final path component, as shown to the user.
    pub fn file_name(&self) -> String {
        display_name(&self.path)
    }
}

/// Encode `image` in the format implied by `path` and write it there.
pub fn export_image(image: &DecodedImage, path: &Path) -> Result<ExportReport, ExportError> {
    let format = ExportFormat::from_path(path);
    let bytes = encode_image(image, format)?;
    debug!(path = %path.display(), %format, len = bytes.len(), "encoded image for export");

    write_atomically(path, &bytes)?;

    info!(path = %path.display(), %format, len = bytes.len(), "exported image");
    Ok(ExportReport {
        path: path.to_path_buf(),
        format,
        bytes_written: bytes.len(),
    })
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let temp = temp_path(path);
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Err(err) = fs::write(&temp, bytes) {
        // A partially written temp file may exist.
        let _ = fs::remove_file(&temp);
        return Err(io_err(err));
    }

    if let Err(err) = fs::rename(&temp, path) {
        if let Err(cleanup) = fs::remove_file(&temp) {
            warn!(temp = %temp.display(), error = %cleanup, "failed to remove temporary export file");
        }
        return Err(io_err(err));
    }

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = display_name(path);
    let temp_name = format!(".{name}.{}.tmp", std::process::id());
    match path.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// What the user is told after a save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Succeeded { file_name: String },
    Failed { reason: String },
}

impl SaveOutcome {
    pub fn from_result(result: &Result<ExportReport, ExportError>) -> Self {
        match result {
            Ok(report) => SaveOutcome::Succeeded {
                file_name: report.file_name(),
            },
            Err(err) => SaveOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SaveOutcome::Succeeded { .. })
    }

    /// Dialog title.
    pub fn title(&self) -> &'static str {
        match self {
            SaveOutcome::Succeeded { .. } => "Saved",
            SaveOutcome::Failed { .. } => "Save failed",
        }
    }

    /// Dialog body text.
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Succeeded { file_name } => format!("Image saved to: {file_name}"),
            SaveOutcome::Failed { reason } => format!("Could not save image: {reason}"),
        }
    }

    /// Label of the single button that dismisses the dialog.
    pub fn acknowledge_label(&self) -> &'static str {
        "OK"
    }
}
