//! Export format selection.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File format written on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
}

impl ExportFormat {
    /// Pick the format from a destination path's extension.
    ///
    /// `.jpg` and `.jpeg` (any case) select JPEG. Everything else, including
    /// a missing extension, selects PNG.
    pub fn from_path(path: &Path) -> ExportFormat {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(ExportFormat::from_extension)
            .unwrap_or_default()
    }

    /// Pick the format from a bare extension (without the dot).
    pub fn from_extension(ext: &str) -> ExportFormat {
        if ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg") {
            ExportFormat::Jpeg
        } else {
            ExportFormat::Png
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => f.write_str("PNG"),
            ExportFormat::Jpeg => f.write_str("JPEG"),
        }
    }
}
