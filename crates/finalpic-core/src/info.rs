//! Display formatting for the info popover and control labels.

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Summary of the current image shown in the info popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    /// Size of the decoded bitmap in bytes.
    pub byte_size: usize,
}

impl ImageInfo {
    pub fn from_image(image: &DecodedImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            byte_size: image.byte_size(),
        }
    }

    /// e.g. `"1920 × 1080"`
    pub fn dimensions_label(&self) -> String {
        format_dimensions(self.width, self.height)
    }

    /// e.g. `"8100.0 KB"`
    pub fn file_size_label(&self) -> String {
        format_file_size(self.byte_size)
    }
}

pub fn format_dimensions(width: u32, height: u32) -> String {
    format!("{width} \u{00d7} {height}")
}

/// Format a byte count in kilobytes with one decimal.
pub fn format_file_size(bytes: usize) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Format a 0-based fraction as a whole percentage, truncating.
///
/// Used for the zoom readout (`1.0 -> "100%"`) and the intensity label.
pub fn format_percent(value: f32) -> String {
    // Nudge absorbs f32 drift from repeated +/-0.1 steps (0.7 -> 69.99998).
    let percent = (value as f64 * 100.0 + 1e-3).trunc() as i64;
    format!("{percent}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_from_image() {
        let img = DecodedImage::filled(30, 20, [0, 0, 0, 255]);
        let info = ImageInfo::from_image(&img);
        assert_eq!(info.width, 30);
        assert_eq!(info.height, 20);
        assert_eq!(info.byte_size, 2400);
        assert_eq!(info.dimensions_label(), "30 × 20");
        assert_eq!(info.file_size_label(), "2.3 KB");
    }

    #[test]
    fn test_file_size() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1024), "1.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(8_294_400), "8100.0 KB");
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(0.5), "50%");
        assert_eq!(format_percent(1.256), "125%");
        assert_eq!(format_percent(5.0), "500%");
        assert_eq!(format_percent(0.1), "10%");
    }

    #[test]
    fn test_percent_after_repeated_steps() {
        let mut scale = 1.0f32;
        for _ in 0..3 {
            scale -= 0.1;
        }
        assert_eq!(format_percent(scale), "70%");
    }
}
