//! PNG encoding for export. PNG is the fallback for any non-JPEG extension.

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate_rgba, EncodeError, ExportFormat};

/// Encode RGBA pixel data to PNG bytes, preserving alpha.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgba(pixels, width, height)?;

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: ExportFormat::Png,
            reason: e.to_string(),
        })?;

    Ok(buffer)
}
