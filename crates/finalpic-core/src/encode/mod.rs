//! Image encoding for export.
//!
//! This module provides:
//! - Format selection from a destination path ([`ExportFormat::from_path`])
//! - PNG encoding (alpha preserved)
//! - JPEG encoding at a fixed quality (alpha dropped)
//!
//! Encoding runs entirely in memory; writing the bytes somewhere is the
//! caller's job (see [`crate::export`]).
//!
//! # Examples
//!
//! ```ignore
//! use finalpic_core::encode::{encode_image, ExportFormat};
//!
//! let format = ExportFormat::from_path("holiday.JPG".as_ref());
//! let bytes = encode_image(&image, format)?;
//! ```

mod format;
mod jpeg;
mod png;

use thiserror::Error;

use crate::decode::{DecodedImage, BYTES_PER_PIXEL};

pub use format::ExportFormat;
pub use jpeg::{encode_jpeg, JPEG_QUALITY};
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The codec rejected the image
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed {
        format: ExportFormat,
        reason: String,
    },
}

/// Encode an image in the given format.
pub fn encode_image(image: &DecodedImage, format: ExportFormat) -> Result<Vec<u8>, EncodeError> {
    match format {
        ExportFormat::Png => encode_png(&image.pixels, image.width, image.height),
        ExportFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, JPEG_QUALITY),
    }
}

/// Check that an RGBA buffer matches its dimensions.
fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * BYTES_PER_PIXEL;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
