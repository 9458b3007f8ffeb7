//! Image encoding WASM bindings.
//!
//! The browser has no filesystem path to rename over, so the host asks for
//! bytes and writes them itself (download link, File System Access API).
//!
//! ```typescript
//! const bytes = encode_for_file_name(image, 'holiday.jpg');
//! const blob = new Blob([bytes], { type: mime_type_for_file_name('holiday.jpg') });
//! ```

use std::path::Path;

use crate::types::JsDecodedImage;
use finalpic_core::encode::{encode_image, ExportFormat};
use wasm_bindgen::prelude::*;

/// Encode an image in the format implied by `file_name`.
///
/// `.jpg` / `.jpeg` (any case) give JPEG at quality 80 with alpha dropped;
/// anything else gives PNG.
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions or the
/// codec fails.
#[wasm_bindgen]
pub fn encode_for_file_name(image: &JsDecodedImage, file_name: &str) -> Result<Vec<u8>, JsValue> {
    let format = ExportFormat::from_path(Path::new(file_name));
    encode_image(&image.to_decoded(), format).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type matching [`encode_for_file_name`]'s choice of format.
#[wasm_bindgen]
pub fn mime_type_for_file_name(file_name: &str) -> String {
    ExportFormat::from_path(Path::new(file_name))
        .mime_type()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for_file_name() {
        assert_eq!(mime_type_for_file_name("a.JPEG"), "image/jpeg");
        assert_eq!(mime_type_for_file_name("a.jpg"), "image/jpeg");
        assert_eq!(mime_type_for_file_name("a.png"), "image/png");
        assert_eq!(mime_type_for_file_name("a.gif"), "image/png");
        assert_eq!(mime_type_for_file_name("noext"), "image/png");
    }

    #[test]
    fn test_wrapper_encodes_through_core() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 4]);
        let jpeg = encode_image(&img.to_decoded(), ExportFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
