//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@finalpic/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsDecodedImage;
use finalpic_core::decode;
use wasm_bindgen::prelude::*;

/// Decode any supported format (PNG, JPEG, GIF, BMP, TIFF, WebP) to RGBA.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error string if the format is not recognised, the data is
/// corrupted, or the image has zero width or height.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_png() {
        let png = finalpic_core::encode::encode_png(&[255u8; 2 * 2 * 4], 2, 2).unwrap();
        let image = decode_image(&png).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.byte_length(), 16);
    }
}
