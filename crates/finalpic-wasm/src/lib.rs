//! finalpic WASM - WebAssembly bindings for the finalpic viewer core
//!
//! # Module Structure
//!
//! - `session` - `EditorSession`, the stateful viewer a page drives
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - stateless decoding
//! - `encode` - stateless encoding chosen by file name
//!
//! # Usage
//!
//! ```typescript
//! import init, { EditorSession } from '@finalpic/wasm';
//!
//! await init();
//!
//! const session = new EditorSession();
//! session.load_image(new Uint8Array(await file.arrayBuffer()));
//! session.zoom_in();
//! const frame = session.render(800, 600);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

pub use decode::decode_image;
pub use encode::{encode_for_file_name, mime_type_for_file_name};
pub use session::EditorSession;
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Send a warning to the browser console. Host builds have no console.
pub(crate) fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
