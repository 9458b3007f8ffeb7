//! The editing session exposed to JavaScript.
//!
//! ```typescript
//! const session = new EditorSession();
//! if (session.load_image(bytes)) {
//!   session.set_filter(1); // Sepia
//!   const frame = session.render(canvas.width, canvas.height);
//!   ctx.putImageData(new ImageData(new Uint8ClampedArray(frame.pixels()), frame.width), 0, 0);
//! }
//! ```

use std::path::Path;

use finalpic_core::encode::{encode_image, ExportFormat};
use finalpic_core::export::{ExportError, DEFAULT_EXPORT_NAME};
use finalpic_core::filter::FilterKind;
use finalpic_core::info::format_percent;
use finalpic_core::render::Viewport;
use finalpic_core::session::{AcquireOutcome, Session};
use finalpic_core::state::Offset;
use wasm_bindgen::prelude::*;

use crate::console_warn;
use crate::types::JsDecodedImage;

/// One image plus its zoom, pan and filter state.
#[wasm_bindgen(js_name = EditorSession)]
#[derive(Default)]
pub struct EditorSession {
    inner: Session,
}

#[wasm_bindgen(js_class = EditorSession)]
impl EditorSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EditorSession {
        Self::default()
    }

    /// Replace the image with the decoded `bytes` and reset the view.
    ///
    /// Returns `false` and leaves everything unchanged if the bytes do not
    /// decode. The reason goes to the browser console.
    pub fn load_image(&mut self, bytes: &[u8]) -> bool {
        match self.inner.acquire(Some(bytes)) {
            AcquireOutcome::Accepted { .. } => true,
            AcquireOutcome::Rejected(err) => {
                console_warn(&format!("finalpic: could not load image: {err}"));
                false
            }
            AcquireOutcome::Cancelled => false,
        }
    }

    /// Drop the image and restore every view default.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    // ===== Zoom =====

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f32 {
        self.inner.transform().scale()
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.inner.transform_mut().set_scale(scale);
    }

    pub fn step_scale(&mut self, delta: f32) {
        self.inner.transform_mut().step_scale(delta);
    }

    pub fn zoom_in(&mut self) {
        self.inner.transform_mut().zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.inner.transform_mut().zoom_out();
    }

    /// e.g. `"150%"`
    pub fn zoom_label(&self) -> String {
        format_percent(self.scale())
    }

    // ===== Pan =====

    pub fn begin_drag(&mut self) {
        self.inner.transform_mut().begin_drag();
    }

    /// `dx`/`dy` are the total translation since the drag began.
    pub fn update_drag(&mut self, dx: f32, dy: f32) {
        self.inner.transform_mut().update_drag(Offset::new(dx, dy));
    }

    pub fn end_drag(&mut self) {
        self.inner.transform_mut().end_drag();
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f32 {
        self.inner.transform().offset().x
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f32 {
        self.inner.transform().offset().y
    }

    // ===== Filter =====

    /// Select a filter by index: 0 None, 1 Sepia, 2 Noir, 3 Vibrant, 4 Blur.
    /// Unknown indices select None.
    pub fn set_filter(&mut self, index: u8) {
        self.inner
            .transform_mut()
            .set_filter(FilterKind::from_index(index));
    }

    #[wasm_bindgen(getter)]
    pub fn filter(&self) -> u8 {
        self.inner.transform().filter().index()
    }

    pub fn filter_label(&self) -> String {
        self.inner.transform().filter().label().to_string()
    }

    /// Whether the intensity slider should be shown.
    pub fn filter_uses_intensity(&self) -> bool {
        self.inner.transform().filter().uses_intensity()
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.inner.transform_mut().set_intensity(intensity);
    }

    #[wasm_bindgen(getter)]
    pub fn intensity(&self) -> f32 {
        self.inner.transform().intensity()
    }

    pub fn intensity_label(&self) -> String {
        format_percent(self.intensity())
    }

    // ===== Output =====

    /// Render a `width` x `height` frame, or `undefined` without an image.
    pub fn render(&self, width: u32, height: u32) -> Option<JsDecodedImage> {
        self.inner
            .render(Viewport::new(width, height))
            .map(JsDecodedImage::from_decoded)
    }

    /// Encode the unfiltered image for saving under `file_name`.
    ///
    /// The format follows the extension the same way as a filesystem export.
    pub fn export_bytes(&self, file_name: &str) -> Result<Vec<u8>, JsValue> {
        self.encode_for(file_name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// File name the save dialog should suggest.
    pub fn default_export_name() -> String {
        DEFAULT_EXPORT_NAME.to_string()
    }

    /// `{ width, height, byteSize }` or `undefined` without an image.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.info())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `{ scale, offset, committedOffset, filter, intensity }`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.transform())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl EditorSession {
    fn encode_for(&self, file_name: &str) -> Result<Vec<u8>, ExportError> {
        let image = self.inner.image().ok_or(ExportError::NoImage)?;
        let format = ExportFormat::from_path(Path::new(file_name));
        Ok(encode_image(image, format)?)
    }
}
