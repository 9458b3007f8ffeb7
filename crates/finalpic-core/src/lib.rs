//! finalpic core - view state, preview filters and export for a single-image
//! viewer.
//!
//! The host (a native window, a browser page) owns the picker, the display
//! surface and the save dialog. This crate owns everything in between:
//!
//! - `decode` - picked bytes to an upright RGBA raster
//! - `state` - zoom, pan (two-phase drag) and filter selection
//! - `filter` / `color` - the five preview filters
//! - `render` - fit, zoom, pan, then filter into a viewport-sized frame
//! - `info` - labels for the info popover and zoom/intensity readouts
//! - `encode` / `export` - PNG/JPEG bytes and the all-or-nothing file write
//! - `session` - the record tying the above together
//!
//! Everything runs on the caller's thread. Logging goes through `tracing`;
//! no subscriber is installed here.

pub mod color;
pub mod decode;
pub mod encode;
pub mod export;
pub mod filter;
pub mod info;
pub mod render;
pub mod session;
pub mod state;

pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_image, EncodeError, ExportFormat};
pub use export::{export_image, ExportError, ExportReport, SaveOutcome, DEFAULT_EXPORT_NAME};
pub use filter::{apply_filter, FilterEffect, FilterKind};
pub use info::ImageInfo;
pub use render::{render_frame, Placement, Viewport};
pub use session::{AcquireOutcome, Session};
pub use state::{Offset, TransformState};
