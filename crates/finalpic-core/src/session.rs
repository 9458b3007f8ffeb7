//! The editing session: the current image plus its view state.
//!
//! A [`Session`] is a plain owned value. Hosts hold one per window, call its
//! mutators from their event handlers and call [`Session::render`] whenever
//! they need a new frame. Nothing here is shared or locked.

use std::path::Path;

use tracing::{debug, warn};

use crate::decode::{decode_image, DecodeError, DecodedImage};
use crate::export::{export_image, ExportError, ExportReport, SaveOutcome};
use crate::info::ImageInfo;
use crate::render::{render_frame, Viewport};
use crate::state::TransformState;

/// Result of handing picker output to the session.
#[derive(Debug)]
pub enum AcquireOutcome {
    /// The image decoded and replaced the previous one.
    Accepted { width: u32, height: u32 },
    /// The user dismissed the picker. Nothing changed.
    Cancelled,
    /// The bytes could not be decoded. Nothing changed.
    Rejected(DecodeError),
}

impl AcquireOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcquireOutcome::Accepted { .. })
    }
}

/// Session state: optional image, zoom, pan and filter selection.
#[derive(Debug, Clone, Default)]
pub struct Session {
    image: Option<DecodedImage>,
    transform: TransformState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// Mutable access for gesture and control handlers.
    pub fn transform_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }

    /// Take the bytes the picker resolved to, if any.
    ///
    /// `None` means the user cancelled. On a decode failure the previous
    /// image and transform are kept. On success the image is replaced and
    /// the transform is reset.
    pub fn acquire(&mut self, picked: Option<&[u8]>) -> AcquireOutcome {
        let Some(bytes) = picked else {
            debug!("image pick cancelled");
            return AcquireOutcome::Cancelled;
        };

        match decode_image(bytes) {
            Ok(image) => {
                let (width, height) = (image.width, image.height);
                self.accept_image(image);
                AcquireOutcome::Accepted { width, height }
            }
            Err(err) => {
                warn!(len = bytes.len(), error = %err, "rejected picked image");
                AcquireOutcome::Rejected(err)
            }
        }
    }

    /// Replace the image with an already decoded one and reset the view.
    pub fn accept_image(&mut self, image: DecodedImage) {
        debug!(width = image.width, height = image.height, "accepted image");
        self.image = Some(image);
        self.transform.reset();
    }

    /// Drop the image and return every view parameter to its default.
    pub fn reset(&mut self) {
        debug!(had_image = self.image.is_some(), "session reset");
        self.image = None;
        self.transform.reset();
    }

    /// Render the current image into a viewport-sized frame.
    ///
    /// Returns `None` when there is no image; hosts show their placeholder.
    pub fn render(&self, viewport: Viewport) -> Option<DecodedImage> {
        let image = self.image.as_ref()?;
        let frame = render_frame(image, &self.transform, viewport);
        debug!(
            width = viewport.width,
            height = viewport.height,
            scale = self.transform.scale(),
            filter = ?self.transform.filter(),
            intensity = self.transform.intensity(),
            "rendered frame"
        );
        Some(frame)
    }

    pub fn info(&self) -> Option<ImageInfo> {
        self.image.as_ref().map(ImageInfo::from_image)
    }

    /// Write the unfiltered image to `path`.
    pub fn export(&self, path: &Path) -> Result<ExportReport, ExportError> {
        let image = self.image.as_ref().ok_or(ExportError::NoImage)?;
        export_image(image, path)
    }

    /// [`Session::export`], folded into the message the user sees.
    pub fn save(&self, path: &Path) -> SaveOutcome {
        let result = self.export(path);
        if let Err(err) = &result {
            warn!(path = %path.display(), error = %err, "save failed");
        }
        SaveOutcome::from_result(&result)
    }
}
