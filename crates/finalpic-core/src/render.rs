//! Render pipeline: turns an image plus its transform state into a frame.
//!
//! # Stage Order
//! 1. Geometry: aspect-fit the image into the viewport, zoom about the
//!    viewport centre, then pan by the live offset
//! 2. Filter effect, evaluated on the placed frame (so the blur radius is in
//!    viewport pixels)
//!
//! # Algorithm
//!
//! Geometry uses inverse mapping: for each pixel in the output frame we find
//! the source coordinate it came from and sample it bilinearly. Samples that
//! land outside the image are transparent.
//!
//! For a destination pixel centre `(dx, dy)`:
//! ```text
//! src_x = (dx - (vw/2 + offset_x)) / (fit * scale) + iw/2
//! src_y = (dy - (vh/2 + offset_y)) / (fit * scale) + ih/2
//! ```
//! where `fit = min(vw/iw, vh/ih)`.

use serde::{Deserialize, Serialize};

use crate::decode::{DecodedImage, BYTES_PER_PIXEL};
use crate::filter::apply_effect;
use crate::state::TransformState;

/// Size of the host's display surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where the image lands inside the viewport after fit, zoom and pan.
///
/// Coordinates are in viewport pixels and may extend past the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Left edge of the displayed image.
    pub x: f64,
    /// Top edge of the displayed image.
    pub y: f64,
    /// Displayed width.
    pub width: f64,
    /// Displayed height.
    pub height: f64,
    /// Viewport pixels per source pixel.
    pub pixel_scale: f64,
}

impl Placement {
    /// Check whether a viewport point falls on the displayed image.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Scale that aspect-fits `image_w x image_h` inside the viewport.
pub fn fit_scale(image_w: u32, image_h: u32, viewport: Viewport) -> f64 {
    if image_w == 0 || image_h == 0 || viewport.is_empty() {
        return 0.0;
    }
    let sx = viewport.width as f64 / image_w as f64;
    let sy = viewport.height as f64 / image_h as f64;
    sx.min(sy)
}

/// Compute where an image of the given size is displayed.
pub fn placement(
    image_w: u32,
    image_h: u32,
    state: &TransformState,
    viewport: Viewport,
) -> Placement {
    let pixel_scale = fit_scale(image_w, image_h, viewport) * state.scale() as f64;
    let width = image_w as f64 * pixel_scale;
    let height = image_h as f64 * pixel_scale;
    let offset = state.offset();
    let center_x = viewport.width as f64 / 2.0 + offset.x as f64;
    let center_y = viewport.height as f64 / 2.0 + offset.y as f64;

    Placement {
        x: center_x - width / 2.0,
        y: center_y - height / 2.0,
        width,
        height,
        pixel_scale,
    }
}

/// Render a frame of `viewport` size showing `image` under `state`.
///
/// Pure: the same inputs always produce the same frame.
pub fn render_frame(
    image: &DecodedImage,
    state: &TransformState,
    viewport: Viewport,
) -> DecodedImage {
    let placed = place_image(image, state, viewport);
    apply_effect(&placed, state.effect())
}

/// Run only the geometry stage.
pub fn place_image(
    image: &DecodedImage,
    state: &TransformState,
    viewport: Viewport,
) -> DecodedImage {
    let mut frame = DecodedImage::transparent(viewport.width, viewport.height);
    if viewport.is_empty() || image.is_empty() || !has_valid_buffer(image) {
        return frame;
    }

    let at = placement(image.width, image.height, state, viewport);
    if at.pixel_scale <= 0.0 {
        return frame;
    }

    let (dst_w, dst_h) = (viewport.width as usize, viewport.height as usize);

    // Only the destination rows/columns the image covers need sampling.
    let x_start = at.x.floor().max(0.0) as usize;
    let x_end = ((at.x + at.width).ceil().max(0.0) as usize).min(dst_w);
    let y_start = at.y.floor().max(0.0) as usize;
    let y_end = ((at.y + at.height).ceil().max(0.0) as usize).min(dst_h);

    for dst_y in y_start..y_end {
        let src_y = (dst_y as f64 + 0.5 - at.y) / at.pixel_scale - 0.5;
        for dst_x in x_start..x_end {
            let src_x = (dst_x as f64 + 0.5 - at.x) / at.pixel_scale - 0.5;

            if let Some(pixel) = sample_bilinear(image, src_x, src_y) {
                let idx = (dst_y * dst_w + dst_x) * BYTES_PER_PIXEL;
                frame.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&pixel);
            }
        }
    }

    frame
}

fn has_valid_buffer(image: &DecodedImage) -> bool {
    image.pixels.len() == image.width as usize * image.height as usize * BYTES_PER_PIXEL
}

#[inline]
fn get_pixel_f64(image: &DecodedImage, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * BYTES_PER_PIXEL;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation on pixel-centre coordinates.
///
/// Returns `None` when `(x, y)` lies outside the image footprint
/// (`-0.5..w-0.5`). Inside it, coordinates are clamped to the outermost
/// pixel centres so edges do not fade.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> Option<[u8; 4]> {
    let (w, h) = (image.width as f64, image.height as f64);
    if x < -0.5 || x >= w - 0.5 || y < -0.5 || y >= h - 0.5 {
        return None;
    }

    let x = x.clamp(0.0, w - 1.0);
    let y = y.clamp(0.0, h - 1.0);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] * (1.0 - fx) + p10[c] * fx;
        let bottom = p01[c] * (1.0 - fx) + p11[c] * fx;
        let value = top * (1.0 - fy) + bottom * fy;
        out[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    Some(out)
}
