//! Preview filters.
//!
//! A filter is selected by [`FilterKind`] and tuned by a single intensity in
//! `[0, 1]`. The pair resolves to a [`FilterEffect`], which carries the
//! concrete parameters the pixel pass needs:
//!
//! | kind    | effect                                                     |
//! |---------|------------------------------------------------------------|
//! | None    | identity                                                   |
//! | Sepia   | multiply by (1.0, 0.8, 0.6), opacity `0.8 + intensity*0.2` |
//! | Noir    | saturation `1 - intensity`                                 |
//! | Vibrant | saturation `1 + intensity`, contrast `1 + intensity*0.5`   |
//! | Blur    | gaussian blur, radius `intensity * 10` px                  |

use image::{DynamicImage, Rgba32FImage};
use serde::{Deserialize, Serialize};

use crate::color::{
    apply_color_multiply, apply_contrast, apply_saturation, to_u8, to_unit,
};
use crate::decode::{DecodedImage, BYTES_PER_PIXEL};

/// Warm tone used by the sepia filter.
pub const SEPIA_TINT: [f32; 3] = [1.0, 0.8, 0.6];

/// Blur radius in pixels at full intensity.
pub const MAX_BLUR_RADIUS: f32 = 10.0;

/// The closed set of preview filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    None,
    Sepia,
    Noir,
    Vibrant,
    Blur,
}

impl FilterKind {
    /// All filters in picker order.
    pub const ALL: [FilterKind; 5] = [
        FilterKind::None,
        FilterKind::Sepia,
        FilterKind::Noir,
        FilterKind::Vibrant,
        FilterKind::Blur,
    ];

    /// Display label for the filter picker.
    pub fn label(self) -> &'static str {
        match self {
            FilterKind::None => "None",
            FilterKind::Sepia => "Sepia",
            FilterKind::Noir => "Noir",
            FilterKind::Vibrant => "Vibrant",
            FilterKind::Blur => "Blur",
        }
    }

    /// Position of this filter in [`FilterKind::ALL`].
    pub fn index(self) -> u8 {
        match self {
            FilterKind::None => 0,
            FilterKind::Sepia => 1,
            FilterKind::Noir => 2,
            FilterKind::Vibrant => 3,
            FilterKind::Blur => 4,
        }
    }

    /// Look up a filter by picker position. Unknown indices map to `None`.
    pub fn from_index(index: u8) -> FilterKind {
        FilterKind::ALL
            .get(index as usize)
            .copied()
            .unwrap_or(FilterKind::None)
    }

    /// Whether the intensity slider means anything for this filter.
    pub fn uses_intensity(self) -> bool {
        self != FilterKind::None
    }

    /// Resolve this filter at the given intensity.
    ///
    /// Intensity is clamped to `[0, 1]`. `FilterKind::None` resolves to
    /// [`FilterEffect::Identity`] whatever the intensity.
    pub fn effect(self, intensity: f32) -> FilterEffect {
        let t = if intensity.is_finite() {
            intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self {
            FilterKind::None => FilterEffect::Identity,
            FilterKind::Sepia => FilterEffect::Tone {
                tint: SEPIA_TINT,
                opacity: 0.8 + t * 0.2,
            },
            FilterKind::Noir => FilterEffect::Saturation { factor: 1.0 - t },
            FilterKind::Vibrant => FilterEffect::Vivid {
                saturation: 1.0 + t,
                contrast: 1.0 + t * 0.5,
            },
            FilterKind::Blur => FilterEffect::Blur {
                radius: t * MAX_BLUR_RADIUS,
            },
        }
    }
}

/// Concrete filter parameters, one variant per kind of pixel pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterEffect {
    Identity,
    /// Channel multiply followed by an opacity change.
    Tone { tint: [f32; 3], opacity: f32 },
    Saturation { factor: f32 },
    /// Saturation then contrast.
    Vivid { saturation: f32, contrast: f32 },
    /// Gaussian blur with `radius` used as the standard deviation.
    Blur { radius: f32 },
}

impl FilterEffect {
    /// Check whether applying this effect leaves pixels unchanged.
    pub fn is_identity(&self) -> bool {
        match *self {
            FilterEffect::Identity => true,
            FilterEffect::Tone { tint, opacity } => tint == [1.0, 1.0, 1.0] && opacity == 1.0,
            FilterEffect::Saturation { factor } => factor == 1.0,
            FilterEffect::Vivid {
                saturation,
                contrast,
            } => saturation == 1.0 && contrast == 1.0,
            FilterEffect::Blur { radius } => radius <= 0.0,
        }
    }
}

/// Apply a filter to an image, returning a new image.
pub fn apply_filter(image: &DecodedImage, kind: FilterKind, intensity: f32) -> DecodedImage {
    apply_effect(image, kind.effect(intensity))
}

/// Apply a resolved effect to an image, returning a new image.
pub fn apply_effect(image: &DecodedImage, effect: FilterEffect) -> DecodedImage {
    if effect.is_identity() || image.is_empty() {
        return image.clone();
    }

    match effect {
        FilterEffect::Blur { radius } => apply_blur(image, radius),
        _ => {
            let mut out = image.clone();
            apply_color_effect(&mut out.pixels, effect);
            out
        }
    }
}

/// Apply a color (non-spatial) effect to RGBA pixel data in place.
///
/// Spatial effects are ignored here. An incomplete trailing pixel is left
/// untouched.
pub fn apply_color_effect(pixels: &mut [u8], effect: FilterEffect) {
    if effect.is_identity() || matches!(effect, FilterEffect::Blur { .. }) {
        return;
    }

    for chunk in pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
        let mut r = to_unit(chunk[0]);
        let mut g = to_unit(chunk[1]);
        let mut b = to_unit(chunk[2]);
        let mut a = to_unit(chunk[3]);

        match effect {
            FilterEffect::Tone { tint, opacity } => {
                (r, g, b) = apply_color_multiply(r, g, b, tint);
                a *= opacity;
            }
            FilterEffect::Saturation { factor } => {
                (r, g, b) = apply_saturation(r, g, b, factor);
            }
            FilterEffect::Vivid {
                saturation,
                contrast,
            } => {
                (r, g, b) = apply_saturation(r, g, b, saturation);
                (r, g, b) = apply_contrast(r, g, b, contrast);
            }
            FilterEffect::Identity | FilterEffect::Blur { .. } => {}
        }

        chunk[0] = to_u8(r);
        chunk[1] = to_u8(g);
        chunk[2] = to_u8(b);
        chunk[3] = to_u8(a);
    }
}

/// Gaussian blur in premultiplied alpha, so transparent pixels carry no
/// colour into their neighbours.
fn apply_blur(image: &DecodedImage, radius: f32) -> DecodedImage {
    // Mismatched buffers are passed through rather than guessed at.
    let Some(premultiplied) = premultiply(image) else {
        return image.clone();
    };
    let blurred = DynamicImage::ImageRgba32F(premultiplied)
        .blur(radius)
        .into_rgba32f();
    unpremultiply(&blurred)
}

fn premultiply(image: &DecodedImage) -> Option<Rgba32FImage> {
    let rgba = image.to_rgba_image()?;
    let data: Vec<f32> = rgba
        .pixels()
        .flat_map(|px| {
            let [r, g, b, a] = px.0;
            let a = to_unit(a);
            [to_unit(r) * a, to_unit(g) * a, to_unit(b) * a, a]
        })
        .collect();
    Rgba32FImage::from_raw(rgba.width(), rgba.height(), data)
}

fn unpremultiply(image: &Rgba32FImage) -> DecodedImage {
    let (width, height) = image.dimensions();
    let pixels = image
        .as_raw()
        .chunks_exact(BYTES_PER_PIXEL)
        .flat_map(|px| {
            let alpha = to_u8(px[3]);
            if alpha == 0 {
                return [0; 4];
            }
            let a = px[3];
            [to_u8(px[0] / a), to_u8(px[1] / a), to_u8(px[2] / a), alpha]
        })
        .collect();
    DecodedImage::new(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_image() -> DecodedImage {
        DecodedImage::new(
            2,
            2,
            vec![
                200, 120, 60, 255, // warm
                30, 90, 210, 255, // cool
                128, 128, 128, 255, // gray
                255, 0, 0, 128, // translucent red
            ],
        )
    }

    fn is_gray(px: [u8; 4]) -> bool {
        px[0] == px[1] && px[1] == px[2]
    }

    // ===== FilterKind =====

    #[test]
    fn test_labels_and_indices() {
        for (i, kind) in FilterKind::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(FilterKind::from_index(i as u8), *kind);
        }
        assert_eq!(FilterKind::from_index(42), FilterKind::None);
        assert_eq!(FilterKind::Vibrant.label(), "Vibrant");
    }

    #[test]
    fn test_only_none_ignores_intensity() {
        assert!(!FilterKind::None.uses_intensity());
        assert!(FilterKind::Blur.uses_intensity());
    }

    #[test]
    fn test_effect_parameters() {
        match FilterKind::Sepia.effect(0.5) {
            FilterEffect::Tone { tint, opacity } => {
                assert_eq!(tint, SEPIA_TINT);
                assert!((opacity - 0.9).abs() < 1e-6);
            }
            other => panic!("expected tone effect, got {other:?}"),
        }
        assert_eq!(
            FilterKind::Noir.effect(0.25),
            FilterEffect::Saturation { factor: 0.75 }
        );
        assert_eq!(
            FilterKind::Vibrant.effect(1.0),
            FilterEffect::Vivid {
                saturation: 2.0,
                contrast: 1.5
            }
        );
        assert_eq!(
            FilterKind::Blur.effect(0.5),
            FilterEffect::Blur { radius: 5.0 }
        );
    }

    #[test]
    fn test_effect_clamps_intensity() {
        assert_eq!(
            FilterKind::Blur.effect(3.0),
            FilterEffect::Blur { radius: 10.0 }
        );
        assert_eq!(
            FilterKind::Noir.effect(-1.0),
            FilterEffect::Saturation { factor: 1.0 }
        );
        assert_eq!(
            FilterKind::Noir.effect(f32::NAN),
            FilterEffect::Saturation { factor: 1.0 }
        );
    }

    // ===== Identity =====

    #[test]
    fn test_none_is_identity_at_any_intensity() {
        let img = sample_image();
        for intensity in [0.0, 0.5, 1.0] {
            assert_eq!(apply_filter(&img, FilterKind::None, intensity), img);
        }
    }

    #[test]
    fn test_noir_zero_is_identity() {
        let img = sample_image();
        assert_eq!(apply_filter(&img, FilterKind::Noir, 0.0), img);
    }

    #[test]
    fn test_blur_zero_is_identity() {
        let img = sample_image();
        assert_eq!(apply_filter(&img, FilterKind::Blur, 0.0), img);
    }

    // ===== Sepia =====

    #[test]
    fn test_sepia_tints_and_fades() {
        let img = DecodedImage::filled(1, 1, [255, 255, 255, 255]);
        let out = apply_filter(&img, FilterKind::Sepia, 0.0);
        assert_eq!(out.pixel(0, 0), [255, 204, 153, 204]);

        let out = apply_filter(&img, FilterKind::Sepia, 1.0);
        assert_eq!(out.pixel(0, 0), [255, 204, 153, 255]);
    }

    // ===== Noir =====

    #[test]
    fn test_noir_full_is_grayscale() {
        let out = apply_filter(&sample_image(), FilterKind::Noir, 1.0);
        for y in 0..2 {
            for x in 0..2 {
                assert!(is_gray(out.pixel(x, y)), "pixel ({x},{y}) not gray");
            }
        }
        // Alpha untouched
        assert_eq!(out.pixel(1, 1)[3], 128);
    }

    #[test]
    fn test_noir_half_reduces_spread() {
        let img = sample_image();
        let out = apply_filter(&img, FilterKind::Noir, 0.5);
        let before = img.pixel(0, 0);
        let after = out.pixel(0, 0);
        assert!((after[0] as i32 - after[2] as i32) < (before[0] as i32 - before[2] as i32));
    }

    // ===== Vibrant =====

    #[test]
    fn test_vibrant_increases_spread() {
        let img = DecodedImage::filled(1, 1, [150, 120, 100, 255]);
        let out = apply_filter(&img, FilterKind::Vibrant, 1.0);
        let px = out.pixel(0, 0);
        assert!(px[0] as i32 - px[2] as i32 > 50);
    }

    #[test]
    fn test_vibrant_keeps_mid_gray() {
        let img = DecodedImage::filled(1, 1, [128, 128, 128, 255]);
        let out = apply_filter(&img, FilterKind::Vibrant, 1.0);
        let px = out.pixel(0, 0);
        assert!(is_gray(px));
        assert!((px[0] as i32 - 128).abs() <= 1);
    }

    // ===== Blur =====

    #[test]
    fn test_blur_softens_edge() {
        let mut img = DecodedImage::filled(21, 1, [0, 0, 0, 255]);
        for x in 11..21 {
            let idx = x * 4;
            img.pixels[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
        }
        let out = apply_filter(&img, FilterKind::Blur, 0.3);
        assert_eq!((out.width, out.height), (21, 1));
        let edge = out.pixel(10, 0)[0];
        assert!(edge > 0 && edge < 255, "edge should be smoothed, got {edge}");
    }

    #[test]
    fn test_blur_uniform_image_stays_uniform() {
        let img = DecodedImage::filled(32, 32, [90, 90, 90, 255]);
        let out = apply_filter(&img, FilterKind::Blur, 0.3);
        let center = out.pixel(16, 16);
        assert!((center[0] as i32 - 90).abs() <= 1);
        assert!((center[3] as i32 - 255).abs() <= 1);
    }

    #[test]
    fn test_blur_keeps_colour_next_to_transparency() {
        // Opaque white block in the middle of a transparent strip
        let mut img = DecodedImage::transparent(12, 1);
        for x in 4..8 {
            let idx = x * 4;
            img.pixels[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
        }
        let out = apply_filter(&img, FilterKind::Blur, 0.3);
        for x in 0..12 {
            let px = out.pixel(x, 0);
            if px[3] > 0 {
                assert_eq!(&px[0..3], &[255, 255, 255], "pixel {x} darkened: {px:?}");
            }
        }
        // Alpha is what spreads
        assert!(out.pixel(3, 0)[3] > 0);
        assert!(out.pixel(4, 0)[3] < 255);
    }

    #[test]
    fn test_blur_translucent_source_keeps_colour() {
        let img = DecodedImage::filled(16, 16, [200, 100, 50, 128]);
        let out = apply_filter(&img, FilterKind::Blur, 0.5);
        for y in 0..16 {
            for x in 0..16 {
                let px = out.pixel(x, y);
                if px[3] > 0 {
                    assert!((px[0] as i32 - 200).abs() <= 1, "{px:?}");
                    assert!((px[1] as i32 - 100).abs() <= 1, "{px:?}");
                    assert!((px[2] as i32 - 50).abs() <= 1, "{px:?}");
                }
            }
        }
    }

    // ===== Edge cases =====

    #[test]
    fn test_empty_image_passes_through() {
        let img = DecodedImage::new(0, 0, vec![]);
        for kind in FilterKind::ALL {
            assert!(apply_filter(&img, kind, 1.0).is_empty());
        }
    }

    #[test]
    fn test_incomplete_pixel_ignored() {
        let mut pixels = vec![255, 255, 255, 255, 7];
        apply_color_effect(&mut pixels, FilterKind::Sepia.effect(1.0));
        assert_eq!(&pixels[..4], &[255, 204, 153, 255]);
        assert_eq!(pixels[4], 7);
    }
}
