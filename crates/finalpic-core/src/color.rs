//! Per-pixel color operations used by the filter stage.
//!
//! All operations work on normalized channel values (0.0 to 1.0) and leave
//! clamping to the caller, so several of them can be chained before the
//! result is quantized back to 8 bits.

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from normalized RGB values.
#[inline]
pub fn calculate_luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Multiply each channel by a per-channel tint.
///
/// Formula: `output = input * tint`
#[inline]
pub fn apply_color_multiply(r: f32, g: f32, b: f32, tint: [f32; 3]) -> (f32, f32, f32) {
    (r * tint[0], g * tint[1], b * tint[2])
}

/// Scale saturation by `factor`.
///
/// - `factor = 0` collapses every channel onto the pixel's luminance
/// - `factor = 1` leaves the pixel unchanged
/// - `factor > 1` pushes channels away from the luminance
///
/// Formula: `output = luma + (input - luma) * factor`
#[inline]
pub fn apply_saturation(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let gray = calculate_luminance(r, g, b);
    (
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}

/// Scale contrast by `factor` around the mid-gray pivot.
///
/// Formula: `output = (input - 0.5) * factor + 0.5`
#[inline]
pub fn apply_contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    if factor == 1.0 {
        return (r, g, b);
    }
    let midpoint = 0.5;
    (
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// Convert an 8-bit channel to 0.0..=1.0.
#[inline]
pub fn to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Convert a normalized channel back to 8 bits, clamping out-of-gamut values.
#[inline]
pub fn to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_sum_to_one() {
        let sum = LUMINANCE_R + LUMINANCE_G + LUMINANCE_B;
        assert!((sum - 1.0).abs() < 1e-6, "Coefficients should sum to 1.0");
    }

    #[test]
    fn test_unit_round_trip_is_exact() {
        for v in 0..=255u8 {
            assert_eq!(to_u8(to_unit(v)), v);
        }
    }

    #[test]
    fn test_to_u8_clamps() {
        assert_eq!(to_u8(-0.3), 0);
        assert_eq!(to_u8(1.7), 255);
    }

    #[test]
    fn test_color_multiply_warm_tint() {
        let (r, g, b) = apply_color_multiply(1.0, 1.0, 1.0, [1.0, 0.8, 0.6]);
        assert_eq!((r, g, b), (1.0, 0.8, 0.6));
    }

    #[test]
    fn test_saturation_zero_is_gray() {
        let (r, g, b) = apply_saturation(0.8, 0.5, 0.4, 0.0);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((r - calculate_luminance(0.8, 0.5, 0.4)).abs() < 1e-6);
    }

    #[test]
    fn test_saturation_boost_spreads_channels() {
        let (r, _, b) = apply_saturation(0.8, 0.5, 0.4, 2.0);
        assert!(r - b > 0.8 - 0.4);
    }

    #[test]
    fn test_saturation_preserves_gray() {
        let (r, g, b) = apply_saturation(0.5, 0.5, 0.5, 2.0);
        assert!((r - 0.5).abs() < 1e-6);
        assert!((g - 0.5).abs() < 1e-6);
        assert!((b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let (lo, mid, hi) = apply_contrast(0.25, 0.5, 0.75, 1.5);
        assert!(lo < 0.25);
        assert!((mid - 0.5).abs() < 1e-6);
        assert!(hi > 0.75);
    }

    #[test]
    fn test_unit_factors_are_identity() {
        assert_eq!(apply_saturation(0.1, 0.2, 0.3, 1.0), (0.1, 0.2, 0.3));
        assert_eq!(apply_contrast(0.1, 0.2, 0.3, 1.0), (0.1, 0.2, 0.3));
    }
}
