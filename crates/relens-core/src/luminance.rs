//! Luminance and masking utilities using ITU-R BT.709 coefficients.
//!
//! Shared by the tone stage (highlight/shadow masks) and the straighten
//! preview overlay.

/// ITU-R BT.709 coefficient for red channel in luminance calculation.
pub const LUMINANCE_R: f32 = 0.2126;

/// ITU-R BT.709 coefficient for green channel in luminance calculation.
pub const LUMINANCE_G: f32 = 0.7152;

/// ITU-R BT.709 coefficient for blue channel in luminance calculation.
pub const LUMINANCE_B: f32 = 0.0722;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b
}

/// Hermite smoothstep.
///
/// Returns 0 for x <= edge0, 1 for x >= edge1, and smoothly interpolates
/// between. Also accepts edge0 > edge1 for an inverted ramp.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
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
    fn test_luminance_extremes() {
        assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < f32::EPSILON);
        assert!(luminance(0.0, 0.0, 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_luminance_gray_preserves_value() {
        for v in [0.0f32, 0.25, 0.5, 0.75, 1.0] {
            assert!((luminance(v, v, v) - v).abs() < 1e-6);
        }
    }

    #[test]
    fn test_luminance_channel_weights() {
        assert!((luminance(1.0, 0.0, 0.0) - LUMINANCE_R).abs() < f32::EPSILON);
        assert!((luminance(0.0, 1.0, 0.0) - LUMINANCE_G).abs() < f32::EPSILON);
        assert!((luminance(0.0, 0.0, 1.0) - LUMINANCE_B).abs() < f32::EPSILON);
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(0.3, 0.7, 0.0), 0.0);
        assert_eq!(smoothstep(0.3, 0.7, 0.3), 0.0);
        assert_eq!(smoothstep(0.3, 0.7, 0.7), 1.0);
        assert_eq!(smoothstep(0.3, 0.7, 1.0), 1.0);
    }

    #[test]
    fn test_smoothstep_midpoint() {
        let mid = smoothstep(0.3, 0.7, 0.5);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_smoothstep_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let x = i as f32 / 100.0;
            let v = smoothstep(0.3, 0.7, x);
            assert!(v >= prev, "smoothstep should be monotonic");
            prev = v;
        }
    }
}
