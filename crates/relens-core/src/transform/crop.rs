//! Crop-rectangle geometry under fine rotation.
//!
//! Crop rectangles live in normalized coordinates (0.0 to 1.0) in
//! post-quarter-turn image space, making them independent of pixel
//! dimensions. When the image is straightened by a fine angle, the region a
//! crop may occupy shrinks to the largest axis-aligned rectangle still fully
//! inside the rotated image; everything here derives from that inscribed
//! rectangle.
//!
//! # Coordinate System
//!
//! - (0.0, 0.0) = top-left corner
//! - (1.0, 1.0) = bottom-right corner

use serde::{Deserialize, Serialize};

/// Minimum normalized width/height of a crop rectangle.
pub const MIN_CROP_SIZE: f32 = 0.05;

/// A crop rectangle in normalized post-quarter-turn image space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for CropRect {
    fn default() -> Self {
        Self::full()
    }
}

impl CropRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The whole image.
    pub fn full() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Pixel aspect ratio of the cropped region, given the effective
    /// (post-quarter-turn) aspect of the image it is cut from.
    pub fn pixel_aspect(&self, effective_aspect: f32) -> f32 {
        if self.height <= 0.0 {
            return effective_aspect;
        }
        self.width / self.height * effective_aspect
    }
}

/// The region a crop rectangle may occupy at the current fine rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidBounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Default for ValidBounds {
    fn default() -> Self {
        Self::unconstrained()
    }
}

impl ValidBounds {
    /// The full unit square (no rotation, no constraint).
    pub fn unconstrained() -> Self {
        Self {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// True when `rect` lies entirely inside these bounds with a valid size.
    pub fn contains(&self, rect: &CropRect) -> bool {
        rect.width >= MIN_CROP_SIZE.min(self.width())
            && rect.height >= MIN_CROP_SIZE.min(self.height())
            && rect.x >= self.min_x
            && rect.y >= self.min_y
            && rect.right() <= self.max_x
            && rect.bottom() <= self.max_y
    }
}

/// Side length of the largest centered axis-aligned rectangle (in normalized
/// coordinates) that stays fully inside an image of aspect `aspect` after a
/// fine rotation of `degrees`.
///
/// `scale_from_width` keeps the rotated rectangle inside the image width,
/// `scale_from_height` inside its height; the inscribed rectangle needs
/// both. Exactly 1.0 at zero rotation.
pub fn crop_scale(degrees: f32, aspect: f32) -> f32 {
    if degrees == 0.0 || !degrees.is_finite() || aspect <= 0.0 || !aspect.is_finite() {
        return 1.0;
    }
    let theta = degrees.abs().to_radians();
    let cos = theta.cos();
    let sin = theta.sin();
    let scale_from_width = 1.0 / (cos + sin / aspect);
    let scale_from_height = 1.0 / (cos + sin * aspect);
    scale_from_width.min(scale_from_height)
}

/// Valid crop bounds for an image of (post-quarter-turn) aspect `aspect`
/// straightened by `degrees`: the inscribed rectangle, centered.
pub fn valid_bounds(degrees: f32, aspect: f32) -> ValidBounds {
    let scale = crop_scale(degrees, aspect);
    let margin = (1.0 - scale) / 2.0;
    ValidBounds {
        min_x: margin,
        min_y: margin,
        max_x: 1.0 - margin,
        max_y: 1.0 - margin,
    }
}

/// Constrain a crop rectangle into `bounds`.
///
/// Size is clamped to [`MIN_CROP_SIZE`, bounds extent] first, the position
/// is clamped into the bounds, and the size is re-clamped after the position
/// moves. Idempotent for any input, including degenerate and negative sizes;
/// non-finite components are replaced deterministically.
pub fn constrain_crop(rect: CropRect, bounds: &ValidBounds) -> CropRect {
    let bw = bounds.width().max(0.0);
    let bh = bounds.height().max(0.0);
    let min_w = MIN_CROP_SIZE.min(bw);
    let min_h = MIN_CROP_SIZE.min(bh);

    let sanitize = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };

    let mut width = sanitize(rect.width, min_w).clamp(min_w, bw);
    let mut height = sanitize(rect.height, min_h).clamp(min_h, bh);

    let x = sanitize(rect.x, bounds.min_x).clamp(bounds.min_x, bounds.max_x - width);
    let y = sanitize(rect.y, bounds.min_y).clamp(bounds.min_y, bounds.max_y - height);

    // Position clamping cannot grow the overflow, but re-clamp the size so
    // the invariant is explicit rather than incidental.
    width = width.min(bounds.max_x - x);
    height = height.min(bounds.max_y - y);

    CropRect {
        x,
        y,
        width,
        height,
    }
}

/// Reconcile an existing crop against new bounds after a rotation change.
///
/// Returns `None` when the rectangle is already valid (so callers do not
/// re-apply an identical value and loop) and the deterministic correction
/// otherwise.
pub fn reconcile_crop(rect: CropRect, bounds: &ValidBounds) -> Option<CropRect> {
    let constrained = constrain_crop(rect, bounds);
    if constrained == rect {
        None
    } else {
        Some(constrained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_scale_identity_at_zero() {
        for aspect in [0.5, 1.0, 4.0 / 3.0, 2.0] {
            assert_eq!(crop_scale(0.0, aspect), 1.0);
        }
    }

    #[test]
    fn test_crop_scale_formula_at_ten_degrees() {
        // 1600x1200 image, aspect 4/3, tilted 10 degrees.
        let aspect = 4.0 / 3.0;
        let theta = 10.0f32.to_radians();
        let expected = (1.0 / (theta.cos() + theta.sin() / aspect))
            .min(1.0 / (theta.cos() + theta.sin() * aspect));
        let scale = crop_scale(10.0, aspect);
        assert!((scale - expected).abs() < 1e-6);
        // Height constraint wins for a landscape image.
        assert!((scale - 0.8222).abs() < 1e-3, "scale was {}", scale);
    }

    #[test]
    fn test_crop_scale_sign_symmetric() {
        let s1 = crop_scale(7.0, 1.5);
        let s2 = crop_scale(-7.0, 1.5);
        assert_eq!(s1, s2);
    }

    #[test]
    fn test_crop_scale_degenerate_aspect() {
        assert_eq!(crop_scale(10.0, 0.0), 1.0);
        assert_eq!(crop_scale(10.0, -2.0), 1.0);
        assert_eq!(crop_scale(f32::NAN, 1.0), 1.0);
    }

    #[test]
    fn test_valid_bounds_centered() {
        let bounds = valid_bounds(10.0, 4.0 / 3.0);
        assert!((bounds.min_x + bounds.max_x - 1.0).abs() < 1e-6);
        assert!((bounds.min_y + bounds.max_y - 1.0).abs() < 1e-6);
        assert!(bounds.min_x > 0.0);
        assert!((bounds.width() - crop_scale(10.0, 4.0 / 3.0)).abs() < 1e-6);
    }

    #[test]
    fn test_valid_bounds_unconstrained_at_zero() {
        let bounds = valid_bounds(0.0, 1.7);
        assert_eq!(bounds, ValidBounds::unconstrained());
    }

    #[test]
    fn test_inscribed_rect_stays_inside_rotated_image() {
        // Rotate the inscribed rectangle's corners (in pixel space) and
        // check they remain within the original image.
        for (w, h) in [(1600.0f32, 1200.0), (1000.0, 1000.0), (500.0, 2000.0)] {
            for degrees in [1.0f32, 5.0, 10.0, 25.0, 45.0] {
                let aspect = w / h;
                let scale = crop_scale(degrees, aspect);
                let theta = degrees.to_radians();
                let (sin, cos) = theta.sin_cos();

                let half_w = scale * w / 2.0;
                let half_h = scale * h / 2.0;
                for (dx, dy) in [
                    (half_w, half_h),
                    (-half_w, half_h),
                    (half_w, -half_h),
                    (-half_w, -half_h),
                ] {
                    let rx = dx * cos - dy * sin;
                    let ry = dx * sin + dy * cos;
                    assert!(
                        rx.abs() <= w / 2.0 + 1e-2,
                        "x overflow at {}deg {}x{}: {}",
                        degrees,
                        w,
                        h,
                        rx
                    );
                    assert!(
                        ry.abs() <= h / 2.0 + 1e-2,
                        "y overflow at {}deg {}x{}: {}",
                        degrees,
                        w,
                        h,
                        ry
                    );
                }
            }
        }
    }

    #[test]
    fn test_constrain_noop_for_valid_rect() {
        let bounds = ValidBounds::unconstrained();
        let rect = CropRect::new(0.1, 0.2, 0.5, 0.6);
        assert_eq!(constrain_crop(rect, &bounds), rect);
    }

    #[test]
    fn test_constrain_clamps_position() {
        let bounds = ValidBounds::unconstrained();
        let rect = CropRect::new(0.8, -0.5, 0.5, 0.5);
        let result = constrain_crop(rect, &bounds);
        assert_eq!(result.x, 0.5);
        assert_eq!(result.y, 0.0);
        assert_eq!(result.width, 0.5);
        assert_eq!(result.height, 0.5);
    }

    #[test]
    fn test_constrain_enforces_minimum_size() {
        let bounds = ValidBounds::unconstrained();
        let rect = CropRect::new(0.4, 0.4, 0.001, -3.0);
        let result = constrain_crop(rect, &bounds);
        assert_eq!(result.width, MIN_CROP_SIZE);
        assert_eq!(result.height, MIN_CROP_SIZE);
    }

    #[test]
    fn test_constrain_shrinks_oversized_rect() {
        let bounds = valid_bounds(10.0, 4.0 / 3.0);
        let result = constrain_crop(CropRect::full(), &bounds);
        assert!(bounds.contains(&result));
        assert!((result.width - bounds.width()).abs() < 1e-6);
    }

    #[test]
    fn test_constrain_handles_non_finite() {
        let bounds = valid_bounds(5.0, 1.5);
        let rect = CropRect::new(f32::NAN, f32::INFINITY, f32::NEG_INFINITY, f32::NAN);
        let result = constrain_crop(rect, &bounds);
        assert!(bounds.contains(&result));
        assert!(result.x.is_finite() && result.width.is_finite());
    }

    #[test]
    fn test_reconcile_returns_none_for_valid() {
        let bounds = valid_bounds(10.0, 4.0 / 3.0);
        let rect = CropRect::new(0.3, 0.3, 0.2, 0.2);
        assert!(bounds.contains(&rect));
        assert_eq!(reconcile_crop(rect, &bounds), None);
    }

    #[test]
    fn test_reconcile_corrects_invalid_once() {
        let bounds = valid_bounds(10.0, 4.0 / 3.0);
        let rect = CropRect::new(0.0, 0.0, 1.0, 1.0);
        let corrected = reconcile_crop(rect, &bounds).expect("should correct");
        assert!(bounds.contains(&corrected));
        // Re-applying is a no-op: no update loop.
        assert_eq!(reconcile_crop(corrected, &bounds), None);
    }

    #[test]
    fn test_scenario_1600x1200_at_ten_degrees() {
        let bounds = valid_bounds(10.0, 1600.0 / 1200.0);
        let scale = crop_scale(10.0, 1600.0 / 1200.0);
        let margin = (1.0 - scale) / 2.0;
        assert!((bounds.min_x - margin).abs() < 1e-6);
        assert!((bounds.max_x - (1.0 - margin)).abs() < 1e-6);
        // Roughly 9% margin each side for this aspect and angle.
        assert!(margin > 0.05 && margin < 0.12, "margin was {}", margin);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
