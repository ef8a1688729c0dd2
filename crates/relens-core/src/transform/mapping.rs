//! Per-output-pixel coordinate mapping from canvas space to source texels.
//!
//! The render surface evaluates this mapping once per output pixel using
//! inverse transforms: starting from a canvas-normalized coordinate it
//! undoes pan/zoom, the viewport fit, and the fine rotation to recover a
//! normalized image-local coordinate, remaps into the active crop
//! sub-rectangle, and finally applies the quarter-turn permutation to reach
//! source texture space. Coordinates leaving the unit square mean the output
//! pixel shows background, which is the normal state at the canvas edges
//! and while straightening.

use crate::transform::crop::CropRect;
use crate::viewport::{rotated_bounds, FIT_PADDING};
use crate::RotationState;

/// Everything the mapping needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    pub rotation: RotationState,
    pub zoom: f32,
    /// Pan per axis, as a fraction of the displayed image size.
    pub pan_x: f32,
    pub pan_y: f32,
    /// The committed crop, when previewing it. `None` while the crop is
    /// being edited or disabled; the overlay then draws on the full image.
    pub active_crop: Option<CropRect>,
    /// Source image aspect (w/h, before quarter turns).
    pub image_aspect: f32,
    /// Canvas aspect (w/h).
    pub container_aspect: f32,
}

impl FrameParams {
    /// Aspect ratio of what is actually displayed: the crop's own pixel
    /// aspect when previewing a committed crop, the image's effective
    /// aspect otherwise.
    pub fn display_aspect(&self) -> f32 {
        let effective = self.rotation.effective_aspect(self.image_aspect);
        match self.active_crop {
            Some(crop) if crop.width > 0.0 && crop.height > 0.0 => {
                crop.pixel_aspect(effective)
            }
            _ => effective,
        }
    }
}

/// Result of mapping one canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedCoord {
    /// Normalized image-local coordinate (post-quarter-turn space, before
    /// the crop remap). The straighten preview tests this against the
    /// inscribed rectangle.
    pub image: (f32, f32),
    /// Source texel coordinate in [0,1]^2, ready for sampling.
    pub texel: (f32, f32),
}

/// The quarter-turn texture permutation.
///
/// 0 turns is the identity; 1: (x,y) -> (1-y, x); 2: (1-x, 1-y);
/// 3: (y, 1-x). Composing four turns returns the input.
#[inline]
pub fn quarter_turn(u: f32, v: f32, turns: u8) -> (f32, f32) {
    match turns % 4 {
        1 => (1.0 - v, u),
        2 => (1.0 - u, 1.0 - v),
        3 => (v, 1.0 - u),
        _ => (u, v),
    }
}

/// Map a canvas-normalized coordinate to a source texel.
///
/// Returns `None` when the coordinate falls outside the image (background)
/// or when the frame geometry is degenerate.
pub fn map_canvas(u: f32, v: f32, params: &FrameParams) -> Option<MappedCoord> {
    if params.image_aspect <= 0.0
        || !params.image_aspect.is_finite()
        || params.container_aspect <= 0.0
        || !params.container_aspect.is_finite()
        || params.zoom <= 0.0
        || !params.zoom.is_finite()
    {
        return None;
    }

    let display_aspect = params.display_aspect();
    if display_aspect <= 0.0 || !display_aspect.is_finite() {
        return None;
    }

    let theta = params.rotation.fine_radians();
    let (bounding_w, bounding_h) = rotated_bounds(display_aspect, theta);
    let fit = FIT_PADDING * (params.container_aspect / bounding_w).min(1.0 / bounding_h);
    if fit <= 0.0 || !fit.is_finite() {
        return None;
    }
    let scale = fit * params.zoom;

    // Visual coordinate: centered at the canvas middle, in units of the
    // container height, with the pan displacement removed.
    let mut x = (u - 0.5) * params.container_aspect;
    let mut y = v - 0.5;
    x -= params.pan_x * display_aspect * scale;
    y -= params.pan_y * scale;

    // Into rotated-display units where the image height is 1.
    x /= scale;
    y /= scale;

    // Undo the fine rotation.
    let (sin, cos) = theta.sin_cos();
    let rx = x * cos + y * sin;
    let ry = -x * sin + y * cos;

    // Normalized image-local coordinate (post-quarter-turn space).
    let ix = rx / display_aspect + 0.5;
    let iy = ry + 0.5;
    if !(0.0..=1.0).contains(&ix) || !(0.0..=1.0).contains(&iy) {
        return None;
    }

    // Remap into the crop sub-rectangle, then permute into source space.
    let (cx, cy) = match params.active_crop {
        Some(crop) => (crop.x + ix * crop.width, crop.y + iy * crop.height),
        None => (ix, iy),
    };
    let texel = quarter_turn(cx, cy, params.rotation.quarter_turns);

    Some(MappedCoord {
        image: (ix, iy),
        texel,
    })
}

/// Convenience wrapper returning only the texel coordinate.
pub fn map_canvas_to_texel(u: f32, v: f32, params: &FrameParams) -> Option<(f32, f32)> {
    map_canvas(u, v, params).map(|m| m.texel)
}
