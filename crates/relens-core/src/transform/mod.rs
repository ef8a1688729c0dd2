//! Crop geometry and coordinate mapping.
//!
//! - [`crop`] computes the valid crop bounds for a straightened image and
//!   constrains crop rectangles to them.
//! - [`mapping`] maps canvas-space output pixels back to source texels.

pub mod crop;
pub mod mapping;

pub use crop::{
    constrain_crop, crop_scale, reconcile_crop, valid_bounds, CropRect, ValidBounds,
    MIN_CROP_SIZE,
};
pub use mapping::{map_canvas, map_canvas_to_texel, quarter_turn, FrameParams, MappedCoord};
