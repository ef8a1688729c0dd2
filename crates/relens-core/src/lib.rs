//! Relens Core - Interactive photo transform engine
//!
//! This crate provides the transform and crop-geometry engine behind the
//! Relens property-photo editor: viewport fitting, per-pixel coordinate
//! mapping, tonal adjustments, crop constraint geometry, the interactive
//! crop overlay, and the edit session with snapshot history.

pub mod adjustments;
pub mod decode;
pub mod luminance;
pub mod overlay;
pub mod render;
pub mod session;
pub mod transform;
pub mod viewport;

pub use session::{EditSession, LoadState, RenderSpec, SaveError};
pub use transform::{constrain_crop, crop_scale, valid_bounds, CropRect, ValidBounds};
pub use viewport::{ViewState, ViewportTransform};

/// Tonal adjustments for a single edit session.
///
/// All values are in the UI range -100 to 100 (exposure included; it is
/// rescaled to stops inside the tone stage, not here).
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AdjustmentSet {
    /// Additive brightness (-100 to 100)
    pub brightness: f32,
    /// Exposure (-100 to 100, rescaled to stops in the tone stage)
    pub exposure: f32,
    /// Contrast around the 0.5 pivot (-100 to 100)
    pub contrast: f32,
    /// Highlights, luminance-masked (-100 to 100)
    pub highlights: f32,
    /// Shadows, luminance-masked (-100 to 100)
    pub shadows: f32,
}

impl AdjustmentSet {
    /// Create a new AdjustmentSet with all values at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Return a copy with every value clamped to the UI range.
    ///
    /// This is the single validation path for both slider input and
    /// suggested values from auto-adjust analyzers.
    pub fn clamped(&self) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(-100.0, 100.0) } else { 0.0 };
        Self {
            brightness: clamp(self.brightness),
            exposure: clamp(self.exposure),
            contrast: clamp(self.contrast),
            highlights: clamp(self.highlights),
            shadows: clamp(self.shadows),
        }
    }
}

/// Rotation state of the edit session.
///
/// Fine rotation is the continuous straightening angle; quarter turns are
/// discrete 90-degree steps. The effective aspect ratio inverts when the
/// quarter-turn count is odd.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RotationState {
    /// Straightening angle in degrees, clamped to [-45, 45].
    pub fine_degrees: f32,
    /// Number of clockwise 90-degree turns (0-3).
    pub quarter_turns: u8,
}

impl RotationState {
    /// Maximum magnitude of the fine straightening angle.
    pub const MAX_FINE_DEGREES: f32 = 45.0;

    /// Create a rotation state, clamping the angle and wrapping the turns.
    pub fn new(fine_degrees: f32, quarter_turns: u8) -> Self {
        Self {
            fine_degrees,
            quarter_turns,
        }
        .clamped()
    }

    /// Return a copy with the angle clamped to its valid range and the
    /// quarter-turn count wrapped modulo 4.
    pub fn clamped(self) -> Self {
        let fine = if self.fine_degrees.is_finite() {
            self.fine_degrees
                .clamp(-Self::MAX_FINE_DEGREES, Self::MAX_FINE_DEGREES)
        } else {
            0.0
        };
        Self {
            fine_degrees: fine,
            quarter_turns: self.quarter_turns % 4,
        }
    }

    /// Fine rotation angle in radians.
    pub fn fine_radians(&self) -> f32 {
        self.fine_degrees.to_radians()
    }

    /// Returns true if the quarter-turn count swaps width and height.
    #[inline]
    pub fn swaps_aspect(&self) -> bool {
        self.quarter_turns % 2 == 1
    }

    /// Aspect ratio of the displayed image given the source aspect (w/h).
    pub fn effective_aspect(&self, source_aspect: f32) -> f32 {
        if self.swaps_aspect() && source_aspect > 0.0 {
            1.0 / source_aspect
        } else {
            source_aspect
        }
    }

    /// Add one clockwise quarter turn.
    pub fn rotate_cw(&mut self) {
        self.quarter_turns = (self.quarter_turns + 1) % 4;
    }

    /// Add one counter-clockwise quarter turn.
    pub fn rotate_ccw(&mut self) {
        self.quarter_turns = (self.quarter_turns + 3) % 4;
    }
}
