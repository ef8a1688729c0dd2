//! Viewport geometry: fit scale, zoom bounds, and pan clamping for a
//! (possibly rotated) image inside a container.
//!
//! Everything here is pure arithmetic over the current session state; the
//! render surface and the crop overlay both consume the same transform so
//! screen and texture coordinates stay consistent.

use crate::RotationState;

/// Padding factor applied when fitting the image into the container.
pub const FIT_PADDING: f32 = 0.95;

/// Minimum permitted zoom.
pub const MIN_ZOOM: f32 = 0.5;

/// Display scale ceiling: at maximum zoom the image is shown at 400% of its
/// source pixel size.
pub const MAX_DISPLAY_SCALE: f32 = 4.0;

/// Fraction of the zoom overflow the user may pan across, leaving at least
/// 10% of the image reachable on screen.
pub const PAN_MARGIN: f32 = 0.9;

/// Zoom and pan for one edit session.
///
/// Pan is expressed as a fraction of the displayed image size per axis and
/// is always kept inside the clamp computed from the current zoom.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

/// Bounding box of an image rotated by `radians`, in units of the unrotated
/// image height (aspect = width / height).
pub fn rotated_bounds(aspect: f32, radians: f32) -> (f32, f32) {
    let cos = radians.cos().abs();
    let sin = radians.sin().abs();
    (aspect * cos + sin, aspect * sin + cos)
}

/// Geometry of the displayed image inside its container for one frame.
///
/// Construction clamps the supplied view through the zoom range and pan
/// clamp, so a `ViewportTransform` never holds an out-of-range view.
#[derive(Debug, Clone, Copy)]
pub struct ViewportTransform {
    image_width: f32,
    image_height: f32,
    container_width: f32,
    container_height: f32,
    rotation: RotationState,
    view: ViewState,
}

impl ViewportTransform {
    pub fn new(
        image_size: (u32, u32),
        container_size: (f32, f32),
        rotation: RotationState,
        view: ViewState,
    ) -> Self {
        let mut vt = Self {
            image_width: image_size.0 as f32,
            image_height: image_size.1 as f32,
            container_width: container_size.0,
            container_height: container_size.1,
            rotation: rotation.clamped(),
            view: ViewState::default(),
        };
        vt.view = vt.clamp_view(view);
        vt
    }

    /// True when any dimension is zero or non-finite; callers short-circuit
    /// to background rendering instead of dividing.
    pub fn is_degenerate(&self) -> bool {
        let ok = self.image_width > 0.0
            && self.image_height > 0.0
            && self.container_width > 0.0
            && self.container_height > 0.0
            && self.container_width.is_finite()
            && self.container_height.is_finite();
        !ok
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn container_size(&self) -> (f32, f32) {
        (self.container_width, self.container_height)
    }

    /// Aspect ratio of the displayed image (after quarter turns).
    pub fn effective_aspect(&self) -> f32 {
        if self.image_height <= 0.0 {
            return 0.0;
        }
        self.rotation
            .effective_aspect(self.image_width / self.image_height)
    }

    /// Displayed image size in source pixels (after quarter turns).
    pub fn effective_image_size(&self) -> (f32, f32) {
        if self.rotation.swaps_aspect() {
            (self.image_height, self.image_width)
        } else {
            (self.image_width, self.image_height)
        }
    }

    /// Fit scale: display pixels per source pixel such that the rotated
    /// bounding box of the image fills the container with `FIT_PADDING`.
    ///
    /// Width-constrained when the bounding box is wider (relative to its
    /// height) than the container, height-constrained otherwise. Returns 0
    /// for degenerate geometry.
    pub fn fit_scale(&self) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        let (eff_w, eff_h) = self.effective_image_size();
        let theta = self.rotation.fine_radians();
        let cos = theta.cos().abs();
        let sin = theta.sin().abs();
        let bounding_w = eff_w * cos + eff_h * sin;
        let bounding_h = eff_w * sin + eff_h * cos;
        if bounding_w <= 0.0 || bounding_h <= 0.0 {
            return 0.0;
        }

        let container_aspect = self.container_width / self.container_height;
        if bounding_w / bounding_h > container_aspect {
            FIT_PADDING * self.container_width / bounding_w
        } else {
            FIT_PADDING * self.container_height / bounding_h
        }
    }

    /// Permitted zoom range `[MIN_ZOOM, max]` where max corresponds to a
    /// 400% display scale (never below the minimum).
    pub fn zoom_range(&self) -> (f32, f32) {
        let fit = self.fit_scale();
        if fit <= 0.0 {
            return (MIN_ZOOM, MIN_ZOOM);
        }
        (MIN_ZOOM, (MAX_DISPLAY_SCALE / fit).max(MIN_ZOOM))
    }

    /// Maximum pan magnitude per axis for a given zoom.
    ///
    /// `(zoom - 1) / (2 * zoom)` is the overflow fraction hidden on each
    /// side; scaling by `PAN_MARGIN` guarantees at least 10% of the image
    /// stays reachable. Zoom at or below 1 forbids panning entirely.
    pub fn max_pan(zoom: f32) -> f32 {
        if zoom <= 0.0 || !zoom.is_finite() {
            return 0.0;
        }
        (((zoom - 1.0) / (2.0 * zoom)) * PAN_MARGIN).max(0.0)
    }

    /// Clamp an arbitrary view into the permitted zoom range and pan box.
    pub fn clamp_view(&self, view: ViewState) -> ViewState {
        let (min_zoom, max_zoom) = self.zoom_range();
        let zoom = if view.zoom.is_finite() {
            view.zoom.clamp(min_zoom, max_zoom)
        } else {
            1.0f32.clamp(min_zoom, max_zoom)
        };
        let limit = Self::max_pan(zoom);
        let clamp_pan = |p: f32| if p.is_finite() { p.clamp(-limit, limit) } else { 0.0 };
        ViewState {
            zoom,
            pan_x: clamp_pan(view.pan_x),
            pan_y: clamp_pan(view.pan_y),
        }
    }

    /// Displayed (unrotated) image size in screen pixels.
    pub fn display_size(&self) -> (f32, f32) {
        let (eff_w, eff_h) = self.effective_image_size();
        let scale = self.fit_scale() * self.view.zoom;
        (eff_w * scale, eff_h * scale)
    }

    /// Map a screen-pixel position to normalized image coordinates
    /// (post-quarter-turn space, [0,1] inside the image).
    pub fn screen_to_normalized(&self, sx: f32, sy: f32) -> (f32, f32) {
        let (disp_w, disp_h) = self.display_size();
        if disp_w <= 0.0 || disp_h <= 0.0 {
            return (0.5, 0.5);
        }
        let center_x = self.container_width / 2.0 + self.view.pan_x * disp_w;
        let center_y = self.container_height / 2.0 + self.view.pan_y * disp_h;
        ((sx - center_x) / disp_w + 0.5, (sy - center_y) / disp_h + 0.5)
    }

    /// Inverse of [`screen_to_normalized`](Self::screen_to_normalized).
    pub fn normalized_to_screen(&self, u: f32, v: f32) -> (f32, f32) {
        let (disp_w, disp_h) = self.display_size();
        let center_x = self.container_width / 2.0 + self.view.pan_x * disp_w;
        let center_y = self.container_height / 2.0 + self.view.pan_y * disp_h;
        ((u - 0.5) * disp_w + center_x, (v - 0.5) * disp_h + center_y)
    }
}
