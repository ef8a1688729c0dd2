//! Interactive crop overlay: hit testing, drag state, and commit semantics.
//!
//! The controller is a small state machine (idle or dragging) driven by
//! pointer events in screen pixels. While a drag is active every move emits
//! a [`OverlayEvent::Changed`] with the constrained rectangle so the UI can
//! preview it; releasing the pointer emits exactly one
//! [`OverlayEvent::Committed`], strictly after the last change, which is the
//! only point the session records history.

use crate::transform::crop::{constrain_crop, CropRect, ValidBounds, MIN_CROP_SIZE};
use crate::viewport::ViewportTransform;

/// Hit radius around corner and edge handles, in screen pixels.
pub const HANDLE_RADIUS_PX: f32 = 12.0;

/// Relative tolerance when matching the crop aspect to a named ratio.
pub const ASPECT_TOLERANCE: f32 = 0.02;

/// Named aspect ratios shown in the overlay label.
const NAMED_ASPECTS: [(f32, &str); 9] = [
    (1.0, "1:1"),
    (16.0 / 9.0, "16:9"),
    (9.0 / 16.0, "9:16"),
    (4.0 / 3.0, "4:3"),
    (3.0 / 4.0, "3:4"),
    (3.0 / 2.0, "3:2"),
    (2.0 / 3.0, "2:3"),
    (5.0 / 4.0, "5:4"),
    (4.0 / 5.0, "4:5"),
];

/// Which part of the crop rectangle a drag manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Move,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

/// Events produced by the overlay while the user drags.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayEvent {
    /// The rectangle changed during an active drag; preview only.
    Changed(CropRect),
    /// The drag ended; record this rectangle in history.
    Committed(CropRect),
}

#[derive(Debug, Clone, Copy)]
struct DragSession {
    mode: DragMode,
    start_pointer: (f32, f32),
    start_rect: CropRect,
}

/// Idle/dragging state machine for the crop overlay.
#[derive(Debug, Default)]
pub struct CropOverlayController {
    session: Option<DragSession>,
}

impl CropOverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Classify a screen position against the crop rectangle.
    ///
    /// Corners win over edges, edges over the interior; outside the
    /// rectangle (and all handles) there is no hit.
    pub fn hit_test(
        &self,
        sx: f32,
        sy: f32,
        rect: &CropRect,
        viewport: &ViewportTransform,
    ) -> Option<DragMode> {
        let (left, top) = viewport.normalized_to_screen(rect.x, rect.y);
        let (right, bottom) = viewport.normalized_to_screen(rect.right(), rect.bottom());

        let near = |a: f32, b: f32| (a - b).abs() <= HANDLE_RADIUS_PX;
        let within_x = sx >= left - HANDLE_RADIUS_PX && sx <= right + HANDLE_RADIUS_PX;
        let within_y = sy >= top - HANDLE_RADIUS_PX && sy <= bottom + HANDLE_RADIUS_PX;

        if near(sx, left) && near(sy, top) {
            return Some(DragMode::TopLeft);
        }
        if near(sx, right) && near(sy, top) {
            return Some(DragMode::TopRight);
        }
        if near(sx, left) && near(sy, bottom) {
            return Some(DragMode::BottomLeft);
        }
        if near(sx, right) && near(sy, bottom) {
            return Some(DragMode::BottomRight);
        }

        if near(sy, top) && within_x {
            return Some(DragMode::Top);
        }
        if near(sy, bottom) && within_x {
            return Some(DragMode::Bottom);
        }
        if near(sx, left) && within_y {
            return Some(DragMode::Left);
        }
        if near(sx, right) && within_y {
            return Some(DragMode::Right);
        }

        if sx > left && sx < right && sy > top && sy < bottom {
            return Some(DragMode::Move);
        }
        None
    }

    /// Begin a drag if the pointer hits the rectangle. Returns the mode
    /// started, or `None` if the position misses (or a drag is already
    /// active, in which case the event is ignored).
    pub fn pointer_down(
        &mut self,
        sx: f32,
        sy: f32,
        rect: &CropRect,
        viewport: &ViewportTransform,
    ) -> Option<DragMode> {
        if self.session.is_some() {
            return None;
        }
        let mode = self.hit_test(sx, sy, rect, viewport)?;
        self.session = Some(DragSession {
            mode,
            start_pointer: (sx, sy),
            start_rect: *rect,
        });
        Some(mode)
    }

    /// Update an active drag. Emits `Changed` with the constrained
    /// rectangle; `None` when idle.
    pub fn pointer_move(
        &mut self,
        sx: f32,
        sy: f32,
        viewport: &ViewportTransform,
        bounds: &ValidBounds,
    ) -> Option<OverlayEvent> {
        let session = self.session.as_ref()?;
        let rect = Self::drag_rect(session, sx, sy, viewport, bounds);
        Some(OverlayEvent::Changed(rect))
    }

    /// End an active drag. Emits exactly one `Committed` per drag, always
    /// after any `Changed` from earlier moves; `None` when idle.
    pub fn pointer_up(
        &mut self,
        sx: f32,
        sy: f32,
        viewport: &ViewportTransform,
        bounds: &ValidBounds,
    ) -> Option<OverlayEvent> {
        let session = self.session.take()?;
        let rect = Self::drag_rect(&session, sx, sy, viewport, bounds);
        Some(OverlayEvent::Committed(rect))
    }

    /// Abandon any active drag without committing.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    fn drag_rect(
        session: &DragSession,
        sx: f32,
        sy: f32,
        viewport: &ViewportTransform,
        bounds: &ValidBounds,
    ) -> CropRect {
        let (disp_w, disp_h) = viewport.display_size();
        if disp_w <= 0.0 || disp_h <= 0.0 {
            return constrain_crop(session.start_rect, bounds);
        }
        let dx = (sx - session.start_pointer.0) / disp_w;
        let dy = (sy - session.start_pointer.1) / disp_h;
        let raw = apply_drag(session.mode, &session.start_rect, dx, dy);
        constrain_crop(raw, bounds)
    }
}

/// Apply a drag delta to the rectangle captured at pointer-down.
///
/// Edges opposite the dragged handle stay anchored; the dragged edges stop
/// at `MIN_CROP_SIZE` from their anchor so the rectangle never inverts.
fn apply_drag(mode: DragMode, start: &CropRect, dx: f32, dy: f32) -> CropRect {
    if mode == DragMode::Move {
        return CropRect::new(start.x + dx, start.y + dy, start.width, start.height);
    }

    let mut left = start.x;
    let mut top = start.y;
    let mut right = start.right();
    let mut bottom = start.bottom();

    let moves_left = matches!(mode, DragMode::TopLeft | DragMode::BottomLeft | DragMode::Left);
    let moves_right = matches!(mode, DragMode::TopRight | DragMode::BottomRight | DragMode::Right);
    let moves_top = matches!(mode, DragMode::TopLeft | DragMode::TopRight | DragMode::Top);
    let moves_bottom = matches!(
        mode,
        DragMode::BottomLeft | DragMode::BottomRight | DragMode::Bottom
    );

    if moves_left {
        left = (left + dx).min(right - MIN_CROP_SIZE);
    }
    if moves_right {
        right = (right + dx).max(left + MIN_CROP_SIZE);
    }
    if moves_top {
        top = (top + dy).min(bottom - MIN_CROP_SIZE);
    }
    if moves_bottom {
        bottom = (bottom + dy).max(top + MIN_CROP_SIZE);
    }

    CropRect::new(left, top, right - left, bottom - top)
}

/// Human-readable aspect label for the overlay.
///
/// Matches the named ratio table within [`ASPECT_TOLERANCE`], then small
/// integer ratios, and falls back to a decimal form.
pub fn aspect_label(rect: &CropRect, effective_aspect: f32) -> String {
    let aspect = rect.pixel_aspect(effective_aspect);
    if !aspect.is_finite() || aspect <= 0.0 {
        return "--".to_string();
    }

    for (value, name) in NAMED_ASPECTS {
        if (aspect - value).abs() / value <= ASPECT_TOLERANCE {
            return name.to_string();
        }
    }

    for denom in 1u32..=12 {
        for numer in 1u32..=12 {
            let value = numer as f32 / denom as f32;
            if (aspect - value).abs() / value <= ASPECT_TOLERANCE {
                return format!("{}:{}", numer, denom);
            }
        }
    }

    format!("{:.2}:1", aspect)
}

/// Rule-of-thirds line positions inside a crop rectangle, in screen
/// pixels: (vertical line xs, horizontal line ys).
pub fn third_lines(rect: &CropRect, viewport: &ViewportTransform) -> ([f32; 2], [f32; 2]) {
    let (x1, y1) = viewport.normalized_to_screen(
        rect.x + rect.width / 3.0,
        rect.y + rect.height / 3.0,
    );
    let (x2, y2) = viewport.normalized_to_screen(
        rect.x + rect.width * 2.0 / 3.0,
        rect.y + rect.height * 2.0 / 3.0,
    );
    ([x1, x2], [y1, y2])
}
