//! Edit session: lifecycle, history, and the save bundle.
//!
//! One `EditSession` exists per photo being edited. It owns the render
//! surface, the current edit state (rotation, crop, adjustments, view), the
//! crop overlay controller, and an append-only snapshot history with a
//! cursor for undo/redo. Zoom and pan are transient and never enter
//! history.
//!
//! Lifecycle: `Loading` until the preview decode lands, then `Ready`;
//! a decode failure is terminal (`Failed`), every mutation on a session
//! that is not `Ready` is ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{DecodedPreview, PreviewImage};
use crate::overlay::{CropOverlayController, DragMode, OverlayEvent};
use crate::render::{RenderOptions, RenderSurface};
use crate::transform::crop::{constrain_crop, reconcile_crop, valid_bounds, CropRect, ValidBounds};
use crate::transform::mapping::FrameParams;
use crate::viewport::{ViewState, ViewportTransform};
use crate::{AdjustmentSet, RotationState};

/// Lifecycle state of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    /// Decode failed; terminal for this session.
    Failed,
}

/// Errors surfaced by the save path.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The session has no loaded image to save.
    #[error("no image is loaded")]
    NotLoaded,

    /// The save backend rejected or lost the request. The session state is
    /// untouched; the user retries or discards explicitly.
    #[error("save failed: {0}")]
    Backend(String),
}

/// The complete edit description handed to the save backend.
///
/// The backend applies this to the full-resolution source; the session
/// itself never touches full-resolution pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSpec {
    pub rotation: RotationState,
    /// `None` when cropping is disabled (full frame).
    pub crop: Option<CropRect>,
    pub adjustments: AdjustmentSet,
}

/// One history entry: the full edit state at a commit point.
///
/// Snapshots are restored wholesale; undo/redo never replays deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EditSnapshot {
    rotation: RotationState,
    crop_enabled: bool,
    crop: CropRect,
    adjustments: AdjustmentSet,
}

/// The editing state and history for one photo.
#[derive(Debug)]
pub struct EditSession {
    state: LoadState,
    surface: RenderSurface,
    container: (f32, f32),

    rotation: RotationState,
    crop_enabled: bool,
    crop: CropRect,
    adjustments: AdjustmentSet,
    view: ViewState,

    overlay: CropOverlayController,
    straighten_preview: bool,

    history: Vec<EditSnapshot>,
    cursor: usize,
}

impl EditSession {
    pub fn new(container_size: (f32, f32)) -> Self {
        Self {
            state: LoadState::Loading,
            surface: RenderSurface::new(),
            container: container_size,
            rotation: RotationState::default(),
            crop_enabled: false,
            crop: CropRect::full(),
            adjustments: AdjustmentSet::default(),
            view: ViewState::default(),
            overlay: CropOverlayController::new(),
            straighten_preview: false,
            history: Vec::new(),
            cursor: 0,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Install a decoded preview and transition to `Ready`.
    ///
    /// EXIF orientation arrives as the initial quarter-turn count; it is
    /// ordinary rotation state from here on, so the user can turn it back.
    pub fn image_loaded(&mut self, preview: DecodedPreview) {
        self.surface.upload(preview.image);
        self.rotation = RotationState::new(0.0, preview.initial_quarter_turns);
        self.crop_enabled = false;
        self.crop = CropRect::full();
        self.adjustments = AdjustmentSet::default();
        self.view = ViewState::default();
        self.straighten_preview = false;
        self.history = vec![self.snapshot()];
        self.cursor = 0;
        self.state = LoadState::Ready;
    }

    /// Record a decode failure. Terminal; the surface is torn down and all
    /// later mutations are ignored.
    pub fn load_failed(&mut self) {
        self.surface.clear();
        self.history.clear();
        self.state = LoadState::Failed;
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    pub fn set_container_size(&mut self, size: (f32, f32)) {
        self.container = size;
        self.view = self.viewport().clamp_view(self.view);
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    pub fn crop_enabled(&self) -> bool {
        self.crop_enabled
    }

    pub fn adjustments(&self) -> AdjustmentSet {
        self.adjustments
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn upload_count(&self) -> u64 {
        self.surface.upload_count()
    }

    /// The viewport transform for the current frame.
    pub fn viewport(&self) -> ViewportTransform {
        let image_size = self
            .surface
            .image()
            .map(|img| (img.width, img.height))
            .unwrap_or((0, 0));
        ViewportTransform::new(image_size, self.container, self.rotation, self.view)
    }

    /// Valid crop bounds at the current rotation.
    pub fn crop_bounds(&self) -> ValidBounds {
        valid_bounds(self.rotation.fine_degrees, self.viewport().effective_aspect())
    }

    // ------------------------------------------------------------------
    // Mutations (all gated on Ready, all but the view snapshotted)
    // ------------------------------------------------------------------

    /// Set the fine straightening angle. The crop is reconciled against the
    /// new inscribed bounds in the same step, so the snapshot is coherent.
    pub fn set_fine_rotation(&mut self, degrees: f32) {
        if !self.is_ready() {
            return;
        }
        let next = RotationState::new(degrees, self.rotation.quarter_turns);
        if next == self.rotation {
            return;
        }
        self.rotation = next;
        self.reconcile_crop_to_rotation();
        self.push_snapshot();
    }

    pub fn rotate_cw(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.rotation.rotate_cw();
        self.reconcile_crop_to_rotation();
        self.push_snapshot();
    }

    pub fn rotate_ccw(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.rotation.rotate_ccw();
        self.reconcile_crop_to_rotation();
        self.push_snapshot();
    }

    /// Set the tonal adjustments. Out-of-range and non-finite values are
    /// clamped, which also validates suggested values from auto-adjust.
    pub fn set_adjustments(&mut self, adjustments: AdjustmentSet) {
        if !self.is_ready() {
            return;
        }
        let clamped = adjustments.clamped();
        if clamped == self.adjustments {
            return;
        }
        self.adjustments = clamped;
        self.push_snapshot();
    }

    /// Set the crop rectangle directly (e.g. an aspect preset).
    pub fn set_crop(&mut self, rect: CropRect) {
        if !self.is_ready() {
            return;
        }
        let constrained = constrain_crop(rect, &self.crop_bounds());
        if constrained == self.crop && self.crop_enabled {
            return;
        }
        self.crop = constrained;
        self.crop_enabled = true;
        self.push_snapshot();
    }

    pub fn set_crop_enabled(&mut self, enabled: bool) {
        if !self.is_ready() || enabled == self.crop_enabled {
            return;
        }
        self.crop_enabled = enabled;
        self.push_snapshot();
    }

    /// Set zoom and pan. Clamped, never recorded in history.
    pub fn set_view(&mut self, view: ViewState) {
        if !self.is_ready() {
            return;
        }
        self.view = self.viewport().clamp_view(view);
    }

    pub fn set_straighten_preview(&mut self, active: bool) {
        self.straighten_preview = active;
    }

    fn reconcile_crop_to_rotation(&mut self) {
        if let Some(corrected) = reconcile_crop(self.crop, &self.crop_bounds()) {
            self.crop = corrected;
        }
    }

    // ------------------------------------------------------------------
    // Crop overlay pointer routing
    // ------------------------------------------------------------------

    /// Forward a pointer-down to the overlay. Returns the drag mode that
    /// started, if any.
    pub fn pointer_down(&mut self, sx: f32, sy: f32) -> Option<DragMode> {
        if !self.is_ready() {
            return None;
        }
        let viewport = self.viewport();
        self.overlay.pointer_down(sx, sy, &self.crop, &viewport)
    }

    /// Forward a pointer-move. During a drag the stored rectangle tracks
    /// every change so the overlay can draw it, but the frame keeps showing
    /// the full image and nothing enters history yet.
    pub fn pointer_move(&mut self, sx: f32, sy: f32) -> Option<OverlayEvent> {
        if !self.is_ready() {
            return None;
        }
        let viewport = self.viewport();
        let bounds = self.crop_bounds();
        let event = self.overlay.pointer_move(sx, sy, &viewport, &bounds);
        if let Some(OverlayEvent::Changed(rect)) = event {
            self.crop = rect;
        }
        event
    }

    /// Forward a pointer-up. The single `Committed` per drag is the one
    /// point a crop drag enters history and enables crop preview. A click
    /// that commits the state it started from records nothing.
    pub fn pointer_up(&mut self, sx: f32, sy: f32) -> Option<OverlayEvent> {
        if !self.is_ready() {
            return None;
        }
        let viewport = self.viewport();
        let bounds = self.crop_bounds();
        let event = self.overlay.pointer_up(sx, sy, &viewport, &bounds);
        if let Some(OverlayEvent::Committed(rect)) = event {
            self.crop = rect;
            self.crop_enabled = true;
            if self.history.get(self.cursor) != Some(&self.snapshot()) {
                self.push_snapshot();
            }
        }
        event
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    fn snapshot(&self) -> EditSnapshot {
        EditSnapshot {
            rotation: self.rotation,
            crop_enabled: self.crop_enabled,
            crop: self.crop,
            adjustments: self.adjustments,
        }
    }

    /// Append the current state after the cursor, discarding any redo tail.
    fn push_snapshot(&mut self) {
        self.history.truncate(self.cursor + 1);
        self.history.push(self.snapshot());
        self.cursor = self.history.len() - 1;
    }

    fn restore(&mut self, snapshot: EditSnapshot) {
        self.rotation = snapshot.rotation;
        self.crop_enabled = snapshot.crop_enabled;
        self.crop = snapshot.crop;
        self.adjustments = snapshot.adjustments;
        // The view is transient; re-clamp it against the restored rotation.
        self.view = self.viewport().clamp_view(self.view);
    }

    pub fn can_undo(&self) -> bool {
        self.is_ready() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.is_ready() && self.cursor + 1 < self.history.len()
    }

    /// Step back one snapshot. Restores the whole edit state at once.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        self.restore(self.history[self.cursor]);
        true
    }

    /// Step forward one snapshot.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        self.restore(self.history[self.cursor]);
        true
    }

    // ------------------------------------------------------------------
    // Save
    // ------------------------------------------------------------------

    /// Build the edit description for the save backend.
    ///
    /// Reads the session without mutating it: a backend failure leaves
    /// everything (history included) exactly as it was.
    pub fn save_bundle(&self) -> Result<RenderSpec, SaveError> {
        if !self.is_ready() {
            return Err(SaveError::NotLoaded);
        }
        Ok(RenderSpec {
            rotation: self.rotation,
            crop: self.crop_enabled.then_some(self.crop),
            adjustments: self.adjustments,
        })
    }

    /// Install the re-rendered preview after a confirmed save.
    ///
    /// The saved pixels become the new source: edit state and history reset
    /// to a fresh baseline, and the surface uploads for the second time.
    pub fn confirm_saved(&mut self, preview: PreviewImage) {
        if !self.is_ready() {
            return;
        }
        self.surface.upload(preview);
        self.rotation = RotationState::default();
        self.crop_enabled = false;
        self.crop = CropRect::full();
        self.adjustments = AdjustmentSet::default();
        self.straighten_preview = false;
        self.history = vec![self.snapshot()];
        self.cursor = 0;
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render the current frame into an RGB buffer.
    pub fn render_frame(&self, out_width: u32, out_height: u32) -> Vec<u8> {
        let viewport = self.viewport();
        let image_aspect = self
            .surface
            .image()
            .map(|img| img.aspect())
            .unwrap_or(0.0);
        let container_aspect = if self.container.1 > 0.0 {
            self.container.0 / self.container.1
        } else {
            0.0
        };

        let options = RenderOptions {
            frame: FrameParams {
                rotation: self.rotation,
                zoom: self.view.zoom,
                pan_x: self.view.pan_x,
                pan_y: self.view.pan_y,
                // Crop preview applies to the committed rectangle only; a
                // drag in progress keeps the full image on screen so the
                // overlay geometry matches what is displayed.
                active_crop: (self.crop_enabled && !self.overlay.is_dragging())
                    .then_some(self.crop),
                image_aspect,
                container_aspect,
            },
            adjustments: self.adjustments,
            straighten_guide: self
                .straighten_preview
                .then(|| valid_bounds(self.rotation.fine_degrees, viewport.effective_aspect())),
        };
        self.surface.render(&options, out_width, out_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_preview(width: u32, height: u32) -> DecodedPreview {
        DecodedPreview {
            image: PreviewImage::new(width, height, vec![128; (width * height * 3) as usize]),
            initial_quarter_turns: 0,
        }
    }

    fn ready_session() -> EditSession {
        let mut session = EditSession::new((800.0, 600.0));
        session.image_loaded(test_preview(1600, 1200));
        session
    }

    #[test]
    fn test_lifecycle_loading_to_ready() {
        let mut session = EditSession::new((800.0, 600.0));
        assert_eq!(session.state(), LoadState::Loading);
        assert!(!session.can_undo());

        session.image_loaded(test_preview(100, 100));
        assert_eq!(session.state(), LoadState::Ready);
        assert_eq!(session.upload_count(), 1);
    }

    #[test]
    fn test_load_failure_is_terminal() {
        let mut session = EditSession::new((800.0, 600.0));
        session.load_failed();
        assert_eq!(session.state(), LoadState::Failed);

        // Mutations on a failed session are ignored.
        session.set_fine_rotation(10.0);
        session.set_adjustments(AdjustmentSet {
            exposure: 50.0,
            ..Default::default()
        });
        assert_eq!(session.rotation(), RotationState::default());
        assert!(session.adjustments().is_default());
        assert!(session.save_bundle().is_err());
    }

    #[test]
    fn test_mutations_ignored_while_loading() {
        let mut session = EditSession::new((800.0, 600.0));
        session.set_fine_rotation(10.0);
        session.rotate_cw();
        assert_eq!(session.rotation(), RotationState::default());
    }

    #[test]
    fn test_exif_turns_seed_rotation() {
        let mut session = EditSession::new((800.0, 600.0));
        session.image_loaded(DecodedPreview {
            image: PreviewImage::new(4, 4, vec![0; 48]),
            initial_quarter_turns: 1,
        });
        assert_eq!(session.rotation().quarter_turns, 1);

        // The seeded turn is ordinary state: one CCW turn removes it.
        session.rotate_ccw();
        assert_eq!(session.rotation().quarter_turns, 0);
    }

    #[test]
    fn test_each_edit_pushes_one_snapshot() {
        let mut session = ready_session();
        assert!(!session.can_undo());

        session.set_fine_rotation(5.0);
        session.set_adjustments(AdjustmentSet {
            brightness: 20.0,
            ..Default::default()
        });
        session.rotate_cw();

        assert!(session.undo());
        assert_eq!(session.rotation().quarter_turns, 0);
        assert!(session.undo());
        assert!(session.adjustments().is_default());
        assert!(session.undo());
        assert_eq!(session.rotation().fine_degrees, 0.0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_noop_edit_pushes_nothing() {
        let mut session = ready_session();
        session.set_fine_rotation(0.0);
        session.set_adjustments(AdjustmentSet::default());
        session.set_crop_enabled(false);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut session = ready_session();
        session.set_fine_rotation(7.0);
        assert!(session.undo());
        assert_eq!(session.rotation().fine_degrees, 0.0);
        assert!(session.redo());
        assert_eq!(session.rotation().fine_degrees, 7.0);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_new_edit_truncates_redo_tail() {
        let mut session = ready_session();
        session.set_fine_rotation(5.0);
        session.set_fine_rotation(10.0);
        session.undo();
        assert!(session.can_redo());

        session.set_fine_rotation(-3.0);
        assert!(!session.can_redo());
        assert_eq!(session.rotation().fine_degrees, -3.0);

        session.undo();
        assert_eq!(session.rotation().fine_degrees, 5.0);
    }

    #[test]
    fn test_view_changes_skip_history() {
        let mut session = ready_session();
        session.set_view(ViewState {
            zoom: 2.0,
            pan_x: 0.1,
            pan_y: 0.0,
        });
        assert!(!session.can_undo());
        assert!((session.view().zoom - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_view_is_clamped() {
        let mut session = ready_session();
        session.set_view(ViewState {
            zoom: 1.0,
            pan_x: 0.9,
            pan_y: 0.0,
        });
        assert_eq!(session.view().pan_x, 0.0);
    }

    #[test]
    fn test_rotation_reconciles_crop() {
        let mut session = ready_session();
        session.set_crop(CropRect::full());
        session.set_fine_rotation(10.0);
        let bounds = session.crop_bounds();
        assert!(bounds.contains(&session.crop()));
    }

    #[test]
    fn test_crop_drag_commits_once() {
        let mut session = ready_session();
        session.set_crop(CropRect::new(0.1, 0.1, 0.5, 0.5));
        let undo_depth_before = {
            let mut n = 0;
            while session.can_undo() {
                session.undo();
                n += 1;
            }
            for _ in 0..n {
                session.redo();
            }
            n
        };

        // Start a move drag at the rect center and drag a little.
        let viewport = session.viewport();
        let (sx, sy) = viewport.normalized_to_screen(0.35, 0.35);
        assert!(session.pointer_down(sx, sy).is_some());

        assert!(matches!(
            session.pointer_move(sx + 10.0, sy),
            Some(OverlayEvent::Changed(_))
        ));
        assert!(matches!(
            session.pointer_move(sx + 20.0, sy),
            Some(OverlayEvent::Changed(_))
        ));
        assert!(matches!(
            session.pointer_up(sx + 20.0, sy),
            Some(OverlayEvent::Committed(_))
        ));

        // Exactly one new snapshot for the whole drag.
        let mut undo_depth_after = 0;
        while session.can_undo() {
            session.undo();
            undo_depth_after += 1;
        }
        assert_eq!(undo_depth_after, undo_depth_before + 1);
    }

    #[test]
    fn test_drag_previews_full_frame_until_commit() {
        // Left half red, right half blue; crop the red half but disable it.
        let width = 16u32;
        let height = 16u32;
        let mut pixels = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    pixels.extend_from_slice(&[255, 0, 0]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 255]);
                }
            }
        }
        let mut session = EditSession::new((800.0, 800.0));
        session.image_loaded(DecodedPreview {
            image: PreviewImage::new(width, height, pixels),
            initial_quarter_turns: 0,
        });
        session.set_crop(CropRect::new(0.0, 0.0, 0.5, 1.0));
        session.set_crop_enabled(false);

        let before = session.render_frame(32, 32);

        let (sx, sy) = session.viewport().normalized_to_screen(0.25, 0.5);
        assert!(session.pointer_down(sx, sy).is_some());
        assert!(matches!(
            session.pointer_move(sx + 5.0, sy),
            Some(OverlayEvent::Changed(_))
        ));

        // Mid-drag the frame still shows the full image, not the crop.
        let during = session.render_frame(32, 32);
        assert_eq!(before, during);
        assert!(!session.crop_enabled());

        // Releasing commits: the crop becomes active and previewable.
        assert!(matches!(
            session.pointer_up(sx + 5.0, sy),
            Some(OverlayEvent::Committed(_))
        ));
        assert!(session.crop_enabled());
        let after = session.render_frame(32, 32);
        assert_ne!(before, after);
    }

    #[test]
    fn test_click_without_movement_records_nothing() {
        let mut session = ready_session();
        session.set_crop(CropRect::new(0.2, 0.2, 0.5, 0.5));

        let (sx, sy) = session.viewport().normalized_to_screen(0.4, 0.4);
        assert!(session.pointer_down(sx, sy).is_some());
        assert!(matches!(
            session.pointer_up(sx, sy),
            Some(OverlayEvent::Committed(_))
        ));

        // One undo steps back over set_crop; the click itself added no
        // history entry.
        assert!(session.undo());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_render_frame_mismatched_buffer_is_background() {
        let mut session = EditSession::new((80.0, 60.0));
        session.image_loaded(DecodedPreview {
            image: PreviewImage {
                width: 8,
                height: 8,
                pixels: vec![0u8; 3],
            },
            initial_quarter_turns: 0,
        });
        let buf = session.render_frame(16, 16);
        for chunk in buf.chunks_exact(3) {
            assert_eq!(chunk, &crate::render::BACKGROUND_RGB);
        }
    }

    #[test]
    fn test_save_bundle_contents() {
        let mut session = ready_session();
        session.set_fine_rotation(4.0);
        session.rotate_cw();
        session.set_crop(CropRect::new(0.1, 0.1, 0.6, 0.6));
        session.set_adjustments(AdjustmentSet {
            exposure: 30.0,
            shadows: -10.0,
            ..Default::default()
        });

        let spec = session.save_bundle().expect("ready session");
        assert_eq!(spec.rotation.fine_degrees, 4.0);
        assert_eq!(spec.rotation.quarter_turns, 1);
        assert!(spec.crop.is_some());
        assert_eq!(spec.adjustments.exposure, 30.0);
    }

    #[test]
    fn test_save_bundle_without_crop() {
        let session = ready_session();
        let spec = session.save_bundle().expect("ready session");
        assert_eq!(spec.crop, None);
    }

    #[test]
    fn test_save_failure_leaves_session_untouched() {
        let mut session = ready_session();
        session.set_fine_rotation(9.0);
        let before_rotation = session.rotation();

        // A backend failure means confirm_saved never runs; the bundle call
        // itself must not have changed anything.
        let _ = session.save_bundle().expect("ready session");
        assert_eq!(session.rotation(), before_rotation);
        assert!(session.can_undo());
        assert_eq!(session.upload_count(), 1);
    }

    #[test]
    fn test_confirm_saved_resets_to_baseline() {
        let mut session = ready_session();
        session.set_fine_rotation(9.0);
        session.set_crop(CropRect::new(0.2, 0.2, 0.5, 0.5));
        assert_eq!(session.upload_count(), 1);

        session.confirm_saved(PreviewImage::new(4, 4, vec![10; 48]));
        assert_eq!(session.upload_count(), 2);
        assert_eq!(session.rotation(), RotationState::default());
        assert!(!session.crop_enabled());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_render_frame_before_load_is_background() {
        let session = EditSession::new((80.0, 60.0));
        let buf = session.render_frame(8, 6);
        assert_eq!(buf.len(), 8 * 6 * 3);
        assert_eq!(
            &buf[0..3],
            &crate::render::BACKGROUND_RGB,
            "unloaded session renders background"
        );
    }

    #[test]
    fn test_render_frame_ready() {
        let session = ready_session();
        let buf = session.render_frame(16, 12);
        // The canvas center shows the (gray) image.
        let idx = ((6 * 16 + 8) * 3) as usize;
        assert_eq!(buf[idx], 128);
    }

    #[test]
    fn test_serde_render_spec_round_trip() {
        let spec = RenderSpec {
            rotation: RotationState::new(3.5, 2),
            crop: Some(CropRect::new(0.1, 0.2, 0.3, 0.4)),
            adjustments: AdjustmentSet {
                highlights: -40.0,
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&spec).expect("serialize");
        let back: RenderSpec = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, spec);
    }
}
