//! Edit session WASM bindings.
//!
//! Wraps [`relens_core::EditSession`] in a JavaScript-owned object. The UI
//! forwards pointer events and control changes here, polls `render` for
//! frames, and pulls the save bundle as a plain JS object when the user
//! saves.

use js_sys::Uint8Array;
use relens_core::transform::CropRect;
use relens_core::viewport::ViewState;
use relens_core::{AdjustmentSet, EditSession, LoadState};
use wasm_bindgen::prelude::*;

use crate::types::JsPreviewImage;

/// The editing state for one photo, owned by JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session for a canvas of the given size (CSS pixels).
    /// The session starts in the loading state.
    #[wasm_bindgen(constructor)]
    pub fn new(container_width: f32, container_height: f32) -> JsEditSession {
        JsEditSession {
            inner: EditSession::new((container_width, container_height)),
        }
    }

    /// Lifecycle state: "loading", "ready" or "failed".
    pub fn state(&self) -> String {
        match self.inner.state() {
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Failed => "failed",
        }
        .to_string()
    }

    /// Install a decoded preview and transition to ready.
    pub fn load_image(&mut self, image: &JsPreviewImage) {
        self.inner.image_loaded(image.to_decoded());
    }

    /// Record a decode failure. Terminal for this session.
    pub fn load_failed(&mut self) {
        web_sys::console::warn_1(&"relens: preview decode failed, session unusable".into());
        self.inner.load_failed();
    }

    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.inner.set_container_size((width, height));
    }

    // ------------------------------------------------------------------
    // Edit controls
    // ------------------------------------------------------------------

    /// Set the fine straightening angle in degrees (clamped to [-45, 45]).
    pub fn set_fine_rotation(&mut self, degrees: f32) {
        self.inner.set_fine_rotation(degrees);
    }

    pub fn rotate_cw(&mut self) {
        self.inner.rotate_cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.inner.rotate_ccw();
    }

    /// Set all tonal adjustments at once. Values are UI range -100 to 100;
    /// out-of-range input is clamped, not rejected.
    pub fn set_adjustments(
        &mut self,
        brightness: f32,
        exposure: f32,
        contrast: f32,
        highlights: f32,
        shadows: f32,
    ) {
        self.inner.set_adjustments(AdjustmentSet {
            brightness,
            exposure,
            contrast,
            highlights,
            shadows,
        });
    }

    /// Set the crop rectangle in normalized coordinates; enables cropping.
    pub fn set_crop(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.inner.set_crop(CropRect::new(x, y, width, height));
    }

    pub fn set_crop_enabled(&mut self, enabled: bool) {
        self.inner.set_crop_enabled(enabled);
    }

    /// Set zoom and pan. Clamped and never recorded in history.
    pub fn set_view(&mut self, zoom: f32, pan_x: f32, pan_y: f32) {
        self.inner.set_view(ViewState { zoom, pan_x, pan_y });
    }

    pub fn set_straighten_preview(&mut self, active: bool) {
        self.inner.set_straighten_preview(active);
    }

    /// Permitted zoom range as [min, max].
    pub fn zoom_range(&self) -> Vec<f32> {
        let (lo, hi) = self.inner.viewport().zoom_range();
        vec![lo, hi]
    }

    // ------------------------------------------------------------------
    // Crop overlay pointer events (screen pixels)
    // ------------------------------------------------------------------

    /// Returns true when the pointer hit the crop rectangle and a drag
    /// started.
    pub fn pointer_down(&mut self, sx: f32, sy: f32) -> bool {
        self.inner.pointer_down(sx, sy).is_some()
    }

    /// Returns true when an active drag changed the rectangle.
    pub fn pointer_move(&mut self, sx: f32, sy: f32) -> bool {
        self.inner.pointer_move(sx, sy).is_some()
    }

    /// Returns true when a drag committed (exactly once per drag).
    pub fn pointer_up(&mut self, sx: f32, sy: f32) -> bool {
        self.inner.pointer_up(sx, sy).is_some()
    }

    /// Aspect label for the current crop ("16:9", "1:1", ...).
    pub fn aspect_label(&self) -> String {
        relens_core::overlay::aspect_label(
            &self.inner.crop(),
            self.inner.viewport().effective_aspect(),
        )
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    // ------------------------------------------------------------------
    // Rendering and save
    // ------------------------------------------------------------------

    /// Render the current frame as an RGB Uint8Array of
    /// `width * height * 3` bytes.
    pub fn render(&self, width: u32, height: u32) -> Uint8Array {
        let buffer = self.inner.render_frame(width, height);
        Uint8Array::from(buffer.as_slice())
    }

    /// Number of pixel-buffer uploads so far (one per load, one per
    /// confirmed save).
    pub fn upload_count(&self) -> u32 {
        self.inner.upload_count() as u32
    }

    /// The edit description for the save backend as a plain JS object:
    /// `{ rotation, crop, adjustments }`.
    ///
    /// Reads the session without mutating it; if the backend fails, the
    /// session (history included) is exactly as before the call.
    pub fn save_bundle(&self) -> Result<JsValue, JsValue> {
        let spec = self
            .inner
            .save_bundle()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&spec).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Install the re-rendered preview after the backend confirmed a save.
    /// Resets edit state and history to a fresh baseline.
    pub fn confirm_saved(&mut self, image: &JsPreviewImage) {
        self.inner.confirm_saved(image.to_preview());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_session() -> JsEditSession {
        let mut session = JsEditSession::new(800.0, 600.0);
        let image = JsPreviewImage::new(16, 12, vec![100u8; 16 * 12 * 3]);
        session.load_image(&image);
        session
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = JsEditSession::new(800.0, 600.0);
        assert_eq!(session.state(), "loading");

        let image = JsPreviewImage::new(4, 4, vec![0u8; 48]);
        session.load_image(&image);
        assert_eq!(session.state(), "ready");
        assert_eq!(session.upload_count(), 1);
    }

    #[test]
    fn test_edit_and_undo_through_binding() {
        let mut session = loaded_session();
        session.set_fine_rotation(10.0);
        session.set_adjustments(0.0, 25.0, 0.0, 0.0, 0.0);
        assert!(session.can_undo());

        assert!(session.undo());
        assert!(session.undo());
        assert!(!session.can_undo());
        assert!(session.can_redo());
    }

    #[test]
    fn test_zoom_range_shape() {
        let session = loaded_session();
        let range = session.zoom_range();
        assert_eq!(range.len(), 2);
        assert!(range[0] <= range[1]);
    }

    #[test]
    fn test_aspect_label_for_full_crop() {
        let session = loaded_session();
        // 16x12 image, full-frame crop: 4:3.
        assert_eq!(session.aspect_label(), "4:3");
    }
}
