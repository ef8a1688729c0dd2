//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Relens
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use relens_core::decode::{DecodedPreview, PreviewImage};
use wasm_bindgen::prelude::*;

/// A decoded preview wrapper for JavaScript.
///
/// Wraps the core `PreviewImage` plus the EXIF-derived initial quarter-turn
/// count and provides a JavaScript-friendly interface.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it into
/// JavaScript memory as a `Uint8Array`; `free()` releases the WASM side
/// immediately, otherwise wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsPreviewImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    initial_quarter_turns: u8,
}

#[wasm_bindgen]
impl JsPreviewImage {
    /// Create a new JsPreviewImage from dimensions and RGB pixel data
    /// (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPreviewImage {
        JsPreviewImage {
            width,
            height,
            pixels,
            initial_quarter_turns: 0,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Clockwise quarter turns suggested by the EXIF orientation.
    #[wasm_bindgen(getter)]
    pub fn initial_quarter_turns(&self) -> u8 {
        self.initial_quarter_turns
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: this creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPreviewImage {
    /// Internal constructor used by the decode bindings.
    pub(crate) fn from_decoded(preview: DecodedPreview) -> Self {
        Self {
            width: preview.image.width,
            height: preview.image.height,
            pixels: preview.image.pixels,
            initial_quarter_turns: preview.initial_quarter_turns,
        }
    }

    /// Convert back into the core pair for session loading.
    ///
    /// Note: this clones the pixel data. Dimensions and buffer arrive from
    /// JavaScript unchecked; the core treats any mismatch as an empty image,
    /// so no validation happens here.
    pub(crate) fn to_decoded(&self) -> DecodedPreview {
        DecodedPreview {
            image: self.to_preview(),
            initial_quarter_turns: self.initial_quarter_turns,
        }
    }

    pub(crate) fn to_preview(&self) -> PreviewImage {
        PreviewImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_preview_image_creation() {
        let img = JsPreviewImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
        assert_eq!(img.initial_quarter_turns(), 0);
    }

    #[test]
    fn test_js_preview_image_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsPreviewImage::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_from_decoded_carries_turns() {
        let decoded = DecodedPreview {
            image: PreviewImage::new(4, 2, vec![0u8; 24]),
            initial_quarter_turns: 3,
        };
        let js_img = JsPreviewImage::from_decoded(decoded);
        assert_eq!(js_img.width(), 4);
        assert_eq!(js_img.initial_quarter_turns(), 3);
    }

    #[test]
    fn test_to_decoded_round_trip() {
        let js_img = JsPreviewImage::new(2, 2, vec![128u8; 12]);
        let decoded = js_img.to_decoded();
        assert_eq!(decoded.image.width, 2);
        assert_eq!(decoded.image.pixels.len(), 12);
        assert_eq!(decoded.initial_quarter_turns, 0);
    }
}
