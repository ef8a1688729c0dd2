//! Preview decoding WASM bindings.
//!
//! Exposes the relens-core preview decoder to JavaScript. Decoding is
//! synchronous; call it from a Web Worker so the UI thread stays responsive.
//!
//! # Example
//!
//! ```typescript
//! import { decode_preview } from '@relens/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const preview = decode_preview(bytes);
//! console.log(`${preview.width}x${preview.height}, turns: ${preview.initial_quarter_turns}`);
//! ```

use crate::types::JsPreviewImage;
use relens_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG preview from bytes.
///
/// EXIF mirror orientations are baked into the pixels; the rotation
/// component is reported through `initial_quarter_turns` on the result so
/// the session keeps it editable.
///
/// # Errors
///
/// Returns an error if the bytes cannot be decoded or the result has no
/// pixels. A decode error is terminal for the edit session.
#[wasm_bindgen]
pub fn decode_preview(bytes: &[u8]) -> Result<JsPreviewImage, JsValue> {
    decode::decode_preview(bytes)
        .map(JsPreviewImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// EXIF orientation of image bytes as the raw 1-8 value, for callers that
/// only need the metadata (e.g. grid thumbnails). Missing or unreadable
/// EXIF reports 1 (normal).
#[wasm_bindgen]
pub fn exif_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
