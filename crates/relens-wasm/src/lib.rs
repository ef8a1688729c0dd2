//! Relens WASM - WebAssembly bindings for Relens
//!
//! This crate exposes the relens-core editing engine to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Preview decoding bindings (JPEG/PNG with EXIF orientation)
//! - `session` - The edit session: controls, pointer events, history, save
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_preview, JsEditSession } from '@relens/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession(canvas.width, canvas.height);
//! session.load_image(decode_preview(bytes));
//! const frame = session.render(canvas.width, canvas.height);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod session;
mod types;

// Re-export public types
pub use decode::{decode_preview, exif_orientation};
pub use session::JsEditSession;
pub use types::JsPreviewImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
