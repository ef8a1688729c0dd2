//! Preview decoding for Relens.
//!
//! The editor consumes preview-resolution JPEG/PNG bytes from the library
//! browser and decodes them into the RGB buffer the render surface samples.
//! EXIF orientation is reported as an initial quarter-turn count rather than
//! baked into the pixels, so the display rotation stays editable.
//!
//! All operations are synchronous; the caller is responsible for running
//! the decode off the interactive path (e.g. in a Web Worker via the WASM
//! bindings).

mod preview;
mod types;

pub use preview::{decode_preview, get_orientation, DecodedPreview};
pub use types::{DecodeError, Orientation, PreviewImage};
