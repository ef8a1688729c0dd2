//! Core types for preview decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for preview decoding.
///
/// A decode failure is terminal for the edit session: the caller shows an
/// error state and never attempts a partial render.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has zero pixels.
    #[error("Image has no pixels")]
    EmptyImage,
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// The clockwise quarter-turn count that seeds the session's rotation
    /// state. Mirror orientations contribute only their rotation component;
    /// the flip itself is baked into the pixels during decode.
    pub fn initial_quarter_turns(self) -> u8 {
        match self {
            Orientation::Normal | Orientation::FlipHorizontal => 0,
            Orientation::Rotate90CW | Orientation::Transverse => 1,
            Orientation::Rotate180 | Orientation::FlipVertical => 2,
            Orientation::Rotate270CW | Orientation::Transpose => 3,
        }
    }

    /// True when the decode step has to mirror the pixel data.
    pub fn needs_flip(self) -> bool {
        matches!(
            self,
            Orientation::FlipHorizontal
                | Orientation::FlipVertical
                | Orientation::Transpose
                | Orientation::Transverse
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded preview-resolution image with RGB pixel data.
///
/// The render surface takes exclusive ownership of one of these per edit
/// session; navigation replaces it wholesale.
#[derive(Debug, Clone)]
pub struct PreviewImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl PreviewImage {
    /// Create a new PreviewImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PreviewImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Aspect ratio (w/h); 0 for a degenerate image.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this is an empty/invalid image.
    ///
    /// A buffer whose length disagrees with the dimensions counts as
    /// invalid: the fields are public and cross the WASM boundary, so the
    /// render path treats a mismatch as background rather than trusting
    /// the dimensions for indexing.
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.pixels.len() != self.width as usize * self.height as usize * 3
    }
}
