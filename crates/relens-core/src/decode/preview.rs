//! Preview decoding with EXIF orientation handling.
//!
//! The editor works on preview-resolution JPEG or PNG data. Rather than
//! baking the EXIF rotation into the pixel buffer, decoding reports it as a
//! quarter-turn count that seeds the session's rotation state, so the
//! quarter-turn permutation in the mapping pipeline does the work at render
//! time. Only mirror orientations touch the pixels.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation, PreviewImage};

/// A decoded preview plus the rotation it should start with.
#[derive(Debug, Clone)]
pub struct DecodedPreview {
    pub image: PreviewImage,
    /// Clockwise quarter turns suggested by the EXIF orientation.
    pub initial_quarter_turns: u8,
}

/// Decode a JPEG or PNG preview from bytes.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes cannot be decoded and
/// `DecodeError::EmptyImage` if the result has no pixels.
pub fn decode_preview(bytes: &[u8]) -> Result<DecodedPreview, DecodeError> {
    // Extract EXIF orientation before decoding; missing EXIF means Normal.
    let orientation = extract_orientation(bytes);

    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let img = apply_mirror(img, orientation);
    let image = PreviewImage::from_rgb_image(img.into_rgb8());
    if image.is_empty() {
        return Err(DecodeError::EmptyImage);
    }

    Ok(DecodedPreview {
        image,
        initial_quarter_turns: orientation.initial_quarter_turns(),
    })
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Bake the mirror component of an orientation into the pixels.
///
/// The rotation component is expressed as quarter turns instead, so this
/// only ever flips.
fn apply_mirror(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    if !orientation.needs_flip() {
        return img;
    }
    match orientation {
        // FlipVertical pairs with the 180-degree turn reported alongside it;
        // fliph + 180 turns is the same transform.
        Orientation::FlipHorizontal | Orientation::FlipVertical => img.fliph(),
        // Transpose/Transverse are a horizontal flip followed by a rotation
        // that the quarter-turn count already carries.
        Orientation::Transpose | Orientation::Transverse => img.fliph(),
        _ => img,
    }
}

/// Extract the EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
