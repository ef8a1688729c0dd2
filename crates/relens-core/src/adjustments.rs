//! The tone stage: per-pixel tonal adjustments.
//!
//! Applies the five session adjustments to RGB values in a fixed order:
//!
//! 1. Exposure (multiplicative, in stops)
//! 2. Brightness (additive)
//! 3. Contrast (pivot at 0.5)
//! 4. Highlights / shadows (luminance-masked)
//!
//! UI values arrive in -100..100 and are rescaled into shader-space ranges
//! by the constants below. The divisors are tuned to match the feel of a
//! reference photo editor and have no formal derivation.

use crate::luminance::{luminance, smoothstep};
use crate::AdjustmentSet;

/// Divisor turning UI brightness into an additive offset.
pub const BRIGHTNESS_SCALE: f32 = 350.0;

/// Divisor turning UI exposure into stops.
pub const EXPOSURE_SCALE: f32 = 130.0;

/// Divisor turning UI contrast into a pivot slope delta.
pub const CONTRAST_SCALE: f32 = 170.0;

/// Divisor turning UI highlights/shadows into mask amplitudes.
pub const TONAL_SCALE: f32 = 100.0;

/// Weight applied to the combined highlight/shadow delta.
pub const TONAL_DELTA_WEIGHT: f32 = 0.5;

/// Lower luminance edge of the highlight mask.
pub const HIGHLIGHT_MASK_LO: f32 = 0.3;

/// Upper luminance edge of the highlight mask.
pub const HIGHLIGHT_MASK_HI: f32 = 0.7;

/// Apply the full tone stage to one normalized RGB value.
///
/// With an all-zero `AdjustmentSet` this is a bit-exact identity for inputs
/// already in [0, 1]: every step short-circuits at zero and the final clamp
/// is a no-op.
pub fn apply_tone_stage(rgb: [f32; 3], adjustments: &AdjustmentSet) -> [f32; 3] {
    if adjustments.is_default() {
        return rgb;
    }

    let [mut r, mut g, mut b] = rgb;

    (r, g, b) = apply_exposure(r, g, b, adjustments.exposure);
    (r, g, b) = apply_brightness(r, g, b, adjustments.brightness);
    (r, g, b) = apply_contrast(r, g, b, adjustments.contrast);
    (r, g, b) = apply_tonal_masks(r, g, b, adjustments.highlights, adjustments.shadows);

    [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
}

/// Apply the tone stage to an RGB pixel buffer in place (3 bytes per pixel).
pub fn apply_tone_stage_u8(pixels: &mut [u8], adjustments: &AdjustmentSet) {
    // Early exit if no adjustments
    if adjustments.is_default() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(3) {
        let rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];
        let [r, g, b] = apply_tone_stage(rgb, adjustments);
        chunk[0] = (r * 255.0).round() as u8;
        chunk[1] = (g * 255.0).round() as u8;
        chunk[2] = (b * 255.0).round() as u8;
    }
}

/// Exposure: `output = input * 2^(exposure / EXPOSURE_SCALE)`.
#[inline]
fn apply_exposure(r: f32, g: f32, b: f32, exposure: f32) -> (f32, f32, f32) {
    if exposure == 0.0 {
        return (r, g, b);
    }
    let multiplier = 2.0_f32.powf(exposure / EXPOSURE_SCALE);
    (r * multiplier, g * multiplier, b * multiplier)
}

/// Brightness: additive offset on all channels.
#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, brightness: f32) -> (f32, f32, f32) {
    if brightness == 0.0 {
        return (r, g, b);
    }
    let offset = brightness / BRIGHTNESS_SCALE;
    (r + offset, g + offset, b + offset)
}

/// Contrast: `output = (input - 0.5) * factor + 0.5`.
#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, contrast: f32) -> (f32, f32, f32) {
    if contrast == 0.0 {
        return (r, g, b);
    }
    let factor = 1.0 + contrast / CONTRAST_SCALE;
    let midpoint = 0.5;
    (
        (r - midpoint) * factor + midpoint,
        (g - midpoint) * factor + midpoint,
        (b - midpoint) * factor + midpoint,
    )
}

/// Luminance-masked highlights and shadows, applied as a single delta.
///
/// The highlight mask ramps over luminance 0.3..0.7; the shadow mask is its
/// complement, so the two adjustments partition the tonal range smoothly.
#[inline]
fn apply_tonal_masks(r: f32, g: f32, b: f32, highlights: f32, shadows: f32) -> (f32, f32, f32) {
    if highlights == 0.0 && shadows == 0.0 {
        return (r, g, b);
    }
    let lum = luminance(r, g, b);
    let highlight_mask = smoothstep(HIGHLIGHT_MASK_LO, HIGHLIGHT_MASK_HI, lum);
    let shadow_mask = 1.0 - highlight_mask;

    let delta = (highlights / TONAL_SCALE * highlight_mask
        + shadows / TONAL_SCALE * shadow_mask)
        * TONAL_DELTA_WEIGHT;

    (r + delta, g + delta, b + delta)
}
