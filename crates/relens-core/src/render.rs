//! CPU render surface: evaluates the coordinate mapping and tone stage for
//! every output pixel.
//!
//! The surface owns the decoded preview for one editing session. The pixel
//! buffer is uploaded exactly once per loaded image (and once more after a
//! confirmed save); every control change only re-evaluates the mapping on
//! the next frame. The same algorithm retargets to a fragment shader for
//! real-time use; this CPU loop is the backend-agnostic reference and the
//! offline preview path.

use crate::adjustments::apply_tone_stage;
use crate::decode::PreviewImage;
use crate::transform::crop::ValidBounds;
use crate::transform::mapping::{map_canvas, FrameParams};
use crate::AdjustmentSet;

/// Background color for pixels outside the image.
pub const BACKGROUND_RGB: [u8; 3] = [18, 18, 18];

/// Brightness multiplier for pixels outside the inscribed rectangle in the
/// straighten preview. Tuned, not derived.
pub const STRAIGHTEN_DIM_FACTOR: f32 = 0.35;

/// Dash length of the straighten grid, in normalized image units.
pub const GRID_DASH_LEN: f32 = 0.02;

/// Gap length of the straighten grid, in normalized image units.
pub const GRID_GAP_LEN: f32 = 0.015;

/// Half-width of grid and border lines, in normalized image units.
pub const GRID_LINE_WIDTH: f32 = 0.004;

/// Per-frame render inputs.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub frame: FrameParams,
    pub adjustments: AdjustmentSet,
    /// The inscribed auto-crop bounds to visualize while straightening;
    /// `None` outside the straighten preview.
    pub straighten_guide: Option<ValidBounds>,
}

/// Owns the uploaded preview buffer for one editing session.
#[derive(Debug, Default)]
pub struct RenderSurface {
    image: Option<PreviewImage>,
    uploads: u64,
}

impl RenderSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the session image. The previous buffer is torn down before
    /// the new one is installed; two images never coexist.
    pub fn upload(&mut self, image: PreviewImage) {
        self.image.take();
        self.image = Some(image);
        self.uploads += 1;
    }

    /// Drop the current image (session teardown).
    pub fn clear(&mut self) {
        self.image = None;
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn image(&self) -> Option<&PreviewImage> {
        self.image.as_ref()
    }

    /// Number of buffer uploads since creation. Exactly one per loaded
    /// image plus one per confirmed save; render never uploads.
    pub fn upload_count(&self) -> u64 {
        self.uploads
    }

    /// Render one frame into a new RGB buffer of `out_width * out_height`.
    ///
    /// Degenerate output dimensions or a missing/empty image produce pure
    /// background; no pixel arithmetic can divide by zero.
    pub fn render(&self, options: &RenderOptions, out_width: u32, out_height: u32) -> Vec<u8> {
        let mut output = vec![0u8; out_width as usize * out_height as usize * 3];
        for chunk in output.chunks_exact_mut(3) {
            chunk.copy_from_slice(&BACKGROUND_RGB);
        }

        let Some(image) = self.image.as_ref() else {
            return output;
        };
        if image.is_empty() || out_width == 0 || out_height == 0 {
            return output;
        }

        for out_y in 0..out_height {
            for out_x in 0..out_width {
                let u = (out_x as f32 + 0.5) / out_width as f32;
                let v = (out_y as f32 + 0.5) / out_height as f32;

                let Some(mapped) = map_canvas(u, v, &options.frame) else {
                    continue;
                };

                let mut rgb = sample_bilinear(image, mapped.texel.0, mapped.texel.1);
                rgb = apply_tone_stage(rgb, &options.adjustments);
                if let Some(guide) = &options.straighten_guide {
                    rgb = apply_straighten_guide(rgb, mapped.image, guide);
                }

                let idx = (out_y as usize * out_width as usize + out_x as usize) * 3;
                output[idx] = (rgb[0].clamp(0.0, 1.0) * 255.0).round() as u8;
                output[idx + 1] = (rgb[1].clamp(0.0, 1.0) * 255.0).round() as u8;
                output[idx + 2] = (rgb[2].clamp(0.0, 1.0) * 255.0).round() as u8;
            }
        }

        output
    }
}

/// Sample a normalized texel coordinate with bilinear interpolation.
///
/// Coordinates are clamped to the image; out-of-image background is decided
/// by the mapping, not here.
fn sample_bilinear(image: &PreviewImage, tx: f32, ty: f32) -> [f32; 3] {
    let w = image.width as usize;
    let h = image.height as usize;

    let x = (tx.clamp(0.0, 1.0) * (w - 1) as f32).max(0.0);
    let y = (ty.clamp(0.0, 1.0) * (h - 1) as f32).max(0.0);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = pixel_at(image, x0, y0);
    let p10 = pixel_at(image, x1, y0);
    let p01 = pixel_at(image, x0, y1);
    let p11 = pixel_at(image, x1, y1);

    let mut result = [0.0f32; 3];
    for i in 0..3 {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    result
}

#[inline]
fn pixel_at(image: &PreviewImage, px: usize, py: usize) -> [f32; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f32 / 255.0,
        image.pixels[idx + 1] as f32 / 255.0,
        image.pixels[idx + 2] as f32 / 255.0,
    ]
}

/// Straighten-preview decoration: dim everything outside the inscribed
/// rectangle, draw a solid border at its boundary and a dashed
/// rule-of-thirds grid inside it.
fn apply_straighten_guide(rgb: [f32; 3], image_coord: (f32, f32), guide: &ValidBounds) -> [f32; 3] {
    let (ix, iy) = image_coord;

    let inside = ix >= guide.min_x && ix <= guide.max_x && iy >= guide.min_y && iy <= guide.max_y;
    if !inside {
        return [
            rgb[0] * STRAIGHTEN_DIM_FACTOR,
            rgb[1] * STRAIGHTEN_DIM_FACTOR,
            rgb[2] * STRAIGHTEN_DIM_FACTOR,
        ];
    }

    let near = |a: f32, b: f32| (a - b).abs() <= GRID_LINE_WIDTH;

    // Solid border at the inscribed boundary.
    if near(ix, guide.min_x) || near(ix, guide.max_x) || near(iy, guide.min_y) || near(iy, guide.max_y)
    {
        return [1.0, 1.0, 1.0];
    }

    // Dashed thirds.
    for k in [1.0 / 3.0, 2.0 / 3.0] {
        let gx = guide.min_x + k * guide.width();
        if near(ix, gx) && dash_on(iy - guide.min_y) {
            return [1.0, 1.0, 1.0];
        }
        let gy = guide.min_y + k * guide.height();
        if near(iy, gy) && dash_on(ix - guide.min_x) {
            return [1.0, 1.0, 1.0];
        }
    }

    rgb
}

#[inline]
fn dash_on(t: f32) -> bool {
    t.rem_euclid(GRID_DASH_LEN + GRID_GAP_LEN) < GRID_DASH_LEN
}
