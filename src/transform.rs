//! Per-pixel blend transform
//!
//! Composites a source buffer onto an equally sized destination buffer. Every
//! output pixel depends only on the co-located input pixels, so the work can
//! be split across threads without coordination.

use image::RgbaImage;
use rayon::prelude::*;

use crate::blend::{BlendFunction, BlendMode};
use crate::color::{to_byte, to_unit, Rgb};
use crate::composite::Compositor;
use crate::error::BlendError;

/// Regions with fewer pixels than this stay on the calling thread.
pub const DEFAULT_MIN_PARALLEL_PIXELS: usize = 64 * 1024;

/// Fixed inputs of one transform run, resolved once and reused for every
/// pixel.
pub struct PixelTransform<'a, C: Compositor> {
    function: BlendFunction,
    compositor: &'a C,
    opacity: f32,
}

impl<'a, C: Compositor> PixelTransform<'a, C> {
    pub fn new(mode: BlendMode, compositor: &'a C) -> Self {
        Self { function: mode.function(), compositor, opacity: 1.0 }
    }

    /// Scale source alpha by `opacity` (clamped to `0.0..=1.0`).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = if opacity.is_nan() { 1.0 } else { opacity.clamp(0.0, 1.0) };
        self
    }

    /// Composite one straight-alpha RGBA8 pixel over another.
    pub fn blend_pixel(&self, src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
        let src_a = to_unit(src[3]) * self.opacity;
        let dst_a = to_unit(dst[3]);
        let src_rgb = Rgb::from_bytes([src[0], src[1], src[2]]);
        let dst_rgb = Rgb::from_bytes([dst[0], dst[1], dst[2]]);

        let out_a = self.compositor.alpha(src_a, dst_a);

        // Non-separable modes are evaluated once for the whole triple; the
        // compositor then reads each channel of the result.
        let blended = match self.function {
            BlendFunction::Separable(f) => {
                Rgb::new(f(src_rgb.r, dst_rgb.r), f(src_rgb.g, dst_rgb.g), f(src_rgb.b, dst_rgb.b))
            }
            BlendFunction::NonSeparable(f) => f(src_rgb, dst_rgb),
        };

        let mut out = [0u8; 4];
        for i in 0..3 {
            let c = self.compositor.color(src_a, src_rgb[i], dst_a, dst_rgb[i], blended[i]);
            out[i] = to_byte(c);
        }
        out[3] = to_byte(out_a);
        out
    }

    /// Composite `src` onto `dst` on the calling thread.
    pub fn apply(&self, src: &RgbaImage, dst: &mut RgbaImage) -> Result<(), BlendError> {
        check_shapes(src, dst)?;
        let dst_bytes: &mut [u8] = dst;
        for (d, s) in dst_bytes.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
            self.blend_chunk(s, d);
        }
        Ok(())
    }

    fn blend_chunk(&self, src: &[u8], dst: &mut [u8]) {
        let out =
            self.blend_pixel([src[0], src[1], src[2], src[3]], [dst[0], dst[1], dst[2], dst[3]]);
        dst.copy_from_slice(&out);
    }
}

impl<'a, C: Compositor + Sync> PixelTransform<'a, C> {
    /// Composite `src` onto `dst`, splitting rows across the rayon pool.
    ///
    /// Produces exactly the same bytes as [`PixelTransform::apply`].
    pub fn apply_parallel(&self, src: &RgbaImage, dst: &mut RgbaImage) -> Result<(), BlendError> {
        check_shapes(src, dst)?;
        let row_bytes = src.width() as usize * 4;
        if row_bytes == 0 {
            return Ok(());
        }
        let dst_bytes: &mut [u8] = dst;
        dst_bytes.par_chunks_mut(row_bytes).zip(src.par_chunks(row_bytes)).for_each(
            |(d_row, s_row)| {
                for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
                    self.blend_chunk(s, d);
                }
            },
        );
        Ok(())
    }
}

fn check_shapes(src: &RgbaImage, dst: &RgbaImage) -> Result<(), BlendError> {
    if src.dimensions() != dst.dimensions() {
        return Err(BlendError::ShapeMismatch {
            source_size: src.dimensions(),
            dest_size: dst.dimensions(),
        });
    }
    Ok(())
}
