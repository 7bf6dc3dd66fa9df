//! Blend session and the `blend_onto` entry point
//!
//! A [`Blender`] clips the requested region, decides between the host's
//! native compositing and the software [`PixelTransform`], and writes the
//! result back into the destination surface.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use pixelblend::{BlendMode, BlendOptions, Blender};
//!
//! let source = RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 255]));
//! let mut dest = RgbaImage::from_pixel(2, 2, Rgba([128, 128, 128, 255]));
//!
//! let mut blender = Blender::new();
//! blender.blend_onto(&source, &mut dest, BlendMode::Screen, &BlendOptions::default()).unwrap();
//! assert_eq!(*dest.get_pixel(0, 0), Rgba([192, 192, 192, 255]));
//! ```

use serde::{Deserialize, Serialize};

use crate::blend::BlendMode;
use crate::composite::{CompositeOperator, Compositor};
use crate::error::BlendError;
use crate::native::{NativeBackend, NativeSupportCache};
use crate::region::{clip_region, ClippedRegion, RegionRequest};
use crate::surface::{PixelBuffer, Surface};
use crate::transform::{PixelTransform, DEFAULT_MIN_PARALLEL_PIXELS};

/// Per-call blend options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendOptions {
    /// Requested extent and offsets
    #[serde(default)]
    pub region: RegionRequest,
    /// Source opacity multiplier (0.0-1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Compositing operator
    #[serde(default)]
    pub operator: CompositeOperator,
}

fn default_opacity() -> f32 {
    1.0
}

impl Default for BlendOptions {
    fn default() -> Self {
        Self {
            region: RegionRequest::default(),
            opacity: default_opacity(),
            operator: CompositeOperator::SourceOver,
        }
    }
}

impl BlendOptions {
    /// Limit the blended extent.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.region.width = Some(width);
        self.region.height = Some(height);
        self
    }

    pub fn with_source_offset(mut self, x: i64, y: i64) -> Self {
        self.region.source_x = x;
        self.region.source_y = y;
        self
    }

    pub fn with_dest_offset(mut self, x: i64, y: i64) -> Self {
        self.region.dest_x = x;
        self.region.dest_y = y;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_operator(mut self, operator: CompositeOperator) -> Self {
        self.operator = operator;
        self
    }

    fn allows_native(&self) -> bool {
        self.operator == CompositeOperator::SourceOver && self.opacity >= 1.0
    }
}

/// How a blend call was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPath {
    /// Delegated to the native backend
    Native,
    /// Composited by the software pixel transform
    Software,
    /// Nothing to do: the clipped region was empty
    Skipped,
}

/// Result of a successful blend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendOutcome {
    pub region: ClippedRegion,
    pub path: RenderPath,
}

/// A blending session.
///
/// Owns the optional native backend and its probe cache, so probe results
/// live exactly as long as the session.
pub struct Blender {
    native: Option<Box<dyn NativeBackend>>,
    support: NativeSupportCache,
    parallel: bool,
    min_parallel_pixels: usize,
}

impl Default for Blender {
    fn default() -> Self {
        Self::new()
    }
}

impl Blender {
    /// Create a software-only session.
    pub fn new() -> Self {
        Self {
            native: None,
            support: NativeSupportCache::new(),
            parallel: true,
            min_parallel_pixels: DEFAULT_MIN_PARALLEL_PIXELS,
        }
    }

    /// Use `backend` for modes it supports natively.
    pub fn with_native(mut self, backend: Box<dyn NativeBackend>) -> Self {
        self.native = Some(backend);
        self.support.clear();
        self
    }

    /// Enable or disable the rayon pixel loop.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Smallest region (in pixels) that is split across threads.
    pub fn with_min_parallel_pixels(mut self, pixels: usize) -> Self {
        self.min_parallel_pixels = pixels;
        self
    }

    pub fn support_cache(&self) -> &NativeSupportCache {
        &self.support
    }

    /// Blend `source` onto `dest` with `mode` under `options.operator`.
    ///
    /// Only the clipped overlap of both surfaces is touched. An empty overlap
    /// is a no-op reported as [`RenderPath::Skipped`].
    pub fn blend_onto<S: Surface, D: Surface>(
        &mut self,
        source: &S,
        dest: &mut D,
        mode: BlendMode,
        options: &BlendOptions,
    ) -> Result<BlendOutcome, BlendError> {
        let region = clip_region(source.dimensions(), dest.dimensions(), &options.region);
        if region.is_empty() {
            log::debug!("Blend region is empty, skipping {}", mode);
            return Ok(BlendOutcome { region, path: RenderPath::Skipped });
        }

        if options.allows_native() {
            if let Some(backend) = self.native.as_deref() {
                if self.support.has_native_support(mode, backend) {
                    log::debug!("Blending {} natively over {:?}", mode, region);
                    backend.draw(source, dest, mode, &region)?;
                    return Ok(BlendOutcome { region, path: RenderPath::Native });
                }
            }
        }

        let src = source.get_pixels(region.source)?;
        self.composite_region(src, dest, &region, mode, &options.operator, options.opacity)?;
        Ok(BlendOutcome { region, path: RenderPath::Software })
    }

    /// Blend `source` onto `dest` with a caller-supplied compositor.
    ///
    /// Always runs the software transform; native backends only know
    /// source-over.
    pub fn blend_onto_with<C, S, D>(
        &self,
        source: &S,
        dest: &mut D,
        mode: BlendMode,
        compositor: &C,
        options: &BlendOptions,
    ) -> Result<BlendOutcome, BlendError>
    where
        C: Compositor + Sync,
        S: Surface,
        D: Surface,
    {
        let region = clip_region(source.dimensions(), dest.dimensions(), &options.region);
        if region.is_empty() {
            return Ok(BlendOutcome { region, path: RenderPath::Skipped });
        }
        let src = source.get_pixels(region.source)?;
        self.composite_region(src, dest, &region, mode, compositor, options.opacity)?;
        Ok(BlendOutcome { region, path: RenderPath::Software })
    }

    /// Blend one region of `surface` onto another region of the same surface.
    ///
    /// The source region is copied out before anything is written, so
    /// overlapping regions read the original pixels.
    pub fn blend_within<S: Surface>(
        &mut self,
        surface: &mut S,
        mode: BlendMode,
        options: &BlendOptions,
    ) -> Result<BlendOutcome, BlendError> {
        let size = surface.dimensions();
        let region = clip_region(size, size, &options.region);
        if region.is_empty() {
            log::debug!("Blend region is empty, skipping {}", mode);
            return Ok(BlendOutcome { region, path: RenderPath::Skipped });
        }

        let snapshot = surface.get_pixels(region.source)?;
        self.composite_region(
            snapshot,
            surface,
            &region,
            mode,
            &options.operator,
            options.opacity,
        )?;
        Ok(BlendOutcome { region, path: RenderPath::Software })
    }

    fn composite_region<C, D>(
        &self,
        src: PixelBuffer,
        dest: &mut D,
        region: &ClippedRegion,
        mode: BlendMode,
        compositor: &C,
        opacity: f32,
    ) -> Result<(), BlendError>
    where
        C: Compositor + Sync,
        D: Surface + ?Sized,
    {
        let mut dst = dest.get_pixels(region.dest)?;
        let transform = PixelTransform::new(mode, compositor).with_opacity(opacity);

        let pixels = region.source.area() as usize;
        if self.parallel && pixels >= self.min_parallel_pixels {
            log::trace!("Blending {} pixels with {} on the rayon pool", pixels, mode);
            transform.apply_parallel(&src, &mut dst)?;
        } else {
            log::trace!("Blending {} pixels with {}", pixels, mode);
            transform.apply(&src, &mut dst)?;
        }

        dest.put_pixels(&dst, region.dest.x, region.dest.y)?;
        Ok(())
    }
}

/// Blend `source` onto `dest` with a fresh software session.
///
/// Unknown mode names fall back to `normal`.
pub fn blend_onto<S: Surface, D: Surface>(
    source: &S,
    dest: &mut D,
    mode: &str,
    options: &BlendOptions,
) -> Result<BlendOutcome, BlendError> {
    Blender::new().blend_onto(source, dest, BlendMode::from_str_or_normal(mode), options)
}
