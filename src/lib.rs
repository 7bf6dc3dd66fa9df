//! Pixelblend - W3C blend modes and Porter-Duff compositing for RGBA8 buffers
//!
//! This library provides:
//! - The sixteen CSS/SVG blend modes (twelve separable, four non-separable)
//! - Porter-Duff compositing operators, with source-over as the default
//! - Region clipping and a per-pixel transform over `image::RgbaImage`
//! - A [`Blender`] session that can route modes to a native backend

pub mod blend;
pub mod blender;
pub mod cli;
pub mod color;
pub mod composite;
pub mod config;
pub mod error;
pub mod native;
pub mod output;
pub mod region;
pub mod surface;
pub mod transform;

pub use blend::{BlendFunction, BlendMode};
pub use blender::{blend_onto, BlendOptions, BlendOutcome, Blender, RenderPath};
pub use color::Rgb;
pub use composite::{CompositeOperator, Compositor};
pub use error::{BlendError, SurfaceError};
pub use native::{NativeBackend, NativeSupportCache};
pub use region::{clip_region, ClippedRegion, Rect, RegionRequest};
pub use surface::{PixelBuffer, Surface};
pub use transform::PixelTransform;
