//! Error types for blending

use thiserror::Error;

use crate::region::Rect;

/// Failure reported by a pixel surface or a native compositing backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// Requested rectangle does not fit inside the surface
    #[error(
        "Rect {x},{y} {w}x{h} is outside the {width}x{height} surface",
        x = rect.x,
        y = rect.y,
        w = rect.width,
        h = rect.height
    )]
    OutOfBounds { rect: Rect, width: u32, height: u32 },
    /// Backend-specific failure (surface unavailable, lost context, ...)
    #[error("Surface backend error: {0}")]
    Backend(String),
}

/// Error from a blend call.
///
/// Unknown mode names and empty regions are not errors; they resolve to
/// `normal` and a no-op respectively.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlendError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    /// Source and destination buffers handed to the transform differ in size
    #[error(
        "Source buffer ({src_w}x{src_h}) and destination buffer ({dst_w}x{dst_h}) differ in size",
        src_w = source_size.0,
        src_h = source_size.1,
        dst_w = dest_size.0,
        dst_h = dest_size.1
    )]
    ShapeMismatch { source_size: (u32, u32), dest_size: (u32, u32) },
}
