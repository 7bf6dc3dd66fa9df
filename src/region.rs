//! Region clipping
//!
//! Turns a caller's requested blend rectangle into the overlap that actually
//! exists in both buffers, so the pixel transform never reads or writes out of
//! bounds.

use serde::{Deserialize, Serialize};

/// A rectangle in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the rectangle lies within a `width` x `height` buffer.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x as u64 + self.width as u64 <= width as u64
            && self.y as u64 + self.height as u64 <= height as u64
    }
}

/// Requested blend extent and offsets, before clipping.
///
/// `width`/`height` default to the full source extent. Offsets may be any
/// value; negative or out-of-bounds offsets clip to an empty region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default)]
    pub source_x: i64,
    #[serde(default)]
    pub source_y: i64,
    #[serde(default)]
    pub dest_x: i64,
    #[serde(default)]
    pub dest_y: i64,
}

/// Matching source and destination rectangles of equal extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClippedRegion {
    pub source: Rect,
    pub dest: Rect,
}

impl ClippedRegion {
    pub fn width(&self) -> u32 {
        self.source.width
    }

    pub fn height(&self) -> u32 {
        self.source.height
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }
}

/// Clip a request against the source and destination buffer sizes.
///
/// Effective width is `min(requested, source_w - source_x, dest_w - dest_x)`,
/// clamped at zero, and likewise for height. A negative offset yields an
/// empty region. Empty regions keep their (clamped) origin.
pub fn clip_region(
    source_size: (u32, u32),
    dest_size: (u32, u32),
    request: &RegionRequest,
) -> ClippedRegion {
    let offsets_valid = request.source_x >= 0
        && request.source_y >= 0
        && request.dest_x >= 0
        && request.dest_y >= 0;

    let (width, height) = if offsets_valid {
        (
            clip_extent(
                request.width.unwrap_or(source_size.0),
                source_size.0,
                request.source_x,
                dest_size.0,
                request.dest_x,
            ),
            clip_extent(
                request.height.unwrap_or(source_size.1),
                source_size.1,
                request.source_y,
                dest_size.1,
                request.dest_y,
            ),
        )
    } else {
        (0, 0)
    };

    ClippedRegion {
        source: Rect::new(
            clamp_offset(request.source_x, source_size.0),
            clamp_offset(request.source_y, source_size.1),
            width,
            height,
        ),
        dest: Rect::new(
            clamp_offset(request.dest_x, dest_size.0),
            clamp_offset(request.dest_y, dest_size.1),
            width,
            height,
        ),
    }
}

/// Offsets must be non-negative here.
fn clip_extent(
    requested: u32,
    source_len: u32,
    source_off: i64,
    dest_len: u32,
    dest_off: i64,
) -> u32 {
    let extent = (requested as i64)
        .min((source_len as i64).saturating_sub(source_off))
        .min((dest_len as i64).saturating_sub(dest_off));
    extent.max(0) as u32
}

fn clamp_offset(offset: i64, len: u32) -> u32 {
    offset.clamp(0, len as i64) as u32
}
