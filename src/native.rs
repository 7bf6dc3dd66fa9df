//! Native compositing fast path
//!
//! Some hosts can composite a blend mode themselves (a GPU canvas, a platform
//! 2D API). A [`NativeBackend`] exposes that capability; the
//! [`NativeSupportCache`] remembers the answer per mode for as long as the
//! owning [`Blender`](crate::Blender) lives, so each mode is probed at most
//! once per session.

use std::collections::HashMap;

use crate::blend::BlendMode;
use crate::error::SurfaceError;
use crate::region::ClippedRegion;
use crate::surface::Surface;

/// A host compositing primitive that can draw a source-over blend directly.
pub trait NativeBackend {
    /// Probe whether the host implements `mode` natively.
    fn supports(&self, mode: BlendMode) -> bool;

    /// Draw `region.source` of `source` onto `region.dest` of `dest` using
    /// `mode` under source-over.
    fn draw(
        &self,
        source: &dyn Surface,
        dest: &mut dyn Surface,
        mode: BlendMode,
        region: &ClippedRegion,
    ) -> Result<(), SurfaceError>;
}

/// Memoized probe results, one entry per mode.
#[derive(Debug, Default, Clone)]
pub struct NativeSupportCache {
    probed: HashMap<BlendMode, bool>,
}

impl NativeSupportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `backend` supports `mode`, probing on first use.
    pub fn has_native_support(&mut self, mode: BlendMode, backend: &dyn NativeBackend) -> bool {
        *self.probed.entry(mode).or_insert_with(|| {
            let supported = backend.supports(mode);
            log::debug!("Native support for {}: {}", mode, supported);
            supported
        })
    }

    /// Cached answer for `mode`, if it has been probed.
    pub fn cached(&self, mode: BlendMode) -> Option<bool> {
        self.probed.get(&mode).copied()
    }

    /// Forget every probe result, e.g. after the host context was recreated.
    pub fn clear(&mut self) {
        self.probed.clear();
    }

    pub fn len(&self) -> usize {
        self.probed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probed.is_empty()
    }
}
