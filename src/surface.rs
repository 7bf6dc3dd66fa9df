//! Pixel surfaces
//!
//! A surface is anything that can hand out a copy of a rectangle of RGBA8
//! pixels and accept a rectangle back. The blender never holds on to a
//! surface's storage; it copies the region out, composites, and writes it
//! back.

use image::RgbaImage;

use crate::error::SurfaceError;
use crate::region::Rect;

/// Straight-alpha RGBA8 pixels, row-major.
pub type PixelBuffer = RgbaImage;

/// A pixel-bearing surface.
pub trait Surface {
    /// Surface size as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Copy the pixels inside `rect` into a new buffer.
    fn get_pixels(&self, rect: Rect) -> Result<PixelBuffer, SurfaceError>;

    /// Write `buffer` with its top-left corner at `(x, y)`.
    fn put_pixels(&mut self, buffer: &PixelBuffer, x: u32, y: u32) -> Result<(), SurfaceError>;
}

fn check_bounds(rect: Rect, (width, height): (u32, u32)) -> Result<(), SurfaceError> {
    if rect.fits_within(width, height) {
        Ok(())
    } else {
        Err(SurfaceError::OutOfBounds { rect, width, height })
    }
}

impl Surface for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn get_pixels(&self, rect: Rect) -> Result<PixelBuffer, SurfaceError> {
        check_bounds(rect, Surface::dimensions(self))?;
        Ok(image::imageops::crop_imm(self, rect.x, rect.y, rect.width, rect.height).to_image())
    }

    fn put_pixels(&mut self, buffer: &PixelBuffer, x: u32, y: u32) -> Result<(), SurfaceError> {
        let rect = Rect::new(x, y, buffer.width(), buffer.height());
        check_bounds(rect, Surface::dimensions(self))?;
        image::imageops::replace(self, buffer, x as i64, y as i64);
        Ok(())
    }
}
