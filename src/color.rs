//! Color model helpers for the non-separable blend modes
//!
//! Operates on straight (non-premultiplied) RGB triples with components in
//! `0.0..=1.0`. Luminance uses the fixed weights from the W3C compositing
//! spec: `0.3 R + 0.59 G + 0.11 B`.

use std::ops::{Index, IndexMut};

/// Luminance weight for the red channel
pub const LUM_R: f32 = 0.3;
/// Luminance weight for the green channel
pub const LUM_G: f32 = 0.59;
/// Luminance weight for the blue channel
pub const LUM_B: f32 = 0.11;

/// Convert an 8-bit channel to a unit channel value.
#[inline]
pub fn to_unit(value: u8) -> f32 {
    value as f32 / 255.0
}

/// Pack a unit channel value into 8 bits.
///
/// Values are clamped to `0.0..=1.0` and rounded half away from zero, so
/// 127.5 packs to 128. Non-finite input packs to 0.
#[inline]
pub fn to_byte(value: f32) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// An RGB triple in unit range.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a triple from the color bytes of an RGBA8 pixel.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(to_unit(bytes[0]), to_unit(bytes[1]), to_unit(bytes[2]))
    }

    fn max(self) -> f32 {
        self.r.max(self.g).max(self.b)
    }

    fn min(self) -> f32 {
        self.r.min(self.g).min(self.b)
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// `max(c) - min(c)`
    pub fn saturation(self) -> f32 {
        self.max() - self.min()
    }

    pub fn luminance(self) -> f32 {
        LUM_R * self.r + LUM_G * self.g + LUM_B * self.b
    }

    /// Pull out-of-range components back into `0.0..=1.0` toward the
    /// luminance of the triple.
    ///
    /// The minimum and maximum are sampled once before either correction, so
    /// both corrections scale relative to the same luminance.
    pub fn clip_to_gamut(self) -> Self {
        let l = self.luminance();
        let n = self.min();
        let x = self.max();

        let mut c = self;
        if n < 0.0 {
            c = if l > n {
                let scale = l / (l - n);
                c.map(|v| l + (v - l) * scale)
            } else {
                c.map(|v| v.max(0.0))
            };
        }
        if x > 1.0 {
            // x == l only for a flat triple pushed just past 1 by rounding.
            c = if x > l {
                let scale = (1.0 - l) / (x - l);
                c.map(|v| l + (v - l) * scale)
            } else {
                c.map(|v| v.min(1.0))
            };
        }
        c
    }

    /// Shift every component so the triple has luminance `l`, then clip.
    pub fn with_luminance(self, l: f32) -> Self {
        let d = l - self.luminance();
        self.map(|v| v + d).clip_to_gamut()
    }

    /// Rescale the triple so that `max - min == s`, keeping the channel
    /// ordering.
    ///
    /// Ties are broken by channel order: when two channels are equal, the
    /// earlier one (r before g before b) ranks as the smaller.
    pub fn with_saturation(self, s: f32) -> Self {
        let mut order = [0usize, 1, 2];
        // Stable sort keeps r < g < b among equal values.
        order.sort_by(|&a, &b| self[a].total_cmp(&self[b]));
        let [min_idx, mid_idx, max_idx] = order;

        let min = self[min_idx];
        let span = self[max_idx] - min;

        let mut out = Rgb::default();
        if span > 0.0 {
            out[mid_idx] = (self[mid_idx] - min) * s / span;
            out[max_idx] = s;
        }
        out
    }
}

impl Index<usize> for Rgb {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.r,
            1 => &self.g,
            2 => &self.b,
            _ => panic!("Rgb channel index out of range: {}", index),
        }
    }
}

impl IndexMut<usize> for Rgb {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.r,
            1 => &mut self.g,
            2 => &mut self.b,
            _ => panic!("Rgb channel index out of range: {}", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_close(a: Rgb, b: Rgb) {
        assert!(
            (a.r - b.r).abs() < EPS && (a.g - b.g).abs() < EPS && (a.b - b.b).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_to_byte_rounds_half_up() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(0.5), 128);
        assert_eq!(to_byte(0.75), 191);
    }

    #[test]
    fn test_to_byte_saturates() {
        assert_eq!(to_byte(-0.5), 0);
        assert_eq!(to_byte(1.7), 255);
        assert_eq!(to_byte(f32::NAN), 0);
        assert_eq!(to_byte(f32::INFINITY), 0);
    }

    #[test]
    fn test_to_unit_round_trips_every_byte() {
        for v in 0..=255u8 {
            assert_eq!(to_byte(to_unit(v)), v);
        }
    }

    #[test]
    fn test_saturation() {
        assert!((Rgb::new(0.2, 0.8, 0.5).saturation() - 0.6).abs() < EPS);
        assert_eq!(Rgb::new(0.4, 0.4, 0.4).saturation(), 0.0);
    }

    #[test]
    fn test_luminance_weights() {
        assert!((Rgb::new(1.0, 0.0, 0.0).luminance() - 0.3).abs() < EPS);
        assert!((Rgb::new(0.0, 1.0, 0.0).luminance() - 0.59).abs() < EPS);
        assert!((Rgb::new(0.0, 0.0, 1.0).luminance() - 0.11).abs() < EPS);
        assert!((Rgb::new(1.0, 1.0, 1.0).luminance() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_clip_in_gamut_is_unchanged() {
        let c = Rgb::new(0.1, 0.5, 0.9);
        assert_eq!(c.clip_to_gamut(), c);
    }

    #[test]
    fn test_clip_negative_preserves_luminance() {
        let c = Rgb::new(-0.2, 0.5, 0.6);
        let clipped = c.clip_to_gamut();
        assert!(clipped.r >= -EPS);
        assert!((clipped.luminance() - c.luminance()).abs() < EPS);
    }

    #[test]
    fn test_clip_overflow_preserves_luminance() {
        let c = Rgb::new(1.4, 0.5, 0.2);
        let clipped = c.clip_to_gamut();
        assert!(clipped.r <= 1.0 + EPS);
        assert!((clipped.luminance() - c.luminance()).abs() < EPS);
    }

    #[test]
    fn test_with_luminance_shifts_all_channels() {
        let c = Rgb::new(0.2, 0.3, 0.4).with_luminance(0.5);
        assert!((c.luminance() - 0.5).abs() < EPS);
        assert!((c.g - c.r - 0.1).abs() < EPS);
        assert!((c.b - c.g - 0.1).abs() < EPS);
    }

    #[test]
    fn test_with_luminance_clips_to_white() {
        let c = Rgb::new(0.9, 0.9, 0.9).with_luminance(1.0);
        assert_close(c, Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_with_saturation_orders_channels() {
        let c = Rgb::new(0.8, 0.2, 0.5).with_saturation(0.3);
        assert_close(c, Rgb::new(0.3, 0.0, 0.15));
    }

    #[test]
    fn test_with_saturation_gray_is_black() {
        let c = Rgb::new(0.5, 0.5, 0.5).with_saturation(0.7);
        assert_eq!(c, Rgb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_with_saturation_ties_favor_earlier_channel_as_smaller() {
        // r == g: r is the min, g is the mid
        let c = Rgb::new(0.2, 0.2, 0.6).with_saturation(0.5);
        assert_close(c, Rgb::new(0.0, 0.0, 0.5));

        // g == b: g is the mid, b is the max
        let c = Rgb::new(0.1, 0.7, 0.7).with_saturation(0.4);
        assert_close(c, Rgb::new(0.0, 0.4, 0.4));
    }

    #[test]
    fn test_clip_to_gamut_flat_negative_clamps_to_black() {
        let c = Rgb::new(-0.5, -0.5, -0.5).clip_to_gamut();
        assert_close(c, Rgb::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_clip_to_gamut_flat_overflow_clamps_to_white() {
        let c = Rgb::new(1.5, 1.5, 1.5).clip_to_gamut();
        assert_close(c, Rgb::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_index_access() {
        let mut c = Rgb::new(0.1, 0.2, 0.3);
        assert_eq!(c[1], 0.2);
        c[2] = 0.9;
        assert_eq!(c.b, 0.9);
    }
}
