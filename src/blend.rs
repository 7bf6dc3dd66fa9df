//! Blend modes
//!
//! The sixteen blend modes of the W3C Compositing and Blending spec. A blend
//! function only decides the mixed color `B(Cs, Cb)` for a pixel where source
//! and destination overlap; alpha is folded in afterwards by a
//! [`Compositor`](crate::composite::Compositor).

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Blend modes for [`blend_onto`](crate::Blender::blend_onto)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source replaces destination: `B = Cs`
    #[default]
    Normal,
    /// `B = Cs * Cb`
    Multiply,
    /// `B = Cs + Cb - Cs * Cb`
    Screen,
    /// Hard light with source and destination swapped
    Overlay,
    /// `B = min(Cs, Cb)`
    Darken,
    /// `B = max(Cs, Cb)`
    Lighten,
    /// Brightens the destination to reflect the source
    ColorDodge,
    /// Darkens the destination to reflect the source
    ColorBurn,
    /// Multiply or screen depending on the source
    HardLight,
    /// Darken or lighten depending on the source
    SoftLight,
    /// `B = |Cb - Cs|`
    Difference,
    /// `B = Cs + Cb - 2 * Cs * Cb`
    Exclusion,
    /// Hue of the source with saturation and luminosity of the destination
    Hue,
    /// Saturation of the source with hue and luminosity of the destination
    Saturation,
    /// Hue and saturation of the source with luminosity of the destination
    Color,
    /// Luminosity of the source with hue and saturation of the destination
    Luminosity,
}

/// Evaluation function for a blend mode, picked once per blend call.
#[derive(Debug, Clone, Copy)]
pub enum BlendFunction {
    /// Channel-independent: `B(Cs, Cb)` per color channel
    Separable(fn(f32, f32) -> f32),
    /// Needs the full RGB triple of both pixels
    NonSeparable(fn(Rgb, Rgb) -> Rgb),
}

impl BlendMode {
    /// All modes, separable ones first.
    pub const ALL: [BlendMode; 16] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Parse a blend mode from string.
    ///
    /// Case-insensitive; dashes are optional (`color-dodge` and `colordodge`
    /// are the same mode).
    pub fn from_str(s: &str) -> Option<BlendMode> {
        let key: String =
            s.trim().chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();
        BlendMode::ALL.iter().copied().find(|mode| mode.name().replace('-', "") == key)
    }

    /// Parse a blend mode, falling back to [`BlendMode::Normal`] for unknown
    /// names.
    pub fn from_str_or_normal(s: &str) -> BlendMode {
        BlendMode::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown blend mode '{}', using normal", s);
            BlendMode::Normal
        })
    }

    /// Canonical kebab-case name
    pub fn name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }

    /// Whether the mode operates on each color channel independently.
    pub fn is_separable(self) -> bool {
        matches!(self.function(), BlendFunction::Separable(_))
    }

    pub fn function(self) -> BlendFunction {
        use BlendFunction::{NonSeparable, Separable};

        match self {
            BlendMode::Normal => Separable(normal),
            BlendMode::Multiply => Separable(multiply),
            BlendMode::Screen => Separable(screen),
            BlendMode::Overlay => Separable(overlay),
            BlendMode::Darken => Separable(darken),
            BlendMode::Lighten => Separable(lighten),
            BlendMode::ColorDodge => Separable(color_dodge),
            BlendMode::ColorBurn => Separable(color_burn),
            BlendMode::HardLight => Separable(hard_light),
            BlendMode::SoftLight => Separable(soft_light),
            BlendMode::Difference => Separable(difference),
            BlendMode::Exclusion => Separable(exclusion),
            BlendMode::Hue => NonSeparable(hue),
            BlendMode::Saturation => NonSeparable(saturation),
            BlendMode::Color => NonSeparable(color),
            BlendMode::Luminosity => NonSeparable(luminosity),
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// Separable blend functions. Arguments are (source, destination).

pub fn normal(src: f32, _dst: f32) -> f32 {
    src
}

pub fn multiply(src: f32, dst: f32) -> f32 {
    src * dst
}

pub fn screen(src: f32, dst: f32) -> f32 {
    src + dst - src * dst
}

pub fn overlay(src: f32, dst: f32) -> f32 {
    hard_light(dst, src)
}

pub fn darken(src: f32, dst: f32) -> f32 {
    src.min(dst)
}

pub fn lighten(src: f32, dst: f32) -> f32 {
    src.max(dst)
}

pub fn color_dodge(src: f32, dst: f32) -> f32 {
    if src < 1.0 {
        (dst / (1.0 - src)).min(1.0)
    } else {
        1.0
    }
}

pub fn color_burn(src: f32, dst: f32) -> f32 {
    if src > 0.0 {
        1.0 - ((1.0 - dst) / src).min(1.0)
    } else {
        0.0
    }
}

/// Branches on the source channel.
pub fn hard_light(src: f32, dst: f32) -> f32 {
    if src <= 0.5 {
        2.0 * src * dst
    } else {
        1.0 - 2.0 * (1.0 - src) * (1.0 - dst)
    }
}

pub fn soft_light(src: f32, dst: f32) -> f32 {
    if src <= 0.5 {
        dst - (1.0 - 2.0 * src) * dst * (1.0 - dst)
    } else {
        let g = if dst <= 0.25 { ((16.0 * dst - 12.0) * dst + 4.0) * dst } else { dst.sqrt() };
        dst + (2.0 * src - 1.0) * (g - dst)
    }
}

pub fn difference(src: f32, dst: f32) -> f32 {
    (dst - src).abs()
}

pub fn exclusion(src: f32, dst: f32) -> f32 {
    src + dst - 2.0 * src * dst
}

// Non-separable blend functions

pub fn hue(src: Rgb, dst: Rgb) -> Rgb {
    src.with_saturation(dst.saturation()).with_luminance(dst.luminance())
}

pub fn saturation(src: Rgb, dst: Rgb) -> Rgb {
    dst.with_saturation(src.saturation()).with_luminance(dst.luminance())
}

pub fn color(src: Rgb, dst: Rgb) -> Rgb {
    src.with_luminance(dst.luminance())
}

pub fn luminosity(src: Rgb, dst: Rgb) -> Rgb {
    dst.with_luminance(src.luminance())
}
