//! Porter-Duff compositing operators
//!
//! A [`Compositor`] is the pair of rules that turns a blended color into the
//! final destination pixel: one rule for the resulting alpha and one for each
//! color channel. The blend mode is evaluated before the color rule is called,
//! so operators never need to know which blend mode produced `blended`.
//!
//! All channels are straight (non-premultiplied) values in `0.0..=1.0`.

use serde::{Deserialize, Serialize};

/// Alpha and color combination rules for one compositing operator.
pub trait Compositor {
    /// Resulting alpha for a source alpha over a destination alpha.
    fn alpha(&self, src_a: f32, dst_a: f32) -> f32;

    /// Resulting straight color channel.
    ///
    /// `blended` is the blend function's result `B(src_c, dst_c)` for this
    /// channel. Implementations must return a finite value even when the
    /// resulting alpha is zero.
    fn color(&self, src_a: f32, src_c: f32, dst_a: f32, dst_c: f32, blended: f32) -> f32;
}

/// The Porter-Duff operators from the W3C compositing spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOperator {
    /// Clears the destination wherever the source has any coverage
    Clear,
    /// Source only
    Copy,
    /// Source over destination
    #[default]
    SourceOver,
    /// Source where the destination is present
    SourceIn,
    /// Source where the destination is absent
    SourceOut,
    /// Source over destination, clipped to the destination
    SourceAtop,
    /// Destination over source
    DestinationOver,
    /// Destination where the source is present
    DestinationIn,
    /// Destination where the source is absent
    DestinationOut,
    /// Destination over source, clipped to the source
    DestinationAtop,
    /// Source and destination where the other is absent
    Xor,
}

impl CompositeOperator {
    pub const ALL: [CompositeOperator; 11] = [
        CompositeOperator::Clear,
        CompositeOperator::Copy,
        CompositeOperator::SourceOver,
        CompositeOperator::SourceIn,
        CompositeOperator::SourceOut,
        CompositeOperator::SourceAtop,
        CompositeOperator::DestinationOver,
        CompositeOperator::DestinationIn,
        CompositeOperator::DestinationOut,
        CompositeOperator::DestinationAtop,
        CompositeOperator::Xor,
    ];

    /// Parse an operator name (case-insensitive, dashes optional).
    pub fn from_str(s: &str) -> Option<CompositeOperator> {
        let key: String =
            s.trim().chars().filter(|c| *c != '-' && *c != '_').collect::<String>().to_lowercase();
        CompositeOperator::ALL.iter().copied().find(|op| op.name().replace('-', "") == key)
    }

    /// Parse an operator name, falling back to source-over.
    pub fn from_str_or_default(s: &str) -> CompositeOperator {
        CompositeOperator::from_str(s).unwrap_or_else(|| {
            log::warn!("Unknown composite operator '{}', using source-over", s);
            CompositeOperator::SourceOver
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            CompositeOperator::Clear => "clear",
            CompositeOperator::Copy => "copy",
            CompositeOperator::SourceOver => "source-over",
            CompositeOperator::SourceIn => "source-in",
            CompositeOperator::SourceOut => "source-out",
            CompositeOperator::SourceAtop => "source-atop",
            CompositeOperator::DestinationOver => "destination-over",
            CompositeOperator::DestinationIn => "destination-in",
            CompositeOperator::DestinationOut => "destination-out",
            CompositeOperator::DestinationAtop => "destination-atop",
            CompositeOperator::Xor => "xor",
        }
    }

    /// Porter-Duff coverage factors `(Fa, Fb)` for the source and destination.
    ///
    /// Returns `None` for [`CompositeOperator::Clear`], which is not a pure
    /// factor operator here.
    fn factors(self, src_a: f32, dst_a: f32) -> Option<(f32, f32)> {
        let factors = match self {
            CompositeOperator::Clear => return None,
            CompositeOperator::Copy => (1.0, 0.0),
            CompositeOperator::SourceOver => (1.0, 1.0 - src_a),
            CompositeOperator::SourceIn => (dst_a, 0.0),
            CompositeOperator::SourceOut => (1.0 - dst_a, 0.0),
            CompositeOperator::SourceAtop => (dst_a, 1.0 - src_a),
            CompositeOperator::DestinationOver => (1.0 - dst_a, 1.0),
            CompositeOperator::DestinationIn => (0.0, src_a),
            CompositeOperator::DestinationOut => (0.0, 1.0 - src_a),
            CompositeOperator::DestinationAtop => (1.0 - dst_a, src_a),
            CompositeOperator::Xor => (1.0 - dst_a, 1.0 - src_a),
        };
        Some(factors)
    }
}

impl std::fmt::Display for CompositeOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Compositor for CompositeOperator {
    fn alpha(&self, src_a: f32, dst_a: f32) -> f32 {
        match self.factors(src_a, dst_a) {
            Some((fa, fb)) => src_a * fa + dst_a * fb,
            None => clear_alpha(src_a, dst_a),
        }
    }

    fn color(&self, src_a: f32, src_c: f32, dst_a: f32, dst_c: f32, blended: f32) -> f32 {
        let Some((fa, fb)) = self.factors(src_a, dst_a) else {
            return clear_color(src_a, dst_c);
        };

        let out_a = src_a * fa + dst_a * fb;
        if out_a <= 0.0 {
            return 0.0;
        }

        // Source color after blending with the backdrop it lands on.
        let mixed = (1.0 - dst_a) * src_c + dst_a * blended;
        (src_a * fa * mixed + dst_a * fb * dst_c) / out_a
    }
}

fn clear_alpha(src_a: f32, dst_a: f32) -> f32 {
    if src_a == 0.0 {
        dst_a
    } else {
        0.0
    }
}

fn clear_color(src_a: f32, dst_c: f32) -> f32 {
    if src_a == 0.0 {
        dst_c
    } else {
        0.0
    }
}
