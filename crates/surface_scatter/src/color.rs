//! Color values and match criteria for texture-driven filtering.
//!
//! A [`ColorCriterion`] decides whether a sampled texel counts as a match.
//! Matching is a pure function with two mutually exclusive strategies,
//! selected via [`MatchMode`]:
//! - tolerance: per-channel max distance to a target color, inclusive;
//! - range: componentwise containment in `[min, max]`, inclusive.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Linear RGBA color with channels in [0, 1].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);
    pub const RED: Rgba = Rgba::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Rgba = Rgba::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Rgba = Rgba::rgb(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from 8-bit channels, mapped to [0, 1].
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Returns `true` if any RGB channel is NaN. Alpha is ignored throughout
    /// matching and is not checked here.
    pub fn has_nan(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }

    /// Largest per-channel distance over RGB. Alpha is ignored.
    pub fn max_channel_distance(&self, other: &Rgba) -> f32 {
        let dr = (self.r - other.r).abs();
        let dg = (self.g - other.g).abs();
        let db = (self.b - other.b).abs();
        dr.max(dg).max(db)
    }
}

/// Strategy used by [`ColorCriterion::matches`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum MatchMode {
    /// Match when the max channel distance to the target is within tolerance.
    Tolerance,
    /// Match when every RGB channel lies in `[min, max]` componentwise.
    Range { min: Rgba, max: Rgba },
}

/// Criterion deciding which sampled colors count as placement targets.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct ColorCriterion {
    /// Target color compared against in tolerance mode.
    pub target: Rgba,
    /// Tolerance in [0, 1], mapped linearly onto the channel domain.
    pub tolerance: f32,
    /// Active matching strategy.
    pub mode: MatchMode,
}

impl ColorCriterion {
    /// Tolerance-mode criterion for the given target color.
    pub fn tolerance(target: Rgba, tolerance: f32) -> Self {
        Self {
            target,
            tolerance,
            mode: MatchMode::Tolerance,
        }
    }

    /// Range-mode criterion with inclusive componentwise bounds.
    pub fn range(min: Rgba, max: Rgba) -> Self {
        Self {
            target: min,
            tolerance: 0.0,
            mode: MatchMode::Range { min, max },
        }
    }

    /// Validates the criterion, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tolerance) {
            return Err(Error::InvalidConfig(
                "color tolerance must be in [0, 1]".into(),
            ));
        }
        if let MatchMode::Range { min, max } = self.mode {
            if min.r > max.r || min.g > max.g || min.b > max.b {
                return Err(Error::InvalidConfig(
                    "color range min must be <= max componentwise".into(),
                ));
            }
        }
        Ok(())
    }

    /// Returns `true` if the sampled color counts as a match.
    ///
    /// Pure and deterministic. Any NaN channel in the sampled color or in the
    /// criterion is treated as a non-match.
    pub fn matches(&self, sampled: Rgba) -> bool {
        if sampled.has_nan() {
            return false;
        }
        match self.mode {
            MatchMode::Tolerance => {
                if self.target.has_nan() || self.tolerance.is_nan() {
                    return false;
                }
                sampled.max_channel_distance(&self.target) <= self.tolerance
            }
            MatchMode::Range { min, max } => {
                if min.has_nan() || max.has_nan() {
                    return false;
                }
                min.r <= sampled.r
                    && sampled.r <= max.r
                    && min.g <= sampled.g
                    && sampled.g <= max.g
                    && min.b <= sampled.b
                    && sampled.b <= max.b
            }
        }
    }
}

impl Default for ColorCriterion {
    fn default() -> Self {
        Self::tolerance(Rgba::WHITE, 0.1)
    }
}
