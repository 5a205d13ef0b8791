//! Relative luminance and the five tonal zones.
//!
//! Luminance is the Rec. 709 weighted sum of the linearized sRGB channels,
//! so it ranges from `0.0` for black to `1.0` for white.
//! Each luminance value falls into exactly one [`LuminanceZone`].

use crate::{
    colorspace::{linear_to_srgb, linearize, unit_to_channel},
    normalize_name, Color, ParseError,
};
use std::{fmt, ops::Range, str::FromStr};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of luminance zones.
pub const ZONE_COUNT: usize = 5;

/// The lower bounds of every zone except [`LuminanceZone::Blacks`], in ascending order.
pub const ZONE_THRESHOLDS: [f64; ZONE_COUNT - 1] = [0.10, 0.30, 0.70, 0.90];

/// The exclusive end of the top zone, the smallest `f64` above `1.0`.
const LUMA_END: f64 = 1.0 + f64::EPSILON;

/// The Rec. 709 weights for linear red, green, and blue.
const WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// A tonal band of relative luminance.
///
/// | Zone         | Luminance      |
/// |--------------|----------------|
/// | `Blacks`     | `[0.00, 0.10)` |
/// | `Shadows`    | `[0.10, 0.30)` |
/// | `Midtones`   | `[0.30, 0.70)` |
/// | `Highlights` | `[0.70, 0.90)` |
/// | `Whites`     | `[0.90, 1.00]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LuminanceZone {
    /// Luminance below `0.10`.
    Blacks,
    /// Luminance in `0.10..0.30`.
    Shadows,
    /// Luminance in `0.30..0.70`.
    Midtones,
    /// Luminance in `0.70..0.90`.
    Highlights,
    /// Luminance of `0.90` or more.
    Whites,
}

impl LuminanceZone {
    /// All zones from darkest to brightest.
    pub const ALL: [Self; ZONE_COUNT] = [
        Self::Blacks,
        Self::Shadows,
        Self::Midtones,
        Self::Highlights,
        Self::Whites,
    ];

    /// Returns the zone containing `luma`. Values are clamped into `0.0..=1.0`, and `NaN` is `Blacks`.
    #[must_use]
    pub fn from_luma(luma: f64) -> Self {
        let [shadows, midtones, highlights, whites] = ZONE_THRESHOLDS;
        if luma >= whites {
            Self::Whites
        } else if luma >= highlights {
            Self::Highlights
        } else if luma >= midtones {
            Self::Midtones
        } else if luma >= shadows {
            Self::Shadows
        } else {
            Self::Blacks
        }
    }

    /// The position of this zone in [`LuminanceZone::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The half-open luminance range covered by this zone.
    ///
    /// The range of [`LuminanceZone::Whites`] ends just past `1.0` so that it contains white.
    #[must_use]
    pub fn range(self) -> Range<f64> {
        let i = self.index();
        let start = if i == 0 { 0.0 } else { ZONE_THRESHOLDS[i - 1] };
        let end = ZONE_THRESHOLDS.get(i).copied().unwrap_or(LUMA_END);
        start..end
    }

    /// Whether `luma` falls in this zone.
    #[must_use]
    pub fn contains(self, luma: f64) -> bool {
        Self::from_luma(luma) == self
    }

    /// The lowercase name of the zone.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LuminanceZone::Blacks => "blacks",
            LuminanceZone::Shadows => "shadows",
            LuminanceZone::Midtones => "midtones",
            LuminanceZone::Highlights => "highlights",
            LuminanceZone::Whites => "whites",
        }
    }
}

impl fmt::Display for LuminanceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for LuminanceZone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|zone| zone.name() == name || zone.name().trim_end_matches('s') == name)
            .ok_or_else(|| ParseError::UnknownZone(s.to_owned()))
    }
}

/// The relative luminance of a color together with its zone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Luminance {
    /// Relative luminance in `0.0..=1.0`.
    pub luma: f64,
    /// The zone containing `luma`.
    pub zone: LuminanceZone,
}

/// Computes relative luminance from raw sRGB channels.
pub(crate) fn luma_components([r, g, b]: [u8; 3]) -> f64 {
    let [wr, wg, wb] = WEIGHTS;
    (wr * linearize(r) + wg * linearize(g) + wb * linearize(b)).clamp(0.0, 1.0)
}

/// Computes the relative luminance of a color, in `0.0..=1.0`.
///
/// # Examples
/// ```
/// # use colorcard::{Color, luminance};
/// assert_eq!(luminance::luma(Color::WHITE), 1.0);
/// assert_eq!(luminance::luma(Color::BLACK), 0.0);
/// ```
#[must_use]
pub fn luma(color: Color) -> f64 {
    luma_components(color.to_array())
}

/// Computes the relative luminance of a color and classifies it into a zone.
#[must_use]
pub fn luminance(color: Color) -> Luminance {
    let luma = luma(color);
    Luminance { luma, zone: LuminanceZone::from_luma(luma) }
}

/// Classifies a color into a luminance zone.
#[must_use]
pub fn zone(color: Color) -> LuminanceZone {
    LuminanceZone::from_luma(luma(color))
}

/// Re-encodes luminance with the sRGB transfer function and quantizes it to `0..=255`.
///
/// This is the gray level with the same luminance as the color,
/// and it indexes the luma histogram.
pub(crate) fn luma8_components(pixel: [u8; 3]) -> u8 {
    unit_to_channel(linear_to_srgb(luma_components(pixel)))
}

/// The 8-bit gray level with the same luminance as `color`.
#[must_use]
pub fn luma8(color: Color) -> u8 {
    luma8_components(color.to_array())
}

impl Color {
    /// The relative luminance of this color. See [`luma`].
    #[must_use]
    pub fn luma(self) -> f64 {
        luma(self)
    }

    /// The luminance zone of this color. See [`zone`].
    #[must_use]
    pub fn zone(self) -> LuminanceZone {
        zone(self)
    }
}
