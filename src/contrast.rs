//! WCAG contrast ratios between two colors.

use crate::{luminance::luma, Color};
use std::fmt;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The WCAG contrast ratio between two colors, in `1.0..=21.0`. The order of the colors does not matter.
///
/// # Examples
/// ```
/// # use colorcard::{Color, contrast};
/// assert_eq!(contrast::contrast_ratio(Color::WHITE, Color::BLACK), 21.0);
/// ```
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (a, b) = (luma(a), luma(b));
    let (light, dark) = if a >= b { (a, b) } else { (b, a) };
    (light + 0.05) / (dark + 0.05)
}

/// The size class of text, which changes the required contrast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TextSize {
    /// Body text.
    #[default]
    Normal,
    /// Text at least 18pt, or 14pt bold.
    Large,
}

/// A WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WcagLevel {
    /// Not enough contrast for AA.
    Fail,
    /// Meets level AA.
    Aa,
    /// Meets level AAA.
    Aaa,
}

impl WcagLevel {
    /// Returns the highest level met by `ratio` for text of the given size.
    #[must_use]
    pub fn for_ratio(ratio: f64, size: TextSize) -> Self {
        let (aaa, aa) = match size {
            TextSize::Normal => (7.0, 4.5),
            TextSize::Large => (4.5, 3.0),
        };

        if ratio >= aaa {
            Self::Aaa
        } else if ratio >= aa {
            Self::Aa
        } else {
            Self::Fail
        }
    }

    /// The usual label of the level.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            WcagLevel::Fail => "Fail",
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The contrast between two colors and the WCAG levels it meets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContrastReport {
    /// The contrast ratio, in `1.0..=21.0`.
    pub ratio: f64,
    /// The level met by normal text.
    pub normal: WcagLevel,
    /// The level met by large text.
    pub large: WcagLevel,
}

impl ContrastReport {
    /// Evaluates the contrast between `foreground` and `background`.
    #[must_use]
    pub fn new(foreground: Color, background: Color) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            ratio,
            normal: WcagLevel::for_ratio(ratio, TextSize::Normal),
            large: WcagLevel::for_ratio(ratio, TextSize::Large),
        }
    }

    /// The level met by text of the given size.
    #[must_use]
    pub const fn level(&self, size: TextSize) -> WcagLevel {
        match size {
            TextSize::Normal => self.normal,
            TextSize::Large => self.large,
        }
    }
}

impl fmt::Display for ContrastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}:1 (normal {}, large {})", self.ratio, self.normal, self.large)
    }
}
