//! Simulation of color vision deficiencies.
//!
//! Colors are linearized, moved into an LMS cone response space with the Bradford matrix,
//! projected to remove the missing cone's contribution, and converted back to sRGB.

use crate::{
    colorspace::{linear_to_srgb, linearize, unit_to_channel},
    normalize_name, Color, ParseError,
};
use std::{fmt, str::FromStr};
#[cfg(feature = "threads")]
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear sRGB to LMS.
const RGB_TO_LMS: [[f64; 3]; 3] = [
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
];

/// LMS to linear sRGB.
const LMS_TO_RGB: [[f64; 3]; 3] = [
    [0.986993, -0.147054, 0.159963],
    [0.432305, 0.51836, 0.049291],
    [-0.008529, 0.040043, 0.968487],
];

/// Multiplies a 3x3 matrix with a column vector.
fn mul(matrix: &[[f64; 3]; 3], [x, y, z]: [f64; 3]) -> [f64; 3] {
    matrix.map(|[a, b, c]| a * x + b * y + c * z)
}

/// A kind of color vision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Vision {
    /// Typical trichromatic vision. Colors are unchanged.
    #[default]
    Normal,
    /// No long wavelength (red) cones.
    Protanopia,
    /// No medium wavelength (green) cones.
    Deuteranopia,
    /// No short wavelength (blue) cones.
    Tritanopia,
    /// No color perception at all.
    Achromatopsia,
}

impl Vision {
    /// All kinds of vision.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
    ];

    /// The lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Vision::Normal => "normal",
            Vision::Protanopia => "protanopia",
            Vision::Deuteranopia => "deuteranopia",
            Vision::Tritanopia => "tritanopia",
            Vision::Achromatopsia => "achromatopsia",
        }
    }

    /// Replaces the response of the missing cone type.
    fn project(self, [l, m, s]: [f64; 3]) -> [f64; 3] {
        match self {
            Vision::Normal => [l, m, s],
            Vision::Protanopia => [2.02344 * m - 2.52581 * s, m, s],
            Vision::Deuteranopia => [l, 0.49421 * l + 1.24827 * s, s],
            Vision::Tritanopia => [l, m, -0.395913 * l + 0.801109 * m],
            Vision::Achromatopsia => [0.299 * l + 0.587 * m + 0.114 * s; 3],
        }
    }
}

impl fmt::Display for Vision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Vision {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|vision| vision.name() == name)
            .ok_or_else(|| ParseError::UnknownVision(s.to_owned()))
    }
}

/// Simulates how `color` appears with the given kind of vision.
#[must_use]
pub fn simulate(color: Color, vision: Vision) -> Color {
    if vision == Vision::Normal {
        return color;
    }

    let lms = mul(&RGB_TO_LMS, color.to_array().map(linearize));
    let rgb = mul(&LMS_TO_RGB, vision.project(lms));
    Color::from(rgb.map(|c| unit_to_channel(linear_to_srgb(c))))
}

/// Simulates a slice of colors.
#[must_use]
pub fn simulate_all(colors: &[Color], vision: Vision) -> Vec<Color> {
    colors.iter().map(|&color| simulate(color, vision)).collect()
}

/// Simulates a slice of colors in parallel.
#[cfg(feature = "threads")]
#[must_use]
pub fn simulate_all_par(colors: &[Color], vision: Vision) -> Vec<Color> {
    colors.par_iter().map(|&color| simulate(color, vision)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;

    #[test]
    fn normal_is_identity() {
        let colors = test_data_1024();
        assert_eq!(simulate_all(&colors, Vision::Normal), colors);
    }

    #[test]
    fn black_stays_black() {
        for vision in Vision::ALL {
            assert_eq!(simulate(Color::BLACK, vision), Color::BLACK, "{vision}");
        }
    }

    #[test]
    fn achromatopsia_is_gray() {
        for color in test_data_1024() {
            let [r, g, b] = simulate(color, Vision::Achromatopsia).to_array();
            assert!(r.abs_diff(g) <= 1 && g.abs_diff(b) <= 1, "{color} became ({r}, {g}, {b})");
        }
    }

    #[test]
    fn deficiencies_shift_saturated_colors() {
        let red = Color::new(255, 0, 0);
        let protan = simulate(red, Vision::Protanopia);
        let deutan = simulate(red, Vision::Deuteranopia);
        assert_ne!(protan, red);
        assert_ne!(deutan, red);
        assert_ne!(protan, deutan);
    }

    #[test]
    fn vision_names_parse() {
        for vision in Vision::ALL {
            assert_eq!(vision.to_string().parse::<Vision>(), Ok(vision));
        }
        assert_eq!(
            "monochrome".parse::<Vision>(),
            Err(ParseError::UnknownVision("monochrome".to_owned()))
        );
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let colors = test_data_1024();
        for vision in Vision::ALL {
            assert_eq!(simulate_all(&colors, vision), simulate_all_par(&colors, vision));
        }
    }
}
