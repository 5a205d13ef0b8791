//! Color harmony palettes generated from a base hue.
//!
//! A [`HarmonyScheme`] lays out a few cards around the color wheel. Each card is an HSB color
//! whose hue is the base hue plus a fixed offset, and whose saturation and brightness
//! are the requested values scaled by a per card shade factor.
//!
//! Offsets can be applied on the additive RGB wheel or on the painter's RYB wheel
//! (see [`ColorWheel`]). Generation is a pure function of its inputs.
//!
//! # Examples
//! ```
//! # use colorcard::{Color, harmony::{self, HarmonyScheme}};
//! let palette = harmony::generate(350.0, HarmonyScheme::Analogous, 100.0, 100.0);
//! assert_eq!(palette.hues(), [320.0, 350.0, 20.0]);
//! assert_eq!(palette.colors().len(), 3);
//! ```

use crate::{
    colorspace::{clamp_percent, hsb_to_rgb, normalize_hue, Hsb},
    normalize_name, Color, ParseError,
};
use log::trace;
use std::{fmt, str::FromStr};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A harmony card: a hue offset and the factors applied to saturation and brightness.
#[derive(Debug, Clone, Copy)]
struct Card {
    /// Degrees added to the base hue.
    offset: f64,
    /// Multiplies the requested saturation.
    saturation: f64,
    /// Multiplies the requested brightness.
    brightness: f64,
}

impl Card {
    /// A card at `offset` with the requested saturation and brightness.
    const fn at(offset: f64) -> Self {
        Self::shade(offset, 1.0, 1.0)
    }

    /// A card at `offset` with scaled saturation and brightness.
    const fn shade(offset: f64, saturation: f64, brightness: f64) -> Self {
        Self { offset, saturation, brightness }
    }
}

/// Four progressively lighter, less saturated shades of the base hue.
const MONOCHROMATIC: [Card; 4] = [
    Card::shade(0.0, 1.0, 1.0),
    Card::shade(0.0, 0.75, 0.9),
    Card::shade(0.0, 0.5, 0.8),
    Card::shade(0.0, 0.25, 0.7),
];

/// The base hue and its neighbors 30 degrees to either side.
const ANALOGOUS: [Card; 3] = [Card::at(-30.0), Card::at(0.0), Card::at(30.0)];

/// Three shades of the base hue and two of its complement.
const COMPLEMENTARY: [Card; 5] = [
    Card::shade(0.0, 1.0, 1.0),
    Card::shade(0.0, 0.75, 0.9),
    Card::shade(0.0, 0.5, 0.8),
    Card::shade(180.0, 1.0, 1.0),
    Card::shade(180.0, 0.75, 0.9),
];

/// The base hue and the two neighbors of its complement.
const SPLIT_COMPLEMENTARY: [Card; 3] = [Card::at(0.0), Card::at(150.0), Card::at(210.0)];

/// Two complementary pairs 60 degrees apart.
const DOUBLE_COMPLEMENTARY: [Card; 4] =
    [Card::at(0.0), Card::at(60.0), Card::at(180.0), Card::at(240.0)];

/// The supported harmony schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HarmonyScheme {
    /// Shades of a single hue.
    Monochromatic,
    /// Adjacent hues.
    Analogous,
    /// A hue and its opposite.
    Complementary,
    /// A hue and the two hues adjacent to its opposite.
    SplitComplementary,
    /// Two pairs of opposite hues.
    DoubleComplementary,
}

impl HarmonyScheme {
    /// All schemes.
    pub const ALL: [Self; 5] = [
        Self::Monochromatic,
        Self::Analogous,
        Self::Complementary,
        Self::SplitComplementary,
        Self::DoubleComplementary,
    ];

    /// The cards laid out by this scheme.
    const fn cards(self) -> &'static [Card] {
        match self {
            HarmonyScheme::Monochromatic => &MONOCHROMATIC,
            HarmonyScheme::Analogous => &ANALOGOUS,
            HarmonyScheme::Complementary => &COMPLEMENTARY,
            HarmonyScheme::SplitComplementary => &SPLIT_COMPLEMENTARY,
            HarmonyScheme::DoubleComplementary => &DOUBLE_COMPLEMENTARY,
        }
    }

    /// The distinct hue offsets of this scheme, in degrees.
    #[must_use]
    pub const fn hue_offsets(self) -> &'static [f64] {
        match self {
            HarmonyScheme::Monochromatic => &[0.0],
            HarmonyScheme::Analogous => &[-30.0, 0.0, 30.0],
            HarmonyScheme::Complementary => &[0.0, 180.0],
            HarmonyScheme::SplitComplementary => &[0.0, 150.0, 210.0],
            HarmonyScheme::DoubleComplementary => &[0.0, 60.0, 180.0, 240.0],
        }
    }

    /// The number of colors in a palette of this scheme.
    #[must_use]
    pub const fn card_count(self) -> usize {
        self.cards().len()
    }

    /// The kebab-case name of the scheme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            HarmonyScheme::Monochromatic => "monochromatic",
            HarmonyScheme::Analogous => "analogous",
            HarmonyScheme::Complementary => "complementary",
            HarmonyScheme::SplitComplementary => "split-complementary",
            HarmonyScheme::DoubleComplementary => "double-complementary",
        }
    }
}

impl fmt::Display for HarmonyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for HarmonyScheme {
    type Err = ParseError;

    /// Parses a scheme name. Case, spaces, and underscores are ignored,
    /// and `mono`, `split`, and `double` are accepted as short forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "monochromatic" | "mono" => Ok(Self::Monochromatic),
            "analogous" => Ok(Self::Analogous),
            "complementary" => Ok(Self::Complementary),
            "split-complementary" | "split" => Ok(Self::SplitComplementary),
            "double-complementary" | "double" => Ok(Self::DoubleComplementary),
            _ => Err(ParseError::UnknownScheme(s.to_owned())),
        }
    }
}

/// The color wheel on which hue offsets are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorWheel {
    /// The additive wheel, where red and cyan are opposites.
    #[default]
    Rgb,
    /// The painter's wheel with red, yellow, and blue primaries, where red and green are opposites.
    Ryb,
}

impl ColorWheel {
    /// Rotates an RGB hue by `offset` degrees on this wheel and returns the resulting RGB hue.
    #[must_use]
    pub fn rotate(self, hue: f64, offset: f64) -> f64 {
        match self {
            ColorWheel::Rgb => normalize_hue(hue + offset),
            ColorWheel::Ryb => ryb_to_rgb_hue(rgb_to_ryb_hue(hue) + offset),
        }
    }

    /// The lowercase name of the wheel.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ColorWheel::Rgb => "rgb",
            ColorWheel::Ryb => "ryb",
        }
    }
}

impl fmt::Display for ColorWheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ColorWheel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "rgb" => Ok(Self::Rgb),
            "ryb" => Ok(Self::Ryb),
            _ => Err(ParseError::UnknownWheel(s.to_owned())),
        }
    }
}

/// Maps a hue on the RGB wheel to the RYB wheel.
///
/// The red to yellow arc is stretched to a third of the wheel and green moves to 180 degrees.
/// Hues from blue through magenta back to red are unchanged.
#[must_use]
pub fn rgb_to_ryb_hue(hue: f64) -> f64 {
    let hue = normalize_hue(hue);
    if hue < 60.0 {
        hue * 2.0
    } else if hue < 120.0 {
        hue + 60.0
    } else if hue < 180.0 {
        180.0 + (hue - 120.0) * 0.5
    } else if hue < 240.0 {
        210.0 + (hue - 180.0) * 0.5
    } else {
        hue
    }
}

/// Maps a hue on the RYB wheel back to the RGB wheel. This is the inverse of [`rgb_to_ryb_hue`].
#[must_use]
pub fn ryb_to_rgb_hue(hue: f64) -> f64 {
    let hue = normalize_hue(hue);
    if hue < 120.0 {
        hue * 0.5
    } else if hue < 180.0 {
        hue - 60.0
    } else if hue < 210.0 {
        120.0 + (hue - 180.0) * 2.0
    } else if hue < 240.0 {
        180.0 + (hue - 210.0) * 2.0
    } else {
        hue
    }
}

/// A generated harmony palette.
///
/// With the `serde` feature, a palette is serialized as the [`Harmony`] that generated it
/// and is regenerated when deserialized, so its cards always match its inputs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "Harmony", from = "Harmony"))]
pub struct Palette {
    /// The card colors.
    colors: Vec<Color>,
    /// The RGB hue of each card.
    hues: Vec<f64>,
    /// The scheme used.
    scheme: HarmonyScheme,
    /// The normalized base hue.
    base_hue: f64,
    /// The clamped saturation.
    saturation: f64,
    /// The clamped lightness.
    lightness: f64,
    /// The wheel the offsets were applied on.
    wheel: ColorWheel,
}

impl Palette {
    /// The card colors, in scheme order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// The RGB hue of each card, in `0.0..360.0`.
    #[must_use]
    pub fn hues(&self) -> &[f64] {
        &self.hues
    }

    /// The scheme that produced this palette.
    #[must_use]
    pub fn scheme(&self) -> HarmonyScheme {
        self.scheme
    }

    /// The base hue, wrapped into `0.0..360.0`.
    #[must_use]
    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    /// The requested saturation, clamped into `0.0..=100.0`.
    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.saturation
    }

    /// The requested lightness, clamped into `0.0..=100.0`.
    #[must_use]
    pub fn lightness(&self) -> f64 {
        self.lightness
    }

    /// The wheel on which hue offsets were applied.
    #[must_use]
    pub fn wheel(&self) -> ColorWheel {
        self.wheel
    }

    /// Consumes the palette and returns its colors.
    #[must_use]
    pub fn into_colors(self) -> Vec<Color> {
        self.colors
    }
}

impl AsRef<[Color]> for Palette {
    fn as_ref(&self) -> &[Color] {
        &self.colors
    }
}

impl From<Harmony> for Palette {
    fn from(harmony: Harmony) -> Self {
        harmony.generate()
    }
}

impl From<Palette> for Harmony {
    fn from(palette: Palette) -> Self {
        Harmony::new(palette.base_hue, palette.scheme)
            .saturation(palette.saturation)
            .lightness(palette.lightness)
            .wheel(palette.wheel)
    }
}

/// A builder for harmony [`Palette`]s.
///
/// Defaults to full saturation and lightness on the RGB wheel.
///
/// # Examples
/// ```
/// # use colorcard::{Color, harmony::{ColorWheel, Harmony, HarmonyScheme}};
/// let palette = Harmony::new(0.0, HarmonyScheme::Complementary)
///     .wheel(ColorWheel::Ryb)
///     .generate();
///
/// // red's complement on the painter's wheel is green
/// assert_eq!(palette.colors()[3], Color::new(0, 255, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[must_use]
pub struct Harmony {
    /// The base hue in degrees.
    hue: f64,
    /// The scheme to lay out.
    scheme: HarmonyScheme,
    /// Saturation percentage.
    saturation: f64,
    /// Lightness percentage.
    lightness: f64,
    /// The wheel to rotate hues on.
    wheel: ColorWheel,
}

impl Harmony {
    /// The default saturation percentage.
    pub const DEFAULT_SATURATION: f64 = 100.0;

    /// The default lightness percentage.
    pub const DEFAULT_LIGHTNESS: f64 = 100.0;

    /// Creates a new [`Harmony`] for the given base hue and scheme.
    pub const fn new(hue: f64, scheme: HarmonyScheme) -> Self {
        Self {
            hue,
            scheme,
            saturation: Self::DEFAULT_SATURATION,
            lightness: Self::DEFAULT_LIGHTNESS,
            wheel: ColorWheel::Rgb,
        }
    }

    /// Sets the base hue. Hues are wrapped into `0.0..360.0`.
    pub fn hue(mut self, hue: f64) -> Self {
        self.hue = hue;
        self
    }

    /// Sets the scheme.
    pub fn scheme(mut self, scheme: HarmonyScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the saturation percentage. Values are clamped into `0.0..=100.0`.
    pub fn saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    /// Sets the lightness (HSB brightness) percentage. Values are clamped into `0.0..=100.0`.
    pub fn lightness(mut self, lightness: f64) -> Self {
        self.lightness = lightness;
        self
    }

    /// Sets the color wheel.
    pub fn wheel(mut self, wheel: ColorWheel) -> Self {
        self.wheel = wheel;
        self
    }

    /// Generates the palette.
    #[must_use]
    pub fn generate(&self) -> Palette {
        let Self { hue, scheme, saturation, lightness, wheel } = *self;
        let base_hue = normalize_hue(hue);
        let saturation = clamp_percent(saturation);
        let lightness = clamp_percent(lightness);

        let (hues, colors) = scheme
            .cards()
            .iter()
            .map(|card| {
                let hue = wheel.rotate(base_hue, card.offset);
                let hsb = Hsb::new(hue, saturation * card.saturation, lightness * card.brightness);
                (hue, hsb_to_rgb(hsb))
            })
            .unzip::<_, _, Vec<_>, Vec<_>>();

        trace!(
            "generated {} {scheme} colors on the {wheel} wheel from hue {base_hue}",
            colors.len()
        );

        Palette { colors, hues, scheme, base_hue, saturation, lightness, wheel }
    }
}

/// Generates a harmony palette on the RGB wheel.
///
/// `saturation` and `lightness` are percentages and are clamped into `0.0..=100.0`,
/// and `hue` is wrapped into `0.0..360.0`.
#[must_use]
pub fn generate(hue: f64, scheme: HarmonyScheme, saturation: f64, lightness: f64) -> Palette {
    Harmony::new(hue, scheme)
        .saturation(saturation)
        .lightness(lightness)
        .generate()
}
