//! Conversions between 8-bit sRGB [`Color`]s and the HSB, HSL, CIELAB, and CMYK color models.
//!
//! Every conversion is total. Inputs outside a model's documented range are clamped
//! (hues are wrapped into `0.0..360.0`) and conversions back to sRGB clip to the gamut,
//! so any value can be turned back into a valid [`Color`].
//!
//! The cylindrical models and CIELAB are computed with [`palette`], in `f64`.
//! CIELAB uses the D65 white point.
//!
//! # Examples
//! ```
//! # use colorcard::{Color, colorspace::{self, Hsb}};
//! let red = Color::new(255, 0, 0);
//! let hsb = colorspace::rgb_to_hsb(red);
//! assert_eq!((hsb.hue, hsb.saturation, hsb.brightness), (0.0, 100.0, 100.0));
//! assert_eq!(colorspace::hsb_to_rgb(hsb), red);
//! ```

use crate::{normalize_name, Color, ParseError};
use palette::{encoding, white_point::D65, FromColor, LinSrgb, Srgb};
use std::{array, fmt, str::FromStr, sync::OnceLock};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// HSV over the sRGB primaries.
type SrgbHsv = palette::Hsv<encoding::Srgb, f64>;

/// HSL over the sRGB primaries.
type SrgbHsl = palette::Hsl<encoding::Srgb, f64>;

/// CIELAB relative to D65.
type CieLab = palette::Lab<D65, f64>;

/// Converts an encoded sRGB component in `0.0..=1.0` to linear light.
#[must_use]
pub fn srgb_to_linear(value: f64) -> f64 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a linear light component in `0.0..=1.0` to its sRGB encoding.
#[must_use]
pub fn linear_to_srgb(value: f64) -> f64 {
    if value <= 0.0031308 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Linearizes an 8-bit sRGB channel.
///
/// The result is exactly `0.0` for `0` and exactly `1.0` for `255`.
#[must_use]
pub fn linearize(channel: u8) -> f64 {
    static TABLE: OnceLock<[f64; 256]> = OnceLock::new();

    #[allow(clippy::cast_precision_loss)]
    let table = TABLE.get_or_init(|| array::from_fn(|i| srgb_to_linear(i as f64 / 255.0)));
    table[usize::from(channel)]
}

/// Quantizes a component in `0.0..=1.0` to a channel, clamping out of range values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn unit_to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Clamps `value` into `min..=max`, mapping `NaN` to `fallback`.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

/// Clamps a percentage into `0.0..=100.0`. `NaN` becomes `0.0`.
#[must_use]
pub fn clamp_percent(value: f64) -> f64 {
    clamp_or(value, 0.0, 100.0, 0.0)
}

/// Wraps a hue in degrees into `0.0..360.0`. Non-finite hues become `0.0`.
#[must_use]
pub fn normalize_hue(hue: f64) -> f64 {
    if !hue.is_finite() {
        return 0.0;
    }

    let hue = hue.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if hue >= 360.0 {
        0.0
    } else {
        hue
    }
}

/// Converts a [`Color`] to encoded `f64` sRGB.
fn unit_srgb(color: Color) -> Srgb<f64> {
    let [r, g, b] = color.to_array().map(|c| f64::from(c) / 255.0);
    Srgb::<f64>::new(r, g, b)
}

/// Quantizes encoded `f64` sRGB into a [`Color`].
fn color_from_unit(srgb: Srgb<f64>) -> Color {
    let (r, g, b) = srgb.into_components();
    Color::new(unit_to_channel(r), unit_to_channel(g), unit_to_channel(b))
}

/// A color in the HSB (a.k.a. HSV) model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsb {
    /// Hue in degrees, `0.0..360.0`.
    pub hue: f64,
    /// Saturation, `0.0..=100.0`.
    pub saturation: f64,
    /// Brightness, `0.0..=100.0`.
    pub brightness: f64,
}

impl Hsb {
    /// Creates a new [`Hsb`] value. Components are not normalized until conversion.
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self { hue, saturation, brightness }
    }
}

/// A color in the HSL model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hsl {
    /// Hue in degrees, `0.0..360.0`.
    pub hue: f64,
    /// Saturation, `0.0..=100.0`.
    pub saturation: f64,
    /// Lightness, `0.0..=100.0`.
    pub lightness: f64,
}

impl Hsl {
    /// Creates a new [`Hsl`] value. Components are not normalized until conversion.
    #[must_use]
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self { hue, saturation, lightness }
    }
}

/// A color in the CIELAB model (D65).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lab {
    /// Lightness, `0.0..=100.0`.
    pub l: f64,
    /// Green-red axis, roughly `-128.0..=127.0`.
    pub a: f64,
    /// Blue-yellow axis, roughly `-128.0..=127.0`.
    pub b: f64,
}

impl Lab {
    /// The accepted range of the `a` and `b` axes.
    pub const AB_RANGE: (f64, f64) = (-128.0, 127.0);

    /// Creates a new [`Lab`] value. Components are not clamped until conversion.
    #[must_use]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// A color in the subtractive CMYK model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cmyk {
    /// Cyan, `0.0..=100.0`.
    pub cyan: f64,
    /// Magenta, `0.0..=100.0`.
    pub magenta: f64,
    /// Yellow, `0.0..=100.0`.
    pub yellow: f64,
    /// Key (black), `0.0..=100.0`.
    pub key: f64,
}

impl Cmyk {
    /// Creates a new [`Cmyk`] value. Components are not clamped until conversion.
    #[must_use]
    pub const fn new(cyan: f64, magenta: f64, yellow: f64, key: f64) -> Self {
        Self { cyan, magenta, yellow, key }
    }
}

/// Converts a [`Color`] to HSB. Grays (zero saturation) get a hue of `0.0`.
#[must_use]
pub fn rgb_to_hsb(color: Color) -> Hsb {
    let hsv = SrgbHsv::from_color(unit_srgb(color));
    let saturation = hsv.saturation * 100.0;
    let hue = if saturation > 0.0 {
        normalize_hue(hsv.hue.into_positive_degrees())
    } else {
        0.0
    };

    Hsb::new(hue, saturation, hsv.value * 100.0)
}

/// Converts HSB to a [`Color`].
#[must_use]
pub fn hsb_to_rgb(hsb: Hsb) -> Color {
    let hsv = SrgbHsv::new(
        normalize_hue(hsb.hue),
        clamp_percent(hsb.saturation) / 100.0,
        clamp_percent(hsb.brightness) / 100.0,
    );
    color_from_unit(Srgb::from_color(hsv))
}

/// Converts a [`Color`] to HSL. Grays (zero saturation) get a hue of `0.0`.
#[must_use]
pub fn rgb_to_hsl(color: Color) -> Hsl {
    let hsl = SrgbHsl::from_color(unit_srgb(color));
    let saturation = hsl.saturation * 100.0;
    let hue = if saturation > 0.0 {
        normalize_hue(hsl.hue.into_positive_degrees())
    } else {
        0.0
    };

    Hsl::new(hue, saturation, hsl.lightness * 100.0)
}

/// Converts HSL to a [`Color`].
#[must_use]
pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let hsl = SrgbHsl::new(
        normalize_hue(hsl.hue),
        clamp_percent(hsl.saturation) / 100.0,
        clamp_percent(hsl.lightness) / 100.0,
    );
    color_from_unit(Srgb::from_color(hsl))
}

/// Converts a [`Color`] to CIELAB by way of linear sRGB and CIE XYZ.
#[must_use]
pub fn rgb_to_lab(color: Color) -> Lab {
    let [r, g, b] = color.to_array().map(linearize);
    let lab = CieLab::from_color(LinSrgb::<f64>::new(r, g, b));
    Lab::new(lab.l, lab.a, lab.b)
}

/// Converts CIELAB to a [`Color`], clipping colors outside the sRGB gamut.
#[must_use]
pub fn lab_to_rgb(lab: Lab) -> Color {
    let (min, max) = Lab::AB_RANGE;
    let lab = CieLab::new(
        clamp_percent(lab.l),
        clamp_or(lab.a, min, max, 0.0),
        clamp_or(lab.b, min, max, 0.0),
    );

    // from_color clamps the linear components into 0..=1
    let (r, g, b) = LinSrgb::<f64>::from_color(lab).into_components();
    let encode = |c: f64| unit_to_channel(linear_to_srgb(c));
    Color::new(encode(r), encode(g), encode(b))
}

/// Converts a [`Color`] to CMYK. Pure black is `(0, 0, 0, 100)`.
#[must_use]
pub fn rgb_to_cmyk(color: Color) -> Cmyk {
    let [r, g, b] = color.to_array().map(|c| f64::from(c) / 255.0);
    let key = 1.0 - r.max(g).max(b);
    if key >= 1.0 {
        return Cmyk::new(0.0, 0.0, 0.0, 100.0);
    }

    let ink = |c: f64| (1.0 - c - key) / (1.0 - key) * 100.0;
    Cmyk::new(ink(r), ink(g), ink(b), key * 100.0)
}

/// Converts CMYK to a [`Color`].
#[must_use]
pub fn cmyk_to_rgb(cmyk: Cmyk) -> Color {
    let key = 1.0 - clamp_percent(cmyk.key) / 100.0;
    let channel = |c: f64| unit_to_channel((1.0 - clamp_percent(c) / 100.0) * key);
    Color::new(channel(cmyk.cyan), channel(cmyk.magenta), channel(cmyk.yellow))
}

impl From<Color> for Hsb {
    fn from(color: Color) -> Self {
        rgb_to_hsb(color)
    }
}

impl From<Hsb> for Color {
    fn from(hsb: Hsb) -> Self {
        hsb_to_rgb(hsb)
    }
}

impl From<Color> for Hsl {
    fn from(color: Color) -> Self {
        rgb_to_hsl(color)
    }
}

impl From<Hsl> for Color {
    fn from(hsl: Hsl) -> Self {
        hsl_to_rgb(hsl)
    }
}

impl From<Color> for Lab {
    fn from(color: Color) -> Self {
        rgb_to_lab(color)
    }
}

impl From<Lab> for Color {
    fn from(lab: Lab) -> Self {
        lab_to_rgb(lab)
    }
}

impl From<Color> for Cmyk {
    fn from(color: Color) -> Self {
        rgb_to_cmyk(color)
    }
}

impl From<Cmyk> for Color {
    fn from(cmyk: Cmyk) -> Self {
        cmyk_to_rgb(cmyk)
    }
}

/// Selects one of the supported color models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorModel {
    /// Hue, saturation, brightness.
    Hsb,
    /// Hue, saturation, lightness.
    Hsl,
    /// CIELAB.
    Lab,
    /// Cyan, magenta, yellow, key.
    Cmyk,
}

impl ColorModel {
    /// All color models, in display order.
    pub const ALL: [Self; 4] = [Self::Hsb, Self::Hsl, Self::Lab, Self::Cmyk];

    /// The lowercase name of the model.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ColorModel::Hsb => "hsb",
            ColorModel::Hsl => "hsl",
            ColorModel::Lab => "lab",
            ColorModel::Cmyk => "cmyk",
        }
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ColorModel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_name(s).as_str() {
            "hsb" | "hsv" => Ok(Self::Hsb),
            "hsl" => Ok(Self::Hsl),
            "lab" | "cielab" => Ok(Self::Lab),
            "cmyk" => Ok(Self::Cmyk),
            _ => Err(ParseError::UnknownModel(s.to_owned())),
        }
    }
}

/// A color expressed in one of the [`ColorModel`]s.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorSpaceValue {
    /// An HSB color.
    Hsb(Hsb),
    /// An HSL color.
    Hsl(Hsl),
    /// A CIELAB color.
    Lab(Lab),
    /// A CMYK color.
    Cmyk(Cmyk),
}

impl ColorSpaceValue {
    /// Converts `color` into the given model.
    #[must_use]
    pub fn from_color(color: Color, model: ColorModel) -> Self {
        match model {
            ColorModel::Hsb => Self::Hsb(rgb_to_hsb(color)),
            ColorModel::Hsl => Self::Hsl(rgb_to_hsl(color)),
            ColorModel::Lab => Self::Lab(rgb_to_lab(color)),
            ColorModel::Cmyk => Self::Cmyk(rgb_to_cmyk(color)),
        }
    }

    /// The model this value is expressed in.
    #[must_use]
    pub const fn model(&self) -> ColorModel {
        match self {
            ColorSpaceValue::Hsb(_) => ColorModel::Hsb,
            ColorSpaceValue::Hsl(_) => ColorModel::Hsl,
            ColorSpaceValue::Lab(_) => ColorModel::Lab,
            ColorSpaceValue::Cmyk(_) => ColorModel::Cmyk,
        }
    }

    /// Converts the value back into a [`Color`].
    #[must_use]
    pub fn to_color(self) -> Color {
        match self {
            ColorSpaceValue::Hsb(hsb) => hsb_to_rgb(hsb),
            ColorSpaceValue::Hsl(hsl) => hsl_to_rgb(hsl),
            ColorSpaceValue::Lab(lab) => lab_to_rgb(lab),
            ColorSpaceValue::Cmyk(cmyk) => cmyk_to_rgb(cmyk),
        }
    }
}

impl From<ColorSpaceValue> for Color {
    fn from(value: ColorSpaceValue) -> Self {
        value.to_color()
    }
}

impl Color {
    /// Converts this color into the given model.
    #[must_use]
    pub fn to_model(self, model: ColorModel) -> ColorSpaceValue {
        ColorSpaceValue::from_color(self, model)
    }
}

/// A color summarized in every model with components rounded to integers, for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorInfo {
    /// The summarized color.
    pub color: Color,
    /// `#RRGGBB` hex.
    pub hex: String,
    /// Rounded HSB; the hue is wrapped into `0..360`.
    pub hsb: [u16; 3],
    /// Rounded HSL; the hue is wrapped into `0..360`.
    pub hsl: [u16; 3],
    /// Rounded CIELAB.
    pub lab: [i16; 3],
    /// Rounded CMYK.
    pub cmyk: [u8; 4],
}

impl ColorInfo {
    /// Summarizes `color`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(color: Color) -> Self {
        let hue = |hue: f64| (hue.round() as u16) % 360;
        let percent = |value: f64| value.round() as u16;

        let hsb = rgb_to_hsb(color);
        let hsl = rgb_to_hsl(color);
        let lab = rgb_to_lab(color);
        let cmyk = rgb_to_cmyk(color);

        Self {
            color,
            hex: color.to_hex(),
            hsb: [hue(hsb.hue), percent(hsb.saturation), percent(hsb.brightness)],
            hsl: [hue(hsl.hue), percent(hsl.saturation), percent(hsl.lightness)],
            lab: [lab.l, lab.a, lab.b].map(|c| c.round() as i16),
            cmyk: [cmyk.cyan, cmyk.magenta, cmyk.yellow, cmyk.key].map(|c| c.round() as u8),
        }
    }
}

impl From<Color> for ColorInfo {
    fn from(color: Color) -> Self {
        Self::new(color)
    }
}

impl fmt::Display for ColorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.color.to_array();
        let [h, s, v] = self.hsb;
        let [hl, sl, l] = self.hsl;
        let [ll, a, lb] = self.lab;
        let [c, m, y, k] = self.cmyk;
        write!(
            f,
            "{} rgb({r}, {g}, {b}) hsb({h}, {s}, {v}) hsl({hl}, {sl}, {l}) lab({ll}, {a}, {lb}) cmyk({c}, {m}, {y}, {k})",
            self.hex
        )
    }
}
