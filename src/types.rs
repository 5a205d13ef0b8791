//! Contains the color and pixel slice types shared across the crate.

use crate::{ParseError, MAX_PIXELS};
use palette::{cast::ArrayCast, Srgb};
use std::{
    error::Error,
    fmt::{self, Debug, Display},
    ops::Deref,
    str::FromStr,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "image")]
use {image::RgbImage, palette::cast::ComponentsAs};

/// Color types that can be reinterpreted as an array of `N` components.
///
/// This is implemented for [`Color`], `palette::Srgb<u8>`, and any other
/// [`ArrayCast`] type, so pixel buffers can be binned without copying.
pub trait ColorComponents<Component, const N: usize>:
    ArrayCast<Array = [Component; N]> + Copy + 'static
{
}

impl<Color, Component, const N: usize> ColorComponents<Component, N> for Color where
    Color: ArrayCast<Array = [Component; N]> + Copy + 'static
{
}

/// An 8-bit sRGB color.
///
/// Every channel is always within `0..=255`, and a [`Color`] cannot be modified once created.
/// Conversions into a [`Color`] clamp instead of wrapping.
///
/// # Examples
/// ```
/// # use colorcard::Color;
/// # fn main() -> Result<(), colorcard::ParseError> {
/// let orange = Color::new(255, 128, 0);
/// assert_eq!(orange.to_hex(), "#FF8000");
/// assert_eq!("#ff8000".parse::<Color>()?, orange);
/// # Ok(())
/// # }
/// ```
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// The red channel.
    red: u8,
    /// The green channel.
    green: u8,
    /// The blue channel.
    blue: u8,
}

// Color is repr(C) with three u8 fields, so it has the same layout as [u8; 3].
#[allow(unsafe_code)]
unsafe impl ArrayCast for Color {
    type Array = [u8; 3];
}

impl Color {
    /// Pure black, `#000000`.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white, `#FFFFFF`.
    pub const WHITE: Self = Self::new(u8::MAX, u8::MAX, u8::MAX);

    /// Creates a new [`Color`] from its red, green, and blue channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Returns the red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        self.red
    }

    /// Returns the green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        self.green
    }

    /// Returns the blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.blue
    }

    /// Returns the channels as a `[red, green, blue]` array.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Formats the color as an uppercase `#RRGGBB` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

impl From<[u8; 3]> for Color {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<Color> for [u8; 3] {
    fn from(color: Color) -> Self {
        color.to_array()
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.red, color.green, color.blue)
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    /// Parses `#RRGGBB` or the shorthand `#RGB`. The leading `#` is optional
    /// and hex digits are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidHex(s.to_owned());

        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let nibble = |i: usize| {
            digits
                .get(i..=i)
                .and_then(|d| u8::from_str_radix(d, 16).ok())
                .ok_or_else(invalid)
        };

        match digits.len() {
            3 => Ok(Self::new(nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17)),
            6 => Ok(Self::new(
                (nibble(0)? << 4) | nibble(1)?,
                (nibble(2)? << 4) | nibble(3)?,
                (nibble(4)? << 4) | nibble(5)?,
            )),
            _ => Err(invalid()),
        }
    }
}

/// An error type for when the length of an input (e.g., `Vec` or slice)
/// is above the maximum supported value.
///
/// The inner value is the maximum supported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AboveMaxLen<T>(pub T);

impl<T: Display> Display for AboveMaxLen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "above the maximum length of {}", self.0)
    }
}

impl<T: Debug + Display> Error for AboveMaxLen<T> {}

/// A simple new type wrapper around `&'a [Color]` with the invariant that the length of the
/// inner slice must not be greater than [`MAX_PIXELS`].
///
/// Histogram counters are `u32`s, so this bound guarantees that no counter can overflow.
///
/// # Examples
/// Use `try_into` or [`ColorSlice::from_truncated`] to create [`ColorSlice`]s.
///
/// From a raw color slice:
/// ```
/// # use colorcard::{AboveMaxLen, Color, ColorSlice};
/// # fn main() -> Result<(), AboveMaxLen<u32>> {
/// let pixels = vec![Color::new(0, 0, 0)];
/// let colors: ColorSlice<_> = pixels.as_slice().try_into()?;
/// # Ok(())
/// # }
/// ```
///
/// From an image (needs the `image` feature to be enabled):
/// ```no_run
/// # use colorcard::{Color, ColorSlice};
/// # #[cfg(feature = "image")]
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let img = image::open("some image")?.into_rgb8();
/// let colors = ColorSlice::<Color>::try_from(&img)?;
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "image"))]
/// # fn main() {}
/// ```
#[derive(Debug, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorSlice<'a, C>(&'a [C]);

impl<C> Clone for ColorSlice<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ColorSlice<'_, C> {}

impl<'a, C> ColorSlice<'a, C> {
    /// Creates a new [`ColorSlice`] by truncating the input slice to a max length of [`MAX_PIXELS`].
    pub fn from_truncated(colors: &'a [C]) -> Self {
        Self(&colors[..colors.len().min(MAX_PIXELS as usize)])
    }

    /// Returns the length of the slice as a `u32`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn num_colors(&self) -> u32 {
        self.0.len() as u32
    }
}

impl<C> AsRef<[C]> for ColorSlice<'_, C> {
    fn as_ref(&self) -> &[C] {
        self
    }
}

impl<C> Deref for ColorSlice<'_, C> {
    type Target = [C];

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl<'a, C> From<ColorSlice<'a, C>> for &'a [C] {
    fn from(val: ColorSlice<'a, C>) -> Self {
        val.0
    }
}

impl<'a, C> TryFrom<&'a [C]> for ColorSlice<'a, C> {
    type Error = AboveMaxLen<u32>;

    fn try_from(slice: &'a [C]) -> Result<Self, Self::Error> {
        if slice.len() <= MAX_PIXELS as usize {
            Ok(Self(slice))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}

#[cfg(feature = "image")]
impl<'a, C> TryFrom<&'a RgbImage> for ColorSlice<'a, C>
where
    C: ColorComponents<u8, 3>,
{
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
        let pixels = image.pixels().len();
        if pixels <= MAX_PIXELS as usize {
            let buf = &image.as_raw()[..(pixels * 3)];
            Ok(Self(buf.components_as()))
        } else {
            Err(AboveMaxLen(MAX_PIXELS))
        }
    }
}
