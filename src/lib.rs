//! A color science engine for palette and reference tools.
//!
//! `colorcard` converts 8-bit sRGB colors between color models, measures relative luminance,
//! bins (sampled) images into tonal and channel histograms, extracts dominant colors,
//! and generates harmony palettes.
//! All functions are pure: the same inputs always give the same outputs, and numeric inputs
//! outside their documented ranges are clamped or wrapped rather than rejected.
//!
//! The algorithms live in the following modules:
//! - [`colorspace`]: HSB, HSL, CIELAB, and CMYK conversions and the sRGB transfer functions.
//! - [`luminance`]: Rec. 709 relative luminance and the five [`LuminanceZone`](luminance::LuminanceZone)s.
//! - [`histogram`]: zone, channel, luma, and hue histograms with stride, budget, or grid sampling.
//! - [`extract`]: dominant colors of an image and where they sit.
//! - [`harmony`]: monochromatic, analogous, and (split/double) complementary palettes.
//! - [`contrast`]: WCAG contrast ratios.
//! - [`vision`]: color vision deficiency simulation.
//!
//! # Features
//! To reduce dependencies and compile times, `colorcard` has several `cargo` features
//! that can be turned off or on:
//! - `threads`: exposes parallel versions of the histogram, extraction, and simulation functions via [`rayon`].
//! - `image`: enables integration with the [`image`] crate.
//! - `serde`: derives `Serialize` and `Deserialize` for the value types.
//!
//! # Example
//! ```no_run
//! # use colorcard::{ColorSlice, Color, colorspace, histogram::{self, Sampling}, harmony::{self, HarmonyScheme}};
//! # #[cfg(all(feature = "image", feature = "threads"))]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("some image")?.into_rgb8();
//! let pixels = ColorSlice::<Color>::try_from(&img)?;
//!
//! let bins = histogram::histogram_par(pixels, Sampling::default());
//! println!("{:?}", bins.zone_fractions());
//!
//! let accent: Color = "#3366cc".parse()?;
//! let hue = colorspace::rgb_to_hsb(accent).hue;
//! let palette = harmony::generate(hue, HarmonyScheme::Analogous, 80.0, 90.0);
//! println!("{:?}", palette.colors());
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "image", feature = "threads")))]
//! # fn main() {}
//! ```

#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::pedantic,
    clippy::cargo,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    clippy::unwrap_in_result,
    clippy::expect_used,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_slice,
    missing_docs,
    clippy::missing_docs_in_private_items,
    rustdoc::all,
    clippy::float_cmp_const,
    clippy::lossy_float_literal
)]
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::many_single_char_names,
    clippy::missing_panics_doc,
    clippy::unreadable_literal,
    clippy::wildcard_imports
)]

mod error;
mod types;

pub mod colorspace;
pub mod contrast;
pub mod extract;
pub mod harmony;
pub mod histogram;
pub mod luminance;
pub mod vision;

pub use error::*;
pub use types::*;

/// The maximum supported image size in number of pixels is `u32::MAX`.
pub const MAX_PIXELS: u32 = u32::MAX;

/// Lowercases a name and replaces spaces and underscores with dashes.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}
