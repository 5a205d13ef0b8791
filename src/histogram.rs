//! Histograms over (sampled) pixel buffers.
//!
//! [`HistogramBins`] counts the [`LuminanceZone`] of each sampled pixel together with
//! 256-level histograms of its red, green, and blue channels.
//! [`LumaHistogram`] and [`HueHistogram`] count display luma and hue instead.
//! All of these implement [`Histogram`], so the same sampling drivers work for each:
//! - [`compute`] and [`compute_par`] walk a [`ColorSlice`] in raster order
//!   according to a [`Sampling`] policy.
//! - [`PixelGrid::compute`] and [`PixelGrid::compute_par`] sample a 2D grid
//!   of rows and columns, always including the last row and column.
//!
//! Bin counters are `u32`s. Since a [`ColorSlice`] holds at most [`MAX_PIXELS`](crate::MAX_PIXELS)
//! pixels, no counter can overflow while binning a single slice. Merging histograms of
//! several slices saturates at `u32::MAX` instead of wrapping.
//!
//! # Examples
//! ```
//! # use colorcard::{Color, ColorSlice, histogram::{self, Sampling}, luminance::LuminanceZone};
//! # fn main() -> Result<(), colorcard::AboveMaxLen<u32>> {
//! let pixels = vec![Color::BLACK, Color::WHITE, Color::WHITE, Color::new(255, 0, 0)];
//! let pixels = ColorSlice::try_from(pixels.as_slice())?;
//!
//! let bins = histogram::histogram(pixels, Sampling::Stride(1));
//! assert_eq!(bins.num_samples(), 4);
//! assert_eq!(bins.zone_count(LuminanceZone::Whites), 2);
//! assert_eq!(bins.red()[255], 3);
//! # Ok(())
//! # }
//! ```

use crate::{
    colorspace::rgb_to_hsb,
    luminance::{luma8_components, luma_components, LuminanceZone, ZONE_COUNT},
    Color, ColorComponents, ColorSlice,
};
use log::debug;
use palette::cast::AsArrays;
use std::ops::{Add, AddAssign, Deref, Index};
#[cfg(feature = "image")]
use {crate::AboveMaxLen, image::RgbImage};
#[cfg(feature = "threads")]
use rayon::prelude::*;

/// The number of levels in a channel or luma histogram.
pub const LEVELS: usize = 256;

/// The number of one degree bins in a hue histogram.
pub const HUE_BINS: usize = 360;

/// The default maximum number of pixels visited by [`Sampling::Budget`].
pub const DEFAULT_SAMPLE_BUDGET: u32 = 1 << 18;

/// Pixels with an HSB saturation or brightness at or below this percentage
/// are treated as neutral and left out of a [`HueHistogram`].
pub const NEUTRAL_THRESHOLD: f64 = 10.0;

/// A fixed number of `u32` counters. Counts saturate at `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bins<const B: usize>([u32; B]);

impl<const B: usize> Bins<B> {
    /// Creates a new set of bins with all counts zero.
    #[must_use]
    pub const fn new() -> Self {
        Self([0; B])
    }

    /// Returns the count in every bin.
    #[must_use]
    pub const fn counts(&self) -> &[u32; B] {
        &self.0
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().copied().map(u64::from).sum()
    }

    /// Whether every count is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    /// Returns each count as a fraction of the total. All fractions are `0.0` for empty bins.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fractions(&self) -> [f64; B] {
        let total = self.total();
        if total == 0 {
            [0.0; B]
        } else {
            let total = total as f64;
            self.0.map(|count| f64::from(count) / total)
        }
    }

    /// Returns the index and count of the fullest bin, preferring the lowest index on ties.
    /// Returns `None` if every bin is empty.
    #[must_use]
    pub fn peak(&self) -> Option<(usize, u32)> {
        self.0
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .fold(None, |peak, (i, count)| match peak {
                Some((_, max)) if max >= count => peak,
                _ => Some((i, count)),
            })
    }

    /// Adds one to the bin at `index`.
    fn increment(&mut self, index: usize) {
        self.0[index] = self.0[index].saturating_add(1);
    }
}

impl<const B: usize> Default for Bins<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const B: usize> Index<usize> for Bins<B> {
    type Output = u32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<const B: usize> AddAssign<&Self> for Bins<B> {
    fn add_assign(&mut self, rhs: &Self) {
        for (count, &other) in self.0.iter_mut().zip(&rhs.0) {
            *count = count.saturating_add(other);
        }
    }
}

impl<const B: usize> Add for Bins<B> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

/// Chooses which pixels of a buffer are visited, in raster order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sampling {
    /// Visit every `n`-th pixel starting from the first. A stride of `0` is treated as `1`.
    Stride(u32),
    /// Visit at most this many pixels, using the smallest stride that fits.
    /// A budget of `0` is treated as `1`.
    Budget(u32),
}

impl Sampling {
    /// Visits every pixel.
    pub const ALL: Self = Self::Stride(1);

    /// Returns the stride used for a buffer of `len` pixels. The stride is always at least `1`.
    #[must_use]
    pub fn stride(self, len: usize) -> usize {
        match self {
            Sampling::Stride(n) => (n as usize).max(1),
            Sampling::Budget(max) => len.div_ceil((max as usize).max(1)).max(1),
        }
    }

    /// Returns the number of pixels visited in a buffer of `len` pixels.
    #[must_use]
    pub fn num_samples(self, len: usize) -> usize {
        len.div_ceil(self.stride(len))
    }
}

impl Default for Sampling {
    fn default() -> Self {
        Self::Budget(DEFAULT_SAMPLE_BUDGET)
    }
}

impl From<u32> for Sampling {
    fn from(stride: u32) -> Self {
        Self::Stride(stride)
    }
}

/// Selects one of the three sRGB channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

impl Channel {
    /// All channels in `[red, green, blue]` order.
    pub const ALL: [Self; 3] = [Self::Red, Self::Green, Self::Blue];
}

/// Accumulates sampled pixels into bins.
///
/// Partial histograms over disjoint pixel sets must [`merge`](Histogram::merge)
/// into the histogram of their union, which is what makes the parallel drivers
/// give the same result as the sequential ones.
pub trait Histogram: Default {
    /// Counts one pixel.
    fn add(&mut self, pixel: [u8; 3]);

    /// Sums two partial histograms bin by bin. Must not panic on overflow.
    #[must_use]
    fn merge(self, other: Self) -> Self;
}

/// Per zone counts and per channel 256-level histograms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistogramBins {
    /// Counts per [`LuminanceZone`], indexed by [`LuminanceZone::index`].
    zones: Bins<ZONE_COUNT>,
    /// Red channel levels.
    red: Bins<LEVELS>,
    /// Green channel levels.
    green: Bins<LEVELS>,
    /// Blue channel levels.
    blue: Bins<LEVELS>,
}

impl HistogramBins {
    /// Returns the counts of every zone, from [`LuminanceZone::Blacks`] to [`LuminanceZone::Whites`].
    #[must_use]
    pub fn zones(&self) -> &Bins<ZONE_COUNT> {
        &self.zones
    }

    /// Returns the number of sampled pixels in `zone`.
    #[must_use]
    pub fn zone_count(&self, zone: LuminanceZone) -> u32 {
        self.zones[zone.index()]
    }

    /// Returns the fraction of sampled pixels in each zone.
    #[must_use]
    pub fn zone_fractions(&self) -> [f64; ZONE_COUNT] {
        self.zones.fractions()
    }

    /// Returns the 256-level histogram of a channel.
    #[must_use]
    pub fn channel(&self, channel: Channel) -> &Bins<LEVELS> {
        match channel {
            Channel::Red => &self.red,
            Channel::Green => &self.green,
            Channel::Blue => &self.blue,
        }
    }

    /// Returns the red channel histogram.
    #[must_use]
    pub fn red(&self) -> &Bins<LEVELS> {
        &self.red
    }

    /// Returns the green channel histogram.
    #[must_use]
    pub fn green(&self) -> &Bins<LEVELS> {
        &self.green
    }

    /// Returns the blue channel histogram.
    #[must_use]
    pub fn blue(&self) -> &Bins<LEVELS> {
        &self.blue
    }

    /// Returns the number of pixels that were sampled.
    #[must_use]
    pub fn num_samples(&self) -> u64 {
        self.zones.total()
    }

    /// Whether no pixels were sampled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl Histogram for HistogramBins {
    fn add(&mut self, pixel @ [r, g, b]: [u8; 3]) {
        let zone = LuminanceZone::from_luma(luma_components(pixel));
        self.zones.increment(zone.index());
        self.red.increment(usize::from(r));
        self.green.increment(usize::from(g));
        self.blue.increment(usize::from(b));
    }

    #[allow(clippy::needless_pass_by_value)]
    fn merge(mut self, other: Self) -> Self {
        self.zones += &other.zones;
        self.red += &other.red;
        self.green += &other.green;
        self.blue += &other.blue;
        self
    }
}

/// A 256-level histogram of display luma, see [`luma8`](crate::luminance::luma8).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LumaHistogram(Bins<LEVELS>);

impl LumaHistogram {
    /// Returns the underlying bins.
    #[must_use]
    pub fn bins(&self) -> &Bins<LEVELS> {
        &self.0
    }
}

impl Deref for LumaHistogram {
    type Target = Bins<LEVELS>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Histogram for LumaHistogram {
    fn add(&mut self, pixel: [u8; 3]) {
        self.0.increment(usize::from(luma8_components(pixel)));
    }

    #[allow(clippy::needless_pass_by_value)]
    fn merge(mut self, other: Self) -> Self {
        self.0 += &other.0;
        self
    }
}

/// A histogram of hues in one degree bins.
///
/// Near neutral pixels, whose HSB saturation or brightness is at most
/// [`NEUTRAL_THRESHOLD`] percent, have no meaningful hue and are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HueHistogram(Bins<HUE_BINS>);

impl HueHistogram {
    /// Returns the underlying bins.
    #[must_use]
    pub fn bins(&self) -> &Bins<HUE_BINS> {
        &self.0
    }
}

impl Deref for HueHistogram {
    type Target = Bins<HUE_BINS>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Histogram for HueHistogram {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn add(&mut self, pixel: [u8; 3]) {
        let hsb = rgb_to_hsb(Color::from(pixel));
        if hsb.saturation > NEUTRAL_THRESHOLD && hsb.brightness > NEUTRAL_THRESHOLD {
            self.0.increment(hsb.hue.floor() as usize % HUE_BINS);
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    fn merge(mut self, other: Self) -> Self {
        self.0 += &other.0;
        self
    }
}

/// Bins every `stride`-th pixel of `pixels`.
fn bin_strided<H: Histogram>(pixels: &[[u8; 3]], stride: usize) -> H {
    let mut hist = H::default();
    for &pixel in pixels.iter().step_by(stride) {
        hist.add(pixel);
    }
    hist
}

/// Computes a histogram over the pixels chosen by `sampling`.
#[must_use]
pub fn compute<H, C>(pixels: ColorSlice<'_, C>, sampling: Sampling) -> H
where
    H: Histogram,
    C: ColorComponents<u8, 3>,
{
    let pixels = pixels.as_arrays();
    let stride = sampling.stride(pixels.len());
    debug!(
        "sampling {} of {} pixels with stride {stride}",
        sampling.num_samples(pixels.len()),
        pixels.len(),
    );
    bin_strided(pixels, stride)
}

/// Computes a histogram over the pixels chosen by `sampling` in parallel.
///
/// The result is identical to that of [`compute`].
#[cfg(feature = "threads")]
#[must_use]
pub fn compute_par<H, C>(pixels: ColorSlice<'_, C>, sampling: Sampling) -> H
where
    H: Histogram + Send,
    C: ColorComponents<u8, 3>,
{
    let pixels = pixels.as_arrays();
    let stride = sampling.stride(pixels.len());

    // chunks start on a multiple of the stride so the sampled indices match the sequential walk
    let chunk_size = pixels
        .len()
        .div_ceil(rayon::current_num_threads())
        .next_multiple_of(stride)
        .max(stride);

    debug!(
        "sampling {} of {} pixels with stride {stride} in chunks of {chunk_size}",
        sampling.num_samples(pixels.len()),
        pixels.len(),
    );

    pixels
        .par_chunks(chunk_size)
        .map(|chunk| bin_strided::<H>(chunk, stride))
        .reduce_with(H::merge)
        .unwrap_or_default()
}

/// Computes the zone and channel histograms of the pixels chosen by `sampling`.
#[must_use]
pub fn histogram<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> HistogramBins {
    compute(pixels, sampling)
}

/// Computes the zone and channel histograms of the pixels chosen by `sampling` in parallel.
#[cfg(feature = "threads")]
#[must_use]
pub fn histogram_par<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> HistogramBins {
    compute_par(pixels, sampling)
}

/// Computes the luma histogram of the pixels chosen by `sampling`.
#[must_use]
pub fn luma_histogram<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> LumaHistogram {
    compute(pixels, sampling)
}

/// Computes the luma histogram of the pixels chosen by `sampling` in parallel.
#[cfg(feature = "threads")]
#[must_use]
pub fn luma_histogram_par<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> LumaHistogram {
    compute_par(pixels, sampling)
}

/// Computes the hue histogram of the pixels chosen by `sampling`.
#[must_use]
pub fn hue_histogram<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> HueHistogram {
    compute(pixels, sampling)
}

/// Computes the hue histogram of the pixels chosen by `sampling` in parallel.
#[cfg(feature = "threads")]
#[must_use]
pub fn hue_histogram_par<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    sampling: Sampling,
) -> HueHistogram {
    compute_par(pixels, sampling)
}

/// A row-major [`ColorSlice`] with known dimensions, for 2D grid sampling.
///
/// Grid sampling visits every `step`-th row and column plus the last row and column,
/// so the right and bottom edges of an image are always represented.
/// Each pixel is visited at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelGrid<'a, C> {
    /// The pixels in row-major order.
    pixels: ColorSlice<'a, C>,
    /// The number of pixels in a row.
    width: u32,
    /// The number of rows.
    height: u32,
}

impl<'a, C> PixelGrid<'a, C> {
    /// Creates a new [`PixelGrid`], or returns `None` if
    /// `width * height` does not equal the number of pixels.
    #[must_use]
    pub fn new(pixels: ColorSlice<'a, C>, width: u32, height: u32) -> Option<Self> {
        let len = u64::from(width) * u64::from(height);
        (len == u64::from(pixels.num_colors())).then_some(Self { pixels, width, height })
    }

    /// The number of pixels in a row.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// The number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The underlying pixels.
    #[must_use]
    pub const fn pixels(&self) -> ColorSlice<'a, C> {
        self.pixels
    }

    /// Picks a grid step based on the image size:
    /// `2` up to one megapixel, then `3`, `4`, `5`, and `6` above 1, 4, 8, and 20 megapixels.
    #[must_use]
    pub fn auto_step(&self) -> usize {
        match u64::from(self.width) * u64::from(self.height) {
            0..=1_000_000 => 2,
            1_000_001..=4_000_000 => 3,
            4_000_001..=8_000_000 => 4,
            8_000_001..=20_000_000 => 5,
            _ => 6,
        }
    }

    /// Returns the number of pixels visited with the given `step`.
    #[must_use]
    pub fn num_samples(&self, step: usize) -> usize {
        sample_axis(self.width as usize, step).count() * sample_axis(self.height as usize, step).count()
    }
}

/// Returns every `step`-th index below `len`, followed by `len - 1` if it was not already included.
pub(crate) fn sample_axis(len: usize, step: usize) -> impl Iterator<Item = usize> + Clone {
    let step = step.max(1);
    let last = len.checked_sub(1).filter(|last| last % step != 0);
    (0..len).step_by(step).chain(last)
}

impl<'a, C: ColorComponents<u8, 3>> PixelGrid<'a, C> {
    /// Returns the pixels in row `y`.
    pub(crate) fn row(&self, y: usize) -> &'a [[u8; 3]] {
        let width = self.width as usize;
        let pixels: &'a [C] = self.pixels.into();
        &pixels.as_arrays()[(y * width)..((y + 1) * width)]
    }

    /// Bins the sampled columns of row `y`.
    fn add_row<H: Histogram>(&self, hist: &mut H, y: usize, step: usize) {
        let row = self.row(y);
        for x in sample_axis(row.len(), step) {
            hist.add(row[x]);
        }
    }

    /// Computes a histogram over every `step`-th row and column plus the last row and column.
    /// A step of `0` is treated as `1`.
    #[must_use]
    pub fn compute<H: Histogram>(&self, step: usize) -> H {
        debug!(
            "sampling {} of {}x{} pixels with grid step {step}",
            self.num_samples(step),
            self.width,
            self.height,
        );
        let mut hist = H::default();
        for y in sample_axis(self.height as usize, step) {
            self.add_row(&mut hist, y, step);
        }
        hist
    }

    /// Computes a histogram over the same grid as [`PixelGrid::compute`] in parallel.
    #[cfg(feature = "threads")]
    #[must_use]
    pub fn compute_par<H: Histogram + Send>(&self, step: usize) -> H
    where
        C: Sync,
    {
        debug!(
            "sampling {} of {}x{} pixels with grid step {step} in parallel",
            self.num_samples(step),
            self.width,
            self.height,
        );
        let rows = sample_axis(self.height as usize, step).collect::<Vec<_>>();
        rows.into_par_iter()
            .fold(H::default, |mut hist, y| {
                self.add_row(&mut hist, y, step);
                hist
            })
            .reduce(H::default, H::merge)
    }
}

#[cfg(feature = "image")]
impl<'a, C> TryFrom<&'a RgbImage> for PixelGrid<'a, C>
where
    C: ColorComponents<u8, 3>,
{
    type Error = AboveMaxLen<u32>;

    fn try_from(image: &'a RgbImage) -> Result<Self, Self::Error> {
        let pixels = ColorSlice::try_from(image)?;
        Ok(Self { pixels, width: image.width(), height: image.height() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn assert_consistent(bins: &HistogramBins, samples: u64) {
        assert_eq!(bins.num_samples(), samples);
        for channel in Channel::ALL {
            assert_eq!(bins.channel(channel).total(), samples);
        }
    }

    #[test]
    fn empty_input() {
        let colors = ColorSlice::<Color>::try_from([].as_slice()).unwrap();
        let bins = histogram(colors, Sampling::default());
        assert_eq!(bins, HistogramBins::default());
        assert!(bins.is_empty());
        assert_eq!(bins.zone_fractions(), [0.0; ZONE_COUNT]);
        assert_eq!(bins.zones().peak(), None);
        assert!(luma_histogram(colors, Sampling::ALL).is_empty());
        assert!(hue_histogram(colors, Sampling::ALL).is_empty());
    }

    #[test]
    fn bin_sums_equal_samples() {
        let colors = test_data_1024();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        for stride in [0, 1, 2, 3, 7, 1000, 5000] {
            let sampling = Sampling::Stride(stride);
            let bins = histogram(colors, sampling);
            let expected = sampling.num_samples(colors.len());
            assert_consistent(&bins, expected as u64);
            assert_eq!(luma_histogram(colors, sampling).total(), expected as u64);
        }
    }

    #[test]
    fn stride_visits_raster_indices() {
        let colors = (0..=9).map(|v| Color::new(v, 0, 0)).collect::<Vec<_>>();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let bins = histogram(colors, 3.into());
        for level in 0..10 {
            let expected = u32::from(level % 3 == 0);
            assert_eq!(bins.red()[level], expected, "level {level}");
        }
        assert_eq!(bins.green()[0], 4);
    }

    #[test]
    fn budget_picks_smallest_stride() {
        assert_eq!(Sampling::Budget(100).stride(0), 1);
        assert_eq!(Sampling::Budget(100).stride(100), 1);
        assert_eq!(Sampling::Budget(100).stride(101), 2);
        assert_eq!(Sampling::Budget(100).stride(1000), 10);
        assert_eq!(Sampling::Budget(0).stride(10), 10);
        assert_eq!(Sampling::default().stride(1 << 18), 1);
        assert_eq!(Sampling::default().stride((1 << 18) + 1), 2);

        for len in [1, 99, 100, 101, 199, 200, 201, 12345] {
            for budget in [1, 7, 100, 1000] {
                let sampling = Sampling::Budget(budget);
                let stride = sampling.stride(len);
                assert!(sampling.num_samples(len) <= budget as usize);
                if stride > 1 {
                    assert!(len.div_ceil(stride - 1) > budget as usize);
                }
            }
        }
    }

    #[test]
    fn zones_and_channels() {
        let colors = [
            Color::BLACK,
            Color::new(255, 0, 0),
            Color::new(188, 188, 188),
            Color::WHITE,
            Color::WHITE,
        ];
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let bins = histogram(colors, Sampling::ALL);
        assert_eq!(bins.zones().counts(), &[1, 1, 1, 0, 2]);
        assert_eq!(bins.zone_count(LuminanceZone::Whites), 2);
        assert_eq!(bins.red()[255], 3);
        assert_eq!(bins.green()[0], 2);
        assert_eq!(bins.zone_fractions(), [0.2, 0.2, 0.2, 0.0, 0.4]);
        assert_eq!(bins.zones().peak(), Some((4, 2)));
    }

    #[test]
    fn hue_histogram_skips_neutrals() {
        let colors = [
            Color::new(255, 0, 0),
            Color::new(0, 255, 0),
            Color::new(0, 0, 255),
            Color::new(128, 128, 128),
            Color::new(25, 0, 0),
            Color::new(255, 240, 240),
        ];
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let hues = hue_histogram(colors, Sampling::ALL);
        assert_eq!(hues.total(), 3);
        assert_eq!(hues[0], 1);
        assert_eq!(hues[120], 1);
        assert_eq!(hues[240], 1);
    }

    #[test]
    fn luma_histogram_of_grays() {
        let colors = (0..=u8::MAX).map(|v| Color::new(v, v, v)).collect::<Vec<_>>();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let luma = luma_histogram(colors, Sampling::ALL);
        assert!(luma.counts().iter().all(|&count| count == 1));
    }

    #[test]
    fn deterministic() {
        let colors = test_data_1024();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        assert_eq!(histogram(colors, 2.into()), histogram(colors, 2.into()));
    }

    #[test]
    fn merge_is_union() {
        let colors = test_data_1024();
        let (left, right) = colors.split_at(300);
        let left = ColorSlice::try_from(left).unwrap();
        let right = ColorSlice::try_from(right).unwrap();
        let all = ColorSlice::try_from(colors.as_slice()).unwrap();

        let merged = histogram(left, Sampling::ALL).merge(histogram(right, Sampling::ALL));
        assert_eq!(merged, histogram(all, Sampling::ALL));
    }

    #[test]
    fn merged_counts_saturate() {
        let full = Bins([u32::MAX, u32::MAX - 1, 7]);
        let more = Bins([1, 5, 3]);
        assert_eq!((full + more).counts(), &[u32::MAX, u32::MAX, 10]);

        let mut bins = Bins::<2>([u32::MAX, 0]);
        bins.increment(0);
        bins.increment(1);
        assert_eq!(bins.counts(), &[u32::MAX, 1]);

        let mut zones = HistogramBins::default();
        zones.add([255, 255, 255]);
        zones.zones.0[LuminanceZone::Whites.index()] = u32::MAX;
        let merged = zones.clone().merge(zones);
        assert_eq!(merged.zone_count(LuminanceZone::Whites), u32::MAX);
        assert_eq!(merged.red()[255], 2);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let colors = test_data(10_007, 7);
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        for sampling in [Sampling::ALL, 3.into(), 1000.into(), Sampling::Budget(777)] {
            assert_eq!(histogram(colors, sampling), histogram_par(colors, sampling));
            assert_eq!(luma_histogram(colors, sampling), luma_histogram_par(colors, sampling));
            assert_eq!(hue_histogram(colors, sampling), hue_histogram_par(colors, sampling));
        }
    }

    #[test]
    fn grid_requires_matching_dimensions() {
        let colors = vec![Color::BLACK; 12];
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        assert!(PixelGrid::new(colors, 4, 3).is_some());
        assert!(PixelGrid::new(colors, 5, 3).is_none());
        assert!(PixelGrid::new(colors, 0, 0).is_none());
    }

    #[test]
    fn grid_includes_edges_once() {
        assert_eq!(sample_axis(10, 4).collect::<Vec<_>>(), [0, 4, 8, 9]);
        assert_eq!(sample_axis(9, 4).collect::<Vec<_>>(), [0, 4, 8]);
        assert_eq!(sample_axis(1, 4).collect::<Vec<_>>(), [0]);
        assert_eq!(sample_axis(0, 4).count(), 0);
        assert_eq!(sample_axis(3, 0).collect::<Vec<_>>(), [0, 1, 2]);

        // mark each pixel with its position so every visit is distinguishable
        let (width, height) = (10u8, 7u8);
        let colors = (0..height)
            .flat_map(|y| (0..width).map(move |x| Color::new(x, y, 0)))
            .collect::<Vec<_>>();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let grid = PixelGrid::new(colors, width.into(), height.into()).unwrap();

        let bins = grid.compute::<HistogramBins>(4);
        assert_eq!(bins.num_samples(), 4 * 3);
        assert_eq!(grid.num_samples(4), 4 * 3);
        for x in [0, 4, 8, 9] {
            assert_eq!(bins.red()[x], 3, "column {x}");
        }
        for y in [0, 4, 6] {
            assert_eq!(bins.green()[y], 4, "row {y}");
        }
        assert_eq!(bins.red()[1], 0);
        assert_eq!(bins.green()[5], 0);
    }

    #[test]
    fn grid_step_one_visits_everything() {
        let colors = test_data_1024();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let grid = PixelGrid::new(colors, 32, 32).unwrap();
        assert_eq!(grid.compute::<HistogramBins>(1), histogram(colors, Sampling::ALL));
    }

    #[test]
    fn auto_step_scales_with_size() {
        let colors = ColorSlice::<Color>::try_from([].as_slice()).unwrap();
        let grid = |width, height| PixelGrid { pixels: colors, width, height };
        assert_eq!(grid(1000, 1000).auto_step(), 2);
        assert_eq!(grid(1001, 1000).auto_step(), 3);
        assert_eq!(grid(2000, 2000).auto_step(), 3);
        assert_eq!(grid(4000, 2000).auto_step(), 4);
        assert_eq!(grid(5000, 4000).auto_step(), 5);
        assert_eq!(grid(6000, 4000).auto_step(), 6);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn grid_single_and_multi_threaded_match() {
        let colors = test_data(300 * 201, 3);
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let grid = PixelGrid::new(colors, 300, 201).unwrap();
        for step in [1, 2, grid.auto_step(), 7] {
            assert_eq!(
                grid.compute::<HistogramBins>(step),
                grid.compute_par::<HistogramBins>(step)
            );
            assert_eq!(
                grid.compute::<HueHistogram>(step),
                grid.compute_par::<HueHistogram>(step)
            );
        }
    }

    #[test]
    #[cfg(feature = "image")]
    fn grid_from_image() {
        let image = RgbImage::from_fn(5, 4, |x, y| image::Rgb([x as u8, y as u8, 0]));
        let grid = PixelGrid::<Color>::try_from(&image).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 4));
        let bins = grid.compute::<HistogramBins>(2);
        assert_eq!(bins.num_samples(), 3 * 3);
        assert_eq!(bins.red()[4], 3);
        assert_eq!(bins.green()[3], 3);
    }
}
