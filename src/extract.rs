//! Dominant color extraction with Wu's color quantizer (Greedy Orthogonal Bipartitioning).
//!
//! Sampled pixels are binned into a [`MomentHistogram`]: a `32x32x32` grid over RGB
//! holding the pixel count, the channel sums, and the sum of squared channels of each bin.
//! The box with the greatest variance is then repeatedly split along the channel and bin
//! that give the greatest decrease in variance, until there are as many boxes as requested
//! or no box can be split further. Each box yields its average color and pixel count.
//!
//! Since [`MomentHistogram`] implements [`Histogram`], it can be filled by any of the
//! histogram drivers, including [`PixelGrid`] sampling. All moments are integers,
//! so the parallel functions give the same colors as the sequential ones.
//!
//! # Examples
//! ```
//! # use colorcard::{Color, ColorSlice, extract::{self, DominantColor}, histogram::Sampling};
//! # fn main() -> Result<(), colorcard::AboveMaxLen<u32>> {
//! let red = Color::new(255, 0, 0);
//! let blue = Color::new(0, 0, 255);
//! let pixels = [vec![red; 30], vec![blue; 10]].concat();
//! let pixels = ColorSlice::try_from(pixels.as_slice())?;
//!
//! let colors = extract::dominant_colors(pixels, extract::DEFAULT_COLORS, Sampling::ALL);
//! assert_eq!(
//!     colors,
//!     [DominantColor { color: red, count: 30 }, DominantColor { color: blue, count: 10 }]
//! );
//! # Ok(())
//! # }
//! ```

// Referenced paper (free access):
// Xiaolin Wu, Color quantization by dynamic programming and principal analysis,
// ACM Transactions on Graphics, vol. 11, no. 4, 348–372, 1992.
// https://doi.org/10.1145/146443.146475

use crate::{
    histogram::{self, sample_axis, Histogram, PixelGrid, Sampling},
    Color, ColorComponents, ColorSlice,
};
use log::debug;
use ordered_float::OrderedFloat;
use std::{
    array,
    collections::BinaryHeap,
    ops::{Add, AddAssign, Index, Sub},
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The fewest colors [`dominant_colors`] will look for.
pub const MIN_COLORS: u8 = 3;

/// The most colors [`dominant_colors`] will look for.
pub const MAX_COLORS: u8 = 8;

/// The usual number of dominant colors.
pub const DEFAULT_COLORS: u8 = 5;

/// The number of bins along each channel.
const BINS: usize = 32;

/// The shift from a channel value to its bin.
const SHIFT: u32 = 3;

/// Clamps a requested number of colors into `MIN_COLORS..=MAX_COLORS`.
#[must_use]
pub fn clamp_count(count: u8) -> u8 {
    count.clamp(MIN_COLORS, MAX_COLORS)
}

/// A color found by extraction and the number of sampled pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DominantColor {
    /// The average color of the pixels.
    pub color: Color,
    /// The number of sampled pixels.
    pub count: u32,
}

/// Statistics for a histogram bin.
///
/// Sums wrap on overflow. Box volumes stay exact as long as the true totals fit in a `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Stats {
    /// The number of pixels assigned to the bin.
    count: u64,
    /// The channel-wise sum of the pixels.
    components: [u64; 3],
    /// The sum of the squared channels of the pixels.
    sum_squared: u64,
}

impl Stats {
    /// The statistics of a single pixel.
    fn of(pixel: [u8; 3]) -> Self {
        let components = pixel.map(u64::from);
        Self {
            count: 1,
            components,
            sum_squared: components.iter().map(|c| c * c).sum(),
        }
    }
}

impl Add for Stats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            count: self.count.wrapping_add(rhs.count),
            components: array::from_fn(|i| self.components[i].wrapping_add(rhs.components[i])),
            sum_squared: self.sum_squared.wrapping_add(rhs.sum_squared),
        }
    }
}

impl Sub for Stats {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            count: self.count.wrapping_sub(rhs.count),
            components: array::from_fn(|i| self.components[i].wrapping_sub(rhs.components[i])),
            sum_squared: self.sum_squared.wrapping_sub(rhs.sum_squared),
        }
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Returns the flat index of a bin.
const fn flat([r, g, b]: [usize; 3]) -> usize {
    (r * BINS + g) * BINS + b
}

/// Returns the bin of a pixel.
fn bin(pixel: [u8; 3]) -> [usize; 3] {
    pixel.map(|c| usize::from(c >> SHIFT))
}

/// A `32x32x32` RGB histogram of pixel counts and color moments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentHistogram(Vec<Stats>);

impl Default for MomentHistogram {
    fn default() -> Self {
        Self(vec![Stats::default(); BINS * BINS * BINS])
    }
}

impl MomentHistogram {
    /// Returns the number of pixels that were added.
    #[must_use]
    pub fn num_samples(&self) -> u64 {
        self.0.iter().fold(0, |total, stats| total.wrapping_add(stats.count))
    }

    /// Whether no pixels were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|stats| stats.count == 0)
    }

    /// Splits the histogram into at most `count` colors, clamped into
    /// `MIN_COLORS..=MAX_COLORS`, sorted by descending pixel count.
    ///
    /// Fewer colors are returned if the pixels cannot be split any further,
    /// and none if the histogram is empty.
    #[must_use]
    pub fn dominant_colors(self, count: u8) -> Vec<DominantColor> {
        let count = clamp_count(count);
        if self.is_empty() {
            return Vec::new();
        }

        let moments = Moments::new(self);
        let mut colors = moments
            .cubes(usize::from(count))
            .map(|cube| moments.dominant_color(cube))
            .collect::<Vec<_>>();

        colors.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.color.to_array().cmp(&b.color.to_array()))
        });

        debug!("split {} samples into {} of {count} colors", moments.total(), colors.len());
        colors
    }
}

impl Histogram for MomentHistogram {
    fn add(&mut self, pixel: [u8; 3]) {
        self.0[flat(bin(pixel))] += Stats::of(pixel);
    }

    #[allow(clippy::needless_pass_by_value)]
    fn merge(mut self, other: Self) -> Self {
        for (stats, &rhs) in self.0.iter_mut().zip(&other.0) {
            *stats += rhs;
        }
        self
    }
}

/// A box over a range of histogram bins.
#[derive(Debug, Clone, Copy)]
struct Cube {
    /// The lower bin indices (inclusive).
    min: [u8; 3],
    /// The upper bin indices (exclusive).
    max: [u8; 3],
}

impl Cube {
    /// Whether or not this cube contains a single bin.
    fn is_single_bin(self) -> bool {
        let Self { min, max } = self;
        (0..3).all(|c| max[c] - min[c] == 1)
    }
}

/// Cumulative moments, so that the sum over any cube takes eight lookups.
struct Moments(Vec<Stats>);

impl Index<[u8; 3]> for Moments {
    type Output = Stats;

    fn index(&self, index: [u8; 3]) -> &Self::Output {
        &self.0[flat(index.map(usize::from))]
    }
}

/// Expands into the inclusion-exclusion sum over the given dimensions of a cube.
macro_rules! volume {
    ($moments: ident, $min: ident, $max: ident, $index: ident; $n: literal $(, $ns: literal)* $(,)?) => {{
        $index[$n] = $max[$n] - 1;
        let upper = volume!($moments, $min, $max, $index; $($ns,)*);

        let lower = if $min[$n] == 0 {
            Stats::default()
        } else {
            $index[$n] = $min[$n] - 1;
            volume!($moments, $min, $max, $index; $($ns,)*)
        };

        upper - lower
    }};
    ($moments: ident, $min: ident, $max: ident, $index: ident;) => {
        $moments[$index]
    };
}

impl Moments {
    /// Turns the bins of `hist` into cumulative moments.
    fn new(MomentHistogram(mut hist): MomentHistogram) -> Self {
        for r in 0..BINS {
            let mut area = [Stats::default(); BINS];

            for g in 0..BINS {
                let mut line = Stats::default();

                for (b, area) in area.iter_mut().enumerate() {
                    line += hist[flat([r, g, b])];
                    *area += line;

                    hist[flat([r, g, b])] = if r == 0 {
                        *area
                    } else {
                        hist[flat([r - 1, g, b])] + *area
                    };
                }
            }
        }

        Self(hist)
    }

    /// Returns the sum over every bin.
    #[allow(clippy::cast_possible_truncation)]
    fn total(&self) -> u64 {
        self[[BINS as u8 - 1; 3]].count
    }

    /// Returns the sum of the bins in `cube`.
    fn volume(&self, Cube { min, max }: Cube) -> Stats {
        let mut index = [0u8; 3];
        volume!(self, min, max, index; 0, 1, 2)
    }

    /// Returns the sum of the bins in `cube` below `bin` along `dim`, ignoring the cube's lower bound in `dim`.
    fn volume_below(&self, Cube { min, max }: Cube, dim: usize, bin: u8) -> Stats {
        if bin == 0 {
            return Stats::default();
        }

        let mut index = [0u8; 3];
        index[dim] = bin - 1;
        match dim {
            0 => volume!(self, min, max, index; 1, 2),
            1 => volume!(self, min, max, index; 0, 2),
            _ => volume!(self, min, max, index; 0, 1),
        }
    }

    /// Returns the sum of the squares of the given components.
    #[allow(clippy::cast_precision_loss)]
    fn sum_of_squares(components: [u64; 3]) -> f64 {
        components.iter().map(|&c| (c as f64) * (c as f64)).sum()
    }

    /// The squared distance sum of the pixels in `cube` from their mean.
    #[allow(clippy::cast_precision_loss)]
    fn variance(&self, cube: Cube) -> f64 {
        if cube.is_single_bin() {
            0.0
        } else {
            let Stats { count, components, sum_squared } = self.volume(cube);
            sum_squared as f64 - Self::sum_of_squares(components) / count as f64
        }
    }

    /// Finds the bin to cut `cube` at along `dim` that leaves the least variance.
    #[allow(clippy::cast_precision_loss)]
    fn minimize(&self, cube: Cube, dim: usize, sum: Stats) -> Option<(u8, f64)> {
        let bottom = cube.min[dim];
        let top = cube.max[dim];
        let base = self.volume_below(cube, dim, bottom);

        ((bottom + 1)..top)
            .filter_map(|bin| {
                let lower = self.volume_below(cube, dim, bin) - base;
                let upper = sum - lower;
                if lower.count == 0 || upper.count == 0 {
                    None
                } else {
                    let lower2 = Self::sum_of_squares(lower.components) / lower.count as f64;
                    let upper2 = Self::sum_of_squares(upper.components) / upper.count as f64;
                    Some((bin, -(lower2 + upper2)))
                }
            })
            .min_by_key(|&(_, v)| OrderedFloat(v))
    }

    /// Cuts `cube` in two, shrinking it to the lower half and returning the upper half.
    fn cut(&self, cube: &mut Cube) -> Option<Cube> {
        let sum = self.volume(*cube);

        let ((dim, bin), _) = (0..3)
            .filter_map(|dim| self.minimize(*cube, dim, sum).map(|(bin, v)| ((dim, bin), v)))
            .min_by_key(|&(_, v)| OrderedFloat(v))?;

        let mut upper = *cube;
        cube.max[dim] = bin;
        upper.min[dim] = bin;
        Some(upper)
    }

    /// Returns at most `k` disjoint cubes covering every pixel.
    fn cubes(&self, k: usize) -> impl Iterator<Item = Cube> {
        /// A cube and its variance.
        struct CubeVar(Cube, f64);

        impl PartialOrd for CubeVar {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for CubeVar {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                OrderedFloat(self.1).cmp(&OrderedFloat(other.1))
            }
        }

        impl Eq for CubeVar {}

        impl PartialEq for CubeVar {
            fn eq(&self, other: &Self) -> bool {
                self.1 == other.1
            }
        }

        let mut queue = BinaryHeap::with_capacity(k);
        #[allow(clippy::cast_possible_truncation)]
        queue.push(CubeVar(Cube { min: [0; 3], max: [BINS as u8; 3] }, f64::INFINITY));

        while queue.len() < k {
            let Some(CubeVar(mut lower, variance)) = queue.pop() else {
                break;
            };

            if variance <= 0.0 {
                // no cube can be cut further
                queue.push(CubeVar(lower, 0.0));
                break;
            }

            if let Some(upper) = self.cut(&mut lower) {
                queue.push(CubeVar(lower, self.variance(lower)));
                queue.push(CubeVar(upper, self.variance(upper)));
            } else {
                queue.push(CubeVar(lower, 0.0));
            }
        }

        queue.into_iter().map(|x| x.0)
    }

    /// Returns the rounded average color of and the number of pixels in `cube`.
    fn dominant_color(&self, cube: Cube) -> DominantColor {
        let Stats { count, components, .. } = self.volume(cube);
        let n = count.max(1);
        let color = components.map(|c| u8::try_from((c + n / 2) / n).unwrap_or(u8::MAX));
        DominantColor {
            color: Color::from(color),
            count: u32::try_from(count).unwrap_or(u32::MAX),
        }
    }
}

/// Finds the dominant colors of the pixels chosen by `sampling`.
///
/// `count` is clamped into `MIN_COLORS..=MAX_COLORS`.
/// See [`MomentHistogram::dominant_colors`] for the returned colors.
#[must_use]
pub fn dominant_colors<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    count: u8,
    sampling: Sampling,
) -> Vec<DominantColor> {
    histogram::compute::<MomentHistogram, _>(pixels, sampling).dominant_colors(count)
}

/// Finds the dominant colors of the pixels chosen by `sampling` in parallel.
///
/// The result is identical to that of [`dominant_colors`].
#[cfg(feature = "threads")]
#[must_use]
pub fn dominant_colors_par<C: ColorComponents<u8, 3>>(
    pixels: ColorSlice<'_, C>,
    count: u8,
    sampling: Sampling,
) -> Vec<DominantColor> {
    histogram::compute_par::<MomentHistogram, _>(pixels, sampling).dominant_colors(count)
}

/// Returns the squared RGB distance between two colors.
fn distance_squared(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.into_iter()
        .zip(b)
        .map(|(a, b)| u32::from(a.abs_diff(b)).pow(2))
        .sum()
}

/// Finds where each of `colors` sits in the image, as `(x, y)` fractions of its width and height.
///
/// Every pixel on the grid sampled with `step` (see [`PixelGrid::compute`]) is assigned to
/// its nearest color, preferring the earliest color on ties. Each color's position is the
/// centroid of its pixels, or the image center `(0.5, 0.5)` if no pixel was assigned to it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn color_positions<C: ColorComponents<u8, 3>>(
    grid: &PixelGrid<'_, C>,
    colors: &[Color],
    step: usize,
) -> Vec<(f64, f64)> {
    let colors = colors.iter().map(|color| color.to_array()).collect::<Vec<_>>();
    let mut sums = vec![(0u64, 0u64, 0u64); colors.len()];

    for y in sample_axis(grid.height() as usize, step) {
        let row = grid.row(y);
        for x in sample_axis(row.len(), step) {
            let pixel = row[x];
            let nearest = colors
                .iter()
                .enumerate()
                .min_by_key(|&(_, &color)| distance_squared(pixel, color))
                .map(|(i, _)| i);

            if let Some(i) = nearest {
                let (sx, sy, n) = &mut sums[i];
                *sx += x as u64;
                *sy += y as u64;
                *n += 1;
            }
        }
    }

    let (width, height) = (f64::from(grid.width()), f64::from(grid.height()));
    sums.into_iter()
        .map(|(sx, sy, n)| {
            if n == 0 {
                (0.5, 0.5)
            } else {
                let n = n as f64;
                (sx as f64 / n / width, sy as f64 / n / height)
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::tests::*;

    fn repeated(colors: &[(Color, usize)]) -> Vec<Color> {
        colors
            .iter()
            .flat_map(|&(color, n)| std::iter::repeat(color).take(n))
            .collect()
    }

    #[test]
    fn empty_input() {
        let colors = ColorSlice::<Color>::try_from([].as_slice()).unwrap();
        assert!(dominant_colors(colors, DEFAULT_COLORS, Sampling::ALL).is_empty());
        assert!(MomentHistogram::default().is_empty());
        assert!(MomentHistogram::default().dominant_colors(MAX_COLORS).is_empty());
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(clamp_count(0), MIN_COLORS);
        assert_eq!(clamp_count(5), 5);
        assert_eq!(clamp_count(100), MAX_COLORS);

        let colors = test_data_1024();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        assert_eq!(dominant_colors(colors, 0, Sampling::ALL).len(), 3);
        assert_eq!(dominant_colors(colors, 6, Sampling::ALL).len(), 6);
        assert_eq!(dominant_colors(colors, 20, Sampling::ALL).len(), 8);
    }

    #[test]
    fn sorted_by_count() {
        let red = Color::new(255, 0, 0);
        let green = Color::new(0, 255, 0);
        let blue = Color::new(0, 0, 255);
        let colors = repeated(&[(green, 100), (red, 600), (blue, 300)]);
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();

        let expected = [
            DominantColor { color: red, count: 600 },
            DominantColor { color: blue, count: 300 },
            DominantColor { color: green, count: 100 },
        ];
        assert_eq!(dominant_colors(colors, 3, Sampling::ALL), expected);
        // there are only three distinct colors to find
        assert_eq!(dominant_colors(colors, 8, Sampling::ALL), expected);
    }

    #[test]
    fn counts_sum_to_samples() {
        let colors = test_data_1024();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        for sampling in [Sampling::ALL, 3.into(), Sampling::Budget(100)] {
            let found = dominant_colors(colors, MAX_COLORS, sampling);
            let total = found.iter().map(|color| u64::from(color.count)).sum::<u64>();
            assert_eq!(total, sampling.num_samples(colors.len()) as u64);
            assert!(found.windows(2).all(|pair| pair[0].count >= pair[1].count));
        }
    }

    #[test]
    fn one_bin_averages() {
        let colors = [Color::new(0, 0, 0), Color::new(1, 1, 1), Color::new(2, 2, 3)];
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        assert_eq!(
            dominant_colors(colors, DEFAULT_COLORS, Sampling::ALL),
            [DominantColor { color: Color::new(1, 1, 1), count: 3 }]
        );
    }

    #[test]
    fn deterministic() {
        let colors = test_data(5000, 11);
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        assert_eq!(
            dominant_colors(colors, DEFAULT_COLORS, Sampling::ALL),
            dominant_colors(colors, DEFAULT_COLORS, Sampling::ALL)
        );
    }

    #[test]
    fn merge_is_union() {
        let colors = test_data_1024();
        let (left, right) = colors.split_at(400);
        let left = ColorSlice::try_from(left).unwrap();
        let right = ColorSlice::try_from(right).unwrap();
        let all = ColorSlice::try_from(colors.as_slice()).unwrap();

        let merged = histogram::compute::<MomentHistogram, _>(left, Sampling::ALL)
            .merge(histogram::compute(right, Sampling::ALL));
        assert_eq!(merged, histogram::compute::<MomentHistogram, _>(all, Sampling::ALL));
        assert_eq!(merged.num_samples(), 1024);
    }

    #[test]
    #[cfg(feature = "threads")]
    fn single_and_multi_threaded_match() {
        let colors = test_data(10_007, 7);
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        for sampling in [Sampling::ALL, 4.into(), Sampling::Budget(777)] {
            for count in [MIN_COLORS, DEFAULT_COLORS, MAX_COLORS] {
                assert_eq!(
                    dominant_colors(colors, count, sampling),
                    dominant_colors_par(colors, count, sampling)
                );
            }
        }

        let grid = PixelGrid::new(colors, 10_007, 1).unwrap();
        assert_eq!(
            grid.compute::<MomentHistogram>(4).dominant_colors(DEFAULT_COLORS),
            grid.compute_par::<MomentHistogram>(4).dominant_colors(DEFAULT_COLORS)
        );
    }

    #[test]
    fn grid_keeps_edge_colors() {
        // columns 0, 4, and 8 of rows 0 and 3 are sampled, so the blue last column is seen
        let (width, height) = (9, 4);
        let colors = (0..height)
            .flat_map(|_| (0..width).map(move |x| if x == width - 1 { Color::new(0, 0, 255) } else { Color::BLACK }))
            .collect::<Vec<_>>();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let grid = PixelGrid::new(colors, width, height).unwrap();

        let found = grid.compute::<MomentHistogram>(4).dominant_colors(DEFAULT_COLORS);
        assert_eq!(
            found,
            [
                DominantColor { color: Color::BLACK, count: 4 },
                DominantColor { color: Color::new(0, 0, 255), count: 2 },
            ]
        );
    }

    #[test]
    fn positions_are_centroids() {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let colors = (0..2)
            .flat_map(|_| [red, red, blue, blue])
            .collect::<Vec<_>>();
        let colors = ColorSlice::try_from(colors.as_slice()).unwrap();
        let grid = PixelGrid::new(colors, 4, 2).unwrap();

        // the second red never wins a tie against the first
        let positions = color_positions(&grid, &[red, blue, red], 1);
        assert_eq!(positions, [(0.125, 0.25), (0.625, 0.25), (0.5, 0.5)]);

        // pixels go to the nearest color
        let positions = color_positions(&grid, &[Color::new(200, 0, 50)], 1);
        assert_eq!(positions, [(0.375, 0.25)]);

        assert!(color_positions(&grid, &[], 1).is_empty());
    }
}
