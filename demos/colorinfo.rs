#![deny(unsafe_code, unsafe_op_in_unsafe_fn)]
#![warn(
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented,
    clippy::unneeded_field_pattern,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::unnecessary_self_imports,
    clippy::str_to_string,
    clippy::string_slice
)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colorcard::{
    colorspace::{self, ColorInfo},
    contrast::ContrastReport,
    extract::{self, MomentHistogram},
    harmony::{ColorWheel, Harmony, HarmonyScheme},
    histogram::{self, Bins, HistogramBins, HueHistogram, LumaHistogram, PixelGrid, Sampling},
    luminance::{self, LuminanceZone},
    vision::{self, Vision},
    Color, ColorSlice,
};

#[derive(Subcommand)]
enum Command {
    /// Print a color in every color model.
    Info { colors: Vec<Color> },
    /// Print the tonal and channel distribution of an image.
    Histogram {
        input: PathBuf,

        /// Grid step; picked from the image size when omitted.
        #[arg(long)]
        step: Option<usize>,

        /// Sample every n-th pixel in raster order instead of a grid.
        #[arg(long, conflicts_with = "step")]
        stride: Option<u32>,

        #[arg(short, long, default_value_t = 0)]
        threads: u8,
    },
    /// Print the dominant colors of an image and where they sit.
    Extract {
        input: PathBuf,

        /// The number of colors, between 3 and 8.
        #[arg(short, long, default_value_t = extract::DEFAULT_COLORS)]
        count: u8,

        /// Grid step; picked from the image size when omitted.
        #[arg(long)]
        step: Option<usize>,
    },
    /// Generate a harmony palette from a base color.
    Harmony {
        color: Color,

        #[arg(long, default_value_t = HarmonyScheme::Complementary)]
        scheme: HarmonyScheme,

        #[arg(long, default_value_t = ColorWheel::Rgb)]
        wheel: ColorWheel,

        #[arg(long, default_value_t = Harmony::DEFAULT_SATURATION)]
        saturation: f64,

        #[arg(long, default_value_t = Harmony::DEFAULT_LIGHTNESS)]
        lightness: f64,
    },
    /// Print the WCAG contrast between two colors.
    Contrast { foreground: Color, background: Color },
    /// Simulate color vision deficiencies.
    Simulate {
        colors: Vec<Color>,

        #[arg(long)]
        vision: Option<Vision>,
    },
}

#[derive(Parser)]
pub struct Options {
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn print_bar<const B: usize>(label: &str, bins: &Bins<B>, width: usize) {
    let max = bins.counts().iter().copied().max().unwrap_or(0).max(1);
    #[allow(clippy::cast_possible_truncation)]
    let bar = |count: u32| "#".repeat((u64::from(count) * width as u64 / u64::from(max)) as usize);
    println!("{label}");
    for (i, &count) in bins.counts().iter().enumerate() {
        println!("{i:>4} {count:>9} {}", bar(count));
    }
}

fn print_zones(bins: &HistogramBins) {
    println!("{} samples", bins.num_samples());
    for (zone, fraction) in LuminanceZone::ALL.into_iter().zip(bins.zone_fractions()) {
        let range = zone.range();
        println!(
            "{zone:>10} [{:.2}, {:.2}) {:>9} {:>6.2}%",
            range.start,
            range.end.min(1.0),
            bins.zone_count(zone),
            fraction * 100.0
        );
    }
}

fn main() {
    let Options { verbose, command } = Options::parse();

    macro_rules! log {
        ($name: literal, $val: expr) => {
            if verbose {
                let time = std::time::Instant::now();
                let value = $val;
                println!("{} took {}ms", $name, time.elapsed().as_millis());
                value
            } else {
                $val
            }
        };
    }

    match command {
        Command::Info { colors } => {
            for color in colors {
                let info = ColorInfo::new(color);
                let luminance = luminance::luminance(color);
                println!("{info}");
                println!("  luma {:.4} ({}), luma8 {}", luminance.luma, luminance.zone, luminance::luma8(color));
            }
        }
        Command::Histogram { input, step, stride, threads } => {
            let image = log!("read image", image::open(input).unwrap().into_rgb8());

            let compute = || {
                if let Some(stride) = stride {
                    let pixels = ColorSlice::<Color>::try_from(&image).unwrap();
                    let sampling = Sampling::Stride(stride);
                    (
                        histogram::histogram_par(pixels, sampling),
                        histogram::luma_histogram_par(pixels, sampling),
                        histogram::hue_histogram_par(pixels, sampling),
                    )
                } else {
                    let grid = PixelGrid::<Color>::try_from(&image).unwrap();
                    let step = step.unwrap_or_else(|| grid.auto_step());
                    (
                        grid.compute_par::<HistogramBins>(step),
                        grid.compute_par::<LumaHistogram>(step),
                        grid.compute_par::<HueHistogram>(step),
                    )
                }
            };

            let (bins, luma, hue) = log!(
                "histograms",
                if threads == 0 {
                    compute()
                } else {
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(threads.into())
                        .build()
                        .unwrap()
                        .install(compute)
                }
            );

            print_zones(&bins);
            print_bar("luma", luma.bins(), 60);
            if let Some((hue, count)) = hue.peak() {
                println!("dominant hue {hue} ({count} pixels)");
            }
        }
        Command::Extract { input, count, step } => {
            let image = log!("read image", image::open(input).unwrap().into_rgb8());
            let grid = PixelGrid::<Color>::try_from(&image).unwrap();
            let step = step.unwrap_or_else(|| grid.auto_step());

            let colors = log!(
                "extract",
                grid.compute_par::<MomentHistogram>(step).dominant_colors(count)
            );
            let total = colors.iter().map(|color| f64::from(color.count)).sum::<f64>();
            let positions = extract::color_positions(
                &grid,
                &colors.iter().map(|color| color.color).collect::<Vec<_>>(),
                step,
            );

            for (color, (x, y)) in colors.iter().zip(positions) {
                println!(
                    "{} {:>6.2}% at ({x:.2}, {y:.2})",
                    color.color,
                    f64::from(color.count) / total * 100.0
                );
            }
        }
        Command::Harmony { color, scheme, wheel, saturation, lightness } => {
            let hue = colorspace::rgb_to_hsb(color).hue;
            let palette = log!(
                "generate",
                Harmony::new(hue, scheme)
                    .wheel(wheel)
                    .saturation(saturation)
                    .lightness(lightness)
                    .generate()
            );

            println!("{scheme} on the {wheel} wheel from {color} (hue {hue:.1})");
            for (color, hue) in palette.colors().iter().zip(palette.hues()) {
                println!("  {color} hue {hue:>5.1} {}", ColorInfo::new(*color));
            }
        }
        Command::Contrast { foreground, background } => {
            println!("{foreground} on {background}: {}", ContrastReport::new(foreground, background));
        }
        Command::Simulate { colors, vision } => {
            let visions = vision.map_or(Vision::ALL.to_vec(), |vision| vec![vision]);
            for vision in visions {
                let simulated = vision::simulate_all(&colors, vision);
                let simulated = simulated.iter().map(|color| color.to_hex()).collect::<Vec<_>>();
                println!("{vision:>13} {}", simulated.join(" "));
            }
        }
    }
}
