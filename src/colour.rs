//! Colouring algorithms.

use fnv::{FnvHashMap, FnvHashSet};
use log::trace;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};

use crate::{config, fractal::IterationResult};

/// Colour of points that never escaped.
pub const BACKGROUND: u32 = 0x000000;

/**
Convert hue/saturation/brightness to a packed `0x00RRGGBB` colour.

Follows the AWT `Color.HSBtoRGB` conversion bit for bit: `hue` wraps around
(only its fractional part matters, so `1.2` and `0.2` give the same colour),
and each channel is rounded with `(v * 255 + 0.5) as u8`.
*/
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> u32 {
    let channel = |value: f32| (value * 255.0 + 0.5) as u32;

    let (red, green, blue) = if saturation == 0.0 {
        let value = channel(brightness);
        (value, value, value)
    } else {
        let h = (hue - hue.floor()) * 6.0;
        let f = h - h.floor();
        let p = brightness * (1.0 - saturation);
        let q = brightness * (1.0 - saturation * f);
        let t = brightness * (1.0 - saturation * (1.0 - f));
        let (red, green, blue) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            5 => (brightness, p, q),
            // `hue - floor(hue)` can round up to 1.0 for tiny negative hues.
            _ => (0.0, 0.0, 0.0),
        };
        (channel(red), channel(green), channel(blue))
    };

    (red << 16) | (green << 8) | blue
}

/// Maps an escape count to a hue: `offset + iterations / divisor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HuePalette {
    pub offset: f32,
    pub divisor: f32,
}

impl HuePalette {
    pub fn colour(&self, iterations: IterationResult) -> u32 {
        match iterations {
            None => BACKGROUND,
            Some(iterations) => hsb_to_rgb(self.offset + iterations as f32 / self.divisor, 1.0, 1.0),
        }
    }
}

impl Default for HuePalette {
    fn default() -> Self {
        Self {
            offset: config::HUE_OFFSET,
            divisor: config::HUE_DIVISOR,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Colouring {
    /// Hue proportional to the escape count.
    #[default]
    Hue,
    /// Hue proportional to the escape count's rank within the frame.
    Histogram,
}

impl Colouring {
    pub fn next(self) -> Self {
        match self {
            Colouring::Hue => Colouring::Histogram,
            Colouring::Histogram => Colouring::Hue,
        }
    }

    /// Colour a whole frame of escape counts.
    pub fn colour_frame(&self, palette: &HuePalette, iterations: &[IterationResult]) -> Vec<u32> {
        match self {
            Colouring::Hue => iterations
                .par_iter()
                .map(|iterations| palette.colour(*iterations))
                .collect(),
            Colouring::Histogram => HistogramColouring::new(iterations).colour_frame(palette, iterations),
        }
    }
}

/// Histogram-based colouring algorithm ([Wikipedia](https://en.wikipedia.org/wiki/Plotting_algorithms_for_the_Mandelbrot_set#Histogram_coloring)).
struct HistogramColouring {
    histogram_ranges: FnvHashMap<u32, f32>,
}

impl HistogramColouring {
    fn new(iterations: &[IterationResult]) -> Self {
        trace!("begin histogram");

        let mut total_samples = 0;
        let mut bucket_labels: Vec<u32> = Vec::new();
        let mut histogram: FnvHashMap<u32, u32> = FnvHashMap::default();
        for iteration_count in iterations.iter().flatten() {
            let value = histogram.entry(*iteration_count).or_insert_with(|| {
                bucket_labels.push(*iteration_count);
                0
            });
            *value += 1;
            total_samples += 1;
        }

        debug_assert_eq!(
            total_samples,
            histogram.values().map(|value| *value as usize).sum::<usize>()
        );
        debug_assert!(
            bucket_labels.len() == bucket_labels.iter().copied().collect::<FnvHashSet<u32>>().len(),
            "bucket_labels contains duplicates: {:?}",
            bucket_labels
        );
        bucket_labels.sort_unstable();

        let mut histogram_ranges: FnvHashMap<u32, f32> = FnvHashMap::default();
        let mut acc = 0;
        let total_samples = total_samples as f32;
        for bucket_label in &bucket_labels {
            histogram_ranges.insert(*bucket_label, acc as f32 / total_samples);
            acc += histogram[bucket_label];
        }

        trace!("end histogram");
        Self { histogram_ranges }
    }

    fn colour_frame(&self, palette: &HuePalette, iterations: &[IterationResult]) -> Vec<u32> {
        iterations
            .par_iter()
            .map(|iterations| match iterations {
                None => BACKGROUND,
                Some(iteration_count) => {
                    let fraction = self
                        .histogram_ranges
                        .get(iteration_count)
                        .copied()
                        .unwrap_or_else(|| panic!("{} was not in histogram_ranges", iteration_count));
                    hsb_to_rgb(palette.offset + fraction, 1.0, 1.0)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(hsb_to_rgb(0.0, 1.0, 1.0), 0xFF0000);
        assert_eq!(hsb_to_rgb(0.5, 1.0, 1.0), 0x00FFFF);
        assert_eq!(hsb_to_rgb(0.7, 1.0, 1.0), 0x3300FF);
    }

    #[test]
    fn test_grey_when_unsaturated() {
        assert_eq!(hsb_to_rgb(0.3, 0.0, 1.0), 0xFFFFFF);
        assert_eq!(hsb_to_rgb(0.3, 0.0, 0.0), 0x000000);
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(hsb_to_rgb(1.0, 1.0, 1.0), hsb_to_rgb(0.0, 1.0, 1.0));
        assert_eq!(hsb_to_rgb(1.5, 1.0, 1.0), hsb_to_rgb(0.5, 1.0, 1.0));
        assert_eq!(hsb_to_rgb(1.7, 1.0, 1.0), 0x3300FF);
        assert_eq!(hsb_to_rgb(-0.3, 1.0, 1.0), 0x3300FF);
    }

    #[test]
    fn test_palette() {
        let palette = HuePalette::default();
        assert_eq!(palette.colour(None), BACKGROUND);
        assert_eq!(
            palette.colour(Some(100)),
            hsb_to_rgb(0.7 + 100.0 / 200.0, 1.0, 1.0)
        );
        for n in 1..200 {
            assert_ne!(palette.colour(Some(n)), BACKGROUND);
        }
    }

    #[test]
    fn test_histogram_ranks_escape_counts() {
        let palette = HuePalette::default();
        let iterations = [None, Some(1), Some(7), Some(1)];
        let colours = Colouring::Histogram.colour_frame(&palette, &iterations);
        assert_eq!(
            colours,
            vec![
                BACKGROUND,
                hsb_to_rgb(palette.offset, 1.0, 1.0),
                hsb_to_rgb(palette.offset + 2.0 / 3.0, 1.0, 1.0),
                hsb_to_rgb(palette.offset, 1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_hue_colouring_matches_palette() {
        let palette = HuePalette::default();
        let iterations = [Some(3), None, Some(199)];
        let colours = Colouring::Hue.colour_frame(&palette, &iterations);
        let expected: Vec<u32> = iterations.iter().map(|n| palette.colour(*n)).collect();
        assert_eq!(colours, expected);
    }

    #[test]
    fn test_cycle() {
        assert_eq!(Colouring::Hue.next(), Colouring::Histogram);
        assert_eq!(Colouring::Histogram.next(), Colouring::Hue);
    }
}
