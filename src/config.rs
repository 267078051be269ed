//! Fixed session parameters.

use crate::{
    colour::{Colouring, HuePalette},
    error::{Error, Result},
};

/// Width and height of the square display, in pixels.
pub const DISPLAY_SIZE: u32 = 800;
pub const MAX_ITERATIONS: u32 = 200;
pub const ESCAPE_RADIUS: f64 = 2.0;
/// Scale applied to the viewport on each zoom-in click.
pub const ZOOM_FACTOR: f64 = 0.5;
pub const HUE_OFFSET: f32 = 0.7;
pub const HUE_DIVISOR: f32 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FractalKind {
    #[default]
    Mandelbrot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub display_size: u32,
    pub fractal: FractalKind,
    pub max_iterations: u32,
    pub escape_radius: f64,
    pub zoom_factor: f64,
    pub hue_offset: f32,
    pub hue_divisor: f32,
    pub colouring: Colouring,
    /// Render worker count. `None` uses one worker per logical CPU.
    pub threads: Option<usize>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.display_size == 0 {
            return Err(Error::InvalidDisplaySize(self.display_size));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidConfig("max_iterations must be positive"));
        }
        if !(self.escape_radius.is_finite() && self.escape_radius > 0.0) {
            return Err(Error::InvalidConfig("escape_radius must be positive and finite"));
        }
        if !(self.zoom_factor > 0.0 && self.zoom_factor < 1.0) {
            return Err(Error::InvalidConfig("zoom_factor must lie strictly between 0 and 1"));
        }
        if !self.hue_offset.is_finite() {
            return Err(Error::InvalidConfig("hue_offset must be finite"));
        }
        if !(self.hue_divisor.is_finite() && self.hue_divisor > 0.0) {
            return Err(Error::InvalidConfig("hue_divisor must be positive and finite"));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidConfig("threads must be positive"));
        }
        Ok(())
    }

    pub fn palette(&self) -> HuePalette {
        HuePalette {
            offset: self.hue_offset,
            divisor: self.hue_divisor,
        }
    }

    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_size: DISPLAY_SIZE,
            fractal: FractalKind::default(),
            max_iterations: MAX_ITERATIONS,
            escape_radius: ESCAPE_RADIUS,
            zoom_factor: ZOOM_FACTOR,
            hue_offset: HUE_OFFSET,
            hue_divisor: HUE_DIVISOR,
            colouring: Colouring::default(),
            threads: None,
        }
    }
}
