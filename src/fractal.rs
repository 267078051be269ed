//! Escape-time fractals.

use crate::{
    config,
    error::{Error, Result},
    range::ViewportRange,
};

/// Escape step of a point, or `None` if it stayed bounded for every
/// iteration (the point is treated as inside the set).
pub type IterationResult = Option<u32>;

/// The maths and default view of one fractal.
///
/// Generators hold no per-session state; the viewport they operate on is
/// owned by the caller.
pub trait FractalGenerator: Send + Sync {
    /// The view shown at startup and after a reset.
    fn initial_range(&self) -> ViewportRange;

    fn num_iterations(&self, real: f64, imag: f64) -> IterationResult;

    fn max_iterations(&self) -> u32;

    /**
    Move the centre of `range` to `(center_x, center_y)` and multiply both
    extents by `scale`. A scale below `1.0` zooms in, above `1.0` zooms out.

    `range` is left untouched when an error is returned.
    */
    fn recenter_and_zoom(
        &self,
        range: &mut ViewportRange,
        center_x: f64,
        center_y: f64,
        scale: f64,
    ) -> Result<()> {
        if !center_x.is_finite() || !center_y.is_finite() {
            return Err(Error::NonFiniteCoordinate {
                real: center_x,
                imag: center_y,
            });
        }
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidScale(scale));
        }

        let width = range.width * scale;
        let height = range.height * scale;
        let zoomed = ViewportRange::new(
            center_x - width / 2.0,
            center_y - height / 2.0,
            width,
            height,
        )?;
        range.set(&zoomed);
        Ok(())
    }
}

/// `z -> z^2 + c`, starting from `z = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mandelbrot {
    max_iterations: u32,
    escape_radius: f64,
}

impl Mandelbrot {
    pub fn new(max_iterations: u32, escape_radius: f64) -> Self {
        debug_assert!(max_iterations > 0);
        debug_assert!(escape_radius > 0.0);
        Self {
            max_iterations,
            escape_radius,
        }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(config::MAX_ITERATIONS, config::ESCAPE_RADIUS)
    }
}

impl FractalGenerator for Mandelbrot {
    fn initial_range(&self) -> ViewportRange {
        ViewportRange {
            x: -2.0,
            y: -1.5,
            width: 3.0,
            height: 3.0,
        }
    }

    fn num_iterations(&self, real: f64, imag: f64) -> IterationResult {
        // Compare squared magnitudes to skip the square root.
        let escape_radius_squared = self.escape_radius * self.escape_radius;

        let mut z_real = 0.0;
        let mut z_imag = 0.0;
        let mut iteration = 0;
        while iteration < self.max_iterations
            && z_real * z_real + z_imag * z_imag <= escape_radius_squared
        {
            let next_real = z_real * z_real - z_imag * z_imag + real;
            z_imag = 2.0 * z_real * z_imag + imag;
            z_real = next_real;
            iteration += 1;
        }

        if iteration == self.max_iterations {
            None
        } else {
            Some(iteration)
        }
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
