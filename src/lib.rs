/*!
Escape-time fractal rendering and viewport navigation.

An [`Explorer`] owns the visible [`ViewportRange`] and reacts to resets and
clicks; a [`render::Renderer`] turns the viewport into a [`render::Frame`] of
colours, which is handed to a [`render::Surface`] supplied by the UI.
*/

pub mod colour;
pub mod config;
pub mod coords;
pub mod error;
pub mod fractal;
pub mod range;
pub mod render;
pub mod screen;
pub mod session;

pub use config::Config;
pub use error::{Error, Result};
pub use fractal::{FractalGenerator, IterationResult, Mandelbrot};
pub use range::ViewportRange;
pub use session::Explorer;
