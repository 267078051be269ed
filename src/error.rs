use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("display size must be positive, got {0}")]
    InvalidDisplaySize(u32),
    #[error("viewport must have a positive, finite area, got {width} x {height}")]
    InvalidRange { width: f64, height: f64 },
    #[error("plane coordinate ({real}, {imag}) is not finite")]
    NonFiniteCoordinate { real: f64, imag: f64 },
    #[error("zoom scale must be finite and greater than zero, got {0}")]
    InvalidScale(f64),
    #[error("pixel ({x}, {y}) lies outside the {size}x{size} display")]
    PixelOutOfBounds { x: u32, y: u32, size: u32 },
    #[error("could not start render workers: {0}")]
    ThreadPool(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
