//! The window of the complex plane that is currently on screen.

use crate::error::{Error, Result};

/**
A rectangle in plane coordinates. `(x, y)` is the corner that maps to
pixel `(0, 0)`; `width` and `height` are always positive and finite.

The only way to build one outside this crate is [`ViewportRange::new`]:

```compile_fail
let range = fractal_explorer::ViewportRange { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };
```
*/
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportRange {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl ViewportRange {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::NonFiniteCoordinate { real: x, imag: y });
        }
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::InvalidRange { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn x_max(&self) -> f64 {
        self.x + self.width
    }

    pub fn y_max(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overwrite this range's fields with `other`'s.
    pub fn set(&mut self, other: &ViewportRange) {
        self.x = other.x;
        self.y = other.y;
        self.width = other.width;
        self.height = other.height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_empty_area() {
        assert!(matches!(
            ViewportRange::new(0.0, 0.0, 0.0, 1.0),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            ViewportRange::new(0.0, 0.0, 1.0, -1.0),
            Err(Error::InvalidRange { .. })
        ));
        assert!(matches!(
            ViewportRange::new(f64::NAN, 0.0, 1.0, 1.0),
            Err(Error::NonFiniteCoordinate { .. })
        ));
    }

    #[test]
    fn test_bounds_and_center() {
        let range = ViewportRange::new(-2.0, -1.5, 3.0, 3.0).unwrap();
        assert_eq!((range.x(), range.y()), (-2.0, -1.5));
        assert_eq!((range.width(), range.height()), (3.0, 3.0));
        assert_eq!(range.x_max(), 1.0);
        assert_eq!(range.y_max(), 1.5);
        assert_eq!(range.center(), (-0.5, 0.0));
    }

    #[test]
    fn test_set_updates_in_place() {
        let mut range = ViewportRange::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let other = ViewportRange::new(-1.0, 2.0, 0.5, 0.25).unwrap();
        range.set(&other);
        assert_eq!(range, other);
    }
}
