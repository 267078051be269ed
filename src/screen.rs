use crate::error::{Error, Result};

/**
Pixel dimensions of the display. Always square and never empty; build one
with [`Size::square`].

```compile_fail
let size = fractal_explorer::screen::Size { width: 0, height: 0 };
```
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl Size {
    pub fn square(size: u32) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidDisplaySize(size));
        }
        Ok(Self {
            width: size,
            height: size,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_rejects_zero() {
        assert_eq!(Size::square(0), Err(Error::InvalidDisplaySize(0)));
    }

    #[test]
    fn test_contains() {
        let size = Size::square(4).unwrap();
        assert_eq!((size.width(), size.height()), (4, 4));
        assert_eq!(size.pixel_count(), 16);
        assert!(size.contains(0, 3));
        assert!(!size.contains(4, 0));
        assert!(!size.contains(0, 4));
    }
}
