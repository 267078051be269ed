/*!
Conversion between pixel indices and plane coordinates.

A pixel index `p` on a display of `n` pixels samples the left edge of the
interval `[p, p + 1)`, so pixel `0` lands exactly on `range_min` and pixel
`n - 1` lands one step short of `range_max`.

Pixels outside `0..n` are not rejected here: they extrapolate linearly past
the edges of the range. Callers that take pixels from the outside world
(mouse clicks) bounds-check them first.
*/

pub fn map_pixel_to_plane(range_min: f64, range_max: f64, display_size: u32, pixel: u32) -> f64 {
    debug_assert!(display_size > 0);
    debug_assert!(range_max > range_min);
    range_min + (pixel as f64 / display_size as f64) * (range_max - range_min)
}

/// Inverse of [`map_pixel_to_plane`]. The result is fractional; truncating it
/// gives the pixel whose sample interval contains `coord`.
pub fn map_plane_to_pixel(range_min: f64, range_max: f64, display_size: u32, coord: f64) -> f64 {
    debug_assert!(display_size > 0);
    debug_assert!(range_max > range_min);
    (coord - range_min) / (range_max - range_min) * display_size as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_pixel_is_range_min() {
        assert_eq!(map_pixel_to_plane(-2.0, 1.0, 800, 0), -2.0);
    }

    #[test]
    fn test_last_pixel_stops_short_of_range_max() {
        let last = map_pixel_to_plane(-2.0, 1.0, 800, 799);
        assert!(last < 1.0);
        assert!((last - (-2.0 + 799.0 / 800.0 * 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_center_pixel() {
        assert_eq!(map_pixel_to_plane(-2.0, 1.0, 800, 400), -0.5);
        assert_eq!(map_pixel_to_plane(-1.5, 1.5, 800, 400), 0.0);
    }

    #[test]
    fn test_out_of_range_pixel_extrapolates() {
        assert_eq!(map_pixel_to_plane(0.0, 1.0, 4, 8), 2.0);
    }

    #[test]
    fn test_plane_to_pixel_inverts() {
        for pixel in [0, 1, 137, 400, 799] {
            let coord = map_pixel_to_plane(-2.0, 1.0, 800, pixel);
            let back = map_plane_to_pixel(-2.0, 1.0, 800, coord);
            assert!((back - pixel as f64).abs() < 1e-9, "{} -> {}", pixel, back);
        }
    }
}
