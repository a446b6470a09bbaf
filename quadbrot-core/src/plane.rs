use crate::complex::Complex;
use crate::error::CoreError;

/// Maps pixel coordinates on a square grid to points on the complex plane.
///
/// `real = (i - center_offset) / scale_factor` and likewise for the
/// imaginary part with `j`. Pixel `i` runs along the real axis and `j` along
/// the imaginary axis, with no flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMapping {
    /// Side length of the square pixel grid.
    pub grid_size: u32,

    /// Pixel coordinate that lands on the plane origin, `grid_size / 2`.
    pub center_offset: f64,

    /// Pixels per complex-plane unit.
    pub scale_factor: f64,
}

impl PlaneMapping {
    /// Pixels per plane unit, relative to the grid size. A 1000 pixel grid
    /// gets a scale of 400, showing roughly `[-1.25, 1.25]` on each axis.
    pub const DEFAULT_SCALE_RATIO: f64 = 0.4;

    pub fn new(grid_size: u32, scale_factor: f64) -> crate::Result<Self> {
        if grid_size == 0 {
            return Err(CoreError::InvalidGridSize(grid_size));
        }
        if scale_factor <= 0.0 || !scale_factor.is_finite() {
            return Err(CoreError::InvalidScale(scale_factor));
        }
        Ok(Self {
            grid_size,
            center_offset: grid_size as f64 / 2.0,
            scale_factor,
        })
    }

    /// A mapping whose scale is derived from the grid size.
    pub fn for_grid(grid_size: u32) -> crate::Result<Self> {
        Self::new(grid_size, grid_size as f64 * Self::DEFAULT_SCALE_RATIO)
    }

    #[inline]
    pub fn pixel_to_complex(&self, i: u32, j: u32) -> Complex {
        Complex::new(
            (i as f64 - self.center_offset) / self.scale_factor,
            (j as f64 - self.center_offset) / self.scale_factor,
        )
    }

    /// Plane points of the first and last pixel on the diagonal.
    pub fn corners(&self) -> (Complex, Complex) {
        let last = self.grid_size - 1;
        (self.pixel_to_complex(0, 0), self.pixel_to_complex(last, last))
    }

    /// Total number of pixels in the grid.
    pub fn pixel_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn default_grid_matches_classic_constants() {
        let m = PlaneMapping::for_grid(1000).unwrap();
        assert_eq!(m.center_offset, 500.0);
        assert!((m.scale_factor - 400.0).abs() < EPSILON);

        let p = m.pixel_to_complex(900, 100);
        assert!((p.re - 1.0).abs() < EPSILON);
        assert!((p.im + 1.0).abs() < EPSILON);
    }

    #[test]
    fn center_pixel_maps_to_origin() {
        let m = PlaneMapping::for_grid(4).unwrap();
        assert_eq!(m.pixel_to_complex(2, 2), Complex::ZERO);
    }

    #[test]
    fn corners_span_the_window() {
        let m = PlaneMapping::new(4, 1.6).unwrap();
        let (lo, hi) = m.corners();
        assert!((lo.re + 1.25).abs() < EPSILON);
        assert!((lo.im + 1.25).abs() < EPSILON);
        assert!((hi.re - 0.625).abs() < EPSILON);
        assert!((hi.im - 0.625).abs() < EPSILON);
    }

    #[test]
    fn real_follows_i_and_imaginary_follows_j() {
        let m = PlaneMapping::new(10, 1.0).unwrap();
        assert_eq!(m.pixel_to_complex(7, 2), Complex::new(2.0, -3.0));
    }

    #[test]
    fn invalid_grid_size() {
        assert!(matches!(
            PlaneMapping::new(0, 1.0),
            Err(CoreError::InvalidGridSize(0))
        ));
        assert!(PlaneMapping::for_grid(0).is_err());
    }

    #[test]
    fn invalid_scale() {
        assert!(PlaneMapping::new(100, 0.0).is_err());
        assert!(PlaneMapping::new(100, -1.0).is_err());
        assert!(PlaneMapping::new(100, f64::NAN).is_err());
    }

    #[test]
    fn pixel_count() {
        assert_eq!(PlaneMapping::for_grid(4).unwrap().pixel_count(), 16);
    }
}
