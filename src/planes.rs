//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a window on the complex plane described by its center and the
//! half-width of its real extent.
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in the integral plane.  Column
/// first, then row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an image onto points of the complex plane.  The
/// left edge of pixel column 0 sits `zoom` to the left of the center,
/// and the imaginary extent is scaled by the aspect ratio so that
/// pixels stay square.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The size of the integral cartesian plane.
    pub integral_plane: IntegralPlane,
    /// The complex coordinate of pixel (0, 0).
    origin: Complex<f64>,
    // The distance, on each axis, between two neighbouring pixels.
    steps: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the pixel dimensions of the image, the
    /// center of the view and the half-width of the real axis span.
    pub fn new(width: usize, height: usize, center: Complex<f64>, zoom: f64) -> PlaneMapper {
        let aspect = (height as f64) / (width as f64);
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            origin: Complex::new(center.re - zoom, center.im - aspect * zoom),
            steps: (
                2.0 * zoom / (width as f64),
                2.0 * aspect * zoom / (height as f64),
            ),
        }
    }

    /// The total number of points in the integral grid.
    pub fn pixel_count(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// corresponding point on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.steps.0,
            self.origin.im + (pixel.1 as f64) * self.steps.1,
        )
    }
}
