//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and the fixed window of the complex plane that this renderer
//! draws.  The arithmetic underneath it, `remap`, is also how an
//! iteration count becomes a color byte.
use num::Complex;

/// The real (x) extent of the window on the complex plane.
pub const REAL_RANGE: (f32, f32) = (-2.5, 1.0);

/// The imaginary (y) extent of the window on the complex plane.
pub const IMAGINARY_RANGE: (f32, f32) = (-1.0, 1.0);

/// Linearly maps `value` from the range `in_lo..in_hi` onto the
/// range `out_lo..out_hi`.  Nothing is clamped: a value outside the
/// input range lands outside the output range.  An empty input range
/// (`in_lo == in_hi`) divides by zero and yields infinity or NaN.
#[inline]
pub fn remap(value: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    out_lo + ((out_hi - out_lo) / (in_hi - in_lo)) * (value - in_lo)
}

/// Describes the width and height of an integral plane that starts at
/// 0,0.  Pixels run from 0 up to, but not including, width and height.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the column, row of a pixel.  Row 0 is the first row in
/// memory and in the file.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of an integral plane onto the complex window.  The
/// window never changes with the resolution, so an image whose
/// aspect ratio differs from 3.5:2 comes out stretched.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The size of the integral plane, width then height.
    pub integral_plane: IntegralPlane,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane; the complex
    /// window is fixed.
    pub fn new(width: usize, height: usize) -> PlaneMapper {
        PlaneMapper {
            integral_plane: IntegralPlane(width, height),
        }
    }

    /// The width of the integral plane.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// The height of the integral plane.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, map it to the
    /// equivalent point in the complex window.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f32> {
        Complex::new(
            remap(
                pixel.0 as f32,
                0.0,
                self.integral_plane.0 as f32,
                REAL_RANGE.0,
                REAL_RANGE.1,
            ),
            remap(
                pixel.1 as f32,
                0.0,
                self.integral_plane.1 as f32,
                IMAGINARY_RANGE.0,
                IMAGINARY_RANGE.1,
            ),
        )
    }
}
