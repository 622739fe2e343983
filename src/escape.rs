//! The escape-time test.  A point starts at zero and is squared and
//! shifted by its starting coordinate until its magnitude passes 2 or
//! the iteration cap is reached.  The count is the point's velocity.

use num::{clamp, Complex};

use planes::remap;

/// The iteration cap.  A point that survives this many iterations is
/// treated as inside the set.
pub const MAX_ITERATION: u32 = 1000;

/// The square of the escape radius.
const ESCAPE_NORM_SQR: f32 = 4.0;

/// Counts iterations of `z = z * z + c` for `c = x0 + y0 i`, starting
/// from `z = 0`.  The magnitude check happens before every step and
/// is inclusive, so a point sitting exactly on the radius is iterated
/// once more.  Returns a value in `0..=MAX_ITERATION`.
pub fn escape_iterations(x0: f32, y0: f32) -> u32 {
    escape_time(Complex::new(x0, y0))
}

/// As `escape_iterations`, taking the point as a complex number.
pub fn escape_time(c: Complex<f32>) -> u32 {
    let mut z: Complex<f32> = Complex::new(0.0, 0.0);
    let mut iteration = 0;
    while z.norm_sqr() <= ESCAPE_NORM_SQR && iteration < MAX_ITERATION {
        z = z * z + c;
        iteration += 1;
    }
    iteration
}

/// Maps an iteration count onto a color byte: 0 stays 0 and
/// `MAX_ITERATION` lands on 255, truncating toward zero in between.
pub fn intensity(iteration: u32) -> u8 {
    let scaled = remap(iteration as f32, 0.0, MAX_ITERATION as f32, 0.0, 255.0);
    clamp(scaled, 0.0, 255.0) as u8
}
