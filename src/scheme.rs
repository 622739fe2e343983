//! The three single-channel palettes.  A scheme picks which of red,
//! blue or green carries a pixel's intensity; the other two channels
//! stay black.

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

use errors::Error;

/// Which color channel carries the intensity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// Shades of red.
    Red,
    /// Shades of blue.
    Blue,
    /// Shades of green.
    Green,
}

impl ColorScheme {
    /// Every scheme, in index order.
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Red, ColorScheme::Blue, ColorScheme::Green];

    /// The pixel for `intensity`, in the blue, green, red byte order
    /// bitmaps are stored in.
    pub fn bgr(self, intensity: u8) -> [u8; 3] {
        match self {
            ColorScheme::Red => [0, 0, intensity],
            ColorScheme::Blue => [intensity, 0, 0],
            ColorScheme::Green => [0, intensity, 0],
        }
    }

    /// The scheme's number, 1 through 3.  Default output files are
    /// named after it.
    pub fn index(self) -> usize {
        match self {
            ColorScheme::Red => 1,
            ColorScheme::Blue => 2,
            ColorScheme::Green => 3,
        }
    }

    /// The lowercase name the command line accepts.
    pub fn name(self) -> &'static str {
        match self {
            ColorScheme::Red => "red",
            ColorScheme::Blue => "blue",
            ColorScheme::Green => "green",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(ColorScheme::Red),
            "blue" => Ok(ColorScheme::Blue),
            "green" => Ok(ColorScheme::Green),
            _ => Err(Error::UnknownScheme(s.to_string())),
        }
    }
}

/// Picks one of the three schemes with equal odds.
impl Distribution<ColorScheme> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ColorScheme {
        ColorScheme::ALL[rng.gen_range(0, ColorScheme::ALL.len())]
    }
}
