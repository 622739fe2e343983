//! The one error type shared by every stage of the render: checking
//! the configuration, filling the pixel buffer, and writing the file.

use std::io;

/// Everything that can stop a render from producing a file.
#[derive(Debug, Fail)]
pub enum Error {
    /// The output could not be created or written.
    #[fail(display = "I/O failure: {}", _0)]
    Io(#[cause] io::Error),

    /// Width and height must both be positive.
    #[fail(
        display = "Invalid image dimensions {}x{}: width and height must be positive",
        width, height
    )]
    InvalidDimensions {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The renderer needs at least one thread.
    #[fail(display = "Invalid thread count {}: at least one thread is required", _0)]
    InvalidThreads(usize),

    /// The image does not fit the 32-bit size fields of a bitmap header.
    #[fail(display = "An image of {}x{} is too large for a bitmap file", width, height)]
    TooLarge {
        /// Image width in pixels.
        width: usize,
        /// Image height in pixels.
        height: usize,
    },

    /// Not one of red, blue or green.
    #[fail(display = "Unknown color scheme: {}", _0)]
    UnknownScheme(String),

    /// Not one of bmp or pnm.
    #[fail(display = "Unknown output format: {}", _0)]
    UnknownFormat(String),

    /// One of the row workers died before finishing.
    #[fail(display = "A render worker panicked")]
    WorkerPanic,
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}
