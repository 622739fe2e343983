#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which repeatedly squaring `z` and adding `c`, starting from
//! zero, never sends `z` off to infinity.  For points outside the
//! set, the number of iterations it takes before `|z|` passes 2 is
//! the "velocity" of that point, and that velocity is what we paint.
//!
//! This crate renders a fixed window of the plane (real axis from
//! -2.5 to 1.0, imaginary axis from -1.0 to 1.0) at a chosen
//! resolution, maps each point's velocity onto a single color
//! channel, and writes the result as an uncompressed 24-bit bitmap.
//! Every pixel is independent of every other, so rows can be farmed
//! out to as many threads as you care to throw at it.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate num;
extern crate num_cpus;
extern crate rand;
#[macro_use]
extern crate tracing;

pub mod bitmap;
pub mod config;
pub mod errors;
pub mod escape;
pub mod planes;
pub mod renderer;
pub mod scheme;

pub use bitmap::{Image, OutputFormat};
pub use config::{run, Config};
pub use errors::Error;
pub use escape::{escape_iterations, MAX_ITERATION};
pub use planes::{remap, PlaneMapper};
pub use renderer::{Progress, Renderer};
pub use scheme::ColorScheme;
