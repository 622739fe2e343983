//! What to render and where to put it.  The binary fills one of
//! these in from the command line; everything is checked here before
//! any pixel is computed.

use std::path::PathBuf;

use bitmap::{check_dimensions, Image, OutputFormat};
use errors::Error;
use renderer::{Progress, Renderer};
use scheme::ColorScheme;

/// The reference width in pixels.
pub const DEFAULT_WIDTH: usize = 8000;

/// The reference height in pixels.
pub const DEFAULT_HEIGHT: usize = 4571;

/// The output file used when none is given: `mandelbrot_1.bmp` for
/// red, `mandelbrot_2.bmp` for blue, `mandelbrot_3.bmp` for green.
pub fn default_output(scheme: ColorScheme, format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("mandelbrot_{}.{}", scheme.index(), format.extension()))
}

/// Settings for one render.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Image width in pixels.
    pub width: usize,
    /// Image height in pixels.
    pub height: usize,
    /// The channel that carries the intensity.
    pub scheme: ColorScheme,
    /// Worker threads for the render.
    pub threads: usize,
    /// Where the image is written.
    pub output: PathBuf,
    /// How the image is written.
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scheme: ColorScheme::Red,
            threads: ::num_cpus::get(),
            output: default_output(ColorScheme::Red, OutputFormat::Bmp),
            format: OutputFormat::Bmp,
        }
    }
}

impl Config {
    /// Refuses settings that cannot produce an image.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_dimensions(self.width, self.height)?;
        if self.threads == 0 {
            return Err(Error::InvalidThreads(self.threads));
        }
        Ok(())
    }
}

/// Validates `config`, renders it, and writes the result to
/// `config.output`.  The rendered image is handed back.
pub fn run<F>(config: &Config, progress: F) -> Result<Image, Error>
where
    F: Fn(Progress) + Sync,
{
    config.validate()?;
    let renderer = Renderer::new(config.width, config.height, config.scheme);
    let image = renderer.render(config.threads, progress)?;
    image.save(&config.output, config.format)?;
    Ok(image)
}
