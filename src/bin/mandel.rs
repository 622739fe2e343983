extern crate clap;
extern crate mandelbrot;
extern crate num_cpus;
extern crate rand;
#[macro_use]
extern crate tracing;
extern crate tracing_subscriber;

use clap::{App, Arg, ArgMatches};
use mandelbrot::bitmap::check_dimensions;
use mandelbrot::config::{default_output, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use mandelbrot::{ColorScheme, Config, OutputFormat, Progress};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn validate_size(s: &str) -> Result<(), String> {
    match parse_pair::<usize>(s, 'x') {
        Some((w, h)) if w > 0 && h > 0 => check_dimensions(w, h).map_err(|e| e.to_string()),
        Some(_) => Err("Width and height must both be positive".to_string()),
        None => Err("Could not parse output image size".to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const SCHEME: &str = "scheme";
const THREADS: &str = "threads";
const FORMAT: &str = "format";
const RANDOM: &str = "random";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(false)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (default: mandelbrot_<scheme number>.<format>)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("8000x4571")
                .validator(|s| validate_size(&s))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(SCHEME)
                .required(false)
                .long(SCHEME)
                .short("c")
                .takes_value(true)
                .possible_values(&["red", "blue", "green", RANDOM])
                .default_value(RANDOM)
                .help("Color channel carrying the escape velocity"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver (default: all cores)"),
        )
        .arg(
            Arg::with_name(FORMAT)
                .required(false)
                .long(FORMAT)
                .short("f")
                .takes_value(true)
                .possible_values(&["bmp", "pnm"])
                .default_value("bmp")
                .help("Output file format"),
        )
        .get_matches()
}

/// Turns validated matches into a render configuration.  The
/// validators have already run, so parse failures here fall back to
/// the defaults rather than aborting.
fn config(matches: &ArgMatches) -> Config {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair(s, 'x'))
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let scheme = match matches.value_of(SCHEME) {
        Some(RANDOM) | None => rand::random::<ColorScheme>(),
        Some(name) => ColorScheme::from_str(name).unwrap_or_else(|_| rand::random()),
    };
    let format = matches
        .value_of(FORMAT)
        .and_then(|s| OutputFormat::from_str(s).ok())
        .unwrap_or(OutputFormat::Bmp);
    let threads = matches
        .value_of(THREADS)
        .and_then(|s| usize::from_str(s).ok())
        .unwrap_or_else(num_cpus::get);
    let output = matches
        .value_of(OUTPUT)
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(scheme, format));

    Config {
        width,
        height,
        scheme,
        threads,
        output,
        format,
    }
}

fn report(progress: Progress) {
    info!(row = progress.row, "{:.2}%", progress.percent());
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let config = config(&args());
    info!(
        scheme = %config.scheme,
        width = config.width,
        height = config.height,
        threads = config.threads,
        output = %config.output.display(),
        "starting render"
    );

    if let Err(e) = mandelbrot::run(&config, report) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
