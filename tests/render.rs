#[macro_use]
extern crate itertools;
extern crate image;
extern crate mandelbrot;
extern crate tempfile;

use image::{GenericImageView, ImageFormat, Pixel};
use mandelbrot::{escape_iterations, run, ColorScheme, Config, OutputFormat, Progress, Renderer};
use std::fs;
use tempfile::tempdir;

fn le32(bytes: &[u8], at: usize) -> u32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&bytes[at..at + 4]);
    u32::from_le_bytes(b)
}

fn quiet(_: Progress) {}

#[test]
fn the_known_points_behave() {
    assert_eq!(escape_iterations(3.0, 3.0), 1);
    assert_eq!(escape_iterations(0.0, 0.0), 1000);
    assert_eq!(escape_iterations(-1.0, 0.0), 1000);
}

#[test]
fn bitmap_size_and_header_round_trip() {
    let dir = tempdir().unwrap();
    let (width, height) = (40, 23);
    let config = Config {
        width,
        height,
        scheme: ColorScheme::Blue,
        threads: 2,
        output: dir.path().join("out.bmp"),
        format: OutputFormat::Bmp,
    };
    run(&config, quiet).unwrap();

    let bytes = fs::read(&config.output).unwrap();
    let size = (width * height * 3) as u32;
    assert_eq!(bytes.len(), 54 + width * height * 3);
    assert_eq!(&bytes[0..2], b"BM");
    assert_eq!(le32(&bytes, 2), size + 54);
    assert_eq!(le32(&bytes, 10), 54);
    assert_eq!(le32(&bytes, 18), width as u32);
    assert_eq!(le32(&bytes, 22), height as u32);
    assert_eq!(le32(&bytes, 34), size);
}

#[test]
fn only_the_chosen_channel_is_lit() {
    let (width, height) = (36, 20);
    for (scheme, lit) in &[
        (ColorScheme::Blue, 0),
        (ColorScheme::Green, 1),
        (ColorScheme::Red, 2),
    ] {
        let image = Renderer::new(width, height, *scheme).render_single(quiet);
        let mut brightest = 0;
        for (row, col) in iproduct!(0..height, 0..width) {
            let px = image.pixel(col, row).unwrap();
            for channel in 0..3 {
                if channel != *lit {
                    assert_eq!(px[channel], 0, "{} at {},{}", scheme, col, row);
                }
            }
            brightest = brightest.max(px[*lit]);
        }
        assert_eq!(brightest, 255, "{} never reached the set", scheme);
    }
}

#[test]
fn written_bitmaps_decode() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("odd.bmp");
    // 13 pixels a row needs a byte of padding.
    let rendered = Renderer::new(13, 9, ColorScheme::Red).render_single(quiet);
    rendered.save(&path, OutputFormat::Bmp).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), rendered.bmp_len());
    assert_eq!(bytes.len(), 54 + 40 * 9);
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::BMP).unwrap();
    assert_eq!(decoded.dimensions(), (13, 9));
}

#[test]
fn written_pixmaps_decode_to_the_same_pixels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.pnm");
    let rendered = Renderer::new(21, 12, ColorScheme::Green).render_single(quiet);
    rendered.save(&path, OutputFormat::Pnm).unwrap();

    let bytes = fs::read(&path).unwrap();
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::PNM)
        .unwrap()
        .to_rgb();
    assert_eq!(decoded.dimensions(), (21, 12));
    for (row, col) in iproduct!(0..12, 0..21) {
        let bgr = rendered.pixel(col, row).unwrap();
        let rgb = decoded.get_pixel(col as u32, row as u32).channels();
        assert_eq!(rgb, &[bgr[2], bgr[1], bgr[0]][..]);
    }
}

#[test]
fn unwritable_outputs_are_io_failures() {
    let dir = tempdir().unwrap();
    let config = Config {
        width: 8,
        height: 8,
        scheme: ColorScheme::Red,
        threads: 1,
        output: dir.path().join("missing").join("out.bmp"),
        format: OutputFormat::Bmp,
    };
    match run(&config, quiet) {
        Err(mandelbrot::Error::Io(_)) => (),
        other => panic!("expected an I/O failure, got {:?}", other),
    }
}
