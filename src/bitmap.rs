//! The in-memory image and the two ways of putting it on disk: an
//! uncompressed 24-bit bitmap with a header built field by field,
//! and a binary pixmap through the image crate's PNM encoder.
//!
//! Rows are kept top to bottom and the bitmap header carries a
//! positive height, the same convention in memory and on disk.

use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use errors::Error;

/// Bytes per pixel: blue, green, red.
pub const BYTES_PER_PIXEL: usize = 3;

/// Size of the `BM` file header.
pub const FILE_HEADER_SIZE: usize = 14;

/// Size of the BITMAPINFOHEADER that follows it.
pub const INFO_HEADER_SIZE: usize = 40;

/// Where the pixel data starts.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// Horizontal and vertical resolution written to the header, in pixels
/// per meter (72 DPI).
pub const PIXELS_PER_METER: u32 = 0x0B13;

/// Which encoder `Image::save` uses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Uncompressed 24-bit Windows bitmap.
    Bmp,
    /// Binary portable pixmap (P6).
    Pnm,
}

impl OutputFormat {
    /// The file extension conventionally used for the format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Pnm => "pnm",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bmp" => Ok(OutputFormat::Bmp),
            "pnm" | "ppm" => Ok(OutputFormat::Pnm),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Row bytes in the file: each row is padded with zeros to a multiple
/// of four bytes.  Only for widths already known to fit in memory.
fn padded_stride(width: usize) -> usize {
    (width * BYTES_PER_PIXEL + 3) & !3
}

/// Bytes of padded pixel data for a `width` by `height` bitmap, or
/// `None` if it overflows.
fn checked_data_size(width: usize, height: usize) -> Option<usize> {
    width
        .checked_mul(BYTES_PER_PIXEL)?
        .checked_add(3)
        .map(|stride| stride & !3)?
        .checked_mul(height)
}

/// The size fields of a bitmap header: file size, pixel data size,
/// width and height.  Fails if any of them would overflow its 32-bit
/// field; width and height are signed in the info header.
fn header_fields(width: usize, height: usize) -> Result<(u32, u32, u32, u32), Error> {
    let too_large = Error::TooLarge { width, height };
    let data_size = match checked_data_size(width, height) {
        Some(size) => size,
        None => return Err(too_large),
    };
    let file_size = match data_size.checked_add(PIXEL_DATA_OFFSET) {
        Some(size) if size <= u32::max_value() as usize => size,
        _ => return Err(too_large),
    };
    if width > i32::max_value() as usize || height > i32::max_value() as usize {
        return Err(too_large);
    }
    Ok((file_size as u32, data_size as u32, width as u32, height as u32))
}

/// Checks that a `width` by `height` image can be written as a
/// bitmap, without allocating anything.  A zero dimension passes.
pub fn check_dimensions(width: usize, height: usize) -> Result<(), Error> {
    header_fields(width, height).map(|_| ())
}

/// Builds the 54 bytes that precede the pixel data of a `width` by
/// `height` bitmap.  Fails if any of the 32-bit size fields would
/// overflow.
pub fn bmp_header(width: usize, height: usize) -> Result<[u8; PIXEL_DATA_OFFSET], Error> {
    let (file_size, data_size, w, h) = header_fields(width, height)?;

    let mut header = [0u8; PIXEL_DATA_OFFSET];
    header[0] = b'B';
    header[1] = b'M';
    header[2..6].copy_from_slice(&file_size.to_le_bytes());
    // 6..10 reserved
    header[10..14].copy_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    let info = &mut header[FILE_HEADER_SIZE..];
    info[0..4].copy_from_slice(&(INFO_HEADER_SIZE as u32).to_le_bytes());
    info[4..8].copy_from_slice(&w.to_le_bytes());
    info[8..12].copy_from_slice(&h.to_le_bytes());
    info[12..14].copy_from_slice(&1u16.to_le_bytes());
    info[14..16].copy_from_slice(&((BYTES_PER_PIXEL * 8) as u16).to_le_bytes());
    // 16..20 compression: none
    info[20..24].copy_from_slice(&data_size.to_le_bytes());
    info[24..28].copy_from_slice(&PIXELS_PER_METER.to_le_bytes());
    info[28..32].copy_from_slice(&PIXELS_PER_METER.to_le_bytes());
    // 32..40 palette size and important colors
    Ok(header)
}

/// A fully rendered picture: `width * height` pixels, row-major, three
/// bytes each in blue, green, red order, with no padding in memory.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    pixel_data: Vec<u8>,
}

impl Image {
    /// A black image of the given size.
    pub fn new(width: usize, height: usize) -> Image {
        Image {
            width,
            height,
            pixel_data: vec![0 as u8; width * height * BYTES_PER_PIXEL],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes per row in memory.
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// The raw blue, green, red bytes.
    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub(crate) fn pixel_data_mut(&mut self) -> &mut [u8] {
        &mut self.pixel_data
    }

    /// The blue, green, red bytes of one pixel, if it is inside the
    /// image.
    pub fn pixel(&self, col: usize, row: usize) -> Option<[u8; 3]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let offset = row * self.stride() + col * BYTES_PER_PIXEL;
        let mut px = [0u8; 3];
        px.copy_from_slice(&self.pixel_data[offset..offset + BYTES_PER_PIXEL]);
        Some(px)
    }

    /// The number of bytes `write_bmp` will produce.
    pub fn bmp_len(&self) -> usize {
        PIXEL_DATA_OFFSET + padded_stride(self.width) * self.height
    }

    /// Writes the image as a bitmap: header, then rows in memory order,
    /// each padded to a four byte boundary.
    pub fn write_bmp<W: Write>(&self, mut out: W) -> Result<(), Error> {
        let header = bmp_header(self.width, self.height)?;
        out.write_all(&header)?;
        if !self.is_empty() {
            let padding = [0u8; 3];
            let pad = padded_stride(self.width) - self.stride();
            for row in self.pixel_data.chunks(self.stride()) {
                out.write_all(row)?;
                out.write_all(&padding[..pad])?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Writes the image as a binary pixmap through the image crate.
    pub fn write_pnm<W: Write>(&self, mut out: W) -> Result<(), Error> {
        let (_, _, width, height) = header_fields(self.width, self.height)?;
        let rgb: Vec<u8> = self
            .pixel_data
            .chunks(BYTES_PER_PIXEL)
            .flat_map(|px| px.iter().rev().cloned())
            .collect();
        {
            let mut encoder = PNMEncoder::new(&mut out)
                .with_subtype(PNMSubtype::Pixmap(SampleEncoding::Binary));
            encoder.encode(&rgb[..], width, height, ColorType::RGB(8))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the image into it.
    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<(), Error> {
        let path = path.as_ref();
        let output = BufWriter::new(File::create(path)?);
        match format {
            OutputFormat::Bmp => self.write_bmp(output)?,
            OutputFormat::Pnm => self.write_pnm(output)?,
        }
        info!(path = %path.display(), width = self.width, height = self.height, "image written");
        Ok(())
    }
}
