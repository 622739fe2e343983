// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Renderer walks every pixel of the integral plane, maps it to
//! the complex window, measures its escape time, and paints the
//! result into a single color channel.  No pixel depends on any
//! other, so the threaded version hands out whole rows from a shared
//! queue and lets each worker write straight into its row of the
//! final buffer.

extern crate crossbeam;

use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};

use bitmap::{check_dimensions, Image, BYTES_PER_PIXEL};
use errors::Error;
use escape::{escape_time, intensity};
use planes::{Pixel, PlaneMapper};
use scheme::ColorScheme;

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u8>>>>;

/// How often, in rows, the progress observer hears from the renderer.
pub const PROGRESS_INTERVAL: usize = 10;

/// Handed to the progress observer every `PROGRESS_INTERVAL` rows.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress {
    /// The row just finished.
    pub row: usize,
    /// Total rows in the image.
    pub height: usize,
}

impl Progress {
    /// How far along `row` is, where the last row is 100%.
    pub fn percent(&self) -> f32 {
        if self.height <= 1 {
            return 100.0;
        }
        (self.row as f32) / ((self.height - 1) as f32) * 100.0
    }
}

/// Takes the size of the image and a color scheme, and paints the
/// fixed Mandelbrot window at that resolution.
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    plane: PlaneMapper,
    scheme: ColorScheme,
}

impl Renderer {
    /// Requires the width and height of the image and the channel to
    /// paint.  A zero in either dimension renders an empty image.
    pub fn new(width: usize, height: usize, scheme: ColorScheme) -> Self {
        Renderer {
            plane: PlaneMapper::new(width, height),
            scheme,
        }
    }

    /// Fills one row of pixels, then reports to the observer if this
    /// is one of the rows it wants to hear about.
    fn render_row<F>(&self, row: usize, buffer: &mut [u8], progress: &F)
    where
        F: Fn(Progress),
    {
        for (column, px) in buffer.chunks_mut(BYTES_PER_PIXEL).enumerate() {
            let point = self.plane.pixel_to_point(&Pixel(column, row));
            px.copy_from_slice(&self.scheme.bgr(intensity(escape_time(point))));
        }
        if row % PROGRESS_INTERVAL == 0 {
            progress(Progress {
                row,
                height: self.plane.height(),
            });
        }
    }

    /// The single-threaded render, top row first.  The size is not
    /// checked; `render` refuses images a bitmap cannot hold.
    pub fn render_single<F>(&self, progress: F) -> Image
    where
        F: Fn(Progress),
    {
        let mut image = Image::new(self.plane.width(), self.plane.height());
        if self.plane.is_empty() {
            return image;
        }
        let stride = image.stride();
        for (row, buffer) in image.pixel_data_mut().chunks_mut(stride).enumerate() {
            self.render_row(row, buffer, &progress);
        }
        image
    }

    /// A multi-threaded version of the render function that takes a
    /// thread count.  The image is byte-for-byte the one
    /// `render_single` produces; only the order in which the observer
    /// hears about rows may differ.
    pub fn render<F>(&self, threads: usize, progress: F) -> Result<Image, Error>
    where
        F: Fn(Progress) + Sync,
    {
        if threads == 0 {
            return Err(Error::InvalidThreads(threads));
        }
        check_dimensions(self.plane.width(), self.plane.height())?;
        debug!(
            width = self.plane.width(),
            height = self.plane.height(),
            scheme = %self.scheme,
            threads,
            "rendering"
        );
        if threads == 1 || self.plane.is_empty() {
            return Ok(self.render_single(progress));
        }
        let mut image = Image::new(self.plane.width(), self.plane.height());

        let stride = image.stride();
        {
            let rows: RowQueue = Arc::new(Mutex::new(
                image.pixel_data_mut().chunks_mut(stride).enumerate(),
            ));
            let progress = &progress;
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| loop {
                        let next = match rows.lock() {
                            Ok(mut rows) => rows.next(),
                            Err(_) => None,
                        };
                        match next {
                            Some((row, buffer)) => self.render_row(row, buffer, progress),
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .map_err(|_| Error::WorkerPanic)?;
        }
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape::MAX_ITERATION;

    fn no_progress(_: Progress) {}

    #[test]
    fn empty_planes_render_empty_images() {
        let r = Renderer::new(0, 10, ColorScheme::Red);
        let image = r.render_single(no_progress);
        assert!(image.is_empty());
        assert!(image.pixel_data().is_empty());
        let image = Renderer::new(10, 0, ColorScheme::Red)
            .render(4, no_progress)
            .unwrap();
        assert!(image.pixel_data().is_empty());
    }

    #[test]
    fn every_pixel_is_written() {
        let image = Renderer::new(7, 4, ColorScheme::Blue).render_single(no_progress);
        assert_eq!(image.pixel_data().len(), 7 * 4 * 3);
    }

    #[test]
    fn points_inside_the_set_are_brightest() {
        // Pixel (5, 2) on a 7x4 plane is the origin.
        let image = Renderer::new(7, 4, ColorScheme::Green).render_single(no_progress);
        assert_eq!(image.pixel(5, 2), Some([0, intensity(MAX_ITERATION), 0]));
        assert_eq!(image.pixel(5, 2), Some([0, 255, 0]));
    }

    #[test]
    fn threaded_render_matches_single() {
        let r = Renderer::new(64, 37, ColorScheme::Red);
        let single = r.render_single(no_progress);
        for threads in 1..5 {
            let threaded = r.render(threads, no_progress).unwrap();
            assert_eq!(threaded, single, "differs with {} threads", threads);
        }
    }

    #[test]
    fn oversized_images_are_refused_before_allocating() {
        match Renderer::new(usize::max_value() / 2, 8, ColorScheme::Red).render(2, no_progress) {
            Err(Error::TooLarge { .. }) => (),
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn zero_threads_is_refused() {
        match Renderer::new(4, 4, ColorScheme::Red).render(0, no_progress) {
            Err(Error::InvalidThreads(0)) => (),
            other => panic!("expected InvalidThreads, got {:?}", other),
        }
    }

    #[test]
    fn progress_arrives_every_ten_rows() {
        let seen = Mutex::new(vec![]);
        Renderer::new(3, 25, ColorScheme::Red).render_single(|p: Progress| {
            seen.lock().unwrap().push(p.row);
        });
        assert_eq!(*seen.lock().unwrap(), vec![0, 10, 20]);

        let seen = Mutex::new(vec![]);
        Renderer::new(3, 25, ColorScheme::Red)
            .render(3, |p: Progress| seen.lock().unwrap().push(p.row))
            .unwrap();
        let mut rows = seen.into_inner().unwrap();
        rows.sort();
        assert_eq!(rows, vec![0, 10, 20]);
    }

    #[test]
    fn progress_percent_runs_to_one_hundred() {
        assert_eq!(Progress { row: 0, height: 11 }.percent(), 0.0);
        assert_eq!(Progress { row: 5, height: 11 }.percent(), 50.0);
        assert_eq!(Progress { row: 10, height: 11 }.percent(), 100.0);
        assert_eq!(Progress { row: 0, height: 1 }.percent(), 100.0);
    }
}
