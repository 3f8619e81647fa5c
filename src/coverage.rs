//! Single-channel coverage grid behind the scratch effect.
//!
//! A [`CoverageBuffer`] holds one byte per pixel in row-major order
//! (`y * width + x`). `0` means the pixel is still covered; any non-zero
//! value means some paint has reached it.
//!
//! Pixels are stored as [`AtomicU8`] so a writer (the pointer path) and a
//! reader on another thread (ratio query, mask export) can share the buffer
//! through an `Arc` without locking. A reader sees every pixel either before
//! or after a write, never a torn value.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use image::{GrayImage, Luma};

use crate::error::Error;
use crate::ratio::reveal_ratio;

/// Value written for a fully scratched pixel.
pub const REVEALED: u8 = u8::MAX;

pub struct CoverageBuffer {
    data: Box<[AtomicU8]>,
    width: u32,
    height: u32,
}

impl CoverageBuffer {
    /// Allocates a fully covered `width x height` grid.
    pub fn new(width: u32, height: u32) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let len = (width as usize) * (height as usize);
        let data = (0..len).map(|_| AtomicU8::new(0)).collect();
        Ok(Self { data, width, height })
    }

    /// Starts from a caller-supplied mask instead of an all-covered grid.
    pub fn from_seed(seed: &GrayImage) -> Result<Self, Error> {
        let (width, height) = seed.dimensions();
        let buffer = Self::new(width, height)?;
        for (slot, px) in buffer.data.iter().zip(seed.pixels()) {
            slot.store(px.0[0], Ordering::Relaxed);
        }
        Ok(buffer)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the grid.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> Error {
        Error::OutOfBounds { x, y, width: self.width, height: self.height }
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Result<u8, Error> {
        let i = self.index_of(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        Ok(self.data[i].load(Ordering::Relaxed))
    }

    /// Raises the pixel at `(x, y)` to `value`.
    ///
    /// A pixel never goes back toward covered: writing a value lower than
    /// the current one leaves the pixel unchanged.
    pub fn set_pixel(&self, x: u32, y: u32, value: u8) -> Result<(), Error> {
        let i = self.index_of(x, y).ok_or_else(|| self.out_of_bounds(x, y))?;
        self.raise(i, value);
        Ok(())
    }

    /// Marks columns `xs` of row `y` as revealed. Caller clips to the grid.
    pub(crate) fn reveal_run(&self, y: u32, xs: Range<u32>) {
        debug_assert!(y < self.height && xs.end <= self.width);
        let row = (y as usize) * (self.width as usize);
        for i in row + xs.start as usize..row + xs.end as usize {
            self.raise(i, REVEALED);
        }
    }

    // Every write lands here.
    #[inline]
    fn raise(&self, i: usize, value: u8) {
        self.data[i].fetch_max(value, Ordering::Relaxed);
    }

    /// Count of pixels with any paint on them.
    pub fn revealed_count(&self) -> usize {
        self.data
            .iter()
            .filter(|px| px.load(Ordering::Relaxed) != 0)
            .count()
    }

    /// Row-major copy of the current bytes.
    pub fn snapshot(&self) -> Vec<u8> {
        self.data.iter().map(|px| px.load(Ordering::Relaxed)).collect()
    }

    /// Grayscale image of the current state, usable as an alpha mask.
    pub fn export_mask(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let i = (y as usize) * (self.width as usize) + (x as usize);
            Luma([self.data[i].load(Ordering::Relaxed)])
        })
    }
}

/// Read-only view of a buffer owned by a [`PointerPath`](crate::PointerPath).
///
/// Cheap to clone and `Send + Sync`, so a render thread can query the ratio or
/// export the mask while strokes are still being drawn. It has no way to
/// write; the owning path stays the only writer.
///
/// ```compile_fail
/// use scratch_card::{PointerPath, ScratchConfig};
///
/// let card = PointerPath::new(ScratchConfig::new(10, 10, 2.0)).unwrap();
/// card.reader().set_pixel(3, 3, 255).unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct CoverageReader(Arc<CoverageBuffer>);

impl CoverageReader {
    pub(crate) fn new(buffer: CoverageBuffer) -> Self {
        Self(Arc::new(buffer))
    }

    /// The writable buffer, for the path's rasterizer only.
    pub(crate) fn writer(&self) -> &CoverageBuffer {
        &self.0
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Result<u8, Error> {
        self.0.pixel_at(x, y)
    }

    pub fn revealed_count(&self) -> usize {
        self.0.revealed_count()
    }

    pub fn snapshot(&self) -> Vec<u8> {
        self.0.snapshot()
    }

    pub fn export_mask(&self) -> GrayImage {
        self.0.export_mask()
    }

    pub fn reveal_ratio(&self) -> Result<f64, Error> {
        reveal_ratio(&self.0)
    }
}

impl std::fmt::Debug for CoverageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoverageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("revealed", &self.revealed_count())
            .finish()
    }
}
