//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//!
//! # Pixel packing
//!
//! Pixels are packed MSB-to-LSB within each 32-bit word. For example,
//! in a 1-bit image, pixel 0 occupies bit 31 (MSB) of the first word,
//! and in an 8-bit image pixel 0 occupies bits 24..32.

use super::{Pix, PixMut, PixelDepth};
use crate::error::{Error, Result};

#[inline]
fn read(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => get_data_bit(line, x),
        PixelDepth::Bit8 => get_data_byte(line, x),
    }
}

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`; `x >= width` reads pad bits or panics.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read(self.row_data(y), x, self.depth())
    }

    /// Check whether (x, y) is an ink pixel of a 1 bpp mask.
    ///
    /// Out-of-bounds coordinates are background. For 8 bpp rasters any
    /// non-white value counts as ink.
    #[inline]
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match (self.depth(), self.get_pixel(x as u32, y as u32)) {
            (PixelDepth::Bit1, Some(v)) => v != 0,
            (PixelDepth::Bit8, Some(v)) => v < 255,
            (_, None) => false,
        }
    }

    /// Count the ink pixels of a 1 bpp mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for 8 bpp images.
    pub fn count_pixels(&self) -> Result<u64> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let w = self.width();
        let full_words = (w / 32) as usize;
        let leftover = w % 32;
        let end_mask = if leftover == 0 {
            0
        } else {
            !0u32 << (32 - leftover)
        };

        let mut count = 0u64;
        for y in 0..self.height() {
            let row = self.row_data(y);
            count += row[..full_words]
                .iter()
                .map(|word| word.count_ones() as u64)
                .sum::<u64>();
            if leftover != 0 {
                count += (row[full_words] & end_mask).count_ones() as u64;
            }
        }
        Ok(count)
    }

    /// Iterate over the coordinates of all ink pixels in row-major order.
    pub fn ink_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let (w, h) = (self.width(), self.height());
        (0..h).flat_map(move |y| {
            (0..w)
                .filter(move |&x| self.is_ink(x as i32, y as i32))
                .map(move |x| (x, y))
        })
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let wpl = self.wpl() as usize;
        let start = y as usize * wpl;
        Some(read(&self.inner.data[start..start + wpl], x, self.depth()))
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// Values wider than the depth are truncated.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        let line = self.row_data_mut(y);
        match depth {
            PixelDepth::Bit1 => set_data_bit(line, x, val),
            PixelDepth::Bit8 => set_data_byte(line, x, val),
        }
    }
}

/// Get a 1-bit pixel value.
#[inline]
pub fn get_data_bit(line: &[u32], x: u32) -> u32 {
    (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1
}

/// Set a 1-bit pixel value.
#[inline]
pub fn set_data_bit(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 5) as usize];
    let mask = 1u32 << (31 - (x & 31));
    if val & 1 != 0 {
        *word |= mask;
    } else {
        *word &= !mask;
    }
}

/// Get an 8-bit pixel value.
#[inline]
pub fn get_data_byte(line: &[u32], x: u32) -> u32 {
    (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff
}

/// Set an 8-bit pixel value.
#[inline]
pub fn set_data_byte(line: &mut [u32], x: u32, val: u32) {
    let word = &mut line[(x >> 2) as usize];
    let shift = 8 * (3 - (x & 3));
    *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
}
