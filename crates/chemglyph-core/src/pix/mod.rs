//! PIX - The raster container
//!
//! The `Pix` structure is the fundamental raster type of the workspace.
//! Glyph segments, normalized glyphs and template samples are all `Pix`.
//!
//! # Pixel layout
//!
//! - Image data is stored in 32-bit words
//! - Every row starts on a 32-bit boundary
//! - Pixels are packed MSB to LSB within each word
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership), so segments can be
//! handed to several labels or recognition calls without copying pixels.
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod clip;
mod convert;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit ink mask (1 = ink)
    Bit1 = 1,
    /// 8-bit grayscale (0 = black)
    Bit8 = 8,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 1 or 8.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        (1u32 << self.bits()) - 1
    }
}

#[derive(Debug, Clone)]
struct PixData {
    width: u32,
    height: u32,
    depth: PixelDepth,
    wpl: u32,
    data: Vec<u32>,
}

/// Main raster container
///
/// # Examples
///
/// ```
/// use chemglyph_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(24, 32, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 24);
/// assert_eq!(pix.height(), 32);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero, which is background for a
    /// 1 bpp mask and black for an 8 bpp raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth);
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                data,
            }),
        })
    }

    /// Words per line for a given width and depth.
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
        (width * depth.bits()).div_ceil(32)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the number of 32-bit words per row.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Raw packed image data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Packed data of a single row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let wpl = self.inner.wpl as usize;
        let start = y as usize * wpl;
        &self.inner.data[start..start + wpl]
    }

    /// Number of `Pix` handles sharing this data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two images have the same width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Allows modification of image data. Convert back to an immutable
/// [`Pix`] using `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the number of 32-bit words per row.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Mutable packed data of a single row.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let wpl = self.inner.wpl as usize;
        let start = y as usize * wpl;
        &mut self.inner.data[start..start + wpl]
    }

    /// Set every pixel to zero.
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set every pixel to the maximum value for the depth.
    ///
    /// Pad bits at the end of each row are set too; readers mask them out.
    pub fn set_all(&mut self) {
        self.inner.data.fill(u32::MAX);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
