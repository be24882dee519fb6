//! Rectangle clipping operations for images
//!
//! Extraction of rectangular sub-regions and cropping of an ink mask to
//! the bounding box of its ink.

use super::{Pix, PixelDepth};
use crate::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract a rectangular sub-region from the image.
    ///
    /// The rectangle is clipped to the image bounds. Returns an error if
    /// the requested size is zero or the rectangle lies entirely outside.
    ///
    /// # Examples
    ///
    /// ```
    /// use chemglyph_core::{Pix, PixelDepth};
    ///
    /// let pix = Pix::new(100, 80, PixelDepth::Bit8).unwrap();
    /// let clipped = pix.clip_rectangle(80, 60, 50, 50).unwrap();
    /// assert_eq!(clipped.width(), 20);
    /// assert_eq!(clipped.height(), 20);
    /// ```
    pub fn clip_rectangle(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Pix> {
        if w == 0 || h == 0 {
            return Err(Error::InvalidDimension {
                width: w,
                height: h,
            });
        }
        if x >= self.width() || y >= self.height() {
            return Err(Error::InvalidParameter(format!(
                "rectangle origin ({x}, {y}) outside {}x{} image",
                self.width(),
                self.height()
            )));
        }

        let cw = w.min(self.width() - x);
        let ch = h.min(self.height() - y);
        let mut out = Pix::new(cw, ch, self.depth())?.to_mut();
        for dy in 0..ch {
            for dx in 0..cw {
                let v = self.get_pixel_unchecked(x + dx, y + dy);
                if v != 0 {
                    out.set_pixel_unchecked(dx, dy, v);
                }
            }
        }
        Ok(out.into())
    }

    /// Bounding box of the ink pixels of a 1 bpp mask.
    ///
    /// Returns `None` if the mask contains no ink.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 1 bpp.
    pub fn foreground_bounds(&self) -> Result<Option<Box>> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let (w, h) = (self.width(), self.height());
        let mut min = (w, h);
        let mut max = (0u32, 0u32);
        let mut found = false;

        for y in 0..h {
            let row = self.row_data(y);
            if row.iter().all(|&word| word == 0) {
                continue;
            }
            for x in 0..w {
                if super::get_data_bit(row, x) != 0 {
                    found = true;
                    min.0 = min.0.min(x);
                    min.1 = min.1.min(y);
                    max.0 = max.0.max(x);
                    max.1 = max.1.max(y);
                }
            }
        }

        if !found {
            return Ok(None);
        }
        Ok(Some(Box::new_unchecked(
            min.0 as i32,
            min.1 as i32,
            (max.0 - min.0 + 1) as i32,
            (max.1 - min.1 + 1) as i32,
        )))
    }

    /// Clip the image to the bounding box of its ink pixels.
    ///
    /// Only works on 1 bpp images. Returns `None` if no ink is found.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is not 1 bpp.
    pub fn clip_to_foreground(&self) -> Result<Option<(Pix, Box)>> {
        let Some(bbox) = self.foreground_bounds()? else {
            return Ok(None);
        };
        let clipped =
            self.clip_rectangle(bbox.x as u32, bbox.y as u32, bbox.w as u32, bbox.h as u32)?;
        Ok(Some((clipped, bbox)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_with(w: u32, h: u32, ink: &[(u32, u32)]) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for &(x, y) in ink {
            pm.set_pixel(x, y, 1).unwrap();
        }
        pm.into()
    }

    #[test]
    fn test_clip_rectangle_copies_pixels() {
        let pix = mask_with(10, 10, &[(4, 5), (6, 7)]);
        let clipped = pix.clip_rectangle(4, 5, 3, 3).unwrap();
        assert_eq!(clipped.get_pixel(0, 0), Some(1));
        assert_eq!(clipped.get_pixel(2, 2), Some(1));
        assert_eq!(clipped.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_clip_rectangle_outside() {
        let pix = mask_with(10, 10, &[]);
        assert!(pix.clip_rectangle(10, 0, 2, 2).is_err());
        assert!(pix.clip_rectangle(0, 0, 0, 2).is_err());
    }

    #[test]
    fn test_clip_to_foreground() {
        let pix = mask_with(40, 20, &[(3, 4), (35, 9), (10, 15)]);
        let (clipped, bbox) = pix.clip_to_foreground().unwrap().unwrap();
        assert_eq!(bbox, Box::new_unchecked(3, 4, 33, 12));
        assert_eq!(clipped.width(), 33);
        assert_eq!(clipped.height(), 12);
        assert_eq!(clipped.get_pixel(0, 0), Some(1));
        assert_eq!(clipped.get_pixel(32, 5), Some(1));
    }

    #[test]
    fn test_clip_to_foreground_empty() {
        let pix = mask_with(8, 8, &[]);
        assert!(pix.clip_to_foreground().unwrap().is_none());
    }

    #[test]
    fn test_clip_to_foreground_requires_mask() {
        let pix = Pix::new(8, 8, PixelDepth::Bit8).unwrap();
        assert!(pix.clip_to_foreground().is_err());
    }
}
