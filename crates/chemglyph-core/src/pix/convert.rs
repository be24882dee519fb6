//! Pixel depth conversion functions
//!
//! Conversion between ink masks and grayscale, used by glyph
//! normalization: a mask is expanded to gray before resizing and the
//! resized gray raster is thresholded back into a mask.

use super::{Pix, PixelDepth};
use crate::error::{Error, Result};

impl Pix {
    /// Convert a 1 bpp mask to 8 bpp.
    ///
    /// Background pixels get `val0`, ink pixels get `val1`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 1 bpp.
    pub fn convert_1_to_8(&self, val0: u8, val1: u8) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit1 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        let (w, h) = (self.width(), self.height());
        let mut out = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
        for y in 0..h {
            for x in 0..w {
                let v = if self.get_pixel_unchecked(x, y) != 0 {
                    val1
                } else {
                    val0
                };
                out.set_pixel_unchecked(x, y, v as u32);
            }
        }
        Ok(out.into())
    }

    /// Render a mask as gray with black ink on a white background.
    pub fn to_gray_ink(&self) -> Result<Pix> {
        self.convert_1_to_8(255, 0)
    }

    /// Threshold an 8 bpp image into a 1 bpp mask.
    ///
    /// Pixels with value `<= thresh` become ink (1). A 1 bpp input is
    /// returned unchanged (shared).
    pub fn threshold_to_binary(&self, thresh: u8) -> Result<Pix> {
        if self.depth() == PixelDepth::Bit1 {
            return Ok(self.clone());
        }
        let (w, h) = (self.width(), self.height());
        let mut out = Pix::new(w, h, PixelDepth::Bit1)?.to_mut();
        for y in 0..h {
            for x in 0..w {
                if self.get_pixel_unchecked(x, y) <= thresh as u32 {
                    out.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_1_to_8() {
        let mut pm = Pix::new(3, 1, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(1, 0, 1).unwrap();
        let gray = Pix::from(pm).to_gray_ink().unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(0, 0), Some(255));
        assert_eq!(gray.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_convert_1_to_8_rejects_gray() {
        let pix = Pix::new(3, 1, PixelDepth::Bit8).unwrap();
        assert!(pix.convert_1_to_8(0, 255).is_err());
    }

    #[test]
    fn test_threshold_to_binary() {
        let mut pm = Pix::new(3, 1, PixelDepth::Bit8).unwrap().to_mut();
        pm.set_pixel(0, 0, 100).unwrap();
        pm.set_pixel(1, 0, 190).unwrap();
        pm.set_pixel(2, 0, 191).unwrap();
        let mask = Pix::from(pm).threshold_to_binary(190).unwrap();
        assert_eq!(mask.get_pixel(0, 0), Some(1));
        assert_eq!(mask.get_pixel(1, 0), Some(1));
        assert_eq!(mask.get_pixel(2, 0), Some(0));
    }

    #[test]
    fn test_threshold_mask_is_shared() {
        let pix = Pix::new(3, 1, PixelDepth::Bit1).unwrap();
        let out = pix.threshold_to_binary(128).unwrap();
        assert_eq!(pix.data().as_ptr(), out.data().as_ptr());
    }
}
