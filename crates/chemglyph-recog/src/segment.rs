//! Glyph segments
//!
//! A [`Segment`] is one connected ink region cut out of a diagram: a 1 bpp
//! mask plus its position on the page. Segments are cheap to clone, the
//! mask is shared.

use crate::{RecogError, RecogResult};
use chemglyph_core::{Box, Pix, PixelDepth};
use chemglyph_morph::{find_endpoints, thin};

/// A glyph-sized ink region with page position
#[derive(Debug, Clone)]
pub struct Segment {
    bbox: Box,
    pix: Pix,
}

impl Segment {
    /// Place a 1 bpp mask with its top-left corner at (`x`, `y`).
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::UnsupportedDepth`] if `pix` is not 1 bpp.
    pub fn new(x: i32, y: i32, pix: Pix) -> RecogResult<Self> {
        if pix.depth() != PixelDepth::Bit1 {
            return Err(RecogError::UnsupportedDepth {
                expected: "1 bpp",
                actual: pix.depth().bits(),
            });
        }
        let bbox = Box::new_unchecked(x, y, pix.width() as i32, pix.height() as i32);
        Ok(Self { bbox, pix })
    }

    /// Left edge on the page
    #[inline]
    pub fn x(&self) -> i32 {
        self.bbox.x
    }

    /// Top edge on the page
    #[inline]
    pub fn y(&self) -> i32 {
        self.bbox.y
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> i32 {
        self.bbox.w
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> i32 {
        self.bbox.h
    }

    /// Bounding box on the page
    #[inline]
    pub fn bbox(&self) -> Box {
        self.bbox
    }

    /// The ink mask
    pub fn pix(&self) -> &Pix {
        &self.pix
    }

    /// Page position of the box center
    pub fn center(&self) -> (f64, f64) {
        self.bbox.center()
    }

    /// Width to height ratio
    pub fn ratio(&self) -> f64 {
        self.width() as f64 / self.height() as f64
    }

    /// Check whether the local coordinate (`x`, `y`) is ink.
    #[inline]
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        self.pix.is_ink(x, y)
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> RecogResult<u64> {
        Ok(self.pix.count_pixels()?)
    }

    /// Stroke endpoints in page coordinates.
    ///
    /// The mask is thinned to a skeleton first; an endpoint is a skeleton
    /// pixel with a single neighbor.
    pub fn endpoints(&self) -> RecogResult<Vec<(i32, i32)>> {
        let skeleton = thin(&self.pix)?;
        Ok(find_endpoints(&skeleton)?
            .into_iter()
            .map(|(x, y)| (self.x() + x as i32, self.y() + y as i32))
            .collect())
    }
}
