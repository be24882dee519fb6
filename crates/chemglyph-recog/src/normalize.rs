//! Glyph normalization
//!
//! Templates and probe glyphs go through the same steps: threshold to an
//! ink mask, crop to the ink, record the aspect ratio, resize to the
//! canonical square through gray and threshold again.

use crate::{RecogResult, RecognitionSettings};
use chemglyph_core::{Pix, PixelDepth};
use chemglyph_transform::scale_to_size;

/// A glyph resized to the canonical square
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGlyph {
    size: usize,
    ink: Vec<bool>,
    ratio: f64,
}

impl NormalizedGlyph {
    /// Side of the square
    pub fn size(&self) -> usize {
        self.size
    }

    /// Width to height ratio of the cropped glyph before resizing
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Check whether (`x`, `y`) is ink
    #[inline]
    pub fn is_ink(&self, x: usize, y: usize) -> bool {
        self.ink[y * self.size + x]
    }

    /// Check whether a signed coordinate is inside the square and ink
    #[inline]
    pub(crate) fn is_ink_at(&self, x: i32, y: i32) -> Option<bool> {
        let n = self.size as i32;
        (x >= 0 && y >= 0 && x < n && y < n).then(|| self.is_ink(x as usize, y as usize))
    }

    /// Number of ink pixels
    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&v| v).count()
    }

    /// Square glyph straight from an ink predicate, skipping the resize
    #[cfg(test)]
    pub(crate) fn from_fn(size: usize, ink: impl Fn(i32, i32) -> bool) -> Self {
        let ink = (0..size * size)
            .map(|i| ink((i % size) as i32, (i / size) as i32))
            .collect();
        Self {
            size,
            ink,
            ratio: 1.0,
        }
    }
}

/// Normalize a glyph raster.
///
/// 8 bpp input is thresholded with `binarization_threshold`; 1 bpp input is
/// used as is. Returns `None` when the raster has no ink.
pub fn normalize(pix: &Pix, settings: &RecognitionSettings) -> RecogResult<Option<NormalizedGlyph>> {
    let thresh = settings.binarization_threshold;
    let mask = match pix.depth() {
        PixelDepth::Bit1 => pix.clone(),
        PixelDepth::Bit8 => pix.threshold_to_binary(thresh)?,
    };
    let Some((cropped, bbox)) = mask.clip_to_foreground()? else {
        return Ok(None);
    };
    let ratio = bbox.w as f64 / bbox.h as f64;

    let size = settings.canonical_size;
    let resized = scale_to_size(&cropped.to_gray_ink()?, size, size)?.threshold_to_binary(thresh)?;

    let size = size as usize;
    let mut ink = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            ink.push(resized.is_ink(x as i32, y as i32));
        }
    }
    Ok(Some(NormalizedGlyph { size, ink, ratio }))
}
