//! Image scaling operations
//!
//! Provides the scaling algorithms used to bring glyph rasters to the
//! canonical matching size:
//! - Linear interpolation (for upscaling)
//! - Sampling (nearest neighbor)
//! - Area mapping (for downscaling with anti-aliasing)
//!
//! Linear and area-map scaling work on 8 bpp gray rasters. Sampling works
//! on both depths.

use crate::{TransformError, TransformResult};
use chemglyph_core::{Pix, PixelDepth};

/// Below this factor `Auto` switches from linear interpolation to area
/// mapping.
const AUTO_AREA_MAP_BELOW: f32 = 0.7;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    Sampling,
    /// Bilinear interpolation (good for upscaling)
    Linear,
    /// Area mapping (best for downscaling, anti-aliased)
    AreaMap,
    /// Automatic selection based on scale factor
    #[default]
    Auto,
}

impl ScaleMethod {
    /// Resolve `Auto` into a concrete method for the given depth and
    /// factors.
    fn resolve(self, depth: PixelDepth, scale_x: f32, scale_y: f32) -> ScaleMethod {
        match self {
            ScaleMethod::Auto if depth == PixelDepth::Bit1 => ScaleMethod::Sampling,
            ScaleMethod::Auto if scale_x.min(scale_y) < AUTO_AREA_MAP_BELOW => {
                ScaleMethod::AreaMap
            }
            ScaleMethod::Auto => ScaleMethod::Linear,
            other => other,
        }
    }
}

/// Scale an image by the given factors
///
/// # Arguments
/// * `pix` - Input image
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Scaling algorithm to use
pub fn scale(pix: &Pix, scale_x: f32, scale_y: f32, method: ScaleMethod) -> TransformResult<Pix> {
    check_factors(scale_x, scale_y)?;
    let width = ((pix.width() as f32 * scale_x).round() as u32).max(1);
    let height = ((pix.height() as f32 * scale_y).round() as u32).max(1);
    resize(pix, width, height, method)
}

/// Scale an image to a specific size using [`ScaleMethod::Auto`]
///
/// # Arguments
/// * `pix` - Input image
/// * `width` - Target width (0 to maintain aspect ratio)
/// * `height` - Target height (0 to maintain aspect ratio)
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    scale_to_size_with(pix, width, height, ScaleMethod::Auto)
}

/// Scale an image to a specific size with an explicit method
///
/// A zero `width` or `height` is derived from the other dimension so the
/// aspect ratio is kept. Both zero is an error.
pub fn scale_to_size_with(
    pix: &Pix,
    width: u32,
    height: u32,
    method: ScaleMethod,
) -> TransformResult<Pix> {
    let (w, h) = (pix.width(), pix.height());
    let (width, height) = match (width, height) {
        (0, 0) => {
            return Err(TransformError::InvalidParameters(
                "target width and height are both zero".into(),
            ));
        }
        (0, th) => ((w as f64 * th as f64 / h as f64).round().max(1.0) as u32, th),
        (tw, 0) => (tw, (h as f64 * tw as f64 / w as f64).round().max(1.0) as u32),
        dims => dims,
    };
    resize(pix, width, height, method)
}

/// Scale an image using nearest-neighbor sampling
///
/// # Arguments
/// * `pix` - Input image
/// * `scale_x` - Horizontal scale factor
/// * `scale_y` - Vertical scale factor
pub fn scale_by_sampling(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    scale(pix, scale_x, scale_y, ScaleMethod::Sampling)
}

fn check_factors(scale_x: f32, scale_y: f32) -> TransformResult<()> {
    if !(scale_x > 0.0 && scale_y > 0.0 && scale_x.is_finite() && scale_y.is_finite()) {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{scale_x} x {scale_y}"
        )));
    }
    Ok(())
}

fn resize(pix: &Pix, width: u32, height: u32, method: ScaleMethod) -> TransformResult<Pix> {
    let scale_x = width as f32 / pix.width() as f32;
    let scale_y = height as f32 / pix.height() as f32;
    let method = method.resolve(pix.depth(), scale_x, scale_y);

    if method != ScaleMethod::Sampling && pix.depth() != PixelDepth::Bit8 {
        return Err(TransformError::UnsupportedDepth(format!(
            "{:?} scaling needs 8 bpp, got {} bpp",
            method,
            pix.depth().bits()
        )));
    }
    if width == pix.width() && height == pix.height() {
        return Ok(pix.clone());
    }

    match method {
        ScaleMethod::Linear => resize_linear(pix, width, height),
        ScaleMethod::AreaMap => resize_area_map(pix, width, height),
        _ => resize_sampling(pix, width, height),
    }
}

fn resize_sampling(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let (sw, sh) = (pix.width(), pix.height());
    let mut out = Pix::new(width, height, pix.depth())?.to_mut();
    for y in 0..height {
        let sy = ((y as u64 * sh as u64 + sh as u64 / 2) / height as u64).min(sh as u64 - 1) as u32;
        for x in 0..width {
            let sx =
                ((x as u64 * sw as u64 + sw as u64 / 2) / width as u64).min(sw as u64 - 1) as u32;
            out.set_pixel_unchecked(x, y, pix.get_pixel_unchecked(sx, sy));
        }
    }
    Ok(out.into())
}

fn resize_linear(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let (sw, sh) = (pix.width(), pix.height());
    let fx = sw as f64 / width as f64;
    let fy = sh as f64 / height as f64;
    let mut out = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();

    for y in 0..height {
        let src_y = ((y as f64 + 0.5) * fy - 0.5).clamp(0.0, (sh - 1) as f64);
        let y0 = src_y.floor() as u32;
        let y1 = (y0 + 1).min(sh - 1);
        let wy = src_y - y0 as f64;
        for x in 0..width {
            let src_x = ((x as f64 + 0.5) * fx - 0.5).clamp(0.0, (sw - 1) as f64);
            let x0 = src_x.floor() as u32;
            let x1 = (x0 + 1).min(sw - 1);
            let wx = src_x - x0 as f64;

            let p = |xx, yy| pix.get_pixel_unchecked(xx, yy) as f64;
            let top = p(x0, y0) * (1.0 - wx) + p(x1, y0) * wx;
            let bottom = p(x0, y1) * (1.0 - wx) + p(x1, y1) * wx;
            let v = top * (1.0 - wy) + bottom * wy;
            out.set_pixel_unchecked(x, y, v.round().clamp(0.0, 255.0) as u32);
        }
    }
    Ok(out.into())
}

/// Source cells covered by each destination cell along one axis, with the
/// covered fraction of each.
fn coverage(src_len: u32, dst_len: u32) -> Vec<Vec<(u32, f64)>> {
    let step = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|d| {
            let start = d as f64 * step;
            let end = start + step;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);
            (first..last)
                .filter_map(|s| {
                    let w = (end.min(s as f64 + 1.0) - start.max(s as f64)).max(0.0);
                    (w > 0.0).then_some((s, w))
                })
                .collect()
        })
        .collect()
}

fn resize_area_map(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    let cols = coverage(pix.width(), width);
    let rows = coverage(pix.height(), height);
    let mut out = Pix::new(width, height, PixelDepth::Bit8)?.to_mut();

    for (y, row_cells) in rows.iter().enumerate() {
        for (x, col_cells) in cols.iter().enumerate() {
            let mut sum = 0.0;
            let mut weight = 0.0;
            for &(sy, wy) in row_cells {
                for &(sx, wx) in col_cells {
                    sum += pix.get_pixel_unchecked(sx, sy) as f64 * wx * wy;
                    weight += wx * wy;
                }
            }
            let v = if weight > 0.0 { sum / weight } else { 255.0 };
            out.set_pixel_unchecked(x as u32, y as u32, v.round().clamp(0.0, 255.0) as u32);
        }
    }
    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(w: u32, h: u32, f: impl Fn(u32, u32) -> u32) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit8).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        pm.into()
    }

    #[test]
    fn test_auto_resolution() {
        assert_eq!(
            ScaleMethod::Auto.resolve(PixelDepth::Bit8, 0.5, 1.0),
            ScaleMethod::AreaMap
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(PixelDepth::Bit8, 2.0, 0.8),
            ScaleMethod::Linear
        );
        assert_eq!(
            ScaleMethod::Auto.resolve(PixelDepth::Bit1, 0.5, 0.5),
            ScaleMethod::Sampling
        );
    }

    #[test]
    fn test_area_map_averages() {
        // 4x2 -> 2x1: each output pixel averages a 2x2 block.
        let pix = gray(4, 2, |x, _| if x < 2 { 0 } else { 200 });
        let out = scale_to_size_with(&pix, 2, 1, ScaleMethod::AreaMap).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(1, 0), Some(200));

        let half = gray(3, 1, |x, _| if x == 1 { 0 } else { 255 });
        let out = scale_to_size_with(&half, 2, 1, ScaleMethod::AreaMap).unwrap();
        // Left cell covers 1 white + 0.5 black.
        assert_eq!(out.get_pixel(0, 0), Some(170));
    }

    #[test]
    fn test_linear_upscale_is_smooth() {
        let pix = gray(2, 1, |x, _| x * 200);
        let out = scale_to_size_with(&pix, 4, 1, ScaleMethod::Linear).unwrap();
        let row: Vec<u32> = (0..4).map(|x| out.get_pixel(x, 0).unwrap()).collect();
        assert_eq!(row, vec![0, 50, 150, 200]);
    }

    #[test]
    fn test_sampling_mask() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_pixel(1, 1, 1).unwrap();
        let out = scale_by_sampling(&pm.into(), 2.0, 2.0).unwrap();
        assert_eq!(out.depth(), PixelDepth::Bit1);
        assert_eq!(out.get_pixel(3, 3), Some(1));
        assert_eq!(out.get_pixel(1, 1), Some(0));
    }

    #[test]
    fn test_linear_rejects_mask() {
        let pix = Pix::new(4, 4, PixelDepth::Bit1).unwrap();
        assert!(scale(&pix, 2.0, 2.0, ScaleMethod::Linear).is_err());
    }

    #[test]
    fn test_keep_aspect() {
        let pix = gray(40, 20, |_, _| 255);
        let out = scale_to_size(&pix, 0, 10).unwrap();
        assert_eq!((out.width(), out.height()), (20, 10));
        assert!(scale_to_size(&pix, 0, 0).is_err());
        assert!(scale(&pix, -1.0, 1.0, ScaleMethod::Auto).is_err());
    }
}
