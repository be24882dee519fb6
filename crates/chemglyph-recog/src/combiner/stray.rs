//! Pulling stray glyphs from another layer into the symbol layer
//!
//! Segmentation sometimes files small text pieces (charge signs, subscript
//! digits, lowercase letters) with the graphics. A stray is moved over
//! when it is not too tall, does not look like a plain stroke, and sits
//! next to an existing symbol in a superscript, lowercase or subscript
//! position.

use crate::{RecogResult, RecognitionSettings, Segment};
use tracing::trace;

/// Orientation of a stroke-shaped segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Horizontal,
    Vertical,
    Diagonal,
}

/// Principal axis elongation at which ink counts as a stroke.
const LINE_ELONGATION: f64 = 4.0;
/// Degrees from an axis still counted as axis-parallel.
const AXIS_TOLERANCE: f64 = 15.0;

/// Classify a segment as a straight stroke from its second moments.
pub(crate) fn classify_line(segment: &Segment) -> Option<LineKind> {
    let points: Vec<(f64, f64)> = segment
        .pix()
        .ink_pixels()
        .map(|(x, y)| (x as f64, y as f64))
        .collect();
    if points.len() < 2 {
        return None;
    }

    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut mu20, mut mu02, mut mu11) = (0.0, 0.0, 0.0);
    for &(x, y) in &points {
        mu20 += (x - mx) * (x - mx);
        mu02 += (y - my) * (y - my);
        mu11 += (x - mx) * (y - my);
    }
    let (mu20, mu02, mu11) = (mu20 / n, mu02 / n, mu11 / n);

    let half_trace = (mu20 + mu02) / 2.0;
    let spread = (((mu20 - mu02) / 2.0).powi(2) + mu11 * mu11).sqrt();
    let (major, minor) = (half_trace + spread, half_trace - spread);
    if major <= 0.0 {
        return None;
    }
    if minor > f64::EPSILON && (major / minor).sqrt() < LINE_ELONGATION {
        return None;
    }

    let angle = (0.5 * (2.0 * mu11).atan2(mu20 - mu02)).to_degrees().abs();
    Some(if angle < AXIS_TOLERANCE {
        LineKind::Horizontal
    } else if angle > 90.0 - AXIS_TOLERANCE {
        LineKind::Vertical
    } else {
        LineKind::Diagonal
    })
}

/// A horizontal stroke about as wide as a letter
fn looks_like_minus(segment: &Segment, line: Option<LineKind>, cap_height: i32) -> bool {
    let w = segment.width() as f64;
    let cap = cap_height as f64;
    line == Some(LineKind::Horizontal) && w >= 0.3 * cap && w <= 1.2 * cap
}

/// A roughly square, sparse glyph with a solid middle row and column
fn looks_like_plus(segment: &Segment) -> RecogResult<bool> {
    let (w, h) = (segment.width(), segment.height());
    let ratio = segment.ratio();
    if !(0.75..=1.33).contains(&ratio) {
        return Ok(false);
    }
    let fill = segment.ink_count()? as f64 / (w as f64 * h as f64);
    if fill >= 0.6 {
        return Ok(false);
    }
    let row = (0..w).filter(|&x| segment.is_ink(x, h / 2)).count() as f64;
    let col = (0..h).filter(|&y| segment.is_ink(w / 2, y)).count() as f64;
    Ok(row >= 0.8 * w as f64 && col >= 0.8 * h as f64)
}

/// Check whether a stray could be text at all, before looking at its
/// neighborhood.
fn is_glyph_like(
    segment: &Segment,
    cap_height: i32,
    settings: &RecognitionSettings,
) -> RecogResult<bool> {
    if segment.height() > cap_height + settings.sym_height_error {
        return Ok(false);
    }

    let Some(line) = classify_line(segment) else {
        return Ok(true);
    };
    let minus = looks_like_minus(segment, Some(line), cap_height);
    let plus = looks_like_plus(segment)?;
    if minus || plus {
        trace!(minus, plus, x = segment.x(), y = segment.y(), "sign-shaped stroke");
        return Ok(true);
    }
    if line == LineKind::Diagonal {
        return Ok(false);
    }

    let h = segment.height() as f64;
    let cap = cap_height as f64;
    let ratio = segment.ratio();
    Ok(h >= 0.45 * cap
        && h <= 1.2 * cap
        && ratio >= settings.min_sym_ratio
        && ratio <= settings.max_sym_ratio)
}

/// Check whether `stray` sits next to `symbol` at a text position.
fn is_attached(stray: &Segment, symbol: &Segment, space: f64) -> bool {
    let s = stray.bbox();
    let r = symbol.bbox();
    if s.distance(&r) > space {
        return false;
    }

    let (sy, sh) = (s.y as f64, s.h as f64);
    let (ry, rh) = (r.y as f64, r.h as f64);
    let superscript = (ry - sy - 0.5 * sh).abs().trunc();
    let lower_top = (ry + 0.5 * rh - sy).abs().trunc();
    let lower_bottom = (ry + rh - sy - sh).abs().trunc();
    let subscript = (ry + rh - sy - 0.5 * sh).abs().trunc();

    !(superscript > 1.1 * space
        && (lower_top > 0.6 * space || lower_bottom > 0.5 * space)
        && subscript > 0.5 * space)
}

/// Move glyph-like strays from `layer` into `symbols`.
///
/// Strays are visited in layer order; a moved stray can anchor later ones.
/// The relative order of the strays left behind is kept. Returns the number
/// of moved segments.
pub(crate) fn fetch_strays(
    symbols: &mut Vec<Segment>,
    layer: &mut Vec<Segment>,
    cap_height: i32,
    settings: &RecognitionSettings,
) -> RecogResult<usize> {
    let space = (cap_height as f64 * settings.line_spacing_ratio).floor();
    let mut moved = 0;
    let mut i = 0;
    while i < layer.len() {
        let stray = &layer[i];
        let fetch = is_glyph_like(stray, cap_height, settings)?
            && symbols.iter().any(|sym| is_attached(stray, sym, space));
        if fetch {
            trace!(x = stray.x(), y = stray.y(), "fetched stray symbol");
            symbols.push(layer.remove(i));
            moved += 1;
        } else {
            i += 1;
        }
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemglyph_core::{Pix, PixelDepth};

    fn mask_seg(x: i32, y: i32, w: u32, h: u32, ink: impl Fn(u32, u32) -> bool) -> Segment {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for yy in 0..h {
            for xx in 0..w {
                if ink(xx, yy) {
                    pm.set_pixel_unchecked(xx, yy, 1);
                }
            }
        }
        Segment::new(x, y, pm.into()).unwrap()
    }

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Segment {
        mask_seg(x, y, w, h, |_, _| true)
    }

    fn ring(x: i32, y: i32, w: u32, h: u32) -> Segment {
        mask_seg(x, y, w, h, move |xx, yy| xx < 2 || yy < 2 || xx + 2 >= w || yy + 2 >= h)
    }

    fn slash(x: i32, y: i32) -> Segment {
        mask_seg(x, y, 9, 16, |xx, yy| {
            let c = (15 - yy) * 7 / 15;
            xx == c || xx == c + 1
        })
    }

    fn plus(x: i32, y: i32) -> Segment {
        mask_seg(x, y, 11, 11, |xx, yy| xx == 5 || yy == 5)
    }

    #[test]
    fn test_classify_line() {
        assert_eq!(classify_line(&rect(0, 0, 12, 2)), Some(LineKind::Horizontal));
        assert_eq!(classify_line(&rect(0, 0, 2, 14)), Some(LineKind::Vertical));
        assert_eq!(classify_line(&slash(0, 0)), Some(LineKind::Diagonal));
        assert_eq!(classify_line(&ring(0, 0, 10, 12)), None);
        assert_eq!(classify_line(&plus(0, 0)), None);
    }

    #[test]
    fn test_sign_shapes() {
        assert!(looks_like_minus(&rect(0, 0, 10, 2), Some(LineKind::Horizontal), 20));
        assert!(!looks_like_minus(&rect(0, 0, 40, 2), Some(LineKind::Horizontal), 20));
        assert!(looks_like_plus(&plus(0, 0)).unwrap());
        assert!(!looks_like_plus(&rect(0, 0, 11, 11)).unwrap());
    }

    #[test]
    fn test_fetch_lowercase_and_minus() {
        let settings = RecognitionSettings::default();
        let mut symbols = vec![rect(0, 0, 14, 20)];
        let mut layer = vec![
            ring(16, 8, 10, 12),
            rect(100, 0, 10, 12),
            rect(16, 9, 10, 2),
            slash(16, 4),
            rect(16, -30, 10, 60),
        ];
        let moved = fetch_strays(&mut symbols, &mut layer, 20, &settings).unwrap();
        assert_eq!(moved, 2);
        assert_eq!(symbols.len(), 3);
        assert_eq!(symbols[1].bbox(), ring(16, 8, 10, 12).bbox());
        assert_eq!(symbols[2].bbox(), rect(16, 9, 10, 2).bbox());
        let left: Vec<i32> = layer.iter().map(|s| s.y()).collect();
        assert_eq!(left, vec![0, 4, -30]);
    }

    #[test]
    fn test_fetched_stray_anchors_next() {
        let settings = RecognitionSettings::default();
        let mut symbols = vec![rect(0, 0, 14, 20)];
        let mut layer = vec![ring(16, 8, 10, 12), ring(28, 8, 10, 12)];
        assert_eq!(fetch_strays(&mut symbols, &mut layer, 20, &settings).unwrap(), 2);
        assert!(layer.is_empty());
    }
}
