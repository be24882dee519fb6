//! Synthetic glyph fixtures
//!
//! A 5×7 bitmap font covering the uppercase letters, digits and a few
//! formula signs. Rendered glyphs are 1 bpp ink masks, scaled by an integer
//! factor, so recognition suites can build templates and probe segments
//! without fixture files.

use crate::error::{TestError, TestResult};
use chemglyph_core::{Pix, PixelDepth};

/// Glyph cell width in font units
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph cell height in font units
pub const GLYPH_HEIGHT: u32 = 7;

type Rows = [&'static str; GLYPH_HEIGHT as usize];

#[rustfmt::skip]
const FONT: &[(char, Rows)] = &[
    ('A', [".###.", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('B', ["####.", "#...#", "#...#", "####.", "#...#", "#...#", "####."]),
    ('C', [".###.", "#...#", "#....", "#....", "#....", "#...#", ".###."]),
    ('D', ["###..", "#..#.", "#...#", "#...#", "#...#", "#..#.", "###.."]),
    ('E', ["#####", "#....", "#....", "####.", "#....", "#....", "#####"]),
    ('F', ["#####", "#....", "#....", "####.", "#....", "#....", "#...."]),
    ('G', [".###.", "#...#", "#....", "#.###", "#...#", "#...#", ".####"]),
    ('H', ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"]),
    ('I', [".###.", "..#..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('J', ["..###", "...#.", "...#.", "...#.", "...#.", "#..#.", ".##.."]),
    ('K', ["#...#", "#..#.", "#.#..", "##...", "#.#..", "#..#.", "#...#"]),
    ('L', ["#....", "#....", "#....", "#....", "#....", "#....", "#####"]),
    ('M', ["#...#", "##.##", "#.#.#", "#.#.#", "#...#", "#...#", "#...#"]),
    ('N', ["#...#", "#...#", "##..#", "#.#.#", "#..##", "#...#", "#...#"]),
    ('O', [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('P', ["####.", "#...#", "#...#", "####.", "#....", "#....", "#...."]),
    ('Q', [".###.", "#...#", "#...#", "#...#", "#.#.#", "#..#.", ".##.#"]),
    ('R', ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"]),
    ('S', [".####", "#....", "#....", ".###.", "....#", "....#", "####."]),
    ('T', ["#####", "..#..", "..#..", "..#..", "..#..", "..#..", "..#.."]),
    ('U', ["#...#", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."]),
    ('V', ["#...#", "#...#", "#...#", "#...#", "#...#", ".#.#.", "..#.."]),
    ('W', ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "#.#.#", ".#.#."]),
    ('X', ["#...#", "#...#", ".#.#.", "..#..", ".#.#.", "#...#", "#...#"]),
    ('Y', ["#...#", "#...#", ".#.#.", "..#..", "..#..", "..#..", "..#.."]),
    ('Z', ["#####", "....#", "...#.", "..#..", ".#...", "#....", "#####"]),
    ('0', [".###.", "#...#", "#..##", "#.#.#", "##..#", "#...#", ".###."]),
    ('1', ["..#..", ".##..", "..#..", "..#..", "..#..", "..#..", ".###."]),
    ('2', [".###.", "#...#", "....#", "...#.", "..#..", ".#...", "#####"]),
    ('3', ["#####", "...#.", "..#..", "...#.", "....#", "#...#", ".###."]),
    ('4', ["...#.", "..##.", ".#.#.", "#..#.", "#####", "...#.", "...#."]),
    ('5', ["#####", "#....", "####.", "....#", "....#", "#...#", ".###."]),
    ('6', ["..##.", ".#...", "#....", "####.", "#...#", "#...#", ".###."]),
    ('7', ["#####", "....#", "...#.", "..#..", ".#...", ".#...", ".#..."]),
    ('8', [".###.", "#...#", "#...#", ".###.", "#...#", "#...#", ".###."]),
    ('9', [".###.", "#...#", "#...#", ".####", "....#", "...#.", ".##.."]),
    ('+', [".....", "..#..", "..#..", "#####", "..#..", "..#..", "....."]),
    ('-', [".....", ".....", ".....", "#####", ".....", ".....", "....."]),
    ('=', [".....", ".....", "#####", ".....", "#####", ".....", "....."]),
    ('(', ["...#.", "..#..", ".#...", ".#...", ".#...", "..#..", "...#."]),
    (')', [".#...", "..#..", "...#.", "...#.", "...#.", "..#..", ".#..."]),
];

/// Rows of the 5×7 bitmap for `ch`, `#` marking ink.
///
/// # Errors
///
/// Returns [`TestError::UnknownGlyph`] if the font has no such glyph.
pub fn glyph_rows(ch: char) -> TestResult<&'static Rows> {
    FONT.iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, rows)| rows)
        .ok_or(TestError::UnknownGlyph(ch))
}

/// Render `ch` as a 1 bpp mask, each font cell becoming `scale`×`scale`
/// pixels.
///
/// The raster covers the full glyph cell, so signs such as `-` keep their
/// blank rows.
pub fn render_glyph(ch: char, scale: u32) -> TestResult<Pix> {
    if scale == 0 {
        return Err(TestError::InvalidSize("scale must be positive".into()));
    }
    let rows = glyph_rows(ch)?;
    let mut pm = Pix::new(GLYPH_WIDTH * scale, GLYPH_HEIGHT * scale, PixelDepth::Bit1)?.to_mut();
    for (fy, row) in rows.iter().enumerate() {
        for (fx, cell) in row.bytes().enumerate() {
            if cell != b'#' {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    pm.set_pixel(fx as u32 * scale + dx, fy as u32 * scale + dy, 1)?;
                }
            }
        }
    }
    Ok(pm.into())
}

/// A fully inked `w`×`h` mask.
pub fn filled_rect(w: u32, h: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(w, h, PixelDepth::Bit1)?.to_mut();
    pm.set_all();
    Ok(pm.into())
}

/// A filled ellipse inscribed in a `w`×`h` mask.
pub fn blob(w: u32, h: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(w, h, PixelDepth::Bit1)?.to_mut();
    let (rx, ry) = (w as f64 / 2.0, h as f64 / 2.0);
    for y in 0..h {
        for x in 0..w {
            let nx = (x as f64 + 0.5 - rx) / rx;
            let ny = (y as f64 + 0.5 - ry) / ry;
            if nx * nx + ny * ny <= 1.0 {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(pm.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_rows_are_well_formed() {
        for (ch, rows) in FONT {
            for row in rows {
                assert_eq!(row.len(), GLYPH_WIDTH as usize, "glyph {ch:?}");
            }
        }
    }

    #[test]
    fn test_render_glyph() {
        let pix = render_glyph('H', 3).unwrap();
        assert_eq!((pix.width(), pix.height()), (15, 21));
        assert_eq!(pix.get_pixel(0, 0), Some(1));
        assert_eq!(pix.get_pixel(5, 0), Some(0));
        assert_eq!(pix.get_pixel(7, 10), Some(1));
    }

    #[test]
    fn test_unknown_glyph() {
        assert!(matches!(render_glyph('~', 2), Err(TestError::UnknownGlyph('~'))));
    }

    #[test]
    fn test_blob_and_rect() {
        let b = blob(20, 10).unwrap();
        assert_eq!(b.get_pixel(10, 5), Some(1));
        assert_eq!(b.get_pixel(0, 0), Some(0));
        assert_eq!(filled_rect(3, 2).unwrap().count_pixels().unwrap(), 6);
    }
}
