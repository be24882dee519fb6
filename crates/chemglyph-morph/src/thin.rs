//! Connectivity-preserving thinning
//!
//! Thinning reduces a 1 bpp mask to a 1-pixel wide skeleton while keeping
//! 8-connected strokes connected.
//!
//! # Algorithm
//!
//! Each iteration runs two sub-passes. Both look at the eight neighbors
//! `P2..P9` of an ink pixel, clockwise from north. A pixel is removed when
//! it has between 2 and 6 ink neighbors, exactly one background-to-ink
//! transition around the ring, and it lies on the south-east boundary
//! (first pass) or the north-west boundary (second pass). Removals within
//! a pass are simultaneous. Iteration stops when a full iteration removes
//! nothing.

use crate::{MorphError, MorphResult};
use chemglyph_core::{Pix, PixelDepth};

/// Clockwise neighbor offsets starting north (`P2..P9`).
pub(crate) const RING: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Unpacked mask with background outside the bounds.
pub(crate) struct Grid {
    pub(crate) width: i32,
    pub(crate) height: i32,
    cells: Vec<bool>,
}

impl Grid {
    pub(crate) fn from_pix(pix: &Pix) -> MorphResult<Self> {
        if pix.depth() != PixelDepth::Bit1 {
            return Err(MorphError::UnsupportedDepth {
                expected: "1 bpp",
                actual: pix.depth().bits(),
            });
        }
        let (width, height) = (pix.width() as i32, pix.height() as i32);
        let mut cells = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                cells.push(pix.is_ink(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub(crate) fn get(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && self.cells[(y * self.width + x) as usize]
    }

    fn clear(&mut self, x: i32, y: i32) {
        self.cells[(y * self.width + x) as usize] = false;
    }

    pub(crate) fn neighbors(&self, x: i32, y: i32) -> [bool; 8] {
        RING.map(|(dx, dy)| self.get(x + dx, y + dy))
    }

    fn to_pix(&self) -> MorphResult<Pix> {
        let mut out = Pix::new(self.width as u32, self.height as u32, PixelDepth::Bit1)?.to_mut();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    out.set_pixel_unchecked(x as u32, y as u32, 1);
                }
            }
        }
        Ok(out.into())
    }
}

fn removable(p: &[bool; 8], first_pass: bool) -> bool {
    let count = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&count) {
        return false;
    }
    let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
    if transitions != 1 {
        return false;
    }
    // p[0] = north, p[2] = east, p[4] = south, p[6] = west
    let (n, e, s, w) = (p[0], p[2], p[4], p[6]);
    if first_pass {
        !(n && e && s) && !(e && s && w)
    } else {
        !(n && e && w) && !(n && s && w)
    }
}

fn thin_pass(grid: &mut Grid, first_pass: bool) -> usize {
    let mut doomed = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if grid.get(x, y) && removable(&grid.neighbors(x, y), first_pass) {
                doomed.push((x, y));
            }
        }
    }
    for &(x, y) in &doomed {
        grid.clear(x, y);
    }
    doomed.len()
}

/// Thin a 1 bpp mask to a skeleton, iterating until convergence.
pub fn thin(pix: &Pix) -> MorphResult<Pix> {
    thin_connected(pix, 0)
}

/// Thin a 1 bpp mask while preserving 8-connectivity
///
/// # Arguments
///
/// * `pix` - 1 bpp mask
/// * `max_iters` - Maximum number of iterations (0 = until convergence)
pub fn thin_connected(pix: &Pix, max_iters: u32) -> MorphResult<Pix> {
    let mut grid = Grid::from_pix(pix)?;
    let mut iter = 0;
    loop {
        iter += 1;
        let removed = thin_pass(&mut grid, true) + thin_pass(&mut grid, false);
        if removed == 0 || (max_iters > 0 && iter >= max_iters) {
            break;
        }
    }
    grid.to_pix()
}
