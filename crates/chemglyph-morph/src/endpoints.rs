//! Skeleton endpoints
//!
//! An endpoint is a skeleton pixel with exactly one 8-connected ink
//! neighbor. Straight strokes have two, a plus sign four and a closed ring
//! none.

use crate::MorphResult;
use crate::thin::{Grid, thin};
use chemglyph_core::Pix;

/// Endpoints of an already thinned 1 bpp skeleton, in row-major order.
pub fn find_endpoints(skeleton: &Pix) -> MorphResult<Vec<(u32, u32)>> {
    let grid = Grid::from_pix(skeleton)?;
    let mut out = Vec::new();
    for y in 0..grid.height {
        for x in 0..grid.width {
            if !grid.get(x, y) {
                continue;
            }
            let n = grid.neighbors(x, y).iter().filter(|&&v| v).count();
            if n == 1 {
                out.push((x as u32, y as u32));
            }
        }
    }
    Ok(out)
}

/// Thin a 1 bpp mask and count the endpoints of its skeleton.
pub fn count_endpoints(pix: &Pix) -> MorphResult<usize> {
    let skeleton = thin(pix)?;
    Ok(find_endpoints(&skeleton)?.len())
}
