//! Box - Rectangle regions
//!
//! Bounding rectangles of glyph segments and of combined labels.

mod geometry;

use crate::error::{Error, Result};

/// A rectangle region
///
/// A simple `Copy` type since it's small and frequently copied. The right
/// and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the exact center point
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.w as f64 / 2.0,
            self.y as f64 + self.h as f64 / 2.0,
        )
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box overlaps with another
    pub fn overlaps(&self, other: &Box) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Compute the union (bounding box) of two boxes
    pub fn union(&self, other: &Box) -> Box {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());

        Box {
            x,
            y,
            w: right - x,
            h: bottom - y,
        }
    }

    /// Translate the box by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> Box {
        Box {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 30, 40).unwrap();
        assert_eq!(b.right(), 40);
        assert_eq!(b.bottom(), 60);
        assert_eq!(b.area(), 1200);
        assert!(Box::new(0, 0, -1, 5).is_err());
    }

    #[test]
    fn test_box_center() {
        let b = Box::new_unchecked(0, 0, 5, 10);
        assert_eq!(b.center(), (2.5, 5.0));
    }

    #[test]
    fn test_box_contains() {
        let b = Box::new_unchecked(0, 0, 10, 10);
        assert!(b.contains_point(0, 9));
        assert!(!b.contains_point(10, 0));
    }

    #[test]
    fn test_box_union() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(5, 8, 10, 10);
        assert_eq!(a.union(&b), Box::new_unchecked(0, 0, 15, 18));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&b.translate(20, 0)));
    }
}
