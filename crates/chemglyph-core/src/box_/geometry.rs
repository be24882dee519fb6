//! Geometric relations between boxes

use super::Box;

impl Box {
    /// Compute horizontal and vertical overlap distances between two boxes.
    ///
    /// Returns `(h_overlap, v_overlap)` where:
    /// - Positive = overlap extent
    /// - Zero = touching
    /// - Negative = gap between boxes
    pub fn overlap_distance(&self, other: &Box) -> (i32, i32) {
        let h_ovl = if other.x >= self.x {
            self.right() - other.x
        } else {
            other.right() - self.x
        };
        let v_ovl = if other.y >= self.y {
            self.bottom() - other.y
        } else {
            other.bottom() - self.y
        };
        (h_ovl, v_ovl)
    }

    /// Euclidean distance between the closest points of two boxes.
    ///
    /// Zero when the boxes overlap or touch.
    pub fn distance(&self, other: &Box) -> f64 {
        let (h_ovl, v_ovl) = self.overlap_distance(other);
        let dx = (-h_ovl).max(0) as f64;
        let dy = (-v_ovl).max(0) as f64;
        dx.hypot(dy)
    }

    /// Bounding box of a sequence of boxes, `None` if it is empty.
    pub fn bounding<'a>(boxes: impl IntoIterator<Item = &'a Box>) -> Option<Box> {
        boxes
            .into_iter()
            .copied()
            .reduce(|acc, b| acc.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_distance() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        let b = Box::new_unchecked(14, 5, 10, 10);
        assert_eq!(a.overlap_distance(&b), (-4, 5));
        assert_eq!(b.overlap_distance(&a), (-4, 5));
    }

    #[test]
    fn test_distance() {
        let a = Box::new_unchecked(0, 0, 10, 10);
        assert_eq!(a.distance(&Box::new_unchecked(5, 5, 10, 10)), 0.0);
        assert_eq!(a.distance(&Box::new_unchecked(13, 0, 4, 4)), 3.0);
        assert_eq!(a.distance(&Box::new_unchecked(13, 14, 4, 4)), 5.0);
    }

    #[test]
    fn test_bounding() {
        let boxes = [
            Box::new_unchecked(5, 5, 2, 2),
            Box::new_unchecked(0, 10, 3, 3),
        ];
        assert_eq!(
            Box::bounding(&boxes),
            Some(Box::new_unchecked(0, 5, 7, 8))
        );
        assert_eq!(Box::bounding(&[]), None);
    }
}
