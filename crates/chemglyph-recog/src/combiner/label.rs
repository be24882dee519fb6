//! Text labels and their line layout

use crate::{RecognitionSettings, Segment};
use chemglyph_core::Box;

/// A group of glyphs read as one text label
#[derive(Debug, Clone)]
pub struct Label {
    /// Union of the member boxes
    pub rect: Box,
    /// Members in reading order
    pub symbols: Vec<Segment>,
    /// Index of each member in the symbol layer the label was built from
    pub source_indices: Vec<usize>,
    /// Bottom edge of the first capital-sized glyph
    pub line_y: Option<i32>,
    /// Position in `symbols` where the second line starts
    pub multi_begin: Option<usize>,
    /// Bottom edge of the first capital-sized glyph of the second line
    pub multi_line_y: Option<i32>,
}

impl Label {
    /// Check whether the label spans two lines
    pub fn is_multiline(&self) -> bool {
        self.multi_begin.is_some()
    }

    /// Glyphs of the first line
    pub fn first_line(&self) -> &[Segment] {
        &self.symbols[..self.multi_begin.unwrap_or(self.symbols.len())]
    }

    /// Glyphs of the second line, empty for a single-line label
    pub fn second_line(&self) -> &[Segment] {
        &self.symbols[self.multi_begin.unwrap_or(self.symbols.len())..]
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check whether the label has no glyph
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Put the members of one component in reading order and find its lines.
///
/// Members are scanned top to bottom. The first glyph taller than half the
/// capital height (times the error margin) fixes the first baseline; the
/// first later glyph whose vertical middle sits more than the line spacing
/// below it opens the second line. Each line is then ordered left to right.
///
/// Returns `None` for an empty member list.
pub(crate) fn order_label(
    mut members: Vec<(usize, Segment)>,
    cap_height: i32,
    settings: &RecognitionSettings,
) -> Option<Label> {
    let boxes: Vec<Box> = members.iter().map(|(_, s)| s.bbox()).collect();
    let rect = Box::bounding(&boxes)?;

    members.sort_by_key(|(_, s)| (s.y(), s.x()));

    let cap = cap_height as f64;
    let space = (cap * settings.line_spacing_ratio).floor();
    let err = settings.cap_height_error;

    let mut line_y = None;
    let mut separator = None;
    for (i, (_, s)) in members.iter().enumerate() {
        let Some(first_bottom) = line_y else {
            if s.height() as f64 > err * 0.5 * cap {
                line_y = Some(s.bbox().bottom());
            }
            continue;
        };
        let mid = (s.y() as f64 + 0.5 * s.height() as f64).round();
        if mid - first_bottom as f64 > space {
            separator = Some(i);
            break;
        }
    }

    let mut multi_line_y = None;
    match separator {
        Some(sep) => {
            let (first, second) = members.split_at_mut(sep);
            first.sort_by_key(|(_, s)| s.x());
            second.sort_by_key(|(_, s)| s.x());
            multi_line_y = second
                .iter()
                .find(|(_, s)| s.height() as f64 > err * cap)
                .map(|(_, s)| s.bbox().bottom());
        }
        None => members.sort_by_key(|(_, s)| s.x()),
    }

    let (source_indices, symbols) = members.into_iter().unzip();
    Some(Label {
        rect,
        symbols,
        source_indices,
        line_y,
        multi_begin: separator,
        multi_line_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemglyph_core::{Pix, PixelDepth};

    fn seg(x: i32, y: i32, w: u32, h: u32) -> Segment {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        pm.set_all();
        Segment::new(x, y, pm.into()).unwrap()
    }

    fn order(segs: Vec<Segment>) -> Label {
        let members = segs.into_iter().enumerate().collect();
        order_label(members, 20, &RecognitionSettings::default()).unwrap()
    }

    #[test]
    fn test_single_line_sorted_by_x() {
        let label = order(vec![seg(36, 1, 14, 20), seg(0, 0, 14, 20), seg(18, 2, 14, 20)]);
        assert_eq!(label.source_indices, vec![1, 2, 0]);
        assert_eq!(label.rect, Box::new_unchecked(0, 0, 50, 22));
        assert_eq!(label.line_y, Some(20));
        assert!(!label.is_multiline());
        assert_eq!(label.first_line().len(), 3);
        assert!(label.second_line().is_empty());
    }

    #[test]
    fn test_second_line() {
        // "C" over a lower glyph whose middle is 12 below the first baseline
        let label = order(vec![seg(6, 26, 9, 12), seg(0, 0, 14, 20)]);
        assert_eq!(label.multi_begin, Some(1));
        assert_eq!(label.line_y, Some(20));
        assert_eq!(label.multi_line_y, Some(38));
        assert_eq!(label.source_indices, vec![1, 0]);
        assert_eq!(label.second_line()[0].x(), 6);
    }

    #[test]
    fn test_small_leading_glyphs_do_not_set_baseline() {
        // a charge sign above the line is skipped when looking for the baseline
        let label = order(vec![seg(0, 0, 4, 4), seg(5, 3, 14, 20)]);
        assert_eq!(label.line_y, Some(23));
        assert!(!label.is_multiline());
    }

    #[test]
    fn test_subscript_stays_on_line() {
        // middle of the digit is 4 below the baseline, within the spacing
        let label = order(vec![seg(0, 0, 14, 20), seg(15, 18, 8, 12)]);
        assert!(!label.is_multiline());
        assert_eq!(label.multi_line_y, None);
    }

    #[test]
    fn test_empty_members() {
        assert!(order_label(Vec::new(), 20, &RecognitionSettings::default()).is_none());
    }
}
