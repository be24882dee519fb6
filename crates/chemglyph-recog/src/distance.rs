//! Recognition results

use std::collections::BTreeMap;

/// Match distance per candidate character (lower is better)
///
/// # Examples
///
/// ```
/// use chemglyph_recog::RecognitionDistance;
///
/// let rd: RecognitionDistance = [('C', 0.8), ('O', 1.5), ('G', 1.1)].into_iter().collect();
/// assert_eq!(rd.best(), Some(('C', 0.8)));
/// assert!((rd.quality() - 0.3).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionDistance {
    distances: BTreeMap<char, f64>,
}

impl RecognitionDistance {
    /// Create an empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `distance` for `c`, keeping the smaller one if `c` is known.
    pub fn insert_min(&mut self, c: char, distance: f64) {
        self.distances
            .entry(c)
            .and_modify(|d| *d = d.min(distance))
            .or_insert(distance);
    }

    /// Best candidate and its distance.
    ///
    /// Equal distances resolve to the smaller character.
    pub fn best(&self) -> Option<(char, f64)> {
        let mut best: Option<(char, f64)> = None;
        for (&c, &d) in &self.distances {
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best
    }

    /// Gap between the runner-up and the best distance.
    ///
    /// `0.0` when fewer than two candidates are known.
    pub fn quality(&self) -> f64 {
        let mut values: Vec<f64> = self.distances.values().copied().collect();
        if values.len() < 2 {
            return 0.0;
        }
        values.sort_by(f64::total_cmp);
        values[1] - values[0]
    }

    /// Distance recorded for `c`
    pub fn get(&self, c: char) -> Option<f64> {
        self.distances.get(&c).copied()
    }

    /// Up to `n` candidates, best first.
    pub fn best_chars(&self, n: usize) -> Vec<char> {
        let mut entries: Vec<(char, f64)> = self.iter().collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        entries.into_iter().take(n).map(|(c, _)| c).collect()
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if no candidate was found
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Iterate over `(char, distance)` in character order
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.distances.iter().map(|(&c, &d)| (c, d))
    }
}

impl FromIterator<(char, f64)> for RecognitionDistance {
    fn from_iter<T: IntoIterator<Item = (char, f64)>>(iter: T) -> Self {
        let mut rd = Self::new();
        for (c, d) in iter {
            rd.insert_min(c, d);
        }
        rd
    }
}
