//! Greedy 1-D grouping of scalar measurements
//!
//! A [`GroupHistogram`] maps exact scalar values to the indices that share
//! them. Groups can be merged by proximity with [`GroupHistogram::regroup`]
//! and filtered by population with [`GroupHistogram::only_representative`].
//!
//! The grouping is a greedy, order-dependent approximation. It does not
//! search for a globally optimal clustering.

use crate::error::{Error, Result};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Value-keyed groups of indices
///
/// # Examples
///
/// ```
/// use chemglyph_core::GroupHistogram;
///
/// let mut hist = GroupHistogram::new();
/// hist.add(0usize, 10.0);
/// hist.add(1, 11.0);
/// hist.add(2, 30.0);
///
/// let grouped = hist.regroup(2.0);
/// assert_eq!(grouped.group_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GroupHistogram<I> {
    groups: BTreeMap<OrderedFloat<f64>, Vec<I>>,
}

impl<I> Default for GroupHistogram<I> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<I: Clone> GroupHistogram<I> {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `index` to the group of `value`, creating the group if absent.
    pub fn add(&mut self, index: I, value: f64) {
        self.groups
            .entry(OrderedFloat(value))
            .or_default()
            .push(index);
    }

    /// Merge groups whose values differ by less than `delta`.
    ///
    /// Repeatedly picks the unprocessed group whose neighborhood (other
    /// unprocessed groups closer than `delta`) holds the most indices, with
    /// ties going to the smaller value. That group and its neighborhood are
    /// merged into one output group keyed by the center value. Every input
    /// index appears exactly once in the result.
    pub fn regroup(&self, delta: f64) -> Self {
        let entries: Vec<(f64, &Vec<I>)> =
            self.groups.iter().map(|(k, v)| (k.into_inner(), v)).collect();
        let mut processed = vec![false; entries.len()];
        let mut result = Self::new();

        while let Some(first) = processed.iter().position(|&p| !p) {
            let mut best = first;
            let mut best_count = 0usize;

            for (c, &(center, _)) in entries.iter().enumerate() {
                if processed[c] {
                    continue;
                }
                let count: usize = entries
                    .iter()
                    .enumerate()
                    .filter(|&(u, &(value, _))| {
                        !processed[u] && u != c && (value - center).abs() < delta
                    })
                    .map(|(_, (_, members))| members.len())
                    .sum();
                if count > best_count {
                    best_count = count;
                    best = c;
                }
            }

            let center = entries[best].0;
            for (u, &(value, members)) in entries.iter().enumerate() {
                if processed[u] || (u != best && (value - center).abs() >= delta) {
                    continue;
                }
                for index in members {
                    result.add(index.clone(), center);
                }
                processed[u] = true;
            }
        }

        result
    }

    /// Keep only groups holding at least the average number of indices.
    ///
    /// The average group size is truncated to an integer.
    pub fn only_representative(&self) -> Self {
        let mut result = Self::new();
        if self.is_empty() {
            return result;
        }

        let average = self.len() / self.group_count();
        for (value, members) in &self.groups {
            if members.len() >= average {
                result.groups.insert(*value, members.clone());
            }
        }
        result
    }
}

impl<I> GroupHistogram<I> {
    /// Mean value over all indices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the histogram is empty.
    pub fn average(&self) -> Result<f64> {
        if self.is_empty() {
            return Err(Error::EmptyCollection("histogram average"));
        }
        let sum: f64 = self
            .groups
            .iter()
            .map(|(value, members)| value.into_inner() * members.len() as f64)
            .sum();
        Ok(sum / self.len() as f64)
    }

    /// Difference between the largest and smallest group values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the histogram is empty.
    pub fn range(&self) -> Result<f64> {
        match (self.groups.keys().next(), self.groups.keys().next_back()) {
            (Some(min), Some(max)) => Ok(max.into_inner() - min.into_inner()),
            _ => Err(Error::EmptyCollection("histogram range")),
        }
    }

    /// Number of distinct groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// First index of every group, in ascending value order.
    pub fn start_indexes(&self) -> Vec<&I> {
        self.groups.values().filter_map(|m| m.first()).collect()
    }

    /// Total number of indices.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Check if no index has been added.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Iterate over `(value, indices)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &[I])> {
        self.groups
            .iter()
            .map(|(value, members)| (value.into_inner(), members.as_slice()))
    }

    /// Indices stored under exactly `value`.
    pub fn get(&self, value: f64) -> Option<&[I]> {
        self.groups.get(&OrderedFloat(value)).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_values(values: &[f64]) -> GroupHistogram<usize> {
        let mut hist = GroupHistogram::new();
        for (i, &v) in values.iter().enumerate() {
            hist.add(i, v);
        }
        hist
    }

    #[test]
    fn test_add_groups_equal_values() {
        let hist = from_values(&[2.0, 5.0, 2.0]);
        assert_eq!(hist.group_count(), 2);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.get(2.0), Some(&[0usize, 2][..]));
        assert_eq!(hist.start_indexes(), vec![&0, &1]);
    }

    #[test]
    fn test_regroup_zero_keeps_groups() {
        let hist = from_values(&[1.0, 1.5, 2.0, 2.0]);
        assert_eq!(hist.regroup(0.0), hist);
    }

    #[test]
    fn test_regroup_infinite_merges_all() {
        let hist = from_values(&[1.0, 7.0, 40.0, -3.0]);
        let merged = hist.regroup(f64::INFINITY);
        assert_eq!(merged.group_count(), 1);
        assert_eq!(merged.len(), 4);
    }

    #[test]
    fn test_regroup_is_greedy() {
        // 1 and 2 tie on neighborhood size; the smaller value wins and
        // swallows 0 and 2, leaving 3 alone even though 2..3 are close.
        let merged = from_values(&[0.0, 1.0, 2.0, 3.0]).regroup(1.5);
        assert_eq!(merged.group_count(), 2);
        assert_eq!(merged.get(1.0), Some(&[0usize, 1, 2][..]));
        assert_eq!(merged.get(3.0), Some(&[3usize][..]));
    }

    #[test]
    fn test_only_representative() {
        let mut hist = GroupHistogram::new();
        hist.add(0usize, 1.0);
        hist.add(1, 2.0);
        hist.add(2, 3.0);
        for i in 3..12 {
            hist.add(i, 9.0);
        }
        let kept = hist.only_representative();
        assert_eq!(kept.group_count(), 1);
        assert_eq!(kept.get(9.0).map(<[usize]>::len), Some(9));
    }

    #[test]
    fn test_statistics() {
        let hist = from_values(&[1.0, 3.0, 3.0, 5.0]);
        assert_eq!(hist.average().unwrap(), 3.0);
        assert_eq!(hist.range().unwrap(), 4.0);
    }

    #[test]
    fn test_empty_statistics_fail() {
        let hist: GroupHistogram<usize> = GroupHistogram::new();
        assert!(matches!(hist.average(), Err(Error::EmptyCollection(_))));
        assert!(matches!(hist.range(), Err(Error::EmptyCollection(_))));
        assert!(hist.only_representative().is_empty());
        assert!(hist.regroup(1.0).is_empty());
    }
}
