//! Node bitmap value object module
//!
//! Wraps `fixedbitset::FixedBitSet` to give the scheduler's partition,
//! reservation, and availability masks the intersect/subtract/disjoint
//! vocabulary the dispatch loop and start-time predictor are written in
//! terms of (spec §4.5, §4.6).

use fixedbitset::FixedBitSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fixed-size bitmap over cluster node indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBitmap {
    bits: FixedBitSet,
}

impl NodeBitmap {
    /// An all-zero bitmap sized for `node_count` nodes.
    pub fn empty(node_count: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(node_count),
        }
    }

    /// An all-one bitmap sized for `node_count` nodes.
    pub fn full(node_count: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(node_count);
        bits.set_range(.., true);
        Self { bits }
    }

    pub fn from_indices(node_count: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = FixedBitSet::with_capacity(node_count);
        for i in indices {
            bits.insert(i);
        }
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.count_ones(..) == 0
    }

    pub fn count(&self) -> usize {
        self.bits.count_ones(..)
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    pub fn get(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    /// True if no bit is set in both bitmaps.
    pub fn is_disjoint(&self, other: &NodeBitmap) -> bool {
        self.bits.is_disjoint(&other.bits)
    }

    pub fn intersection(&self, other: &NodeBitmap) -> NodeBitmap {
        let mut bits = self.bits.clone();
        bits.intersect_with(&other.bits);
        NodeBitmap { bits }
    }

    pub fn intersect_with(&mut self, other: &NodeBitmap) {
        self.bits.intersect_with(&other.bits);
    }

    pub fn union_with(&mut self, other: &NodeBitmap) {
        self.bits.union_with(&other.bits);
    }

    /// Self minus other: bits set in self but not in other.
    pub fn subtract(&self, other: &NodeBitmap) -> NodeBitmap {
        let mut bits = self.bits.clone();
        bits.difference_with(&other.bits);
        NodeBitmap { bits }
    }

    /// True if every bit set in `self` is also set in `other`.
    pub fn is_subset_of(&self, other: &NodeBitmap) -> bool {
        self.bits.is_subset(&other.bits)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }
}

impl fmt::Display for NodeBitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.indices().map(|i| i.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disjoint_bitmaps_have_no_overlap() {
        let a = NodeBitmap::from_indices(8, [0, 1, 2]);
        let b = NodeBitmap::from_indices(8, [3, 4, 5]);
        assert!(a.is_disjoint(&b));

        let c = NodeBitmap::from_indices(8, [2, 6]);
        assert!(!a.is_disjoint(&c));
    }

    #[test]
    fn subset_check() {
        let required = NodeBitmap::from_indices(8, [1, 2]);
        let candidate = NodeBitmap::from_indices(8, [1, 2, 3]);
        assert!(required.is_subset_of(&candidate));

        let missing = NodeBitmap::from_indices(8, [1]);
        assert!(!required.is_subset_of(&missing));
    }

    #[test]
    fn subtract_removes_excluded_nodes() {
        let candidate = NodeBitmap::from_indices(8, [0, 1, 2, 3]);
        let excluded = NodeBitmap::from_indices(8, [1, 3]);
        let result = candidate.subtract(&excluded);
        assert_eq!(result.indices().collect::<Vec<_>>(), vec![0, 2]);
    }
}
