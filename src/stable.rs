//! Stable (independent) set checks for parts and partitions.

use crate::graph::Graph;
use crate::partition::{Part, Partition};

/// Returns `true` iff no two elements of `set` are adjacent in `graph`.
///
/// Each element is checked against the elements after it, so every unordered pair is
/// examined once. Elements must be vertices of `graph`.
#[inline]
pub fn is_stable(set: &Part, graph: &Graph) -> bool {
    let mut cursor = set;
    while let Some((&u, rest)) = cursor.split_first() {
        if rest.iter().any(|&v| graph.has_edge(u, v)) {
            return false;
        }
        cursor = rest;
    }
    true
}

/// Number of parts of `partition` that are stable in `graph`.
#[inline]
pub fn count_stable(partition: &Partition, graph: &Graph) -> usize {
    partition.iter().filter(|part| is_stable(part, graph)).count()
}
