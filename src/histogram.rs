//! Per-graph histogram of partitions by (non-stable parts, stable parts).

use crate::graph::Graph;
use crate::partition::PartitionForest;
use crate::stable::count_stable;

/// Counts the partitions of a graph's vertex set by their stable-part signature.
///
/// Cell `[ns][s]` is the number of partitions with `ns` non-stable parts and `s` stable
/// parts. A non-stable part has at least two vertices, so `ns <= n/2` and the table has
/// `n/2 + 1` rows and `n + 1` columns. Recording outside that range is a sizing bug and
/// panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    order: usize,
    rows: usize,
    cols: usize,
    cells: Vec<u64>,
}

impl Histogram {
    /// Creates a zeroed histogram for graphs on `order` vertices.
    pub fn new(order: usize) -> Self {
        let rows = order / 2 + 1;
        let cols = order + 1;
        Self {
            order,
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Graph order this table is sized for.
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of rows (possible non-stable part counts).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (possible stable part counts).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns cell `[non_stable][stable]`, or 0 outside the table.
    #[inline]
    pub fn get(&self, non_stable: usize, stable: usize) -> u64 {
        if non_stable < self.rows && stable < self.cols {
            self.cells[non_stable * self.cols + stable]
        } else {
            0
        }
    }

    /// Row `non_stable` as a slice indexed by stable count.
    ///
    /// # Panics
    /// Panics if `non_stable >= self.rows()`. Use [`Histogram::get`] for reads that may fall
    /// outside the table.
    #[inline]
    pub fn row(&self, non_stable: usize) -> &[u64] {
        assert!(
            non_stable < self.rows,
            "row {non_stable} outside histogram with {} rows",
            self.rows
        );
        let start = non_stable * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// All rows in order.
    pub fn iter_rows(&self) -> std::slice::Chunks<'_, u64> {
        self.cells.chunks(self.cols)
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Zeroes every cell, keeping the allocation.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Counts one partition with `parts` parts of which `stable` are stable.
    ///
    /// # Panics
    /// Panics if `stable > parts` or the signature falls outside the table.
    #[inline]
    pub fn record(&mut self, parts: usize, stable: usize) {
        assert!(stable <= parts, "{stable} stable parts out of {parts}");
        let non_stable = parts - stable;
        assert!(
            non_stable < self.rows && stable < self.cols,
            "histogram cell [{non_stable}][{stable}] outside {}x{} table for n = {}",
            self.rows,
            self.cols,
            self.order
        );
        self.cells[non_stable * self.cols + stable] += 1;
    }

    /// Resets the table and fills it from every partition in `forest`.
    ///
    /// # Panics
    /// Panics if `forest` or `graph` was built for a different order.
    pub fn aggregate(&mut self, forest: &PartitionForest, graph: &Graph) {
        assert_eq!(forest.order(), self.order, "forest order mismatch");
        assert_eq!(graph.order(), self.order, "graph order mismatch");

        self.clear();
        for partition in forest {
            let stable = count_stable(partition, graph);
            self.record(partition.len(), stable);
        }
    }
}

/// Builds a fresh histogram of `graph` over `forest`.
pub fn aggregate(forest: &PartitionForest, graph: &Graph) -> Histogram {
    let mut histogram = Histogram::new(graph.order());
    histogram.aggregate(forest, graph);
    histogram
}
