//! Set partitions of `{0, ..., n-1}` as a forest of persistent lists.
//!
//! A [`Partition`] is a cons list of parts and every [`Part`] is a cons list of vertices.
//! Cells are reference counted, so extending a partition by one element only allocates the
//! cells in front of the part that receives the element; the part lists themselves and the
//! spine behind the modified part are shared with the parent partition.
//!
//! The whole forest is built once by [`PartitionForest::generate`] and is immutable
//! afterwards. All nodes are `Arc`-backed, so the forest is `Send + Sync`.

use std::fmt;
use std::sync::Arc;

// ============================================================================
// Persistent list
// ============================================================================

#[derive(Debug)]
struct Cell<T> {
    head: T,
    tail: List<T>,
}

/// An immutable singly linked list with shared tails.
pub struct List<T> {
    cell: Option<Arc<Cell<T>>>,
}

impl<T> List<T> {
    /// The empty list.
    #[inline]
    pub const fn nil() -> Self {
        Self { cell: None }
    }

    /// Returns a new list with `head` in front of `self`. `self` is shared, not copied.
    #[inline]
    #[must_use]
    pub fn cons(&self, head: T) -> Self {
        Self {
            cell: Some(Arc::new(Cell {
                head,
                tail: self.clone(),
            })),
        }
    }

    /// Returns `true` for the empty list.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cell.is_none()
    }

    /// First element and the rest of the list.
    #[inline]
    pub fn split_first(&self) -> Option<(&T, &List<T>)> {
        self.cell.as_deref().map(|cell| (&cell.head, &cell.tail))
    }

    /// First element.
    #[inline]
    pub fn head(&self) -> Option<&T> {
        self.split_first().map(|(head, _)| head)
    }

    /// Everything after the first element.
    #[inline]
    pub fn tail(&self) -> Option<&List<T>> {
        self.split_first().map(|(_, tail)| tail)
    }

    /// Number of elements. Walks the list.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.cell.as_deref(),
        }
    }

    /// Returns `true` if both lists are the very same cells (or both empty).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.cell, &other.cell) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::nil()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for List<T> {
    /// Builds a list with the same front-to-back order as the iterator.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Self::nil(), |list, item| list.cons(item))
    }
}

/// Borrowing iterator over a [`List`].
pub struct Iter<'a, T> {
    next: Option<&'a Cell<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|cell| {
            self.next = cell.tail.cell.as_deref();
            &cell.head
        })
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// A block of a set partition.
pub type Part = List<usize>;

/// A set partition: a list of disjoint, non-empty parts.
pub type Partition = List<Part>;

// ============================================================================
// Generation
// ============================================================================

/// Pushes every way of adding `elem` to `partition`: first as a new singleton part, then
/// inserted into each existing part in turn.
fn extend_partition(elem: usize, partition: &Partition, out: &mut Vec<Partition>) {
    out.push(partition.cons(Part::nil().cons(elem)));

    let mut prefix: Vec<&Part> = Vec::new();
    let mut cursor = partition;
    while let Some((part, rest)) = cursor.split_first() {
        let mut variant = rest.cons(part.cons(elem));
        for &earlier in prefix.iter().rev() {
            variant = variant.cons(earlier.clone());
        }
        out.push(variant);
        prefix.push(part);
        cursor = rest;
    }
}

/// Returns the Bell number \(B_n\), or `None` if it does not fit in a `u64` (n > 25).
pub fn bell_number(n: usize) -> Option<u64> {
    if n == 0 {
        return Some(1);
    }
    // Bell triangle: each row starts with the last entry of the previous row, and row
    // `n - 1` ends with B_n.
    let mut row: Vec<u64> = vec![1];
    for _ in 1..n {
        let mut next = Vec::with_capacity(row.len() + 1);
        next.push(*row.last()?);
        for &above in &row {
            let left = *next.last()?;
            next.push(left.checked_add(above)?);
        }
        row = next;
    }
    row.last().copied()
}

/// Every set partition of `{0, ..., n-1}`.
#[derive(Clone, Debug)]
pub struct PartitionForest {
    n: usize,
    partitions: Vec<Partition>,
}

impl PartitionForest {
    /// Generates all \(B_n\) partitions of `{0, ..., n-1}`.
    ///
    /// `n = 0` yields the single partition with no parts. Memory grows with the Bell number,
    /// so in practice `n` stays around 12 or below.
    pub fn generate(n: usize) -> Self {
        let mut partitions = vec![Partition::nil()];
        for elem in 0..n {
            let capacity = bell_number(elem + 1)
                .and_then(|b| usize::try_from(b).ok())
                .unwrap_or(0);
            let mut next = Vec::with_capacity(capacity);
            for partition in &partitions {
                extend_partition(elem, partition, &mut next);
            }
            partitions = next;
        }
        Self { n, partitions }
    }

    /// Size of the ground set.
    #[inline]
    pub fn order(&self) -> usize {
        self.n
    }

    /// Number of partitions (the Bell number of `order()`).
    #[inline]
    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    /// Always `false`: even the empty set has one partition.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// All partitions, in generation order.
    #[inline]
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Iterates over all partitions.
    pub fn iter(&self) -> std::slice::Iter<'_, Partition> {
        self.partitions.iter()
    }
}

impl<'a> IntoIterator for &'a PartitionForest {
    type Item = &'a Partition;
    type IntoIter = std::slice::Iter<'a, Partition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    /// Order-insensitive form of a partition.
    fn canonical(partition: &Partition) -> BTreeSet<BTreeSet<usize>> {
        partition
            .iter()
            .map(|part| part.iter().copied().collect())
            .collect()
    }

    #[test]
    fn bell_numbers() {
        let expected = [1u64, 1, 2, 5, 15, 52, 203, 877, 4140, 21147, 115_975];
        for (n, &b) in expected.iter().enumerate() {
            assert_eq!(bell_number(n), Some(b), "B_{n}");
        }
        assert_eq!(bell_number(25), Some(4_638_590_332_229_999_353));
        assert_eq!(bell_number(26), None);
    }

    #[test]
    fn forest_size_is_bell_number() {
        for n in 0..=9 {
            let forest = PartitionForest::generate(n);
            assert_eq!(forest.order(), n);
            assert_eq!(Some(forest.len() as u64), bell_number(n), "n = {n}");
        }
    }

    #[test]
    fn empty_ground_set_has_one_empty_partition() {
        let forest = PartitionForest::generate(0);
        assert_eq!(forest.len(), 1);
        assert!(!forest.is_empty());
        assert!(forest.partitions()[0].is_empty());
    }

    #[test]
    fn partitions_are_exact_covers() {
        let n = 6;
        let forest = PartitionForest::generate(n);
        for partition in &forest {
            let mut seen = vec![false; n];
            for part in partition {
                assert!(!part.is_empty(), "empty part in {partition:?}");
                for &v in part {
                    assert!(v < n);
                    assert!(!seen[v], "{v} appears twice in {partition:?}");
                    seen[v] = true;
                }
            }
            assert!(seen.iter().all(|&s| s), "{partition:?} misses a vertex");
        }
    }

    #[test]
    fn partitions_are_distinct() {
        for n in 0..=7 {
            let forest = PartitionForest::generate(n);
            let unique: BTreeSet<_> = forest.iter().map(canonical).collect();
            assert_eq!(unique.len(), forest.len(), "duplicates for n = {n}");
        }
    }

    #[test]
    fn extension_shares_untouched_structure() {
        // P = [[1], [0]]
        let original: Partition = [Part::from_iter([1]), Part::from_iter([0])]
            .into_iter()
            .collect();
        let mut out = Vec::new();
        extend_partition(2, &original, &mut out);
        assert_eq!(out.len(), 3);

        // New singleton in front; the whole of P is the tail.
        assert!(out[0].tail().unwrap().ptr_eq(&original));
        assert_eq!(out[0].head().unwrap().iter().copied().collect::<Vec<_>>(), [2]);

        // 2 joins the first part; the second part is shared through the spine.
        assert!(out[1].tail().unwrap().ptr_eq(original.tail().unwrap()));
        assert_eq!(out[1].head().unwrap().iter().copied().collect::<Vec<_>>(), [2, 1]);

        // 2 joins the second part; the first part is the very same list.
        assert!(out[2].head().unwrap().ptr_eq(original.head().unwrap()));
        let second = out[2].tail().unwrap().head().unwrap();
        assert_eq!(second.iter().copied().collect::<Vec<_>>(), [2, 0]);
        assert!(second.tail().unwrap().ptr_eq(original.tail().unwrap().head().unwrap()));
    }

    #[test]
    fn list_basics() {
        let list: List<u32> = [1, 2, 3].into_iter().collect();
        assert_eq!(list.len(), 3);
        assert_eq!(list.head(), Some(&1));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");

        let longer = list.cons(0);
        assert!(longer.tail().unwrap().ptr_eq(&list));
        assert!(List::<u32>::nil().ptr_eq(&List::default()));
        assert!(!list.ptr_eq(&List::nil()));
    }

    #[test]
    fn forest_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PartitionForest>();
    }
}
