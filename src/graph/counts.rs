//! Per-node neighbor reference counts.
//!
//! Every node in a [`Graph`](crate::Graph) owns two [`AdjacencyCounts`]: one
//! for its predecessors and one for its successors. Each entry maps a neighbor
//! key to the number of edges that make it a neighbor. In a simple digraph the
//! count never exceeds one, but keeping a counter instead of a presence flag
//! means that repeated insertions and removals of the same relation cannot
//! leave a stale or missing neighbor behind.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

/// A map from neighbor key to the number of edges contributing to that adjacency.
///
/// Entries exist only while their count is non-zero: [`decrement`](Self::decrement)
/// removes a neighbor as soon as its count drops to zero, so [`keys`](Self::keys)
/// is always exactly the current neighbor set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct AdjacencyCounts {
    counts: IndexMap<String, usize, FxBuildHasher>,
}

impl AdjacencyCounts {
    /// Creates an empty count map.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Increments the count for `key`, inserting it with a count of one if absent.
    ///
    /// # Returns
    ///
    /// The count after incrementing.
    pub(crate) fn increment(&mut self, key: &str) -> usize {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
            return *count;
        }
        self.counts.insert(key.to_owned(), 1);
        1
    }

    /// Decrements the count for `key`, removing the entry when it reaches zero.
    ///
    /// Unknown keys are ignored.
    ///
    /// # Returns
    ///
    /// The count after decrementing, or `None` if `key` had no entry.
    pub(crate) fn decrement(&mut self, key: &str) -> Option<usize> {
        let count = self.counts.get_mut(key)?;
        *count -= 1;
        let remaining = *count;
        if remaining == 0 {
            self.counts.swap_remove(key);
        }
        Some(remaining)
    }

    /// Returns `true` if `key` has a non-zero count.
    #[must_use]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.counts.contains_key(key)
    }

    /// Returns an iterator over the neighbor keys with a non-zero count.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    /// Returns `true` if there are no neighbors.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
