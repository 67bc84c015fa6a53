//! Insertion-ordered keyed storage with constant-time removal.
//!
//! [`OrderedTable`] backs the node and edge tables of a [`Graph`](crate::Graph).
//! Entries live in a slot vector in insertion order and a hash index maps each
//! key to its slot. Removal empties the slot and leaves the others in place,
//! so relative order survives without shifting. Vacant slots are compacted
//! once they outnumber the live entries, which keeps iteration linear in the
//! number of entries and makes removal O(1) amortized.

use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};
use rustc_hash::FxBuildHasher;

/// Compaction never runs below this many vacant slots.
const MIN_VACANT_BEFORE_COMPACT: usize = 32;

#[derive(Debug, Clone)]
pub(crate) struct OrderedTable<K, V> {
    index: IndexMap<K, usize, FxBuildHasher>,
    slots: Vec<Option<(K, V)>>,
    vacant: usize,
}

impl<K, V> OrderedTable<K, V>
where
    K: Hash + Eq + Clone,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        OrderedTable {
            index: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher),
            slots: Vec::with_capacity(capacity),
            vacant: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.index.contains_key(key)
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = *self.index.get(key)?;
        self.slots.get(slot)?.as_ref().map(|(_, value)| value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = *self.index.get(key)?;
        self.slots.get_mut(slot)?.as_mut().map(|(_, value)| value)
    }

    /// Inserts `key` at the end of the order, or replaces its value in place.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        if let Some(existing) = self.get_mut(&key) {
            *existing = value;
            return;
        }
        self.index.insert(key.clone(), self.slots.len());
        self.slots.push(Some((key, value)));
    }

    /// Removes `key`, returning the stored key and value.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        let slot = self.index.swap_remove(key)?;
        let entry = self.slots.get_mut(slot)?.take();
        self.vacant += 1;

        if self.index.is_empty() {
            self.slots.clear();
            self.vacant = 0;
        } else if self.vacant >= MIN_VACANT_BEFORE_COMPACT && self.vacant * 2 > self.slots.len() {
            self.compact();
        }
        entry
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.slots.iter().flatten().map(|(key, value)| (key, value))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn compact(&mut self) {
        self.slots.retain(Option::is_some);
        for (position, entry) in self.slots.iter().enumerate() {
            if let Some((key, _)) = entry {
                if let Some(slot) = self.index.get_mut(key) {
                    *slot = position;
                }
            }
        }
        self.vacant = 0;
    }
}
