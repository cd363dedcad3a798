//! Chained-bucket core shared by the map and the set.
//!
//! Buckets are keyed by the raw structural digest in a backing
//! `hashbrown::HashMap`; entries inside one bucket share a digest but are
//! disambiguated by the caller-supplied match closure. The element count is
//! tracked separately since bucket count never equals entry count.
//!
//! The layer is entry-agnostic: the map stores `(K, V)` pairs, the set
//! stores bare values, and both address entries through a precomputed hash
//! plus a closure (the same calling convention as `hashbrown::HashTable`).

use crate::hash::HashCode;
use hashbrown::hash_map::Values;
use hashbrown::HashMap;

#[derive(Clone)]
pub(crate) struct Table<E> {
    buckets: HashMap<HashCode, Vec<E>>,
    len: usize,
}

/// Outer iterator feeding [`crate::nested::NestedIter`]: one `Vec` of
/// hash-equal entries per occupied digest, in table order.
pub(crate) type Buckets<'a, E> = Values<'a, HashCode, Vec<E>>;

impl<E> Table<E> {
    pub(crate) fn new() -> Self {
        Table {
            buckets: HashMap::new(),
            len: 0,
        }
    }

    /// True element count, maintained incrementally (never derived by
    /// traversal).
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert-or-replace. `matches(stored, new)` decides whether an entry
    /// already represents the new entry's key. On a match the whole entry
    /// is replaced in place, so the new key instance wins and the displaced
    /// entry is returned with no size change; otherwise the entry is
    /// appended and the count grows. Never fails.
    pub(crate) fn upsert(
        &mut self,
        hash: HashCode,
        matches: impl Fn(&E, &E) -> bool,
        entry: E,
    ) -> Option<E> {
        let bucket = self.buckets.entry(hash).or_default();
        for slot in bucket.iter_mut() {
            if matches(slot, &entry) {
                return Some(std::mem::replace(slot, entry));
            }
        }
        bucket.push(entry);
        self.len += 1;
        None
    }

    /// Linear scan of the candidate bucket; absent digest and empty bucket
    /// are the same non-result.
    pub(crate) fn lookup(&self, hash: HashCode, matches: impl Fn(&E) -> bool) -> Option<&E> {
        self.buckets
            .get(&hash)?
            .iter()
            .find(|entry| matches(entry))
    }

    pub(crate) fn contains(&self, hash: HashCode, matches: impl Fn(&E) -> bool) -> bool {
        self.lookup(hash, matches).is_some()
    }

    /// Splice the matching entry out of its bucket, preserving the relative
    /// order of the remaining entries. A bucket emptied by removal is
    /// dropped from the backing map.
    pub(crate) fn remove(&mut self, hash: HashCode, matches: impl Fn(&E) -> bool) -> Option<E> {
        let bucket = self.buckets.get_mut(&hash)?;
        let index = bucket.iter().position(|entry| matches(entry))?;
        let entry = bucket.remove(index);
        self.len -= 1;
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        Some(entry)
    }

    /// Drop every bucket and reset the count.
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.len = 0;
    }

    pub(crate) fn buckets(&self) -> Buckets<'_, E> {
        self.buckets.values()
    }
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Table::new()
    }
}
