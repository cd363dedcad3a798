//! Map keyed by structural (deep-value) equality.

use crate::equality::are_equal;
use crate::hash::to_hash_code;
use crate::nested::NestedIter;
use crate::shape::Structural;
use crate::table::Table;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// A map whose keys are compared by shape, not by instance.
///
/// Two distinct key instances with the same type tag and recursively equal
/// fields address the same slot. Inserting under an equal key overwrites
/// the value and stores the new key instance in place of the old one.
///
/// Lookups accept any [`Structural`] probe type, not just `K`: a probe
/// matches when its shape matches, which is the structural analogue of the
/// standard `Borrow`-based lookup.
#[derive(Clone)]
pub struct StructuralMap<K, V> {
    table: Table<(K, V)>,
}

impl<K: Structural, V> StructuralMap<K, V> {
    pub fn new() -> Self {
        StructuralMap {
            table: Table::new(),
        }
    }

    /// Number of distinct (by structural equality) keys stored. O(1).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Insert-or-update. Returns the displaced value when an equal key was
    /// already present; the stored key instance is replaced by `key` in
    /// that case.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = to_hash_code(&key);
        self.table
            .upsert(
                hash,
                |stored, new| are_equal(&stored.0, &new.0),
                (key, value),
            )
            .map(|(_, displaced)| displaced)
    }

    pub fn get<Q: Structural>(&self, key: &Q) -> Option<&V> {
        let hash = to_hash_code(key);
        self.table
            .lookup(hash, |entry| are_equal(&entry.0, key))
            .map(|(_, value)| value)
    }

    pub fn contains_key<Q: Structural>(&self, key: &Q) -> bool {
        self.get(key).is_some()
    }

    /// Remove by structural key. `None` for an absent key is a normal
    /// outcome, never an error.
    pub fn remove<Q: Structural>(&mut self, key: &Q) -> Option<V> {
        let hash = to_hash_code(key);
        self.table
            .remove(hash, |entry| are_equal(&entry.0, key))
            .map(|(_, value)| value)
    }

    /// Drop all entries and reset the size to zero.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Lazy view of `(&key, &value)` pairs in bucket order. Single-pass;
    /// call again for a fresh traversal.
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries(NestedIter::new(self.table.buckets(), |entry| {
            (&entry.0, &entry.1)
        }))
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(NestedIter::new(self.table.buckets(), |entry| &entry.0))
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values(NestedIter::new(self.table.buckets(), |entry| &entry.1))
    }

    pub fn iter(&self) -> Entries<'_, K, V> {
        self.entries()
    }
}

impl<K: Structural, V> Default for StructuralMap<K, V> {
    fn default() -> Self {
        StructuralMap::new()
    }
}

/// Lazy iterator over `(&K, &V)` pairs.
pub struct Entries<'a, K, V>(NestedIter<'a, (K, V), (&'a K, &'a V)>);

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Lazy iterator over `&K`.
pub struct Keys<'a, K, V>(NestedIter<'a, (K, V), &'a K>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Lazy iterator over `&V`.
pub struct Values<'a, K, V>(NestedIter<'a, (K, V), &'a V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K: Structural, V> IntoIterator for &'a StructuralMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V>;
    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<K: Structural, V> FromIterator<(K, V)> for StructuralMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StructuralMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Structural, V> Extend<(K, V)> for StructuralMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Export view: a sequence of `[key, value]` pairs in bucket order. Bucket
/// order is not insertion order once deletions have occurred.
impl<K, V> Serialize for StructuralMap<K, V>
where
    K: Structural + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for pair in self.entries() {
            seq.serialize_element(&pair)?;
        }
        seq.end()
    }
}

/// The human-readable form is exactly the JSON encoding of the export
/// view.
impl<K, V> fmt::Display for StructuralMap<K, V>
where
    K: Structural + Serialize,
    V: Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<K, V> fmt::Debug for StructuralMap<K, V>
where
    K: Structural + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
