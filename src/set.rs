//! Set of distinct structural values, sharing the chained-bucket core with
//! the map. Entries are single-valued: each stored value is its own key.

use crate::equality::are_equal;
use crate::hash::to_hash_code;
use crate::nested::NestedIter;
use crate::shape::Structural;
use crate::table::Table;
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// A set whose membership is decided by shape, not by instance.
///
/// Size counts distinct structural values only. Adding a value equal to a
/// stored one replaces the stored instance (the new instance wins) without
/// growing the set.
#[derive(Clone)]
pub struct StructuralSet<T> {
    table: Table<T>,
}

impl<T: Structural> StructuralSet<T> {
    pub fn new() -> Self {
        StructuralSet {
            table: Table::new(),
        }
    }

    /// Number of distinct structural values stored. O(1).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Add a value; `true` when it was not already present. An equal value
    /// overwrites the stored instance with `value`.
    pub fn insert(&mut self, value: T) -> bool {
        let hash = to_hash_code(&value);
        self.table
            .upsert(hash, |stored, new| are_equal(stored, new), value)
            .is_none()
    }

    pub fn contains<Q: Structural>(&self, value: &Q) -> bool {
        let hash = to_hash_code(value);
        self.table.contains(hash, |stored| are_equal(stored, value))
    }

    /// Remove by structural value; `false` for an absent value is a normal
    /// outcome, never an error.
    pub fn remove<Q: Structural>(&mut self, value: &Q) -> bool {
        let hash = to_hash_code(value);
        self.table
            .remove(hash, |stored| are_equal(stored, value))
            .is_some()
    }

    /// Drop all values and reset the size to zero.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Lazy view of the stored values in bucket order. Keys and values of a
    /// set are the same view. Single-pass; call again for a fresh
    /// traversal.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(NestedIter::new(self.table.buckets(), |value| value))
    }

    /// Keys and values of a set are the same bare-value view as
    /// [`iter`](Self::iter).
    pub fn keys(&self) -> Iter<'_, T> {
        self.iter()
    }

    pub fn values(&self) -> Iter<'_, T> {
        self.iter()
    }

    /// Lazy view pairing each value with itself, mirroring the map's
    /// entries view.
    pub fn entries(&self) -> Entries<'_, T> {
        Entries(NestedIter::new(self.table.buckets(), |value| {
            (value, value)
        }))
    }
}

impl<T: Structural> Default for StructuralSet<T> {
    fn default() -> Self {
        StructuralSet::new()
    }
}

/// Lazy iterator over `&T`.
pub struct Iter<'a, T>(NestedIter<'a, T, &'a T>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

/// Lazy iterator over `(&T, &T)` self-pairs.
pub struct Entries<'a, T>(NestedIter<'a, T, (&'a T, &'a T)>);

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (&'a T, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, T: Structural> IntoIterator for &'a StructuralSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Structural> FromIterator<T> for StructuralSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = StructuralSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Structural> Extend<T> for StructuralSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Export view: a flat sequence of values (not pairs) in bucket order.
impl<T> Serialize for StructuralSet<T>
where
    T: Structural + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

/// The human-readable form is exactly the JSON encoding of the export
/// view.
impl<T> fmt::Display for StructuralSet<T>
where
    T: Structural + Serialize,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl<T> fmt::Debug for StructuralSet<T>
where
    T: Structural + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
