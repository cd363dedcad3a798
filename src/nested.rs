//! Flattening pull-iterator over the table's buckets-of-entries.
//!
//! An explicit two-level state machine rather than a `flat_map` chain: it
//! holds the outer bucket iterator, at most one inner iterator over the
//! current bucket, and the projection turning a stored entry into the
//! caller-visible element. Nothing is buffered; each element is produced on
//! demand and the sequence is single-pass.

use crate::table::Buckets;
use std::slice;

pub(crate) struct NestedIter<'a, E, O> {
    outer: Buckets<'a, E>,
    inner: Option<slice::Iter<'a, E>>,
    project: fn(&'a E) -> O,
}

impl<'a, E, O> NestedIter<'a, E, O> {
    pub(crate) fn new(outer: Buckets<'a, E>, project: fn(&'a E) -> O) -> Self {
        NestedIter {
            outer,
            inner: None,
            project,
        }
    }
}

impl<'a, E, O> Iterator for NestedIter<'a, E, O> {
    type Item = O;

    fn next(&mut self) -> Option<O> {
        loop {
            match self.inner.as_mut() {
                // Between buckets: pull the next one, or finish for good
                // once the outer iterator runs dry. Empty buckets fall
                // straight through on the next pass.
                None => self.inner = Some(self.outer.next()?.iter()),
                Some(entries) => match entries.next() {
                    Some(entry) => return Some((self.project)(entry)),
                    None => self.inner = None,
                },
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Exact counts would require walking the buckets; stay lazy.
        let pending = self.inner.as_ref().map_or(0, |it| it.len());
        (pending, None)
    }
}
