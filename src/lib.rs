//! structmap: map and set keyed by structural (deep-value) equality.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: associative containers where two structurally identical values
//!   are the same key even when they are distinct instances, built in
//!   small, independently verifiable layers.
//! - Layers:
//!   - `Shape`/`Structural`: the reflection contract. A value presents
//!     itself as a primitive or as a type-tagged record of named fields in
//!     declaration order; `#[derive(Structural)]` generates this for
//!     structs and enums.
//!   - `to_hash_code`/`are_equal`: total functions over any `Structural`
//!     value. The digest is an imperfect 32-bit bucket key; equality is
//!     authoritative. The only required law is
//!     `are_equal(a, b) => to_hash_code(a) == to_hash_code(b)`.
//!   - `Table<E>`: chained-bucket core mapping digest -> `Vec` of entries,
//!     with a separately tracked true size. Entry-agnostic: operations take
//!     a precomputed hash plus a match closure, so one core serves both
//!     facades.
//!   - `NestedIter`: explicit two-level pull state machine flattening the
//!     buckets into one lazy projected sequence, one bucket handle at a
//!     time.
//!   - `StructuralMap` / `StructuralSet`: the public facades.
//!
//! Constraints
//! - Single-threaded, synchronous: no operation suspends or locks. Any
//!   cross-thread use needs external mutual exclusion; iterators borrow the
//!   table, so mutation during iteration is rejected at compile time.
//! - No operation fails under normal inputs: absent keys are `None`/`false`
//!   outcomes, unrepresentable sub-values degrade to a constant digest, and
//!   the core raises nothing of its own.
//! - Overwrite-by-structural-key: inserting under an equal key replaces the
//!   stored key instance with the new argument. Value-keyed semantics, not
//!   identity-keyed.
//! - No cycle detection: a self-referential value (constructible only via
//!   shared-ownership cells) does not terminate in hashing or equality.
//!
//! Notes and non-goals
//! - Not a serialization or deep-clone library: shapes exist for lookup
//!   correctness only. The JSON export (`Serialize`/`Display`) is a
//!   diagnostic view, not a canonical encoding.
//! - `NaN` follows native numeric equality: it never equals itself, so a
//!   `NaN`-bearing key can be inserted but not looked up again. All NaNs
//!   share one digest; the signed infinities get two fixed digests.
//! - Sequences carry no built-in `Structural` impl; the value model is
//!   "primitive or record". Wrap collections in your own types if needed.

mod equality;
mod hash;
pub mod map;
mod nested;
pub mod set;
mod shape;
mod table;

// Public surface
pub use equality::are_equal;
pub use hash::{to_hash_code, HashCode};
pub use map::StructuralMap;
pub use set::StructuralSet;
pub use shape::{Shape, Structural, Symbol};

/// Derives [`Structural`] for structs and enums: the type name becomes the
/// tag (`Type::Variant` for enum variants) and fields are listed in
/// declaration order, tuple fields under their positional names.
#[cfg(feature = "derive")]
pub use structmap_derive::Structural;
