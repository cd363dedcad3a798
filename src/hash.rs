//! Structural hash: a bounded 32-bit digest derived from a value's shape.
//!
//! The digest is not collision-free; the table resolves collisions with
//! [`crate::are_equal`]. The required contract is only the implication
//! `are_equal(a, b) => to_hash_code(a) == to_hash_code(b)`, which holds
//! whenever equal values enumerate their fields in the same order — true
//! by construction for instances of one composite type, and expected of
//! probe types that mirror a stored key. The fold is order-sensitive, so
//! a probe listing the same fields in a different order lands in a
//! different bucket.

use crate::shape::{Shape, Structural};

/// Fixed-width signed digest bucketing values in the table.
pub type HashCode = i32;

/// Largest integer magnitude exactly representable in an `f64` (2^53 - 1).
/// Finite numerics are reduced modulo this before truncation.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Every NaN payload collapses to this single digest.
const NAN_HASH: HashCode = 0x7fc0_0000;

/// Total, deterministic, side-effect-free digest of an arbitrary value.
///
/// Recurses through composite fields with no cycle detection; a
/// self-referential value (constructible only through shared-ownership
/// cells) does not terminate.
pub fn to_hash_code(value: &dyn Structural) -> HashCode {
    match value.shape() {
        Shape::Absent | Shape::Opaque(_) => 0,
        Shape::Bool(b) => b as HashCode,
        Shape::Num(n) => hash_num(n),
        Shape::Text(s) | Shape::Symbol(s) => hash_str(s),
        Shape::Composite { tag, fields } => {
            let mut hash = hash_str(tag);
            for (name, value) in fields {
                hash = combine(hash, hash_str(name));
                hash = combine(hash, to_hash_code(value));
            }
            hash
        }
    }
}

/// One polynomial step: `hash * 31 + code`, spelled shift-wise with 32-bit
/// wraparound.
fn combine(hash: HashCode, code: HashCode) -> HashCode {
    hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(code)
}

/// Running polynomial hash over UTF-16 code units, matching the classic
/// `s[0]*31^(n-1) + ... + s[n-1]` string hash.
fn hash_str(text: &str) -> HashCode {
    let mut hash = 0;
    for unit in text.encode_utf16() {
        hash = combine(hash, unit as HashCode);
    }
    hash
}

/// Non-finite convention: one constant for every NaN, the two `i32`
/// extremes for the signed infinities. Finite values reduce modulo
/// `MAX_SAFE_INTEGER` (remainder keeps the dividend's sign) and truncate
/// through `i64` to the low 32 bits.
fn hash_num(value: f64) -> HashCode {
    if value.is_nan() {
        NAN_HASH
    } else if value == f64::INFINITY {
        HashCode::MAX
    } else if value == f64::NEG_INFINITY {
        HashCode::MIN
    } else {
        (value % MAX_SAFE_INTEGER) as i64 as HashCode
    }
}
