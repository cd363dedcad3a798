//! Structural deep equality, independent of instance identity and of the
//! concrete Rust types on either side.

use crate::shape::{Shape, Structural};

/// Deep equality over shapes: symmetric, and consistent with
/// [`crate::to_hash_code`] — equal values share a digest whenever they
/// enumerate their fields in the same order, as two instances of one
/// composite type (or a stored key and its probe) do. Equality itself is
/// order-independent; only the digest folds fields in declaration order.
///
/// Kind mismatches (text vs symbol, bool vs number, absent vs anything
/// present) are unequal. Numerics compare with native `f64` equality, so
/// `NaN != NaN`; every other value is equal to itself.
pub fn are_equal(a: &dyn Structural, b: &dyn Structural) -> bool {
    match (a.shape(), b.shape()) {
        (Shape::Absent, Shape::Absent) => true,
        (Shape::Bool(x), Shape::Bool(y)) => x == y,
        (Shape::Num(x), Shape::Num(y)) => x == y,
        (Shape::Text(x), Shape::Text(y)) => x == y,
        (Shape::Symbol(x), Shape::Symbol(y)) => x == y,
        (Shape::Opaque(x), Shape::Opaque(y)) => x == y,
        (
            Shape::Composite {
                tag: tag_a,
                fields: fields_a,
            },
            Shape::Composite {
                tag: tag_b,
                fields: fields_b,
            },
        ) => composites_equal(tag_a, &fields_a, tag_b, &fields_b),
        _ => false,
    }
}

/// Composites are equal when the tags match, the field counts match, and
/// every field of `a` finds a recursively equal field of the same name in
/// `b`. Equal counts plus name containment make the name sets identical,
/// so comparison order does not matter. Short-circuits on the first
/// mismatch.
fn composites_equal(
    tag_a: &str,
    fields_a: &[(&str, &dyn Structural)],
    tag_b: &str,
    fields_b: &[(&str, &dyn Structural)],
) -> bool {
    if tag_a != tag_b || fields_a.len() != fields_b.len() {
        return false;
    }
    fields_a.iter().all(|(name, value_a)| {
        fields_b
            .iter()
            .find(|(other, _)| other == name)
            .is_some_and(|(_, value_b)| are_equal(*value_a, *value_b))
    })
}
