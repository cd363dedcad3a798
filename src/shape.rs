//! The structural-reflection contract: every key type presents its runtime
//! shape as a primitive or a type-tagged record of named fields.

use std::rc::Rc;
use std::sync::Arc;

/// The runtime shape of a value, as seen by the structural hash and
/// equality functions.
///
/// Borrowed views only: producing a `Shape` never clones field data. A
/// composite lists its fields in declaration order (not sorted); that order
/// is part of the hash but irrelevant to equality.
pub enum Shape<'a> {
    /// Null/undefined/unit. `()` and `Option::None` present this.
    Absent,
    Bool(bool),
    /// Single numeric kind; integer types widen to `f64` (exact for
    /// magnitudes up to 2^53).
    Num(f64),
    Text(&'a str),
    /// Opaque-identifier kind: hashes like text, but is a distinct kind so
    /// a symbol never equals a plain string.
    Symbol(&'a str),
    /// Unrepresentable values (callables, handles). The `usize` is an
    /// identity cookie: equality compares cookies, the hash contribution is
    /// the constant 0.
    Opaque(usize),
    /// A record: type tag plus named fields in declaration order.
    Composite {
        tag: &'a str,
        fields: Vec<(&'a str, &'a dyn Structural)>,
    },
}

/// Types that expose a structural shape.
///
/// Two values of possibly different Rust types are structurally equal when
/// their shapes match recursively (see [`crate::are_equal`]). Implement
/// this by hand, or use `#[derive(Structural)]` with the `derive` feature
/// to generate the composite shape from a struct or enum definition.
pub trait Structural {
    fn shape(&self) -> Shape<'_>;
}

impl Structural for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

macro_rules! impl_structural_num {
    ($($t:ty),*) => {
        $(impl Structural for $t {
            fn shape(&self) -> Shape<'_> {
                Shape::Num(*self as f64)
            }
        })*
    };
}

impl_structural_num!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Structural for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }
}

impl Structural for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Text(self)
    }
}

impl Structural for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Absent
    }
}

/// `None` is the absent value; `Some` is transparent.
impl<T: Structural> Structural for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            None => Shape::Absent,
            Some(value) => value.shape(),
        }
    }
}

impl<'b, T: Structural + ?Sized> Structural for &'b T {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structural + ?Sized> Structural for Box<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structural + ?Sized> Structural for Rc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T: Structural + ?Sized> Structural for Arc<T> {
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

/// An interned-identifier wrapper presenting [`Shape::Symbol`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Symbol(name.into())
    }
}

impl Structural for Symbol {
    fn shape(&self) -> Shape<'_> {
        Shape::Symbol(&self.0)
    }
}
