//! This crate describes closed lists of types at the type level.
//! A tuple `(A, B, C)` is a list of alternatives, [`index`] holds the
//! selectors that point into such a list, and [`union`] generates the
//! untagged storage that can hold any one of them.

pub mod index;
pub mod select;
pub mod union;

pub use index::*;
pub use select::{cast_mut, cast_ref, Contains, Select, Selector, TypeIds, TypeUnion};
pub use union::*;
