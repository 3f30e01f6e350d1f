//! Comparisons between variants over the same alternatives.
//!
//! Variants compare by discriminant first. Only when both hold the same alternative are
//! the values themselves compared, so the ordering is the concatenation of the orderings
//! of each alternative.

use std::cmp::Ordering;

use select_core::TypeUnion;

use crate::dispatch::{Dispatch, Visit, Visitor};
use crate::storage::Storage;
use crate::variant::Variant;

/// Compares the visited alternative with the same alternative of another variant.
pub struct EqVisitor<'a, L: TypeUnion> {
    other: &'a Storage<L>,
}

impl<'a, L: TypeUnion> Visitor for EqVisitor<'a, L> {
    type Output = bool;
}

impl<'a, L: TypeUnion, T: PartialEq> Visit<T> for EqVisitor<'a, L> {
    #[inline]
    fn visit(&mut self, value: &T) -> bool {
        // Only built once both discriminants are known to be equal.
        value == unsafe { self.other.assume::<T>() }
    }
}

/// Holds for lists whose alternatives are all `Eq`.
pub struct EqWitness;

impl Visitor for EqWitness {
    type Output = ();
}

impl<T: Eq> Visit<T> for EqWitness {
    #[inline]
    fn visit(&mut self, _: &T) {}
}

/// Partially orders the visited alternative against the same alternative of another
/// variant.
pub struct PartialCmpVisitor<'a, L: TypeUnion> {
    other: &'a Storage<L>,
}

impl<'a, L: TypeUnion> Visitor for PartialCmpVisitor<'a, L> {
    type Output = Option<Ordering>;
}

impl<'a, L: TypeUnion, T: PartialOrd> Visit<T> for PartialCmpVisitor<'a, L> {
    #[inline]
    fn visit(&mut self, value: &T) -> Option<Ordering> {
        value.partial_cmp(unsafe { self.other.assume::<T>() })
    }
}

/// Orders the visited alternative against the same alternative of another variant.
pub struct CmpVisitor<'a, L: TypeUnion> {
    other: &'a Storage<L>,
}

impl<'a, L: TypeUnion> Visitor for CmpVisitor<'a, L> {
    type Output = Ordering;
}

impl<'a, L: TypeUnion, T: Ord> Visit<T> for CmpVisitor<'a, L> {
    #[inline]
    fn visit(&mut self, value: &T) -> Ordering {
        value.cmp(unsafe { self.other.assume::<T>() })
    }
}

impl<L> PartialEq for Variant<L>
where
    L: TypeUnion + for<'a> Dispatch<EqVisitor<'a, L>>,
{
    fn eq(&self, other: &Self) -> bool {
        self.which == other.which
            && self.apply(EqVisitor {
                other: &other.storage,
            })
    }
}

impl<L> Eq for Variant<L> where L: Dispatch<EqWitness> + for<'a> Dispatch<EqVisitor<'a, L>> {}

impl<L> PartialOrd for Variant<L>
where
    L: TypeUnion + for<'a> Dispatch<EqVisitor<'a, L>> + for<'a> Dispatch<PartialCmpVisitor<'a, L>>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.which.cmp(&other.which) {
            Ordering::Equal => self.apply(PartialCmpVisitor {
                other: &other.storage,
            }),
            unequal => Some(unequal),
        }
    }
}

impl<L> Ord for Variant<L>
where
    Self: Eq + PartialOrd,
    L: TypeUnion + for<'a> Dispatch<CmpVisitor<'a, L>>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.which.cmp(&other.which).then_with(|| {
            self.apply(CmpVisitor {
                other: &other.storage,
            })
        })
    }
}
