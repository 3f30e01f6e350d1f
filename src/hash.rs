use std::hash::{Hash, Hasher};

use select_core::TypeUnion;

use crate::dispatch::{Dispatch, Visit, Visitor};
use crate::variant::Variant;

/// Feeds the visited alternative into a hasher.
pub struct HashVisitor<'a> {
    state: &'a mut dyn Hasher,
}

impl<'a> Visitor for HashVisitor<'a> {
    type Output = ();
}

impl<'a, T: Hash> Visit<T> for HashVisitor<'a> {
    #[inline]
    fn visit(&mut self, value: &T) {
        value.hash(&mut self.state);
    }
}

/// Hashes the discriminant, then the live value, so equal values held as different
/// alternatives hash apart.
impl<L> Hash for Variant<L>
where
    L: TypeUnion + for<'a> Dispatch<HashVisitor<'a>>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.which().hash(state);
        self.apply(HashVisitor { state });
    }
}
