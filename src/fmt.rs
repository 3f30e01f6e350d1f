use std::fmt;

use select_core::TypeUnion;

use crate::dispatch::{Dispatch, Visit, Visitor};
use crate::variant::Variant;

/// Formats the visited alternative with `Debug`.
pub struct DebugVisitor<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Visitor for DebugVisitor<'a, 'b> {
    type Output = fmt::Result;
}

impl<'a, 'b, T: fmt::Debug> Visit<T> for DebugVisitor<'a, 'b> {
    #[inline]
    fn visit(&mut self, value: &T) -> fmt::Result {
        value.fmt(self.f)
    }
}

/// Formats the visited alternative with `Display`.
pub struct DisplayVisitor<'a, 'b> {
    f: &'a mut fmt::Formatter<'b>,
}

impl<'a, 'b> Visitor for DisplayVisitor<'a, 'b> {
    type Output = fmt::Result;
}

impl<'a, 'b, T: fmt::Display> Visit<T> for DisplayVisitor<'a, 'b> {
    #[inline]
    fn visit(&mut self, value: &T) -> fmt::Result {
        value.fmt(self.f)
    }
}

impl<L> fmt::Debug for Variant<L>
where
    L: TypeUnion + for<'a, 'b> Dispatch<DebugVisitor<'a, 'b>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.apply(DebugVisitor { f })
    }
}

impl<L> fmt::Display for Variant<L>
where
    L: TypeUnion + for<'a, 'b> Dispatch<DisplayVisitor<'a, 'b>>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.apply(DisplayVisitor { f })
    }
}
