//! Building a variant from a variant over a subset of its alternatives.
//!
//! The live value is located in the wider list by its `TypeId`, so the narrower list may
//! name its alternatives in any order.

use std::any::type_name;
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr;

use select_core::{TypeIds, TypeUnion};

use crate::dispatch::{Dispatch, Visit, Visitor};
use crate::error::VariantError;
use crate::storage::Storage;
use crate::variant::Variant;

fn position_in<L: TypeIds, T: 'static>() -> Result<usize, VariantError> {
    L::position::<T>().ok_or(VariantError::NotAnAlternative {
        name: type_name::<T>(),
        count: L::COUNT,
    })
}

/// Clones the visited alternative into a variant over `L`.
pub struct Widen<L>(PhantomData<L>);

impl<L: TypeUnion> Visitor for Widen<L> {
    type Output = Result<Variant<L>, VariantError>;
}

impl<L: TypeIds, T: Clone + 'static> Visit<T> for Widen<L> {
    fn visit(&mut self, value: &T) -> Result<Variant<L>, VariantError> {
        let which = position_in::<L, T>()?;
        Ok(unsafe { Variant::from_parts(which, Storage::new_as(value.clone())) })
    }
}

/// Moves the visited alternative into a variant over `L`.
///
/// Only [`Variant::widen`] builds one, and it forgets the source once the value has been
/// read out.
pub struct Relocate<L>(PhantomData<L>);

impl<L: TypeUnion> Visitor for Relocate<L> {
    type Output = Option<Variant<L>>;
}

impl<L: TypeIds, T: 'static> Visit<T> for Relocate<L> {
    fn visit(&mut self, value: &T) -> Option<Variant<L>> {
        let which = L::position::<T>()?;
        Some(unsafe { Variant::from_parts(which, Storage::new_as(ptr::read(value))) })
    }
}

impl<L: TypeIds> Variant<L> {
    /// Creates a variant holding a clone of the live value of `sub`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::NotAnAlternative`] if the live type of `sub` is not one of
    /// the alternatives of `L`.
    ///
    /// # Examples
    /// ```
    /// use unionvariant::Variant;
    ///
    /// let narrow: Variant<(u8, String)> = Variant::new(String::from("wide"));
    /// let wide = Variant::<(i64, String, u8)>::widen_from(&narrow);
    ///
    /// assert_eq!(wide.map(|v| v.which()), Ok(1));
    /// ```
    pub fn widen_from<Sub>(sub: &Variant<Sub>) -> Result<Self, VariantError>
    where
        Sub: TypeUnion + Dispatch<Widen<L>>,
    {
        sub.apply(Widen(PhantomData))
    }

    /// Moves the live value of `sub` into a variant over `L`, or hands `sub` back if its
    /// live type is not one of the alternatives of `L`.
    pub fn widen<Sub>(sub: Variant<Sub>) -> Result<Self, Variant<Sub>>
    where
        Sub: TypeUnion + Dispatch<Relocate<L>>,
    {
        let sub = ManuallyDrop::new(sub);
        match sub.apply(Relocate(PhantomData)) {
            Some(widened) => Ok(widened),
            None => Err(ManuallyDrop::into_inner(sub)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn widen_from_copies_into_the_matching_position() {
        let narrow: Variant<(u8, String)> = Variant::new(String::from("kept"));

        let wide = Variant::<(i64, String, u8)>::widen_from(&narrow);
        let wide = match wide {
            Ok(wide) => wide,
            Err(error) => panic!("unexpected {}", error),
        };

        assert_eq!(wide.which(), 1);
        assert_eq!(wide.get::<String, _>().map(String::as_str), Ok("kept"));
        assert_eq!(narrow.get::<String, _>().map(String::as_str), Ok("kept"));
    }

    #[test]
    fn widen_from_rejects_a_missing_type() {
        let narrow: Variant<(u8, bool)> = Variant::new(true);

        match Variant::<(u8, String)>::widen_from(&narrow) {
            Err(VariantError::NotAnAlternative { name, count }) => {
                assert_eq!(name, "bool");
                assert_eq!(count, 2);
            }
            Err(other) => panic!("unexpected {}", other),
            Ok(_) => panic!("bool is not an alternative"),
        }

        let narrow: Variant<(u8, bool)> = Variant::new(3u8);
        let wide = Variant::<(u8, String)>::widen_from(&narrow).map(|v| v.which());
        assert_eq!(wide, Ok(0));
    }

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn widen_moves_without_dropping() {
        let drops = Rc::new(Cell::new(0));
        let narrow: Variant<(Tracked, u8)> = Variant::new(Tracked(Rc::clone(&drops)));

        let wide = match Variant::<(u16, Tracked)>::widen(narrow) {
            Ok(wide) => wide,
            Err(_) => panic!("Tracked is an alternative"),
        };
        assert_eq!(wide.which(), 1);
        assert_eq!(drops.get(), 0);

        drop(wide);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn widen_hands_back_a_missing_type() {
        let narrow: Variant<(u8, char)> = Variant::new('x');

        match Variant::<(u8, String)>::widen(narrow) {
            Ok(_) => panic!("char is not an alternative"),
            Err(narrow) => assert_eq!(narrow.get::<char, _>(), Ok(&'x')),
        }
    }
}
