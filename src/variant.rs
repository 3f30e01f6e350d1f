use std::marker::PhantomData;

use select_core::{Contains, I0, Select, Selector, TypeIds, TypeUnion};

use crate::dispatch::{Dispatch, DispatchMut, Outer, Visitor};
use crate::error::VariantError;
use crate::storage::Storage;

/// A tagged union over the closed list of alternatives `L`, a tuple such as `(i32, String)`.
///
/// A `Variant` always holds exactly one fully constructed alternative: there is no empty
/// or valueless state, not even after a failed replacement.
///
/// # Examples
/// ```
/// use unionvariant::Variant;
///
/// let mut v: Variant<(i32, String)> = Variant::new(5i32);
/// assert_eq!(v.which(), 0);
///
/// v.emplace(String::from("hi"));
/// assert_eq!(v.which(), 1);
/// assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hi"));
/// assert!(v.get::<i32, _>().is_err());
/// ```
pub struct Variant<L: TypeUnion> {
    pub(crate) which: u8,
    pub(crate) storage: Storage<L>,
    marker: PhantomData<L>,
}

impl<L: TypeUnion> Variant<L> {
    /// Creates a variant holding `value`.
    ///
    /// The position of `T` is inferred, and naming a type outside of `L` does not compile.
    #[inline]
    pub fn new<T, S>(value: T) -> Self
    where
        S: Selector,
        L: Contains<T, S>,
    {
        unsafe { Self::from_parts(S::INDEX, Storage::new::<S>(value)) }
    }

    /// Creates a variant from the value built by `f`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::ConstructionFailed`] with the error of `f`.
    pub fn try_new_with<T, S, E, F>(f: F) -> Result<Self, VariantError<E>>
    where
        S: Selector,
        L: Contains<T, S>,
        F: FnOnce() -> Result<T, E>,
    {
        match f() {
            Ok(value) => Ok(Self::new::<T, S>(value)),
            Err(cause) => Err(VariantError::ConstructionFailed {
                index: S::INDEX,
                cause,
            }),
        }
    }

    /// # Safety
    ///
    /// `storage` must hold a live value of the alternative at `which`.
    #[inline]
    pub(crate) unsafe fn from_parts(which: usize, storage: Storage<L>) -> Self {
        invariant!(which < L::COUNT, "discriminant {} out of range", which);
        Self {
            which: which as u8,
            storage,
            marker: PhantomData,
        }
    }

    /// Returns the position of the live alternative.
    #[inline]
    pub fn which(&self) -> usize {
        usize::from(self.which)
    }

    /// Returns the number of alternatives.
    #[inline]
    pub const fn alternative_count() -> usize {
        L::COUNT
    }

    /// Returns the type name of the live alternative.
    pub fn type_name(&self) -> &'static str {
        L::type_name(self.which()).unwrap_or("<unknown>")
    }

    /// Returns the type name of the alternative at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::InvalidAlternativeIndex`] when `index` is out of range.
    pub fn alternative_name(index: usize) -> Result<&'static str, VariantError> {
        L::type_name(index).ok_or(VariantError::InvalidAlternativeIndex {
            index,
            count: L::COUNT,
        })
    }

    /// Returns `true` if the alternative at `index` is live.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::InvalidAlternativeIndex`] when `index` is out of range.
    pub fn holds_index(&self, index: usize) -> Result<bool, VariantError> {
        if index < L::COUNT {
            Ok(index == self.which())
        } else {
            Err(VariantError::InvalidAlternativeIndex {
                index,
                count: L::COUNT,
            })
        }
    }

    /// Returns `true` if a `T` is live.
    #[inline]
    pub fn holds<T, S>(&self) -> bool
    where
        S: Selector,
        L: Contains<T, S>,
    {
        self.which() == S::INDEX
    }

    /// Returns `true` if a `T` is live, checked through `TypeId`.
    ///
    /// Unlike [`Variant::holds`], `T` doesn't have to be an alternative.
    pub fn is<T: 'static>(&self) -> bool
    where
        L: TypeIds,
    {
        L::position::<T>() == Some(self.which())
    }

    fn mismatch<S: Selector>(&self) -> VariantError {
        VariantError::TypeMismatch {
            requested: S::INDEX,
            requested_name: L::type_name(S::INDEX).unwrap_or("<unknown>"),
            live: self.which(),
            live_name: self.type_name(),
        }
    }

    /// Returns the live `T`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    #[inline]
    pub fn get<T, S>(&self) -> Result<&T, VariantError>
    where
        S: Selector,
        L: Contains<T, S>,
    {
        if self.holds::<T, S>() {
            Ok(unsafe { self.storage.get_unchecked::<S>() })
        } else {
            Err(self.mismatch::<S>())
        }
    }

    /// Returns the live `T` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    #[inline]
    pub fn get_mut<T, S>(&mut self) -> Result<&mut T, VariantError>
    where
        S: Selector,
        L: Contains<T, S>,
    {
        if self.holds::<T, S>() {
            Ok(unsafe { self.storage.get_unchecked_mut::<S>() })
        } else {
            Err(self.mismatch::<S>())
        }
    }

    /// Returns the alternative at `S` without checking it's live.
    ///
    /// # Safety
    ///
    /// The alternative at `S` must be live.
    #[inline]
    pub unsafe fn get_unchecked<S>(&self) -> &<L as Select<S>>::Output
    where
        S: Selector,
        L: Select<S>,
    {
        invariant!(self.which() == S::INDEX, "unchecked access to a dead alternative");
        self.storage.get_unchecked::<S>()
    }

    /// Mutable version of [`Variant::get_unchecked`].
    ///
    /// # Safety
    ///
    /// The alternative at `S` must be live.
    #[inline]
    pub unsafe fn get_unchecked_mut<S>(&mut self) -> &mut <L as Select<S>>::Output
    where
        S: Selector,
        L: Select<S>,
    {
        invariant!(self.which() == S::INDEX, "unchecked access to a dead alternative");
        self.storage.get_unchecked_mut::<S>()
    }

    /// Moves the live `T` out, or hands the variant back if another alternative is live.
    pub fn into_alternative<T, S>(self) -> Result<T, Self>
    where
        S: Selector,
        L: Contains<T, S>,
    {
        if !self.holds::<T, S>() {
            return Err(self);
        }

        let mut this = std::mem::ManuallyDrop::new(self);
        Ok(unsafe { this.storage.take::<S>() })
    }

    /// Calls `visitor` with a reference to the live alternative.
    #[inline]
    pub fn apply<V>(&self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: Dispatch<V>,
    {
        unsafe { L::dispatch(self.which(), &self.storage, visitor) }
    }

    /// Calls `visitor` with a mutable reference to the live alternative.
    ///
    /// The visitor may change the value, but never which alternative is live.
    #[inline]
    pub fn apply_mut<V>(&mut self, visitor: V) -> V::Output
    where
        V: Visitor,
        L: DispatchMut<V>,
    {
        let which = self.which();
        unsafe { L::dispatch_mut(which, &mut self.storage, visitor) }
    }

    /// Calls `visitor` with the live alternatives of `self` and `other`.
    ///
    /// The [`Visit2`](crate::Visit2) implementation is selected by the ordered pair of
    /// alternatives, so `(A, B)` and `(B, A)` reach different implementations.
    #[inline]
    pub fn apply2<R, V>(&self, other: &Variant<R>, mut visitor: V) -> V::Output
    where
        R: TypeUnion,
        V: Visitor,
        L: for<'a> Dispatch<Outer<'a, R, V>>,
    {
        unsafe {
            let outer = Outer::new(other.which(), &other.storage, &mut visitor);
            L::dispatch(self.which(), &self.storage, outer)
        }
    }
}

impl<L: TypeUnion> Drop for Variant<L> {
    fn drop(&mut self) {
        let which = self.which();
        unsafe { self.storage.destroy(which) }
    }
}

impl<L> Default for Variant<L>
where
    L: Select<I0>,
    <L as Select<I0>>::Output: Default,
{
    /// Holds the default value of the first alternative.
    fn default() -> Self {
        unsafe { Self::from_parts(0, Storage::new::<I0>(Default::default())) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    type IntOrString = Variant<(i32, String)>;

    #[test]
    fn which_follows_construction() {
        assert_eq!(IntOrString::new(5i32).which(), 0);
        assert_eq!(IntOrString::new(String::from("x")).which(), 1);
        assert_eq!(IntOrString::default().which(), 0);
        assert_eq!(IntOrString::alternative_count(), 2);
    }

    #[test]
    fn checked_access() {
        let mut v = IntOrString::new(String::from("abc"));

        assert_eq!(v.get::<String, _>().map(String::as_str), Ok("abc"));
        v.get_mut::<String, _>().map(|s| s.push('d')).ok();
        assert_eq!(v.get::<String, _>().map(String::len), Ok(4));

        match v.get::<i32, _>() {
            Err(VariantError::TypeMismatch {
                requested, live, ..
            }) => {
                assert_eq!(requested, 0);
                assert_eq!(live, 1);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn runtime_indices_are_range_checked() {
        let v = IntOrString::new(1i32);

        assert_eq!(v.holds_index(0), Ok(true));
        assert_eq!(v.holds_index(1), Ok(false));
        assert_eq!(
            v.holds_index(2),
            Err(VariantError::InvalidAlternativeIndex { index: 2, count: 2 })
        );
        assert_eq!(IntOrString::alternative_name(0), Ok("i32"));
        assert!(IntOrString::alternative_name(7).is_err());
    }

    #[test]
    fn type_id_queries() {
        let v = IntOrString::new(1i32);

        assert!(v.is::<i32>());
        assert!(!v.is::<String>());
        assert!(!v.is::<u64>());
        assert_eq!(v.type_name(), "i32");
    }

    #[test]
    fn into_alternative_moves_out_or_gives_back() {
        let v = IntOrString::new(String::from("owned"));

        let v = match v.into_alternative::<i32, _>() {
            Ok(_) => panic!("i32 is not live"),
            Err(v) => v,
        };
        assert_eq!(v.into_alternative::<String, _>().ok(), Some(String::from("owned")));
    }

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drops_exactly_the_live_alternative_once() {
        let drops = Rc::new(Cell::new(0));

        {
            let _v: Variant<(u8, Tracked)> = Variant::new(Tracked(Rc::clone(&drops)));
        }
        assert_eq!(drops.get(), 1);

        let v: Variant<(u8, Tracked)> = Variant::new(Tracked(Rc::clone(&drops)));
        let tracked = v.into_alternative::<Tracked, _>().ok();
        assert_eq!(drops.get(), 1);
        drop(tracked);
        assert_eq!(drops.get(), 2);
    }
}
