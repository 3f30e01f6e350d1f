//! Replacing the live alternative without ever leaving the variant empty.

use std::mem;
use std::process;

use select_core::{Contains, Selector, TypeUnion};
use tracing::{debug, error, trace};

use crate::construct::{Construct, Strategy, TryWith};
use crate::dispatch::{Dispatch, Visit, Visitor};
use crate::error::VariantError;
use crate::storage::Storage;
use crate::variant::Variant;

/// Aborts the process if dropped while armed.
///
/// Armed for exactly as long as the storage of a variant holds no live value.
struct VacantSlot {
    index: usize,
}

impl VacantSlot {
    #[inline]
    fn arm(index: usize) -> Self {
        Self { index }
    }

    #[inline]
    fn disarm(self) {
        mem::forget(self)
    }
}

impl Drop for VacantSlot {
    fn drop(&mut self) {
        error!(
            index = self.index,
            "direct construction unwound with no live alternative, aborting"
        );
        process::abort();
    }
}

impl<L: TypeUnion> Variant<L> {
    /// Replaces the live alternative with a `T` built from `source`, using the strategy
    /// the source declares, and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::ConstructionFailed`] when a fallback source fails. The
    /// variant then still holds the value it held before the call.
    pub fn emplace_from<T, S, C>(&mut self, source: C) -> Result<&mut T, VariantError<C::Error>>
    where
        S: Selector,
        L: Contains<T, S>,
        C: Construct<T>,
    {
        match C::STRATEGY {
            Strategy::Direct => self.replace_in_place::<T, S, C>(source),
            Strategy::Fallback => {
                let value = source.construct().map_err(|cause| {
                    debug!(index = S::INDEX, "construction failed, keeping the live alternative");
                    VariantError::ConstructionFailed {
                        index: S::INDEX,
                        cause,
                    }
                })?;
                self.replace_aside::<T, S>(value);
            }
        }

        invariant!(self.which() == S::INDEX, "replacement did not switch the discriminant");
        Ok(unsafe { self.storage.get_unchecked_mut::<S>() })
    }

    /// Replaces the live alternative with `value`.
    ///
    /// If dropping the previous value panics, the variant already holds `value`.
    #[inline]
    pub fn emplace<T, S>(&mut self, value: T) -> &mut T
    where
        S: Selector,
        L: Contains<T, S>,
    {
        self.replace_aside::<T, S>(value);
        unsafe { self.storage.get_unchecked_mut::<S>() }
    }

    /// Replaces the live alternative with the value built by `f`.
    ///
    /// If `f` panics the variant keeps its previous value.
    pub fn emplace_with<T, S, F>(&mut self, f: F) -> &mut T
    where
        S: Selector,
        L: Contains<T, S>,
        F: FnOnce() -> T,
    {
        let value = f();
        self.replace_aside::<T, S>(value);
        unsafe { self.storage.get_unchecked_mut::<S>() }
    }

    /// Replaces the live alternative with the value built by `f`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::ConstructionFailed`] with the error of `f`, in which case
    /// the variant keeps its previous value.
    #[inline]
    pub fn try_emplace_with<T, S, E, F>(&mut self, f: F) -> Result<&mut T, VariantError<E>>
    where
        S: Selector,
        L: Contains<T, S>,
        F: FnOnce() -> Result<T, E>,
    {
        self.emplace_from(TryWith(f))
    }

    /// Returns the live `T`, replacing the live alternative with `f()` first if needed.
    pub fn get_or_insert_with<T, S, F>(&mut self, f: F) -> &mut T
    where
        S: Selector,
        L: Contains<T, S>,
        F: FnOnce() -> T,
    {
        if self.holds::<T, S>() {
            unsafe { self.storage.get_unchecked_mut::<S>() }
        } else {
            self.emplace_with(f)
        }
    }

    /// Returns the live `T`, replacing the live alternative with `T::default()` first if
    /// needed.
    #[inline]
    pub fn get_or_default<T, S>(&mut self) -> &mut T
    where
        S: Selector,
        L: Contains<T, S>,
        T: Default,
    {
        self.get_or_insert_with(T::default)
    }

    /// Drops the live value, then constructs the new one directly in the storage.
    fn replace_in_place<T, S, C>(&mut self, source: C)
    where
        S: Selector,
        L: Contains<T, S>,
        C: Construct<T>,
    {
        let which = self.which();
        trace!(from = which, to = S::INDEX, strategy = ?Strategy::Direct, "replacing alternative");

        let vacant = VacantSlot::arm(S::INDEX);
        unsafe {
            self.storage.destroy(which);
            match source.construct() {
                Ok(value) => self.storage.construct::<S>(value),
                Err(_) => {
                    // A direct source failed after all. Dropping the armed guard aborts.
                    drop(vacant);
                    return;
                }
            }
        }
        self.which = S::INDEX as u8;
        vacant.disarm();
    }

    /// Commits a value that was constructed aside.
    #[inline]
    fn replace_aside<T, S>(&mut self, value: T)
    where
        S: Selector,
        L: Contains<T, S>,
    {
        trace!(from = self.which(), to = S::INDEX, strategy = ?Strategy::Fallback, "replacing alternative");
        self.commit(Variant::new::<T, S>(value));
    }

    /// Swaps `fresh` in, then drops the previous alternative.
    ///
    /// The previous value is dropped only once `self` is consistent again, so a panicking
    /// destructor can't leave `self` without a live value.
    #[inline]
    pub(crate) fn commit(&mut self, fresh: Self) {
        let previous = mem::replace(self, fresh);
        drop(previous);
    }
}

/// Clones the visited alternative into fresh storage.
pub struct Cloner<L>(std::marker::PhantomData<L>);

impl<L: TypeUnion> Visitor for Cloner<L> {
    type Output = Storage<L>;
}

impl<L: TypeUnion, T: Clone> Visit<T> for Cloner<L> {
    #[inline]
    fn visit(&mut self, value: &T) -> Storage<L> {
        // Dispatch only ever hands out alternatives of `L`.
        unsafe { Storage::new_as(value.clone()) }
    }
}

impl<L> Clone for Variant<L>
where
    L: TypeUnion + Dispatch<Cloner<L>>,
{
    fn clone(&self) -> Self {
        let storage = self.apply(Cloner(std::marker::PhantomData));
        unsafe { Variant::from_parts(self.which(), storage) }
    }

    /// Clones `source` aside, then commits it, so a panicking `Clone` leaves `self`
    /// unchanged.
    fn clone_from(&mut self, source: &Self) {
        self.commit(source.clone());
    }
}
