use std::fmt;
use std::mem::MaybeUninit;

use select_core::{cast_mut, cast_ref, Select, Selector, TypeUnion};

/// Untyped storage for one alternative of `L` at a time.
///
/// The storage itself does not know which alternative it holds, and it never drops
/// anything on its own: that is tracked by the discriminant of the owning
/// [`Variant`](crate::Variant). Every typed accessor is therefore `unsafe`.
pub struct Storage<L: TypeUnion> {
    data: MaybeUninit<L::Union>,
}

impl<L: TypeUnion> Storage<L> {
    /// Creates storage holding `value`, the alternative at position `S`.
    #[inline]
    pub(crate) fn new<S>(value: <L as Select<S>>::Output) -> Self
    where
        S: Selector,
        L: Select<S>,
    {
        let mut storage = Self::vacant();
        unsafe { storage.construct::<S>(value) };
        storage
    }

    /// Creates storage holding `value`, located by its type alone.
    ///
    /// # Safety
    ///
    /// `T` must be one of the alternatives of `L`.
    #[inline]
    pub(crate) unsafe fn new_as<T>(value: T) -> Self {
        let mut storage = Self::vacant();
        storage.data.as_mut_ptr().cast::<T>().write(value);
        storage
    }

    #[inline]
    fn vacant() -> Self {
        Self {
            data: MaybeUninit::uninit(),
        }
    }

    /// Writes `value` into the storage.
    ///
    /// # Safety
    ///
    /// The storage must not hold a live value, or that value is leaked.
    #[inline]
    pub(crate) unsafe fn construct<S>(&mut self, value: <L as Select<S>>::Output)
    where
        S: Selector,
        L: Select<S>,
    {
        self.data
            .as_mut_ptr()
            .cast::<<L as Select<S>>::Output>()
            .write(value);
    }

    /// Drops the alternative at position `which` in place.
    ///
    /// # Safety
    ///
    /// The storage must hold a live value of the alternative at `which`.
    /// Afterwards it holds nothing.
    #[inline]
    pub(crate) unsafe fn destroy(&mut self, which: usize) {
        L::drop_at(which, self.data.as_mut_ptr());
    }

    /// Moves the alternative at position `S` out of the storage.
    ///
    /// # Safety
    ///
    /// The storage must hold a live value of the alternative at `S`.
    /// Afterwards it holds nothing.
    #[inline]
    pub(crate) unsafe fn take<S>(&mut self) -> <L as Select<S>>::Output
    where
        S: Selector,
        L: Select<S>,
    {
        self.data
            .as_ptr()
            .cast::<<L as Select<S>>::Output>()
            .read()
    }

    /// Returns the alternative at position `S`, without checking it's live.
    ///
    /// # Safety
    ///
    /// The storage must hold a live value of the alternative at `S`.
    #[inline]
    pub unsafe fn get_unchecked<S>(&self) -> &<L as Select<S>>::Output
    where
        S: Selector,
        L: Select<S>,
    {
        self.assume()
    }

    /// Mutable version of [`Storage::get_unchecked`].
    ///
    /// # Safety
    ///
    /// The storage must hold a live value of the alternative at `S`.
    #[inline]
    pub unsafe fn get_unchecked_mut<S>(&mut self) -> &mut <L as Select<S>>::Output
    where
        S: Selector,
        L: Select<S>,
    {
        self.assume_mut()
    }

    /// Reinterprets the storage as a `T`.
    ///
    /// # Safety
    ///
    /// The storage must hold a live `T`.
    #[inline]
    pub unsafe fn assume<T>(&self) -> &T {
        cast_ref(&self.data)
    }

    /// Mutable version of [`Storage::assume`].
    ///
    /// # Safety
    ///
    /// The storage must hold a live `T`.
    #[inline]
    pub unsafe fn assume_mut<T>(&mut self) -> &mut T {
        cast_mut(&mut self.data)
    }
}

impl<L: TypeUnion> fmt::Debug for Storage<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage")
            .field("size", &std::mem::size_of::<L::Union>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use select_core::{I0, I1};
    use std::mem::{align_of, size_of};

    #[test]
    fn footprint_is_the_largest_alternative() {
        type L = (u8, [u32; 5], u64);

        assert!(size_of::<Storage<L>>() >= size_of::<[u32; 5]>());
        assert!(size_of::<Storage<L>>() <= size_of::<[u32; 5]>() + align_of::<u64>());
        assert_eq!(align_of::<Storage<L>>(), align_of::<u64>());
    }

    #[test]
    fn construct_get_destroy() {
        let mut storage = Storage::<(u32, String)>::new::<I1>(String::from("hello"));

        unsafe {
            storage.get_unchecked_mut::<I1>().push_str(" world");
            assert_eq!(storage.get_unchecked::<I1>(), "hello world");

            storage.destroy(1);
            storage.construct::<I0>(7);
            assert_eq!(*storage.get_unchecked::<I0>(), 7);
            assert_eq!(*storage.assume::<u32>(), 7);
        }
    }

    #[test]
    fn take_moves_the_value_out() {
        let mut storage = Storage::<(u32, Vec<u8>)>::new::<I1>(vec![1, 2, 3]);

        let taken = unsafe { storage.take::<I1>() };
        assert_eq!(taken, vec![1, 2, 3]);
    }
}
