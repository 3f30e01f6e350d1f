//! Visitation of the live alternative.
//!
//! A visitor is any type implementing [`Visit<T>`] for every alternative `T` of a list,
//! all sharing one [`Visitor::Output`]. For each pair of alternative list and visitor
//! type there is one constant table of thunks, one per alternative. Dispatching indexes
//! that table with the discriminant and makes a single indirect call.

use std::marker::PhantomData;

use select_core::*;

use crate::storage::Storage;

/// The part of a visitor that doesn't depend on the visited type.
pub trait Visitor {
    /// What visiting any alternative returns.
    type Output;
}

/// Visits a shared reference to a `T`.
pub trait Visit<T: ?Sized>: Visitor {
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Visits a mutable reference to a `T`.
pub trait VisitMut<T: ?Sized>: Visitor {
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

/// Visits the live alternatives of two variants at once.
pub trait Visit2<T: ?Sized, U: ?Sized>: Visitor {
    fn visit2(&mut self, left: &T, right: &U) -> Self::Output;
}

impl<V: Visitor + ?Sized> Visitor for &mut V {
    type Output = V::Output;
}

impl<T: ?Sized, V: Visit<T> + ?Sized> Visit<T> for &mut V {
    #[inline]
    fn visit(&mut self, value: &T) -> Self::Output {
        (**self).visit(value)
    }
}

impl<T: ?Sized, V: VisitMut<T> + ?Sized> VisitMut<T> for &mut V {
    #[inline]
    fn visit_mut(&mut self, value: &mut T) -> Self::Output {
        (**self).visit_mut(value)
    }
}

impl<T: ?Sized, U: ?Sized, V: Visit2<T, U> + ?Sized> Visit2<T, U> for &mut V {
    #[inline]
    fn visit2(&mut self, left: &T, right: &U) -> Self::Output {
        (**self).visit2(left, right)
    }
}

/// Read-only dispatch of `V` over every alternative of the list.
pub trait Dispatch<V: Visitor>: TypeUnion {
    /// Calls `visitor` with the alternative at position `which`.
    ///
    /// # Safety
    ///
    /// `storage` must hold a live value of the alternative at `which`.
    unsafe fn dispatch(which: usize, storage: &Storage<Self>, visitor: V) -> V::Output;
}

/// Mutable dispatch of `V` over every alternative of the list.
pub trait DispatchMut<V: Visitor>: TypeUnion {
    /// Calls `visitor` with the alternative at position `which`.
    ///
    /// # Safety
    ///
    /// `storage` must hold a live value of the alternative at `which`.
    unsafe fn dispatch_mut(which: usize, storage: &mut Storage<Self>, visitor: V) -> V::Output;
}

type Thunk<L, V> = unsafe fn(&Storage<L>, V) -> <V as Visitor>::Output;
type ThunkMut<L, V> = unsafe fn(&mut Storage<L>, V) -> <V as Visitor>::Output;

unsafe fn visit_thunk<L, S, V>(storage: &Storage<L>, mut visitor: V) -> V::Output
where
    L: Select<S>,
    S: Selector,
    V: Visit<<L as Select<S>>::Output>,
{
    visitor.visit(storage.get_unchecked::<S>())
}

unsafe fn visit_mut_thunk<L, S, V>(storage: &mut Storage<L>, mut visitor: V) -> V::Output
where
    L: Select<S>,
    S: Selector,
    V: VisitMut<<L as Select<S>>::Output>,
{
    visitor.visit_mut(storage.get_unchecked_mut::<S>())
}

/// Thunk tables, one instance per (alternative list, visitor) pair.
///
/// Callers take the tables by reference, so every call site reads the same promoted
/// constant.
struct Table<L, V>(PhantomData<(L, V)>);

macro_rules! impl_dispatch {
    ($count:expr; $list:ty; $($generic:ident => $selector:ident),*) => (
        impl<$($generic,)* V> Table<($($generic,)*), V>
        where
            V: Visitor $(+ Visit<$generic>)*,
        {
            const THUNKS: [Thunk<($($generic,)*), V>; $count] = [
                $(visit_thunk::<$list, $selector, V>),*
            ];
        }

        impl<$($generic,)* V> Table<($($generic,)*), V>
        where
            V: Visitor $(+ VisitMut<$generic>)*,
        {
            const THUNKS_MUT: [ThunkMut<($($generic,)*), V>; $count] = [
                $(visit_mut_thunk::<$list, $selector, V>),*
            ];
        }

        impl<$($generic,)* V> Dispatch<V> for ($($generic,)*)
        where
            V: Visitor $(+ Visit<$generic>)*,
        {
            #[inline]
            unsafe fn dispatch(which: usize, storage: &Storage<Self>, visitor: V) -> V::Output {
                let thunks: &[Thunk<Self, V>; $count] = &Table::<Self, V>::THUNKS;
                thunks[which](storage, visitor)
            }
        }

        impl<$($generic,)* V> DispatchMut<V> for ($($generic,)*)
        where
            V: Visitor $(+ VisitMut<$generic>)*,
        {
            #[inline]
            unsafe fn dispatch_mut(which: usize, storage: &mut Storage<Self>, visitor: V) -> V::Output {
                let thunks: &[ThunkMut<Self, V>; $count] = &Table::<Self, V>::THUNKS_MUT;
                thunks[which](storage, visitor)
            }
        }
    )
}

impl_dispatch!(2; (A, B); A => I0, B => I1);
impl_dispatch!(3; (A, B, C); A => I0, B => I1, C => I2);
impl_dispatch!(4; (A, B, C, D); A => I0, B => I1, C => I2, D => I3);
impl_dispatch!(5; (A, B, C, D, E); A => I0, B => I1, C => I2, D => I3, E => I4);
impl_dispatch!(6; (A, B, C, D, E, F); A => I0, B => I1, C => I2, D => I3, E => I4, F => I5);
impl_dispatch!(7; (A, B, C, D, E, F, G); A => I0, B => I1, C => I2, D => I3, E => I4, F => I5, G => I6);
impl_dispatch!(8; (A, B, C, D, E, F, G, H); A => I0, B => I1, C => I2, D => I3, E => I4, F => I5, G => I6, H => I7);
impl_dispatch!(9; (A, B, C, D, E, F, G, H, I); A => I0, B => I1, C => I2, D => I3, E => I4, F => I5, G => I6, H => I7, I => I8);
impl_dispatch!(10; (A, B, C, D, E, F, G, H, I, J); A => I0, B => I1, C => I2, D => I3, E => I4, F => I5, G => I6, H => I7, I => I8, J => I9);

/// First half of binary dispatch: visits the left alternative while holding on to the
/// right variant's storage.
pub struct Outer<'a, R: TypeUnion, V> {
    right_which: usize,
    right: &'a Storage<R>,
    visitor: &'a mut V,
}

impl<'a, R: TypeUnion, V> Outer<'a, R, V> {
    /// # Safety
    ///
    /// `right` must hold a live value of the alternative at `right_which`.
    #[inline]
    pub(crate) unsafe fn new(right_which: usize, right: &'a Storage<R>, visitor: &'a mut V) -> Self {
        Self {
            right_which,
            right,
            visitor,
        }
    }
}

impl<'a, R: TypeUnion, V: Visitor> Visitor for Outer<'a, R, V> {
    type Output = V::Output;
}

impl<'a, T, R, V> Visit<T> for Outer<'a, R, V>
where
    R: TypeUnion + for<'b> Dispatch<Inner<'b, T, V>>,
    V: Visitor,
{
    #[inline]
    fn visit(&mut self, left: &T) -> V::Output {
        let inner = Inner {
            left,
            visitor: &mut *self.visitor,
        };
        unsafe { R::dispatch(self.right_which, self.right, inner) }
    }
}

/// Second half of binary dispatch: visits the right alternative with the left one in hand.
pub struct Inner<'b, T: ?Sized, V> {
    left: &'b T,
    visitor: &'b mut V,
}

impl<'b, T: ?Sized, V: Visitor> Visitor for Inner<'b, T, V> {
    type Output = V::Output;
}

impl<'b, T: ?Sized, U: ?Sized, V> Visit<U> for Inner<'b, T, V>
where
    V: Visit2<T, U>,
{
    #[inline]
    fn visit(&mut self, right: &U) -> V::Output {
        self.visitor.visit2(self.left, right)
    }
}
