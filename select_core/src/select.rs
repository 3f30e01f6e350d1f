use std::any::{type_name, TypeId};
use std::ptr;

/// Reinterprets a reference to `T` as a reference to `U`.
///
/// # Safety
///
/// `t_ref` must point to a live, properly aligned `U`.
#[inline]
pub unsafe fn cast_ref<'a, T: 'a, U: 'a>(t_ref: &'a T) -> &'a U {
    &*(t_ref as *const T as *const U)
}

/// Reinterprets a mutable reference to `T` as a mutable reference to `U`.
///
/// # Safety
///
/// `t_ref` must point to a live, properly aligned `U`.
#[inline]
pub unsafe fn cast_mut<'a, T: 'a, U: 'a>(t_ref: &'a mut T) -> &'a mut U {
    &mut *(t_ref as *mut T as *mut U)
}

/// Helper trait to index into a tuple of Generics.
pub trait Selector {
    /// Zero based position this selector points at.
    const INDEX: usize;
}

/// A closed list of alternative types, together with the untagged storage able to hold
/// any one of them.
///
/// # Safety
///
/// `Union` must be sized and aligned for every alternative, with every alternative stored
/// at offset 0. `COUNT` must be the number of alternatives, and `drop_at(i, _)` must drop
/// the alternative at position `i`.
pub unsafe trait TypeUnion: Sized {
    /// Storage for one alternative at a time.
    type Union;

    /// Number of alternatives in the list.
    const COUNT: usize;

    /// Drops the alternative at position `which` in place.
    ///
    /// # Safety
    ///
    /// `union` must hold a live value of the alternative at position `which`.
    /// After this call the storage holds no live value.
    unsafe fn drop_at(which: usize, union: *mut Self::Union);

    /// Returns the name of the alternative at position `which`,
    /// or `None` when `which` is not smaller than [`TypeUnion::COUNT`].
    fn type_name(which: usize) -> Option<&'static str>;
}

/// Helper trait to 'select' a generic type out of a tuple of Generics.
///
/// # Safety
///
/// `Output` must be the alternative at position `S::INDEX` of the list.
pub unsafe trait Select<S: Selector>: TypeUnion {
    /// The selected generic.
    type Output;
}

/// Marks `T` as the alternative at position `S`.
///
/// Unlike [`Select`], the type is a parameter here, so the position can be inferred from
/// the type whenever it occurs exactly once in the list.
pub trait Contains<T, S: Selector>: Select<S, Output = T> {}

/// Runtime type queries over a list of `'static` alternatives.
pub trait TypeIds: TypeUnion {
    /// Returns the position of `T` in the list, if it's one of the alternatives.
    fn position<T: 'static>() -> Option<usize>;

    /// Returns `true` if T is one of the types of the tuple, false otherwise.
    #[inline]
    fn contains<T: 'static>() -> bool {
        Self::position::<T>().is_some()
    }
}

/// Drops the `T` stored at the start of `union`.
///
/// # Safety
///
/// `union` must hold a live `T` at offset 0.
#[inline]
pub(crate) unsafe fn drop_as<U, T>(union: *mut U) {
    ptr::drop_in_place(union.cast::<T>());
}

#[inline]
pub(crate) fn name_of<T>() -> &'static str {
    type_name::<T>()
}

#[inline]
pub(crate) fn id_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}
