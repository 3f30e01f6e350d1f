use std::borrow::{Borrow, BorrowMut};
use std::fmt;
use std::ops::{Deref, DerefMut};

use select_core::{Contains, Selector, TypeUnion};

use crate::error::VariantError;
use crate::variant::Variant;

/// A heap allocated alternative, so that an alternative can mention the variant it's
/// part of.
///
/// Cloning deep-copies the boxed value, keeping value semantics for the whole variant.
///
/// The wrapper stays visible: visitors implement `Visit<Recursive<T>>`, and checked access
/// names `Recursive<T>` unless it goes through [`Variant::get_inner`]. `Deref` makes the
/// wrapped value reachable everywhere else.
///
/// # Examples
/// ```
/// use unionvariant::{Recursive, Variant};
///
/// #[derive(Clone)]
/// struct Neg(Expr);
///
/// type Expr = Variant<(i64, Recursive<Neg>)>;
///
/// let e: Expr = Variant::new(Recursive::new(Neg(Variant::new(4i64))));
/// let inner = e.get::<Recursive<Neg>, _>().map(|neg| neg.0.which());
/// assert_eq!(inner, Ok(0));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Recursive<T> {
    data: Box<T>,
}

impl<T> Recursive<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            data: Box::new(value),
        }
    }

    /// Unboxes the value.
    #[inline]
    pub fn into_inner(self) -> T {
        *self.data
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.data
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T> From<T> for Recursive<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Deref for Recursive<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for Recursive<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T> Borrow<T> for Recursive<T> {
    fn borrow(&self) -> &T {
        &self.data
    }
}

impl<T> BorrowMut<T> for Recursive<T> {
    fn borrow_mut(&mut self) -> &mut T {
        &mut self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deref().fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Recursive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.deref().fmt(f)
    }
}

impl<L: TypeUnion> Variant<L> {
    /// Returns the value inside a live `Recursive<T>`.
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    #[inline]
    pub fn get_inner<T, S>(&self) -> Result<&T, VariantError>
    where
        S: Selector,
        L: Contains<Recursive<T>, S>,
    {
        self.get::<Recursive<T>, S>().map(Recursive::get)
    }

    /// Mutable version of [`Variant::get_inner`].
    ///
    /// # Errors
    ///
    /// Returns [`VariantError::TypeMismatch`] if another alternative is live.
    #[inline]
    pub fn get_inner_mut<T, S>(&mut self) -> Result<&mut T, VariantError>
    where
        S: Selector,
        L: Contains<Recursive<T>, S>,
    {
        self.get_mut::<Recursive<T>, S>().map(Recursive::get_mut)
    }
}
