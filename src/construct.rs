//! Construction sources and the strategy each one is committed with.
//!
//! Replacing the live alternative of a [`Variant`](crate::Variant) happens in one of two
//! ways. With [`Strategy::Direct`] the old value is dropped first and the new one is built
//! straight into the storage, which only works when neither can fail. With
//! [`Strategy::Fallback`] the new value is complete before the storage is touched; it is
//! swapped in and the old value is dropped afterwards.
//!
//! Every shipped source falls back. A value that already exists, or a bitwise copy, is
//! complete at no cost, and swapping it in survives a panicking destructor of the value
//! it replaces. Which strategy applies is a property of the source, so the policy is
//! open: implement [`Construct`] for your own source type and pick its strategy.

use std::convert::Infallible;

/// How a new alternative is committed into a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Drop the old value, then construct the new one in place.
    ///
    /// A source declaring this must neither panic nor return `Err` from
    /// [`Construct::construct`], and the replaced alternative must not panic on drop.
    /// If either happens anyway, the process aborts, since the variant would otherwise
    /// be left without a value.
    Direct,
    /// Construct the new value aside, swap it in, then drop the old value.
    Fallback,
}

/// A recipe for a value of type `T`.
pub trait Construct<T>: Sized {
    /// Error returned when the value can't be built.
    type Error;

    /// The strategy used to commit the value into a variant.
    const STRATEGY: Strategy;

    /// Builds the value.
    fn construct(self) -> Result<T, Self::Error>;
}

/// An already built value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Value<T>(pub T);

impl<T> Construct<T> for Value<T> {
    type Error = Infallible;

    const STRATEGY: Strategy = Strategy::Fallback;

    #[inline]
    fn construct(self) -> Result<T, Infallible> {
        Ok(self.0)
    }
}

/// A bitwise copy of a `Copy` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Copied<'a, T>(pub &'a T);

impl<'a, T: Copy> Construct<T> for Copied<'a, T> {
    type Error = Infallible;

    const STRATEGY: Strategy = Strategy::Fallback;

    #[inline]
    fn construct(self) -> Result<T, Infallible> {
        Ok(*self.0)
    }
}

/// A clone of a value. `Clone` runs arbitrary code and may panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cloned<'a, T>(pub &'a T);

impl<'a, T: Clone> Construct<T> for Cloned<'a, T> {
    type Error = Infallible;

    const STRATEGY: Strategy = Strategy::Fallback;

    #[inline]
    fn construct(self) -> Result<T, Infallible> {
        Ok(self.0.clone())
    }
}

/// A closure producing the value. It may panic.
#[derive(Debug, Clone, Copy)]
pub struct With<F>(pub F);

impl<T, F> Construct<T> for With<F>
where
    F: FnOnce() -> T,
{
    type Error = Infallible;

    const STRATEGY: Strategy = Strategy::Fallback;

    #[inline]
    fn construct(self) -> Result<T, Infallible> {
        Ok((self.0)())
    }
}

/// A fallible closure producing the value.
#[derive(Debug, Clone, Copy)]
pub struct TryWith<F>(pub F);

impl<T, E, F> Construct<T> for TryWith<F>
where
    F: FnOnce() -> Result<T, E>,
{
    type Error = E;

    const STRATEGY: Strategy = Strategy::Fallback;

    #[inline]
    fn construct(self) -> Result<T, E> {
        (self.0)()
    }
}
