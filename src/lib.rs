//! A tagged union over a closed list of types.
//!
//! [`Variant<L>`] stores one value out of the alternatives of `L`, a tuple such as
//! `(i32, String, Vec<u8>)`, in a single inline slot sized and aligned for the largest
//! of them. The live alternative is tracked by a discriminant that always names a fully
//! constructed value. Replacing the value never leaves the variant empty, not even when
//! building the new value fails or panics.
//!
//! The live value is reached through typed, checked access ([`Variant::get`]) or through
//! visitation ([`Variant::apply`]), which jumps through a constant per-visitor table of
//! thunks indexed by the discriminant.
//!
//! ```
//! use unionvariant::{Variant, Visit, Visitor};
//!
//! struct Describe;
//!
//! impl Visitor for Describe {
//!     type Output = &'static str;
//! }
//!
//! impl Visit<i32> for Describe {
//!     fn visit(&mut self, _: &i32) -> &'static str {
//!         "it's an int"
//!     }
//! }
//!
//! impl Visit<String> for Describe {
//!     fn visit(&mut self, _: &String) -> &'static str {
//!         "it's a string"
//!     }
//! }
//!
//! let v: Variant<(i32, String)> = Variant::new(5i32);
//! assert_eq!(v.apply(Describe), "it's an int");
//! ```

/// Asserts an internal invariant. Checked in debug builds, and in release builds with
/// the `strict-checks` feature.
macro_rules! invariant {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(feature = "strict-checks") {
            assert!($cond, $($arg)+);
        } else {
            debug_assert!($cond, $($arg)+);
        }
    };
}

pub mod compare;
pub mod construct;
pub mod dispatch;
pub mod error;
pub mod fmt;
pub mod hash;
mod lifecycle;
pub mod recursive;
pub mod storage;
mod variant;
mod widen;

pub use select_core::{Contains, Select, Selector, TypeIds, TypeUnion};
pub use select_core::{I0, I1, I2, I3, I4, I5, I6, I7, I8, I9};

pub use construct::{Cloned, Construct, Copied, Strategy, TryWith, Value, With};
pub use dispatch::{Dispatch, DispatchMut, Visit, Visit2, VisitMut, Visitor};
pub use error::VariantError;
pub use lifecycle::Cloner;
pub use recursive::Recursive;
pub use storage::Storage;
pub use variant::Variant;
pub use widen::{Relocate, Widen};
