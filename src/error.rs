use std::convert::Infallible;

/// Errors reported by [`Variant`](crate::Variant) operations.
///
/// `E` is the error type of a fallible construction source, see
/// [`Construct`](crate::Construct). Operations that construct nothing use the
/// default, [`Infallible`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariantError<E = Infallible> {
    /// Building the new alternative failed. The variant still holds its previous value.
    #[error("failed to construct alternative #{index}: {cause}")]
    ConstructionFailed { index: usize, cause: E },

    /// Checked access named an alternative that is not the live one.
    #[error("requested alternative #{requested} (`{requested_name}`), but #{live} (`{live_name}`) is live")]
    TypeMismatch {
        requested: usize,
        requested_name: &'static str,
        live: usize,
        live_name: &'static str,
    },

    /// A runtime index outside `[0, count)`.
    #[error("alternative index {index} is out of range for {count} alternatives")]
    InvalidAlternativeIndex { index: usize, count: usize },

    /// Widening met a live value whose type is not an alternative of the target list.
    #[error("`{name}` is not one of the {count} alternatives")]
    NotAnAlternative { name: &'static str, count: usize },
}

impl<E> VariantError<E> {
    /// Returns the construction error, if this is a [`VariantError::ConstructionFailed`].
    pub fn into_cause(self) -> Option<E> {
        match self {
            VariantError::ConstructionFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
