//! Constructors and accessors for the binding error types.

use super::{BindError, BoxError, CodecError, FieldError, InputErrors, UnusedFields};
use crate::value::ValueKind;

impl FieldError {
    /// Builds a [`FieldError::Mismatch`] for a value of kind `from`.
    #[must_use]
    pub const fn mismatch(from: ValueKind, to: &'static str) -> Self {
        Self::Mismatch { from, to }
    }

    /// Wraps an arbitrary error raised by a custom option.
    pub fn custom(error: impl Into<BoxError>) -> Self {
        Self::Custom(error.into())
    }
}

impl BindError {
    /// Per-field errors, when binding failed on field values.
    #[must_use]
    pub const fn input_errors(&self) -> Option<&InputErrors> {
        match self {
            Self::Input(errors) => Some(errors),
            _ => None,
        }
    }

    /// Unmatched keys, when binding succeeded but left body keys unused.
    #[must_use]
    pub const fn unused_fields(&self) -> Option<&UnusedFields> {
        match self {
            Self::Unused(unused) => Some(unused),
            _ => None,
        }
    }

    /// Whether the only problem was unmatched body keys.
    ///
    /// Every field is already populated when this returns `true`.
    #[must_use]
    pub const fn is_unused_only(&self) -> bool {
        matches!(self, Self::Unused(_))
    }
}

impl CodecError {
    /// Whether no codec could classify the content type.
    ///
    /// Self-describing records receive the raw body in this case.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedContentType { .. })
    }

    pub(crate) fn decode(content_type: &str, source: impl Into<BoxError>) -> Self {
        Self::Decode {
            content_type: content_type.to_owned(),
            source: source.into(),
        }
    }
}

impl From<InputErrors> for BindError {
    fn from(errors: InputErrors) -> Self {
        Self::Input(errors)
    }
}

impl From<UnusedFields> for BindError {
    fn from(unused: UnusedFields) -> Self {
        Self::Unused(unused)
    }
}
