//! Built-in `required`, `default` and `immutable` options.

use super::{Candidate, FieldView, OptionArg, ReceiveKind};
use crate::error::FieldError;
use crate::value::Value;

/// Rejects a field that ends up without a value.
///
/// When the body supplied the key, only an explicit null is rejected.
/// Otherwise the field is rejected if the candidate resolves to its zero
/// value.
///
/// # Errors
///
/// Returns [`FieldError::Required`].
pub fn required(
    original: &dyn FieldView,
    candidate: Candidate,
    arg: OptionArg<'_>,
) -> Result<Candidate, FieldError> {
    if !arg.is_true() {
        return Ok(candidate);
    }
    let missing = if arg.from_input {
        candidate.is_nil()
    } else {
        candidate.resolves_to_zero(original)
    };
    if missing {
        Err(FieldError::Required)
    } else {
        Ok(candidate)
    }
}

/// Substitutes the option argument for a missing value.
///
/// An explicit null is always replaced. An absent key is replaced only when
/// the field would otherwise end up at its zero value.
///
/// # Errors
///
/// Never fails.
pub fn default(
    original: &dyn FieldView,
    candidate: Candidate,
    arg: OptionArg<'_>,
) -> Result<Candidate, FieldError> {
    let missing =
        candidate.is_nil() || (!arg.from_input && candidate.resolves_to_zero(original));
    if missing {
        Ok(Candidate::Value(Value::String(arg.value.to_owned())))
    } else {
        Ok(candidate)
    }
}

/// Rejects changes to a field that already holds a non-zero value.
///
/// Types with a plain receive hook cannot tell whether a value changes them
/// and are rejected outright. Types with a change hook are asked, on a
/// scratch copy, whether the candidate would change them.
///
/// # Errors
///
/// Returns [`FieldError::ImmutableReceiver`] or [`FieldError::Immutable`].
pub fn immutable(
    original: &dyn FieldView,
    candidate: Candidate,
    arg: OptionArg<'_>,
) -> Result<Candidate, FieldError> {
    if !arg.is_true() {
        return Ok(candidate);
    }
    let hook = original.receive_kind();
    if hook == Some(ReceiveKind::Plain) {
        return Err(FieldError::ImmutableReceiver);
    }
    if original.is_zero() || original.equals(&candidate) {
        return Ok(candidate);
    }
    if hook == Some(ReceiveKind::Change)
        && let Some(value) = candidate.value()
        && !original.probe_change(value)?
    {
        return Ok(candidate);
    }
    Err(FieldError::Immutable)
}
