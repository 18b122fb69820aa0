//! Scalar conversions shared by field coercion and typed receive hooks.
//!
//! Numbers convert between one another with native `as` semantics, so
//! floats truncate toward zero and out-of-range integers wrap. Strings are
//! parsed when the target is numeric or boolean.

use crate::error::FieldError;

use super::{Value, ValueKind};

impl Value {
    /// Converts this value into the requested kind.
    ///
    /// A value already of that kind is returned unchanged. [`ValueKind::Null`],
    /// [`ValueKind::File`], [`ValueKind::Seq`] and [`ValueKind::Map`] accept
    /// only values of the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Mismatch`] when no conversion exists, or one of
    /// the parse variants when a string does not parse.
    pub fn convert_to(self, kind: ValueKind) -> Result<Self, FieldError> {
        if self.kind() == kind {
            return Ok(self);
        }
        let target = kind.as_str();
        match kind {
            ValueKind::Bool => self.into_bool(target).map(Self::Bool),
            ValueKind::Int => self.into_i64(target).map(Self::Int),
            ValueKind::Uint => self.into_u64(target).map(Self::Uint),
            ValueKind::Float => self.into_f64(target).map(Self::Float),
            ValueKind::String => self.into_string(target).map(Self::String),
            ValueKind::Null | ValueKind::File | ValueKind::Seq | ValueKind::Map => {
                Err(FieldError::mismatch(self.kind(), target))
            }
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        reason = "numeric conversions follow native cast semantics"
    )]
    pub(crate) fn into_i64(self, target: &'static str) -> Result<i64, FieldError> {
        match self {
            Self::Int(n) => Ok(n),
            Self::Uint(n) => Ok(n as i64),
            Self::Float(n) => Ok(n as i64),
            Self::String(input) => match input.parse::<i64>() {
                Ok(n) => Ok(n),
                Err(source) => Err(FieldError::ParseInt { input, source }),
            },
            other => Err(FieldError::mismatch(other.kind(), target)),
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "numeric conversions follow native cast semantics"
    )]
    pub(crate) fn into_u64(self, target: &'static str) -> Result<u64, FieldError> {
        match self {
            Self::Int(n) => Ok(n as u64),
            Self::Uint(n) => Ok(n),
            Self::Float(n) => Ok(n as u64),
            Self::String(input) => match input.parse::<u64>() {
                Ok(n) => Ok(n),
                Err(source) => Err(FieldError::ParseInt { input, source }),
            },
            other => Err(FieldError::mismatch(other.kind(), target)),
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "numeric conversions follow native cast semantics"
    )]
    pub(crate) fn into_f64(self, target: &'static str) -> Result<f64, FieldError> {
        match self {
            Self::Int(n) => Ok(n as f64),
            Self::Uint(n) => Ok(n as f64),
            Self::Float(n) => Ok(n),
            Self::String(input) => match input.parse::<f64>() {
                Ok(n) => Ok(n),
                Err(source) => Err(FieldError::ParseFloat { input, source }),
            },
            other => Err(FieldError::mismatch(other.kind(), target)),
        }
    }

    pub(crate) fn into_bool(self, target: &'static str) -> Result<bool, FieldError> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::String(input) => match input.parse::<bool>() {
                Ok(b) => Ok(b),
                Err(source) => Err(FieldError::ParseBool { input, source }),
            },
            other => Err(FieldError::mismatch(other.kind(), target)),
        }
    }

    pub(crate) fn into_string(self, target: &'static str) -> Result<String, FieldError> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(FieldError::mismatch(other.kind(), target)),
        }
    }
}
