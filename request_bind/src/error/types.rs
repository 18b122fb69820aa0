//! Error enums for binding, field coercion, option registration and codecs.

use std::num::{ParseFloatError, ParseIntError};
use std::str::ParseBoolError;

use thiserror::Error;

use super::{BoxError, InputErrors, UnusedFields};
use crate::value::ValueKind;

/// Errors returned by the binding entry points.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BindError {
    /// One or more fields failed to bind.
    #[error("{0}")]
    Input(InputErrors),

    /// The body carried keys that matched no field.
    #[error("{0}")]
    Unused(UnusedFields),

    /// A record target received a body that is not a map.
    #[error("body of kind {found} cannot be used as params; expected a map")]
    NotAMap {
        /// Shape of the body that was supplied.
        found: ValueKind,
    },

    /// A sequence target received a body that is not a sequence.
    #[error("body of kind {found} cannot be bound to a sequence target")]
    NotASequence {
        /// Shape of the body that was supplied.
        found: ValueKind,
    },

    /// An element of a sequence body is not a map.
    #[error("element {index} of the body is a {found}, not a map")]
    ElementNotAMap {
        /// Position of the offending element.
        index: usize,
        /// Shape of the offending element.
        found: ValueKind,
    },

    /// The record's pre-bind hook failed.
    #[error("{0}")]
    PreBind(#[source] BoxError),

    /// The record's post-bind hook failed.
    #[error("{0}")]
    PostBind(#[source] BoxError),

    /// A self-describing record failed to decode the payload itself.
    #[error("{0}")]
    Unmarshal(#[source] BoxError),

    /// A self-describing record panicked while decoding.
    #[error("record unmarshal panicked: {message}")]
    UnmarshalPanicked {
        /// Panic payload rendered as text.
        message: String,
    },

    /// The request body could not be decoded.
    #[error("failed to decode request body: {0}")]
    Codec(#[from] CodecError),
}

/// Errors attached to a single field in [`InputErrors`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// A `required` field was nil or absent.
    #[error("required field has no value")]
    Required,

    /// An `immutable` field already holds a different value.
    #[error("field is immutable and already holds a different value")]
    Immutable,

    /// An `immutable` field's type only implements plain [`Receive`].
    ///
    /// [`Receive`]: crate::Receive
    #[error("immutable fields cannot use a plain receive hook; implement `ChangeReceive` instead")]
    ImmutableReceiver,

    /// A tag names an option that is not registered.
    #[error("could not find a registered option function for option \"{name}\"")]
    UnknownOption {
        /// The option name as written in the tag.
        name: String,
    },

    /// A nil value reached a type that cannot hold nil.
    #[error("nil value found, but type {type_name} cannot be nil")]
    NotNilable {
        /// The field's type.
        type_name: &'static str,
    },

    /// No conversion exists from the input to the field type.
    #[error("cannot convert value of type {from} to type {to}")]
    Mismatch {
        /// Shape of the input value.
        from: ValueKind,
        /// The field's type.
        to: &'static str,
    },

    /// A string did not parse as an integer.
    #[error("cannot parse {input:?} as an integer: {source}")]
    ParseInt {
        /// The rejected string.
        input: String,
        /// Parser error.
        #[source]
        source: ParseIntError,
    },

    /// A string did not parse as a float.
    #[error("cannot parse {input:?} as a float: {source}")]
    ParseFloat {
        /// The rejected string.
        input: String,
        /// Parser error.
        #[source]
        source: ParseFloatError,
    },

    /// A string did not parse as a boolean.
    #[error("cannot parse {input:?} as a bool: {source}")]
    ParseBool {
        /// The rejected string.
        input: String,
        /// Parser error.
        #[source]
        source: ParseBoolError,
    },

    /// A nested record failed to bind.
    #[error("nested {0}")]
    Nested(InputErrors),

    /// A receive hook failed.
    #[error("receive failed: {0}")]
    Receive(#[source] BoxError),

    /// A pre- or post-receive hook failed.
    #[error("receive hook failed: {0}")]
    Hook(#[source] BoxError),

    /// A scan hook failed.
    #[error("scan failed: {0}")]
    Scan(#[source] BoxError),

    /// Error raised by a user-registered option.
    #[error("{0}")]
    Custom(#[source] BoxError),
}

/// Errors raised while configuring a [`Binder`](crate::Binder).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// An option with this name is already registered.
    #[error("an option named \"{name}\" is already registered")]
    DuplicateOption {
        /// The conflicting option name.
        name: String,
    },
}

/// Errors raised while selecting a codec or decoding a body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// No codec handles this content type.
    #[error("no codec registered for content type '{content_type}'")]
    UnsupportedContentType {
        /// The requested content type.
        content_type: String,
    },

    /// The content type header is malformed.
    #[error("invalid content type '{content_type}': {source}")]
    InvalidContentType {
        /// The rejected header value.
        content_type: String,
        /// Parser error.
        #[source]
        source: mime::FromStrError,
    },

    /// The decoded body is not a map.
    #[error("decoded body of kind {found} is not a map")]
    NotAMap {
        /// Shape of the decoded body.
        found: ValueKind,
    },

    /// The codec rejected the body.
    #[error("failed to decode {content_type} body: {source}")]
    Decode {
        /// Content type the codec was selected for.
        content_type: String,
        /// Underlying decoder error.
        #[source]
        source: BoxError,
    },
}
