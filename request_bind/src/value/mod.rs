//! Decoded request values.
//!
//! Every codec produces a [`Value`] tree. Record bodies are
//! [`Value::Map`]s (see [`Params`]), sequence bodies are [`Value::Seq`]s of
//! maps, and leaves are scalars, strings, or uploaded files.

use std::collections::BTreeMap;
use std::fmt;

mod convert;
mod de;
#[cfg(feature = "serde_json")]
mod json;
#[cfg(test)]
mod tests;

/// Key/value view of a decoded record body.
///
/// Keys are iterated in sorted order, which keeps unused-field reports
/// stable.
pub type Params = BTreeMap<String, Value>;

/// A single decoded request value.
#[derive(Debug, Clone, PartialEq, Default)]
#[non_exhaustive]
pub enum Value {
    /// Explicit null, or an absent optional value.
    #[default]
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer that does not fit in [`i64`].
    Uint(u64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Uploaded file from a multipart form.
    File(FileAttachment),
    /// Ordered sequence of values.
    Seq(Vec<Value>),
    /// Nested key/value map.
    Map(Params),
}

/// Shape of a [`Value`], used in error messages and typed receive hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`Value::Null`].
    Null,
    /// [`Value::Bool`].
    Bool,
    /// [`Value::Int`].
    Int,
    /// [`Value::Uint`].
    Uint,
    /// [`Value::Float`].
    Float,
    /// [`Value::String`].
    String,
    /// [`Value::File`].
    File,
    /// [`Value::Seq`].
    Seq,
    /// [`Value::Map`].
    Map,
}

impl ValueKind {
    /// Lower-case name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::File => "file",
            Self::Seq => "sequence",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file uploaded through a multipart form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileAttachment {
    /// Client-supplied file name.
    pub filename: String,
    /// Declared content type of the part, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl FileAttachment {
    /// Creates an attachment from a file name and its contents.
    #[must_use]
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content_type: None,
            data: data.into(),
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl Value {
    /// Returns the shape of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Uint(_) => ValueKind::Uint,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
            Self::File(_) => ValueKind::File,
            Self::Seq(_) => ValueKind::Seq,
            Self::Map(_) => ValueKind::Map,
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrows the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrows the map payload, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&Params> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the sequence payload, if any.
    #[must_use]
    pub fn as_seq(&self) -> Option<&[Self]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_lossless {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        }
    )*};
}

from_lossless!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Uint(value), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<FileAttachment> for Value {
    fn from(value: FileAttachment) -> Self {
        Self::File(value)
    }
}

impl From<Params> for Value {
    fn from(value: Params) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(value: Vec<T>) -> Self {
        Self::Seq(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
