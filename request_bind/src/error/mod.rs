//! Error types produced while binding request bodies onto records.

mod constructors;
mod input;
mod types;
mod unused;

pub use input::InputErrors;
pub use types::{BindError, CodecError, FieldError, RegistryError};
pub use unused::UnusedFields;

/// Boxed error returned by user hooks and codecs.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Convenience alias for results returned by binding entry points.
pub type BindResult<T> = Result<T, BindError>;

#[cfg(test)]
mod tests;
