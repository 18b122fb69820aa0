//! Capability traits that let types take part in binding.
//!
//! Field-level hooks ([`Receive`], [`ChangeReceive`], [`Scan`]) are reached
//! through [`Bindable::receiver`](crate::Bindable::receiver) and
//! [`Bindable::scanner`](crate::Bindable::scanner). Record-level hooks
//! ([`PreBind`], [`PostBind`], [`Unmarshal`]) are enabled with
//! `#[record(pre_bind)]`, `#[record(post_bind)]` and `#[record(unmarshal)]`.
//!
//! # Examples
//!
//! ```rust
//! use request_bind::{BoxError, Binder, PostBind, Record, Value};
//!
//! #[derive(Debug, Default, Clone, Record)]
//! #[record(post_bind)]
//! struct Greeting {
//!     name: String,
//!     shout: bool,
//! }
//!
//! impl PostBind for Greeting {
//!     fn post_bind(&mut self) -> Result<(), BoxError> {
//!         if self.shout {
//!             self.name = self.name.to_uppercase();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut params = request_bind::Params::new();
//! params.insert("name".into(), Value::from("ada"));
//! params.insert("shout".into(), Value::from(true));
//! let mut greeting = Greeting::default();
//! Binder::new().bind_params(&mut greeting, &params)?;
//! assert_eq!(greeting.name, "ADA");
//! # Ok::<(), request_bind::BindError>(())
//! ```

use crate::error::BoxError;
use crate::value::{Params, Value, ValueKind};

/// Takes over assignment of values that come from the body.
///
/// Only values supplied by the body reach a receive hook; defaults and
/// zeroing bypass it.
pub trait Receive {
    /// Accepts a value from the body.
    ///
    /// # Errors
    ///
    /// Any error is reported against the field.
    fn receive(&mut self, value: Value) -> Result<(), BoxError>;

    /// Kind the value is converted to before [`Receive::receive`] runs.
    fn receive_type(&self) -> Option<ValueKind> {
        None
    }

    /// Runs before the value is received.
    ///
    /// # Errors
    ///
    /// An error aborts the receive.
    fn pre_receive(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Runs after a successful receive.
    ///
    /// # Errors
    ///
    /// Any error is reported against the field.
    fn post_receive(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Like [`Receive`], but reports whether the value changed the receiver.
///
/// Fields tagged `immutable` require this form, so the binder can tell an
/// idempotent resend from a real change.
pub trait ChangeReceive {
    /// Accepts a value from the body and reports whether it changed `self`.
    ///
    /// # Errors
    ///
    /// Any error is reported against the field.
    fn receive(&mut self, value: Value) -> Result<bool, BoxError>;

    /// Kind the value is converted to before [`ChangeReceive::receive`] runs.
    fn receive_type(&self) -> Option<ValueKind> {
        None
    }

    /// Runs before the value is received.
    ///
    /// # Errors
    ///
    /// An error aborts the receive.
    fn pre_receive(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Runs after a successful receive.
    ///
    /// # Errors
    ///
    /// Any error is reported against the field.
    fn post_receive(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Last-resort conversion consulted before the built-in coercions.
pub trait Scan {
    /// Reads `value` into `self`.
    ///
    /// # Errors
    ///
    /// Any error is reported against the field.
    fn scan(&mut self, value: Value) -> Result<(), BoxError>;
}

/// Runs before any field of a record is bound.
pub trait PreBind {
    /// Prepares the record for binding.
    ///
    /// # Errors
    ///
    /// An error aborts binding and is returned unchanged.
    fn pre_bind(&mut self) -> Result<(), BoxError>;
}

/// Runs after every field of a record bound without error.
pub trait PostBind {
    /// Finalises the record.
    ///
    /// # Errors
    ///
    /// An error is returned unchanged.
    fn post_bind(&mut self) -> Result<(), BoxError>;
}

/// Payload handed to a self-describing record.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// The decoded body.
    Params(&'a Params),
    /// The raw body, when no codec handles its content type.
    Raw(&'a [u8]),
}

/// A record that decodes the payload itself instead of binding per field.
pub trait Unmarshal {
    /// Populates `self` from the payload.
    ///
    /// # Errors
    ///
    /// Any error aborts binding. A panic is caught and reported as an error.
    fn unmarshal(&mut self, payload: Payload<'_>) -> Result<(), BoxError>;
}
