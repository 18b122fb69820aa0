//! Records: structs whose fields bind by name from a [`Params`] map.
//!
//! `#[derive(Record)]` implements [`Record`], [`RecordSlot`],
//! [`Bindable`] and [`Target`](crate::Target) for a struct with named
//! fields. The generated [`Record::bind_fields`] walks the fields in
//! declaration order, handing each to a [`FieldPass`].

use std::collections::BTreeSet;

use crate::binder::BindContext;
use crate::bindable::Bindable;
use crate::error::{BoxError, FieldError, InputErrors};
use crate::hooks::Unmarshal;
use crate::tags::FieldMeta;
use crate::value::{Params, Value};

mod pass;

pub use pass::FieldPass;

/// A struct bound field by field from a decoded map.
pub trait Record: Bindable {
    /// Metadata for every field, in declaration order.
    const FIELDS: &'static [FieldMeta];

    /// Binds every field through `pass`.
    fn bind_fields(&mut self, pass: &mut FieldPass<'_>);

    /// Runs the [`PreBind`](crate::PreBind) hook, if enabled.
    ///
    /// # Errors
    ///
    /// Returns the hook's error.
    fn pre_bind_hook(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// Runs the [`PostBind`](crate::PostBind) hook, if enabled.
    ///
    /// # Errors
    ///
    /// Returns the hook's error.
    fn post_bind_hook(&mut self) -> Result<(), BoxError> {
        Ok(())
    }

    /// The [`Unmarshal`] hook, if enabled.
    fn unmarshaller(&mut self) -> Option<&mut dyn Unmarshal> {
        None
    }
}

/// A record, or a wrapper that may hold one.
///
/// Flattened fields and sequence elements are record slots.
pub trait RecordSlot {
    /// The wrapped record type.
    type Record: Record;

    /// Wraps a freshly bound record.
    fn from_record(record: Self::Record) -> Self;

    /// The wrapped record, or `None` when the slot is empty.
    fn record_mut(&mut self) -> Option<&mut Self::Record>;
}

impl<R: Record> RecordSlot for Option<R> {
    type Record = R;

    fn from_record(record: R) -> Self {
        Some(record)
    }

    fn record_mut(&mut self) -> Option<&mut R> {
        self.as_mut()
    }
}

impl<R: Record> RecordSlot for Box<R> {
    type Record = R;

    fn from_record(record: R) -> Self {
        Self::new(record)
    }

    fn record_mut(&mut self) -> Option<&mut R> {
        Some(&mut **self)
    }
}

/// Binds a nested map onto a record field.
///
/// Nested records run no hooks, and keys they do not consume are ignored.
///
/// # Errors
///
/// Returns [`FieldError::Nested`] with the nested field errors, or
/// [`FieldError::Mismatch`] when `value` is not a map.
pub fn coerce_record<R: Record>(
    target: &mut R,
    value: Value,
    cx: BindContext<'_>,
) -> Result<(), FieldError> {
    let params = match value {
        Value::Map(params) => params,
        other => return Err(FieldError::mismatch(other.kind(), R::type_name())),
    };
    let (_, outcomes) = bind_fields(target, &params, cx);
    let errors = outcomes.errors();
    if errors.has_errors() {
        return Err(FieldError::Nested(errors));
    }
    Ok(())
}

/// Runs a field pass over `target`, returning the consumed keys and the
/// per-field outcomes.
pub(crate) fn bind_fields<R: Record>(
    target: &mut R,
    params: &Params,
    cx: BindContext<'_>,
) -> (BTreeSet<String>, InputErrors) {
    let mut pass = FieldPass::new(params, cx);
    target.bind_fields(&mut pass);
    pass.finish()
}
