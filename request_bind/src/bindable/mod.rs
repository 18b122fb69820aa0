//! Assignment of decoded values onto typed fields.
//!
//! [`Bindable`] is implemented for the scalar types, strings, [`Option`],
//! [`Box`], [`Vec`], string-keyed [`BTreeMap`](std::collections::BTreeMap),
//! raw [`Value`]s and [`FileAttachment`](crate::FileAttachment)s.
//! `#[derive(Record)]` implements it for records, which bind nested maps
//! field by field.
//!
//! Assigning a non-null value runs these steps, stopping at the first that
//! applies:
//!
//! 1. a receive hook, when the value came from the body;
//! 2. nothing, when the field already equals the value;
//! 3. a [`Scan`] hook;
//! 4. the type's own coercion ([`Bindable::coerce`]).
//!
//! Null clears types that can hold nil and is rejected by the rest.

use tracing::trace;

use crate::binder::BindContext;
use crate::error::FieldError;
use crate::hooks::{ChangeReceive, Receive, Scan};
use crate::options::{Candidate, FieldView, ReceiveKind};
use crate::value::{Value, ValueKind};

mod containers;
mod scalars;
#[cfg(test)]
mod tests;

/// A type that decoded values can be assigned to.
///
/// Custom leaf types usually implement [`Bindable::is_zero`] and one of
/// [`Bindable::receiver`], [`Bindable::scanner`] or [`Bindable::coerce`].
pub trait Bindable: Default + Clone {
    /// Whether null clears the value instead of being rejected.
    const NILABLE: bool = false;

    /// Type name used in error messages.
    #[must_use]
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Whether the value equals its type's zero value.
    fn is_zero(&self) -> bool;

    /// Clears the value in response to null.
    fn set_nil(&mut self) {
        *self = Self::default();
    }

    /// Whether assigning `value` would leave `self` unchanged.
    ///
    /// Returning `false` is always safe.
    fn equals_value(&self, _value: &Value) -> bool {
        false
    }

    /// Assigns a non-null value.
    ///
    /// Wrapper types override this to forward into their contents.
    ///
    /// # Errors
    ///
    /// Returns the [`FieldError`] raised by a hook or by coercion.
    fn assign(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        assign_present(self, value, cx)
    }

    /// Converts a non-null value into this type.
    ///
    /// # Errors
    ///
    /// The default rejects every value with [`FieldError::Mismatch`].
    fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
        Err(FieldError::mismatch(value.kind(), Self::type_name()))
    }

    /// The receive hook for this value, if its type has one.
    fn receiver(&mut self) -> Option<Receiver<'_>> {
        None
    }

    /// Which receive hook the type exposes, independent of any value.
    ///
    /// The default asks a default-constructed value. Wrappers that only
    /// expose a hook while populated forward to their contents.
    #[must_use]
    fn receive_kind() -> Option<ReceiveKind> {
        let mut probe = Self::default();
        let kind = probe.receiver().map(|hook| hook.kind());
        kind
    }

    /// The scan hook for this value, if its type has one.
    fn scanner(&mut self) -> Option<&mut dyn Scan> {
        None
    }

    /// Value substituted when the field would otherwise end up zero.
    fn default_value(&self) -> Option<Value> {
        None
    }
}

/// Borrowed receive hook of a field.
pub enum Receiver<'a> {
    /// A plain [`Receive`] hook.
    Plain(&'a mut dyn Receive),
    /// A change-reporting [`ChangeReceive`] hook.
    Change(&'a mut dyn ChangeReceive),
}

impl Receiver<'_> {
    /// Which hook this is.
    #[must_use]
    pub const fn kind(&self) -> ReceiveKind {
        match self {
            Self::Plain(_) => ReceiveKind::Plain,
            Self::Change(_) => ReceiveKind::Change,
        }
    }
}

/// Assigns `value` to `target`, handling null.
///
/// # Errors
///
/// Returns [`FieldError::NotNilable`] when null reaches a type that cannot
/// hold it, or any error raised while assigning a concrete value.
pub fn assign<T: Bindable>(
    target: &mut T,
    value: Value,
    cx: BindContext<'_>,
) -> Result<(), FieldError> {
    if value.is_null() {
        return assign_nil(target);
    }
    target.assign(value, cx)
}

/// Runs the hook, equality, scan and coercion steps for a non-null value.
///
/// This is the default body of [`Bindable::assign`].
///
/// # Errors
///
/// Returns the first [`FieldError`] raised along the way.
pub fn assign_present<T: Bindable>(
    target: &mut T,
    value: Value,
    cx: BindContext<'_>,
) -> Result<(), FieldError> {
    if cx.from_input()
        && let Some(hook) = target.receiver()
    {
        return receive(hook, value);
    }
    if target.equals_value(&value) {
        trace!(type_name = T::type_name(), "value unchanged");
        return Ok(());
    }
    if let Some(scanner) = target.scanner() {
        return scanner.scan(value).map_err(FieldError::Scan);
    }
    target.coerce(value, cx)
}

fn assign_nil<T: Bindable>(target: &mut T) -> Result<(), FieldError> {
    if !T::NILABLE {
        return Err(FieldError::NotNilable {
            type_name: T::type_name(),
        });
    }
    if !target.is_zero() {
        target.set_nil();
    }
    Ok(())
}

/// Writes `candidate` to `target` and reports whether the field was touched.
pub(crate) fn write<T: Bindable>(
    target: &mut T,
    candidate: Candidate,
    cx: BindContext<'_>,
) -> Result<bool, FieldError> {
    match candidate {
        Candidate::Current => Ok(false),
        Candidate::Nil => assign_nil(target).map(|()| true),
        Candidate::Zero => {
            if target.is_zero() {
                return Ok(false);
            }
            *target = T::default();
            Ok(true)
        }
        Candidate::Value(value) => assign(target, value, cx).map(|()| true),
    }
}

fn receive(hook: Receiver<'_>, value: Value) -> Result<(), FieldError> {
    match hook {
        Receiver::Plain(receiver) => {
            receiver.pre_receive().map_err(FieldError::Hook)?;
            let typed = typed_value(receiver.receive_type(), value)?;
            receiver.receive(typed).map_err(FieldError::Receive)?;
            receiver.post_receive().map_err(FieldError::Hook)
        }
        Receiver::Change(receiver) => {
            receiver.pre_receive().map_err(FieldError::Hook)?;
            let typed = typed_value(receiver.receive_type(), value)?;
            receiver.receive(typed).map_err(FieldError::Receive)?;
            receiver.post_receive().map_err(FieldError::Hook)
        }
    }
}

fn typed_value(kind: Option<ValueKind>, value: Value) -> Result<Value, FieldError> {
    match kind {
        Some(target) => value.convert_to(target),
        None => Ok(value),
    }
}

/// A field's value as seen by tag options.
pub(crate) struct Original<'a, T>(pub(crate) &'a T);

impl<T: Bindable> FieldView for Original<'_, T> {
    fn type_name(&self) -> &'static str {
        T::type_name()
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    fn equals(&self, candidate: &Candidate) -> bool {
        match candidate {
            Candidate::Current => true,
            Candidate::Nil | Candidate::Zero => self.0.is_zero(),
            Candidate::Value(value) => self.0.equals_value(value),
        }
    }

    fn receive_kind(&self) -> Option<ReceiveKind> {
        T::receive_kind()
    }

    fn probe_change(&self, value: &Value) -> Result<bool, FieldError> {
        let mut scratch = self.0.clone();
        let changed = match scratch.receiver() {
            Some(Receiver::Change(receiver)) => {
                let typed = typed_value(receiver.receive_type(), value.clone())?;
                receiver.receive(typed).map_err(FieldError::Receive)?
            }
            _ => true,
        };
        Ok(changed)
    }
}
