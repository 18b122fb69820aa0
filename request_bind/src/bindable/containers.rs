//! [`Bindable`] for wrappers and collections.

use std::collections::BTreeMap;

use super::{Bindable, Receiver, assign};
use crate::binder::BindContext;
use crate::error::FieldError;
use crate::hooks::Scan;
use crate::options::ReceiveKind;
use crate::value::Value;

impl<T: Bindable> Bindable for Option<T> {
    const NILABLE: bool = true;

    fn type_name() -> &'static str {
        T::type_name()
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn set_nil(&mut self) {
        *self = None;
    }

    fn equals_value(&self, value: &Value) -> bool {
        self.as_ref().is_some_and(|inner| inner.equals_value(value))
    }

    fn assign(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        self.get_or_insert_with(T::default).assign(value, cx)
    }

    fn coerce(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        self.get_or_insert_with(T::default).coerce(value, cx)
    }

    fn receiver(&mut self) -> Option<Receiver<'_>> {
        self.as_mut().and_then(Bindable::receiver)
    }

    fn receive_kind() -> Option<ReceiveKind> {
        T::receive_kind()
    }

    fn scanner(&mut self) -> Option<&mut dyn Scan> {
        self.as_mut().and_then(Bindable::scanner)
    }

    fn default_value(&self) -> Option<Value> {
        self.as_ref()
            .map_or_else(|| T::default().default_value(), Bindable::default_value)
    }
}

impl<T: Bindable> Bindable for Box<T> {
    const NILABLE: bool = T::NILABLE;

    fn type_name() -> &'static str {
        T::type_name()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn set_nil(&mut self) {
        (**self).set_nil();
    }

    fn equals_value(&self, value: &Value) -> bool {
        (**self).equals_value(value)
    }

    fn assign(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        (**self).assign(value, cx)
    }

    fn coerce(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        (**self).coerce(value, cx)
    }

    fn receiver(&mut self) -> Option<Receiver<'_>> {
        (**self).receiver()
    }

    fn receive_kind() -> Option<ReceiveKind> {
        T::receive_kind()
    }

    fn scanner(&mut self) -> Option<&mut dyn Scan> {
        (**self).scanner()
    }

    fn default_value(&self) -> Option<Value> {
        (**self).default_value()
    }
}

impl<T: Bindable> Bindable for Vec<T> {
    const NILABLE: bool = true;

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set_nil(&mut self) {
        self.clear();
    }

    fn coerce(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        let items = match value {
            Value::Seq(items) => items,
            other => return Err(FieldError::mismatch(other.kind(), Self::type_name())),
        };
        let mut built = Self::with_capacity(items.len());
        for item in items {
            let mut element = T::default();
            assign(&mut element, item, cx)?;
            built.push(element);
        }
        *self = built;
        Ok(())
    }
}

impl<T: Bindable> Bindable for BTreeMap<String, T> {
    const NILABLE: bool = true;

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn set_nil(&mut self) {
        self.clear();
    }

    fn coerce(&mut self, value: Value, cx: BindContext<'_>) -> Result<(), FieldError> {
        let entries = match value {
            Value::Map(entries) => entries,
            other => return Err(FieldError::mismatch(other.kind(), Self::type_name())),
        };
        let mut built = Self::new();
        for (key, item) in entries {
            let mut element = T::default();
            assign(&mut element, item, cx)?;
            built.insert(key, element);
        }
        *self = built;
        Ok(())
    }
}
