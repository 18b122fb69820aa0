//! [`Bindable`] for numbers, booleans, strings, raw values and files.

use super::Bindable;
use crate::binder::BindContext;
use crate::error::FieldError;
use crate::value::{FileAttachment, Value};

macro_rules! bind_number {
    ($ty:ty, $zero:literal, $into:ident, [$($cast:tt)*] $(, #[$attr:meta])*) => {
        impl Bindable for $ty {
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            fn is_zero(&self) -> bool {
                *self == $zero
            }

            $(#[$attr])*
            fn equals_value(&self, value: &Value) -> bool {
                value
                    .clone()
                    .$into(stringify!($ty))
                    .is_ok_and(|n| (n $($cast)*) == *self)
            }

            $(#[$attr])*
            fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
                *self = value.$into(stringify!($ty))? $($cast)*;
                Ok(())
            }
        }
    };
}

macro_rules! bind_narrowed {
    ($zero:literal, $into:ident => $($ty:ty),*) => {$(
        bind_number!(
            $ty,
            $zero,
            $into,
            [as $ty],
            #[expect(
                clippy::cast_possible_truncation,
                reason = "numeric conversions follow native cast semantics"
            )]
        );
    )*};
}

bind_number!(i64, 0, into_i64, []);
bind_number!(u64, 0, into_u64, []);
bind_number!(f64, 0.0, into_f64, []);
bind_narrowed!(0, into_i64 => i8, i16, i32, isize);
bind_narrowed!(0, into_u64 => u8, u16, u32, usize);
bind_narrowed!(0.0, into_f64 => f32);

impl Bindable for bool {
    fn type_name() -> &'static str {
        "bool"
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn equals_value(&self, value: &Value) -> bool {
        matches!(value, Value::Bool(b) if b == self)
    }

    fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
        *self = value.into_bool("bool")?;
        Ok(())
    }
}

impl Bindable for String {
    fn type_name() -> &'static str {
        "String"
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn equals_value(&self, value: &Value) -> bool {
        value.as_str() == Some(self.as_str())
    }

    fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
        *self = value.into_string("String")?;
        Ok(())
    }
}

impl Bindable for Value {
    const NILABLE: bool = true;

    fn type_name() -> &'static str {
        "Value"
    }

    fn is_zero(&self) -> bool {
        self.is_null()
    }

    fn set_nil(&mut self) {
        *self = Self::Null;
    }

    fn equals_value(&self, value: &Value) -> bool {
        self == value
    }

    fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
        *self = value;
        Ok(())
    }
}

impl Bindable for FileAttachment {
    fn type_name() -> &'static str {
        "FileAttachment"
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    fn coerce(&mut self, value: Value, _cx: BindContext<'_>) -> Result<(), FieldError> {
        match value {
            Value::File(file) => {
                *self = file;
                Ok(())
            }
            other => Err(FieldError::mismatch(other.kind(), "FileAttachment")),
        }
    }
}
