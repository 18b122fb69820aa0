//! Tag option pipeline.
//!
//! Every option named on a field's primary tag (plus configured defaults) is
//! looked up in an [`OptionRegistry`] and applied in order. Each option sees
//! the field's current value through a read-only [`FieldView`] and may
//! replace the [`Candidate`] that will be written, or reject it with a
//! [`FieldError`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::error::{FieldError, RegistryError};
use crate::tags::TagOption;
use crate::value::Value;

mod builtin;

pub use builtin::{default, immutable, required};

/// The value about to be written to a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    /// The body supplied an explicit null.
    Nil,
    /// A concrete value to assign.
    Value(Value),
    /// Keep the field's current value.
    Current,
    /// Reset the field to its type's zero value.
    Zero,
}

impl Candidate {
    /// Wraps a value from the body, mapping null to [`Candidate::Nil`].
    #[must_use]
    pub fn from_input(value: Value) -> Self {
        if value.is_null() {
            Self::Nil
        } else {
            Self::Value(value)
        }
    }

    /// Whether this is [`Candidate::Nil`].
    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// The concrete value, if this candidate carries one.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Whether writing this candidate leaves the field at its zero value.
    #[must_use]
    pub fn resolves_to_zero(&self, original: &dyn FieldView) -> bool {
        match self {
            Self::Nil | Self::Zero => true,
            Self::Current => original.is_zero(),
            Self::Value(_) => false,
        }
    }
}

/// Which receive hook a field's type implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveKind {
    /// The type implements [`Receive`](crate::Receive).
    Plain,
    /// The type implements [`ChangeReceive`](crate::ChangeReceive).
    Change,
}

/// Read-only view of a field's value before assignment.
pub trait FieldView {
    /// The field's type name.
    fn type_name(&self) -> &'static str;

    /// Whether the field holds its type's zero value.
    fn is_zero(&self) -> bool;

    /// Whether writing `candidate` would leave the field unchanged.
    fn equals(&self, candidate: &Candidate) -> bool;

    /// The receive hook the field's type implements, if any.
    fn receive_kind(&self) -> Option<ReceiveKind>;

    /// Asks a [`ChangeReceive`](crate::ChangeReceive) type, on a scratch
    /// copy, whether `value` would change it.
    ///
    /// Types without a change hook report `true`.
    ///
    /// # Errors
    ///
    /// Returns the hook's error as [`FieldError::Receive`].
    fn probe_change(&self, value: &Value) -> Result<bool, FieldError>;
}

/// Per-field inputs passed to an option besides the candidate.
#[derive(Debug, Clone, Copy)]
pub struct OptionArg<'a> {
    /// Option argument from the tag, `"true"` when bare.
    pub value: &'a str,
    /// Whether the body supplied the field's key.
    pub from_input: bool,
}

impl OptionArg<'_> {
    /// Whether the argument is the literal `"true"`.
    #[must_use]
    pub fn is_true(&self) -> bool {
        self.value == "true"
    }
}

/// A registered tag option.
///
/// Implemented for any matching closure, so options can be registered
/// directly as functions.
pub trait OptionFunc: Send + Sync {
    /// Applies the option, returning the candidate to carry forward.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] to reject the field's value.
    fn apply(
        &self,
        original: &dyn FieldView,
        candidate: Candidate,
        arg: OptionArg<'_>,
    ) -> Result<Candidate, FieldError>;
}

impl<F> OptionFunc for F
where
    F: Fn(&dyn FieldView, Candidate, OptionArg<'_>) -> Result<Candidate, FieldError> + Send + Sync,
{
    fn apply(
        &self,
        original: &dyn FieldView,
        candidate: Candidate,
        arg: OptionArg<'_>,
    ) -> Result<Candidate, FieldError> {
        self(original, candidate, arg)
    }
}

/// Registry of tag options by name.
///
/// A fresh registry holds the built-in `required`, `default` and
/// `immutable` options.
#[derive(Clone)]
pub struct OptionRegistry {
    funcs: HashMap<String, Arc<dyn OptionFunc>>,
}

impl OptionRegistry {
    /// A registry with no options at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            funcs: HashMap::new(),
        }
    }

    /// Registers `func` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateOption`] if `name` is taken.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: impl OptionFunc + 'static,
    ) -> Result<(), RegistryError> {
        let key = name.into();
        if self.funcs.contains_key(&key) {
            return Err(RegistryError::DuplicateOption { name: key });
        }
        self.funcs.insert(key, Arc::new(func));
        Ok(())
    }

    /// Whether an option named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    /// Applies `options` in order, threading the candidate through each.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::UnknownOption`] for an unregistered option, or
    /// the first error an option raises.
    pub fn apply(
        &self,
        options: &[TagOption],
        original: &dyn FieldView,
        candidate: Candidate,
        from_input: bool,
    ) -> Result<Candidate, FieldError> {
        options.iter().try_fold(candidate, |current, option| {
            let func = self
                .funcs
                .get(&option.name)
                .ok_or_else(|| FieldError::UnknownOption {
                    name: option.name.clone(),
                })?;
            trace!(option = %option.name, value = %option.value, "applying tag option");
            func.apply(
                original,
                current,
                OptionArg {
                    value: &option.value,
                    from_input,
                },
            )
        })
    }
}

impl Default for OptionRegistry {
    fn default() -> Self {
        let mut funcs: HashMap<String, Arc<dyn OptionFunc>> = HashMap::new();
        funcs.insert("required".to_owned(), Arc::new(required));
        funcs.insert("default".to_owned(), Arc::new(default));
        funcs.insert("immutable".to_owned(), Arc::new(immutable));
        Self { funcs }
    }
}

impl fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("OptionRegistry").field("options", &names).finish()
    }
}
