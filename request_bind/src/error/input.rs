//! Per-field error collection for a single bind pass.

use std::collections::BTreeMap;
use std::{error::Error, fmt};

use super::FieldError;

/// Map from input field name to the error raised while binding it.
///
/// A name may map to `None`, recording that the field was visited and bound
/// cleanly. Those entries let outer fields take precedence over fields of a
/// flattened record; [`InputErrors::errors`] prunes them.
///
/// # Examples
///
/// ```
/// use request_bind::{FieldError, InputErrors};
///
/// let mut errors = InputErrors::new();
/// assert!(!errors.set("name", None));
/// assert!(errors.set("age", Some(FieldError::Required)));
/// assert!(errors.has_errors());
/// assert_eq!(errors.errors().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InputErrors(BTreeMap<String, Option<FieldError>>);

impl InputErrors {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records the outcome for `name` and reports whether it was an error.
    pub fn set(&mut self, name: impl Into<String>, error: Option<FieldError>) -> bool {
        let failed = error.is_some();
        self.0.insert(name.into(), error);
        failed
    }

    /// Merges `newer` into `self`, letting `newer` win on key collisions.
    #[must_use]
    pub fn merge(mut self, newer: Self) -> Self {
        self.0.extend(newer.0);
        self
    }

    /// Whether any entry holds an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.values().any(Option::is_some)
    }

    /// Returns a copy containing only the entries that hold an error.
    #[must_use]
    pub fn errors(self) -> Self {
        Self(self.0.into_iter().filter(|(_, error)| error.is_some()).collect())
    }

    /// Whether `name` was visited, with or without an error.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Returns the error recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldError> {
        self.0.get(name).and_then(Option::as_ref)
    }

    /// Number of visited names, including those without errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no name has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the names that hold an error, in name order.
    #[must_use = "iterators should be consumed to inspect errors"]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.0
            .iter()
            .filter_map(|(name, error)| error.as_ref().map(|e| (name.as_str(), e)))
    }

    /// Inserts each entry of `nested` whose name `self` has not visited yet.
    pub(crate) fn absorb(&mut self, nested: Self) {
        for (name, error) in nested.0 {
            self.0.entry(name).or_insert(error);
        }
    }
}

impl fmt::Display for InputErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "input errors:")?;
        writeln!(f)?;
        for (name, error) in self.iter() {
            writeln!(f, " * {name}: {error}")?;
        }
        Ok(())
    }
}

impl Error for InputErrors {}

impl IntoIterator for InputErrors {
    type Item = (String, FieldError);
    type IntoIter = std::iter::FilterMap<
        std::collections::btree_map::IntoIter<String, Option<FieldError>>,
        fn((String, Option<FieldError>)) -> Option<(String, FieldError)>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.0
            .into_iter()
            .filter_map(keep_error as fn(_) -> _)
    }
}

fn keep_error((name, error): (String, Option<FieldError>)) -> Option<(String, FieldError)> {
    error.map(|e| (name, e))
}
