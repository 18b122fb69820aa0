//! Report of body keys that matched no record field.

use std::collections::BTreeSet;
use std::{error::Error, fmt};

use crate::value::Params;

/// Keys present in the body that no field consumed.
///
/// Binding still populates every matched field before this is returned, so
/// callers may treat it as a warning and keep the bound record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UnusedFields {
    missing: Vec<String>,
}

impl UnusedFields {
    /// Creates a report from an explicit key list.
    #[must_use]
    pub fn new(missing: Vec<String>) -> Self {
        Self { missing }
    }

    /// Collects the keys of `params` that do not appear in `matched`.
    #[must_use]
    pub fn from_params(params: &Params, matched: &BTreeSet<String>) -> Self {
        Self::new(
            params
                .keys()
                .filter(|key| !matched.contains(key.as_str()))
                .cloned()
                .collect(),
        )
    }

    /// The unmatched keys, in sorted order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.missing
    }

    /// Number of unmatched keys.
    #[must_use]
    pub const fn num_missing(&self) -> usize {
        self.missing.len()
    }

    /// Whether any key went unmatched.
    #[must_use]
    pub const fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

impl fmt::Display for UnusedFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "request fields found with no matching struct fields: {}",
            self.missing.join(", ")
        )
    }
}

impl Error for UnusedFields {}
