//! URL-encoded and multipart form values.

use std::collections::BTreeMap;

use super::{Codec, FORM_URLENCODED};
use crate::error::BoxError;
use crate::value::{FileAttachment, Params, Value};

/// Decodes `application/x-www-form-urlencoded` bodies.
///
/// A key that occurs once becomes a string; a repeated key becomes a
/// sequence of strings in body order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCodec;

impl Codec for FormCodec {
    fn content_types(&self) -> &'static [&'static str] {
        &[FORM_URLENCODED]
    }

    fn decode(&self, body: &[u8]) -> Result<Value, BoxError> {
        let mut form = FormData::new();
        for (key, value) in form_urlencoded::parse(body) {
            form.add_value(key, value);
        }
        Ok(Value::Map(form.into_params()))
    }
}

/// Form fields and uploaded files, as produced by a form parser.
///
/// Multipart parsers fill this in and convert it with
/// [`FormData::into_params`], which merges files into the same key space as
/// the plain values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, Vec<String>>,
    files: BTreeMap<String, Vec<FileAttachment>>,
}

impl FormData {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plain value under `key`.
    pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.entry(key.into()).or_default().push(value.into());
        self
    }

    /// Appends an uploaded file under `key`.
    pub fn add_file(&mut self, key: impl Into<String>, file: FileAttachment) -> &mut Self {
        self.files.entry(key.into()).or_default().push(file);
        self
    }

    /// Converts the form into [`Params`].
    ///
    /// Single values stay scalars and repeated values become sequences.
    /// Files join any values already under their key: a lone file stays a
    /// [`Value::File`], anything more becomes a sequence holding the values
    /// followed by the files.
    #[must_use]
    pub fn into_params(self) -> Params {
        let mut params: Params = self
            .values
            .into_iter()
            .map(|(key, values)| (key, collapse(values.into_iter().map(Value::String).collect())))
            .collect();
        for (key, files) in self.files {
            let mut items = match params.remove(&key) {
                Some(Value::Seq(existing)) => existing,
                Some(existing) => vec![existing],
                None => Vec::new(),
            };
            items.extend(files.into_iter().map(Value::File));
            params.insert(key, collapse(items));
        }
        params
    }
}

fn collapse(mut items: Vec<Value>) -> Value {
    if items.len() == 1
        && let Some(single) = items.pop()
    {
        return single;
    }
    Value::Seq(items)
}
