//! A raw request body paired with its content type.

use std::cell::OnceCell;

use crate::binder::{Binder, Body, Mode, Target};
use crate::error::{BindResult, CodecError};
use crate::value::{Params, Value};

/// A request body that decodes at most once.
///
/// Decoding goes through the [`Binder`]'s codec service. A successful
/// decode is cached; a failed one is retried on the next call.
///
/// # Examples
///
/// ```rust
/// use request_bind::{Binder, Record, Request};
///
/// #[derive(Debug, Default, Clone, Record)]
/// struct Search {
///     q: String,
///     page: u32,
/// }
///
/// let binder = Binder::new();
/// let request = Request::new("application/x-www-form-urlencoded", "q=rust&page=2");
/// let mut search = Search::default();
/// request.bind(&binder, &mut search)?;
/// assert_eq!(search.q, "rust");
/// assert_eq!(search.page, 2);
/// # Ok::<(), request_bind::BindError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Request {
    content_type: String,
    raw: Vec<u8>,
    decoded: OnceCell<Value>,
}

impl Request {
    /// Wraps a raw body and its content type header value.
    pub fn new(content_type: impl Into<String>, raw: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type: content_type.into(),
            raw: raw.into(),
            decoded: OnceCell::new(),
        }
    }

    /// The content type header value.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The undecoded body.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// The decoded body.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the body cannot be decoded.
    pub fn body(&self, binder: &Binder) -> Result<&Value, CodecError> {
        if let Some(value) = self.decoded.get() {
            return Ok(value);
        }
        let value = binder.decode(&self.content_type, &self.raw)?;
        Ok(self.decoded.get_or_init(|| value))
    }

    /// The decoded body as a map.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if decoding fails or the body is not a map.
    pub fn params(&self, binder: &Binder) -> Result<&Params, CodecError> {
        let value = self.body(binder)?;
        value
            .as_map()
            .ok_or_else(|| CodecError::NotAMap { found: value.kind() })
    }

    /// Binds the body onto `target`, keeping fields whose keys are absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind<T: Target>(&self, binder: &Binder, target: &mut T) -> BindResult<()> {
        self.bind_with(binder, target, Mode::Merge)
    }

    /// Binds the body onto `target`, resetting fields whose keys are absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_replace<T: Target>(&self, binder: &Binder, target: &mut T) -> BindResult<()> {
        self.bind_with(binder, target, Mode::Replace)
    }

    fn bind_with<T: Target>(&self, binder: &Binder, target: &mut T, mode: Mode) -> BindResult<()> {
        match self.body(binder) {
            Ok(value) => binder.bind_body(target, Body::Value(value), mode),
            Err(error) => binder.bind_body(
                target,
                Body::Undecoded {
                    error,
                    raw: &self.raw,
                },
                mode,
            ),
        }
    }
}
