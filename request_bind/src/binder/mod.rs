//! The [`Binder`]: configuration plus the binding entry points.
//!
//! A binder owns the tag resolver, the option registry and the codec
//! service. It holds no global state, so independent binders with different
//! fallback channels or custom options can coexist. Configure it once with
//! the `&mut self` methods, then share it; binding only needs `&self`.

use tracing::debug;

use crate::codec::{Codec, CodecService};
use crate::error::{BindResult, CodecError, RegistryError};
use crate::options::{OptionFunc, OptionRegistry};
use crate::record::Record;
use crate::tags::{FieldDescriptor, TagResolver};
use crate::value::{Params, Value};

mod orchestrate;
mod sequence;
#[cfg(test)]
mod tests;

pub use orchestrate::bind_record;

/// How absent keys affect the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Absent keys leave fields unchanged.
    #[default]
    Merge,
    /// Absent keys reset fields to their zero value.
    Replace,
}

/// Per-call state threaded through field assignment.
#[derive(Debug, Clone, Copy)]
pub struct BindContext<'a> {
    binder: &'a Binder,
    mode: Mode,
    from_input: bool,
}

impl<'a> BindContext<'a> {
    /// Creates a context for a bind call.
    #[must_use]
    pub const fn new(binder: &'a Binder, mode: Mode) -> Self {
        Self {
            binder,
            mode,
            from_input: false,
        }
    }

    /// The binder driving this call.
    #[must_use]
    pub const fn binder(&self) -> &'a Binder {
        self.binder
    }

    /// The bind mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether the value being assigned came from the body.
    #[must_use]
    pub const fn from_input(&self) -> bool {
        self.from_input
    }

    /// Returns a copy with the input flag replaced.
    #[must_use]
    pub const fn with_from_input(self, from_input: bool) -> Self {
        Self { from_input, ..self }
    }
}

/// A request body handed to a [`Target`].
#[derive(Debug)]
pub enum Body<'a> {
    /// A decoded body of any shape.
    Value(&'a Value),
    /// A decoded map body.
    Params(&'a Params),
    /// A body no codec could decode.
    Undecoded {
        /// Why decoding failed.
        error: CodecError,
        /// The raw body.
        raw: &'a [u8],
    },
}

/// Something a body can be bound onto.
///
/// `#[derive(Record)]` implements this for records; it is also implemented
/// for vectors of [`RecordSlot`](crate::RecordSlot)s, which bind a sequence
/// body element by element.
pub trait Target {
    /// Binds `body` onto `self`.
    ///
    /// # Errors
    ///
    /// Returns a [`BindError`](crate::BindError) describing the failure.
    fn bind_target(&mut self, binder: &Binder, body: Body<'_>, mode: Mode) -> BindResult<()>;
}

/// Binding configuration and entry points.
///
/// # Examples
///
/// ```rust
/// use request_bind::{Binder, Record, Value};
///
/// #[derive(Debug, Default, Clone, Record)]
/// struct Login {
///     #[request("user,required")]
///     username: String,
///     #[tag(db = "remember_me")]
///     remember: bool,
/// }
///
/// let mut binder = Binder::new();
/// binder.add_fallback_tag("db");
///
/// let body = Value::Map(
///     [
///         ("user".to_owned(), Value::from("ada")),
///         ("remember_me".to_owned(), Value::from("true")),
///     ]
///     .into_iter()
///     .collect(),
/// );
/// let mut login = Login::default();
/// binder.bind(&mut login, &body)?;
/// assert_eq!(login.username, "ada");
/// assert!(login.remember);
/// # Ok::<(), request_bind::BindError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Binder {
    tags: TagResolver,
    options: OptionRegistry,
    codecs: CodecService,
}

impl Binder {
    /// A binder with the built-in options and the default codecs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fallback tag channel.
    ///
    /// Channels are consulted in registration order after the primary
    /// `request` channel. Registering a channel twice has no effect.
    pub fn add_fallback_tag(&mut self, channel: impl Into<String>) -> &mut Self {
        self.tags.add_fallback_tag(channel);
        self
    }

    /// Registered fallback channels, in lookup order.
    #[must_use]
    pub fn fallback_tags(&self) -> &[String] {
        self.tags.fallback_tags()
    }

    /// Sets the argument `name` receives on fields whose tag omits it.
    pub fn set_option_default(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.tags.set_option_default(name, value);
        self
    }

    /// Registers a custom tag option.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateOption`] if `name` is taken,
    /// including by a built-in option.
    pub fn register_option(
        &mut self,
        name: impl Into<String>,
        func: impl OptionFunc + 'static,
    ) -> Result<&mut Self, RegistryError> {
        self.options.register(name, func)?;
        Ok(self)
    }

    /// Registers a codec, taking precedence over existing codecs for the
    /// same content types.
    pub fn add_codec(&mut self, codec: impl Codec + 'static) -> &mut Self {
        self.codecs.add_codec(codec);
        self
    }

    /// The tag resolver.
    #[must_use]
    pub const fn tags(&self) -> &TagResolver {
        &self.tags
    }

    /// The option registry.
    #[must_use]
    pub const fn options(&self) -> &OptionRegistry {
        &self.options
    }

    /// The codec service.
    #[must_use]
    pub const fn codecs(&self) -> &CodecService {
        &self.codecs
    }

    /// Resolved descriptors for the fields `R` binds directly.
    ///
    /// Flattened fields are not listed.
    #[must_use]
    pub fn describe<R: Record>(&self) -> Vec<FieldDescriptor> {
        R::FIELDS
            .iter()
            .filter(|meta| !meta.is_flattened())
            .map(|meta| self.tags.describe(meta))
            .collect()
    }

    /// Decodes a body with the codec registered for `content_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if no codec matches or decoding fails.
    pub fn decode(&self, content_type: &str, body: &[u8]) -> Result<Value, CodecError> {
        self.codecs.decode(content_type, body)
    }

    /// Binds a decoded body, keeping fields whose keys are absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind<T: Target>(&self, target: &mut T, body: &Value) -> BindResult<()> {
        target.bind_target(self, Body::Value(body), Mode::Merge)
    }

    /// Binds a decoded body, resetting fields whose keys are absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_replace<T: Target>(&self, target: &mut T, body: &Value) -> BindResult<()> {
        target.bind_target(self, Body::Value(body), Mode::Replace)
    }

    /// Binds a map body onto a record, keeping fields whose keys are absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_params<R: Record + Target>(&self, target: &mut R, params: &Params) -> BindResult<()> {
        target.bind_target(self, Body::Params(params), Mode::Merge)
    }

    /// Binds a map body onto a record, resetting fields whose keys are
    /// absent.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_params_replace<R: Record + Target>(
        &self,
        target: &mut R,
        params: &Params,
    ) -> BindResult<()> {
        target.bind_target(self, Body::Params(params), Mode::Replace)
    }

    /// Binds any [`Body`], including an undecodable one.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_body<T: Target>(&self, target: &mut T, body: Body<'_>, mode: Mode) -> BindResult<()> {
        target.bind_target(self, body, mode)
    }

    /// Decodes `raw` according to `content_type` and binds the result.
    ///
    /// When no codec handles the content type, self-describing records still
    /// receive the raw bytes.
    ///
    /// # Errors
    ///
    /// See [`BindError`](crate::BindError).
    pub fn bind_bytes<T: Target>(
        &self,
        target: &mut T,
        content_type: &str,
        raw: &[u8],
        mode: Mode,
    ) -> BindResult<()> {
        match self.decode(content_type, raw) {
            Ok(value) => target.bind_target(self, Body::Value(&value), mode),
            Err(error) => {
                debug!(%content_type, %error, "body not decoded");
                target.bind_target(self, Body::Undecoded { error, raw }, mode)
            }
        }
    }
}
