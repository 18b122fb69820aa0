//! Body decoding by content type.
//!
//! A [`CodecService`] maps content types to [`Codec`]s. Matching uses the
//! media type's essence (type and subtype, parameters ignored); a
//! `+json` structured-syntax suffix falls back to the JSON codec. An empty
//! content type is treated as a URL-encoded form.

use std::fmt;
use std::sync::Arc;

use mime::Mime;
use tracing::debug;

use crate::error::{BoxError, CodecError};
use crate::value::Value;

mod form;
#[cfg(feature = "serde_json")]
mod json;
#[cfg(feature = "json5")]
mod json5;
#[cfg(feature = "toml")]
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

pub use form::{FormCodec, FormData};
#[cfg(feature = "serde_json")]
pub use json::JsonCodec;
#[cfg(feature = "json5")]
pub use json5::Json5Codec;
#[cfg(feature = "toml")]
pub use toml::TomlCodec;
#[cfg(feature = "yaml")]
pub use yaml::YamlCodec;

/// Content type of URL-encoded forms.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Content type of JSON bodies.
pub const JSON: &str = "application/json";

/// Decodes bodies of one or more content types into a [`Value`].
pub trait Codec: Send + Sync + fmt::Debug {
    /// Media type essences this codec handles, lower-cased.
    fn content_types(&self) -> &'static [&'static str];

    /// Decodes a raw body.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error, which the service wraps in
    /// [`CodecError::Decode`].
    fn decode(&self, body: &[u8]) -> Result<Value, BoxError>;
}

/// Registry of codecs keyed by content type.
#[derive(Debug, Clone)]
pub struct CodecService {
    codecs: Vec<Arc<dyn Codec>>,
}

impl CodecService {
    /// A service with no codecs, not even the form codec.
    #[must_use]
    pub const fn empty() -> Self {
        Self { codecs: Vec::new() }
    }

    /// Registers `codec`; later registrations win for shared content types.
    pub fn add_codec(&mut self, codec: impl Codec + 'static) {
        self.codecs.push(Arc::new(codec));
    }

    /// Selects the codec for a content type header value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidContentType`] for a malformed header and
    /// [`CodecError::UnsupportedContentType`] when no codec matches.
    pub fn codec_for(&self, content_type: &str) -> Result<&dyn Codec, CodecError> {
        if content_type.trim().is_empty() {
            return self.lookup(FORM_URLENCODED).ok_or_else(|| unsupported(content_type));
        }
        let media: Mime = content_type
            .parse()
            .map_err(|source| CodecError::InvalidContentType {
                content_type: content_type.to_owned(),
                source,
            })?;
        self.lookup(media.essence_str())
            .or_else(|| {
                media
                    .suffix()
                    .filter(|suffix| *suffix == mime::JSON)
                    .and_then(|_| self.lookup(JSON))
            })
            .ok_or_else(|| unsupported(content_type))
    }

    /// Decodes `body` with the codec for `content_type`.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if no codec matches or decoding fails.
    pub fn decode(&self, content_type: &str, body: &[u8]) -> Result<Value, CodecError> {
        let codec = self.codec_for(content_type)?;
        debug!(%content_type, ?codec, "decoding request body");
        codec
            .decode(body)
            .map_err(|source| CodecError::decode(content_type, source))
    }

    fn lookup(&self, essence: &str) -> Option<&dyn Codec> {
        self.codecs
            .iter()
            .rev()
            .find(|codec| codec.content_types().iter().any(|ct| *ct == essence))
            .map(|codec| &**codec)
    }
}

impl Default for CodecService {
    /// The form codec plus every codec enabled by cargo features.
    fn default() -> Self {
        let mut service = Self::empty();
        service.add_codec(FormCodec);
        #[cfg(feature = "serde_json")]
        service.add_codec(JsonCodec);
        #[cfg(feature = "toml")]
        service.add_codec(TomlCodec);
        #[cfg(feature = "yaml")]
        service.add_codec(YamlCodec);
        #[cfg(feature = "json5")]
        service.add_codec(Json5Codec);
        service
    }
}

fn unsupported(content_type: &str) -> CodecError {
    CodecError::UnsupportedContentType {
        content_type: content_type.to_owned(),
    }
}
