use super::Codec;
use crate::error::BoxError;
use crate::value::Value;

/// Decodes TOML bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn content_types(&self) -> &'static [&'static str] {
        &["application/toml"]
    }

    fn decode(&self, body: &[u8]) -> Result<Value, BoxError> {
        Ok(::toml::from_str(std::str::from_utf8(body)?)?)
    }
}
