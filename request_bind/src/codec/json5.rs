use super::Codec;
use crate::error::BoxError;
use crate::value::Value;

/// Decodes JSON5 bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Codec;

impl Codec for Json5Codec {
    fn content_types(&self) -> &'static [&'static str] {
        &["application/json5"]
    }

    fn decode(&self, body: &[u8]) -> Result<Value, BoxError> {
        Ok(::json5::from_str(std::str::from_utf8(body)?)?)
    }
}
