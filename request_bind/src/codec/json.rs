use super::{Codec, JSON};
use crate::error::BoxError;
use crate::value::Value;

/// Decodes JSON bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_types(&self) -> &'static [&'static str] {
        &[JSON]
    }

    fn decode(&self, body: &[u8]) -> Result<Value, BoxError> {
        Ok(serde_json::from_slice(body)?)
    }
}
