use serde_saphyr::Options;

use super::Codec;
use crate::error::BoxError;
use crate::value::Value;

/// Decodes YAML bodies with strict boolean semantics.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn content_types(&self) -> &'static [&'static str] {
        &["application/yaml", "application/x-yaml", "text/yaml"]
    }

    fn decode(&self, body: &[u8]) -> Result<Value, BoxError> {
        let options = Options {
            strict_booleans: true,
            ..Options::default()
        };
        Ok(serde_saphyr::from_str_with_options(
            std::str::from_utf8(body)?,
            options,
        )?)
    }
}
