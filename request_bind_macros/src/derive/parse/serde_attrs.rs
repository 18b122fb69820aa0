//! Serde attribute parsing helpers.
//!
//! A field's serde name is exposed as the `serde` tag channel, so binders
//! that register `serde` as a fallback look fields up under the same keys
//! serde would use. The name respects `#[serde(rename = "...")]` and the
//! container's `#[serde(rename_all = "...")]`.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr, Token};

/// Supported `#[serde(rename_all = "...")]` rules for struct fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SerdeRenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl SerdeRenameAll {
    fn parse(value: &LitStr) -> syn::Result<Self> {
        match value.value().as_str() {
            "lowercase" => Ok(Self::Lower),
            "UPPERCASE" => Ok(Self::Upper),
            "PascalCase" => Ok(Self::Pascal),
            "camelCase" => Ok(Self::Camel),
            "snake_case" => Ok(Self::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(Self::ScreamingSnake),
            "kebab-case" => Ok(Self::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(Self::ScreamingKebab),
            other => Err(syn::Error::new(
                value.span(),
                format!("unsupported serde rename_all value '{other}'"),
            )),
        }
    }

    pub(crate) fn apply(self, field_name: &str) -> String {
        match self {
            Self::Lower => field_name.to_ascii_lowercase(),
            Self::Upper => field_name.to_ascii_uppercase(),
            Self::Pascal => field_name.to_upper_camel_case(),
            Self::Camel => field_name.to_lower_camel_case(),
            Self::Snake => field_name.to_snake_case(),
            Self::ScreamingSnake => field_name.to_shouty_snake_case(),
            Self::Kebab => field_name.to_kebab_case(),
            Self::ScreamingKebab => field_name.to_shouty_kebab_case(),
        }
    }
}

/// Parses `#[serde(rename_all = "...")]` from struct attributes.
pub(crate) fn serde_rename_all(attrs: &[Attribute]) -> syn::Result<Option<SerdeRenameAll>> {
    let mut out = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value = meta.value()?.parse::<LitStr>()?;
                out = Some(SerdeRenameAll::parse(&value)?);
            } else {
                super::discard_unknown(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(out)
}

/// Parses `#[serde(rename = "...")]` (or its `deserialize` form) from field
/// attributes.
pub(crate) fn serde_field_rename(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut out = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("rename") {
                return super::discard_unknown(&meta);
            }
            if meta.input.peek(Token![=]) {
                out = Some(meta.value()?.parse::<LitStr>()?.value());
                return Ok(());
            }
            if meta.input.peek(syn::token::Paren) {
                meta.parse_nested_meta(|nested| parse_rename_deserialize(&nested, &mut out))?;
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn parse_rename_deserialize(
    nested: &ParseNestedMeta,
    rename: &mut Option<String>,
) -> syn::Result<()> {
    if !nested.path.is_ident("deserialize") {
        return super::discard_unknown(nested);
    }
    *rename = Some(nested.value()?.parse::<LitStr>()?.value());
    Ok(())
}

/// The key serde reads `field_name` from, if any serde renaming applies.
pub(crate) fn serde_field_key(
    attrs: &[Attribute],
    field_name: &str,
    rename_all: Option<SerdeRenameAll>,
) -> syn::Result<Option<String>> {
    if let Some(rename) = serde_field_rename(attrs)? {
        return Ok(Some(rename));
    }
    Ok(rename_all.map(|rule| rule.apply(field_name)))
}
