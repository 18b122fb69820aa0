//! Attribute parsing for the `Record` derive.
//!
//! Struct attributes: `#[record(pre_bind, post_bind, unmarshal, crate = "...")]`.
//!
//! Field attributes:
//! - `#[request("name,option,option=value")]`, the primary tag;
//! - `#[tag(channel = "name,...")]`, one entry per fallback channel;
//! - `#[record(flatten)]`, promoting a nested record's fields;
//! - `#[record(accessors)]`, `#[record(getter = "...", setter = "...")]`,
//!   binding through methods instead of the field itself.
//!
//! Serde renames contribute a `serde` channel.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::parenthesized;
use syn::{Attribute, LitStr, Token};

mod input;
mod literals;
mod serde_attrs;

pub(crate) use input::parse_input;
use literals::{flag, lit_ident, lit_str};
use serde_attrs::{SerdeRenameAll, serde_field_key, serde_rename_all};

/// Channel carrying serde-derived names.
const SERDE_CHANNEL: &str = "serde";

/// Channel reserved for `#[request(...)]`.
const PRIMARY_CHANNEL: &str = "request";

#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    pub pre_bind: bool,
    pub post_bind: bool,
    pub unmarshal: bool,
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[record(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `request_bind::`.
    pub crate_path: Option<syn::Path>,
    pub rename_all: Option<SerdeRenameAll>,
}

/// How a field's value is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    /// Directly, as `self.field`.
    Direct,
    /// Through `self.getter()` and `self.setter(value)`.
    Accessors { getter: syn::Ident, setter: syn::Ident },
    /// As a flattened record slot.
    Flatten,
}

/// Field-level attributes recognised by `#[derive(Record)]`.
#[derive(Clone)]
pub(crate) struct FieldAttrs {
    pub request: Option<LitStr>,
    pub tags: Vec<(String, String)>,
    pub access: Access,
}

impl FieldAttrs {
    /// Whether the primary tag names the field `-`.
    pub(crate) fn is_skipped(&self) -> bool {
        self.request
            .as_ref()
            .is_some_and(|tag| tag.value().split(',').next() == Some("-"))
    }

    /// The primary tag string, empty when absent.
    pub(crate) fn request_tag(&self) -> String {
        self.request.as_ref().map(LitStr::value).unwrap_or_default()
    }
}

/// Iterate all `#[record(...)]` attributes once and apply a callback.
fn parse_record_attr<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Consumes an unrecognised key-value or list without recording it.
fn discard_unknown(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<proc_macro2::TokenStream>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        parenthesized!(content in meta.input);
        content.parse::<proc_macro2::TokenStream>()?;
    }
    Ok(())
}

/// Extracts `#[record(...)]` metadata applied to a struct.
///
/// Unknown keys are ignored so callers keep compiling when new attributes
/// appear.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs, syn::Error> {
    let mut out = StructAttrs {
        rename_all: serde_rename_all(attrs)?,
        ..StructAttrs::default()
    };
    parse_record_attr(attrs, |meta| {
        match meta.path.get_ident().map(ToString::to_string).as_deref() {
            Some("pre_bind") => out.pre_bind = flag(meta)?,
            Some("post_bind") => out.post_bind = flag(meta)?,
            Some("unmarshal") => out.unmarshal = flag(meta)?,
            Some("crate") => {
                let s = lit_str(meta, "crate")?;
                let path: syn::Path =
                    syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
                out.crate_path = Some(path);
            }
            _ => discard_unknown(meta)?,
        }
        Ok(())
    })?;
    Ok(out)
}

#[derive(Default)]
struct AccessAttrs {
    flatten: Option<Span>,
    accessors: Option<Span>,
    getter: Option<syn::Ident>,
    setter: Option<syn::Ident>,
}

fn apply_field_record_attr(meta: &ParseNestedMeta, out: &mut AccessAttrs) -> syn::Result<()> {
    let span = meta.path.get_ident().map_or_else(Span::call_site, syn::Ident::span);
    match meta.path.get_ident().map(ToString::to_string).as_deref() {
        Some("flatten") => {
            if flag(meta)? {
                out.flatten = Some(span);
            }
        }
        Some("accessors") => {
            if flag(meta)? {
                out.accessors = Some(span);
            }
        }
        Some("getter") => out.getter = Some(lit_ident(meta, "getter")?),
        Some("setter") => out.setter = Some(lit_ident(meta, "setter")?),
        _ => discard_unknown(meta)?,
    }
    Ok(())
}

fn parse_tag_attr(attr: &Attribute, tags: &mut Vec<(String, String)>) -> syn::Result<()> {
    attr.parse_nested_meta(|meta| {
        let Some(channel) = meta.path.get_ident().map(ToString::to_string) else {
            return Err(meta.error("tag channels are plain identifiers"));
        };
        if channel == PRIMARY_CHANNEL {
            return Err(meta.error("use #[request(\"...\")] for the primary channel"));
        }
        if tags.iter().any(|(existing, _)| *existing == channel) {
            return Err(meta.error(format!("duplicate tag channel `{channel}`")));
        }
        let value = lit_str(&meta, &channel)?.value();
        tags.push((channel, value));
        Ok(())
    })
}

/// Parses the attributes of one named field.
pub(crate) fn parse_field_attrs(
    field: &syn::Field,
    struct_attrs: &StructAttrs,
) -> Result<FieldAttrs, syn::Error> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(
            field,
            "unnamed fields are not supported",
        ));
    };
    let field_name = syn::ext::IdentExt::unraw(ident).to_string();

    let mut request = None;
    let mut tags = Vec::new();
    for attr in &field.attrs {
        if attr.path().is_ident(PRIMARY_CHANNEL) {
            if request.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "duplicate #[request] attribute",
                ));
            }
            request = Some(attr.parse_args::<LitStr>()?);
        } else if attr.path().is_ident("tag") {
            parse_tag_attr(attr, &mut tags)?;
        }
    }
    if !tags.iter().any(|(channel, _)| channel == SERDE_CHANNEL)
        && let Some(key) = serde_field_key(&field.attrs, &field_name, struct_attrs.rename_all)?
    {
        tags.push((SERDE_CHANNEL.to_owned(), key));
    }

    let mut access_attrs = AccessAttrs::default();
    parse_record_attr(&field.attrs, |meta| {
        apply_field_record_attr(meta, &mut access_attrs)
    })?;
    let access = resolve_access(ident, &field_name, access_attrs)?;

    let has_metadata = request.is_some() || tags.iter().any(|(c, _)| c != SERDE_CHANNEL);
    if access == Access::Flatten && has_metadata {
        return Err(syn::Error::new_spanned(
            field,
            "flattened fields take no #[request] or #[tag] metadata",
        ));
    }

    Ok(FieldAttrs {
        request,
        tags,
        access,
    })
}

fn resolve_access(
    ident: &syn::Ident,
    field_name: &str,
    attrs: AccessAttrs,
) -> syn::Result<Access> {
    let wants_accessors =
        attrs.accessors.is_some() || attrs.getter.is_some() || attrs.setter.is_some();
    if let Some(span) = attrs.flatten {
        if wants_accessors {
            return Err(syn::Error::new(span, "flatten cannot be combined with accessors"));
        }
        return Ok(Access::Flatten);
    }
    if !wants_accessors {
        return Ok(Access::Direct);
    }
    let getter = attrs.getter.unwrap_or_else(|| ident.clone());
    let setter = attrs
        .setter
        .unwrap_or_else(|| syn::Ident::new(&format!("set_{field_name}"), ident.span()));
    Ok(Access::Accessors { getter, setter })
}
