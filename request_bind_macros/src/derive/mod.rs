//! Expansion of `#[derive(Record)]`.

use proc_macro2::TokenStream;
use syn::DeriveInput;

mod crate_path;
mod generate;
mod parse;

/// Parses the annotated struct and emits its trait implementations.
pub(crate) fn derive_record(input: &DeriveInput) -> syn::Result<TokenStream> {
    let (ident, fields, struct_attrs, field_attrs) = parse::parse_input(input)?;
    let krate = crate_path::resolve(struct_attrs.crate_path.as_ref());
    let plan = generate::RecordPlan {
        ident: &ident,
        generics: &input.generics,
        fields: &fields,
        field_attrs: &field_attrs,
        struct_attrs: &struct_attrs,
        krate: &krate,
    };
    Ok(plan.expand())
}
