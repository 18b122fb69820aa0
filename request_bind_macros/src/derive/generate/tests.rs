//! Unit tests for the `Record` token generators.

use super::RecordPlan;
use crate::derive::parse::parse_input;
use anyhow::{Result, anyhow, ensure};
use quote::quote;
use rstest::rstest;
use syn::{DeriveInput, parse_quote};

fn expand(input: &DeriveInput) -> Result<String> {
    let (ident, fields, struct_attrs, field_attrs) =
        parse_input(input).map_err(|err| anyhow!(err))?;
    let krate = quote! { request_bind };
    let plan = RecordPlan {
        ident: &ident,
        generics: &input.generics,
        fields: &fields,
        field_attrs: &field_attrs,
        struct_attrs: &struct_attrs,
        krate: &krate,
    };
    Ok(plan.expand().to_string())
}

fn normalise(tokens: &proc_macro2::TokenStream) -> String {
    tokens.to_string()
}

#[rstest]
fn emits_field_metadata_for_every_field() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[request("user,required")]
            #[tag(db = "user_name")]
            name: String,
            #[request("-")]
            secret: String,
        }
    };
    let tokens = expand(&input)?;
    let name_meta = normalise(&quote! {
        request_bind::FieldMeta::new("name", "user,required", &[("db", "user_name")])
    });
    let secret_meta = normalise(&quote! {
        request_bind::FieldMeta::new("secret", "-", &[])
    });
    ensure!(tokens.contains(&name_meta), "missing name metadata: {tokens}");
    ensure!(tokens.contains(&secret_meta), "missing secret metadata: {tokens}");
    Ok(())
}

#[rstest]
fn skipped_fields_are_not_bound() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            kept: u32,
            #[request("-")]
            skipped: u32,
        }
    };
    let tokens = expand(&input)?;
    let kept = normalise(&quote! {
        pass.field(&request_bind::FieldMeta::new("kept", "", &[]), &mut self.kept);
    });
    ensure!(tokens.contains(&kept), "missing kept binding: {tokens}");
    ensure!(
        !tokens.contains("& mut self . skipped"),
        "skipped field bound: {tokens}"
    );
    Ok(())
}

#[rstest]
fn flattened_fields_use_flatten_pass() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[record(flatten)]
            inner: Option<Inner>,
        }
    };
    let tokens = expand(&input)?;
    let meta = normalise(&quote! { request_bind::FieldMeta::flattened("inner") });
    let call = normalise(&quote! {
        pass.flatten(&request_bind::FieldMeta::flattened("inner"), &mut self.inner);
    });
    ensure!(tokens.contains(&meta), "missing flattened metadata: {tokens}");
    ensure!(tokens.contains(&call), "missing flatten call: {tokens}");
    Ok(())
}

#[rstest]
fn accessor_fields_bind_through_methods() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            #[record(accessors)]
            value: u32,
        }
    };
    let tokens = expand(&input)?;
    ensure!(tokens.contains("self . value ()"), "missing getter call: {tokens}");
    ensure!(tokens.contains("self . set_value (value)"), "missing setter call: {tokens}");
    Ok(())
}

#[rstest]
#[case::pre_bind(quote! { #[record(pre_bind)] }, "fn pre_bind_hook")]
#[case::post_bind(quote! { #[record(post_bind)] }, "fn post_bind_hook")]
#[case::unmarshal(quote! { #[record(unmarshal)] }, "fn unmarshaller")]
fn hooks_are_emitted_on_request(
    #[case] attr: proc_macro2::TokenStream,
    #[case] expected: &str,
) -> Result<()> {
    let input: DeriveInput = syn::parse2(quote! {
        #attr
        struct Demo {
            value: u32,
        }
    })?;
    let tokens = expand(&input)?;
    ensure!(tokens.contains(expected), "missing {expected}: {tokens}");
    Ok(())
}

#[rstest]
fn hooks_are_absent_by_default() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo {
            value: u32,
        }
    };
    let tokens = expand(&input)?;
    for hook in ["pre_bind_hook", "post_bind_hook", "unmarshaller"] {
        ensure!(!tokens.contains(hook), "unexpected {hook}: {tokens}");
    }
    Ok(())
}

#[rstest]
fn generics_are_carried_into_impls() -> Result<()> {
    let input: DeriveInput = parse_quote! {
        struct Demo<T: Clone + Default> {
            value: T,
        }
    };
    let tokens = expand(&input)?;
    let header = normalise(&quote! {
        impl<T: Clone + Default> request_bind::Target for Demo<T>
    });
    ensure!(tokens.contains(&header), "missing generic impl header: {tokens}");
    Ok(())
}
