//! Procedural macros for `request_bind`.
//!
//! The [`Record`] derive describes a struct's fields to the binding runtime:
//! their identifiers, tag metadata, and how each one is reached. The runtime
//! resolves names and options from that metadata when a body is bound.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `request_bind::Record`.
///
/// Also implements `Bindable`, `RecordSlot` and `Target` for the struct, so
/// it can be bound directly, nested inside other records, or collected in a
/// `Vec`. The struct must implement `Default` and `Clone`.
///
/// Struct attributes:
/// - `#[record(pre_bind)]`, `#[record(post_bind)]` run the struct's
///   `PreBind`/`PostBind` implementations around the field pass;
/// - `#[record(unmarshal)]` hands the body to the struct's `Unmarshal`
///   implementation instead of binding fields;
/// - `#[record(crate = "path")]` names the runtime crate when it is renamed.
///
/// Field attributes:
/// - `#[request("name,option,option=value")]` is the primary tag;
/// - `#[tag(channel = "name")]` adds a fallback channel;
/// - `#[record(flatten)]` promotes a nested record's fields;
/// - `#[record(accessors)]` or `#[record(getter = "...", setter = "...")]`
///   binds through methods.
#[proc_macro_derive(Record, attributes(record, request, tag))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::derive_record(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
