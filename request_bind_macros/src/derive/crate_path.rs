//! Path of the runtime crate inside generated impls.
//!
//! Every item the expansion names (`Record`, `FieldPass`, `FieldMeta`,
//! `Bindable`, ...) is reached through this path. Downstream crates that
//! rename the `request_bind` dependency point the derive at the new name
//! with `#[record(crate = "...")]`.

use proc_macro2::TokenStream;
use quote::quote;

/// Tokens naming the runtime crate, `request_bind` unless overridden.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { request_bind }, |path| quote! { #path })
}
