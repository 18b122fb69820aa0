//! Record hook methods enabled by struct attributes.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive::parse::StructAttrs;

/// Emits the `Record` hook overrides selected by `#[record(...)]`.
pub(crate) fn hook_methods(attrs: &StructAttrs, krate: &TokenStream) -> TokenStream {
    let pre_bind = attrs.pre_bind.then(|| {
        quote! {
            fn pre_bind_hook(&mut self) -> ::core::result::Result<(), #krate::BoxError> {
                <Self as #krate::PreBind>::pre_bind(self)
            }
        }
    });
    let post_bind = attrs.post_bind.then(|| {
        quote! {
            fn post_bind_hook(&mut self) -> ::core::result::Result<(), #krate::BoxError> {
                <Self as #krate::PostBind>::post_bind(self)
            }
        }
    });
    let unmarshal = attrs.unmarshal.then(|| {
        quote! {
            fn unmarshaller(&mut self) -> ::core::option::Option<&mut dyn #krate::Unmarshal> {
                ::core::option::Option::Some(self)
            }
        }
    });
    quote! {
        #pre_bind
        #post_bind
        #unmarshal
    }
}
