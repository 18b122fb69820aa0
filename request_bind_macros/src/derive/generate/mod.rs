//! Token generation for the `Record`, `Bindable`, `RecordSlot` and `Target`
//! implementations.

use proc_macro2::TokenStream;
use quote::quote;

use super::parse::{Access, FieldAttrs, StructAttrs};

mod hooks;
#[cfg(test)]
mod tests;

/// Everything the generator needs about one struct.
pub(crate) struct RecordPlan<'a> {
    pub ident: &'a syn::Ident,
    pub generics: &'a syn::Generics,
    pub fields: &'a [syn::Field],
    pub field_attrs: &'a [FieldAttrs],
    pub struct_attrs: &'a StructAttrs,
    pub krate: &'a TokenStream,
}

impl RecordPlan<'_> {
    pub(crate) fn expand(&self) -> TokenStream {
        let record = self.record_impl();
        let bindable = self.bindable_impl();
        let slot = self.slot_impl();
        let target = self.target_impl();
        quote! {
            #record
            #bindable
            #slot
            #target
        }
    }

    fn field_pairs(&self) -> impl Iterator<Item = (&syn::Ident, &FieldAttrs)> {
        self.fields
            .iter()
            .zip(self.field_attrs)
            .filter_map(|(field, attrs)| field.ident.as_ref().map(|ident| (ident, attrs)))
    }

    fn field_meta(&self, ident: &syn::Ident, attrs: &FieldAttrs) -> TokenStream {
        let krate = self.krate;
        let name = syn::ext::IdentExt::unraw(ident).to_string();
        if attrs.access == Access::Flatten {
            return quote! { #krate::FieldMeta::flattened(#name) };
        }
        let request = attrs.request_tag();
        let tags = attrs.tags.iter().map(|(channel, tag)| quote! { (#channel, #tag) });
        quote! { #krate::FieldMeta::new(#name, #request, &[#(#tags),*]) }
    }

    fn field_binding(&self, ident: &syn::Ident, attrs: &FieldAttrs) -> TokenStream {
        if attrs.is_skipped() {
            return TokenStream::new();
        }
        let meta = self.field_meta(ident, attrs);
        match &attrs.access {
            Access::Direct => quote! {
                pass.field(&#meta, &mut self.#ident);
            },
            Access::Flatten => quote! {
                pass.flatten(&#meta, &mut self.#ident);
            },
            Access::Accessors { getter, setter } => quote! {
                if let ::core::option::Option::Some(descriptor) = pass.describe(&#meta) {
                    if let ::core::option::Option::Some(value) = pass.detached(descriptor, self.#getter()) {
                        self.#setter(value);
                    }
                }
            },
        }
    }

    fn zero_check(&self, ident: &syn::Ident, attrs: &FieldAttrs) -> Option<TokenStream> {
        if attrs.is_skipped() {
            return None;
        }
        let krate = self.krate;
        Some(match &attrs.access {
            Access::Direct | Access::Flatten => quote! { #krate::Bindable::is_zero(&self.#ident) },
            Access::Accessors { getter, .. } => quote! { #krate::Bindable::is_zero(&self.#getter()) },
        })
    }

    fn record_impl(&self) -> TokenStream {
        let krate = self.krate;
        let ident = self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let metas = self.field_pairs().map(|(field, attrs)| self.field_meta(field, attrs));
        let bindings = self
            .field_pairs()
            .map(|(field, attrs)| self.field_binding(field, attrs));
        let hooks = hooks::hook_methods(self.struct_attrs, krate);
        quote! {
            impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
                const FIELDS: &'static [#krate::FieldMeta] = &[#(#metas),*];

                fn bind_fields(&mut self, pass: &mut #krate::FieldPass<'_>) {
                    #(#bindings)*
                }

                #hooks
            }
        }
    }

    fn bindable_impl(&self) -> TokenStream {
        let krate = self.krate;
        let ident = self.ident;
        let name = ident.to_string();
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        let checks: Vec<TokenStream> = self
            .field_pairs()
            .filter_map(|(field, attrs)| self.zero_check(field, attrs))
            .collect();
        let is_zero = if checks.is_empty() {
            quote! { true }
        } else {
            quote! { #(#checks)&&* }
        };
        quote! {
            impl #impl_generics #krate::Bindable for #ident #ty_generics #where_clause {
                fn type_name() -> &'static str {
                    #name
                }

                fn is_zero(&self) -> bool {
                    #is_zero
                }

                fn coerce(
                    &mut self,
                    value: #krate::Value,
                    cx: #krate::BindContext<'_>,
                ) -> ::core::result::Result<(), #krate::FieldError> {
                    #krate::coerce_record(self, value, cx)
                }
            }
        }
    }

    fn slot_impl(&self) -> TokenStream {
        let krate = self.krate;
        let ident = self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        quote! {
            impl #impl_generics #krate::RecordSlot for #ident #ty_generics #where_clause {
                type Record = Self;

                fn from_record(record: Self) -> Self {
                    record
                }

                fn record_mut(&mut self) -> ::core::option::Option<&mut Self> {
                    ::core::option::Option::Some(self)
                }
            }
        }
    }

    fn target_impl(&self) -> TokenStream {
        let krate = self.krate;
        let ident = self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        quote! {
            impl #impl_generics #krate::Target for #ident #ty_generics #where_clause {
                fn bind_target(
                    &mut self,
                    binder: &#krate::Binder,
                    body: #krate::Body<'_>,
                    mode: #krate::Mode,
                ) -> #krate::BindResult<()> {
                    #krate::bind_record(binder, self, body, mode)
                }
            }
        }
    }
}
