use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields};

/// For every single-field tuple variant, generates a `From` conversion into
/// the enum and a `TryFrom` conversion back out of it.
pub fn derive_from_variants_on(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(en) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "only enums are supported",
        ));
    };

    let enum_ident = &input.ident;

    let mut impls = Vec::new();
    for variant in &en.variants {
        let variant_ident = &variant.ident;
        let Fields::Unnamed(fields) = &variant.fields else {
            continue;
        };
        if fields.unnamed.len() != 1 {
            continue;
        }
        let Field { ty, .. } = &fields.unnamed[0];
        impls.push(quote! {
            impl From<#ty> for #enum_ident {
                fn from(value: #ty) -> Self {
                    Self::#variant_ident(value)
                }
            }

            impl TryFrom<#enum_ident> for #ty {
                type Error = #enum_ident;

                fn try_from(value: #enum_ident) -> ::std::result::Result<Self, Self::Error> {
                    match value {
                        #enum_ident::#variant_ident(inner) => Ok(inner),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }
            }
        });
    }

    Ok(quote! {
        #(#impls)*
    })
}
