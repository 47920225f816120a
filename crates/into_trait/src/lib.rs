extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DeriveInput, Fields, Path, parse_macro_input, spanned::Spanned};

/// Derives `into_trait_object` / `as_trait_object` for an enum whose variants
/// each wrap exactly one value implementing the trait named by
/// `#[trait_name(Trait)]`.
#[proc_macro_derive(IntoTraitObject, attributes(trait_name))]
pub fn derive_into_trait_object(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_name = &input.ident;
    let trait_path = trait_path(input)?;

    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "IntoTraitObject can only be derived for enums",
        ));
    };

    let mut names = Vec::with_capacity(variants.len());
    for v in variants {
        match &v.fields {
            Fields::Unnamed(f) if f.unnamed.len() == 1 => names.push(&v.ident),
            _ => {
                return Err(syn::Error::new(
                    v.span(),
                    "IntoTraitObject variants must wrap exactly one value",
                ));
            }
        }
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #enum_name #ty_generics #where_clause {
            pub fn into_trait_object(self) -> Box<dyn #trait_path> {
                match self {
                    #( #enum_name::#names(inner) => Box::new(inner) as Box<dyn #trait_path>, )*
                }
            }

            pub fn as_trait_object(&self) -> &dyn #trait_path {
                match self {
                    #( #enum_name::#names(inner) => inner as &dyn #trait_path, )*
                }
            }
        }
    })
}

fn trait_path(input: &DeriveInput) -> syn::Result<Path> {
    for attr in &input.attrs {
        if attr.path().is_ident("trait_name") {
            return attr.parse_args::<Path>();
        }
    }
    Err(syn::Error::new(
        input.ident.span(),
        "missing #[trait_name(TraitName)] on enum deriving IntoTraitObject",
    ))
}
