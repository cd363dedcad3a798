//! Derive macro for structmap's `Structural` reflection contract.
//!
//! `#[derive(Structural)]` generates the `shape()` method from a type's
//! definition:
//!
//! - Named structs become a composite tagged with the type name, fields in
//!   declaration order.
//! - Tuple structs use positional field names (`"0"`, `"1"`, ...).
//! - Unit structs are empty composites (the shape is the tag alone).
//! - Enum variants are tagged `"Type::Variant"` with the variant's fields.
//! - Unions are rejected.
//!
//! Every type parameter receives a `Structural` bound, so generic types
//! derive as long as their fields do.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Data, DataEnum, DeriveInput, Fields, GenericParam, Generics, Ident, Index,
    LitStr,
};

#[proc_macro_derive(Structural)]
pub fn derive_structural(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let name = &input.ident;
    let generics = add_structural_bounds(input.generics.clone());
    let (impl_generics, type_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => {
            let tag = LitStr::new(&name.to_string(), name.span());
            let fields = field_list(&data.fields, &self_access(&data.fields));
            composite(&tag, &fields)
        }
        Data::Enum(data) => enum_shape(name, data),
        Data::Union(_) => {
            return syn::Error::new_spanned(name, "Structural cannot be derived for unions.")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics ::structmap::Structural for #name #type_generics #where_clause {
            fn shape(&self) -> ::structmap::Shape<'_> {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Bound every type parameter by `Structural` so fields of that type can be
/// referenced as trait objects.
fn add_structural_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param
                .bounds
                .push(syn::parse_quote!(::structmap::Structural));
        }
    }
    generics
}

/// Expressions accessing each struct field through `self`, in declaration
/// order.
fn self_access(fields: &Fields) -> Vec<TokenStream2> {
    match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field.ident.as_ref().expect("named field has an ident");
                quote!(&self.#ident)
            })
            .collect(),
        Fields::Unnamed(unnamed) => (0..unnamed.unnamed.len())
            .map(|i| {
                let index = Index::from(i);
                quote!(&self.#index)
            })
            .collect(),
        Fields::Unit => Vec::new(),
    }
}

/// `(name, value)` pairs for a field list, given one accessor expression
/// per field. Named fields keep their names; tuple fields get positional
/// names.
fn field_list(fields: &Fields, access: &[TokenStream2]) -> Vec<TokenStream2> {
    let names: Vec<LitStr> = match fields {
        Fields::Named(named) => named
            .named
            .iter()
            .map(|field| {
                let ident = field.ident.as_ref().expect("named field has an ident");
                LitStr::new(&ident.to_string(), ident.span())
            })
            .collect(),
        Fields::Unnamed(unnamed) => unnamed
            .unnamed
            .iter()
            .enumerate()
            .map(|(i, field)| LitStr::new(&i.to_string(), syn::spanned::Spanned::span(field)))
            .collect(),
        Fields::Unit => Vec::new(),
    };

    names
        .iter()
        .zip(access)
        .map(|(name, expr)| quote!((#name, #expr as &dyn ::structmap::Structural)))
        .collect()
}

fn composite(tag: &LitStr, fields: &[TokenStream2]) -> TokenStream2 {
    quote! {
        ::structmap::Shape::Composite {
            tag: #tag,
            fields: ::std::vec![#(#fields),*],
        }
    }
}

/// One match arm per variant, binding fields by reference and tagging the
/// composite `"Type::Variant"`.
fn enum_shape(name: &Ident, data: &DataEnum) -> TokenStream2 {
    if data.variants.is_empty() {
        // Uninhabited: no value of this type exists to be shaped.
        return quote!(match *self {});
    }

    let arms = data.variants.iter().map(|variant| {
        let variant_name = &variant.ident;
        let tag = LitStr::new(&format!("{name}::{variant_name}"), variant_name.span());

        match &variant.fields {
            Fields::Named(named) => {
                let idents: Vec<&Ident> = named
                    .named
                    .iter()
                    .map(|field| field.ident.as_ref().expect("named field has an ident"))
                    .collect();
                let fields = field_list(
                    &variant.fields,
                    &idents.iter().map(|ident| quote!(#ident)).collect::<Vec<_>>(),
                );
                let body = composite(&tag, &fields);
                quote! {
                    Self::#variant_name { #(#idents),* } => #body
                }
            }
            Fields::Unnamed(unnamed) => {
                let bindings: Vec<Ident> = (0..unnamed.unnamed.len())
                    .map(|i| quote::format_ident!("field{i}"))
                    .collect();
                let fields = field_list(
                    &variant.fields,
                    &bindings
                        .iter()
                        .map(|binding| quote!(#binding))
                        .collect::<Vec<_>>(),
                );
                let body = composite(&tag, &fields);
                quote! {
                    Self::#variant_name(#(#bindings),*) => #body
                }
            }
            Fields::Unit => {
                let body = composite(&tag, &[]);
                quote! {
                    Self::#variant_name => #body
                }
            }
        }
    });

    quote! {
        match self {
            #(#arms),*
        }
    }
}
