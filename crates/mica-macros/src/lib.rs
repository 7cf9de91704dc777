extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

fn named_fields(input: &DeriveInput) -> syn::Result<Vec<Ident>> {
    if let syn::Data::Struct(data) = &input.data {
        if let syn::Fields::Named(fields_named) = &data.fields {
            return Ok(fields_named
                .named
                .iter()
                .filter_map(|field| field.ident.clone())
                .collect());
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        "codec derives only support structs with named fields",
    ))
}

/// Decodes every field in declaration order, tagging failures with the field name.
#[proc_macro_derive(CodecDecode)]
pub fn decode_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded: TokenStream = quote! {
        impl #impl_generics mica_codec::coding::Decoder for #name #ty_generics #where_clause {
            fn decode<R: std::io::Read>(reader: &mut R) -> mica_codec::error::Result<Self> {
                Ok(Self {
                    #(
                        #fields: <_ as mica_codec::coding::Decoder>::decode(reader).map_err(|e| mica_codec::error::CodecError::CantParseField {
                            field: stringify!(#fields).to_string(),
                            source: Box::new(e),
                        })?,
                    )*
                })
            }
        }
    };
    expanded.into()
}

#[proc_macro_derive(CodecEncode)]
pub fn encode_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let fields = match named_fields(&input) {
        Ok(fields) => fields,
        Err(e) => return e.to_compile_error().into(),
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded: TokenStream = quote! {
        impl #impl_generics mica_codec::coding::Encoder for #name #ty_generics #where_clause {
            fn encode<W: std::io::Write>(&self, writer: &mut W) -> mica_codec::error::Result<usize> {
                let mut bytes_written = 0;
                #(
                    bytes_written += <_ as mica_codec::coding::Encoder>::encode(&self.#fields, writer)?;
                )*
                Ok(bytes_written)
            }
        }
    };
    expanded.into()
}
