//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates an implementation of the `Record` trait and field name
//! constants for building filters and sort keys.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_record_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let record_attrs = parse_record_attrs(&field.attrs)?;
        if record_attrs.skip {
            continue;
        }

        let query_name = record_attrs
            .rename
            .unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));

        field_constants.push(quote! {
            /// Field name constant for filters and sort keys.
            pub const #const_name: &'static str = #query_name;
        });

        let value_expr = match record_attrs.kind {
            FieldKind::Value => quote! { ::relic_query::ToValue::to_value(&self.#field_name) },
            FieldKind::Nested => quote! { ::relic_query::nested(&self.#field_name) },
            FieldKind::NestedList => quote! { ::relic_query::nested_list(&self.#field_name) },
        };

        field_matches.push(quote! {
            #query_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::relic_query::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::relic_query::Value<'_> {
                match name {
                    #(#field_matches)*
                    _ => ::relic_query::Value::Undefined,
                }
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}
