//! `#[derive(RawString)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, parse2};

use crate::rename::RenameRule;

/// Expand the `#[derive(RawString)]` macro.
pub fn expand_raw_string_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "RawString derive does not support generic enums",
        ));
    }

    let syn::Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input,
            "RawString derive only supports enums",
        ));
    };

    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input,
            "RawString derive needs at least one variant",
        ));
    }

    let mut rename_all = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("raw") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                rename_all = Some(RenameRule::parse_lit(&value)?);
                Ok(())
            } else {
                Err(meta.error("unknown enum attribute, expected `rename_all`"))
            }
        })?;
    }

    let mut idents = Vec::new();
    let mut raws = Vec::new();

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "RawString derive only supports fieldless variants",
            ));
        }

        let mut rename = None;
        for attr in &variant.attrs {
            if !attr.path().is_ident("raw") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    Err(meta.error("unknown variant attribute, expected `rename`"))
                }
            })?;
        }

        let ident = variant.ident.to_string();
        let raw = match (rename, rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply_to_variant(&ident),
            (None, None) => ident,
        };

        if raws.contains(&raw) {
            return Err(syn::Error::new_spanned(
                variant,
                format!("duplicate raw value \"{raw}\""),
            ));
        }

        idents.push(&variant.ident);
        raws.push(raw);
    }

    Ok(quote! {
        impl ::spotkit::RawString for #name {
            const CASES: &'static [Self] = &[#(Self::#idents),*];

            fn raw_value(&self) -> &'static str {
                match self {
                    #(Self::#idents => #raws,)*
                }
            }
        }

        impl ::std::fmt::Display for #name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(::spotkit::RawString::raw_value(self))
            }
        }

        impl ::spotkit::serde::Serialize for #name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::spotkit::serde::Serializer,
            {
                serializer.serialize_str(::spotkit::RawString::raw_value(self))
            }
        }

        impl<'de> ::spotkit::serde::Deserialize<'de> for #name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::spotkit::serde::Deserializer<'de>,
            {
                ::spotkit::deserialize_raw_case(deserializer)
            }
        }

        impl ::std::convert::From<#name> for ::spotkit::ParamValue {
            fn from(value: #name) -> Self {
                ::spotkit::ParamValue::Text(
                    ::std::string::ToString::to_string(::spotkit::RawString::raw_value(&value)),
                )
            }
        }
    })
}
