//! `#[derive(Parameters)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Type, parse2};

use crate::rename::RenameRule;

/// Struct-level options parsed from `#[param(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamStructOptions {
    /// Rename all fields using the given case convention.
    rename_all: Option<RenameRule>,
}

/// Field options parsed from `#[param(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamFieldOptions {
    /// Leave the field out of the parameters.
    skip: bool,
    /// Key in the query string.
    rename: Option<String>,
    /// Unit for a `Duration` field: `seconds` or `milliseconds`.
    precision: Option<syn::Ident>,
}

/// Expand the `#[derive(Parameters)]` macro.
pub fn expand_parameters_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(quote! {
                    impl #impl_generics ::spotkit::ToParameters for #name #ty_generics #where_clause {
                        fn to_parameters(&self) -> ::spotkit::Parameters {
                            ::spotkit::Parameters::new()
                        }
                    }
                });
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Parameters derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Parameters derive only supports structs",
            ));
        }
    };

    let mut field_handlers = Vec::new();

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }

        // Explicit rename > rename_all > field name
        let field_string = field_name.to_string();
        let field_string = field_string.strip_prefix("r#").unwrap_or(&field_string);
        let key = if let Some(rename) = &options.rename {
            rename.clone()
        } else if let Some(rule) = struct_options.rename_all {
            rule.apply_to_field(field_string)
        } else {
            field_string.to_string()
        };

        field_handlers.push(generate_field_handler(field_name, &field.ty, &key, &options));
    }

    Ok(quote! {
        impl #impl_generics ::spotkit::ToParameters for #name #ty_generics #where_clause {
            fn to_parameters(&self) -> ::spotkit::Parameters {
                let mut parameters = ::spotkit::Parameters::new();
                #(#field_handlers)*
                parameters
            }
        }
    })
}

/// Parse struct-level options from `#[param(...)]` attributes.
fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<ParamStructOptions> {
    let mut options = ParamStructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename_all = Some(RenameRule::parse_lit(&value)?);
                Ok(())
            } else {
                Err(meta.error("unknown struct attribute, expected `rename_all`"))
            }
        })?;
    }

    Ok(options)
}

/// Parse field options from `#[param(...)]` attributes.
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<ParamFieldOptions> {
    let mut options = ParamFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else if meta.path.is_ident("precision") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let variant = match value.value().as_str() {
                    "seconds" => "Seconds",
                    "milliseconds" => "Milliseconds",
                    _ => {
                        return Err(syn::Error::new_spanned(
                            &value,
                            "precision must be \"seconds\" or \"milliseconds\"",
                        ));
                    }
                };
                options.precision = Some(syn::Ident::new(variant, value.span()));
            } else {
                return Err(meta.error(
                    "unknown field attribute, expected `skip`, `rename` or `precision`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// Generate code for handling a single field.
fn generate_field_handler(
    field_name: &syn::Ident,
    field_ty: &Type,
    key: &str,
    options: &ParamFieldOptions,
) -> TokenStream {
    let convert = |value: TokenStream| match &options.precision {
        Some(precision) => quote! {
            ::spotkit::ParamValue::duration_in(
                ::std::clone::Clone::clone(#value),
                ::spotkit::TimePrecision::#precision,
            )
        },
        None => quote! {
            ::spotkit::ParamValue::from(::std::clone::Clone::clone(#value))
        },
    };

    if is_type(field_ty, "Option") {
        // None is omitted
        let value = convert(quote!(value));
        quote! {
            if let ::std::option::Option::Some(value) = &self.#field_name {
                parameters.insert(#key, #value);
            }
        }
    } else if is_type(field_ty, "Vec") {
        // An empty list is omitted
        let value = convert(quote!(&self.#field_name));
        quote! {
            if !self.#field_name.is_empty() {
                parameters.insert(#key, #value);
            }
        }
    } else {
        let value = convert(quote!(&self.#field_name));
        quote! {
            parameters.insert(#key, #value);
        }
    }
}

/// Check if the outermost type is `name<...>`.
fn is_type(ty: &Type, name: &str) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == name))
}
