// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This crate provides procedural macros for the Lumen settings registry.
//!
//! The generated code refers to `::lumen_settings`, so these derives are meant
//! to be used through the re-exports of that crate.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Data, DataEnum, DataStruct, DeriveInput, Expr, ExprLit, Field, Fields,
    Ident, Lit, LitBool, LitStr, Token, Variant,
};

/// Derives `lumen_settings::SettingsCategory` for a struct with named fields.
///
/// Every field becomes one settings field, in declaration order. Metadata is
/// attached with `#[setting(...)]`:
///
/// * `min = expr`, `max = expr`, `step = expr`
/// * `display_name = "..."`, `help = "..."`
/// * `hdr` or `hdr = bool`
/// * `conversion = Square` (any `ConversionMode` variant)
/// * `shader = false` to keep a field out of the constant buffer
///
/// The category name defaults to the struct name and can be overridden with
/// `#[settings(name = "...")]`.
#[proc_macro_derive(Settings, attributes(setting, settings))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_settings(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `lumen_settings::SettingEnum` and `lumen_settings::SettingType` for
/// a fieldless enum.
///
/// Variants are indexed by position. Each variant may carry `#[label("...")]`;
/// unlabeled variants use their identifier as label.
#[proc_macro_derive(SettingEnum, attributes(label))]
pub fn derive_setting_enum(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_setting_enum(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_settings(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "`Settings` can only be derived for structs with named fields",
            ))
        }
    };

    let category_name = category_name(input)?;

    let mut decls = Vec::with_capacity(fields.len());
    let mut getters = Vec::with_capacity(fields.len());
    let mut setters = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let Some(ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let ty = &field.ty;
        let field_name = ident.to_string();
        let attributes = field_attributes(field)?;

        decls.push(quote! {
            ::lumen_settings::FieldDecl::of::<#ty>(#field_name)
                #(.with(#attributes))*
        });
        getters.push(quote! {
            #index => ::std::option::Option::Some(
                ::lumen_settings::SettingType::to_value(self.#ident)
            )
        });
        setters.push(quote! {
            #index => match <#ty as ::lumen_settings::SettingType>::from_value(value) {
                ::std::option::Option::Some(value) => {
                    self.#ident = value;
                    true
                }
                ::std::option::Option::None => false,
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::lumen_settings::SettingsCategory for #name #ty_generics #where_clause {
            const NAME: &'static str = #category_name;

            fn fields() -> ::std::vec::Vec<::lumen_settings::FieldDecl> {
                ::std::vec![#(#decls),*]
            }

            fn get(&self, index: usize) -> ::std::option::Option<::lumen_settings::SettingValue> {
                match index {
                    #(#getters,)*
                    _ => ::std::option::Option::None,
                }
            }

            fn set(&mut self, index: usize, value: ::lumen_settings::SettingValue) -> bool {
                match index {
                    #(#setters,)*
                    _ => false,
                }
            }
        }
    })
}

/// Reads `#[settings(name = "...")]`, falling back to the type name.
fn category_name(input: &DeriveInput) -> syn::Result<String> {
    let mut name = input.ident.to_string();
    for attr in input.attrs.iter().filter(|a| a.path().is_ident("settings")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                name = value.value();
                Ok(())
            } else {
                Err(meta.error("unknown settings attribute; expected `name`"))
            }
        })?;
    }
    Ok(name)
}

/// Translates the `#[setting(...)]` keys of one field into `Attribute` values.
///
/// Semantic checks (legal kinds, bounds order, duplicates) are left to
/// discovery so hand-written declarations get exactly the same validation.
fn field_attributes(field: &Field) -> syn::Result<Vec<TokenStream2>> {
    let mut attributes = Vec::new();
    for attr in field.attrs.iter().filter(|a| a.path().is_ident("setting")) {
        attr.parse_nested_meta(|meta| {
            let key = meta
                .path
                .get_ident()
                .map(Ident::to_string)
                .unwrap_or_default();
            let tokens = match key.as_str() {
                "min" => {
                    let value: Expr = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::Min((#value) as f32) }
                }
                "max" => {
                    let value: Expr = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::Max((#value) as f32) }
                }
                "step" => {
                    let value: Expr = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::Step((#value) as f32) }
                }
                "display_name" => {
                    let value: LitStr = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::DisplayName(#value) }
                }
                "help" => {
                    let value: LitStr = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::HelpText(#value) }
                }
                "hdr" => {
                    let enabled = if meta.input.peek(Token![=]) {
                        meta.value()?.parse::<LitBool>()?.value
                    } else {
                        true
                    };
                    quote! { ::lumen_settings::Attribute::Hdr(#enabled) }
                }
                "conversion" => {
                    let mode: Ident = meta.value()?.parse()?;
                    quote! {
                        ::lumen_settings::Attribute::Conversion(
                            ::lumen_settings::ConversionMode::#mode
                        )
                    }
                }
                "shader" => {
                    let visible: LitBool = meta.value()?.parse()?;
                    quote! { ::lumen_settings::Attribute::ShaderVisible(#visible) }
                }
                _ => {
                    return Err(meta.error(
                        "unknown setting attribute; expected one of `min`, `max`, `step`, \
                         `display_name`, `help`, `hdr`, `conversion`, `shader`",
                    ))
                }
            };
            attributes.push(tokens);
            Ok(())
        })?;
    }
    Ok(attributes)
}

fn expand_setting_enum(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let Data::Enum(DataEnum { variants, .. }) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "`SettingEnum` can only be derived for enums",
        ));
    };

    let mut labels = Vec::with_capacity(variants.len());
    let mut to_index = Vec::with_capacity(variants.len());
    let mut from_index = Vec::with_capacity(variants.len());

    for (position, variant) in variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "setting enums may only contain unit variants",
            ));
        }
        check_discriminant(variant, position)?;

        let ident = &variant.ident;
        let index = position as u32;
        labels.push(variant_label(variant)?.unwrap_or_else(|| ident.to_string()));
        to_index.push(quote! { Self::#ident => #index });
        from_index.push(quote! { #index => ::std::option::Option::Some(Self::#ident) });
    }

    let variant_count = labels.len() as u32;

    Ok(quote! {
        impl ::lumen_settings::SettingEnum for #name {
            const LABELS: &'static [&'static str] = &[#(#labels),*];

            fn index(self) -> u32 {
                match self {
                    #(#to_index,)*
                }
            }

            fn from_index(index: u32) -> ::std::option::Option<Self> {
                match index {
                    #(#from_index,)*
                    _ => ::std::option::Option::None,
                }
            }
        }

        impl ::lumen_settings::SettingType for #name {
            fn kind() -> ::lumen_settings::ValueKind {
                ::lumen_settings::ValueKind::Enum { variant_count: #variant_count }
            }

            fn labels() -> ::std::option::Option<&'static [&'static str]> {
                ::std::option::Option::Some(<Self as ::lumen_settings::SettingEnum>::LABELS)
            }

            fn to_value(self) -> ::lumen_settings::SettingValue {
                ::lumen_settings::SettingValue::Enum(
                    <Self as ::lumen_settings::SettingEnum>::index(self)
                )
            }

            fn from_value(value: ::lumen_settings::SettingValue) -> ::std::option::Option<Self> {
                match value {
                    ::lumen_settings::SettingValue::Enum(index) => {
                        <Self as ::lumen_settings::SettingEnum>::from_index(index)
                    }
                    _ => ::std::option::Option::None,
                }
            }
        }
    })
}

/// Explicit discriminants are allowed only when they equal the variant position,
/// so the packed index always matches the label table.
fn check_discriminant(variant: &Variant, position: usize) -> syn::Result<()> {
    let Some((_, discriminant)) = &variant.discriminant else {
        return Ok(());
    };
    let value = match discriminant {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<usize>()?,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "setting enum discriminants must be integer literals",
            ))
        }
    };
    if value != position {
        return Err(syn::Error::new_spanned(
            discriminant,
            format!("setting enums must be contiguous from zero: expected discriminant {position}"),
        ));
    }
    Ok(())
}

fn variant_label(variant: &Variant) -> syn::Result<Option<String>> {
    let mut label = None;
    for attr in variant.attrs.iter().filter(|a| a.path().is_ident("label")) {
        if label.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate `label` attribute"));
        }
        label = Some(attr.parse_args::<LitStr>()?.value());
    }
    Ok(label)
}
