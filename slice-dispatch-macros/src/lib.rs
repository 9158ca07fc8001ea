//! Procedural macros for slice-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Prefix for Redux-style type tags: `namespace/VARIANT_NAME`
    #[darling(default)]
    namespace: Option<String>,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit tag for this variant (still prefixed by the namespace)
    #[darling(default)]
    rename: Option<String>,

    /// Delegate `name()` to the single wrapped action
    #[darling(default)]
    forward: bool,
}

/// Split a PascalCase string into parts
fn split_pascal_case(s: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();

    for ch in s.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            parts.push(current);
            current = String::new();
        }
        current.push(ch);
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

/// Convert PascalCase to SCREAMING_SNAKE_CASE
fn to_screaming_snake_case(s: &str) -> String {
    split_pascal_case(s)
        .iter()
        .map(|part| part.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

fn type_tag(namespace: Option<&str>, variant: &ActionVariant) -> String {
    let local = match &variant.rename {
        Some(rename) => rename.clone(),
        None if namespace.is_some() => to_screaming_snake_case(&variant.ident.to_string()),
        None => variant.ident.to_string(),
    };
    match namespace {
        Some(ns) => format!("{ns}/{local}"),
        None => local,
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method returning a static type tag per variant.
///
/// - Without attributes the tag is the variant name.
/// - `#[action(namespace = "userLocation")]` on the enum turns variant
///   `FetchRequest` into `"userLocation/FETCH_REQUEST"`.
/// - `#[action(rename = "LOAD")]` on a variant overrides its part of the tag.
/// - `#[action(forward)]` on a single-field tuple variant returns the wrapped
///   action's own tag, so root actions keep the slice's tags.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(namespace = "userLocation")]
/// enum UserLocationAction {
///     FetchRequest,
///     ToggleSelection(UserLocationId),
/// }
///
/// #[derive(Action, Clone, Debug)]
/// enum Action {
///     #[action(forward)]
///     UserLocation(UserLocationAction),
///     Quit,
/// }
///
/// assert_eq!(UserLocationAction::FetchRequest.name(), "userLocation/FETCH_REQUEST");
/// assert_eq!(Action::UserLocation(UserLocationAction::FetchRequest).name(), "userLocation/FETCH_REQUEST");
/// assert_eq!(Action::Quit.name(), "Quit");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let mut name_arms = Vec::with_capacity(variants.len());
    for v in variants {
        let variant_name = &v.ident;

        if v.forward {
            let is_newtype = matches!(v.fields.style, darling::ast::Style::Tuple)
                && v.fields.fields.len() == 1;
            if !is_newtype {
                return syn::Error::new_spanned(
                    variant_name,
                    "#[action(forward)] requires a single-field tuple variant",
                )
                .to_compile_error()
                .into();
            }
            name_arms.push(quote! {
                #name::#variant_name(inner) => slice_dispatch::Action::name(inner)
            });
            continue;
        }

        let tag = type_tag(opts.namespace.as_deref(), v);
        let arm = match &v.fields.style {
            darling::ast::Style::Unit => quote! {
                #name::#variant_name => #tag
            },
            darling::ast::Style::Tuple => quote! {
                #name::#variant_name(..) => #tag
            },
            darling::ast::Style::Struct => quote! {
                #name::#variant_name { .. } => #tag
            },
        };
        name_arms.push(arm);
    }

    let expanded = quote! {
        impl slice_dispatch::Action for #name {
            fn name(&self) -> &'static str {
                match self {
                    #(#name_arms),*
                }
            }
        }
    };

    TokenStream::from(expanded)
}
