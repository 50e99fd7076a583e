//! Procedural macros for the geoguessr-models library

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro rendering a model as an indented field tree
///
/// The generated code walks the named fields of the struct in declaration order
/// and hands each one to its `TreeValue` implementation. Scalars render as
/// `name (kind) = value`, nested models, lists and maps render as a heading
/// followed by their children one level deeper.
///
/// Three impls are generated:
///
/// - `ToTree`, writing every field of the struct
/// - `TreeValue`, so the struct can itself be a field of another model
/// - `Display`, delegating to `ToTree::to_tree`
///
/// # Attributes
///
/// - `#[tree(skip)]` on a field leaves it out of the rendering
///
/// # Example
///
/// ```ignore
/// use geoguessr_models::ToTree;
///
/// #[derive(ToTree)]
/// struct Score {
///     amount: Option<f64>,
///     unit: Option<String>,
/// }
/// ```
#[proc_macro_derive(ToTree, attributes(tree))]
pub fn derive_to_tree(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return syn::Error::new_spanned(name, "ToTree requires a struct with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "ToTree can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let mut writes = Vec::new();
    for field in fields {
        let mut skip = false;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("tree")) {
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported tree attribute, expected `skip`"))
                }
            });
            if let Err(err) = parsed {
                return err.to_compile_error().into();
            }
        }
        if skip {
            continue;
        }

        // Named fields always carry an ident
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let label = ident.to_string();
        writes.push(quote! {
            ::geoguessr_models::tree::TreeValue::write_value(&self.#ident, #label, out);
        });
    }

    let expanded = quote! {
        impl #impl_generics ::geoguessr_models::tree::ToTree for #name #ty_generics #where_clause {
            fn write_tree(&self, out: &mut ::geoguessr_models::tree::TreeWriter) {
                #(#writes)*
            }
        }

        impl #impl_generics ::geoguessr_models::tree::TreeValue for #name #ty_generics #where_clause {
            fn write_value(&self, name: &str, out: &mut ::geoguessr_models::tree::TreeWriter) {
                out.branch(name, #type_name, |out| {
                    ::geoguessr_models::tree::ToTree::write_tree(self, out)
                });
            }
        }

        impl #impl_generics ::core::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(::geoguessr_models::tree::ToTree::to_tree(self).trim_end())
            }
        }
    };

    TokenStream::from(expanded)
}
