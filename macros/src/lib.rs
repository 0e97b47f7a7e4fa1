//! Derive macros for `straightline`.
//!
//! `#[derive(ChainedError)]` wires a struct's cause slot into the
//! `straightline::ChainedError` trait. The struct still derives its own
//! `Display` and `Error` impls (usually through `thiserror`).

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, Ident};

/// Implements `straightline::ChainedError` for a struct with named fields.
///
/// The cause slot is the field marked `#[cause]`, or the field named
/// `cause` when no field carries the attribute. The field must have type
/// `straightline::CauseSlot`.
///
/// ```ignore
/// #[derive(Debug, thiserror::Error, ChainedError)]
/// #[error("request failed: {reason}")]
/// struct RequestError {
///     reason: String,
///     #[cause]
///     upstream: CauseSlot,
/// }
/// ```
#[proc_macro_derive(ChainedError, attributes(cause))]
pub fn derive_chained_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let field = cause_field(input)?;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::straightline::ChainedError for #name #ty_generics #where_clause {
            fn cause_slot(&self) -> &::straightline::CauseSlot {
                &self.#field
            }

            fn cause_slot_mut(&mut self) -> &mut ::straightline::CauseSlot {
                &mut self.#field
            }
        }
    })
}

fn cause_field(input: &DeriveInput) -> syn::Result<Ident> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "ChainedError can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "ChainedError can only be derived for structs",
            ))
        }
    };

    let mut marked = fields
        .iter()
        .filter(|f| f.attrs.iter().any(|a| a.path().is_ident("cause")));
    if let Some(field) = marked.next() {
        if let Some(extra) = marked.next() {
            return Err(Error::new_spanned(
                extra,
                "only one field may be marked #[cause]",
            ));
        }
        // Named fields always carry an ident.
        return field
            .ident
            .clone()
            .ok_or_else(|| Error::new(Span::call_site(), "unnamed #[cause] field"));
    }

    fields
        .iter()
        .filter_map(|f| f.ident.clone())
        .find(|ident| ident == "cause")
        .ok_or_else(|| {
            Error::new_spanned(
                &input.ident,
                "ChainedError needs a `cause: CauseSlot` field or a field marked #[cause]",
            )
        })
}
