use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, LitStr};

use crate::to_snake_case;

pub fn derive_section(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let (section_name, normalize) = parse_struct_attrs(&input);
    let section_name = section_name.unwrap_or_else(|| default_name(&name.to_string()));

    let normalized = normalize.map(|method| {
        let method = format_ident!("{}", method);
        quote! {
            fn normalized(&self) -> Self {
                self.#method()
            }
        }
    });

    let expanded = quote! {
        impl marketplace_sync::Section for #name {
            const NAME: &'static str = #section_name;

            #normalized
        }
    };

    TokenStream::from(expanded)
}

fn parse_struct_attrs(input: &DeriveInput) -> (Option<String>, Option<String>) {
    let mut section_name = None;
    let mut normalize = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("section") {
            continue;
        }

        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                section_name = Some(value.value());
            } else if meta.path.is_ident("normalize") {
                let value: LitStr = meta.value()?.parse()?;
                normalize = Some(value.value());
            }
            Ok(())
        });
    }

    (section_name, normalize)
}

fn default_name(ident: &str) -> String {
    let trimmed = ident.strip_suffix("Section").unwrap_or(ident);
    to_snake_case(trimmed)
}
