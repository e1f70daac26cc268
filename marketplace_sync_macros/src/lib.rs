mod resource;
mod section;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Resource)] derive macro
// ============================================================================

/// Derive macro for the `Resource` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, PartialEq, Serialize, Deserialize, Resource)]
/// #[resource(collection = "listings")]
/// struct Listing {
///     #[resource(id)]
///     pub id: String,
///     pub title: String,
///     pub price_per_night: f64,
/// }
/// ```
///
/// - `#[resource(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[resource(id)]` marks the field used as the identity.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Resource, attributes(resource))]
pub fn derive_resource(input: TokenStream) -> TokenStream {
    resource::derive_resource(input)
}

// ============================================================================
// #[derive(Section)] derive macro
// ============================================================================

/// Derive macro for the draft editor's `Section` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Section)]
/// #[section(name = "header", normalize = "trimmed")]
/// struct HeaderSection {
///     pub title: String,
///     pub subtitle: String,
/// }
/// ```
///
/// - `#[section(name = "...")]` sets the section name. If omitted, defaults to
///   the snake_case struct name with a trailing `Section` removed.
/// - `#[section(normalize = "method")]` names an inherent `fn(&self) -> Self`
///   used to build the save payload. If omitted, the payload is a plain clone.
#[proc_macro_derive(Section, attributes(section))]
pub fn derive_section(input: TokenStream) -> TokenStream {
    section::derive_section(input)
}

pub(crate) fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
