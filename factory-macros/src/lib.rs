//! Procedural macros for person implementation declarations.

use proc_macro::TokenStream;

mod person_type;

/// Declares a person implementation and the deciding-factor keys it answers to.
///
/// The annotated struct is registered at link time with the `persons`
/// plugin slot, so scanning discovery finds it without any manual table.
///
/// ```ignore
/// #[person_type("female", "f", name = "Female")]
/// #[derive(Debug, Default)]
/// pub struct Female { id: InstanceId }
/// ```
///
/// Arguments:
/// - string literals: keys, at least one, all distinct and non-empty
/// - `name = "..."`: display name, defaults to `[unassigned]`
/// - `constructor = path`: fallible `fn() -> Result<Self, ConstructionError>`
///   used instead of `Default::default()`
///
/// With no arguments the type is catalogued without a declaration: it can be
/// resolved by identifier but is never picked up by a scan.
#[proc_macro_attribute]
pub fn person_type(attr: TokenStream, item: TokenStream) -> TokenStream {
    person_type::expand(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
