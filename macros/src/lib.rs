//! Proc macros for gilt-canvas: `view!` template composition.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `gilt-canvas`.

use proc_macro::TokenStream;

mod view_macro;

/// Markup-style template composition macro.
///
/// Expands to a single `gilt_canvas::template::TemplateNode` expression.
///
/// # Syntax
///
/// - `<tag />` is an element without children
/// - `<tag attr="val"> ... </tag>` is an element with children
///
/// Tag and attribute names may contain hyphens (`<color-picker />`,
/// `data-role="x"`). Attribute values are string literals, which may hold
/// `{path}` binding placeholders, or a braced Rust expression whose value
/// converts into `gilt_canvas::value::Value`.
///
/// # Example
///
/// ```ignore
/// let template = view! {
///     <div id="root" class="{theme}">
///         <text content="Hello {user.name}" />
///         <input value="{user.name}" />
///         <slider value={50} />
///     </div>
/// };
/// ```
#[proc_macro]
pub fn view(input: TokenStream) -> TokenStream {
    view_macro::view_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
