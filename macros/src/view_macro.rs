//! view! macro: parse markup-style syntax and generate template builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Expr, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A possibly hyphenated name: `div`, `color-picker`, `data-role`.
#[derive(Clone)]
pub(crate) struct Name {
    pub text: String,
    pub span: Span,
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl Parse for Name {
    fn parse(input: ParseStream) -> Result<Self> {
        let first = Ident::parse_any(input)?;
        let span = first.span();
        let mut text = first.to_string();
        while input.peek(Token![-]) {
            input.parse::<Token![-]>()?;
            text.push('-');
            text.push_str(&Ident::parse_any(input)?.to_string());
        }
        Ok(Name { text, span })
    }
}

/// An attribute value: a string literal or a braced expression.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(LitStr),
    Expr(Box<Expr>),
}

impl std::fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttrValue::Lit(lit) => write!(f, "{:?}", lit.value()),
            AttrValue::Expr(_) => f.write_str("{expr}"),
        }
    }
}

impl Parse for AttrValue {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(syn::token::Brace) {
            let content;
            syn::braced!(content in input);
            Ok(AttrValue::Expr(Box::new(content.parse()?)))
        } else {
            Ok(AttrValue::Lit(input.parse()?))
        }
    }
}

/// A parsed attribute: `name="value"` or `name={expr}`.
#[derive(Clone, Debug)]
pub(crate) struct Attribute {
    pub name: Name,
    pub value: AttrValue,
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone, Debug)]
pub(crate) struct Element {
    pub tag: Name,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

/// The top-level view! input: a sequence of elements.
#[derive(Debug)]
struct ViewInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for ViewInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(ViewInput { elements })
    }
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag: Name = input.parse()?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name: Name = input.parse()?;
        input.parse::<Token![=]>()?;
        let value: AttrValue = input.parse()?;
        if attrs.iter().any(|a: &Attribute| a.name.text == name.text) {
            return Err(Error::new(
                name.span,
                format!("duplicate attribute `{}`", name.text),
            ));
        }
        attrs.push(Attribute { name, value });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing: Name = input.parse()?;
            if closing.text != tag.text {
                return Err(Error::new(
                    closing.span,
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag.text, closing.text
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate the builder expression for one element.
fn generate_element(elem: &Element) -> TokenStream {
    let tag = &elem.tag.text;
    let mut calls = Vec::new();

    for attr in &elem.attrs {
        let name = &attr.name.text;
        let call = match (name.as_str(), &attr.value) {
            ("id", AttrValue::Lit(val)) => quote! { .with_id(#val) },
            ("class", AttrValue::Lit(val)) => quote! { .with_class(#val) },
            (_, AttrValue::Lit(val)) => quote! { .with_prop(#name, #val) },
            (_, AttrValue::Expr(expr)) => quote! { .with_prop(#name, #expr) },
        };
        calls.push(call);
    }

    for child in &elem.children {
        let child = generate_element(child);
        calls.push(quote! { .with_child(#child) });
    }

    quote! {
        ::gilt_canvas::template::TemplateNode::new(#tag) #(#calls)*
    }
}

/// Entry point. Several root elements are wrapped in a `template` element.
pub(crate) fn view_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: ViewInput = syn::parse2(input)?;

    match parsed.elements.as_slice() {
        [] => Err(Error::new(
            Span::call_site(),
            "view! macro requires at least one element",
        )),
        [root] => Ok(generate_element(root)),
        roots => {
            let children = roots.iter().map(generate_element);
            Ok(quote! {
                ::gilt_canvas::template::TemplateNode::new("template")
                    #(.with_child(#children))*
            })
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
