//! logos-based stylesheet tokenizer.
//!
//! The grammar only needs block structure: selectors and declaration values
//! are recovered as raw source slices by the parser, so everything that is not
//! punctuation or a quoted string lexes as a [`Token::Word`].

use logos::Logos;

/// Stylesheet token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Any run of non-punctuation, non-whitespace characters: `div`, `#main`,
    /// `.row`, `10px`, `a:hover` parts, `50%`, `url(x)`.
    #[regex(r#"[^ \t\n\r\f{}:;,'"]+"#)]
    Word,

    // ── Punctuation ──────────────────────────────────────────────────

    /// `{`
    #[token("{")]
    BraceOpen,

    /// `}`
    #[token("}")]
    BraceClose,

    /// `:`
    #[token(":")]
    Colon,

    /// `;`
    #[token(";")]
    Semicolon,

    /// `,`
    #[token(",")]
    Comma,
}
