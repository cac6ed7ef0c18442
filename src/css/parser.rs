//! Stylesheet text parser.
//!
//! Parses `selector[, selector]* { property: value; ... }` blocks into a flat,
//! ordered list of [`StyleRule`]s. A selector list produces one rule per
//! selector, in source order, each carrying the full declaration list.
//! Selector and value text are taken as raw source slices so the lexer never
//! needs to understand selector or value grammar.

use logos::Logos;

use crate::css::model::{Declaration, Selector, StyleRule};
use crate::css::tokenizer::Token;

/// Errors from stylesheet parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    /// Index in the token stream (for error reporting).
    pos: usize,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
    /// Byte offset where this token ends in the source.
    byte_end: usize,
}

/// Strip block comments (`/* ... */`), replacing each with a single space.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            // Unterminated comment consumes the rest of the input.
            None => rest = "",
        }
    }
    result.push_str(rest);
    result
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        if let Ok(token) = result {
            tokens.push(PToken {
                token,
                pos: idx,
                byte_start: span.start,
                byte_end: span.end,
            });
            idx += 1;
        }
    }

    tokens
}

/// Parse stylesheet text into an ordered list of rules.
pub fn parse_stylesheet(input: &str) -> Result<Vec<StyleRule>, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser {
        source: &cleaned,
        tokens,
        cursor: 0,
    };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        rules.extend(parser.parse_block()?);
    }

    tracing::debug!(rules = rules.len(), "parsed stylesheet");
    Ok(rules)
}

/// Recursive descent parser state.
struct Parser<'s> {
    source: &'s str,
    tokens: Vec<PToken>,
    cursor: usize,
}

impl<'s> Parser<'s> {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "expected {:?}, got {:?} '{}'",
                    expected,
                    tok.token,
                    self.text(&tok)
                ),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    fn text(&self, tok: &PToken) -> &'s str {
        &self.source[tok.byte_start..tok.byte_end]
    }

    /// Source text spanning `first..=last`, trimmed.
    fn slice(&self, first: &PToken, last: &PToken) -> String {
        self.source[first.byte_start..last.byte_end].trim().to_owned()
    }

    /// Parse one block: selector list, `{`, declarations, `}`.
    fn parse_block(&mut self) -> Result<Vec<StyleRule>, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(selectors
            .into_iter()
            .map(|selector| StyleRule {
                selector,
                declarations: declarations.clone(),
            })
            .collect())
    }

    /// Parse a comma-separated selector list up to (not including) `{`.
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = Vec::new();
        let mut group: Vec<PToken> = Vec::new();

        loop {
            let Some(tok) = self.peek().cloned() else {
                return Err(ParseError::UnexpectedEof("expected '{' after selector".into()));
            };
            match tok.token {
                Token::BraceOpen | Token::Comma => {
                    let (Some(first), Some(last)) = (group.first(), group.last()) else {
                        return Err(ParseError::UnexpectedToken {
                            position: tok.pos,
                            message: "expected selector".into(),
                        });
                    };
                    selectors.push(Selector::parse(&self.slice(first, last)));
                    group.clear();
                    if tok.token == Token::BraceOpen {
                        return Ok(selectors);
                    }
                    self.advance();
                }
                Token::BraceClose | Token::Semicolon => {
                    return Err(ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("unexpected '{}' in selector", self.text(&tok)),
                    });
                }
                _ => {
                    group.push(tok);
                    self.advance();
                }
            }
        }
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            match self.peek().map(|t| &t.token) {
                None | Some(Token::BraceClose) => break,
                Some(Token::Semicolon) => {
                    // Stray or doubled `;`.
                    self.advance();
                }
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: value [;]`.
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let prop_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected property name".into()))?;
        if prop_tok.token != Token::Word {
            return Err(ParseError::UnexpectedToken {
                position: prop_tok.pos,
                message: format!(
                    "expected property name, got {:?} '{}'",
                    prop_tok.token,
                    self.text(&prop_tok)
                ),
            });
        }
        let property = self.text(&prop_tok).to_owned();

        self.expect(&Token::Colon)?;

        // Value: everything up to `;` or `}`.
        let mut first: Option<PToken> = None;
        let mut last: Option<PToken> = None;
        while let Some(tok) = self.peek() {
            if matches!(tok.token, Token::Semicolon | Token::BraceClose) {
                break;
            }
            if first.is_none() {
                first = Some(tok.clone());
            }
            last = Some(tok.clone());
            self.advance();
        }

        let value = match (&first, &last) {
            (Some(first), Some(last)) => self.slice(first, last),
            _ => {
                return Err(ParseError::UnexpectedToken {
                    position: self.peek().map(|t| t.pos).unwrap_or(self.tokens.len()),
                    message: format!("missing value for '{property}'"),
                })
            }
        };

        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration { property, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::model::SelectorPart;
    use pretty_assertions::assert_eq;

    fn decl(property: &str, value: &str) -> Declaration {
        Declaration {
            property: property.into(),
            value: value.into(),
        }
    }

    #[test]
    fn parse_single_rule() {
        let rules = parse_stylesheet("div { width: 100px; height: 50px; }").unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.parts, vec![SelectorPart::Tag("div".into())]);
        assert_eq!(
            rules[0].declarations,
            vec![decl("width", "100px"), decl("height", "50px")]
        );
    }

    #[test]
    fn parse_descendant_selector() {
        let rules = parse_stylesheet("#app .row text { color: red }").unwrap();
        assert_eq!(
            rules[0].selector.parts,
            vec![
                SelectorPart::Id("app".into()),
                SelectorPart::Class("row".into()),
                SelectorPart::Tag("text".into()),
            ]
        );
        // Last declaration without trailing semicolon.
        assert_eq!(rules[0].declarations, vec![decl("color", "red")]);
    }

    #[test]
    fn selector_list_expands_in_order() {
        let rules = parse_stylesheet(".a, #b { margin: 4px }").unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector.to_string(), ".a");
        assert_eq!(rules[1].selector.to_string(), "#b");
        assert_eq!(rules[0].declarations, rules[1].declarations);
    }

    #[test]
    fn multi_token_values_keep_raw_text() {
        let rules = parse_stylesheet("div { border: 1px   solid red; flex-flow: row wrap; }").unwrap();
        assert_eq!(
            rules[0].declarations,
            vec![decl("border", "1px   solid red"), decl("flex-flow", "row wrap")]
        );
    }

    #[test]
    fn pseudo_selector_is_kept_as_unknown_part() {
        let rules = parse_stylesheet("a:hover { width: 1px }").unwrap();
        assert_eq!(rules[0].selector.parts, vec![SelectorPart::Unknown("a:hover".into())]);
    }

    #[test]
    fn comments_are_stripped() {
        let css = "/* header */ div { /* inner */ width: 10px; } /* trailing";
        let rules = parse_stylesheet(css).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations, vec![decl("width", "10px")]);
    }

    #[test]
    fn strip_comments_keeps_non_ascii() {
        assert_eq!(strip_comments("é/*x*/ü"), "é ü");
    }

    #[test]
    fn empty_input_yields_no_rules() {
        assert!(parse_stylesheet("").unwrap().is_empty());
        assert!(parse_stylesheet("  /* only */ ").unwrap().is_empty());
    }

    #[test]
    fn stray_semicolons_are_ignored() {
        let rules = parse_stylesheet("div { ; width: 1px;; }").unwrap();
        assert_eq!(rules[0].declarations, vec![decl("width", "1px")]);
    }

    #[test]
    fn missing_brace_is_eof_error() {
        let err = parse_stylesheet("div").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn unclosed_block_is_eof_error() {
        let err = parse_stylesheet("div { width: 1px;").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof(_)));
    }

    #[test]
    fn empty_selector_group_is_error() {
        let err = parse_stylesheet(", div { width: 1px }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_colon_is_error() {
        let err = parse_stylesheet("div { width 1px }").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn missing_value_is_error() {
        let err = parse_stylesheet("div { width: ; }").unwrap_err();
        assert!(err.to_string().contains("missing value for 'width'"));
    }
}
