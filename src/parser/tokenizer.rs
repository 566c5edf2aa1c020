//! Tokenizer for `collection.method(arguments)` operation strings.
//!
//! A single left-to-right scan over the cleaned input that splits the
//! dotted call path from the parenthesized argument blob. Structural
//! characters inside quoted strings are ignored via the boundary tracker,
//! and nested parentheses inside the arguments are matched by depth
//! counting. The argument blob itself is not interpreted here; it is
//! handed to the argument splitter as-is.

use std::fmt;

use crate::error::{ParseError, Result};
use crate::parser::strings::is_inside_string;

/// An atomic unit of a cleaned operation string.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Collection or method name fragment.
    Ident(String),
    /// Path separator between collection and method.
    Dot,
    /// Opening parenthesis of the call.
    OpenParen,
    /// Everything between the call's parentheses, uninterpreted.
    /// Empty for a zero-argument call; the empty blob is meaningful
    /// and must not be dropped.
    ArgsBlob(String),
    /// Closing parenthesis of the call.
    CloseParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "`{name}`"),
            Token::Dot => write!(f, "`.`"),
            Token::OpenParen => write!(f, "`(`"),
            Token::ArgsBlob(blob) => write!(f, "args `{blob}`"),
            Token::CloseParen => write!(f, "`)`"),
        }
    }
}

/// Tokenize a cleaned operation string.
///
/// Scans once, accumulating identifier characters until a structural `.`
/// or `(` outside a string is met. On `(` the matching `)` is located with
/// string-aware depth counting and the enclosed text becomes a single
/// [`Token::ArgsBlob`]. If no matching close paren exists, the rest of the
/// input becomes the blob and the missing `)` surfaces as a structural
/// error in [`expect_call`].
pub(crate) fn tokenize(cleaned: &str) -> Vec<Token> {
    let chars: Vec<char> = cleaned.chars().collect();
    let mut tokens = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if is_inside_string(&chars, i) {
            buf.push(ch);
            i += 1;
            continue;
        }

        match ch {
            '.' => {
                flush_ident(&mut buf, &mut tokens);
                tokens.push(Token::Dot);
            }
            '(' => {
                flush_ident(&mut buf, &mut tokens);
                tokens.push(Token::OpenParen);
                match find_matching_paren(&chars, i) {
                    Some(close) => {
                        tokens.push(Token::ArgsBlob(chars[i + 1..close].iter().collect()));
                        tokens.push(Token::CloseParen);
                        i = close + 1;
                        continue;
                    }
                    None => {
                        tokens.push(Token::ArgsBlob(chars[i + 1..].iter().collect()));
                        break;
                    }
                }
            }
            _ => buf.push(ch),
        }
        i += 1;
    }

    flush_ident(&mut buf, &mut tokens);
    tokens
}

/// Check the six-token call shape and pull out its parts.
///
/// A well-formed single call tokenizes to exactly
/// `[Ident, Dot, Ident, OpenParen, ArgsBlob, CloseParen]`. Anything else,
/// including chained calls or trailing text, fails with
/// [`ParseError::Structural`] citing the actual token count and tokens.
///
/// Returns `(collection, method, args_blob)`.
pub(crate) fn expect_call(tokens: Vec<Token>) -> Result<(String, String, String)> {
    if let [
        Token::Ident(collection),
        Token::Dot,
        Token::Ident(method),
        Token::OpenParen,
        Token::ArgsBlob(blob),
        Token::CloseParen,
    ] = tokens.as_slice()
    {
        return Ok((collection.clone(), method.clone(), blob.clone()));
    }

    Err(ParseError::Structural {
        count: tokens.len(),
        tokens: tokens.iter().map(|t| t.to_string()).collect(),
    }
    .into())
}

/// Flush the identifier accumulator as a token if it is non-empty after trimming.
fn flush_ident(buf: &mut String, tokens: &mut Vec<Token>) {
    let ident = buf.trim();
    if !ident.is_empty() {
        tokens.push(Token::Ident(ident.to_string()));
    }
    buf.clear();
}

/// Locate the `)` matching the `(` at `open`, skipping parens inside strings.
fn find_matching_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 1usize;
    let mut i = open + 1;

    while i < chars.len() {
        if !is_inside_string(chars, i) {
            match chars[i] {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }

    None
}
