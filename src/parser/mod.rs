//! Operation-string parser for mongoq.
//!
//! This module turns a single shell argument such as
//! `collection.method(arg1, arg2)` into a structured, validated
//! [`ParsedCall`]. The pipeline is a chain of small, stateless passes:
//!
//! 1. `strings`: strip one layer of outer shell quotes
//! 2. `tokenizer`: split the call path from the argument blob
//! 3. `arguments`: split the blob at top-level commas, decode each
//!    segment as JSON
//! 4. `validate`: identifier grammar, method resolution, arity and
//!    argument-shape rules
//!
//! Query and update operators (`$set`, `$gte`, ...) are opaque JSON
//! payloads to this module; it decodes them without interpreting them.
//!
//! # Examples
//!
//! ```no_run
//! use mongoq::parser::OperationParser;
//!
//! let call = OperationParser::parse(r#"users.find({"age": {"$gt": 18}})"#).unwrap();
//! assert_eq!(call.collection, "users");
//! ```

mod arguments;
mod operation;
mod strings;
mod tokenizer;
mod validate;

#[cfg(test)]
mod tests;

pub use operation::{Method, ParsedCall, SUPPORTED_METHODS};
pub use tokenizer::Token;

use crate::error::Result;

/// Parser for `collection.method(arguments)` operation strings.
///
/// Stateless: every invocation is independent and every intermediate
/// structure is local to the call, so parsing is safe from any thread.
pub struct OperationParser;

impl OperationParser {
    /// Parse a raw operation string into a validated [`ParsedCall`].
    ///
    /// The input is expected to be a single, already-shell-unescaped
    /// argument. Any failure is fatal to this call and is reported as a
    /// [`crate::error::ParseError`] carrying the offending substring or
    /// the expected/actual counts.
    pub fn parse(input: &str) -> Result<ParsedCall> {
        let cleaned = strings::strip_outer_quotes(input);

        let tokens = tokenizer::tokenize(cleaned);
        let (collection, method_name, args_blob) = tokenizer::expect_call(tokens)?;

        validate::validate_identifier(&collection)?;
        validate::validate_identifier(&method_name)?;
        let method = validate::resolve_method(&method_name)?;

        let segments = arguments::split_arguments(&args_blob)?;
        let decoded = arguments::decode_segments(&segments)?;
        validate::check_arguments(method, &decoded)?;

        Ok(ParsedCall {
            collection,
            method,
            arguments: decoded,
        })
    }
}
