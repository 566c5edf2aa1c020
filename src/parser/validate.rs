//! Call validation: identifier grammar, method resolution, argument rules.

use serde_json::Value;

use crate::error::{ParseError, Result};
use crate::parser::operation::{Method, SUPPORTED_METHODS};

/// Check a collection or method name against the identifier grammar.
///
/// Names must start with an ASCII letter or underscore and continue with
/// letters, digits, `_`, `.`, or `-`. The trailing set is deliberately
/// permissive: collection names containing dots (`logs.2024`) and hyphens
/// are legal in MongoDB.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidIdentifier(name.to_string()).into())
    }
}

/// Resolve a method name, failing with the list of supported methods.
pub(crate) fn resolve_method(name: &str) -> Result<Method> {
    Method::from_name(name).ok_or_else(|| {
        ParseError::UnsupportedMethod {
            method: name.to_string(),
            supported: SUPPORTED_METHODS,
        }
        .into()
    })
}

/// Enforce the method's arity range and per-argument shape rules.
pub(crate) fn check_arguments(method: Method, args: &[Value]) -> Result<()> {
    let (min, max) = method.arity();
    if args.len() < min || args.len() > max {
        return Err(ParseError::Arity {
            method: method.name(),
            min,
            max,
            actual: args.len(),
        }
        .into());
    }

    match method {
        Method::InsertMany => expect_array(method, 0, &args[0])?,
        Method::Drop => {}
        // Every other argument position takes a document: filters,
        // projections, update specs, options, and insertOne's document.
        _ => {
            for (index, arg) in args.iter().enumerate() {
                expect_object(method, index, arg)?;
            }
        }
    }

    Ok(())
}

fn expect_object(method: Method, index: usize, value: &Value) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ParseError::ArgumentType {
            method: method.name(),
            index,
            expected: "an object",
        }
        .into())
    }
}

fn expect_array(method: Method, index: usize, value: &Value) -> Result<()> {
    if value.is_array() {
        Ok(())
    } else {
        Err(ParseError::ArgumentType {
            method: method.name(),
            index,
            expected: "an array",
        }
        .into())
    }
}
