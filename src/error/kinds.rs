use std::{fmt, io};

/// Crate-wide `Result` type using [`MongoqError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, MongoqError>;

/// Top-level error type for mongoq operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum MongoqError {
    /// Operation-string parsing errors.
    Parse(ParseError),

    /// Connection-related errors.
    Connection(ConnectionError),

    /// Operation execution errors.
    Execution(ExecutionError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// MongoDB driver errors.
    MongoDb(mongodb::error::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Errors raised while parsing an operation string.
///
/// Each variant corresponds to one failure mode of the parse pipeline and
/// carries enough context to be shown directly to the user: the offending
/// substring, or expected versus actual counts.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The token stream does not have the `collection.method(args)` shape.
    Structural { count: usize, tokens: Vec<String> },

    /// Brace or bracket depth was nonzero at the end of the argument scan.
    UnbalancedStructure { braces: i64, brackets: i64 },

    /// An argument segment is not valid JSON.
    ArgumentDecode { segment: String, message: String },

    /// The method name is not in the known operation set.
    UnsupportedMethod {
        method: String,
        supported: &'static [&'static str],
    },

    /// Argument count outside the method's allowed range.
    Arity {
        method: &'static str,
        min: usize,
        max: usize,
        actual: usize,
    },

    /// An argument decoded to the wrong JSON shape for the method.
    ArgumentType {
        method: &'static str,
        index: usize,
        expected: &'static str,
    },

    /// Collection or method name fails the identifier grammar.
    InvalidIdentifier(String),
}

/// Connection-specific errors.
#[derive(Debug)]
pub enum ConnectionError {
    /// Failed to establish a connection.
    ConnectionFailed(String),

    /// Invalid connection URI.
    InvalidUri(String),

    /// Ping command failed.
    PingFailed(String),

    /// Not currently connected to MongoDB.
    NotConnected,
}

/// Execution-specific errors.
#[derive(Debug)]
pub enum ExecutionError {
    /// Operation execution failed.
    OperationFailed(String),

    /// Invalid operation parameters.
    InvalidParameters(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid config file contents.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for MongoqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MongoqError::Parse(e) => write!(f, "{e}"),
            MongoqError::Connection(e) => write!(f, "Connection error: {e}"),
            MongoqError::Execution(e) => write!(f, "Execution error: {e}"),
            MongoqError::Config(e) => write!(f, "Configuration error: {e}"),
            MongoqError::Io(e) => write!(f, "I/O error: {e}"),
            MongoqError::MongoDb(e) => write!(f, "MongoDB error: {e}"),
            MongoqError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Structural { count, tokens } => {
                write!(
                    f,
                    "expected `collection.method(arguments)` but found {count} token(s): [{}]",
                    tokens.join(", ")
                )
            }
            ParseError::UnbalancedStructure { braces, brackets } => {
                write!(
                    f,
                    "unbalanced arguments: brace depth {braces}, bracket depth {brackets} at end of input"
                )
            }
            ParseError::ArgumentDecode { segment, message } => {
                write!(f, "invalid JSON in argument `{segment}`: {message}")
            }
            ParseError::UnsupportedMethod { method, supported } => {
                write!(
                    f,
                    "unsupported method '{method}' (supported: {})",
                    supported.join(", ")
                )
            }
            ParseError::Arity {
                method,
                min,
                max,
                actual,
            } => {
                if min == max {
                    write!(f, "{method} expects exactly {min} argument(s), got {actual}")
                } else {
                    write!(
                        f,
                        "{method} expects between {min} and {max} argument(s), got {actual}"
                    )
                }
            }
            ParseError::ArgumentType {
                method,
                index,
                expected,
            } => {
                write!(f, "{method}: argument {index} must be {expected}")
            }
            ParseError::InvalidIdentifier(name) => {
                write!(
                    f,
                    "invalid identifier '{name}': must start with a letter or underscore and contain only letters, digits, '_', '.', '-'"
                )
            }
        }
    }
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::ConnectionFailed(msg) => write!(f, "Failed to connect: {msg}"),
            ConnectionError::InvalidUri(uri) => write!(f, "Invalid connection URI: {uri}"),
            ConnectionError::PingFailed(msg) => write!(f, "Ping failed: {msg}"),
            ConnectionError::NotConnected => write!(f, "Not connected to MongoDB"),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionError::OperationFailed(msg) => write!(f, "Operation failed: {msg}"),
            ExecutionError::InvalidParameters(msg) => write!(f, "Invalid parameters: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for MongoqError {}
impl std::error::Error for ParseError {}
impl std::error::Error for ConnectionError {}
impl std::error::Error for ExecutionError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to MongoqError ========================= */

impl From<io::Error> for MongoqError {
    fn from(err: io::Error) -> Self {
        MongoqError::Io(err)
    }
}

impl From<mongodb::error::Error> for MongoqError {
    fn from(err: mongodb::error::Error) -> Self {
        MongoqError::MongoDb(err)
    }
}

impl From<ParseError> for MongoqError {
    fn from(err: ParseError) -> Self {
        MongoqError::Parse(err)
    }
}

impl From<ConnectionError> for MongoqError {
    fn from(err: ConnectionError) -> Self {
        MongoqError::Connection(err)
    }
}

impl From<ExecutionError> for MongoqError {
    fn from(err: ExecutionError) -> Self {
        MongoqError::Execution(err)
    }
}

impl From<ConfigError> for MongoqError {
    fn from(err: ConfigError) -> Self {
        MongoqError::Config(err)
    }
}

impl From<String> for MongoqError {
    fn from(msg: String) -> Self {
        MongoqError::Generic(msg)
    }
}

impl From<&str> for MongoqError {
    fn from(msg: &str) -> Self {
        MongoqError::Generic(msg.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_display_exact() {
        let err = ParseError::Arity {
            method: "deleteOne",
            min: 1,
            max: 1,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "deleteOne expects exactly 1 argument(s), got 0"
        );
    }

    #[test]
    fn test_arity_display_range() {
        let err = ParseError::Arity {
            method: "updateOne",
            min: 2,
            max: 3,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "updateOne expects between 2 and 3 argument(s), got 1"
        );
    }

    #[test]
    fn test_decode_display_includes_segment() {
        let err = ParseError::ArgumentDecode {
            segment: "{bad}".to_string(),
            message: "key must be a string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("{bad}"));
        assert!(msg.contains("key must be a string"));
    }

    #[test]
    fn test_top_level_wraps_parse_error() {
        let err: MongoqError = ParseError::InvalidIdentifier("123bad".to_string()).into();
        assert!(matches!(err, MongoqError::Parse(_)));
        assert!(err.to_string().contains("123bad"));
    }
}
