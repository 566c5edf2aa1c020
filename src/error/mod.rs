//! Error handling module for mongoq.
//!
//! This module provides the error types used throughout the crate:
//! - Structured parse errors with the offending substring and expected/actual context
//! - Application-specific error kinds for connection, execution, and configuration
//! - A single top-level error type with `From` conversions from each kind

pub mod kinds;

// Re-export commonly used types
pub use kinds::{
    ConfigError, ConnectionError, ExecutionError, MongoqError, ParseError, Result,
};
