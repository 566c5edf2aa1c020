//! Output formatting for execution results.
//!
//! Renders an [`ExecutionResult`](crate::executor::ExecutionResult) in one
//! of three formats: compact JSON, pretty JSON (optionally colored), or a
//! one-line summary.

mod json;

pub use json::JsonFormatter;

use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;
use crate::executor::{ExecutionResult, ResultData};

/// Formatter that renders execution results per display configuration.
pub struct Formatter {
    format: OutputFormat,
    use_colors: bool,
}

impl Formatter {
    /// Create a formatter from display configuration.
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            format: config.format,
            use_colors: config.color_output,
        }
    }

    /// Format an execution result for display.
    pub fn format(&self, result: &ExecutionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => JsonFormatter::new(false, false).format(&result.data),
            OutputFormat::Pretty => {
                JsonFormatter::new(true, self.use_colors).format(&result.data)
            }
            OutputFormat::Compact => Ok(summarize(&result.data)),
        }
    }
}

/// One-line summary of a result, without document content.
fn summarize(data: &ResultData) -> String {
    match data {
        ResultData::Documents(docs) => format!("{} document(s) returned", docs.len()),
        ResultData::Document(_) => "1 document returned".to_string(),
        ResultData::InsertOne { inserted_id } => format!("inserted 1 document ({inserted_id})"),
        ResultData::InsertMany { inserted_ids } => {
            format!("inserted {} document(s)", inserted_ids.len())
        }
        ResultData::Update {
            matched,
            modified,
            upserted_id,
        } => match upserted_id {
            Some(id) => format!("matched {matched}, modified {modified}, upserted {id}"),
            None => format!("matched {matched}, modified {modified}"),
        },
        ResultData::Delete { deleted } => format!("deleted {deleted} document(s)"),
        ResultData::Count(count) => count.to_string(),
        ResultData::Message(msg) => msg.clone(),
        ResultData::None => "no documents matched".to_string(),
    }
}
