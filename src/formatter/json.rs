//! JSON formatting for MongoDB documents.
//!
//! This module provides JSON formatting with BSON type simplification:
//! - Pretty-printed and compact JSON output
//! - BSON type conversion to display-friendly JSON types
//! - Optional color highlighting for pretty output
//!
//! Simplifications: ObjectId becomes its hex string, DateTime becomes an
//! RFC 3339 string, Int64 becomes a plain number, Binary becomes base64,
//! Decimal128 becomes its decimal string.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::SecondsFormat;
use colored_json::prelude::*;
use mongodb::bson::{Bson, Document};
use serde_json::{Value, json};

use crate::error::Result;
use crate::executor::ResultData;

/// JSON formatter with pretty printing support.
pub struct JsonFormatter {
    /// Enable pretty printing
    pretty: bool,

    /// Enable colored output
    use_colors: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new(pretty: bool, use_colors: bool) -> Self {
        Self { pretty, use_colors }
    }

    /// Format result data as JSON.
    pub fn format(&self, data: &ResultData) -> Result<String> {
        let value = match data {
            ResultData::Documents(docs) => {
                Value::Array(docs.iter().map(document_to_json).collect())
            }
            ResultData::Document(doc) => document_to_json(doc),
            ResultData::InsertOne { inserted_id } => json!({ "insertedId": inserted_id }),
            ResultData::InsertMany { inserted_ids } => json!({ "insertedIds": inserted_ids }),
            ResultData::Update {
                matched,
                modified,
                upserted_id,
            } => match upserted_id {
                Some(id) => json!({
                    "matchedCount": matched,
                    "modifiedCount": modified,
                    "upsertedId": id,
                }),
                None => json!({ "matchedCount": matched, "modifiedCount": modified }),
            },
            ResultData::Delete { deleted } => json!({ "deletedCount": deleted }),
            ResultData::Count(count) => json!(count),
            ResultData::Message(msg) => json!(msg),
            ResultData::None => Value::Null,
        };

        self.render(&value)
    }

    fn render(&self, value: &Value) -> Result<String> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
        .map_err(|e| crate::error::MongoqError::Generic(e.to_string()))?;

        // Colors only for pretty output; compact output stays clean for piping.
        if self.use_colors && self.pretty {
            Ok(rendered.to_colored_json_auto().unwrap_or(rendered))
        } else {
            Ok(rendered)
        }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Convert a BSON document to display-friendly JSON.
pub(crate) fn document_to_json(doc: &Document) -> Value {
    Value::Object(
        doc.iter()
            .map(|(key, value)| (key.clone(), bson_to_json(value)))
            .collect(),
    )
}

/// Convert one BSON value to its display-friendly JSON form.
fn bson_to_json(value: &Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => json!(oid.to_hex()),
        Bson::DateTime(dt) => json!(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        Bson::Int32(n) => json!(n),
        Bson::Int64(n) => json!(n),
        Bson::Double(n) => json!(n),
        Bson::Decimal128(d) => json!(d.to_string()),
        Bson::String(s) => json!(s),
        Bson::Boolean(b) => json!(b),
        Bson::Null => Value::Null,
        Bson::Binary(bin) => json!(BASE64.encode(&bin.bytes)),
        Bson::Array(items) => Value::Array(items.iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        Bson::RegularExpression(re) => json!(format!("/{}/{}", re.pattern, re.options)),
        Bson::Timestamp(ts) => json!({ "t": ts.time, "i": ts.increment }),
        other => json!(other.to_string()),
    }
}
