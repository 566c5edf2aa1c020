//! Operation executor for mongoq.
//!
//! Dispatches a validated [`ParsedCall`] to the corresponding driver call
//! on a `Database` handle. Decoded JSON arguments are converted to BSON
//! documents on the way in; extended JSON forms (`$oid`, `$date`, ...)
//! are honored by the conversion. The executor trusts the parser's arity
//! and shape validation and only re-checks what the conversion itself
//! can surface.

mod result;

pub use result::{ExecutionResult, ExecutionStats, ResultData};

use std::time::Instant;

use futures::stream::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Bson, Document};
use serde_json::Value;
use tracing::debug;

use crate::error::{ExecutionError, Result};
use crate::parser::{Method, ParsedCall};

/// Executes parsed operations against a database handle.
pub struct OperationExecutor {
    database: Database,
}

impl OperationExecutor {
    /// Create a new executor for a database.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Execute a parsed call and collect its result.
    pub async fn execute(&self, call: &ParsedCall) -> Result<ExecutionResult> {
        debug!("Executing {}.{}", call.collection, call.method);

        let start = Instant::now();
        let collection = self.database.collection::<Document>(&call.collection);
        let args = &call.arguments;

        let data = match call.method {
            Method::Find => {
                let filter = document_arg(args, 0)?;
                let mut action = collection.find(filter);
                if args.len() > 1 {
                    action = action.projection(document_arg(args, 1)?);
                }
                let cursor = action.await?;
                let documents: Vec<Document> = cursor.try_collect().await?;
                ResultData::Documents(documents)
            }
            Method::FindOne => {
                let filter = document_arg(args, 0)?;
                let mut action = collection.find_one(filter);
                if args.len() > 1 {
                    action = action.projection(document_arg(args, 1)?);
                }
                match action.await? {
                    Some(document) => ResultData::Document(document),
                    None => ResultData::None,
                }
            }
            Method::InsertOne => {
                let document = document_arg(args, 0)?;
                let outcome = collection.insert_one(document).await?;
                ResultData::InsertOne {
                    inserted_id: id_to_string(&outcome.inserted_id),
                }
            }
            Method::InsertMany => {
                let documents = document_array_arg(args, 0)?;
                let outcome = collection.insert_many(documents).await?;
                let mut indexed: Vec<(usize, String)> = outcome
                    .inserted_ids
                    .iter()
                    .map(|(index, id)| (*index, id_to_string(id)))
                    .collect();
                indexed.sort_by_key(|(index, _)| *index);
                ResultData::InsertMany {
                    inserted_ids: indexed.into_iter().map(|(_, id)| id).collect(),
                }
            }
            Method::UpdateOne => {
                let filter = document_arg(args, 0)?;
                let update = document_arg(args, 1)?;
                let outcome = collection
                    .update_one(filter, update)
                    .upsert(upsert_option(args))
                    .await?;
                ResultData::Update {
                    matched: outcome.matched_count,
                    modified: outcome.modified_count,
                    upserted_id: outcome.upserted_id.as_ref().map(id_to_string),
                }
            }
            Method::UpdateMany => {
                let filter = document_arg(args, 0)?;
                let update = document_arg(args, 1)?;
                let outcome = collection
                    .update_many(filter, update)
                    .upsert(upsert_option(args))
                    .await?;
                ResultData::Update {
                    matched: outcome.matched_count,
                    modified: outcome.modified_count,
                    upserted_id: outcome.upserted_id.as_ref().map(id_to_string),
                }
            }
            Method::DeleteOne => {
                let filter = document_arg(args, 0)?;
                let outcome = collection.delete_one(filter).await?;
                ResultData::Delete {
                    deleted: outcome.deleted_count,
                }
            }
            Method::DeleteMany => {
                let filter = document_arg(args, 0)?;
                let outcome = collection.delete_many(filter).await?;
                ResultData::Delete {
                    deleted: outcome.deleted_count,
                }
            }
            Method::CountDocuments => {
                let filter = document_arg(args, 0)?;
                let count = collection.count_documents(filter).await?;
                ResultData::Count(count)
            }
            Method::Drop => {
                collection.drop().await?;
                ResultData::Message(format!("Collection '{}' dropped", call.collection))
            }
        };

        let stats = collect_stats(&data, start.elapsed().as_millis() as u64);
        Ok(ExecutionResult::success(data, stats))
    }
}

/// Convert the argument at `index` to a BSON document, defaulting to the
/// empty document when absent (optional filters).
fn document_arg(args: &[Value], index: usize) -> Result<Document> {
    match args.get(index) {
        Some(value) => to_document(value),
        None => Ok(Document::new()),
    }
}

/// Convert the argument at `index` to a vector of BSON documents.
fn document_array_arg(args: &[Value], index: usize) -> Result<Vec<Document>> {
    let items = match args.get(index) {
        Some(Value::Array(items)) => items,
        _ => {
            return Err(
                ExecutionError::InvalidParameters(format!("argument {index} must be an array"))
                    .into(),
            );
        }
    };

    items.iter().map(to_document).collect()
}

/// Convert one JSON value to a BSON document, honoring extended JSON.
fn to_document(value: &Value) -> Result<Document> {
    match Bson::try_from(value.clone()) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(ExecutionError::InvalidParameters(format!(
            "expected a document, got {other}"
        ))
        .into()),
        Err(e) => Err(ExecutionError::InvalidParameters(e.to_string()).into()),
    }
}

/// Read `upsert` from the optional options argument of update operations.
/// All other option keys are passed over without interpretation.
fn upsert_option(args: &[Value]) -> bool {
    args.get(2)
        .and_then(|options| options.get("upsert"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn collect_stats(data: &ResultData, execution_time_ms: u64) -> ExecutionStats {
    let (documents_returned, documents_affected) = match data {
        ResultData::Documents(docs) => (docs.len(), None),
        ResultData::Document(_) => (1, None),
        ResultData::InsertOne { .. } => (0, Some(1)),
        ResultData::InsertMany { inserted_ids } => (0, Some(inserted_ids.len() as u64)),
        ResultData::Update {
            modified,
            upserted_id,
            ..
        } => (0, Some(modified + u64::from(upserted_id.is_some()))),
        ResultData::Delete { deleted } => (0, Some(*deleted)),
        _ => (0, None),
    };

    ExecutionStats {
        execution_time_ms,
        documents_returned,
        documents_affected,
    }
}
