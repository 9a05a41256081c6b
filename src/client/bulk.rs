//! Bulk indexing requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{EstocError, Result};

/// One action in a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOperation {
    /// Create or replace a document.
    Index {
        /// Target collection.
        index: String,
        /// Document id.
        id: String,
        /// Document body.
        source: Value,
    },
}

impl BulkOperation {
    /// Create an index operation.
    pub fn index<I: Into<String>, D: Into<String>>(index: I, id: D, source: Value) -> Self {
        BulkOperation::Index {
            index: index.into(),
            id: id.into(),
            source,
        }
    }

    fn write_ndjson(&self, out: &mut String) -> Result<()> {
        match self {
            BulkOperation::Index { index, id, source } => {
                let action = json!({"index": {"_index": index, "_id": id}});
                out.push_str(&serde_json::to_string(&action)?);
                out.push('\n');
                out.push_str(&serde_json::to_string(source)?);
                out.push('\n');
            }
        }
        Ok(())
    }
}

/// An ordered batch of bulk operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkRequest {
    operations: Vec<BulkOperation>,
}

impl BulkRequest {
    /// Create an empty bulk request.
    pub fn new() -> Self {
        BulkRequest::default()
    }

    /// Append an operation.
    pub fn push(&mut self, operation: BulkOperation) {
        self.operations.push(operation);
    }

    /// Append an operation, builder style.
    pub fn with(mut self, operation: BulkOperation) -> Self {
        self.push(operation);
        self
    }

    /// The queued operations.
    pub fn operations(&self) -> &[BulkOperation] {
        &self.operations
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if no operations are queued.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Render the newline-delimited JSON body. The body always ends with a newline.
    pub fn to_ndjson(&self) -> Result<String> {
        if self.operations.is_empty() {
            return Err(EstocError::other("bulk request has no operations"));
        }
        let mut body = String::new();
        for operation in &self.operations {
            operation.write_ndjson(&mut body)?;
        }
        Ok(body)
    }
}

/// Outcome of one bulk action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkItem {
    /// Collection the action targeted.
    #[serde(rename = "_index")]
    pub index: String,
    /// Document id.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// HTTP-style status of the action.
    pub status: u16,
    /// "created", "updated", "deleted" or "not_found" on success.
    #[serde(default)]
    pub result: Option<String>,
    /// Failure details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl BulkItem {
    /// Check if the action failed.
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.status >= 300
    }

    /// Short failure description, `None` on success.
    pub fn failure_reason(&self) -> Option<String> {
        if !self.is_failure() {
            return None;
        }
        let reason = self
            .error
            .as_ref()
            .and_then(|e| e.get("reason"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        Some(format!(
            "{}/{}: {} ({})",
            self.index,
            self.id.as_deref().unwrap_or("-"),
            reason,
            self.status
        ))
    }
}

/// A parsed `_bulk` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkResponse {
    /// Server-side execution time in milliseconds.
    #[serde(default)]
    pub took: u64,
    /// Whether any action failed.
    pub errors: bool,
    /// Per-action outcomes keyed by action name, in request order.
    #[serde(default)]
    pub items: Vec<BTreeMap<String, BulkItem>>,
}

impl BulkResponse {
    /// All action outcomes in request order.
    pub fn results(&self) -> impl Iterator<Item = &BulkItem> {
        self.items.iter().flat_map(|item| item.values())
    }

    /// The failed actions.
    pub fn failures(&self) -> Vec<&BulkItem> {
        self.results().filter(|item| item.is_failure()).collect()
    }

    /// Number of successful actions.
    pub fn succeeded(&self) -> usize {
        self.results().filter(|item| !item.is_failure()).count()
    }
}
