//! Core types: errors, operation outcomes and save options.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────

/// Failures at the load/save boundary.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("document {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("document {} must hold a JSON object at the root, found {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
    #[error("failed to serialize document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures of the in-memory operations. None of them leave the document
/// partially modified.
#[derive(Debug, Error, PartialEq)]
pub enum PatchError {
    #[error("`{collection}` is not a collection (found {found})")]
    NotACollection {
        collection: String,
        found: &'static str,
    },
    #[error("update of `{id}` in `{collection}` would change its id to {attempted}")]
    IdChange {
        collection: String,
        id: String,
        attempted: String,
    },
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

// ── Outcomes ──────────────────────────────────────────────────────────────

/// Result of [`crate::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The record was appended to the collection.
    Inserted,
    /// A record with the same id already existed; nothing changed.
    AlreadyPresent,
}

/// Result of [`crate::update_field`].
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The record was found and patched. `previous` holds the prior values of
    /// the overwritten keys that already existed on the record.
    Updated { previous: Map<String, Value> },
    /// No record with the requested id exists; the document is untouched.
    NotFound,
}

impl UpdateOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, UpdateOutcome::Updated { .. })
    }
}

// ── Save options ──────────────────────────────────────────────────────────

/// Output formatting used by [`crate::save`].
///
/// Non-ASCII characters are always written as-is rather than `\u` escaped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SaveOptions {
    /// Spaces per indentation level. `0` writes compact single-line JSON.
    pub indent: usize,
    /// Append `\n` after the closing brace.
    pub trailing_newline: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            trailing_newline: false,
        }
    }
}

/// Human-readable name of a JSON value's type, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
