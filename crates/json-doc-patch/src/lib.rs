//! json-doc-patch — idempotent patching of record collections in a JSON document.
//!
//! A [`Document`] is a JSON object whose top-level keys may hold *collections*:
//! arrays of [`Record`]s, each identified by a string `id` field. Two
//! operations mutate collections in memory:
//!
//! - [`upsert`] appends a record unless one with the same `id` already exists.
//! - [`update_field`] overwrites selected fields of an existing record.
//!
//! [`load`] and [`save`] are the only I/O boundaries.
//!
//! # Example
//!
//! ```
//! use json_doc_patch::{upsert, Document, Record, UpsertOutcome};
//! use serde_json::json;
//!
//! let mut doc = Document::try_from(json!({"tiles": [], "queries": []})).unwrap();
//! let tile = Record::try_from(json!({"id": "X", "title": "T"})).unwrap();
//!
//! assert_eq!(upsert(&mut doc, "tiles", tile.clone()).unwrap(), UpsertOutcome::Inserted);
//! assert_eq!(upsert(&mut doc, "tiles", tile).unwrap(), UpsertOutcome::AlreadyPresent);
//! assert_eq!(doc.records("tiles").len(), 1);
//! ```

pub mod apply;
pub mod document;
pub mod io;
pub mod record;
pub mod types;

pub use apply::{update_field, upsert};
pub use document::Document;
pub use io::{load, save};
pub use record::Record;
pub use types::{DocumentError, PatchError, SaveOptions, UpdateOutcome, UpsertOutcome};
