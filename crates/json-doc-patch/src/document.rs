//! The in-memory document and read-only queries over its collections.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};

use crate::record::Record;
use crate::types::{kind_of, PatchError, SaveOptions};

/// A JSON object whose top-level keys may name collections of records.
///
/// Key order is preserved exactly as loaded; new keys are appended.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Map<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Well-formed records of a collection, in order. Entries without a
    /// string `id` are skipped; a missing or non-array key yields nothing.
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.entries(collection)
            .iter()
            .filter_map(|entry| Record::try_from(entry.clone()).ok())
            .collect()
    }

    /// Looks up the first entry of `collection` whose `id` equals `id`.
    pub fn find(&self, collection: &str, id: &str) -> Option<&Map<String, Value>> {
        self.entries(collection)
            .iter()
            .find(|entry| Record::id_of(entry) == Some(id))
            .and_then(Value::as_object)
    }

    /// Ids that occur more than once in `collection`, in sorted order.
    pub fn duplicate_ids(&self, collection: &str) -> Vec<String> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for id in self.entries(collection).iter().filter_map(Record::id_of) {
            *counts.entry(id).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, _)| id.to_owned())
            .collect()
    }

    fn entries(&self, collection: &str) -> &[Value] {
        match self.root.get(collection) {
            Some(Value::Array(items)) => items,
            _ => &[],
        }
    }

    /// Mutable access to an existing collection; `Ok(None)` when absent.
    pub(crate) fn collection_mut(
        &mut self,
        collection: &str,
    ) -> Result<Option<&mut Vec<Value>>, PatchError> {
        match self.root.get_mut(collection) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(other) => Err(PatchError::NotACollection {
                collection: collection.to_owned(),
                found: kind_of(other),
            }),
        }
    }

    /// Mutable access to a collection, inserting an empty one when absent.
    pub(crate) fn collection_or_insert(
        &mut self,
        collection: &str,
    ) -> Result<&mut Vec<Value>, PatchError> {
        let slot = self
            .root
            .entry(collection.to_owned())
            .or_insert_with(|| Value::Array(Vec::new()));
        match slot {
            Value::Array(items) => Ok(items),
            other => Err(PatchError::NotACollection {
                collection: collection.to_owned(),
                found: kind_of(other),
            }),
        }
    }

    /// Serializes the document according to `options`.
    pub fn to_json_bytes(&self, options: &SaveOptions) -> Result<Vec<u8>, serde_json::Error> {
        let mut out = if options.indent == 0 {
            serde_json::to_vec(&self.root)?
        } else {
            let indent = " ".repeat(options.indent);
            let mut buf = Vec::new();
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut ser = Serializer::with_formatter(&mut buf, formatter);
            self.root.serialize(&mut ser)?;
            buf
        };
        if options.trailing_newline {
            out.push(b'\n');
        }
        Ok(out)
    }

    /// Same as [`Document::to_json_bytes`], as a `String`.
    pub fn to_json_string(&self, options: &SaveOptions) -> Result<String, serde_json::Error> {
        let bytes = self.to_json_bytes(options)?;
        // serde_json only ever writes UTF-8.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl TryFrom<Value> for Document {
    /// The rejected value is handed back when it is not an object.
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(other),
        }
    }
}

impl From<Map<String, Value>> for Document {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}
