//! A collection entry: a JSON object carrying a string `id`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{kind_of, PatchError};

/// Name of the identifier field.
pub const ID_FIELD: &str = "id";

/// One entry of a collection.
///
/// The `id` is kept inside `fields` at its original position so that
/// serializing a record reproduces the key order it was built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Record {
    id: String,
    fields: Map<String, Value>,
}

impl Record {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// All fields, `id` included.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Reads the identifier of a raw collection entry. Entries that are not
    /// objects, or whose `id` is missing or not a string, have none.
    pub fn id_of(entry: &Value) -> Option<&str> {
        entry.get(ID_FIELD).and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = PatchError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let id = match fields.get(ID_FIELD) {
            Some(Value::String(id)) => id.clone(),
            Some(other) => {
                return Err(PatchError::InvalidRecord(format!(
                    "`{ID_FIELD}` must be a string, found {}",
                    kind_of(other)
                )))
            }
            None => {
                return Err(PatchError::InvalidRecord(format!(
                    "missing `{ID_FIELD}` field"
                )))
            }
        };
        Ok(Self { id, fields })
    }
}

impl TryFrom<Value> for Record {
    type Error = PatchError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Record::try_from(map),
            other => Err(PatchError::InvalidRecord(format!(
                "expected an object, found {}",
                kind_of(&other)
            ))),
        }
    }
}

impl From<Record> for Map<String, Value> {
    fn from(record: Record) -> Self {
        record.fields
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_is_read_from_fields() {
        let rec = Record::try_from(json!({"text": "q", "id": "Q1"})).unwrap();
        assert_eq!(rec.id(), "Q1");
        assert_eq!(rec.get("text"), Some(&json!("q")));
    }

    #[test]
    fn key_order_survives_conversion() {
        let rec = Record::try_from(json!({"dataSource": {}, "text": "t", "id": "Q", "usedVariables": []}))
            .unwrap();
        let keys: Vec<&str> = rec.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["dataSource", "text", "id", "usedVariables"]);
        let out = serde_json::to_string(&rec).unwrap();
        assert_eq!(out, r#"{"dataSource":{},"text":"t","id":"Q","usedVariables":[]}"#);
    }

    #[test]
    fn missing_id_is_rejected() {
        let err = Record::try_from(json!({"title": "T"})).unwrap_err();
        assert_eq!(err, PatchError::InvalidRecord("missing `id` field".into()));
    }

    #[test]
    fn non_string_id_is_rejected() {
        assert!(Record::try_from(json!({"id": 7})).is_err());
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(Record::try_from(json!(["id"])).is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let rec: Record = serde_json::from_value(json!({"id": "X"})).unwrap();
        assert_eq!(rec.id(), "X");
        let bad: Result<Record, _> = serde_json::from_value(json!({"id": null}));
        assert!(bad.is_err());
    }

    #[test]
    fn id_of_raw_entries() {
        assert_eq!(Record::id_of(&json!({"id": "A"})), Some("A"));
        assert_eq!(Record::id_of(&json!({"id": 1})), None);
        assert_eq!(Record::id_of(&json!("A")), None);
    }
}
