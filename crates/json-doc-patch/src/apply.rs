//! Upsert and field-update operations over document collections.

use serde_json::{Map, Value};
use tracing::debug;

use crate::document::Document;
use crate::record::{Record, ID_FIELD};
use crate::types::{PatchError, UpdateOutcome, UpsertOutcome};

/// Appends `record` to `collection` unless an entry with the same id exists.
///
/// The collection is created as an empty array when absent. Existing entries
/// are never modified, so applying the same upsert twice is a no-op the second
/// time.
pub fn upsert(
    doc: &mut Document,
    collection: &str,
    record: Record,
) -> Result<UpsertOutcome, PatchError> {
    let items = doc.collection_or_insert(collection)?;
    if items.iter().any(|entry| Record::id_of(entry) == Some(record.id())) {
        debug!(collection, id = record.id(), "record already present");
        return Ok(UpsertOutcome::AlreadyPresent);
    }
    debug!(collection, id = record.id(), "appending record");
    items.push(record.into());
    Ok(UpsertOutcome::Inserted)
}

/// Overwrites `fields` on the entry of `collection` whose id is `id`.
///
/// Only the listed keys change; every other key of the record, and every other
/// record, is left as is. New keys are appended after the existing ones. When
/// the collection or the record is absent, [`UpdateOutcome::NotFound`] is
/// returned and the document is untouched.
pub fn update_field(
    doc: &mut Document,
    collection: &str,
    id: &str,
    fields: Map<String, Value>,
) -> Result<UpdateOutcome, PatchError> {
    let Some(items) = doc.collection_mut(collection)? else {
        debug!(collection, id, "collection absent");
        return Ok(UpdateOutcome::NotFound);
    };
    let Some(target) = items
        .iter_mut()
        .find(|entry| Record::id_of(entry) == Some(id))
        .and_then(Value::as_object_mut)
    else {
        debug!(collection, id, "record absent");
        return Ok(UpdateOutcome::NotFound);
    };

    if let Some(new_id) = fields.get(ID_FIELD) {
        if new_id.as_str() != Some(id) {
            return Err(PatchError::IdChange {
                collection: collection.to_owned(),
                id: id.to_owned(),
                attempted: new_id.to_string(),
            });
        }
    }

    let mut previous = Map::new();
    for (key, value) in fields {
        if let Some(old) = target.insert(key.clone(), value) {
            previous.insert(key, old);
        }
    }
    debug!(collection, id, fields = previous.len(), "record updated");
    Ok(UpdateOutcome::Updated { previous })
}
