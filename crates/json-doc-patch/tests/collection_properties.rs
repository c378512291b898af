use json_doc_patch::{update_field, upsert, Document, Record, UpdateOutcome, UpsertOutcome};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn id_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9-]{1,12}"
}

fn payload_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[ -~]{0,16}".prop_map(Value::from),
        Just(json!({"x": 0, "y": 22, "width": 24, "height": 8})),
        Just(json!([])),
    ]
}

fn record_strategy() -> impl Strategy<Value = Record> {
    (id_strategy(), proptest::collection::vec(("[a-z]{1,8}", payload_strategy()), 0..4)).prop_map(
        |(id, extra)| {
            let mut fields = Map::new();
            fields.insert("id".into(), Value::String(id));
            for (key, value) in extra {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
            Record::try_from(fields).unwrap()
        },
    )
}

/// A document with unique ids in `tiles`.
fn document_strategy() -> impl Strategy<Value = Document> {
    proptest::collection::vec(record_strategy(), 0..8).prop_map(|records| {
        let mut doc = Document::try_from(json!({"title": "dash", "tiles": [], "queries": []})).unwrap();
        for record in records {
            upsert(&mut doc, "tiles", record).unwrap();
        }
        doc
    })
}

fn tiles(doc: &Document) -> Vec<Value> {
    doc.get("tiles").and_then(Value::as_array).cloned().unwrap_or_default()
}

proptest! {
    #[test]
    fn upsert_is_idempotent(doc in document_strategy(), record in record_strategy()) {
        let mut once = doc.clone();
        upsert(&mut once, "tiles", record.clone()).unwrap();
        let mut twice = once.clone();
        let second = upsert(&mut twice, "tiles", record).unwrap();
        prop_assert_eq!(second, UpsertOutcome::AlreadyPresent);
        prop_assert_eq!(tiles(&twice), tiles(&once));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn upsert_never_touches_existing_entries(doc in document_strategy(), record in record_strategy()) {
        let before = tiles(&doc);
        let mut after_doc = doc.clone();
        let outcome = upsert(&mut after_doc, "tiles", record.clone()).unwrap();
        let after = tiles(&after_doc);
        prop_assert_eq!(&after[..before.len()], &before[..]);
        match outcome {
            UpsertOutcome::Inserted => {
                prop_assert_eq!(after.len(), before.len() + 1);
                prop_assert_eq!(after.last().cloned(), Some(Value::from(record)));
            }
            UpsertOutcome::AlreadyPresent => prop_assert_eq!(after.len(), before.len()),
        }
        prop_assert!(after_doc.duplicate_ids("tiles").is_empty());
    }

    #[test]
    fn update_changes_only_listed_fields(
        doc in document_strategy(),
        value in payload_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let records = doc.records("tiles");
        prop_assume!(!records.is_empty());
        let target = records[pick.index(records.len())].clone();

        let mut fields = Map::new();
        fields.insert("patched".into(), value.clone());
        let mut patched = doc.clone();
        let outcome = update_field(&mut patched, "tiles", target.id(), fields).unwrap();
        prop_assert!(outcome.is_found());

        for (old, new) in doc.records("tiles").iter().zip(patched.records("tiles").iter()) {
            if old.id() == target.id() {
                prop_assert_eq!(new.get("patched"), Some(&value));
                for (key, v) in old.fields() {
                    if key != "patched" {
                        prop_assert_eq!(new.get(key), Some(v));
                    }
                }
            } else {
                prop_assert_eq!(old, new);
            }
        }
        prop_assert_eq!(doc.records("tiles").len(), patched.records("tiles").len());
    }

    #[test]
    fn update_of_unknown_id_changes_nothing(doc in document_strategy(), value in payload_strategy()) {
        let mut fields = Map::new();
        fields.insert("text".into(), value);
        let mut patched = doc.clone();
        // Generated ids never contain uppercase letters.
        let outcome = update_field(&mut patched, "tiles", "ABSENT", fields).unwrap();
        prop_assert_eq!(outcome, UpdateOutcome::NotFound);
        prop_assert_eq!(patched, doc);
    }
}
