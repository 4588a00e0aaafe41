mod common;

use helpdesk_core::{EntityKind, QueryError, SearchEngine, SearchRequest, StoreConfig};
use serde_json::json;

#[test]
fn allowed_fields_come_from_first_record() {
    let engine = common::engine();
    let fields = engine.fields();

    assert_eq!(
        fields.fields(EntityKind::Group),
        ["_id", "domain", "name", "tags"].map(String::from)
    );
    assert!(engine.is_valid_field(EntityKind::WorkItem, "submitter_id"));
    assert!(engine.is_valid_field(EntityKind::Person, "organization_id"));
    assert!(!engine.is_valid_field(EntityKind::Person, "subject"));
}

#[test]
fn listing_covers_every_kind_in_menu_order() {
    let engine = common::engine();
    let kinds: Vec<_> = engine.fields().iter().map(|(kind, _)| kind).collect();
    assert_eq!(kinds, EntityKind::ALL.to_vec());
}

#[test]
fn checked_query_rejects_invalid_field_before_searching() {
    let engine = common::engine();
    let request = SearchRequest::parse("organizations", "subject", "x").unwrap();
    let err = engine.query(&request).unwrap_err();
    assert!(matches!(err, QueryError::InvalidField { kind: EntityKind::Group, .. }));
    assert!(err.to_string().contains("subject"));
}

#[test]
fn null_keys_of_first_record_stay_searchable() {
    let dir = tempfile::tempdir().unwrap();
    let users = json!({
        "users": [
            { "_id": "1", "name": "A", "organization_id": null, "tags": null },
            { "_id": "2", "name": "B", "organization_id": "12", "tags": ["oil"] }
        ]
    });
    std::fs::write(dir.path().join("users.json"), users.to_string()).unwrap();

    let engine = SearchEngine::load(&StoreConfig::new(dir.path()));
    assert_eq!(
        engine.fields().fields(EntityKind::Person),
        ["_id", "name", "organization_id", "tags"].map(String::from)
    );
    assert!(engine.is_valid_field(EntityKind::Person, "tags"));

    let request = SearchRequest::parse("users", "tags", "oil").unwrap();
    assert_eq!(engine.query(&request).unwrap().len(), 1);

    let request = SearchRequest::parse("users", "organization_id", "").unwrap();
    let outcome = engine.query(&request).unwrap();
    assert_eq!(outcome.len(), 1);
}
