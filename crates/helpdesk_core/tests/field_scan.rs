mod common;

use helpdesk_core::{Entity, EntityKind, SearchOutcome};

#[test]
fn scan_is_case_insensitive_exact_match() {
    let engine = common::engine();
    let upper = engine.search(EntityKind::Person, "name", "JASON DAVIS");
    let lower = engine.search(EntityKind::Person, "name", "jason davis");
    assert_eq!(upper, lower);

    let SearchOutcome::ByField(entries) = upper else {
        panic!("name is not indexed");
    };
    let ids: Vec<_> = entries.iter().map(|entry| entry.id()).collect();
    assert_eq!(ids, vec!["6", "99"]);

    assert!(engine.scan(EntityKind::Person, "name", "jason").is_empty());
}

#[test]
fn scan_results_are_enriched() {
    let engine = common::engine();
    let SearchOutcome::ByField(entries) =
        engine.search(EntityKind::Person, "email", "benjamingomez@example.org")
    else {
        panic!("email is not indexed");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id(), "99");

    let value = serde_json::to_value(&entries).unwrap();
    // Person 99 points at a missing organization.
    assert_eq!(value[0]["organization"], serde_json::json!({}));
    assert_eq!(value[0]["tickets"], serde_json::json!([]));
    assert_eq!(value[0]["user"]["_id"], serde_json::json!("99"));
}

#[test]
fn empty_string_is_a_valid_match_target() {
    let engine = common::engine();
    let entries = engine.scan(EntityKind::WorkItem, "description", "");
    assert_eq!(entries.len(), 1);
    let helpdesk_core::Enriched::WorkItem(entry) = &entries[0] else {
        panic!("ticket scan must yield tickets");
    };
    assert_eq!(entry.work_item.field_text("description").as_deref(), Some(""));
}

#[test]
fn scan_compares_typed_foreign_keys_too() {
    let engine = common::engine();
    let entries = engine.scan(EntityKind::WorkItem, "requester_id", "92");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id(), "t1");
}

#[test]
fn repeated_search_is_stable() {
    let engine = common::engine();
    let first = engine.search(EntityKind::WorkItem, "status", "OPEN");
    let second = engine.search(EntityKind::WorkItem, "status", "OPEN");
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
}
