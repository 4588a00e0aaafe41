mod common;

use helpdesk_core::{Enriched, Entity, EntityKind, SearchOutcome};

#[test]
fn every_record_is_found_by_its_own_id() {
    let engine = common::engine();
    let store = engine.store();

    for person in store.persons() {
        match engine.search(EntityKind::Person, "_id", &person.id) {
            SearchOutcome::ById(Some(Enriched::Person(found))) => assert_eq!(found.person, person),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    for item in store.work_items() {
        match engine.search(EntityKind::WorkItem, "_id", &item.id) {
            SearchOutcome::ById(Some(Enriched::WorkItem(found))) => {
                assert_eq!(found.work_item, item)
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    for group in store.groups() {
        match engine.search(EntityKind::Group, "_id", &group.id) {
            SearchOutcome::ById(Some(Enriched::Group(found))) => assert_eq!(found.group, group),
            other => panic!("unexpected outcome {other:?}"),
        }
    }
}

#[test]
fn person_by_id_carries_requested_tickets() {
    let engine = common::engine();
    let SearchOutcome::ById(Some(Enriched::Person(result))) =
        engine.search(EntityKind::Person, "_id", "92")
    else {
        panic!("person 92 should be found");
    };

    assert_eq!(result.person.field_text("name").as_deref(), Some("Teresa Hill"));
    assert_eq!(
        result.work_items[0].field_text("subject").as_deref(),
        Some("Later here around here run future.")
    );
    assert_eq!(result.submitted_work_items[0].id, "ticket_399");
    assert_eq!(result.group.unwrap().id, "12");
}

#[test]
fn ticket_by_id_resolves_organization_and_people() {
    let engine = common::engine();
    let SearchOutcome::ById(Some(Enriched::WorkItem(result))) =
        engine.search(EntityKind::WorkItem, "_id", "t1")
    else {
        panic!("ticket t1 should be found");
    };

    assert_eq!(result.work_item.field_text("priority").as_deref(), Some("P3"));
    assert_eq!(
        result.group.unwrap().field_text("name").as_deref(),
        Some("Reynolds, Rios and Andrews")
    );
    assert_eq!(result.requester.unwrap().id, "92");
    assert_eq!(result.submitter.unwrap().id, "6");
}

#[test]
fn dangling_organization_resolves_to_empty_relation() {
    let engine = common::engine();
    let SearchOutcome::ById(Some(Enriched::WorkItem(result))) =
        engine.search(EntityKind::WorkItem, "_id", "ticket_399")
    else {
        panic!("ticket_399 should be found");
    };

    assert!(result.group.is_none());
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["organization"], serde_json::json!({}));
}

#[test]
fn ids_are_scoped_to_the_requested_kind() {
    let engine = common::engine();
    assert_eq!(
        engine.search(EntityKind::Group, "_id", "92"),
        SearchOutcome::ById(None)
    );
    assert!(engine.search(EntityKind::Group, "_id", "12").len() == 1);
}
