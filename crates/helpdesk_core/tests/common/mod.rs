#![allow(dead_code)]

use helpdesk_core::{Group, Person, RecordStore, SearchEngine, WorkItem};
use serde_json::{json, Value};

pub fn users() -> Value {
    json!([
        {
            "_id": "92",
            "name": "Teresa Hill",
            "email": "teresahill@example.org",
            "active": "True",
            "organization_id": "12",
            "tags": ["oil", "market"]
        },
        {
            "_id": "6",
            "name": "Jason Davis",
            "email": "jasondavis@example.org",
            "active": "False",
            "organization_id": "34",
            "tags": ["oil"]
        },
        {
            "_id": "99",
            "name": "Jason Davis",
            "email": "benjamingomez@example.org",
            "active": "True",
            "organization_id": "404",
            "tags": ["travel"]
        }
    ])
}

pub fn tickets() -> Value {
    json!([
        {
            "_id": "t1",
            "subject": "Later here around here run future.",
            "description": "Printer keeps jamming.",
            "priority": "P3",
            "status": "closed",
            "organization_id": "12",
            "requester_id": "92",
            "submitter_id": "6",
            "tags": ["oil", "oil"]
        },
        {
            "_id": "ticket_399",
            "subject": "Signal network report.",
            "description": "",
            "priority": "P1",
            "status": "open",
            "organization_id": "999",
            "requester_id": "6",
            "submitter_id": "92",
            "tags": ["glass"]
        },
        {
            "_id": "ticket_7",
            "subject": "Orphan ticket.",
            "description": "No links at all.",
            "priority": "P2",
            "status": "pending",
            "tags": []
        }
    ])
}

pub fn organizations() -> Value {
    json!([
        {
            "_id": "12",
            "name": "Reynolds, Rios and Andrews",
            "domain": "rios.com",
            "tags": ["market"]
        },
        {
            "_id": "34",
            "name": "Hendrix Ltd",
            "domain": "wallace.com",
            "tags": ["oil", "glass"]
        }
    ])
}

pub fn store() -> RecordStore {
    RecordStore::new(
        serde_json::from_value::<Vec<Person>>(users()).unwrap(),
        serde_json::from_value::<Vec<WorkItem>>(tickets()).unwrap(),
        serde_json::from_value::<Vec<Group>>(organizations()).unwrap(),
    )
}

pub fn engine() -> SearchEngine {
    SearchEngine::new(store())
}
