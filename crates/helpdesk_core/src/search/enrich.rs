//! Joins a matched record with its related records.
//!
//! # Responsibility
//! - Resolve foreign keys through the primary indexes.
//! - Resolve reverse relations through the secondary indexes.
//!
//! # Invariants
//! - Every enriched shape always carries every relation key; a missing
//!   single relation is `None` and serializes as `{}`, a missing list is
//!   empty.
//! - A dangling foreign key resolves to `None`, never an error.

use crate::index::{Indexes, Position};
use crate::model::entity::{Group, Person, WorkItem};
use crate::model::kind::EntityKind;
use crate::store::RecordStore;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Person with its organization and tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedPerson<'a> {
    #[serde(rename = "user")]
    pub person: &'a Person,
    #[serde(rename = "organization", serialize_with = "empty_when_none")]
    pub group: Option<&'a Group>,
    /// Tickets requested by this person.
    #[serde(rename = "tickets")]
    pub work_items: Vec<&'a WorkItem>,
    #[serde(rename = "submitted_tickets")]
    pub submitted_work_items: Vec<&'a WorkItem>,
}

/// Work item with its organization, requester and submitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedWorkItem<'a> {
    #[serde(rename = "ticket")]
    pub work_item: &'a WorkItem,
    #[serde(rename = "organization", serialize_with = "empty_when_none")]
    pub group: Option<&'a Group>,
    #[serde(serialize_with = "empty_when_none")]
    pub requester: Option<&'a Person>,
    #[serde(serialize_with = "empty_when_none")]
    pub submitter: Option<&'a Person>,
}

/// Group with its members and tickets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedGroup<'a> {
    #[serde(rename = "organization")]
    pub group: &'a Group,
    #[serde(rename = "users")]
    pub persons: Vec<&'a Person>,
    #[serde(rename = "tickets")]
    pub work_items: Vec<&'a WorkItem>,
}

/// One enriched record of any kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Enriched<'a> {
    Person(EnrichedPerson<'a>),
    WorkItem(EnrichedWorkItem<'a>),
    Group(EnrichedGroup<'a>),
}

impl Enriched<'_> {
    /// Identifier of the primary record.
    pub fn id(&self) -> &str {
        match self {
            Self::Person(entry) => &entry.person.id,
            Self::WorkItem(entry) => &entry.work_item.id,
            Self::Group(entry) => &entry.group.id,
        }
    }
}

/// Read-only view over the store and its indexes that builds joined results.
#[derive(Debug, Clone, Copy)]
pub struct Enricher<'a> {
    store: &'a RecordStore,
    indexes: &'a Indexes,
}

impl<'a> Enricher<'a> {
    pub fn new(store: &'a RecordStore, indexes: &'a Indexes) -> Self {
        Self { store, indexes }
    }

    /// Enriches the record of `kind` stored at `position`.
    pub fn enrich_at(&self, kind: EntityKind, position: Position) -> Option<Enriched<'a>> {
        match kind {
            EntityKind::Person => self
                .store
                .persons()
                .get(position)
                .map(|person| Enriched::Person(self.person(person))),
            EntityKind::WorkItem => self
                .store
                .work_items()
                .get(position)
                .map(|item| Enriched::WorkItem(self.work_item(item))),
            EntityKind::Group => self
                .store
                .groups()
                .get(position)
                .map(|group| Enriched::Group(self.group(group))),
        }
    }

    pub fn person(&self, person: &'a Person) -> EnrichedPerson<'a> {
        EnrichedPerson {
            person,
            group: self.group_by_id(person.organization_id.as_deref()),
            work_items: self.work_items_at(self.indexes.work_items_requested_by(&person.id)),
            submitted_work_items: self
                .work_items_at(self.indexes.work_items_submitted_by(&person.id)),
        }
    }

    pub fn work_item(&self, work_item: &'a WorkItem) -> EnrichedWorkItem<'a> {
        EnrichedWorkItem {
            work_item,
            group: self.group_by_id(work_item.organization_id.as_deref()),
            requester: self.person_by_id(work_item.requester_id.as_deref()),
            submitter: self.person_by_id(work_item.submitter_id.as_deref()),
        }
    }

    pub fn group(&self, group: &'a Group) -> EnrichedGroup<'a> {
        EnrichedGroup {
            group,
            persons: self.persons_at(self.indexes.persons_in_group(&group.id)),
            work_items: self.work_items_at(self.indexes.work_items_in_group(&group.id)),
        }
    }

    /// Persons stored at `positions`, in the given order.
    pub fn persons_at(&self, positions: &[Position]) -> Vec<&'a Person> {
        let persons = self.store.persons();
        positions.iter().filter_map(|&at| persons.get(at)).collect()
    }

    pub fn work_items_at(&self, positions: &[Position]) -> Vec<&'a WorkItem> {
        let items = self.store.work_items();
        positions.iter().filter_map(|&at| items.get(at)).collect()
    }

    pub fn groups_at(&self, positions: &[Position]) -> Vec<&'a Group> {
        let groups = self.store.groups();
        positions.iter().filter_map(|&at| groups.get(at)).collect()
    }

    fn person_by_id(&self, id: Option<&str>) -> Option<&'a Person> {
        let position = self.indexes.position_of(EntityKind::Person, id?)?;
        self.store.persons().get(position)
    }

    fn group_by_id(&self, id: Option<&str>) -> Option<&'a Group> {
        let position = self.indexes.position_of(EntityKind::Group, id?)?;
        self.store.groups().get(position)
    }
}

fn empty_when_none<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(inner) => inner.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
