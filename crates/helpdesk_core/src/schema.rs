//! Allowed query fields per entity kind.
//!
//! # Responsibility
//! - Derive the legal query keys of each kind from its first loaded record.
//! - Answer membership checks and list fields for help output.
//!
//! # Invariants
//! - Field lists are computed once and sorted.
//! - A kind with zero records has an empty field list.

use crate::model::entity::Entity;
use crate::model::kind::EntityKind;
use crate::store::RecordStore;

/// Runtime registry of valid query fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRegistry {
    persons: Vec<String>,
    work_items: Vec<String>,
    groups: Vec<String>,
}

impl FieldRegistry {
    pub fn from_store(store: &RecordStore) -> Self {
        Self {
            persons: first_record_fields(store.persons()),
            work_items: first_record_fields(store.work_items()),
            groups: first_record_fields(store.groups()),
        }
    }

    /// Returns whether `field` may be queried on `kind`.
    pub fn is_valid_field(&self, kind: EntityKind, field: &str) -> bool {
        self.fields(kind)
            .binary_search_by(|candidate| candidate.as_str().cmp(field))
            .is_ok()
    }

    /// Sorted field names for `kind`.
    pub fn fields(&self, kind: EntityKind) -> &[String] {
        match kind {
            EntityKind::Person => &self.persons,
            EntityKind::WorkItem => &self.work_items,
            EntityKind::Group => &self.groups,
        }
    }

    /// All kinds with their fields, in menu order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &[String])> + '_ {
        EntityKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.fields(kind)))
    }
}

fn first_record_fields<T: Entity>(records: &[T]) -> Vec<String> {
    records
        .first()
        .map(Entity::field_names)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::FieldRegistry;
    use crate::model::entity::{Person, WorkItem};
    use crate::model::kind::EntityKind;
    use crate::store::RecordStore;

    #[test]
    fn fields_come_from_first_record_only() {
        let mut first = Person::new("1");
        first.fields.insert("name".to_string(), "A".into());
        let mut second = Person::new("2");
        second.fields.insert("email".to_string(), "b@example.org".into());
        let store = RecordStore::new(vec![first, second], vec![WorkItem::new("t")], Vec::new());

        let registry = FieldRegistry::from_store(&store);
        assert!(registry.is_valid_field(EntityKind::Person, "name"));
        assert!(registry.is_valid_field(EntityKind::Person, "_id"));
        assert!(!registry.is_valid_field(EntityKind::Person, "email"));
        assert_eq!(registry.fields(EntityKind::WorkItem), ["_id".to_string()]);
    }

    #[test]
    fn empty_kind_accepts_no_fields() {
        let registry = FieldRegistry::from_store(&RecordStore::default());
        assert!(registry.fields(EntityKind::Group).is_empty());
        assert!(!registry.is_valid_field(EntityKind::Group, "_id"));
        assert_eq!(registry.iter().count(), 3);
    }
}
