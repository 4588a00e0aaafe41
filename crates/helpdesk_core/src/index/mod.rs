//! Primary and secondary lookup indexes.
//!
//! # Responsibility
//! - Build id, foreign-key and tag indexes in one pass per collection.
//! - Hand out record positions; record content stays in the store.
//!
//! # Invariants
//! - Secondary buckets preserve load order and never hold a position twice.
//! - Records without a foreign key or tags are absent from that bucket.
//! - Each collection is indexed independently, so build order is irrelevant.

use crate::model::entity::{Entity, RecordId};
use crate::model::kind::EntityKind;
use crate::store::RecordStore;
use log::{info, warn};
use std::collections::HashMap;
use std::time::Instant;

/// Offset of a record inside its owning collection.
pub type Position = usize;

type PrimaryIndex = HashMap<RecordId, Position>;
type ReverseIndex = HashMap<RecordId, Vec<Position>>;

/// Per-kind record positions carrying one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBucket {
    persons: Vec<Position>,
    work_items: Vec<Position>,
    groups: Vec<Position>,
}

impl TagBucket {
    /// Positions of tagged records of `kind`, in load order.
    pub fn positions(&self, kind: EntityKind) -> &[Position] {
        match kind {
            EntityKind::Person => &self.persons,
            EntityKind::WorkItem => &self.work_items,
            EntityKind::Group => &self.groups,
        }
    }

    fn positions_mut(&mut self, kind: EntityKind) -> &mut Vec<Position> {
        match kind {
            EntityKind::Person => &mut self.persons,
            EntityKind::WorkItem => &mut self.work_items,
            EntityKind::Group => &mut self.groups,
        }
    }
}

/// Immutable index set derived from a `RecordStore`.
#[derive(Debug, Clone, Default)]
pub struct Indexes {
    persons_by_id: PrimaryIndex,
    work_items_by_id: PrimaryIndex,
    groups_by_id: PrimaryIndex,
    persons_by_group: ReverseIndex,
    work_items_by_group: ReverseIndex,
    work_items_by_requester: ReverseIndex,
    work_items_by_submitter: ReverseIndex,
    tags: HashMap<String, TagBucket>,
}

impl Indexes {
    /// Builds every index over `store`.
    ///
    /// # Side effects
    /// - Emits `index_duplicate_id` warnings and one `index_build` event.
    pub fn build(store: &RecordStore) -> Self {
        let started_at = Instant::now();
        let mut indexes = Self::default();

        indexes.persons_by_id = build_primary(store.persons());
        for (position, person) in store.persons().iter().enumerate() {
            push_reference(
                &mut indexes.persons_by_group,
                person.organization_id.as_deref(),
                position,
            );
        }

        indexes.work_items_by_id = build_primary(store.work_items());
        for (position, item) in store.work_items().iter().enumerate() {
            push_reference(
                &mut indexes.work_items_by_group,
                item.organization_id.as_deref(),
                position,
            );
            push_reference(
                &mut indexes.work_items_by_requester,
                item.requester_id.as_deref(),
                position,
            );
            push_reference(
                &mut indexes.work_items_by_submitter,
                item.submitter_id.as_deref(),
                position,
            );
        }

        indexes.groups_by_id = build_primary(store.groups());

        index_tags(&mut indexes.tags, store.persons());
        index_tags(&mut indexes.tags, store.work_items());
        index_tags(&mut indexes.tags, store.groups());

        info!(
            "event=index_build module=index status=ok persons={} work_items={} groups={} tags={} duration_ms={}",
            indexes.persons_by_id.len(),
            indexes.work_items_by_id.len(),
            indexes.groups_by_id.len(),
            indexes.tags.len(),
            started_at.elapsed().as_millis()
        );
        indexes
    }

    /// O(1) identifier lookup.
    pub fn position_of(&self, kind: EntityKind, id: &str) -> Option<Position> {
        let primary = match kind {
            EntityKind::Person => &self.persons_by_id,
            EntityKind::WorkItem => &self.work_items_by_id,
            EntityKind::Group => &self.groups_by_id,
        };
        primary.get(id).copied()
    }

    /// Persons whose `organization_id` is `group_id`.
    pub fn persons_in_group(&self, group_id: &str) -> &[Position] {
        bucket(&self.persons_by_group, group_id)
    }

    /// Work items whose `organization_id` is `group_id`.
    pub fn work_items_in_group(&self, group_id: &str) -> &[Position] {
        bucket(&self.work_items_by_group, group_id)
    }

    /// Work items whose `requester_id` is `person_id`.
    pub fn work_items_requested_by(&self, person_id: &str) -> &[Position] {
        bucket(&self.work_items_by_requester, person_id)
    }

    /// Work items whose `submitter_id` is `person_id`.
    pub fn work_items_submitted_by(&self, person_id: &str) -> &[Position] {
        bucket(&self.work_items_by_submitter, person_id)
    }

    /// Records of every kind tagged with `tag` (exact, case-sensitive).
    pub fn tagged(&self, tag: &str) -> Option<&TagBucket> {
        self.tags.get(tag)
    }
}

fn build_primary<T: Entity>(records: &[T]) -> PrimaryIndex {
    let mut primary = PrimaryIndex::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        if let Some(previous) = primary.insert(record.id().to_string(), position) {
            warn!(
                "event=index_duplicate_id module=index status=degraded kind={} id={} replaced_position={} position={}",
                T::KIND,
                record.id(),
                previous,
                position
            );
        }
    }
    primary
}

fn push_reference(index: &mut ReverseIndex, foreign_id: Option<&str>, position: Position) {
    match foreign_id {
        Some(id) if !id.is_empty() => index.entry(id.to_string()).or_default().push(position),
        _ => {}
    }
}

fn index_tags<T: Entity>(tags: &mut HashMap<String, TagBucket>, records: &[T]) {
    for (position, record) in records.iter().enumerate() {
        for tag in record.tags() {
            let positions = tags.entry(tag.clone()).or_default().positions_mut(T::KIND);
            // A tag repeated on one record must not list that record twice.
            if positions.last() != Some(&position) {
                positions.push(position);
            }
        }
    }
}

fn bucket<'a>(index: &'a ReverseIndex, key: &str) -> &'a [Position] {
    index.get(key).map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::Indexes;
    use crate::model::entity::{Group, Person, WorkItem};
    use crate::model::kind::EntityKind;
    use crate::store::RecordStore;

    fn person(id: &str, group: Option<&str>, tags: &[&str]) -> Person {
        let mut person = Person::new(id);
        person.organization_id = group.map(str::to_string);
        person.tags = Some(tags.iter().map(|tag| tag.to_string()).collect());
        person
    }

    #[test]
    fn reverse_indexes_keep_load_order_and_skip_blank_keys() {
        let store = RecordStore::new(
            vec![
                person("1", Some("g1"), &[]),
                person("2", Some(""), &[]),
                person("3", None, &[]),
                person("4", Some("g1"), &[]),
            ],
            Vec::new(),
            vec![Group::new("g1")],
        );

        let indexes = Indexes::build(&store);
        assert_eq!(indexes.persons_in_group("g1"), &[0, 3]);
        assert!(indexes.persons_in_group("").is_empty());
        assert!(indexes.persons_in_group("missing").is_empty());
    }

    #[test]
    fn repeated_tag_on_one_record_is_indexed_once() {
        let store = RecordStore::new(vec![person("1", None, &["oil", "oil"])], Vec::new(), Vec::new());
        let indexes = Indexes::build(&store);
        let bucket = indexes.tagged("oil").unwrap();
        assert_eq!(bucket.positions(EntityKind::Person), &[0]);
        assert!(bucket.positions(EntityKind::Group).is_empty());
    }

    #[test]
    fn duplicate_ids_resolve_to_last_record() {
        let store = RecordStore::new(
            Vec::new(),
            vec![WorkItem::new("t1"), WorkItem::new("t2"), WorkItem::new("t1")],
            Vec::new(),
        );
        let indexes = Indexes::build(&store);
        assert_eq!(indexes.position_of(EntityKind::WorkItem, "t1"), Some(2));
        assert_eq!(indexes.position_of(EntityKind::Person, "t1"), None);
    }

    #[test]
    fn ids_are_scoped_per_kind() {
        let store = RecordStore::new(
            vec![Person::new("1")],
            vec![WorkItem::new("1")],
            vec![Group::new("1")],
        );
        let indexes = Indexes::build(&store);
        for kind in EntityKind::ALL {
            assert_eq!(indexes.position_of(kind, "1"), Some(0));
        }
    }
}
