//! In-memory record store.
//!
//! # Responsibility
//! - Own the three collections in load order.
//! - Degrade a missing or corrupt source to an empty collection.
//!
//! # Invariants
//! - The store is immutable once constructed.
//! - Identifier uniqueness is assumed, not re-validated here.

mod loader;

pub use loader::{load_collection, read_collection, LoadError, LoadResult};

use crate::config::StoreConfig;
use crate::model::entity::{Group, Person, WorkItem};
use crate::model::kind::EntityKind;

/// Owned, ordered collections of every kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    persons: Vec<Person>,
    work_items: Vec<WorkItem>,
    groups: Vec<Group>,
}

impl RecordStore {
    pub fn new(persons: Vec<Person>, work_items: Vec<WorkItem>, groups: Vec<Group>) -> Self {
        Self {
            persons,
            work_items,
            groups,
        }
    }

    /// Loads all three collection files from `config.data_dir`.
    ///
    /// # Side effects
    /// - Emits one `store_load` event per collection; failures are logged
    ///   as `degraded` and yield an empty collection.
    pub fn load(config: &StoreConfig) -> Self {
        Self {
            persons: load_collection(&config.users_path()),
            work_items: load_collection(&config.tickets_path()),
            groups: load_collection(&config.organizations_path()),
        }
    }

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn work_items(&self) -> &[WorkItem] {
        &self.work_items
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of records loaded for `kind`.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Person => self.persons.len(),
            EntityKind::WorkItem => self.work_items.len(),
            EntityKind::Group => self.groups.len(),
        }
    }
}
