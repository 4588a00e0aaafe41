//! In-memory search over users, tickets and organizations.
//!
//! Collections are loaded once from flat JSON files, indexed by id, foreign
//! key and tag, and queried by `(kind, field, value)`. Every match comes back
//! joined with its related records from the other two collections.

pub mod config;
pub mod fixtures;
pub mod index;
pub mod logging;
pub mod model;
pub mod schema;
pub mod search;
pub mod store;

pub use config::StoreConfig;
pub use fixtures::{generate, write_fixtures, FixtureError, FixtureOptions, FixtureSet};
pub use index::{Indexes, Position, TagBucket};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{Entity, FieldMap, Group, Person, RecordId, WorkItem};
pub use model::kind::{EntityKind, ParseKindError};
pub use model::value::FieldValue;
pub use model::{ID_FIELD, TAGS_FIELD};
pub use schema::FieldRegistry;
pub use search::engine::{QueryError, SearchEngine, SearchRequest};
pub use search::enrich::{EnrichedGroup, EnrichedPerson, EnrichedWorkItem, Enriched, Enricher};
pub use search::outcome::{SearchOutcome, TagMatches};
pub use store::{LoadError, RecordStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
