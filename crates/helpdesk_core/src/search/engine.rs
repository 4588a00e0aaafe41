//! Query engine over the indexed store.
//!
//! # Responsibility
//! - Route a `(kind, field, value)` query to the id index, the tag index or
//!   a linear scan.
//! - Return structured outcomes; rendering belongs to callers.
//!
//! # Invariants
//! - `search` is total: not-found is an empty outcome, never an error.
//! - Scan results keep collection order.
//! - Repeated queries over the same engine return identical outcomes.

use crate::config::StoreConfig;
use crate::index::{Indexes, Position};
use crate::model::entity::Entity;
use crate::model::kind::{EntityKind, ParseKindError};
use crate::model::{ID_FIELD, TAGS_FIELD};
use crate::schema::FieldRegistry;
use crate::search::enrich::{Enriched, Enricher};
use crate::search::outcome::{SearchOutcome, TagMatches};
use crate::store::RecordStore;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-side query rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    UnknownKind(String),
    /// Field is not in the allowed set of `kind`.
    InvalidField { kind: EntityKind, field: String },
}

impl Display for QueryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKind(value) => write!(
                f,
                "unknown entity kind `{value}`; expected users|tickets|organizations"
            ),
            Self::InvalidField { kind, field } => {
                write!(f, "`{field}` is not a valid search field for {kind}")
            }
        }
    }
}

impl Error for QueryError {}

impl From<ParseKindError> for QueryError {
    fn from(value: ParseKindError) -> Self {
        Self::UnknownKind(value.0)
    }
}

/// One `(kind, field, value)` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub kind: EntityKind,
    pub field: String,
    pub value: String,
}

impl SearchRequest {
    pub fn new(kind: EntityKind, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            value: value.into(),
        }
    }

    /// Builds a request from raw driver input, parsing the kind name.
    pub fn parse(
        kind: &str,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, QueryError> {
        Ok(Self::new(kind.parse::<EntityKind>()?, field, value))
    }
}

/// Owns the store, its indexes and the field registry.
///
/// Constructed once at startup; every query borrows it immutably.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    store: RecordStore,
    indexes: Indexes,
    fields: FieldRegistry,
}

impl SearchEngine {
    /// Indexes `store` and derives the allowed-field registry.
    pub fn new(store: RecordStore) -> Self {
        let indexes = Indexes::build(&store);
        let fields = FieldRegistry::from_store(&store);
        Self {
            store,
            indexes,
            fields,
        }
    }

    /// Loads the collections named by `config` and indexes them.
    pub fn load(config: &StoreConfig) -> Self {
        Self::new(RecordStore::load(config))
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    pub fn is_valid_field(&self, kind: EntityKind, field: &str) -> bool {
        self.fields.is_valid_field(kind, field)
    }

    pub fn enricher(&self) -> Enricher<'_> {
        Enricher::new(&self.store, &self.indexes)
    }

    /// Validates `request.field` and runs the search.
    pub fn query(&self, request: &SearchRequest) -> Result<SearchOutcome<'_>, QueryError> {
        if !self.is_valid_field(request.kind, &request.field) {
            return Err(QueryError::InvalidField {
                kind: request.kind,
                field: request.field.clone(),
            });
        }
        Ok(self.search(request.kind, &request.field, &request.value))
    }

    /// Runs one query, assuming `field` was already validated.
    ///
    /// - `_id` uses the primary index.
    /// - `tags` uses the tag index and answers for every kind.
    /// - Any other field is a case-insensitive exact scan of `kind`.
    pub fn search(&self, kind: EntityKind, field: &str, value: &str) -> SearchOutcome<'_> {
        let outcome = match field {
            ID_FIELD => SearchOutcome::ById(self.find_by_id(kind, value)),
            TAGS_FIELD => SearchOutcome::ByTag(self.find_by_tag(value)),
            _ => SearchOutcome::ByField(self.scan(kind, field, value)),
        };
        debug!(
            "event=search module=search status=ok kind={} mode={} matches={}",
            kind,
            outcome.mode(),
            outcome.len()
        );
        outcome
    }

    /// O(1) identifier lookup with enrichment.
    pub fn find_by_id(&self, kind: EntityKind, id: &str) -> Option<Enriched<'_>> {
        let position = self.indexes.position_of(kind, id)?;
        self.enricher().enrich_at(kind, position)
    }

    /// Records of every kind carrying `tag`.
    pub fn find_by_tag(&self, tag: &str) -> TagMatches<'_> {
        let Some(bucket) = self.indexes.tagged(tag) else {
            return TagMatches::default();
        };
        let enricher = self.enricher();
        TagMatches {
            persons: enricher.persons_at(bucket.positions(EntityKind::Person)),
            work_items: enricher.work_items_at(bucket.positions(EntityKind::WorkItem)),
            groups: enricher.groups_at(bucket.positions(EntityKind::Group)),
        }
    }

    /// Linear scan of `kind` comparing the stringified `field` to `value`.
    ///
    /// A record lacking `field` compares as the empty string.
    pub fn scan(&self, kind: EntityKind, field: &str, value: &str) -> Vec<Enriched<'_>> {
        let needle = value.to_lowercase();
        let positions = match kind {
            EntityKind::Person => matching_positions(self.store.persons(), field, &needle),
            EntityKind::WorkItem => matching_positions(self.store.work_items(), field, &needle),
            EntityKind::Group => matching_positions(self.store.groups(), field, &needle),
        };
        let enricher = self.enricher();
        positions
            .into_iter()
            .filter_map(|position| enricher.enrich_at(kind, position))
            .collect()
    }
}

fn matching_positions<T: Entity>(records: &[T], field: &str, needle: &str) -> Vec<Position> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            record.field_text(field).unwrap_or_default().to_lowercase() == needle
        })
        .map(|(position, _)| position)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{QueryError, SearchEngine, SearchRequest};
    use crate::model::entity::Person;
    use crate::model::kind::EntityKind;
    use crate::search::outcome::SearchOutcome;
    use crate::store::RecordStore;

    fn engine() -> SearchEngine {
        let mut person = Person::new("1");
        person.fields.insert("name".to_string(), "Ann".into());
        SearchEngine::new(RecordStore::new(vec![person], Vec::new(), Vec::new()))
    }

    #[test]
    fn query_rejects_fields_outside_registry() {
        let err = engine()
            .query(&SearchRequest::new(EntityKind::Person, "email", "x"))
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidField {
                kind: EntityKind::Person,
                field: "email".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = SearchRequest::parse("widgets", "_id", "1").unwrap_err();
        assert!(matches!(err, QueryError::UnknownKind(kind) if kind == "widgets"));
    }

    #[test]
    fn unknown_id_is_an_empty_outcome() {
        let engine = engine();
        let outcome = engine.search(EntityKind::Person, "_id", "404");
        assert_eq!(outcome, SearchOutcome::ById(None));
        assert!(outcome.is_empty());
    }

    #[test]
    fn scan_of_missing_field_matches_empty_value() {
        let engine = engine();
        let matches = engine.scan(EntityKind::Person, "alias", "");
        assert_eq!(matches.len(), 1);
        assert!(engine.scan(EntityKind::Person, "alias", "x").is_empty());
    }
}
