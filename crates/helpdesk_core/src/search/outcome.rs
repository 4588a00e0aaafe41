//! Result shapes handed to presentation collaborators.

use crate::model::entity::{Entity, Group, Person, WorkItem};
use crate::model::kind::EntityKind;
use crate::search::enrich::Enriched;
use serde::Serialize;

/// Records grouped by kind for one tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagMatches<'a> {
    #[serde(rename = "users")]
    pub persons: Vec<&'a Person>,
    #[serde(rename = "tickets")]
    pub work_items: Vec<&'a WorkItem>,
    #[serde(rename = "organizations")]
    pub groups: Vec<&'a Group>,
}

impl TagMatches<'_> {
    /// Matched identifiers of `kind`, in load order.
    pub fn ids(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Person => self.persons.iter().map(|record| record.id()).collect(),
            EntityKind::WorkItem => self.work_items.iter().map(|record| record.id()).collect(),
            EntityKind::Group => self.groups.iter().map(|record| record.id()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.persons.len() + self.work_items.len() + self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of one search, shaped by the path that resolved it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome<'a> {
    /// Identifier lookup: the enriched record, if any.
    ById(Option<Enriched<'a>>),
    /// Tag lookup across all kinds.
    ByTag(TagMatches<'a>),
    /// Field scan: every match, in collection order.
    ByField(Vec<Enriched<'a>>),
}

impl SearchOutcome<'_> {
    /// Short label of the resolution path, used in log events.
    pub fn mode(&self) -> &'static str {
        match self {
            Self::ById(_) => "id",
            Self::ByTag(_) => "tag",
            Self::ByField(_) => "scan",
        }
    }

    /// Number of primary records matched.
    pub fn len(&self) -> usize {
        match self {
            Self::ById(found) => usize::from(found.is_some()),
            Self::ByTag(matches) => matches.len(),
            Self::ByField(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
