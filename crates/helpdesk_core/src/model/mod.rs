//! Typed record model for the three loaded collections.
//!
//! # Responsibility
//! - Define one structured type per entity kind (person, work item, group).
//! - Keep identifier, foreign keys and tags typed; carry every other source
//!   key in a flattened field map.
//!
//! # Invariants
//! - `_id` is unique within one kind, not across kinds.
//! - A record's key set is fixed once deserialized.

pub mod entity;
pub mod kind;
pub mod value;

/// Identifier field shared by every kind.
pub const ID_FIELD: &str = "_id";

/// Tag list field shared by every kind.
pub const TAGS_FIELD: &str = "tags";
