//! Person, work item and group records.
//!
//! # Responsibility
//! - Deserialize source records into typed structs without losing keys.
//! - Expose field introspection used by validation and equality scans.
//!
//! # Invariants
//! - Typed keys are never duplicated into `fields`.
//! - A typed key listed in `key_order` is present even when its value is
//!   `null`; it is reported by `field_names()` and serialized as `null`.
//! - Serialization emits keys in `key_order` first, then any remaining
//!   present keys sorted.

use crate::model::kind::EntityKind;
use crate::model::value::FieldValue;
use crate::model::{ID_FIELD, TAGS_FIELD};
use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Record identifier, unique within one kind.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = String;

/// Extra, schema-free fields of a record keyed by source field name.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Read access shared by all record kinds.
pub trait Entity {
    /// Kind this record type belongs to.
    const KIND: EntityKind;

    fn id(&self) -> &str;

    /// Tag list, empty when the record carries none.
    fn tags(&self) -> &[String];

    /// Every key present on this record, sorted.
    fn field_names(&self) -> Vec<String>;

    /// String form of one field, or `None` when the record lacks the key.
    ///
    /// A key present with a `null` value reads as the empty string.
    fn field_text(&self, name: &str) -> Option<String>;
}

/// End user or agent (`users` collection).
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: RecordId,
    /// Owning group.
    pub organization_id: Option<RecordId>,
    pub tags: Option<Vec<String>>,
    pub fields: FieldMap,
    /// Keys in source order; empty for records built in code.
    pub key_order: Vec<String>,
}

/// Support ticket (`tickets` collection).
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub id: RecordId,
    pub organization_id: Option<RecordId>,
    /// Person the ticket was raised for.
    pub requester_id: Option<RecordId>,
    /// Person who filed the ticket.
    pub submitter_id: Option<RecordId>,
    pub tags: Option<Vec<String>>,
    pub fields: FieldMap,
    pub key_order: Vec<String>,
}

/// Customer organization (`organizations` collection).
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: RecordId,
    pub tags: Option<Vec<String>>,
    pub fields: FieldMap,
    pub key_order: Vec<String>,
}

impl Person {
    /// Creates a person with only an identifier.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            organization_id: None,
            tags: None,
            fields: FieldMap::new(),
            key_order: Vec::new(),
        }
    }
}

impl WorkItem {
    /// Creates a work item with only an identifier.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            organization_id: None,
            requester_id: None,
            submitter_id: None,
            tags: None,
            fields: FieldMap::new(),
            key_order: Vec::new(),
        }
    }
}

impl Group {
    /// Creates a group with only an identifier.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            tags: None,
            fields: FieldMap::new(),
            key_order: Vec::new(),
        }
    }
}

/// Borrowed field value in the shape it is written back out.
#[derive(Serialize)]
#[serde(untagged)]
enum Cell<'a> {
    Text(&'a str),
    List(&'a [String]),
    Value(&'a FieldValue),
    Null,
}

impl Cell<'_> {
    fn to_match_text(&self) -> String {
        match self {
            Self::Text(value) => (*value).to_string(),
            Self::List(items) => items.join(", "),
            Self::Value(value) => value.to_match_text(),
            Self::Null => String::new(),
        }
    }
}

// Each record kind decodes through a private column struct after its key
// order has been captured from an order-preserving JSON map.
macro_rules! impl_entity {
    ($ty:ident, $columns:ident, $kind:expr, [$($typed:literal => $field:ident),*]) => {
        #[derive(Deserialize)]
        struct $columns {
            #[serde(rename = "_id", deserialize_with = "de_record_id")]
            id: RecordId,
            $(
                #[serde(default, deserialize_with = "de_optional_record_id")]
                $field: Option<RecordId>,
            )*
            #[serde(default)]
            tags: Option<Vec<String>>,
            #[serde(flatten)]
            fields: FieldMap,
        }

        impl $ty {
            /// Typed column `name`; `Cell::Null` when the column holds nothing.
            fn typed_cell(&self, name: &str) -> Option<Cell<'_>> {
                let value = match name {
                    ID_FIELD => return Some(Cell::Text(&self.id)),
                    $($typed => self.$field.as_deref().map(Cell::Text),)*
                    TAGS_FIELD => self.tags.as_deref().map(Cell::List),
                    _ => return None,
                };
                Some(value.unwrap_or(Cell::Null))
            }

            fn cell(&self, name: &str) -> Option<Cell<'_>> {
                match self.typed_cell(name) {
                    Some(Cell::Null) if !self.key_order.iter().any(|key| key == name) => None,
                    Some(cell) => Some(cell),
                    None => self.fields.get(name).map(Cell::Value),
                }
            }

            fn ordered_keys(&self) -> Vec<String> {
                let mut names: Vec<String> = self
                    .key_order
                    .iter()
                    .filter(|key| self.cell(key.as_str()).is_some())
                    .cloned()
                    .collect();
                for name in self.field_names() {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                names
            }
        }

        impl Entity for $ty {
            const KIND: EntityKind = $kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn tags(&self) -> &[String] {
                self.tags.as_deref().unwrap_or(&[])
            }

            fn field_names(&self) -> Vec<String> {
                let mut names: Vec<String> = [ID_FIELD, $($typed,)* TAGS_FIELD]
                    .into_iter()
                    .filter(|name| self.cell(name).is_some())
                    .map(str::to_string)
                    .collect();
                names.extend(self.fields.keys().cloned());
                names.sort();
                names
            }

            fn field_text(&self, name: &str) -> Option<String> {
                self.cell(name).map(|cell| cell.to_match_text())
            }
        }

        impl Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                let names = self.ordered_keys();
                let mut map = serializer.serialize_map(Some(names.len()))?;
                for name in &names {
                    if let Some(cell) = self.cell(name) {
                        map.serialize_entry(name, &cell)?;
                    }
                }
                map.end()
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let source = Map::<String, Value>::deserialize(deserializer)?;
                let key_order = source.keys().cloned().collect();
                let columns: $columns =
                    serde_json::from_value(Value::Object(source)).map_err(de::Error::custom)?;
                Ok(Self {
                    id: columns.id,
                    $($field: columns.$field,)*
                    tags: columns.tags,
                    fields: columns.fields,
                    key_order,
                })
            }
        }
    };
}

impl_entity!(
    Person,
    PersonColumns,
    EntityKind::Person,
    ["organization_id" => organization_id]
);
impl_entity!(
    WorkItem,
    WorkItemColumns,
    EntityKind::WorkItem,
    [
        "organization_id" => organization_id,
        "requester_id" => requester_id,
        "submitter_id" => submitter_id
    ]
);
impl_entity!(Group, GroupColumns, EntityKind::Group, []);

/// Identifier as it may appear in source files.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for RecordId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn de_record_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RecordId::from)
}

fn de_optional_record_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(RecordId::from))
}
