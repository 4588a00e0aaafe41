//! Loosely typed values for record fields outside the typed columns.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Value of a non-typed record field as found in the source file.
///
/// Source data mostly stores booleans and numbers as strings, but native
/// JSON scalars are accepted too so a hand-edited file still loads. Nested
/// objects and mixed lists land in `Other` and match on their compact JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Number(serde_json::Number),
    List(Vec<String>),
    Null,
    Other(serde_json::Value),
}

impl FieldValue {
    /// Returns the string form used by equality scans.
    ///
    /// Lists are joined with `", "`; null becomes the empty string.
    pub fn to_match_text(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::List(items) => items.join(", "),
            Self::Null => String::new(),
            Self::Other(value) => value.to_string(),
        }
    }

    /// Returns list items when this value is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_match_text())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}
