//! Entity kind enumeration and name parsing.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// One of the three record categories held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// End users and agents, stored under `users`.
    Person,
    /// Support tickets, stored under `tickets`.
    WorkItem,
    /// Customer organizations, stored under `organizations`.
    Group,
}

impl EntityKind {
    /// All kinds in menu order.
    pub const ALL: [EntityKind; 3] = [Self::Person, Self::WorkItem, Self::Group];

    /// Collection name used as the file stem and JSON root key.
    pub fn collection(self) -> &'static str {
        match self {
            Self::Person => "users",
            Self::WorkItem => "tickets",
            Self::Group => "organizations",
        }
    }

    /// Singular key used for the primary record of an enriched result.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Person => "user",
            Self::WorkItem => "ticket",
            Self::Group => "organization",
        }
    }

    /// Menu number shown by interactive drivers.
    pub fn menu_number(self) -> u8 {
        match self {
            Self::Person => 1,
            Self::WorkItem => 2,
            Self::Group => 3,
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.collection())
    }
}

/// Returned when a kind name matches none of the known collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl Display for ParseKindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown entity kind `{}`; expected users|tickets|organizations",
            self.0
        )
    }
}

impl Error for ParseKindError {}

impl FromStr for EntityKind {
    type Err = ParseKindError;

    /// Accepts the collection name, the singular name or the menu number,
    /// ignoring case and surrounding whitespace.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                normalized == kind.collection()
                    || normalized == kind.singular()
                    || normalized == kind.menu_number().to_string()
            })
            .ok_or_else(|| ParseKindError(value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::EntityKind;

    #[test]
    fn parses_collection_singular_and_menu_names() {
        assert_eq!("users".parse::<EntityKind>().unwrap(), EntityKind::Person);
        assert_eq!(" Ticket ".parse::<EntityKind>().unwrap(), EntityKind::WorkItem);
        assert_eq!("3".parse::<EntityKind>().unwrap(), EntityKind::Group);
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "groups".parse::<EntityKind>().unwrap_err();
        assert!(err.to_string().contains("groups"));
    }
}
