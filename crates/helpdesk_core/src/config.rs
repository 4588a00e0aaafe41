//! Data directory configuration.
//!
//! # Responsibility
//! - Resolve where the three collection files live.
//!
//! # Invariants
//! - File names are derived from `EntityKind::collection()`, never configured
//!   one by one.

use crate::model::kind::EntityKind;
use std::path::{Path, PathBuf};

/// Primary environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "HELPDESK_DATA_DIR";
/// Fallback environment variable, kept for existing deployments.
pub const LEGACY_DATA_DIR_ENV: &str = "DATA_DIR";
/// Directory used when no variable is set.
pub const DEFAULT_DATA_DIR: &str = "./data";

/// Location of the flat files backing the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

impl StoreConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Reads `HELPDESK_DATA_DIR`, then `DATA_DIR`, then falls back to `./data`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = [DATA_DIR_ENV, LEGACY_DATA_DIR_ENV]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        Self::new(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// JSON file holding the collection for `kind`.
    pub fn path_for(&self, kind: EntityKind) -> PathBuf {
        self.data_dir.join(format!("{}.json", kind.collection()))
    }

    pub fn users_path(&self) -> PathBuf {
        self.path_for(EntityKind::Person)
    }

    pub fn tickets_path(&self) -> PathBuf {
        self.path_for(EntityKind::WorkItem)
    }

    pub fn organizations_path(&self) -> PathBuf {
        self.path_for(EntityKind::Group)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
