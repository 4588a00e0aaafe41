//! JSON flat-file loading.
//!
//! # Responsibility
//! - Read one collection file shaped as `{"<collection>": [record, ...]}`.
//! - Map I/O and decoding failures to `LoadError`.
//!
//! # Invariants
//! - `load_collection` never fails; it logs and returns an empty list.
//! - One undecodable record rejects the whole file.

use crate::model::entity::Entity;
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to read a collection file.
#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// File parsed but lacks the collection root key.
    MissingRoot {
        path: PathBuf,
        root: &'static str,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid collection data in `{}`: {source}", path.display())
            }
            Self::MissingRoot { path, root } => {
                write!(f, "`{}` has no `{root}` root key", path.display())
            }
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::MissingRoot { .. } => None,
        }
    }
}

/// Reads and decodes one collection file, reporting every failure.
pub fn read_collection<T>(path: &Path) -> LoadResult<Vec<T>>
where
    T: Entity + DeserializeOwned,
{
    let root = T::KIND.collection();
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut document: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = document
        .get_mut(root)
        .map(Value::take)
        .ok_or_else(|| LoadError::MissingRoot {
            path: path.to_path_buf(),
            root,
        })?;

    serde_json::from_value(records).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads one collection file, degrading any failure to an empty collection.
///
/// # Side effects
/// - Emits `store_load` events with record count and duration.
pub fn load_collection<T>(path: &Path) -> Vec<T>
where
    T: Entity + DeserializeOwned,
{
    let started_at = Instant::now();
    let collection = T::KIND.collection();
    info!(
        "event=store_load module=store status=start collection={} path={}",
        collection,
        path.display()
    );

    match read_collection(path) {
        Ok(records) => {
            info!(
                "event=store_load module=store status=ok collection={} records={} duration_ms={}",
                collection,
                records.len(),
                started_at.elapsed().as_millis()
            );
            records
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=degraded collection={} duration_ms={} error={}",
                collection,
                started_at.elapsed().as_millis(),
                err
            );
            Vec::new()
        }
    }
}
