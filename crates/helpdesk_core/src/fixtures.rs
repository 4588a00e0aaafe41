//! Synthetic collection data for demos and local testing.
//!
//! # Responsibility
//! - Generate users, tickets and organizations shaped like production files.
//! - Write them as the three JSON collection files a `RecordStore` loads.
//!
//! # Invariants
//! - The same `FixtureOptions` always produce the same records.
//! - Identifiers are unique within each generated collection.
//! - Foreign keys point at generated records whenever the target
//!   collection is non-empty.

use crate::config::StoreConfig;
use crate::model::entity::{Entity, FieldMap, Group, Person, RecordId, WorkItem};
use crate::model::kind::EntityKind;
use crate::model::value::FieldValue;
use crate::model::{ID_FIELD, TAGS_FIELD};
use crate::store::RecordStore;
use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const FIRST_NAMES: &[&str] = &[
    "Teresa", "Jason", "Andrew", "Benjamin", "Maria", "Keisha", "Luis", "Priya", "Olga", "Tom",
];
const LAST_NAMES: &[&str] = &[
    "Hill", "Davis", "White", "Gomez", "Nguyen", "Okafor", "Schmidt", "Rossi", "Tanaka", "Reyes",
];
const COMPANY_SUFFIXES: &[&str] = &["Ltd", "Group", "and Sons", "Inc", "PLC", "LLC"];
const WORDS: &[&str] = &[
    "oil", "future", "later", "run", "here", "around", "market", "build", "signal", "rather",
    "network", "travel", "season", "report", "simple", "glass", "middle", "answer",
];
const LOCALES: &[&str] = &["en_US", "en_AU", "de_DE", "fr_FR", "ja_JP", "zh_CN"];
const TIMEZONES: &[&str] = &[
    "Europe/Berlin",
    "America/New_York",
    "Australia/Sydney",
    "Asia/Tokyo",
    "Africa/Lagos",
];
const ROLES: &[&str] = &["admin", "agent", "end-user"];
const TICKET_TYPES: &[&str] = &["support", "incident", "question"];
const PRIORITIES: &[&str] = &["P1", "P2", "P3"];
const STATUSES: &[&str] = &["open", "pending", "closed", "in progress"];
const CHANNELS: &[&str] = &["agent", "web", "chat"];
const TLDS: &[&str] = &["com", "org", "net", "io"];

/// Sizes and seed for one generated data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOptions {
    pub users: usize,
    pub tickets: usize,
    pub organizations: usize,
    pub seed: u64,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            users: 10,
            tickets: 10,
            organizations: 10,
            seed: 42,
        }
    }
}

/// Generated collections, ready to load or write.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSet {
    pub persons: Vec<Person>,
    pub work_items: Vec<WorkItem>,
    pub groups: Vec<Group>,
}

impl FixtureSet {
    pub fn into_store(self) -> RecordStore {
        RecordStore::new(self.persons, self.work_items, self.groups)
    }
}

pub type FixtureResult<T> = Result<T, FixtureError>;

/// Failure while writing fixture files.
#[derive(Debug)]
pub enum FixtureError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for FixtureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to write `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "failed to encode `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for FixtureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Generates a reproducible data set.
pub fn generate(options: &FixtureOptions) -> FixtureSet {
    let mut rng = StdRng::seed_from_u64(options.seed);

    let group_ids = unique_ids(&mut rng, options.organizations, 50, "");
    let person_ids = unique_ids(&mut rng, options.users, 100, "");
    let ticket_ids = unique_ids(&mut rng, options.tickets, 1000, "ticket_");

    let groups: Vec<Group> = group_ids
        .into_iter()
        .map(|id| generate_group(&mut rng, id))
        .collect();
    let group_ids = ids_of(&groups);
    let persons: Vec<Person> = person_ids
        .into_iter()
        .map(|id| {
            let organization_id = reference(&mut rng, &group_ids, 50);
            generate_person(&mut rng, id, organization_id)
        })
        .collect();
    let person_ids = ids_of(&persons);
    let work_items: Vec<WorkItem> = ticket_ids
        .into_iter()
        .map(|id| generate_work_item(&mut rng, id, &person_ids, &group_ids))
        .collect();

    FixtureSet {
        persons,
        work_items,
        groups,
    }
}

/// Writes the three collection files into `config.data_dir`.
///
/// # Side effects
/// - Creates the data directory when missing and overwrites existing files.
/// - Emits one `fixtures_write` event per file.
pub fn write_fixtures(config: &StoreConfig, set: &FixtureSet) -> FixtureResult<()> {
    std::fs::create_dir_all(config.data_dir()).map_err(|source| FixtureError::Io {
        path: config.data_dir().to_path_buf(),
        source,
    })?;
    write_collection(config, EntityKind::Person, &set.persons)?;
    write_collection(config, EntityKind::WorkItem, &set.work_items)?;
    write_collection(config, EntityKind::Group, &set.groups)?;
    Ok(())
}

fn write_collection<T: Serialize>(
    config: &StoreConfig,
    kind: EntityKind,
    records: &[T],
) -> FixtureResult<()> {
    let path = config.path_for(kind);
    let io_error = |source| FixtureError::Io {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    let document = BTreeMap::from([(kind.collection(), records)]);
    serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| FixtureError::Json {
        path: path.clone(),
        source,
    })?;
    writer.flush().map_err(io_error)?;

    info!(
        "event=fixtures_write module=fixtures status=ok collection={} records={} path={}",
        kind.collection(),
        records.len(),
        path.display()
    );
    Ok(())
}

fn generate_person(rng: &mut StdRng, id: RecordId, organization_id: Option<RecordId>) -> Person {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let mut draft = Draft::new();
    draft.text("url", format!("https://{}/users/{id}", domain(rng)));
    draft.text("external_id", external_id(rng));
    draft.text("name", format!("{first} {last}"));
    draft.text("alias", pick(rng, FIRST_NAMES));
    draft.text("created_at", timestamp(rng));
    draft.text("active", capitalized_bool(rng));
    draft.text("verified", capitalized_bool(rng));
    draft.text("shared", capitalized_bool(rng));
    draft.text("locale", pick(rng, LOCALES));
    draft.text("timezone", pick(rng, TIMEZONES));
    draft.text("last_login_at", timestamp(rng));
    draft.text(
        "email",
        format!("{}{}@example.org", first.to_lowercase(), last.to_lowercase()),
    );
    draft.text(
        "phone",
        format!("+1-555-{:03}-{:04}", rng.random_range(0..1000), rng.random_range(0..10_000)),
    );
    draft.text("signature", sentence(rng));
    draft.column("organization_id");
    draft.column(TAGS_FIELD);
    draft.text("suspended", capitalized_bool(rng));
    draft.text("role", pick(rng, ROLES));

    Person {
        id,
        organization_id,
        tags: Some(words(rng, 4)),
        fields: draft.fields,
        key_order: draft.key_order,
    }
}

fn generate_work_item(
    rng: &mut StdRng,
    id: RecordId,
    person_ids: &[RecordId],
    group_ids: &[RecordId],
) -> WorkItem {
    let mut draft = Draft::new();
    draft.text("url", format!("https://{}/tickets/{id}", domain(rng)));
    draft.text("external_id", external_id(rng));
    draft.text("created_at", timestamp(rng));
    draft.text("type", pick(rng, TICKET_TYPES));
    draft.text("subject", sentence(rng));
    // Roughly one ticket in ten has no description.
    let description = if rng.random_ratio(1, 10) {
        String::new()
    } else {
        format!("{} {}", sentence(rng), sentence(rng))
    };
    draft.text("description", description);
    draft.text("priority", pick(rng, PRIORITIES));
    draft.text("status", pick(rng, STATUSES));
    draft.text("recipient", format!("{}@example.com", pick(rng, WORDS)));
    draft.column("submitter_id");
    draft.text("assignee_id", reference(rng, person_ids, 100).unwrap_or_default());
    draft.column("organization_id");
    draft.column(TAGS_FIELD);
    draft.text("has_incidents", capitalized_bool(rng));
    draft.text("due_at", timestamp(rng));
    draft.text("via", pick(rng, CHANNELS));
    draft.column("requester_id");

    WorkItem {
        id,
        organization_id: reference(rng, group_ids, 50),
        requester_id: reference(rng, person_ids, 100),
        submitter_id: reference(rng, person_ids, 100),
        tags: Some(words(rng, 3)),
        fields: draft.fields,
        key_order: draft.key_order,
    }
}

fn generate_group(rng: &mut StdRng, id: RecordId) -> Group {
    let last = pick(rng, LAST_NAMES);
    let mut draft = Draft::new();
    draft.text("url", format!("https://{}/organizations/{id}", domain(rng)));
    draft.text("external_id", external_id(rng));
    draft.text("name", format!("{last} {}", pick(rng, COMPANY_SUFFIXES)));
    draft.text("domain", domain(rng));
    draft.text("created_at", timestamp(rng));
    draft.text("details", sentence(rng));
    draft.text("shared_tickets", rng.random_range(1..=5u8).to_string());
    draft.column(TAGS_FIELD);

    Group {
        id,
        tags: Some(words(rng, 3)),
        fields: draft.fields,
        key_order: draft.key_order,
    }
}

/// Extra fields of a record being generated, plus its written key order.
struct Draft {
    fields: FieldMap,
    key_order: Vec<String>,
}

impl Draft {
    fn new() -> Self {
        Self {
            fields: FieldMap::new(),
            key_order: vec![ID_FIELD.to_string()],
        }
    }

    fn text(&mut self, name: &str, value: impl Into<String>) {
        self.key_order.push(name.to_string());
        self.fields
            .insert(name.to_string(), FieldValue::Text(value.into()));
    }

    /// Places a typed column at this point of the key order.
    fn column(&mut self, name: &str) {
        self.key_order.push(name.to_string());
    }
}

/// Draws `count` distinct ids from `1..=max(pool, count)`.
fn unique_ids(rng: &mut StdRng, count: usize, pool: usize, prefix: &str) -> Vec<RecordId> {
    let length = pool.max(count);
    rand::seq::index::sample(rng, length, count)
        .into_iter()
        .map(|index| format!("{prefix}{}", index + 1))
        .collect()
}

/// Picks an existing id, or a random (dangling) one when `ids` is empty.
fn reference(rng: &mut StdRng, ids: &[RecordId], fallback_max: u32) -> Option<RecordId> {
    match ids.choose(rng) {
        Some(id) => Some(id.clone()),
        None => Some(rng.random_range(1..=fallback_max).to_string()),
    }
}

fn ids_of<T: Entity>(records: &[T]) -> Vec<RecordId> {
    records.iter().map(|record| record.id().to_string()).collect()
}

fn pick(rng: &mut StdRng, values: &[&str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

fn words(rng: &mut StdRng, count: usize) -> Vec<String> {
    (0..count).map(|_| pick(rng, WORDS)).collect()
}

fn sentence(rng: &mut StdRng) -> String {
    let length = rng.random_range(4..=8);
    let mut text = words(rng, length).join(" ");
    if let Some(first) = text.get(..1) {
        text = format!("{}{}", first.to_uppercase(), &text[1..]);
    }
    text.push('.');
    text
}

fn domain(rng: &mut StdRng) -> String {
    format!("{}.{}", pick(rng, LAST_NAMES).to_lowercase(), pick(rng, TLDS))
}

fn external_id(rng: &mut StdRng) -> String {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid().to_string()
}

fn timestamp(rng: &mut StdRng) -> String {
    format!(
        "20{:02}-{:02}-{:02}T{:02}:{:02}:{:02}",
        rng.random_range(15..=25),
        rng.random_range(1..=12),
        rng.random_range(1..=28),
        rng.random_range(0..24),
        rng.random_range(0..60),
        rng.random_range(0..60)
    )
}

/// Booleans are stored as capitalized strings in collection files.
fn capitalized_bool(rng: &mut StdRng) -> String {
    let value = if rng.random_bool(0.5) { "True" } else { "False" };
    value.to_string()
}
