//! Text and JSON rendering of search outcomes.
//!
//! # Responsibility
//! - Turn structured outcomes into titled sections for terminals.
//!
//! # Invariants
//! - Every relation of an enriched result is printed, empty or not.

use eyre::Result;
use helpdesk_core::{
    Enriched, FieldValue, FieldRegistry, Group, Person, SearchOutcome, WorkItem,
};
use serde::Serialize;
use std::fmt::Write;

const RULE_WIDTH: usize = 40;

/// Renders `outcome` as pretty JSON.
pub fn render_json(outcome: &SearchOutcome<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

/// Renders `outcome` as text sections.
pub fn render_text(outcome: &SearchOutcome<'_>) -> String {
    let mut out = String::new();
    if outcome.is_empty() {
        out.push_str("No results found.\n");
        return out;
    }

    match outcome {
        SearchOutcome::ById(Some(entry)) => write_enriched(&mut out, entry),
        SearchOutcome::ById(None) => {}
        SearchOutcome::ByTag(matches) => {
            write_list(&mut out, "users", &matches.persons);
            write_list(&mut out, "tickets", &matches.work_items);
            write_list(&mut out, "organizations", &matches.groups);
        }
        SearchOutcome::ByField(entries) => {
            for entry in entries {
                write_enriched(&mut out, entry);
            }
        }
    }
    out
}

/// Renders the allowed-field listing shown by `help` and `fields`.
pub fn render_fields(registry: &FieldRegistry) -> String {
    let mut out = String::from("\nAllowed search fields:\n");
    for (kind, fields) in registry.iter() {
        let _ = writeln!(
            out,
            "\n{}: {}",
            capitalize(kind.collection()),
            fields.join(", ")
        );
    }
    out
}

fn write_enriched(out: &mut String, entry: &Enriched<'_>) {
    match entry {
        Enriched::Person(entry) => {
            write_single(out, "user", Some(entry.person));
            write_single::<Group>(out, "organization", entry.group);
            write_list(out, "tickets", &entry.work_items);
            write_list(out, "submitted_tickets", &entry.submitted_work_items);
        }
        Enriched::WorkItem(entry) => {
            write_single(out, "ticket", Some(entry.work_item));
            write_single::<Group>(out, "organization", entry.group);
            write_single::<Person>(out, "requester", entry.requester);
            write_single::<Person>(out, "submitter", entry.submitter);
        }
        Enriched::Group(entry) => {
            write_single(out, "organization", Some(entry.group));
            write_list::<Person>(out, "users", &entry.persons);
            write_list::<WorkItem>(out, "tickets", &entry.work_items);
        }
    }
}

fn write_heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{}:", capitalize(title));
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
}

fn write_single<T: Serialize>(out: &mut String, title: &str, record: Option<&T>) {
    write_heading(out, title);
    match record {
        Some(record) => write_record(out, record, 2),
        None => {
            let _ = writeln!(out, "  No {} found.", capitalize(title));
        }
    }
}

fn write_list<T: Serialize>(out: &mut String, title: &str, records: &[&T]) {
    write_heading(out, title);
    if records.is_empty() {
        let _ = writeln!(out, "  No {} found.", capitalize(title));
        return;
    }
    for record in records {
        write_record(out, *record, 2);
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
}

/// Prints one record as `Key: value` lines, expanding list values.
fn write_record<T: Serialize>(out: &mut String, record: &T, indent: usize) {
    let prefix = " ".repeat(indent);
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(record) else {
        return;
    };
    for (key, value) in fields {
        let value = serde_json::from_value::<FieldValue>(value).unwrap_or(FieldValue::Null);
        match value.as_list() {
            Some(items) => {
                let _ = writeln!(out, "{prefix}{}:", capitalize(&key));
                if items.is_empty() {
                    let _ = writeln!(out, "{prefix}  No {} found.", capitalize(&key));
                }
                for item in items {
                    let _ = writeln!(out, "{prefix}    {item}");
                }
            }
            None => {
                let _ = writeln!(out, "{prefix}{}: {value}", capitalize(&key));
            }
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, render_text};
    use helpdesk_core::{EntityKind, Person, RecordStore, SearchEngine, SearchOutcome};

    fn engine() -> SearchEngine {
        let mut person = Person::new("1");
        person.fields.insert("name".to_string(), "Ann Lee".into());
        person.tags = Some(vec!["oil".to_string()]);
        SearchEngine::new(RecordStore::new(vec![person], Vec::new(), Vec::new()))
    }

    #[test]
    fn empty_outcome_prints_no_results() {
        assert_eq!(render_text(&SearchOutcome::ById(None)), "No results found.\n");
    }

    #[test]
    fn person_sections_include_empty_relations() {
        let engine = engine();
        let text = render_text(&engine.search(EntityKind::Person, "_id", "1"));
        assert!(text.contains("User:"));
        assert!(text.contains("  Name: Ann Lee"));
        assert!(text.contains("      oil"));
        assert!(text.contains("  No Organization found."));
        assert!(text.contains("  No Tickets found."));
    }

    #[test]
    fn records_print_in_source_key_order() {
        let person: Person = serde_json::from_str(
            r#"{"name":"Ann Lee","_id":"1","email":"ann@example.org","active":"True"}"#,
        )
        .unwrap();
        let engine = SearchEngine::new(RecordStore::new(vec![person], Vec::new(), Vec::new()));
        let text = render_text(&engine.search(EntityKind::Person, "_id", "1"));

        let at = |needle: &str| text.find(needle).unwrap();
        assert!(at("  Name: Ann Lee") < at("  _id: 1"));
        assert!(at("  _id: 1") < at("  Email: ann@example.org"));
        assert!(at("  Email: ann@example.org") < at("  Active: True"));
    }

    #[test]
    fn capitalize_handles_empty_and_underscored_keys() {
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("_id"), "_id");
        assert_eq!(capitalize("tickets"), "Tickets");
    }
}
