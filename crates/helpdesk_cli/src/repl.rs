//! Interactive search prompt.
//!
//! # Responsibility
//! - Ask for a kind, a field and a value; validate the field before
//!   searching.
//!
//! # Invariants
//! - `quit` or end of input leaves the loop; nothing else does.

use crate::render;
use eyre::Result;
use helpdesk_core::{EntityKind, SearchEngine};
use log::info;
use std::io::{BufRead, Write};

const BANNER_WIDTH: usize = 100;

enum Choice {
    Kind(EntityKind),
    Help,
    Quit,
    Invalid,
}

/// Runs the prompt over `input`, writing everything to `output`.
pub fn run<R: BufRead, W: Write>(
    engine: &SearchEngine,
    json: bool,
    mut input: R,
    mut output: W,
) -> Result<()> {
    info!("event=repl module=cli status=start");
    writeln!(output, "{}", "#".repeat(BANNER_WIDTH))?;
    writeln!(output, "  HELPDESK SEARCH")?;

    loop {
        write_menu(&mut output)?;
        let Some(line) = prompt(&mut input, &mut output, "\nEnter your choice: ")? else {
            break;
        };

        let kind = match parse_choice(&line) {
            Choice::Quit => break,
            Choice::Help => {
                write!(output, "{}", render::render_fields(engine.fields()))?;
                writeln!(output)?;
                continue;
            }
            Choice::Invalid => {
                writeln!(output, "\nInvalid selection. Try again.")?;
                continue;
            }
            Choice::Kind(kind) => kind,
        };

        let Some(field) = prompt(&mut input, &mut output, "Enter search field: ")? else {
            break;
        };
        if !engine.is_valid_field(kind, &field) {
            writeln!(
                output,
                "\nError: '{field}' is not a valid search term/field for {kind}. Use 'Help' to see valid fields for all types\n"
            )?;
            continue;
        }

        let Some(value) = prompt(&mut input, &mut output, "Enter search value: ")? else {
            break;
        };
        writeln!(output, "\nOutput:\n")?;
        let outcome = engine.search(kind, &field, &value);
        if json {
            writeln!(output, "{}", render::render_json(&outcome)?)?;
        } else {
            write!(output, "{}", render::render_text(&outcome))?;
        }
    }

    info!("event=repl module=cli status=ok");
    Ok(())
}

fn write_menu<W: Write>(output: &mut W) -> Result<()> {
    writeln!(output, "{}", "#".repeat(BANNER_WIDTH))?;
    writeln!(output, "\n  Select search-by option:\n")?;
    for kind in EntityKind::ALL {
        let label = kind.collection();
        writeln!(
            output,
            "      {}) {}{}",
            kind.menu_number(),
            label[..1].to_uppercase(),
            &label[1..]
        )?;
    }
    writeln!(output, "      4) Help")?;
    writeln!(output, "\n  Type 'quit' to exit")?;
    Ok(())
}

/// Returns the trimmed line, or `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<Option<String>> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_choice(line: &str) -> Choice {
    match line {
        "quit" => Choice::Quit,
        "4" => Choice::Help,
        "1" | "2" | "3" => line.parse().map(Choice::Kind).unwrap_or(Choice::Invalid),
        _ => Choice::Invalid,
    }
}
