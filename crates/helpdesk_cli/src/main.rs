//! `helpdesk` command-line driver.
//!
//! # Responsibility
//! - Resolve configuration, start logging and build the search engine once.
//! - Dispatch to the interactive prompt or a one-shot command.

mod cli;
mod render;
mod repl;

use clap::Parser;
use cli::{Cli, Command};
use eyre::{bail, eyre, Result, WrapErr};
use helpdesk_core::{
    default_log_level, generate, init_logging, write_fixtures, EntityKind, FixtureOptions,
    QueryError, SearchEngine, SearchRequest, StoreConfig,
};
use log::info;
use std::path::PathBuf;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("helpdesk-logs"));
    let log_dir = absolute(log_dir)?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &log_dir).map_err(|err| eyre!("failed to set up logging: {err}"))?;

    let config = match &cli.data_dir {
        Some(dir) => StoreConfig::new(dir),
        None => StoreConfig::from_env(),
    };
    info!(
        "event=cli_start module=cli status=ok data_dir={}",
        config.data_dir().display()
    );

    match cli.command.unwrap_or(Command::Repl) {
        Command::Generate {
            users,
            tickets,
            organizations,
            seed,
        } => {
            let set = generate(&FixtureOptions {
                users,
                tickets,
                organizations,
                seed,
            });
            write_fixtures(&config, &set).wrap_err("failed to write fixture files")?;
            println!("Sample data generated in {}", config.data_dir().display());
        }
        Command::Fields => {
            let engine = load_engine(&config);
            print!("{}", render::render_fields(engine.fields()));
        }
        Command::Search { kind, field, value } => {
            let engine = load_engine(&config);
            let request = SearchRequest::parse(&kind, field, value)?;
            match engine.query(&request) {
                Ok(outcome) if cli.json => println!("{}", render::render_json(&outcome)?),
                Ok(outcome) => print!("{}", render::render_text(&outcome)),
                Err(err @ QueryError::InvalidField { kind, .. }) => {
                    bail!(
                        "{err}; valid fields: {}",
                        engine.fields().fields(kind).join(", ")
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Repl => {
            let engine = load_engine(&config);
            let stdin = std::io::stdin();
            repl::run(&engine, cli.json, stdin.lock(), std::io::stdout())?;
        }
    }

    Ok(())
}

/// Builds the engine, warning on the console about any empty collection.
fn load_engine(config: &StoreConfig) -> SearchEngine {
    let engine = SearchEngine::load(config);
    for kind in EntityKind::ALL {
        if engine.store().len(kind) == 0 {
            eprintln!(
                "Warning: {} not found, corrupted or empty. Continuing without {}.",
                config.path_for(kind).display(),
                kind.collection()
            );
        }
    }
    engine
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().wrap_err("failed to resolve current directory")?;
    Ok(cwd.join(path))
}
