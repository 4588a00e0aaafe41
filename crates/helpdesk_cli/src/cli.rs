//! Command-line arguments for `helpdesk`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "helpdesk")]
#[command(version, about = "Search users, tickets and organizations", long_about = None)]
pub struct Cli {
    /// Directory holding users.json, tickets.json and organizations.json
    /// (default: $HELPDESK_DATA_DIR, $DATA_DIR or ./data)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for rotating log files (default: <tmp>/helpdesk-logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print results as JSON instead of text sections
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive search prompt (default)
    Repl,

    /// Run a single search
    Search {
        /// users | tickets | organizations
        kind: String,

        /// Field to match, e.g. _id, tags, name
        field: String,

        /// Value to match (case-insensitive except for _id and tags)
        #[arg(default_value = "")]
        value: String,
    },

    /// List searchable fields per kind
    Fields,

    /// Write synthetic collection files into the data directory
    Generate {
        #[arg(long, default_value = "10")]
        users: usize,

        #[arg(long, default_value = "10")]
        tickets: usize,

        #[arg(long, default_value = "10")]
        organizations: usize,

        /// RNG seed; the same seed always produces the same files
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}
