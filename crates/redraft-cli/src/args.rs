//! Command-line argument definitions for the Redraft CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the diagram, the edit script, where the
//! edited diagram goes, configuration, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Redraft diagram editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file
    #[arg(help = "Path to the input diagram")]
    pub input: String,

    /// Path to the edit script (JSON)
    #[arg(short, long)]
    pub edits: String,

    /// Path to the output file; the edited diagram is printed to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Print a report of every skipped or failed edit
    #[arg(long)]
    pub report: bool,
}
