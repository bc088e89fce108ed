//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, ValueEnum};
use is_terminal::IsTerminal;
use std::path::PathBuf;

/// Packetdoc - HTML reference pages for cereal packet schemas
///
/// Renders every packet document of INPUT_DIR as a page under OUTPUT_DIR,
/// plus an index ordered by packet id. Files named `enum_*.json` provide
/// enum values and get no page of their own.
#[derive(Parser, Debug)]
#[command(name = "packetdoc", version, author, about, long_about = None)]
pub struct Cli {
    /// Directory containing the packet and enum documents [default: current directory]
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the generated pages [default: ./docs]
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "PACKETDOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for the run summary [default: human]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Exit non-zero when any document fails to render
    #[arg(long)]
    pub fail_on_error: bool,

    /// Heading of the index page
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

impl OutputFormat {
    /// Parse a format name as written in configuration files
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
