//! CLI argument definitions for the tidyviz command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tidyviz - clang-tidy fixture corpus
#[derive(Parser)]
#[command(name = "tidyviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to a JSON config file (default: ./tidyviz.json when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (overrides TIDYVIZ_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the fixtures in the corpus
    List {
        /// Only list fixtures that declare this check category (e.g., bugprone)
        #[arg(long)]
        category: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show a fixture's expected findings
    Show {
        /// Fixture name
        name: String,

        /// Also print the numbered source
        #[arg(long)]
        source: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate the manifest against the fixture sources and print the corpus digest
    Verify {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write the fixtures, manifest.json and compile_commands.json to a directory
    Export {
        /// Output directory (created if missing)
        #[arg(short, long)]
        out_dir: String,

        /// Compiler recorded in compile_commands.json (default: clang++)
        #[arg(long)]
        compiler: Option<String>,

        /// Language standard, without the -std= prefix (default: c++17)
        #[arg(long)]
        std: Option<String>,
    },

    /// Compare clang-tidy diagnostics for a fixture with its expected findings
    Check {
        /// Fixture name
        name: String,

        /// clang-tidy console output or --export-fixes YAML
        #[arg(short, long)]
        diagnostics: String,

        /// Diagnostics format (default: from the file extension)
        #[arg(long, value_parser = ["text", "yaml"])]
        format: Option<String>,

        /// Accept diagnostics this many lines away from the expected line
        #[arg(long)]
        line_tolerance: Option<u32>,

        /// Never report diagnostics from checks matching this glob as unexpected (repeatable)
        #[arg(long = "ignore-check")]
        ignore_checks: Vec<String>,

        /// Fail when unexpected diagnostics remain
        #[arg(long)]
        strict: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
