//! Command-line interface definitions for DupeSync.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options control verbosity, color and configuration; each subcommand is one
//! of the inventory views or the reconciliation.
//!
//! # Example
//!
//! ```bash
//! # List every file with its signature
//! dupesync inventory ~/Pictures
//!
//! # Duplicates within a tree, then size per category
//! dupesync analyze ~/Pictures
//!
//! # Files in the second tree that already exist in the first
//! dupesync compare ~/Pictures /media/usb/Pictures --output json
//!
//! # Copy missing or newer files from ~/work into /backup/work
//! dupesync sync /backup/work ~/work --dry-run
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Content-signature duplicate finder and newer-wins directory reconciler.
#[derive(Debug, Parser)]
#[command(name = "dupesync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List every file in a directory with its signature
    Inventory(DirArgs),
    /// Find duplicates within a directory and total sizes by category
    Analyze(DirArgs),
    /// Find files in SECOND whose content already exists in FIRST
    Compare(CompareArgs),
    /// Copy files that are missing or newer from SOURCE into DEST
    Sync(SyncArgs),
}

/// Options shared by every subcommand. Unset options fall back to the config.
#[derive(Debug, Args, Default)]
pub struct ScanOptions {
    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Number of hashing threads (1 hashes sequentially)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Read chunk size for content hashing (e.g., 4096, 64KiB)
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub chunk_size: Option<u64>,
}

/// Arguments for single-directory subcommands.
#[derive(Debug, Args)]
pub struct DirArgs {
    /// Directory to walk
    #[arg(value_name = "DIR")]
    pub path: PathBuf,

    #[command(flatten)]
    pub options: ScanOptions,
}

/// Arguments for the compare subcommand.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Reference directory
    #[arg(value_name = "FIRST")]
    pub first: PathBuf,

    /// Directory searched for copies of FIRST's files
    #[arg(value_name = "SECOND")]
    pub second: PathBuf,

    #[command(flatten)]
    pub options: ScanOptions,
}

/// Arguments for the sync subcommand.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Directory that receives files
    #[arg(value_name = "DEST")]
    pub dest: PathBuf,

    /// Directory files are copied from (never modified)
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub options: ScanOptions,
}

impl Commands {
    /// Options of whichever subcommand was chosen.
    #[must_use]
    pub fn options(&self) -> &ScanOptions {
        match self {
            Commands::Inventory(args) | Commands::Analyze(args) => &args.options,
            Commands::Compare(args) => &args.options,
            Commands::Sync(args) => &args.options,
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON for scripting
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Parse a size such as `4096`, `64KiB` or `1MB` into bytes.
///
/// Suffixes are case-insensitive: B, KB/K, KiB, MB/M, MiB.
///
/// # Examples
///
/// ```
/// use dupesync::cli::parse_size;
///
/// assert_eq!(parse_size("4096").unwrap(), 4096);
/// assert_eq!(parse_size("64KiB").unwrap(), 65_536);
/// assert_eq!(parse_size("1MB").unwrap(), 1_000_000);
/// ```
///
/// # Errors
///
/// Returns an error for empty input, a non-integer number, or an unknown suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, suffix) = s.split_at(split);
    let num: u64 = digits
        .parse()
        .map_err(|_| format!("Invalid number: '{digits}'"))?;

    let multiplier: u64 = match suffix.trim().to_uppercase().as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        other => return Err(format!("Unknown size suffix: '{other}'")),
    };

    num.checked_mul(multiplier)
        .ok_or_else(|| format!("Size too large: '{s}'"))
}
