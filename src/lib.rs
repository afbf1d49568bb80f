//! DupeSync - Duplicate Finder and Directory Reconciler
//!
//! Inventories directory trees, derives an identity signature for every file
//! (size, 5-byte prefix, BLAKE3 content hash), and uses it to find duplicates
//! within a tree or across two trees. A separate, name-keyed reconciler copies
//! missing or newer files from a source tree into a destination.

pub mod categorize;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;
pub mod scanner;
pub mod sync;

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::categorize::CategoryTotals;
use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::duplicates::{find_cross_duplicates, find_duplicates};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::report::{LogReporter, Reporter};
use crate::scanner::{Inventory, SignatureEngine};
use crate::sync::Reconciler;

/// Run the application for parsed arguments, writing reports to stdout.
///
/// # Errors
///
/// Returns an error for fatal conditions: invalid configuration, a missing
/// or non-directory root, or a failure writing the report.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(cli.command.options(), cli.no_color)?;
    log::debug!("Effective configuration: {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = execute(&cli.command, &config, &LogReporter, &mut out)?;
    out.flush()?;
    Ok(code)
}

/// Execute one subcommand with resolved configuration.
///
/// # Errors
///
/// Returns an error for fatal conditions; per-file problems only affect the
/// returned exit code.
pub fn execute<W: Write>(
    command: &Commands,
    config: &Config,
    reporter: &dyn Reporter,
    out: &mut W,
) -> Result<ExitCode> {
    let engine = config.signature_engine();
    let text = TextOutput::new(config.color);

    match command {
        Commands::Inventory(args) => {
            let inventory = build_inventory(&args.path, &engine, reporter)?;
            match config.output {
                OutputFormat::Text => text.write_inventory(&mut *out, &inventory)?,
                OutputFormat::Json => {
                    writeln!(out, "{}", JsonOutput::inventory(&inventory).to_json_pretty()?)?;
                }
                OutputFormat::Csv => CsvOutput::write_inventory(&mut *out, &inventory)?,
            }
            Ok(ExitCode::for_outcome(
                !inventory.errors().is_empty(),
                !inventory.is_empty(),
            ))
        }
        Commands::Analyze(args) => {
            let inventory = build_inventory(&args.path, &engine, reporter)?;
            let pairs = find_duplicates(&inventory);
            let totals = CategoryTotals::from_inventory(&inventory);
            match config.output {
                OutputFormat::Text => {
                    text.write_duplicates(&mut *out, &pairs)?;
                    writeln!(out)?;
                    text.write_categories(&mut *out, &totals)?;
                    text.write_skipped(&mut *out, inventory.errors())?;
                }
                OutputFormat::Json => {
                    let json = JsonOutput::analyze(&inventory, &pairs, &totals);
                    writeln!(out, "{}", json.to_json_pretty()?)?;
                }
                OutputFormat::Csv => CsvOutput::write_pairs(&mut *out, &pairs)?,
            }
            Ok(ExitCode::for_outcome(
                !inventory.errors().is_empty(),
                !pairs.is_empty(),
            ))
        }
        Commands::Compare(args) => {
            let first = build_inventory(&args.first, &engine, reporter)?;
            let second = build_inventory(&args.second, &engine, reporter)?;
            let pairs = find_cross_duplicates(&first, &second);
            match config.output {
                OutputFormat::Text => {
                    text.write_cross_duplicates(&mut *out, &args.first, &args.second, &pairs)?;
                    text.write_skipped(&mut *out, first.errors())?;
                    text.write_skipped(&mut *out, second.errors())?;
                }
                OutputFormat::Json => {
                    let json = JsonOutput::compare(&first, &second, &pairs);
                    writeln!(out, "{}", json.to_json_pretty()?)?;
                }
                OutputFormat::Csv => CsvOutput::write_pairs(&mut *out, &pairs)?,
            }
            let had_errors = !first.errors().is_empty() || !second.errors().is_empty();
            Ok(ExitCode::for_outcome(had_errors, !pairs.is_empty()))
        }
        Commands::Sync(args) => {
            let summary = Reconciler::new()
                .with_dry_run(args.dry_run)
                .reconcile(&args.dest, &args.source, reporter)
                .context("Reconciliation failed")?;
            match config.output {
                OutputFormat::Text => text.write_sync(&mut *out, &summary)?,
                OutputFormat::Json => {
                    writeln!(out, "{}", JsonOutput::sync(&summary).to_json_pretty()?)?;
                }
                OutputFormat::Csv => CsvOutput::write_sync(&mut *out, &summary)?,
            }
            Ok(ExitCode::for_outcome(
                summary.has_errors(),
                summary.transferred > 0,
            ))
        }
    }
}

fn build_inventory(
    root: &Path,
    engine: &SignatureEngine,
    reporter: &dyn Reporter,
) -> Result<Inventory> {
    Inventory::build(root, engine, reporter)
        .with_context(|| format!("Failed to inventory {}", root.display()))
}
