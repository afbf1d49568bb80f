//! Logging setup on the `log` facade with an `env_logger` backend.
//!
//! Level selection, highest priority first:
//!
//! 1. `RUST_LOG`, when set
//! 2. `--quiet` (errors only)
//! 3. `-v` (debug) / `-vv` (trace)
//! 4. info
//!
//! Reporter diagnostics arrive here as `WARN` lines on stderr, which keeps
//! them apart from the report on stdout.
//!
//! # Line Format
//!
//! - **Verbose** (`-v` and up): timestamp, level, module path, message
//! - **Default**: level and message only
//!
//! # Example
//!
//! ```rust,no_run
//! use dupesync::logging::init_logging;
//!
//! // Debug level, with timestamps and module paths
//! init_logging(1, false);
//!
//! log::info!("Scanning started");
//! ```

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initialize logging once, at startup, before anything is logged.
///
/// # Arguments
///
/// * `verbose` - Count of `-v` flags (0=info, 1=debug, 2+=trace)
/// * `quiet` - Only show errors; ignored when `RUST_LOG` is set
///
/// # Panics
///
/// Panics if a global logger is already installed, since `env_logger`
/// can only be initialized once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    // RUST_LOG wins over the CLI flags
    if std::env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    // Timestamps and module paths only when asked for detail
    builder.format(move |buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        if verbose >= 1 {
            writeln!(
                buf,
                "{} {style}{:<5}{style:#} [{}] {}",
                buf.timestamp_seconds(),
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            )
        } else {
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        }
    });

    builder.init();
    log::debug!("Logging initialized at level {}", log::max_level());
}

/// Map CLI verbosity flags to a level filter.
///
/// # Returns
///
/// `Error` when quiet, otherwise `Info`, `Debug` or `Trace` by `verbose`.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
