//! Output formatters for inventory, duplicate, category and sync reports.
//!
//! This module provides three renderers:
//! - [`text`] for people (the default)
//! - [`json`] for automation and scripting
//! - [`csv`] for spreadsheet import
//!
//! None of them is a stable machine contract beyond the field names.

pub mod csv;
pub mod json;
pub mod text;

use std::time::SystemTime;

use chrono::{DateTime, Local, Utc};

pub use self::csv::{CsvOutput, CsvOutputError};
pub use json::JsonOutput;
pub use text::TextOutput;

/// Render a timestamp the way `ctime(3)` does, in local time.
#[must_use]
pub fn format_ctime(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

/// Render a timestamp as RFC 3339 in UTC.
#[must_use]
pub fn format_rfc3339(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339()
}
