//! Human-readable text reports.
//!
//! One line per record:
//!
//! ```text
//! name | size octets | prefix | content-hash | modified
//! ```

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use yansi::Paint;

use super::format_ctime;
use crate::categorize::CategoryTotals;
use crate::duplicates::DuplicatePair;
use crate::scanner::{FileRecord, Inventory};
use crate::sync::{SyncKind, SyncSummary};

/// Text renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextOutput {
    color: bool,
}

impl TextOutput {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// The single-line rendering of a record.
    #[must_use]
    pub fn record_line(record: &FileRecord) -> String {
        format!(
            "{} | {} octets | {} | {} | {}",
            record.name(),
            record.size(),
            record.prefix(),
            record.content_hash_hex(),
            format_ctime(record.modified())
        )
    }

    /// Every record of an inventory, one per line.
    pub fn write_inventory<W: Write>(&self, mut w: W, inventory: &Inventory) -> io::Result<()> {
        for record in inventory {
            writeln!(w, "{}", Self::record_line(record))?;
        }
        self.write_skipped(&mut w, inventory.errors())?;
        writeln!(
            w,
            "{}",
            self.heading(&format!(
                "{} file(s), {} octets",
                inventory.len(),
                inventory.total_size()
            ))
        )
    }

    /// One `Skipped:` line per file or entry left out of a report.
    pub fn write_skipped<W: Write, E: Display>(&self, mut w: W, errors: &[E]) -> io::Result<()> {
        for error in errors {
            writeln!(w, "Skipped: {error}")?;
        }
        Ok(())
    }

    /// Duplicates within one tree.
    pub fn write_duplicates<W: Write>(&self, mut w: W, pairs: &[DuplicatePair<'_>]) -> io::Result<()> {
        if pairs.is_empty() {
            return writeln!(w, "No duplicates found.");
        }
        writeln!(w, "{}", self.heading("Duplicate files found:"))?;
        for pair in pairs {
            writeln!(w, "Duplicate:")?;
            writeln!(w, "  {}", Self::record_line(pair.duplicate))?;
            writeln!(w, "  {}", Self::record_line(pair.original))?;
            writeln!(w)?;
        }
        Ok(())
    }

    /// Files in `second` duplicating files in `first`.
    pub fn write_cross_duplicates<W: Write>(
        &self,
        mut w: W,
        first: &Path,
        second: &Path,
        pairs: &[DuplicatePair<'_>],
    ) -> io::Result<()> {
        if pairs.is_empty() {
            return writeln!(w, "No duplicates found between the two directories.");
        }
        writeln!(
            w,
            "{}",
            self.heading(&format!("Duplicate files found in {}:", second.display()))
        )?;
        for pair in pairs {
            writeln!(w, "Duplicate in {}: {}", second.display(), Self::record_line(pair.duplicate))?;
            writeln!(w, "  Matches in {}: {}", first.display(), Self::record_line(pair.original))?;
            writeln!(w)?;
        }
        Ok(())
    }

    /// Size per category.
    pub fn write_categories<W: Write>(&self, mut w: W, totals: &CategoryTotals) -> io::Result<()> {
        writeln!(w, "{}", self.heading("Total size by file type:"))?;
        for (category, bytes) in totals.iter() {
            writeln!(w, "{category}: {bytes} octets")?;
        }
        Ok(())
    }

    /// Each transfer, failures, then the final count.
    pub fn write_sync<W: Write>(&self, mut w: W, summary: &SyncSummary) -> io::Result<()> {
        for action in &summary.applied {
            let verb = match (action.kind, summary.dry_run) {
                (SyncKind::Add, false) => "Copied",
                (SyncKind::Overwrite, false) => "Updated",
                (SyncKind::Add, true) => "Would copy",
                (SyncKind::Overwrite, true) => "Would update",
            };
            writeln!(
                w,
                "{verb}: {} -> {}",
                action.source.path.display(),
                action.target.display()
            )?;
        }
        for failure in &summary.failures {
            writeln!(w, "Failed: {failure}")?;
        }
        self.write_skipped(&mut w, &summary.scan_errors)?;
        let total = if summary.dry_run {
            format!("{} file(s) would be transferred.", summary.transferred)
        } else {
            format!("{} file(s) transferred.", summary.transferred)
        };
        writeln!(w, "{}", self.heading(&total))
    }
}
