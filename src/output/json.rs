//! JSON output formatter.
//!
//! # Output Schema
//!
//! Records everywhere share one shape:
//!
//! ```json
//! {
//!   "path": "/photos/a.jpg",
//!   "name": "a.jpg",
//!   "size": 1024,
//!   "prefix": "ffd8ffe000",
//!   "content_hash": "af1349b9...",
//!   "modified": "2024-05-01T10:00:00+00:00"
//! }
//! ```
//!
//! Reports wrap records in `{"duplicate": ..., "original": ...}` pairs,
//! category maps, or sync action lists.

use serde::Serialize;

use super::format_rfc3339;
use crate::categorize::CategoryTotals;
use crate::duplicates::{DuplicatePair, DuplicateReport};
use crate::scanner::{FileRecord, Inventory};
use crate::sync::{SyncKind, SyncSummary};

/// A file record in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRecord {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub prefix: String,
    pub content_hash: String,
    pub modified: String,
}

impl From<&FileRecord> for JsonRecord {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.path().to_string_lossy().into_owned(),
            name: record.name().to_string(),
            size: record.size(),
            prefix: record.prefix().to_string(),
            content_hash: record.content_hash_hex(),
            modified: format_rfc3339(record.modified()),
        }
    }
}

/// A duplicate pair in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonPair {
    pub duplicate: JsonRecord,
    pub original: JsonRecord,
}

impl From<&DuplicatePair<'_>> for JsonPair {
    fn from(pair: &DuplicatePair<'_>) -> Self {
        Self {
            duplicate: pair.duplicate.into(),
            original: pair.original.into(),
        }
    }
}

/// Pair count and reclaimable bytes.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateSummary {
    pub pairs: usize,
    pub reclaimable_bytes: u64,
}

/// A planned or performed transfer.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSyncAction {
    pub kind: SyncKind,
    pub source: String,
    pub target: String,
}

/// Top-level JSON document.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JsonOutput {
    Inventory {
        root: String,
        files: Vec<JsonRecord>,
        total_size: u64,
        errors: Vec<String>,
    },
    Analyze {
        root: String,
        duplicates: Vec<JsonPair>,
        summary: JsonDuplicateSummary,
        categories: CategoryTotals,
        errors: Vec<String>,
    },
    Compare {
        first: String,
        second: String,
        duplicates: Vec<JsonPair>,
        summary: JsonDuplicateSummary,
        errors: Vec<String>,
    },
    Sync {
        dry_run: bool,
        transferred: usize,
        added: usize,
        overwritten: usize,
        skipped: usize,
        actions: Vec<JsonSyncAction>,
        failures: Vec<String>,
        errors: Vec<String>,
    },
}

fn error_strings<E: ToString>(errors: &[E]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

fn summary_of(pairs: &[DuplicatePair<'_>]) -> JsonDuplicateSummary {
    let report = DuplicateReport::from_pairs(pairs);
    JsonDuplicateSummary {
        pairs: report.pairs,
        reclaimable_bytes: report.reclaimable_bytes,
    }
}

impl JsonOutput {
    #[must_use]
    pub fn inventory(inventory: &Inventory) -> Self {
        Self::Inventory {
            root: inventory.root().to_string_lossy().into_owned(),
            files: inventory.iter().map(JsonRecord::from).collect(),
            total_size: inventory.total_size(),
            errors: error_strings(inventory.errors()),
        }
    }

    #[must_use]
    pub fn analyze(inventory: &Inventory, pairs: &[DuplicatePair<'_>], categories: &CategoryTotals) -> Self {
        Self::Analyze {
            root: inventory.root().to_string_lossy().into_owned(),
            duplicates: pairs.iter().map(JsonPair::from).collect(),
            summary: summary_of(pairs),
            categories: categories.clone(),
            errors: error_strings(inventory.errors()),
        }
    }

    #[must_use]
    pub fn compare(first: &Inventory, second: &Inventory, pairs: &[DuplicatePair<'_>]) -> Self {
        let mut errors = error_strings(first.errors());
        errors.extend(error_strings(second.errors()));
        Self::Compare {
            first: first.root().to_string_lossy().into_owned(),
            second: second.root().to_string_lossy().into_owned(),
            duplicates: pairs.iter().map(JsonPair::from).collect(),
            summary: summary_of(pairs),
            errors,
        }
    }

    #[must_use]
    pub fn sync(summary: &SyncSummary) -> Self {
        Self::Sync {
            dry_run: summary.dry_run,
            transferred: summary.transferred,
            added: summary.added,
            overwritten: summary.overwritten,
            skipped: summary.skipped,
            actions: summary
                .applied
                .iter()
                .map(|a| JsonSyncAction {
                    kind: a.kind,
                    source: a.source.path.to_string_lossy().into_owned(),
                    target: a.target.to_string_lossy().into_owned(),
                })
                .collect(),
            failures: error_strings(&summary.failures),
            errors: error_strings(&summary.scan_errors),
        }
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
