//! CSV output formatter.
//!
//! Row shapes:
//! - records: `path,name,size,prefix,content_hash,modified`
//! - duplicate pairs: `duplicate_path,original_path,size,content_hash`
//! - sync actions: `kind,source,target`
//!
//! Modified times are RFC 3339.

use std::io;

use serde::Serialize;
use thiserror::Error;

use super::format_rfc3339;
use crate::duplicates::DuplicatePair;
use crate::scanner::Inventory;
use crate::sync::{SyncKind, SyncSummary};

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    path: String,
    name: &'a str,
    size: u64,
    prefix: &'a str,
    content_hash: String,
    modified: String,
}

#[derive(Debug, Serialize)]
struct PairRow {
    duplicate_path: String,
    original_path: String,
    size: u64,
    content_hash: String,
}

#[derive(Debug, Serialize)]
struct ActionRow {
    kind: SyncKind,
    source: String,
    target: String,
}

/// CSV output formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvOutput;

impl CsvOutput {
    /// One row per inventory record.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_inventory<W: io::Write>(writer: W, inventory: &Inventory) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if inventory.is_empty() {
            csv_writer.write_record(["path", "name", "size", "prefix", "content_hash", "modified"])?;
        }
        for record in inventory {
            csv_writer.serialize(RecordRow {
                path: record.path().to_string_lossy().into_owned(),
                name: record.name(),
                size: record.size(),
                prefix: record.prefix(),
                content_hash: record.content_hash_hex(),
                modified: format_rfc3339(record.modified()),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// One row per duplicate pair.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_pairs<W: io::Write>(writer: W, pairs: &[DuplicatePair<'_>]) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if pairs.is_empty() {
            csv_writer.write_record(["duplicate_path", "original_path", "size", "content_hash"])?;
        }
        for pair in pairs {
            csv_writer.serialize(PairRow {
                duplicate_path: pair.duplicate.path().to_string_lossy().into_owned(),
                original_path: pair.original.path().to_string_lossy().into_owned(),
                size: pair.duplicate.size(),
                content_hash: pair.duplicate.content_hash_hex(),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// One row per applied sync action.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_sync<W: io::Write>(writer: W, summary: &SyncSummary) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if summary.applied.is_empty() {
            csv_writer.write_record(["kind", "source", "target"])?;
        }
        for action in &summary.applied {
            csv_writer.serialize(ActionRow {
                kind: action.kind,
                source: action.source.path.to_string_lossy().into_owned(),
                target: action.target.to_string_lossy().into_owned(),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
