//! Duplicate detection over inventories.
//!
//! # Overview
//!
//! - [`find_duplicates`] scans one inventory in walk order. The first record
//!   with a signature is the original; every later record with the same
//!   signature is paired against that original.
//! - [`find_cross_duplicates`] indexes a first inventory in full, then reports
//!   each record of a second inventory whose signature the first contains.
//!   Duplicates purely within either side are not reported.
//!
//! # Example
//!
//! ```no_run
//! use dupesync::duplicates::find_duplicates;
//! use dupesync::report::SilentReporter;
//! use dupesync::scanner::{Inventory, SignatureEngine};
//! use std::path::Path;
//!
//! let inventory = Inventory::build(Path::new("."), &SignatureEngine::new(), &SilentReporter).unwrap();
//! for pair in find_duplicates(&inventory) {
//!     println!("{} duplicates {}", pair.duplicate.path().display(), pair.original.path().display());
//! }
//! ```

use super::SignatureIndex;
use crate::scanner::{FileRecord, Inventory};

/// A record whose content matches an earlier-observed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePair<'a> {
    /// The later-observed record (or the record from the second inventory)
    pub duplicate: &'a FileRecord,
    /// The first-observed record with the same signature
    pub original: &'a FileRecord,
}

/// Find duplicate pairs within one inventory.
///
/// Pairs are returned in walk order of their `duplicate` side.
#[must_use]
pub fn find_duplicates(inventory: &Inventory) -> Vec<DuplicatePair<'_>> {
    let mut index = SignatureIndex::new();
    let mut pairs = Vec::new();

    for record in inventory {
        if let Some(original) = index.observe(record) {
            log::debug!(
                "Duplicate: {} matches {}",
                record.path().display(),
                original.path().display()
            );
            pairs.push(DuplicatePair {
                duplicate: record,
                original,
            });
        }
    }

    log::info!(
        "Found {} duplicate(s) among {} files in {}",
        pairs.len(),
        inventory.len(),
        inventory.root().display()
    );
    pairs
}

/// Find records of `second` whose content already exists in `first`.
///
/// Each pair is `(record from second, first matching record from first)`.
#[must_use]
pub fn find_cross_duplicates<'a>(first: &'a Inventory, second: &'a Inventory) -> Vec<DuplicatePair<'a>> {
    let index = SignatureIndex::from_records(first);

    let pairs: Vec<_> = second
        .iter()
        .filter_map(|record| {
            index.get(record.signature()).map(|original| DuplicatePair {
                duplicate: record,
                original,
            })
        })
        .collect();

    log::info!(
        "Found {} file(s) in {} duplicating {}",
        pairs.len(),
        second.root().display(),
        first.root().display()
    );
    pairs
}

/// Totals over a list of duplicate pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Number of pairs
    pub pairs: usize,
    /// Bytes held by the duplicate side of every pair
    pub reclaimable_bytes: u64,
}

impl DuplicateReport {
    #[must_use]
    pub fn from_pairs(pairs: &[DuplicatePair<'_>]) -> Self {
        Self {
            pairs: pairs.len(),
            reclaimable_bytes: pairs.iter().map(|p| p.duplicate.size()).sum(),
        }
    }
}
