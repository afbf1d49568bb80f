//! File inventory: walk a tree, then sign every regular file.
//!
//! A single unreadable file never aborts the inventory. It is reported as a
//! diagnostic, kept in [`Inventory::errors`], and left out of the records.

use std::path::{Path, PathBuf};

use super::walker::collect_files;
use super::{FileMeta, FileRecord, ScanError, SignatureEngine};
use crate::report::Reporter;

/// Ordered, read-only collection of [`FileRecord`]s for one root.
///
/// Record order is walk order.
#[derive(Debug, Default)]
pub struct Inventory {
    root: PathBuf,
    records: Vec<FileRecord>,
    errors: Vec<ScanError>,
}

impl Inventory {
    /// Walk `root` and sign every regular file below it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if `root` does not exist or is not a directory.
    /// Per-file failures are recovered and recorded instead.
    pub fn build(
        root: &Path,
        engine: &SignatureEngine,
        reporter: &dyn Reporter,
    ) -> Result<Self, ScanError> {
        reporter.info(&format!("Building inventory of {}", root.display()));
        let (files, mut errors) = collect_files(root, reporter)?;
        let mut inventory = Self::from_files(root, files, engine, reporter);
        errors.append(&mut inventory.errors);
        inventory.errors = errors;
        Ok(inventory)
    }

    /// Sign already collected metadata.
    pub fn from_files(
        root: &Path,
        files: Vec<FileMeta>,
        engine: &SignatureEngine,
        reporter: &dyn Reporter,
    ) -> Self {
        let mut records = Vec::with_capacity(files.len());
        let mut errors = Vec::new();

        for (meta, result) in engine.sign_all(files) {
            match result {
                Ok(signature) => records.push(FileRecord::new(meta, signature)),
                Err(e) => {
                    reporter.diagnostic(&format!("Skipping {}: {}", meta.path.display(), e));
                    errors.push(ScanError::Signature(e));
                }
            }
        }

        log::debug!(
            "Inventory of {}: {} records, {} skipped",
            root.display(),
            records.len(),
            errors.len()
        );

        Self {
            root: root.to_path_buf(),
            records,
            errors,
        }
    }

    /// Build an inventory from records that were signed elsewhere.
    #[must_use]
    pub fn from_records(root: &Path, records: Vec<FileRecord>) -> Self {
        Self {
            root: root.to_path_buf(),
            records,
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Failures that were skipped while building.
    #[must_use]
    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    /// Sum of all record sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(FileRecord::size).sum()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
