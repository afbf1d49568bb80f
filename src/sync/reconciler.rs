//! One-way reconciliation of a source tree into a destination directory.
//!
//! # Overview
//!
//! Files are matched by base name, not by content. For each source file in
//! walk order:
//! - no destination file with that name: copy it into the destination root
//! - a destination file with that name and an older mtime: overwrite it
//! - otherwise: leave it alone
//!
//! Planning ([`plan`]) is pure; [`Reconciler::apply`] performs the copies.
//! A failed copy is reported and the run moves on to the next file. The
//! source tree is never written to.
//!
//! # Example
//!
//! ```no_run
//! use dupesync::report::LogReporter;
//! use dupesync::sync::Reconciler;
//! use std::path::Path;
//!
//! let reconciler = Reconciler::new();
//! let summary = reconciler
//!     .reconcile(Path::new("/backup"), Path::new("/work"), &LogReporter)
//!     .unwrap();
//! println!("{} file(s) transferred", summary.transferred);
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{FileCopier, NameIndex, PreservingCopier};
use crate::report::Reporter;
use crate::scanner::{collect_files, FileMeta, ScanError};

/// What a planned transfer does to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncKind {
    /// The name did not exist in the destination
    Add,
    /// The destination held an older file with the same name
    Overwrite,
}

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncAction {
    pub kind: SyncKind,
    /// Source file to copy
    pub source: FileMeta,
    /// Where it lands in the destination
    pub target: PathBuf,
}

/// The full set of decisions for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Copies to perform, in source walk order
    pub actions: Vec<SyncAction>,
    /// Source files left alone because the destination was not older
    pub skipped: Vec<FileMeta>,
}

/// Decide which source files to copy into `dest_root`.
///
/// `dest` and `source` are metadata listings of the two trees. The name
/// index starts from the destination listing and is updated with every
/// planned copy, so a later source file sharing a name with an earlier one
/// is compared against what that earlier copy will leave behind.
#[must_use]
pub fn plan(dest_root: &Path, dest: &[FileMeta], source: &[FileMeta]) -> SyncPlan {
    let mut names = NameIndex::from_files(dest);
    let mut result = SyncPlan::default();

    for file in source {
        let (kind, target) = match names.get(&file.name) {
            None => (SyncKind::Add, dest_root.join(&file.name)),
            Some(existing) if file.modified > existing.modified => {
                (SyncKind::Overwrite, existing.path.clone())
            }
            Some(_) => {
                result.skipped.push(file.clone());
                continue;
            }
        };

        names.insert(FileMeta {
            path: target.clone(),
            ..file.clone()
        });
        result.actions.push(SyncAction {
            kind,
            source: file.clone(),
            target,
        });
    }

    result
}

/// A copy that failed while applying a plan.
#[derive(thiserror::Error, Debug)]
#[error("Failed to copy {from} to {to}: {source}")]
pub struct CopyFailure {
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Errors that stop a reconciliation run.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// The source tree could not be listed.
    #[error("Cannot read source: {0}")]
    Source(#[source] ScanError),

    /// The destination tree could not be listed.
    #[error("Cannot read destination: {0}")]
    Destination(#[source] ScanError),
}

/// Outcome of a reconciliation run.
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Files copied successfully (additions plus overwrites)
    pub transferred: usize,
    /// New names copied into the destination
    pub added: usize,
    /// Older destination files replaced
    pub overwritten: usize,
    /// Source files left alone
    pub skipped: usize,
    /// Actions that were applied (or would be, on a dry run)
    pub applied: Vec<SyncAction>,
    /// Copies that failed
    pub failures: Vec<CopyFailure>,
    /// Entries that could not be listed in either tree
    pub scan_errors: Vec<ScanError>,
    /// Whether the plan was only computed, not executed
    pub dry_run: bool,
}

impl SyncSummary {
    /// True when any per-file problem occurred.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.failures.is_empty() || !self.scan_errors.is_empty()
    }
}

/// Applies reconciliation plans through a [`FileCopier`].
#[derive(Debug, Clone)]
pub struct Reconciler<C: FileCopier = PreservingCopier> {
    copier: C,
    dry_run: bool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    /// Reconciler using the timestamp-preserving copier.
    #[must_use]
    pub fn new() -> Self {
        Self::with_copier(PreservingCopier)
    }
}

impl<C: FileCopier> Reconciler<C> {
    #[must_use]
    pub fn with_copier(copier: C) -> Self {
        Self {
            copier,
            dry_run: false,
        }
    }

    /// Only plan and report; never write.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// List both trees, plan, and apply.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if either root is missing or not a directory.
    /// Per-file listing and copy failures are collected in the summary.
    pub fn reconcile(
        &self,
        dest_root: &Path,
        source_root: &Path,
        reporter: &dyn Reporter,
    ) -> Result<SyncSummary, SyncError> {
        reporter.info(&format!(
            "Reconciling {} into {}",
            source_root.display(),
            dest_root.display()
        ));
        let (dest, mut scan_errors) =
            collect_files(dest_root, reporter).map_err(SyncError::Destination)?;
        let (source, source_errors) =
            collect_files(source_root, reporter).map_err(SyncError::Source)?;
        scan_errors.extend(source_errors);

        let plan = plan(dest_root, &dest, &source);
        let mut summary = self.apply(plan, reporter);
        summary.scan_errors = scan_errors;
        Ok(summary)
    }

    /// Execute a plan, continuing past individual copy failures.
    pub fn apply(&self, plan: SyncPlan, reporter: &dyn Reporter) -> SyncSummary {
        let mut summary = SyncSummary {
            skipped: plan.skipped.len(),
            dry_run: self.dry_run,
            ..SyncSummary::default()
        };

        for file in &plan.skipped {
            log::debug!("Up to date: {}", file.path.display());
        }

        // Targets whose add failed; a later same-name copy is still an add
        let mut failed_adds = HashSet::new();

        for mut action in plan.actions {
            if action.kind == SyncKind::Overwrite && failed_adds.contains(&action.target) {
                action.kind = SyncKind::Add;
            }

            if self.dry_run {
                log::debug!("Would {:?}: {}", action.kind, action.target.display());
            } else {
                if let Err(source) = self.copier.copy(&action.source.path, &action.target) {
                    if action.kind == SyncKind::Add {
                        failed_adds.insert(action.target.clone());
                    }
                    let failure = CopyFailure {
                        from: action.source.path.clone(),
                        to: action.target.clone(),
                        source,
                    };
                    reporter.diagnostic(&failure.to_string());
                    summary.failures.push(failure);
                    continue;
                }
                failed_adds.remove(&action.target);
                log::debug!("{:?}: {}", action.kind, action.target.display());
            }

            summary.transferred += 1;
            match action.kind {
                SyncKind::Add => summary.added += 1,
                SyncKind::Overwrite => summary.overwritten += 1,
            }
            summary.applied.push(action);
        }

        log::info!(
            "Reconciliation finished: {} transferred, {} skipped, {} failed",
            summary.transferred,
            summary.skipped,
            summary.failures.len()
        );
        summary
    }
}
