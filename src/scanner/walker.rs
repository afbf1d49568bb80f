//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory tree
//! and collecting [`FileMeta`] for every regular file. The walk is sequential
//! and visits children in file-name order, so walk order is stable within a
//! run.
//!
//! Errors on individual entries are yielded as [`ScanError`] values rather
//! than stopping iteration. Directories are traversed but never yielded;
//! symbolic links are not followed.
//!
//! # Example
//!
//! ```no_run
//! use dupesync::scanner::Walker;
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"));
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::WalkDir;

use super::{FileMeta, ScanError};
use crate::report::Reporter;

/// Directory walker for file discovery.
#[derive(Debug, Clone)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            root: path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check that the root exists and is a directory.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::NotFound`] or [`ScanError::NotADirectory`].
    pub fn validate_root(&self) -> Result<(), ScanError> {
        let metadata =
            std::fs::metadata(&self.root).map_err(|e| ScanError::from_io(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }
        Ok(())
    }

    /// Walk the directory tree, yielding metadata for regular files.
    ///
    /// The root itself is never yielded. A missing root surfaces as a single
    /// error item; use [`Self::validate_root`] first to treat it as fatal.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileMeta, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let path = entry.path().to_path_buf();
                    match entry.metadata() {
                        Ok(metadata) => {
                            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                            Some(Ok(FileMeta::new(path, metadata.len(), modified)))
                        }
                        Err(e) => Some(Err(self.handle_walk_error(path, e))),
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map_or_else(|| self.root.clone(), std::borrow::ToOwned::to_owned);
                    Some(Err(self.handle_walk_error(path, e)))
                }
            })
    }

    /// Convert a walkdir error, keeping the underlying I/O error when present.
    fn handle_walk_error(&self, path: PathBuf, error: walkdir::Error) -> ScanError {
        match error.into_io_error() {
            Some(io) => ScanError::from_io(&path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }
}

/// Validate `root`, then collect metadata for every regular file below it.
///
/// Per-entry failures are reported as diagnostics and returned alongside the
/// files; they never abort the walk.
///
/// # Errors
///
/// Returns [`ScanError`] only when the root itself is missing or not a directory.
pub fn collect_files(
    root: &Path,
    reporter: &dyn Reporter,
) -> Result<(Vec<FileMeta>, Vec<ScanError>), ScanError> {
    let walker = Walker::new(root);
    walker.validate_root()?;

    let mut files = Vec::new();
    let mut errors = Vec::new();
    for result in walker.walk() {
        match result {
            Ok(meta) => files.push(meta),
            Err(e) => {
                reporter.diagnostic(&format!("Skipping entry: {e}"));
                errors.push(e);
            }
        }
    }

    log::debug!(
        "Walked {}: {} files, {} errors",
        root.display(),
        files.len(),
        errors.len()
    );
    Ok((files, errors))
}
