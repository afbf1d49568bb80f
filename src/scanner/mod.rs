//! Scanner module for directory traversal and file signatures.
//!
//! This module provides functionality for:
//! - Sequential directory walking using walkdir
//! - Identity signatures (size, 5-byte prefix, BLAKE3 content hash)
//! - Inventories that pair walk metadata with signatures
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and metadata collection
//! - [`signature`]: Signature computation (streaming, chunked)
//! - [`inventory`]: Walk + sign, with per-file error recovery
//!
//! Metadata collection and signing are separate steps, so callers that only
//! need names and timestamps (reconciliation) never read file contents.
//!
//! # Example
//!
//! ```no_run
//! use dupesync::report::SilentReporter;
//! use dupesync::scanner::{Inventory, SignatureEngine};
//! use std::path::Path;
//!
//! let engine = SignatureEngine::new();
//! let inventory = Inventory::build(Path::new("."), &engine, &SilentReporter).unwrap();
//! for record in inventory.iter() {
//!     println!("{}: {} bytes", record.name(), record.size());
//! }
//! ```

pub mod inventory;
pub mod signature;
pub mod walker;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use inventory::Inventory;
pub use signature::{
    hash_to_hex, Hash, Signature, SignatureEngine, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, PREFIX_LEN,
};
pub use walker::{collect_files, Walker};

/// Metadata for a regular file observed during a walk.
///
/// This is everything reconciliation needs; signatures are computed from it
/// separately by [`SignatureEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// Path to the file as produced by the walk
    pub path: PathBuf,
    /// Base file name
    pub name: String,
    /// File size in bytes at observation time
    pub size: u64,
    /// Last modification time at observation time
    pub modified: SystemTime,
}

impl FileMeta {
    /// Create metadata for a path, deriving the name from its last component.
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let name = file_name_of(&path);
        Self {
            path,
            name,
            size,
            modified,
        }
    }
}

/// Base name of a path, lossily converted to UTF-8.
pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One regular file with its identity signature.
///
/// Records are immutable; a file that changes on disk needs a new inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    meta: FileMeta,
    signature: Signature,
}

impl FileRecord {
    /// Pair walk metadata with a computed signature.
    #[must_use]
    pub fn new(meta: FileMeta, signature: Signature) -> Self {
        Self { meta, signature }
    }

    /// Stat and sign a single file in one step.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] if the file cannot be stat'ed, opened or read.
    pub fn from_path(path: &Path, engine: &SignatureEngine) -> Result<Self, SignatureError> {
        let metadata =
            std::fs::metadata(path).map_err(|e| SignatureError::from_io(path, e))?;
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let meta = FileMeta::new(path.to_path_buf(), metadata.len(), modified);
        let signature = engine.sign(path)?;
        Ok(Self::new(meta, signature))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.meta.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Size as measured while signing (the signature's size component).
    #[must_use]
    pub fn size(&self) -> u64 {
        self.signature.size
    }

    #[must_use]
    pub fn modified(&self) -> SystemTime {
        self.meta.modified
    }

    /// Hex encoding of the first bytes of the file.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.signature.prefix
    }

    /// Content hash as lowercase hex.
    #[must_use]
    pub fn content_hash_hex(&self) -> String {
        self.signature.content_hash_hex()
    }

    /// The identity signature used for duplicate detection.
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[must_use]
    pub fn meta(&self) -> &FileMeta {
        &self.meta
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Signing a file failed.
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

impl ScanError {
    /// Classify an I/O error by kind, keeping the path.
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Errors that can occur while computing a signature.
#[derive(thiserror::Error, Debug)]
pub enum SignatureError {
    /// The specified file was not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl SignatureError {
    pub(crate) fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
