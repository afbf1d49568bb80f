//! Identity signatures with streaming BLAKE3 hashing.
//!
//! # Overview
//!
//! A [`Signature`] is the triple `(size, prefix, content_hash)`:
//! - `size`: byte length reported by the open file handle
//! - `prefix`: the first [`PREFIX_LEN`] bytes as lowercase hex (shorter for
//!   shorter files, empty for empty files)
//! - `content_hash`: BLAKE3 over the whole content, fed in fixed-size chunks
//!
//! Two files are content duplicates exactly when all three components are equal.
//! The file is opened once and the handle is closed before [`SignatureEngine::sign`]
//! returns.
//!
//! # Example
//!
//! ```no_run
//! use dupesync::scanner::SignatureEngine;
//! use std::path::Path;
//!
//! let engine = SignatureEngine::new();
//! let sig = engine.sign(Path::new("Cargo.toml")).unwrap();
//! println!("{} bytes, prefix {}, hash {}", sig.size, sig.prefix, sig.content_hash_hex());
//! ```

use std::fmt::Write as _;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use rayon::prelude::*;

use super::{FileMeta, SignatureError};

/// BLAKE3 digest bytes.
pub type Hash = [u8; 32];

/// Number of leading bytes captured in the prefix signature.
pub const PREFIX_LEN: usize = 5;

/// Default read chunk size for content hashing.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Largest accepted read chunk size (64 MiB).
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Identity signature of a file's content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Byte length of the file
    pub size: u64,
    /// Lowercase hex of the first bytes, two digits per byte
    pub prefix: String,
    /// BLAKE3 digest of the full content
    pub content_hash: Hash,
}

impl Signature {
    #[must_use]
    pub fn new(size: u64, prefix: String, content_hash: Hash) -> Self {
        Self {
            size,
            prefix,
            content_hash,
        }
    }

    /// Content hash as a 64-character hex string.
    #[must_use]
    pub fn content_hash_hex(&self) -> String {
        hash_to_hex(&self.content_hash)
    }
}

/// Encode bytes as lowercase hex.
#[must_use]
pub fn hash_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing to a String cannot fail.
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Computes identity signatures for files.
///
/// Signing is kept separate from the metadata walk so batches can be hashed
/// sequentially or on a dedicated thread pool.
#[derive(Debug, Clone)]
pub struct SignatureEngine {
    chunk_size: usize,
    threads: usize,
}

impl Default for SignatureEngine {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            threads: 1,
        }
    }
}

impl SignatureEngine {
    /// Create an engine with the default chunk size, signing sequentially.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the read chunk size, clamped to `1..=MAX_CHUNK_SIZE`.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.clamp(1, MAX_CHUNK_SIZE);
        self
    }

    /// Set the number of hashing threads used by [`Self::sign_all`].
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Compute the signature of one file.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureError`] if the file cannot be opened or read.
    pub fn sign(&self, path: &Path) -> Result<Signature, SignatureError> {
        let mut file = File::open(path).map_err(|e| SignatureError::from_io(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| SignatureError::from_io(path, e))?
            .len();

        let mut hasher = blake3::Hasher::new();
        let mut prefix = Vec::with_capacity(PREFIX_LEN);
        // Small files never need a full chunk.
        let buffer_len =
            usize::try_from(size).map_or(self.chunk_size, |len| len.clamp(1, self.chunk_size));
        let mut buffer = vec![0u8; buffer_len];

        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(SignatureError::from_io(path, e)),
            };
            let chunk = &buffer[..n];
            if prefix.len() < PREFIX_LEN {
                let wanted = (PREFIX_LEN - prefix.len()).min(n);
                prefix.extend_from_slice(&chunk[..wanted]);
            }
            hasher.update(chunk);
        }

        log::trace!("Signed {} ({} bytes)", path.display(), size);

        Ok(Signature {
            size,
            prefix: hash_to_hex(&prefix),
            content_hash: *hasher.finalize().as_bytes(),
        })
    }

    /// Sign a batch of files, returning results in input order.
    ///
    /// With more than one thread the batch runs on a dedicated rayon pool;
    /// ordering is preserved either way.
    pub fn sign_all(&self, files: Vec<FileMeta>) -> Vec<(FileMeta, Result<Signature, SignatureError>)> {
        if self.threads <= 1 || files.len() < 2 {
            return files
                .into_iter()
                .map(|meta| {
                    let result = self.sign(&meta.path);
                    (meta, result)
                })
                .collect();
        }

        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
        {
            Ok(pool) => pool.install(|| {
                files
                    .into_par_iter()
                    .map(|meta| {
                        let result = self.sign(&meta.path);
                        (meta, result)
                    })
                    .collect()
            }),
            Err(e) => {
                log::warn!("Failed to create hashing thread pool, signing sequentially: {}", e);
                Self {
                    threads: 1,
                    ..self.clone()
                }
                .sign_all(files)
            }
        }
    }
}
