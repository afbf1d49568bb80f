//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Signature indexing with first-seen-wins semantics
//! - Duplicate pairs within one inventory
//! - Duplicate pairs of a second inventory against a first
//!
//! Matching is by full identity signature (size, prefix and content hash).
//! File names and timestamps play no part here.

pub mod detector;
pub mod index;

pub use detector::{find_cross_duplicates, find_duplicates, DuplicatePair, DuplicateReport};
pub use index::SignatureIndex;
