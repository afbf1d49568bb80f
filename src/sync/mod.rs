//! Directory reconciliation.
//!
//! This module provides functionality for:
//! - Name-keyed indexing of a destination tree
//! - Planning newer-wins copies from a source tree
//! - Applying plans through a timestamp-preserving copy primitive
//!
//! Matching here is by file name and modification time. Content signatures
//! are not consulted; see [`crate::duplicates`] for that.

pub mod copier;
pub mod index;
pub mod reconciler;

pub use copier::{FileCopier, PreservingCopier};
pub use index::NameIndex;
pub use reconciler::{
    plan, CopyFailure, Reconciler, SyncAction, SyncError, SyncKind, SyncPlan, SyncSummary,
};
