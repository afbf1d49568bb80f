//! File-name index used by reconciliation.

use std::collections::HashMap;

use crate::scanner::FileMeta;

/// Maps a base file name to the file holding that name.
///
/// When a tree holds the same name in several directories, the last one
/// inserted wins.
#[derive(Debug, Default, Clone)]
pub struct NameIndex {
    by_name: HashMap<String, FileMeta>,
}

impl NameIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a listing in order.
    #[must_use]
    pub fn from_files(files: &[FileMeta]) -> Self {
        let mut index = Self::new();
        for meta in files {
            index.insert(meta.clone());
        }
        index
    }

    /// Insert or replace the entry for `meta.name`, returning the old one.
    pub fn insert(&mut self, meta: FileMeta) -> Option<FileMeta> {
        let replaced = self.by_name.insert(meta.name.clone(), meta);
        if let Some(ref old) = replaced {
            log::trace!("Name collision on {}, keeping the later entry", old.name);
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FileMeta> {
        self.by_name.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
