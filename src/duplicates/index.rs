//! Signature index keyed by identity signature.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::scanner::{FileRecord, Signature};

/// Maps each identity signature to the first record observed with it.
///
/// Later records with the same signature never replace the first one.
#[derive(Debug, Default)]
pub struct SignatureIndex<'a> {
    first_seen: HashMap<&'a Signature, &'a FileRecord>,
}

impl<'a> SignatureIndex<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every record of a sequence, keeping the first of each signature.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a FileRecord>,
    {
        let mut index = Self::new();
        for record in records {
            index.observe(record);
        }
        index
    }

    /// Remember `record` unless its signature is already known.
    ///
    /// Returns the previously remembered record when there is one.
    pub fn observe(&mut self, record: &'a FileRecord) -> Option<&'a FileRecord> {
        match self.first_seen.entry(record.signature()) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(record);
                None
            }
        }
    }

    /// The first record seen with `signature`, if any.
    #[must_use]
    pub fn get(&self, signature: &Signature) -> Option<&'a FileRecord> {
        self.first_seen.get(signature).copied()
    }

    #[must_use]
    pub fn contains(&self, signature: &Signature) -> bool {
        self.first_seen.contains_key(signature)
    }

    /// Number of distinct signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
