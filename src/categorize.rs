//! Size totals by file-extension category.
//!
//! The extension is whatever follows the last `.` in the file name,
//! lower-cased. A name without a `.` is used whole as its own extension, so
//! names like `README` land in [`Category::Other`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::scanner::Inventory;

/// File categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    TextDocuments,
    Images,
    Video,
    Audio,
    Other,
}

impl Category {
    /// Every category, in reporting order.
    pub const ALL: [Category; 5] = [
        Category::TextDocuments,
        Category::Images,
        Category::Video,
        Category::Audio,
        Category::Other,
    ];

    /// Lower-cased extensions belonging to this category.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::TextDocuments => &["txt", "doc", "docx", "odt", "csv", "xls", "ppt", "odp"],
            Self::Images => &["jpg", "png", "bmp", "gif", "svg"],
            Self::Video => &["mp4", "avi", "mov", "mpeg", "wmv"],
            Self::Audio => &["mp3", "mp2", "wav", "bwf"],
            Self::Other => &[],
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TextDocuments => "text-documents",
            Self::Images => "images",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }

    /// Category of a lower-cased extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.extensions().contains(&extension))
            .unwrap_or(Self::Other)
    }

    /// Category of a file name.
    #[must_use]
    pub fn of_file_name(name: &str) -> Self {
        Self::from_extension(&extension_of(name))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text after the last `.`, lower-cased; the whole name if there is no `.`.
#[must_use]
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Summed byte sizes per category. Every category is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryTotals {
    sizes: BTreeMap<Category, u64>,
}

impl Default for CategoryTotals {
    fn default() -> Self {
        Self {
            sizes: Category::ALL.into_iter().map(|c| (c, 0)).collect(),
        }
    }
}

impl CategoryTotals {
    /// Total every record of an inventory.
    #[must_use]
    pub fn from_inventory(inventory: &Inventory) -> Self {
        let mut totals = Self::default();
        for record in inventory {
            totals.add(Category::of_file_name(record.name()), record.size());
        }
        totals
    }

    pub fn add(&mut self, category: Category, bytes: u64) {
        *self.sizes.entry(category).or_insert(0) += bytes;
    }

    #[must_use]
    pub fn get(&self, category: Category) -> u64 {
        self.sizes.get(&category).copied().unwrap_or(0)
    }

    /// `(category, bytes)` in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.sizes.iter().map(|(c, b)| (*c, *b))
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.sizes.values().sum()
    }
}
