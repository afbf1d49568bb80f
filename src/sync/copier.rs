//! Copy primitive used to apply a reconciliation plan.

use std::fs;
use std::io;
use std::path::Path;

use filetime::FileTime;

/// Copies one file, leaving the destination with the source's modification time.
pub trait FileCopier: Send + Sync {
    /// Copy `from` onto `to`, creating or replacing `to`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if reading, writing or setting the
    /// timestamp fails.
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Byte copy followed by restoring the source mtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreservingCopier;

impl FileCopier for PreservingCopier {
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let metadata = fs::metadata(from)?;
        fs::copy(from, to)?;
        filetime::set_file_mtime(to, FileTime::from_last_modification_time(&metadata))?;
        Ok(())
    }
}
