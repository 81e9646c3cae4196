//! Extraction operation reporting.

use std::time::Duration;

use crate::formats::detect::Format;

/// Report of an archive extraction operation.
///
/// Contains statistics and metadata about the extraction process.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Format the input was identified as.
    pub format: Option<Format>,

    /// Number of regular files written.
    pub files_extracted: usize,

    /// Number of directory entries applied (including ones that existed).
    pub directories_created: usize,

    /// Number of symlinks created.
    pub symlinks_created: usize,

    /// Number of hard links created.
    pub hardlinks_created: usize,

    /// Number of entries skipped (symlinks without a target).
    pub entries_skipped: usize,

    /// Total bytes written to regular files.
    pub bytes_written: u64,

    /// Duration of the extraction operation.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries materialized on disk.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted
            + self.directories_created
            + self.symlinks_created
            + self.hardlinks_created
    }
}
