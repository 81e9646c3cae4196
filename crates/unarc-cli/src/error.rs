//! Error conversion utilities for CLI.
//!
//! Converts unarc-core's typed errors (thiserror) into user-facing
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::io::ErrorKind;
use std::path::Path;
use unarc_core::ExtractionError;

/// Converts `ExtractionError` to a user-facing anyhow error with context.
pub fn convert_extraction_error(err: ExtractionError, dest: &Path) -> anyhow::Error {
    match err {
        ExtractionError::UnrecognizedFormat => {
            anyhow!(
                "unrecognized archive format on standard input\n\
                 HINT: Supported formats: tar, tar.gz, tar.bz2, tar.xz, tar.zst, zip, 7z"
            )
        }
        ExtractionError::NotExtractable { format } => {
            anyhow!(
                "{format} is not extractable: the input is a compressed stream, not an archive\n\
                 HINT: Decompress it with the matching tool instead."
            )
        }
        ExtractionError::EmptySymlink { format, path } => {
            anyhow!(
                "symlink is not supported for {format}: {}\n\
                 HINT: Use --skip-empty-symlink true to skip symlinks without a target.",
                path.display()
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "invalid archive: {reason}\n\
                 HINT: The archive may be corrupted or truncated."
            )
        }
        err @ ExtractionError::Filesystem { .. } if err.io_kind() == Some(ErrorKind::NotFound) => {
            anyhow::Error::from(err).context(format!(
                "extraction into '{}' failed\n\
                 HINT: The archive may list an entry before its parent directory.",
                dest.display()
            ))
        }
        _ => anyhow::Error::from(err)
            .context(format!("extraction into '{}' failed", dest.display())),
    }
}

/// Adds destination context to a library result.
pub fn add_dest_context<T>(result: Result<T, ExtractionError>, dest: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, dest))
}
