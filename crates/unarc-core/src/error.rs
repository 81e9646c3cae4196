//! Error types for archive extraction operations.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ExtractionError`.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Filesystem action that failed while materializing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    /// Creating a directory (or its parents).
    CreateDir,
    /// Creating or truncating a regular file.
    CreateFile,
    /// Applying permission bits.
    SetPermissions,
    /// Copying entry content into a file.
    WriteFile,
    /// Creating a symbolic link.
    CreateSymlink,
    /// Creating a hard link.
    CreateHardlink,
}

impl fmt::Display for FsOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Self::CreateDir => "create directory",
            Self::CreateFile => "create file",
            Self::SetPermissions => "set permissions on",
            Self::WriteFile => "write file",
            Self::CreateSymlink => "create symlink",
            Self::CreateHardlink => "create hard link",
        };
        f.write_str(action)
    }
}

/// Errors that can occur during format detection and extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// I/O operation on the input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input could not be identified as any known format.
    #[error("unrecognized archive format")]
    UnrecognizedFormat,

    /// Input was identified, but the format has no container to extract
    /// (for example a bare gzip stream).
    #[error("{format} is not extractable")]
    NotExtractable {
        /// Name of the identified format.
        format: String,
    },

    /// Symlink entry without a stored target, and skipping is disabled.
    #[error("symlink is not supported for {format}: {path}")]
    EmptySymlink {
        /// Name of the archive format.
        format: String,
        /// Entry name in the archive.
        path: PathBuf,
    },

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Creating or writing an object under the destination failed.
    #[error("failed to {op} {path}: {source}")]
    Filesystem {
        /// Action that failed.
        op: FsOp,
        /// Path on disk the action targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl ExtractionError {
    /// Wraps an I/O error with the action and path it happened on.
    pub fn fs(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error comes from identifying or decoding the
    /// input rather than from writing to the destination.
    ///
    /// # Examples
    ///
    /// ```
    /// use unarc_core::ExtractionError;
    ///
    /// assert!(ExtractionError::UnrecognizedFormat.is_format_error());
    /// let err = ExtractionError::NotExtractable {
    ///     format: "gz".into(),
    /// };
    /// assert!(err.is_format_error());
    /// ```
    #[must_use]
    pub const fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedFormat
                | Self::NotExtractable { .. }
                | Self::EmptySymlink { .. }
                | Self::InvalidArchive(_)
        )
    }

    /// Returns the path associated with this error, if any.
    ///
    /// For filesystem errors this is the on-disk path; for entry errors it
    /// is the name inside the archive.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Filesystem { path, .. } | Self::EmptySymlink { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Returns the underlying OS error kind for I/O and filesystem errors.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(e) | Self::Filesystem { source: e, .. } => Some(e.kind()),
            _ => None,
        }
    }
}
