//! Archive entry records.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

/// Type of entry in an archive.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use unarc_core::types::EntryType;
///
/// let file = EntryType::File;
/// let directory = EntryType::Directory;
/// let symlink = EntryType::Symlink {
///     target: PathBuf::from("b.txt"),
/// };
/// assert!(symlink.is_symlink());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// Regular file entry.
    File,

    /// Directory entry.
    Directory,

    /// Symbolic link entry.
    ///
    /// The target is stored verbatim and may be empty when the archive
    /// format did not record one.
    Symlink {
        /// The symlink target as stored in the archive.
        target: PathBuf,
    },

    /// Hard link entry; the target names another entry of the same archive.
    Hardlink {
        /// Name in the archive of the linked entry.
        target: PathBuf,
    },
}

impl EntryType {
    /// Returns `true` if this is a regular file.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Returns `true` if this is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Returns `true` if this is a symlink.
    #[must_use]
    pub const fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink { .. })
    }

    /// Returns `true` if this is a hardlink.
    #[must_use]
    pub const fn is_hardlink(&self) -> bool {
        matches!(self, Self::Hardlink { .. })
    }

    /// Short lowercase name, used in log lines.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink { .. } => "symlink",
            Self::Hardlink { .. } => "hardlink",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item yielded by an entry stream.
///
/// The entry borrows its content reader from the stream that produced it,
/// so it must be consumed (or dropped) before the next entry is requested.
pub struct ArchiveEntry<'a> {
    /// Name of the entry inside the archive.
    pub path: PathBuf,
    /// Permission bits as stored in the archive (unmasked).
    pub mode: u32,
    /// What kind of filesystem object the entry describes.
    pub entry_type: EntryType,
    content: Box<dyn Read + 'a>,
}

impl<'a> ArchiveEntry<'a> {
    /// Creates an entry with a content reader.
    pub fn new(
        path: impl Into<PathBuf>,
        mode: u32,
        entry_type: EntryType,
        content: Box<dyn Read + 'a>,
    ) -> Self {
        Self {
            path: path.into(),
            mode,
            entry_type,
            content,
        }
    }

    /// Creates an entry with no content (directories and links).
    pub fn without_content(path: impl Into<PathBuf>, mode: u32, entry_type: EntryType) -> Self {
        Self::new(path, mode, entry_type, Box::new(std::io::empty()))
    }

    /// Name of the entry inside the archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the content reader of this entry.
    pub fn content(&mut self) -> &mut (dyn Read + 'a) {
        &mut *self.content
    }
}

impl fmt::Debug for ArchiveEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveEntry")
            .field("path", &self.path)
            .field("mode", &format_args!("{:#o}", self.mode))
            .field("entry_type", &self.entry_type)
            .finish_non_exhaustive()
    }
}
