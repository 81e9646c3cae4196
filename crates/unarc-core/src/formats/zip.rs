//! ZIP archive entry stream.
//!
//! Entries are visited in central directory order. Unix mode bits come from
//! the external attributes when the archive was written on a Unix host; a
//! symlink is an entry whose mode has the link file type, with the target
//! stored as the entry content.

use std::io::Read;
use std::io::Seek;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::formats::traits::EntryStream;
use crate::types::ArchiveEntry;
use crate::types::EntryType;

/// File type bits of a Unix mode.
const S_IFMT: u32 = 0o170_000;
/// File type of a symbolic link.
const S_IFLNK: u32 = 0o120_000;

/// Mode used for directories without stored Unix permissions.
const DEFAULT_DIR_MODE: u32 = 0o777;
/// Mode used for files without stored Unix permissions.
const DEFAULT_FILE_MODE: u32 = 0o666;

/// Entries of a ZIP archive.
pub struct ZipEntries<'a, R: Read + Seek> {
    archive: &'a mut zip::ZipArchive<R>,
    index: usize,
}

impl<'a, R: Read + Seek> ZipEntries<'a, R> {
    /// Starts iterating `archive` from its first entry.
    pub fn new(archive: &'a mut zip::ZipArchive<R>) -> Self {
        Self { archive, index: 0 }
    }
}

impl<R: Read + Seek> EntryStream for ZipEntries<'_, R> {
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry<'_>>> {
        if self.index >= self.archive.len() {
            return Ok(None);
        }

        let mut file = self.archive.by_index(self.index).map_err(invalid)?;
        self.index += 1;

        let path = PathBuf::from(file.name());
        let stored_mode = file.unix_mode();

        if file.is_dir() {
            let mode = stored_mode.unwrap_or(DEFAULT_DIR_MODE);
            return Ok(Some(ArchiveEntry::without_content(
                path,
                mode,
                EntryType::Directory,
            )));
        }

        match stored_mode {
            Some(mode) if mode & S_IFMT == S_IFLNK => {
                let mut target = Vec::new();
                file.read_to_end(&mut target).map_err(|e| {
                    ExtractionError::InvalidArchive(format!(
                        "failed to read ZIP symlink target {}: {e}",
                        path.display()
                    ))
                })?;
                let target = PathBuf::from(String::from_utf8_lossy(&target).into_owned());
                Ok(Some(ArchiveEntry::without_content(
                    path,
                    mode,
                    EntryType::Symlink { target },
                )))
            }
            mode => Ok(Some(ArchiveEntry::new(
                path,
                mode.unwrap_or(DEFAULT_FILE_MODE),
                EntryType::File,
                Box::new(file),
            ))),
        }
    }
}

/// Opens the central directory of a ZIP archive.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidArchive`] if the central directory
/// cannot be read.
pub fn open_archive<R: Read + Seek>(reader: R) -> Result<zip::ZipArchive<R>> {
    zip::ZipArchive::new(reader).map_err(invalid)
}

fn invalid(e: zip::result::ZipError) -> ExtractionError {
    ExtractionError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use std::io::Cursor;
    use std::path::Path;

    fn open(data: Vec<u8>) -> zip::ZipArchive<Cursor<Vec<u8>>> {
        open_archive(Cursor::new(data)).unwrap()
    }

    #[test]
    fn test_maps_files_and_directories() {
        let mut archive = open(
            ZipTestBuilder::new()
                .add_directory("a/")
                .add_file_with_mode("a/b.txt", b"hello", 0o600)
                .build(),
        );
        let mut entries = ZipEntries::new(&mut archive);

        let dir = entries.next_entry().unwrap().unwrap();
        assert_eq!(dir.path(), Path::new("a/"));
        assert_eq!(dir.entry_type, EntryType::Directory);
        assert_eq!(dir.mode & 0o777, 0o755);
        drop(dir);

        let mut file = entries.next_entry().unwrap().unwrap();
        assert_eq!(file.entry_type, EntryType::File);
        assert_eq!(file.mode & 0o777, 0o600);
        let mut content = String::new();
        file.content().read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
        drop(file);

        assert!(entries.next_entry().unwrap().is_none());
    }

    #[test]
    fn test_symlink_target_from_content() {
        let mut archive = open(ZipTestBuilder::new().add_symlink("link", "target.txt").build());
        let mut entries = ZipEntries::new(&mut archive);

        let link = entries.next_entry().unwrap().unwrap();
        assert_eq!(
            link.entry_type,
            EntryType::Symlink {
                target: PathBuf::from("target.txt")
            }
        );
    }

    #[test]
    fn test_symlink_with_empty_content() {
        let mut archive = open(ZipTestBuilder::new().add_symlink("link", "").build());
        let mut entries = ZipEntries::new(&mut archive);

        let link = entries.next_entry().unwrap().unwrap();
        assert_eq!(
            link.entry_type,
            EntryType::Symlink {
                target: PathBuf::new()
            }
        );
    }

    #[test]
    fn test_invalid_central_directory() {
        let err = open_archive(Cursor::new(b"PK\x03\x04 not really a zip".to_vec())).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidArchive(_)));
    }

    #[test]
    fn test_empty_archive_has_no_entries() {
        let mut archive = open(ZipTestBuilder::new().build());
        let mut entries = ZipEntries::new(&mut archive);
        assert!(entries.next_entry().unwrap().is_none());
    }
}
