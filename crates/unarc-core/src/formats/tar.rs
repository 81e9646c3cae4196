//! Tar archive entry stream.
//!
//! Wraps [`tar::Entries`] and maps each header onto an [`ArchiveEntry`].
//! GNU long-name and PAX extension records are metadata for the entry that
//! follows them and are never surfaced.

use std::io::Read;
use std::path::PathBuf;

use log::trace;

use crate::ExtractionError;
use crate::Result;
use crate::formats::traits::EntryStream;
use crate::types::ArchiveEntry;
use crate::types::EntryType;

/// Entries of a tar archive, in archive order.
pub struct TarEntries<'a, R: Read + 'a> {
    entries: tar::Entries<'a, R>,
}

impl<'a, R: Read + 'a> TarEntries<'a, R> {
    /// Starts iterating `archive`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive has already been partially read.
    pub fn new(archive: &'a mut tar::Archive<R>) -> Result<Self> {
        let entries = archive.entries().map_err(invalid)?;
        Ok(Self { entries })
    }
}

impl<'a, R: Read + 'a> EntryStream for TarEntries<'a, R> {
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry<'_>>> {
        loop {
            let Some(entry) = self.entries.next() else {
                return Ok(None);
            };
            let entry = entry.map_err(invalid)?;

            let path = entry.path().map_err(invalid)?.into_owned();
            let header = entry.header();
            let mode = header.mode().map_err(invalid)?;

            let entry_type = match header.entry_type() {
                tar::EntryType::Directory => EntryType::Directory,
                tar::EntryType::Symlink => EntryType::Symlink {
                    target: link_target(&entry)?.unwrap_or_default(),
                },
                tar::EntryType::Link => {
                    let target = link_target(&entry)?.ok_or_else(|| {
                        ExtractionError::InvalidArchive(format!(
                            "hard link without target: {}",
                            path.display()
                        ))
                    })?;
                    EntryType::Hardlink { target }
                }
                tar::EntryType::XGlobalHeader
                | tar::EntryType::XHeader
                | tar::EntryType::GNULongName
                | tar::EntryType::GNULongLink => {
                    trace!("skipping tar metadata record {}", path.display());
                    continue;
                }
                // Devices and FIFOs carry no data and become empty files.
                _ => EntryType::File,
            };

            let entry = if entry_type.is_file() {
                ArchiveEntry::new(path, mode, entry_type, Box::new(entry))
            } else {
                ArchiveEntry::without_content(path, mode, entry_type)
            };
            return Ok(Some(entry));
        }
    }
}

fn link_target<R: Read>(entry: &tar::Entry<'_, R>) -> Result<Option<PathBuf>> {
    let target = entry.link_name().map_err(invalid)?;
    Ok(target
        .map(std::borrow::Cow::into_owned)
        .filter(|target| !target.as_os_str().is_empty()))
}

fn invalid(e: std::io::Error) -> ExtractionError {
    ExtractionError::InvalidArchive(format!("failed to read TAR entry: {e}"))
}
