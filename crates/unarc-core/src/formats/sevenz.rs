//! 7z archive entries.
//!
//! The decoder pushes entries through a callback one solid block at a time,
//! and reports entries without data (directories, empty files) only after
//! every block. Directories are therefore read from the archive header and
//! visited first, in header order; every other entry follows in decode
//! order.
//!
//! # Entry types
//!
//! Archives written by p7zip store the unix mode in the high 16 bits of the
//! Windows attributes, flagged by `FILE_ATTRIBUTE_UNIX_EXTENSION`:
//!
//! - `S_IFLNK` in that mode marks a symlink whose target is the entry data
//! - a Windows reparse point without a unix mode is a symlink whose target
//!   was not recorded, so it has an empty target
//! - everything else is a directory or a regular file
//!
//! Without a unix mode, files get `0o666` and directories `0o777`.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::PathBuf;

use log::trace;
use sevenz_rust2::Archive;
use sevenz_rust2::ArchiveReader;
use sevenz_rust2::Password;

use crate::ExtractionError;
use crate::Result;
use crate::types::ArchiveEntry;
use crate::types::EntryType;

const FILE_ATTRIBUTE_REPARSE_POINT: u32 = 0x0000_0400;
const FILE_ATTRIBUTE_UNIX_EXTENSION: u32 = 0x0000_8000;

const S_IFMT: u32 = 0o170_000;
const S_IFLNK: u32 = 0o120_000;

const DEFAULT_FILE_MODE: u32 = 0o666;
const DEFAULT_DIR_MODE: u32 = 0o777;

/// Reads every entry of the 7z archive in `source` and hands it to `visit`.
///
/// Stops at the first error returned by `visit` and returns it unchanged.
///
/// # Errors
///
/// Returns [`ExtractionError::InvalidArchive`] if the archive cannot be
/// decoded (including encrypted archives), or whatever `visit` returns.
pub fn for_each_entry<S, F>(mut source: S, mut visit: F) -> Result<()>
where
    S: Read + Seek,
    F: FnMut(&mut ArchiveEntry<'_>) -> Result<()>,
{
    let start = source.stream_position()?;
    let archive = Archive::read(&mut source, &Password::empty()).map_err(invalid)?;
    trace!("7z header lists {} entries", archive.files.len());

    for entry in archive.files.iter().filter(|entry| entry.is_directory()) {
        let mode = unix_mode(entry).unwrap_or(DEFAULT_DIR_MODE);
        visit(&mut ArchiveEntry::without_content(
            entry.name.clone(),
            mode,
            EntryType::Directory,
        ))?;
    }
    source.seek(SeekFrom::Start(start))?;

    let mut reader = ArchiveReader::new(source, Password::empty()).map_err(invalid)?;
    let mut failure = None;
    reader
        .for_each_entries(|entry: &sevenz_rust2::ArchiveEntry, content: &mut dyn Read| {
            if entry.is_directory() {
                return Ok(true);
            }
            match visit_content(entry, content, &mut visit) {
                Ok(()) => Ok(true),
                Err(e) => {
                    failure = Some(e);
                    Ok(false)
                }
            }
        })
        .map_err(invalid)?;

    failure.map_or(Ok(()), Err)
}

fn visit_content<F>(
    entry: &sevenz_rust2::ArchiveEntry,
    content: &mut dyn Read,
    visit: &mut F,
) -> Result<()>
where
    F: FnMut(&mut ArchiveEntry<'_>) -> Result<()>,
{
    let path = PathBuf::from(&entry.name);
    let mode = unix_mode(entry);

    if mode.is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
        let mut target = Vec::new();
        content.read_to_end(&mut target)?;
        let target = PathBuf::from(String::from_utf8_lossy(&target).into_owned());
        return visit(&mut ArchiveEntry::without_content(
            path,
            mode.unwrap_or(DEFAULT_FILE_MODE),
            EntryType::Symlink { target },
        ));
    }

    if is_windows_reparse_point(entry) {
        return visit(&mut ArchiveEntry::without_content(
            path,
            DEFAULT_FILE_MODE,
            EntryType::Symlink {
                target: PathBuf::new(),
            },
        ));
    }

    visit(&mut ArchiveEntry::new(
        path,
        mode.unwrap_or(DEFAULT_FILE_MODE),
        EntryType::File,
        Box::new(content),
    ))
}

/// Unix mode stored in the high half of the Windows attributes, if any.
fn unix_mode(entry: &sevenz_rust2::ArchiveEntry) -> Option<u32> {
    (entry.has_windows_attributes
        && entry.windows_attributes & FILE_ATTRIBUTE_UNIX_EXTENSION != 0)
        .then_some(entry.windows_attributes >> 16)
}

fn is_windows_reparse_point(entry: &sevenz_rust2::ArchiveEntry) -> bool {
    entry.has_windows_attributes
        && entry.windows_attributes & FILE_ATTRIBUTE_REPARSE_POINT != 0
}

fn invalid(e: sevenz_rust2::Error) -> ExtractionError {
    ExtractionError::InvalidArchive(format!("failed to read 7z archive: {e}"))
}
