//! Test utilities for building archives in memory.
//!
//! These helpers are shared by unit tests, integration tests, doctests and
//! benchmarks.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use crate::formats::compression::CompressionCodec;

/// Creates an in-memory TAR archive of regular files with mode 0o644.
///
/// # Examples
///
/// ```
/// use unarc_core::test_utils::create_test_tar;
///
/// let tar_data = create_test_tar(vec![("file.txt", b"hello"), ("dir/nested.txt", b"world")]);
/// assert_eq!(tar_data.len() % 512, 0);
/// ```
#[must_use]
pub fn create_test_tar(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(TarTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Creates an in-memory ZIP archive of stored files with mode 0o644.
///
/// # Examples
///
/// ```
/// use unarc_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("file.txt", b"hello")]);
/// assert!(zip_data.starts_with(b"PK\x03\x04"));
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Compresses `data` with `codec`.
///
/// # Examples
///
/// ```
/// use unarc_core::formats::compression::CompressionCodec;
/// use unarc_core::test_utils::compress;
///
/// let gz = compress(CompressionCodec::Gzip, b"payload");
/// assert_eq!(CompressionCodec::from_magic(&gz), Some(CompressionCodec::Gzip));
/// ```
#[must_use]
pub fn compress(codec: CompressionCodec, data: &[u8]) -> Vec<u8> {
    match codec {
        CompressionCodec::Gzip => {
            let mut encoder =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        CompressionCodec::Bzip2 => {
            let mut encoder =
                bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        CompressionCodec::Xz => {
            let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
            encoder.write_all(data).unwrap();
            encoder.finish().unwrap()
        }
        CompressionCodec::Zstd => zstd::encode_all(data, 0).unwrap(),
    }
}

/// Builder for TAR test archives with arbitrary entry types.
///
/// # Examples
///
/// ```
/// use unarc_core::test_utils::TarTestBuilder;
///
/// let tar_data = TarTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .add_symlink("dir/link", "file.txt")
///     .build();
/// ```
pub struct TarTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory with mode 0o755.
    #[must_use]
    pub fn add_directory(self, path: &str) -> Self {
        self.add_directory_with_mode(path, 0o755)
    }

    /// Adds a directory with a custom mode.
    #[must_use]
    pub fn add_directory_with_mode(self, path: &str, mode: u32) -> Self {
        self.add_empty(path, mode, tar::EntryType::Directory, None)
    }

    /// Adds a symlink. An empty `target` leaves the link name field blank.
    #[must_use]
    pub fn add_symlink(self, path: &str, target: &str) -> Self {
        self.add_empty(path, 0o777, tar::EntryType::Symlink, Some(target))
    }

    /// Adds a hard link to an earlier entry.
    #[must_use]
    pub fn add_hardlink(self, path: &str, target: &str) -> Self {
        self.add_empty(path, 0o644, tar::EntryType::Link, Some(target))
    }

    /// Adds a data-less entry of the given type (fifo, device, ...).
    #[must_use]
    pub fn add_special(self, path: &str, entry_type: tar::EntryType) -> Self {
        self.add_empty(path, 0o644, entry_type, None)
    }

    fn add_empty(
        mut self,
        path: &str,
        mode: u32,
        entry_type: tar::EntryType,
        link: Option<&str>,
    ) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(mode);
        header.set_entry_type(entry_type);
        if let Some(link) = link.filter(|link| !link.is_empty()) {
            header.set_link_name(link).unwrap();
        }
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }
}

impl Default for TarTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ZIP test archives.
///
/// # Examples
///
/// ```
/// use unarc_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("dir/")
///     .add_file("dir/file.txt", b"content")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored file with mode 0o644.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a stored file with a custom mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(mode);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a deflate-compressed file with mode 0o644.
    #[must_use]
    pub fn add_deflated_file(mut self, path: &str, data: &[u8]) -> Self {
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Adds a directory with mode 0o755.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let options = zip::write::SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Adds a symlink whose target is stored as the entry content.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let options = zip::write::SimpleFileOptions::default();
        self.zip.add_symlink(path, target, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for 7z test archives.
///
/// Modes are stored the way p7zip stores them: the unix mode in the high
/// 16 bits of the Windows attributes, flagged by `0x8000`.
///
/// # Examples
///
/// ```
/// use unarc_core::test_utils::SevenZTestBuilder;
///
/// let data = SevenZTestBuilder::new()
///     .add_directory("dir")
///     .add_file("dir/file.txt", b"content")
///     .build();
/// assert!(data.starts_with(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]));
/// ```
pub struct SevenZTestBuilder {
    writer: sevenz_rust2::ArchiveWriter<Cursor<Vec<u8>>>,
}

impl SevenZTestBuilder {
    const UNIX_EXTENSION: u32 = 0x8000;
    const DIRECTORY: u32 = 0x10;
    const REPARSE_POINT: u32 = 0x400;

    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: sevenz_rust2::ArchiveWriter::new(Cursor::new(Vec::new())).unwrap(),
        }
    }

    /// Adds a file without a unix mode.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let entry = sevenz_rust2::ArchiveEntry::new_file(path);
        self.writer.push_archive_entry(entry, Some(data)).unwrap();
        self
    }

    /// Adds a file with a unix mode.
    #[must_use]
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut entry = sevenz_rust2::ArchiveEntry::new_file(path);
        entry.has_windows_attributes = true;
        entry.windows_attributes = Self::UNIX_EXTENSION | ((0o100_000 | mode) << 16);
        self.writer.push_archive_entry(entry, Some(data)).unwrap();
        self
    }

    /// Adds a directory without a unix mode.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let entry = sevenz_rust2::ArchiveEntry::new_directory(path);
        self.writer.push_archive_entry(entry, None::<&[u8]>).unwrap();
        self
    }

    /// Adds a directory with a unix mode.
    #[must_use]
    pub fn add_directory_with_mode(mut self, path: &str, mode: u32) -> Self {
        let mut entry = sevenz_rust2::ArchiveEntry::new_directory(path);
        entry.has_windows_attributes = true;
        entry.windows_attributes =
            Self::DIRECTORY | Self::UNIX_EXTENSION | ((0o040_000 | mode) << 16);
        self.writer.push_archive_entry(entry, None::<&[u8]>).unwrap();
        self
    }

    /// Adds a unix symlink whose target is stored as the entry content.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut entry = sevenz_rust2::ArchiveEntry::new_file(path);
        entry.has_windows_attributes = true;
        entry.windows_attributes = Self::UNIX_EXTENSION | (0o120_777 << 16);
        self.writer
            .push_archive_entry(entry, Some(target.as_bytes()))
            .unwrap();
        self
    }

    /// Adds a Windows reparse point (symlink or junction) with no data.
    #[must_use]
    pub fn add_reparse_point(mut self, path: &str) -> Self {
        let mut entry = sevenz_rust2::ArchiveEntry::new_file(path);
        entry.has_windows_attributes = true;
        entry.windows_attributes = Self::REPARSE_POINT;
        self.writer.push_archive_entry(entry, None::<&[u8]>).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

impl Default for SevenZTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
