//! Core extraction engine.
//!
//! Walks the entries of an opened archive and applies each one to the
//! destination directory, strictly in the order the format yields them. The first failing entry aborts the
//! walk; nothing already written is rolled back.

use std::path::Path;
use std::time::Instant;

use log::debug;
use log::trace;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::formats::common;
use crate::formats::detect::Format;
use crate::io::Input;
use crate::types::ArchiveEntry;
use crate::types::DestDir;
use crate::types::EntryType;
use crate::types::mask_mode;

/// Extracts an identified input into `dest`.
///
/// The input is materialized for random access first (forward-only streams
/// are buffered in memory), then the destination root is created, then the
/// format's extractor is opened and every entry applied.
///
/// # Errors
///
/// - [`ExtractionError::NotExtractable`] if `format` is a bare compressed
///   stream
/// - [`ExtractionError::EmptySymlink`] for a symlink without target when
///   `options.skip_empty_symlink` is off
/// - [`ExtractionError::Filesystem`] for any failed filesystem action
/// - [`ExtractionError::InvalidArchive`] / [`ExtractionError::Io`] if the
///   archive cannot be decoded
///
/// # Examples
///
/// ```no_run
/// use unarc_core::ExtractOptions;
/// use unarc_core::extraction::extract;
/// use unarc_core::formats::identify;
/// use unarc_core::io::Input;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("archive.tar.gz")?;
/// let (format, input) = identify(Input::seekable(file))?;
/// let report = extract(format, input, "out".as_ref(), &ExtractOptions::default())?;
/// println!("{} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract(
    format: Format,
    input: Input<'_>,
    dest: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let start = Instant::now();

    let source = input.into_random_access()?;
    let dest = DestDir::create(dest)?;
    let extractor = format
        .extractor()
        .ok_or_else(|| ExtractionError::NotExtractable {
            format: format.name().to_string(),
        })?;

    let format_name = extractor.format_name();
    let mut engine = ExtractionEngine::new(dest, options.clone());
    extractor.for_each_entry(source, |entry| engine.apply(entry, format_name))?;

    let mut report = engine.into_report();
    report.format = Some(format);
    report.duration = start.elapsed();

    debug!(
        "extracted {} entries ({} bytes) from {format} in {:?}",
        report.total_items(),
        report.bytes_written,
        report.duration
    );

    Ok(report)
}

/// Applies archive entries to a destination directory.
pub struct ExtractionEngine {
    dest: DestDir,
    options: ExtractOptions,
    buffer: CopyBuffer,
    report: ExtractionReport,
}

impl ExtractionEngine {
    /// Creates an engine writing under `dest`.
    #[must_use]
    pub fn new(dest: DestDir, options: ExtractOptions) -> Self {
        Self {
            dest,
            options,
            buffer: CopyBuffer::new(),
            report: ExtractionReport::new(),
        }
    }

    /// Returns the statistics gathered so far.
    #[must_use]
    pub fn report(&self) -> &ExtractionReport {
        &self.report
    }

    /// Consumes the engine, returning its statistics.
    #[must_use]
    pub fn into_report(self) -> ExtractionReport {
        self.report
    }

    /// Materializes one entry under the destination.
    ///
    /// `format` names the archive format in [`ExtractionError::EmptySymlink`].
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem action fails or the entry is a
    /// symlink without target while skipping is disabled.
    pub fn apply(&mut self, entry: &mut ArchiveEntry<'_>, format: &str) -> Result<()> {
        let path = self.dest.join(entry.path());
        let mode = mask_mode(entry.mode);
        debug!("{} {} ({mode:o})", entry.entry_type, entry.path().display());

        if self.options.create_parents && !entry.entry_type.is_directory() {
            common::create_parent(&path)?;
        }

        match &entry.entry_type {
            EntryType::Directory => {
                common::create_directory(&path, mode)?;
                self.report.directories_created += 1;
            }
            EntryType::Symlink { target } if target.as_os_str().is_empty() => {
                if !self.options.skip_empty_symlink {
                    return Err(ExtractionError::EmptySymlink {
                        format: format.to_string(),
                        path: entry.path.clone(),
                    });
                }
                debug!("skipping symlink without target: {}", entry.path().display());
                self.report.entries_skipped += 1;
            }
            EntryType::Symlink { target } => {
                common::create_symlink(target, &path)?;
                self.report.symlinks_created += 1;
            }
            EntryType::Hardlink { target } => {
                common::create_hardlink(&self.dest.join(target), &path)?;
                self.report.hardlinks_created += 1;
            }
            EntryType::File => {
                let written = common::write_file(entry.content(), &path, mode, &mut self.buffer)?;
                trace!("wrote {written} bytes to {}", path.display());
                self.report.files_extracted += 1;
                self.report.bytes_written += written;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::formats::compression::CompressionCodec;
    use crate::formats::detect::ArchiveType;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::compress;
    use std::io::Cursor;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    const TAR: Format = Format::Archive(ArchiveType::Tar);

    fn run(data: Vec<u8>, dest: &Path, options: &ExtractOptions) -> Result<ExtractionReport> {
        extract(TAR, Input::stream(Cursor::new(data)), dest, options)
    }

    #[test]
    fn test_extract_counts_entries() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_directory("a/")
            .add_file("a/b.txt", b"hello")
            .add_symlink("a/c", "b.txt")
            .add_symlink("a/empty", "")
            .build();

        let report = run(data, temp.path(), &ExtractOptions::default()).unwrap();

        assert_eq!(report.format, Some(TAR));
        assert_eq!(report.directories_created, 1);
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.symlinks_created, 1);
        assert_eq!(report.entries_skipped, 1);
        assert_eq!(report.bytes_written, 5);
    }

    #[test]
    fn test_bare_compressed_stream_not_extractable() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");
        let format = Format::Compressed(CompressionCodec::Gzip);
        let data = compress(CompressionCodec::Gzip, b"text");

        let err = extract(
            format,
            Input::stream(Cursor::new(data)),
            &dest,
            &ExtractOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, ExtractionError::NotExtractable { ref format } if format == "gz"));
        assert_eq!(err.to_string(), "gz is not extractable");
        // the destination root is created before the capability check
        assert!(dest.is_dir());
    }

    #[test]
    fn test_destination_root_created_with_parents() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("x/y/z");
        let data = TarTestBuilder::new().add_file("f", b"1").build();

        run(data, &dest, &ExtractOptions::default()).unwrap();
        assert_eq!(std::fs::read(dest.join("f")).unwrap(), b"1");
    }

    #[test]
    fn test_empty_symlink_rejected_when_not_skipping() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new().add_symlink("dangling", "").build();
        let options = ExtractOptions::default().with_skip_empty_symlink(false);

        let err = run(data, temp.path(), &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "symlink is not supported for tar: dangling"
        );
        assert!(std::fs::symlink_metadata(temp.path().join("dangling")).is_err());
    }

    #[test]
    fn test_first_error_aborts_walk() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("first", b"1")
            .add_file("missing/second", b"2")
            .add_file("third", b"3")
            .build();

        let err = run(data, temp.path(), &ExtractOptions::default()).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
        assert!(temp.path().join("first").exists());
        assert!(!temp.path().join("third").exists());
    }

    #[test]
    fn test_create_parents_option() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("deep/nested/file", b"x")
            .add_symlink("links/l", "../deep/nested/file")
            .build();
        let options = ExtractOptions::default().with_create_parents(true);

        run(data, temp.path(), &options).unwrap();
        assert_eq!(
            std::fs::read(temp.path().join("links/l")).unwrap(),
            b"x"
        );
    }

    #[test]
    fn test_hardlink_resolves_against_destination() {
        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file("original", b"shared")
            .add_hardlink("copy", "original")
            .build();

        let report = run(data, temp.path(), &ExtractOptions::default()).unwrap();
        assert_eq!(report.hardlinks_created, 1);
        assert_eq!(std::fs::read(temp.path().join("copy")).unwrap(), b"shared");
    }

    #[cfg(unix)]
    #[test]
    fn test_modes_are_masked() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let data = TarTestBuilder::new()
            .add_file_with_mode("open.sh", b"#!/bin/sh\n", 0o777)
            .build();

        run(data, temp.path(), &ExtractOptions::default()).unwrap();

        let mode = std::fs::metadata(temp.path().join("open.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o7777, 0o755);
    }

    #[test]
    fn test_engine_report_accumulates() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::create(temp.path()).unwrap();
        let mut engine = ExtractionEngine::new(dest, ExtractOptions::default());
        let data = TarTestBuilder::new().add_directory("d/").build();

        crate::formats::Extractor::Tar(None)
            .for_each_entry(Cursor::new(data), |entry| engine.apply(entry, "tar"))
            .unwrap();
        assert_eq!(engine.report().directories_created, 1);
    }
}
