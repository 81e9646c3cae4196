//! High-level public API for archive extraction.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;

use crate::ExtractOptions;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::extraction::extract;
use crate::formats::detect::identify;
use crate::io::Input;

/// Identifies and extracts an archive read from a forward-only stream.
///
/// This is what the `unarc` binary runs on standard input. The format is
/// detected from content only; the stream is buffered in memory before
/// extraction.
///
/// # Arguments
///
/// * `reader` - Archive bytes (a pipe, a socket, stdin)
/// * `dest` - Directory where entries are created; created if missing
/// * `options` - Extraction options
///
/// # Errors
///
/// Returns an error if:
/// - The format cannot be identified
/// - The format is a bare compressed stream
/// - Any entry fails to extract
///
/// # Examples
///
/// ```no_run
/// use unarc_core::ExtractOptions;
/// use unarc_core::extract_stream;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let stdin = std::io::stdin();
/// let report = extract_stream(stdin.lock(), "/tmp/output", &ExtractOptions::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_stream<R: Read, P: AsRef<Path>>(
    reader: R,
    dest: P,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let (format, input) = identify(Input::stream(reader))?;
    extract(format, input, dest.as_ref(), options)
}

/// Identifies and extracts an archive file.
///
/// The file is read in place (seekable); nothing is buffered in memory.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, or for any reason
/// [`extract_stream`] fails.
///
/// # Examples
///
/// ```no_run
/// use unarc_core::ExtractOptions;
/// use unarc_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_archive("archive.tar.gz", "/tmp/output", &ExtractOptions::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    dest: Q,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let archive_path = archive_path.as_ref();
    let file = File::open(archive_path).map_err(ExtractionError::Io)?;
    let (format, input) = identify(Input::seekable(BufReader::new(file)))?;
    extract(format, input, dest.as_ref(), options)
}
