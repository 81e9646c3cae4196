//! Entry content copy with a reusable buffer.
//!
//! One [`CopyBuffer`] is allocated per extraction and shared by every file
//! entry, instead of the per-call buffer `std::io::copy` uses.

use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionError;
use crate::error::FsOp;

/// Buffer size for entry copies (64KB).
///
/// This matches typical filesystem block sizes.
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Heap buffer reused across copy operations.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unarc_core::copy::{CopyBuffer, copy_with_buffer};
///
/// # fn main() -> unarc_core::Result<()> {
/// let mut buffer = CopyBuffer::new();
/// let mut output = Vec::new();
/// let copied = copy_with_buffer(&mut &b"data"[..], &mut output, &mut buffer, Path::new("out"))?;
/// assert_eq!(copied, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Allocates a zeroed copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer` through `buffer`, returning the byte count.
///
/// `dest` names the file being written and is attached to write failures.
///
/// # Errors
///
/// Read failures (a corrupt or truncated entry) are returned as
/// [`ExtractionError::Io`]; write failures as
/// [`ExtractionError::Filesystem`] naming `dest`.
pub fn copy_with_buffer<R, W>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
    dest: &Path,
) -> Result<u64, ExtractionError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ExtractionError::Io(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(|e| ExtractionError::fs(FsOp::WriteFile, dest, e))?;

        total += bytes_read as u64;
    }

    Ok(total)
}
