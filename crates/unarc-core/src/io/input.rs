//! Archive input with an explicit seekability capability.

use std::io;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;

use log::debug;

/// A reader that also supports seeking.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Byte source for an archive.
///
/// Whether the source supports random access is decided by whoever builds
/// the `Input`, not detected at runtime: files and in-memory buffers are
/// [`Input::Seekable`], pipes such as standard input are [`Input::Stream`].
pub enum Input<'a> {
    /// Source supporting `Seek` (regular files, cursors).
    Seekable(Box<dyn ReadSeek + 'a>),
    /// Forward-only source (pipes, sockets, decoders).
    Stream(Box<dyn Read + 'a>),
}

impl<'a> Input<'a> {
    /// Wraps a seekable source.
    pub fn seekable(reader: impl Read + Seek + 'a) -> Self {
        Self::Seekable(Box::new(reader))
    }

    /// Wraps a forward-only source.
    pub fn stream(reader: impl Read + 'a) -> Self {
        Self::Stream(Box::new(reader))
    }

    /// Returns `true` if the source supports random access.
    #[must_use]
    pub const fn is_seekable(&self) -> bool {
        matches!(self, Self::Seekable(_))
    }

    /// Returns a random-access reader over the whole input.
    ///
    /// Seekable sources are returned unchanged; forward-only sources are
    /// read to the end and buffered in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if reading a forward-only source fails.
    pub fn into_random_access(self) -> io::Result<Box<dyn ReadSeek + 'a>> {
        match self {
            Self::Seekable(reader) => Ok(reader),
            Self::Stream(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer)?;
                debug!("buffered {} bytes of non-seekable input", buffer.len());
                Ok(Box::new(Cursor::new(buffer)))
            }
        }
    }
}

impl std::fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seekable(_) => f.write_str("Input::Seekable(..)"),
            Self::Stream(_) => f.write_str("Input::Stream(..)"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::SeekFrom;

    #[test]
    fn test_seekable_passthrough() {
        let input = Input::seekable(Cursor::new(b"abc".to_vec()));
        assert!(input.is_seekable());

        let mut reader = input.into_random_access().unwrap();
        reader.seek(SeekFrom::Start(1)).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "bc");
    }

    #[test]
    fn test_stream_is_buffered() {
        let input = Input::stream(&b"forward only"[..]);
        assert!(!input.is_seekable());

        let mut reader = input.into_random_access().unwrap();
        let end = reader.seek(SeekFrom::End(0)).unwrap();
        assert_eq!(end, 12);

        reader.seek(SeekFrom::Start(8)).unwrap();
        let mut out = String::new();
        reader.read_to_string(&mut out).unwrap();
        assert_eq!(out, "only");
    }

    #[test]
    fn test_stream_read_error_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
            }
        }

        let err = Input::stream(Broken).into_random_access().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_debug_names_variant() {
        assert_eq!(format!("{:?}", Input::stream(io::empty())), "Input::Stream(..)");
    }
}
