//! Recording reader for rewinding forward-only streams.
//!
//! Format detection has to look at the start of a stream that may not
//! support seeking (a pipe). `RewindReader` remembers every byte it hands
//! out so the stream can be replayed from the beginning afterwards.

use std::io;
use std::io::Chain;
use std::io::Cursor;
use std::io::Read;

/// Reader that records everything read through it.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use unarc_core::io::RewindReader;
///
/// let mut reader = RewindReader::new(&b"Hello, World!"[..]);
/// let mut head = [0u8; 5];
/// reader.read_exact(&mut head)?;
/// assert_eq!(&head, b"Hello");
///
/// let mut all = String::new();
/// reader.rewound().read_to_string(&mut all)?;
/// assert_eq!(all, "Hello, World!");
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RewindReader<R> {
    /// Inner reader being wrapped
    inner: R,
    /// Every byte returned by `read` so far
    recorded: Vec<u8>,
}

impl<R> RewindReader<R> {
    /// Creates a new recording reader.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            recorded: Vec::new(),
        }
    }

    /// Returns the bytes read so far.
    #[must_use]
    pub fn recorded(&self) -> &[u8] {
        &self.recorded
    }
}

impl<R: Read> RewindReader<R> {
    /// Consumes the recorder, returning a reader positioned at the start of
    /// the original stream: recorded bytes first, then the unread rest.
    pub fn rewound(self) -> Chain<Cursor<Vec<u8>>, R> {
        Cursor::new(self.recorded).chain(self.inner)
    }
}

impl<R: Read> Read for RewindReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.recorded.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}
