//! Common traits for archive format handlers.

use crate::Result;
use crate::types::ArchiveEntry;

/// Sequential reader over the entries of an open archive.
///
/// Each entry borrows the stream, so entries are handled one at a time in
/// archive order.
pub trait EntryStream {
    /// Returns the next entry, or `None` once the archive is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive is corrupted.
    fn next_entry(&mut self) -> Result<Option<ArchiveEntry<'_>>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::EntryType;

    struct Fixed {
        remaining: Vec<&'static str>,
    }

    impl EntryStream for Fixed {
        fn next_entry(&mut self) -> Result<Option<ArchiveEntry<'_>>> {
            Ok(self
                .remaining
                .pop()
                .map(|name| ArchiveEntry::without_content(name, 0o755, EntryType::Directory)))
        }
    }

    #[test]
    fn test_trait_implementation() {
        let mut stream = Fixed {
            remaining: vec!["b", "a"],
        };
        assert_eq!(stream.next_entry().unwrap().unwrap().path().to_str(), Some("a"));
        assert_eq!(stream.next_entry().unwrap().unwrap().path().to_str(), Some("b"));
        assert!(stream.next_entry().unwrap().is_none());
    }
}
