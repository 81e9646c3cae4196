//! Extraction capability of a detected format.

use std::io::Read;
use std::io::Seek;

use log::debug;

use crate::Result;
use crate::formats::compression::CompressionCodec;
use crate::formats::compression::Decoder;
use crate::formats::detect::ArchiveType;
use crate::formats::sevenz;
use crate::formats::tar::TarEntries;
use crate::formats::traits::EntryStream;
use crate::formats::zip::ZipEntries;
use crate::formats::zip::open_archive;
use crate::types::ArchiveEntry;

/// Opens an archive and exposes its entries.
///
/// Obtained from [`Format::extractor`](crate::formats::detect::Format::extractor);
/// formats without one (bare compressed streams) cannot be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extractor {
    /// Tar archive, optionally behind a compression codec.
    Tar(Option<CompressionCodec>),
    /// ZIP archive.
    Zip,
    /// 7z archive.
    SevenZ,
}

impl Extractor {
    /// Name of the format this extractor reads.
    #[must_use]
    pub const fn format_name(self) -> &'static str {
        match self {
            Self::Tar(codec) => ArchiveType::tar_with(codec).name(),
            Self::Zip => ArchiveType::Zip.name(),
            Self::SevenZ => ArchiveType::SevenZ.name(),
        }
    }

    /// Opens `source` and hands every entry to `visit`.
    ///
    /// Tar and zip entries arrive in archive order. 7z directories arrive
    /// first, in header order, followed by the other entries in decode order.
    /// The archive lives only for the duration of the call; entries cannot
    /// escape `visit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or decoded, or the
    /// first error returned by `visit`.
    pub fn for_each_entry<S, F>(self, source: S, mut visit: F) -> Result<()>
    where
        S: Read + Seek,
        F: FnMut(&mut ArchiveEntry<'_>) -> Result<()>,
    {
        debug!("opening {} archive", self.format_name());
        match self {
            Self::Tar(codec) => {
                let mut archive = tar::Archive::new(Decoder::new(codec, source)?);
                drain(&mut TarEntries::new(&mut archive)?, &mut visit)
            }
            Self::Zip => {
                let mut archive = open_archive(source)?;
                drain(&mut ZipEntries::new(&mut archive), &mut visit)
            }
            Self::SevenZ => sevenz::for_each_entry(source, visit),
        }
    }
}

fn drain<F>(entries: &mut dyn EntryStream, visit: &mut F) -> Result<()>
where
    F: FnMut(&mut ArchiveEntry<'_>) -> Result<()>,
{
    while let Some(mut entry) = entries.next_entry()? {
        visit(&mut entry)?;
    }
    Ok(())
}
