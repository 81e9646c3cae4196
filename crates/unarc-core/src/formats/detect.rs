//! Archive format detection from content.
//!
//! No file name is consulted. Detection looks at the first tar block of the
//! stream and, when it starts with a compression magic, at the first tar
//! block of the decompressed payload. A block with a valid tar checksum wins
//! over any magic, since entry names may start with magic bytes.

use std::fmt;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use log::debug;

use crate::ExtractionError;
use crate::Result;
use crate::formats::compression::CompressionCodec;
use crate::formats::extractor::Extractor;
use crate::io::Input;
use crate::io::RewindReader;

/// Size of a tar header block.
pub const TAR_BLOCK_SIZE: usize = 512;

/// Byte range of the checksum field inside a tar header.
const TAR_CHECKSUM_FIELD: std::ops::Range<usize> = 148..156;

/// Local file header, end of central directory, and spanning marker.
const ZIP_MAGICS: [&[u8]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// 7z signature header.
const SEVENZ_MAGIC: [u8; 6] = [0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C];

/// Archive container formats, with the compression wrapping them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Zstd-compressed tar archive.
    TarZst,
    /// ZIP archive.
    Zip,
    /// 7z archive.
    SevenZ,
}

impl ArchiveType {
    /// Tar variant for the given outer compression.
    #[must_use]
    pub const fn tar_with(codec: Option<CompressionCodec>) -> Self {
        match codec {
            None => Self::Tar,
            Some(CompressionCodec::Gzip) => Self::TarGz,
            Some(CompressionCodec::Bzip2) => Self::TarBz2,
            Some(CompressionCodec::Xz) => Self::TarXz,
            Some(CompressionCodec::Zstd) => Self::TarZst,
        }
    }

    /// Outer compression of a tar variant; `None` for plain tar, zip and 7z.
    #[must_use]
    pub const fn compression(self) -> Option<CompressionCodec> {
        match self {
            Self::Tar | Self::Zip | Self::SevenZ => None,
            Self::TarGz => Some(CompressionCodec::Gzip),
            Self::TarBz2 => Some(CompressionCodec::Bzip2),
            Self::TarXz => Some(CompressionCodec::Xz),
            Self::TarZst => Some(CompressionCodec::Zstd),
        }
    }

    /// Conventional name of the format.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::TarXz => "tar.xz",
            Self::TarZst => "tar.zst",
            Self::Zip => "zip",
            Self::SevenZ => "7z",
        }
    }
}

/// Result of identifying a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// A container whose entries can be extracted.
    Archive(ArchiveType),
    /// A compressed stream whose payload is not a known container.
    Compressed(CompressionCodec),
}

impl Format {
    /// Conventional name of the format (`tar.gz`, `zip`, `gz`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Archive(archive) => archive.name(),
            Self::Compressed(codec) => codec.suffix(),
        }
    }

    /// Extraction capability of this format, if it has one.
    ///
    /// Bare compressed streams carry a single unnamed payload and have no
    /// extractor.
    #[must_use]
    pub const fn extractor(self) -> Option<Extractor> {
        match self {
            Self::Archive(ArchiveType::Zip) => Some(Extractor::Zip),
            Self::Archive(ArchiveType::SevenZ) => Some(Extractor::SevenZ),
            Self::Archive(archive) => Some(Extractor::Tar(archive.compression())),
            Self::Compressed(_) => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classifies a raw byte prefix.
///
/// Compressed prefixes are reported as [`Format::Compressed`] because the
/// payload is not inspected here; [`identify`] looks inside.
///
/// # Examples
///
/// ```
/// use unarc_core::formats::detect::{ArchiveType, Format, detect_format};
///
/// assert_eq!(
///     detect_format(b"PK\x03\x04\x14\x00"),
///     Some(Format::Archive(ArchiveType::Zip))
/// );
/// assert_eq!(detect_format(b"plain text"), None);
/// ```
#[must_use]
pub fn detect_format(head: &[u8]) -> Option<Format> {
    if is_tar_header(head) {
        return Some(Format::Archive(ArchiveType::Tar));
    }
    if let Some(codec) = CompressionCodec::from_magic(head) {
        return Some(Format::Compressed(codec));
    }
    if is_zip(head) {
        return Some(Format::Archive(ArchiveType::Zip));
    }
    if head.starts_with(&SEVENZ_MAGIC) {
        return Some(Format::Archive(ArchiveType::SevenZ));
    }
    None
}

/// Returns `true` if `head` starts with a zip signature.
#[must_use]
pub fn is_zip(head: &[u8]) -> bool {
    ZIP_MAGICS.iter().any(|magic| head.starts_with(magic))
}

/// Returns `true` if `block` starts with a valid tar header.
///
/// The stored checksum must match the computed one, which accepts ustar,
/// GNU and old v7 headers alike. An all-zero block (end of archive) is not
/// a header.
#[must_use]
pub fn is_tar_header(block: &[u8]) -> bool {
    let Some(block) = block.get(..TAR_BLOCK_SIZE) else {
        return false;
    };
    if block.iter().all(|&b| b == 0) {
        return false;
    }

    let Ok(stored) = tar::Header::from_byte_slice(block).cksum() else {
        return false;
    };
    let computed: u32 = block
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            if TAR_CHECKSUM_FIELD.contains(&i) {
                u32::from(b' ')
            } else {
                u32::from(b)
            }
        })
        .sum();

    stored == computed
}

/// Identifies the format of `input` and returns it rewound to its start.
///
/// Seekable inputs are rewound by seeking back; stream inputs replay the
/// bytes consumed during detection before the rest of the stream.
///
/// # Errors
///
/// Returns [`ExtractionError::UnrecognizedFormat`] when the content matches
/// no known format (including empty input), or an I/O error from reading.
///
/// # Examples
///
/// ```
/// use unarc_core::formats::detect::{ArchiveType, Format, identify};
/// use unarc_core::io::Input;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let zip = unarc_core::test_utils::create_test_zip(vec![("a.txt", b"hi")]);
/// let (format, _input) = identify(Input::stream(&zip[..]))?;
/// assert_eq!(format, Format::Archive(ArchiveType::Zip));
/// # Ok(())
/// # }
/// ```
pub fn identify(input: Input<'_>) -> Result<(Format, Input<'_>)> {
    let (format, input) = match input {
        Input::Seekable(mut reader) => {
            let start = reader.stream_position()?;
            let format = sniff(&mut reader)?;
            reader.seek(SeekFrom::Start(start))?;
            (format, Input::Seekable(reader))
        }
        Input::Stream(reader) => {
            let mut recorder = RewindReader::new(reader);
            let format = sniff(&mut recorder)?;
            debug!("replaying {} sniffed bytes", recorder.recorded().len());
            (format, Input::Stream(Box::new(recorder.rewound())))
        }
    };
    debug!("identified input as {format}");
    Ok((format, input))
}

fn sniff<R: Read>(reader: &mut R) -> Result<Format> {
    let mut head = Vec::with_capacity(TAR_BLOCK_SIZE);
    Read::take(&mut *reader, TAR_BLOCK_SIZE as u64).read_to_end(&mut head)?;

    if head.is_empty() {
        return Err(ExtractionError::UnrecognizedFormat);
    }

    match detect_format(&head) {
        Some(Format::Compressed(codec)) => Ok(peek_compressed(codec, Cursor::new(head).chain(reader))),
        Some(format) => Ok(format),
        None => Err(ExtractionError::UnrecognizedFormat),
    }
}

/// Decides whether a compressed stream wraps a tar archive.
///
/// Decoding failures mean the payload is not something we can look into;
/// the stream is then a bare compressed stream.
fn peek_compressed<R: Read>(codec: CompressionCodec, stream: R) -> Format {
    let Ok(decoder) = codec.decoder(stream) else {
        return Format::Compressed(codec);
    };

    let mut block = Vec::with_capacity(TAR_BLOCK_SIZE);
    let decoded = decoder
        .take(TAR_BLOCK_SIZE as u64)
        .read_to_end(&mut block);

    if decoded.is_ok() && is_tar_header(&block) {
        Format::Archive(ArchiveType::tar_with(Some(codec)))
    } else {
        Format::Compressed(codec)
    }
}
