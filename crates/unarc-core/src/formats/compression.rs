//! Compression codec support.
//!
//! Codecs are identified from their magic bytes and decoded with the
//! ecosystem decoders:
//!
//! - **Gzip** (`1F 8B`): `flate2`, multi-member streams supported
//! - **Bzip2** (`BZh`): `bzip2`, multi-stream files supported
//! - **Xz** (`FD 37 7A 58 5A 00`): `xz2`, concatenated streams supported
//! - **Zstd** (`28 B5 2F FD`): `zstd`

use std::io;
use std::io::BufReader;
use std::io::Read;

use crate::Result;

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

/// Compression codec wrapping a stream.
///
/// # Examples
///
/// ```
/// use unarc_core::formats::compression::CompressionCodec;
///
/// let codec = CompressionCodec::from_magic(&[0x1F, 0x8B, 0x08, 0x00]);
/// assert_eq!(codec, Some(CompressionCodec::Gzip));
/// assert_eq!(CompressionCodec::Gzip.suffix(), "gz");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,

    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,

    /// Xz compression (LZMA2 algorithm).
    Xz,

    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// All codecs, in detection order.
    pub const ALL: [Self; 4] = [Self::Gzip, Self::Bzip2, Self::Xz, Self::Zstd];

    /// Identifies a codec from the leading bytes of a stream.
    #[must_use]
    pub fn from_magic(head: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|codec| head.starts_with(codec.magic()))
    }

    /// Magic bytes every stream of this codec starts with.
    #[must_use]
    pub const fn magic(self) -> &'static [u8] {
        match self {
            Self::Gzip => GZIP_MAGIC,
            Self::Bzip2 => BZIP2_MAGIC,
            Self::Xz => XZ_MAGIC,
            Self::Zstd => ZSTD_MAGIC,
        }
    }

    /// Returns a human-readable name for this codec.
    ///
    /// ```
    /// use unarc_core::formats::compression::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.name(), "gzip");
    /// assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Returns the conventional file suffix for this codec.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Gzip => "gz",
            Self::Bzip2 => "bz2",
            Self::Xz => "xz",
            Self::Zstd => "zst",
        }
    }

    /// Wraps `reader` in a decoder for this codec.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot be initialized.
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>> {
        let decoder = match self {
            Self::Gzip => Decoder::Gzip(Box::new(flate2::read::MultiGzDecoder::new(reader))),
            Self::Bzip2 => Decoder::Bzip2(Box::new(bzip2::read::MultiBzDecoder::new(reader))),
            Self::Xz => Decoder::Xz(Box::new(xz2::read::XzDecoder::new_multi_decoder(reader))),
            Self::Zstd => Decoder::Zstd(Box::new(zstd::stream::read::Decoder::new(reader)?)),
        };
        Ok(decoder)
    }
}

/// Reader that decompresses (or passes through) an underlying stream.
pub enum Decoder<R: Read> {
    /// Uncompressed data.
    Passthrough(R),
    /// Gzip decoder.
    Gzip(Box<flate2::read::MultiGzDecoder<R>>),
    /// Bzip2 decoder.
    Bzip2(Box<bzip2::read::MultiBzDecoder<R>>),
    /// Xz decoder.
    Xz(Box<xz2::read::XzDecoder<R>>),
    /// Zstd decoder.
    Zstd(Box<zstd::stream::read::Decoder<'static, BufReader<R>>>),
}

impl<R: Read> Decoder<R> {
    /// Decoder for an optional codec; `None` passes data through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the codec's decoder cannot be initialized.
    pub fn new(codec: Option<CompressionCodec>, reader: R) -> Result<Self> {
        match codec {
            Some(codec) => codec.decoder(reader),
            None => Ok(Self::Passthrough(reader)),
        }
    }

    /// Codec this decoder handles, `None` for pass-through.
    #[must_use]
    pub const fn codec(&self) -> Option<CompressionCodec> {
        match self {
            Self::Passthrough(_) => None,
            Self::Gzip(_) => Some(CompressionCodec::Gzip),
            Self::Bzip2(_) => Some(CompressionCodec::Bzip2),
            Self::Xz(_) => Some(CompressionCodec::Xz),
            Self::Zstd(_) => Some(CompressionCodec::Zstd),
        }
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            Self::Gzip(d) => d.read(buf),
            Self::Bzip2(d) => d.read(buf),
            Self::Xz(d) => d.read(buf),
            Self::Zstd(d) => d.read(buf),
        }
    }
}
