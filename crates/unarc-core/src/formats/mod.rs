//! Archive format implementations.
//!
//! - [`detect`]: content sniffing and the [`Format`] model
//! - [`compression`]: codec magic numbers and decoders
//! - [`extractor`]: opening a detected archive and visiting its entries
//! - [`tar`] / [`zip`]: per-format [`EntryStream`]s
//! - [`sevenz`]: 7z entries, pushed by the decoder
//! - [`common`]: filesystem operations shared by all formats

pub mod common;
pub mod compression;
pub mod detect;
pub mod extractor;
pub mod sevenz;
pub mod tar;
pub mod traits;
pub mod zip;

// Re-export main types for convenience
pub use compression::CompressionCodec;
pub use detect::ArchiveType;
pub use detect::Format;
pub use detect::identify;
pub use extractor::Extractor;
pub use traits::EntryStream;
