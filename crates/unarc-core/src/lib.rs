//! Content-sniffing archive extraction.
//!
//! `unarc-core` identifies an archive from its bytes alone (no file name)
//! and materializes its entries under a destination directory. Supported
//! containers are tar (plain, gzip, bzip2, xz, zstd), zip and 7z. Every
//! applied mode has group and other write bits cleared.
//!
//! # Examples
//!
//! ```no_run
//! use unarc_core::ExtractOptions;
//! use unarc_core::extract_stream;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stdin = std::io::stdin();
//! let report = extract_stream(stdin.lock(), "/output/dir", &ExtractOptions::default())?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```
//!
//! Lower-level steps are available separately:
//!
//! ```
//! use unarc_core::ExtractOptions;
//! use unarc_core::extraction::extract;
//! use unarc_core::formats::identify;
//! use unarc_core::io::Input;
//! use unarc_core::test_utils::create_test_tar;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tar = create_test_tar(vec![("hello.txt", b"hi")]);
//! let (format, input) = identify(Input::stream(&tar[..]))?;
//! assert_eq!(format.name(), "tar");
//!
//! let dest = tempfile::tempdir()?;
//! extract(format, input, dest.path(), &ExtractOptions::default())?;
//! assert_eq!(std::fs::read(dest.path().join("hello.txt"))?, b"hi");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod io;
pub mod report;
pub mod test_utils;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_stream;
pub use config::ExtractOptions;
pub use error::ExtractionError;
pub use error::Result;
pub use extraction::extract;
pub use formats::Format;
pub use formats::identify;
pub use io::Input;
pub use report::ExtractionReport;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::EntryType;
