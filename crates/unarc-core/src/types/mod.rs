//! Core value types for the extraction walk.
//!
//! - [`DestDir`]: the destination root, created on construction
//! - [`EntryType`] / [`ArchiveEntry`]: one record yielded by an entry stream
//! - [`mask_mode`]: the permission mask applied to every created object

pub mod dest_dir;
pub mod entry_type;
pub mod mode;

pub use dest_dir::DestDir;
pub use entry_type::ArchiveEntry;
pub use entry_type::EntryType;
pub use mode::mask_mode;
