//! I/O utilities for archive input.
//!
//! This module provides the input abstraction handed to format detection and
//! the reader wrappers used to look ahead into non-seekable streams.

pub mod input;
pub mod rewind;

// Re-export main types for convenience
pub use input::Input;
pub use input::ReadSeek;
pub use rewind::RewindReader;
