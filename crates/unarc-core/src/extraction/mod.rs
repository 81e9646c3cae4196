//! Extraction walk: applying archive entries to the filesystem.

pub mod engine;

pub use engine::ExtractionEngine;
pub use engine::extract;
