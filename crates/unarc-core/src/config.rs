//! Extraction options.

/// Options controlling how archive entries are materialized.
///
/// # Examples
///
/// ```
/// use unarc_core::ExtractOptions;
///
/// // Skip symlinks without a stored target (the default)
/// let options = ExtractOptions::default();
/// assert!(options.skip_empty_symlink);
///
/// // Fail on them instead, and create missing parents for nested entries
/// let strict = ExtractOptions::default()
///     .with_skip_empty_symlink(false)
///     .with_create_parents(true);
/// assert!(!strict.skip_empty_symlink);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Silently skip symlink entries whose link target is empty.
    ///
    /// When `false`, such an entry aborts extraction with
    /// [`ExtractionError::EmptySymlink`](crate::ExtractionError::EmptySymlink).
    pub skip_empty_symlink: bool,

    /// Create missing parent directories for file and link entries.
    ///
    /// Off by default: an entry whose parent directory has not been
    /// created by an earlier directory entry fails with a not-found error.
    pub create_parents: bool,
}

impl Default for ExtractOptions {
    /// Default values:
    /// - `skip_empty_symlink`: true
    /// - `create_parents`: false
    fn default() -> Self {
        Self {
            skip_empty_symlink: true,
            create_parents: false,
        }
    }
}

impl ExtractOptions {
    /// Sets whether empty symlink targets are skipped.
    #[must_use]
    pub fn with_skip_empty_symlink(mut self, skip: bool) -> Self {
        self.skip_empty_symlink = skip;
        self
    }

    /// Sets whether missing parent directories are created.
    #[must_use]
    pub fn with_create_parents(mut self, create: bool) -> Self {
        self.create_parents = create;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert!(options.skip_empty_symlink);
        assert!(!options.create_parents);
    }

    #[test]
    fn test_builder_setters() {
        let options = ExtractOptions::default()
            .with_skip_empty_symlink(false)
            .with_create_parents(true);
        assert!(!options.skip_empty_symlink);
        assert!(options.create_parents);
    }
}
