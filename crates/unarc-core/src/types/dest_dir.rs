//! Destination root directory.

use std::fs::DirBuilder;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::ExtractionError;
use crate::Result;
use crate::error::FsOp;

/// Mode requested for a destination root that has to be created.
pub const DEST_DIR_MODE: u32 = 0o755;

/// The directory all entries are materialized under.
///
/// Constructing a `DestDir` guarantees the directory exists. Entry names are
/// joined onto it component by component: root and drive-prefix components
/// are dropped so an absolute entry name still lands under the root, `.` is
/// ignored, everything else (including `..`) is kept as stored.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use unarc_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("out")?;
/// assert_eq!(dest.join(Path::new("/etc/motd")), Path::new("out/etc/motd"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory (and parents) if needed and wraps the path.
    ///
    /// An existing directory is accepted as-is; its permissions are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error if the directory cannot be created, or if
    /// the path exists and is not a directory.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DEST_DIR_MODE);
        }

        builder
            .create(&path)
            .map_err(|e| ExtractionError::fs(FsOp::CreateDir, &path, e))?;

        Ok(Self(path))
    }

    /// Returns the path as a `&Path`.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins an entry name onto the destination root.
    #[must_use]
    pub fn join(&self, entry_path: &Path) -> PathBuf {
        let mut out = self.0.clone();
        for component in entry_path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir | Component::Normal(_) => out.push(component),
            }
        }
        out
    }
}

impl AsRef<Path> for DestDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
