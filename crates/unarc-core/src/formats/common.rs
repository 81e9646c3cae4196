//! Filesystem operations shared by every archive format.
//!
//! Each helper performs exactly one filesystem action and attaches the
//! action and target path to any failure. None of them create missing
//! parent directories.

use std::fs::DirBuilder;
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ExtractionError;
use crate::Result;
use crate::copy::COPY_BUFFER_SIZE;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::error::FsOp;

/// Creates a directory and any missing ancestors.
///
/// Idempotent: an existing directory is left as it is, including its
/// permissions. `mode` only applies to directories created here.
pub fn create_directory(path: &Path, mode: u32) -> Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder
        .create(path)
        .map_err(|e| ExtractionError::fs(FsOp::CreateDir, path, e))
}

/// Creates the parent directory of `path` with the default directory mode.
pub fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => create_directory(parent, 0o755),
        _ => Ok(()),
    }
}

/// Creates a symbolic link at `link` pointing to `target`, stored verbatim.
///
/// Fails if anything already exists at `link`.
#[allow(unused_variables)]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
            .map_err(|e| ExtractionError::fs(FsOp::CreateSymlink, link, e))
    }

    #[cfg(not(unix))]
    {
        Err(ExtractionError::fs(
            FsOp::CreateSymlink,
            link,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "symlinks are not supported on this platform",
            ),
        ))
    }
}

/// Creates a hard link at `link` to the existing file `original`.
pub fn create_hardlink(original: &Path, link: &Path) -> Result<()> {
    std::fs::hard_link(original, link)
        .map_err(|e| ExtractionError::fs(FsOp::CreateHardlink, link, e))
}

/// Writes a regular file from `reader`.
///
/// The file is created or truncated, its permissions are set to `mode`,
/// then the content is copied. The handle is closed before returning, on
/// success and on failure alike. Returns the number of bytes written.
pub fn write_file<R: Read + ?Sized>(
    reader: &mut R,
    path: &Path,
    mode: u32,
    buffer: &mut CopyBuffer,
) -> Result<u64> {
    let file = File::create(path).map_err(|e| ExtractionError::fs(FsOp::CreateFile, path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(mode))
            .map_err(|e| ExtractionError::fs(FsOp::SetPermissions, path, e))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);
    let written = copy_with_buffer(reader, &mut writer, buffer, path)?;
    writer
        .flush()
        .map_err(|e| ExtractionError::fs(FsOp::WriteFile, path, e))?;

    Ok(written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_create_directory_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b/c");

        create_directory(&dir, 0o755).unwrap();
        create_directory(&dir, 0o755).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn test_create_directory_over_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("taken");
        std::fs::write(&path, b"x").unwrap();

        let err = create_directory(&path, 0o755).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::Filesystem {
                op: FsOp::CreateDir,
                ..
            }
        ));
    }

    #[test]
    fn test_write_file_truncates_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("f.txt");
        std::fs::write(&path, b"a much longer previous content").unwrap();

        let written = write_file(&mut &b"new"[..], &path, 0o644, &mut CopyBuffer::new()).unwrap();
        assert_eq!(written, 3);
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_write_file_without_parent_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing/f.txt");

        let err = write_file(&mut &b"x"[..], &path, 0o644, &mut CopyBuffer::new()).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::NotFound));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ro.txt");

        write_file(&mut &b"data"[..], &path, 0o444, &mut CopyBuffer::new()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o444);
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn test_create_symlink_stores_target_verbatim() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("link");

        create_symlink(Path::new("../nowhere"), &link).unwrap();
        assert_eq!(std::fs::read_link(&link).unwrap(), Path::new("../nowhere"));
    }

    #[cfg(unix)]
    #[test]
    fn test_create_symlink_over_existing_fails() {
        let temp = TempDir::new().unwrap();
        let link = temp.path().join("link");
        std::fs::write(&link, b"x").unwrap();

        let err = create_symlink(Path::new("target"), &link).unwrap_err();
        assert_eq!(err.io_kind(), Some(ErrorKind::AlreadyExists));
    }

    #[test]
    fn test_create_hardlink_shares_content() {
        let temp = TempDir::new().unwrap();
        let original = temp.path().join("original");
        let link = temp.path().join("link");
        std::fs::write(&original, b"shared").unwrap();

        create_hardlink(&original, &link).unwrap();
        assert_eq!(std::fs::read(&link).unwrap(), b"shared");
    }

    #[test]
    fn test_create_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x/y/file");

        create_parent(&path).unwrap();
        assert!(temp.path().join("x/y").is_dir());
        create_parent(Path::new("file")).unwrap();
    }
}
