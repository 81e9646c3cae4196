//! Permission mask policy.

/// Group and other write bits, cleared on every applied mode.
pub const WRITE_MASK: u32 = 0o022;

/// Permission and special bits (`rwx` for all classes plus setuid, setgid
/// and sticky); file type bits above this are dropped.
const PERMISSION_BITS: u32 = 0o7777;

/// Returns `mode` reduced to its permission bits with group/other write
/// access cleared.
///
/// # Examples
///
/// ```
/// use unarc_core::types::mask_mode;
///
/// assert_eq!(mask_mode(0o666), 0o644);
/// assert_eq!(mask_mode(0o40777), 0o755);
/// ```
#[inline]
#[must_use]
pub const fn mask_mode(mode: u32) -> u32 {
    mode & PERMISSION_BITS & !WRITE_MASK
}
