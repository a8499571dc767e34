/*!
 * File Status Reader
 * stat, lstat, and fstat into the fixed record layout
 *
 * The raw entry points return 0 on success or a status code from the closed
 * set (`ErrorKind::stat_code`). On failure nothing is written to the output.
 * Path strings are owned for the duration of the call and released on every
 * exit path.
 */

use super::record::FileStatus;
use crate::core::errno::{last_error, OsCall};
use crate::core::errors::ErrorKind;
use crate::core::types::{Address, RawFd};
use std::ffi::{CStr, CString};
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Links {
    Follow,
    NoFollow,
}

fn to_cstring(path: &Path) -> Result<CString, ErrorKind> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        debug!(path = %path.display(), "path contains an interior NUL byte");
        ErrorKind::Unknown
    })
}

fn query_path(path: &CStr, links: Links) -> Result<FileStatus, ErrorKind> {
    let mut buf = MaybeUninit::<libc::stat>::uninit();
    let rc = unsafe {
        match links {
            Links::Follow => libc::stat(path.as_ptr(), buf.as_mut_ptr()),
            Links::NoFollow => libc::lstat(path.as_ptr(), buf.as_mut_ptr()),
        }
    };
    if rc != 0 {
        let kind = last_error(OsCall::Stat);
        debug!(path = ?path, ?links, kind = kind.as_str(), "stat failed");
        return Err(kind);
    }
    let st = unsafe { buf.assume_init() };
    Ok(FileStatus::from(&st))
}

fn query_descriptor(fd: RawFd) -> Result<FileStatus, ErrorKind> {
    let mut buf = MaybeUninit::<libc::stat>::uninit();
    if unsafe { libc::fstat(fd, buf.as_mut_ptr()) } != 0 {
        let kind = last_error(OsCall::Stat);
        debug!(fd, kind = kind.as_str(), "fstat failed");
        return Err(kind);
    }
    let st = unsafe { buf.assume_init() };
    Ok(FileStatus::from(&st))
}

/// Write `result` to `out` on success; otherwise return its status code
unsafe fn publish(result: Result<FileStatus, ErrorKind>, out: Address) -> i32 {
    match result {
        Ok(status) => {
            status.encode().write_to(out);
            0
        }
        Err(kind) => kind.stat_code(),
    }
}

/// Metadata of `path`, following symbolic links
pub fn stat_path(path: impl AsRef<Path>) -> Result<FileStatus, ErrorKind> {
    let c_path = to_cstring(path.as_ref())?;
    query_path(&c_path, Links::Follow)
}

/// Metadata of `path` itself, not following a final symbolic link
pub fn lstat_path(path: impl AsRef<Path>) -> Result<FileStatus, ErrorKind> {
    let c_path = to_cstring(path.as_ref())?;
    query_path(&c_path, Links::NoFollow)
}

/// Metadata of an open descriptor
pub fn fstat_descriptor(fd: RawFd) -> Result<FileStatus, ErrorKind> {
    query_descriptor(fd)
}

/// `stat` into the record at `out`
///
/// # Safety
/// `out` must be writable for `STAT_RECORD_SIZE` bytes.
pub unsafe fn stat_by_path(path: impl AsRef<Path>, out: Address) -> i32 {
    publish(stat_path(path), out)
}

/// `lstat` into the record at `out`
///
/// # Safety
/// `out` must be writable for `STAT_RECORD_SIZE` bytes.
pub unsafe fn stat_by_path_no_follow(path: impl AsRef<Path>, out: Address) -> i32 {
    publish(lstat_path(path), out)
}

/// `fstat` into the record at `out`
///
/// # Safety
/// `out` must be writable for `STAT_RECORD_SIZE` bytes.
pub unsafe fn stat_by_descriptor(fd: RawFd, out: Address) -> i32 {
    publish(fstat_descriptor(fd), out)
}

/// `stat` or `lstat` of a C string path into the record at `out`
///
/// # Safety
/// `out` must be writable for `STAT_RECORD_SIZE` bytes.
pub unsafe fn stat_by_c_path(path: &CStr, follow_links: bool, out: Address) -> i32 {
    let links = if follow_links {
        Links::Follow
    } else {
        Links::NoFollow
    };
    publish(query_path(path, links), out)
}
