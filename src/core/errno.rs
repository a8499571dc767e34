/*!
 * Errno Translation
 * Maps OS error numbers onto the closed `ErrorKind` set
 *
 * Each OS call only recognises the errors its man page documents; anything
 * else becomes `Unknown`. The mapping is total and has no side effects.
 */

use super::errors::ErrorKind;
use nix::errno::Errno;

/// The OS call whose documented error subset applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsCall {
    /// stat, lstat, fstat
    Stat,
    /// mlock
    Lock,
    /// munlock
    Unlock,
    /// mincore
    Residency,
}

impl OsCall {
    /// Kinds this call may report other than `Unknown`
    #[must_use]
    pub const fn recognised(self) -> &'static [ErrorKind] {
        match self {
            Self::Stat => &[
                ErrorKind::AccessDenied,
                ErrorKind::BadDescriptor,
                ErrorKind::Fault,
                ErrorKind::SymlinkLoop,
                ErrorKind::NameTooLong,
                ErrorKind::NotFound,
                ErrorKind::OutOfMemory,
                ErrorKind::NotADirectory,
                ErrorKind::ValueOverflow,
            ],
            Self::Lock => &[
                ErrorKind::OutOfMemory,
                ErrorKind::PermissionDenied,
                ErrorKind::Again,
            ],
            Self::Unlock => &[ErrorKind::OutOfMemory, ErrorKind::Again],
            Self::Residency => &[
                ErrorKind::OutOfMemory,
                ErrorKind::Fault,
                ErrorKind::ValueOverflow,
                ErrorKind::Again,
            ],
        }
    }
}

/// Classify an errno without regard to the originating call
fn classify(errno: Errno) -> ErrorKind {
    match errno {
        Errno::EACCES => ErrorKind::AccessDenied,
        Errno::EBADF => ErrorKind::BadDescriptor,
        Errno::EFAULT => ErrorKind::Fault,
        Errno::ELOOP => ErrorKind::SymlinkLoop,
        Errno::ENAMETOOLONG => ErrorKind::NameTooLong,
        Errno::ENOENT => ErrorKind::NotFound,
        Errno::ENOMEM => ErrorKind::OutOfMemory,
        Errno::ENOTDIR => ErrorKind::NotADirectory,
        Errno::EOVERFLOW => ErrorKind::ValueOverflow,
        Errno::EAGAIN => ErrorKind::Again,
        Errno::EPERM => ErrorKind::PermissionDenied,
        _ => ErrorKind::Unknown,
    }
}

/// Translate an errno for the given call
#[must_use]
pub fn translate(errno: Errno, call: OsCall) -> ErrorKind {
    // mincore reports a misaligned or out-of-range address as EINVAL
    let kind = match (call, errno) {
        (OsCall::Residency, Errno::EINVAL) => ErrorKind::ValueOverflow,
        _ => classify(errno),
    };

    if call.recognised().contains(&kind) {
        kind
    } else {
        ErrorKind::Unknown
    }
}

/// Translate a raw errno integer for the given call
#[must_use]
pub fn translate_raw(errno: i32, call: OsCall) -> ErrorKind {
    translate(Errno::from_raw(errno), call)
}

/// Last OS error number recorded for the calling thread
#[inline]
#[must_use]
pub fn last_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Translate the calling thread's last OS error for the given call
#[inline]
pub(crate) fn last_error(call: OsCall) -> ErrorKind {
    translate_raw(last_errno(), call)
}
