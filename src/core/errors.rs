/*!
 * Error Types
 * Closed error-kind set shared with the managed caller, plus the diagnostic
 * error used by the typed Rust API
 */

use super::types::{Address, Length};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic error kinds reported across the bridge
///
/// The set is closed: every OS error number maps to exactly one of these,
/// with `Unknown` absorbing anything a component does not recognise.
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("access denied")]
    AccessDenied,

    #[error("bad file descriptor")]
    BadDescriptor,

    #[error("bad address")]
    Fault,

    #[error("too many levels of symbolic links")]
    SymlinkLoop,

    #[error("file name too long")]
    NameTooLong,

    #[error("no such file or directory")]
    NotFound,

    #[error("out of memory")]
    OutOfMemory,

    #[error("not a directory")]
    NotADirectory,

    #[error("value too large for defined data type")]
    ValueOverflow,

    #[error("resource temporarily unavailable")]
    Again,

    #[error("operation not permitted")]
    PermissionDenied,

    #[error("unknown error")]
    Unknown,
}

impl ErrorKind {
    /// Every kind, `Unknown` last
    pub const ALL: [ErrorKind; 12] = [
        ErrorKind::AccessDenied,
        ErrorKind::BadDescriptor,
        ErrorKind::Fault,
        ErrorKind::SymlinkLoop,
        ErrorKind::NameTooLong,
        ErrorKind::NotFound,
        ErrorKind::OutOfMemory,
        ErrorKind::NotADirectory,
        ErrorKind::ValueOverflow,
        ErrorKind::Again,
        ErrorKind::PermissionDenied,
        ErrorKind::Unknown,
    ];

    /// Code returned by the file status calls
    ///
    /// 1..=9 for the stat error set; kinds outside it report -1.
    #[must_use]
    pub const fn stat_code(self) -> i32 {
        match self {
            Self::AccessDenied => 1,
            Self::BadDescriptor => 2,
            Self::Fault => 3,
            Self::SymlinkLoop => 4,
            Self::NameTooLong => 5,
            Self::NotFound => 6,
            Self::OutOfMemory => 7,
            Self::NotADirectory => 8,
            Self::ValueOverflow => 9,
            Self::Again | Self::PermissionDenied | Self::Unknown => -1,
        }
    }

    /// Code returned by the lock, unlock, and residency calls
    ///
    /// 1..=5 for the memory error set (`ValueOverflow` carries mincore's
    /// EINVAL); kinds outside it report -1.
    #[must_use]
    pub const fn memory_code(self) -> i32 {
        match self {
            Self::OutOfMemory => 1,
            Self::PermissionDenied => 2,
            Self::Again => 3,
            Self::Fault => 4,
            Self::ValueOverflow => 5,
            _ => -1,
        }
    }

    /// Inverse of [`ErrorKind::stat_code`]; 0 is success and yields `None`
    #[must_use]
    pub fn from_stat_code(code: i32) -> Option<Self> {
        Self::decode(code, Self::stat_code)
    }

    /// Inverse of [`ErrorKind::memory_code`]; 0 is success and yields `None`
    #[must_use]
    pub fn from_memory_code(code: i32) -> Option<Self> {
        Self::decode(code, Self::memory_code)
    }

    fn decode(code: i32, encode: fn(Self) -> i32) -> Option<Self> {
        if code == 0 {
            return None;
        }
        if code < 0 {
            return Some(Self::Unknown);
        }
        Some(
            Self::ALL
                .into_iter()
                .find(|&kind| encode(kind) == code)
                .unwrap_or(Self::Unknown),
        )
    }

    /// Short symbolic name, as used in diagnostics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessDenied => "EACCES",
            Self::BadDescriptor => "EBADF",
            Self::Fault => "EFAULT",
            Self::SymlinkLoop => "ELOOP",
            Self::NameTooLong => "ENAMETOOLONG",
            Self::NotFound => "ENOENT",
            Self::OutOfMemory => "ENOMEM",
            Self::NotADirectory => "ENOTDIR",
            Self::ValueOverflow => "EOVERFLOW",
            Self::Again => "EAGAIN",
            Self::PermissionDenied => "EPERM",
            Self::Unknown => "unknown",
        }
    }
}

/// Errors from the typed region and status API
#[derive(Error, Debug, Diagnostic)]
pub enum BridgeError {
    #[error("mmap of {length} bytes at offset {offset} failed [errno {errno}]")]
    #[diagnostic(
        code(mmap::map_failed),
        help("Check the descriptor's open mode and that the offset is page aligned.")
    )]
    MapFailed { length: Length, offset: Length, errno: i32 },

    #[error("undefined protection value {0}")]
    #[diagnostic(
        code(mmap::invalid_protection),
        help("Only READ_ONLY (0) and READ_WRITE (1) are defined.")
    )]
    InvalidProtection(i32),

    #[error("munmap of {length} bytes at 0x{address:x} failed [errno {errno}]")]
    #[diagnostic(code(mmap::unmap_failed))]
    UnmapFailed { address: Address, length: Length, errno: i32 },

    #[error("mremap from {old_length} to {new_length} bytes failed [errno {errno}]")]
    #[diagnostic(
        code(mmap::remap_failed),
        help("Relocating remaps are Linux only; fall back to unmap and map elsewhere.")
    )]
    RemapFailed {
        old_length: Length,
        new_length: Length,
        errno: i32,
    },

    #[error("msync of {length} bytes at 0x{address:x} failed [errno {errno}]")]
    #[diagnostic(code(mmap::flush_failed))]
    FlushFailed { address: Address, length: Length, errno: i32 },

    #[error("madvise of {length} bytes at 0x{address:x} failed [errno {errno}]")]
    #[diagnostic(code(advice::advise_failed))]
    AdviseFailed { address: Address, length: Length, errno: i32 },

    #[error("range [{position}, {position}+{length}) outside region of {capacity} bytes")]
    #[diagnostic(code(mmap::out_of_bounds))]
    OutOfBounds {
        position: Length,
        length: Length,
        capacity: Length,
    },

    #[error("residency vector holds {provided} entries, {required} required")]
    #[diagnostic(code(advice::vector_too_small))]
    VectorTooSmall { required: usize, provided: usize },

    #[error("{0}")]
    #[diagnostic(code(bridge::os))]
    Os(#[from] ErrorKind),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(bridge::io),
        help("Filesystem operation failed. Check file permissions and disk space.")
    )]
    Io(#[from] std::io::Error),
}

/// Result alias for the typed API
pub type BridgeResult<T> = Result<T, BridgeError>;
