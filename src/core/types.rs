/*!
 * Core Types
 * Common types used across the bridge
 */

/// Native address of a byte in this process (never dereferenced without `unsafe`)
pub type Address = usize;

/// Byte length of a native range
pub type Length = u64;

/// OS file descriptor
pub type RawFd = i32;

/// Raw OS return code (0 = success, nonzero = failure; see `last_errno`)
pub type OsResult = i32;

/// Convert a caller-supplied 64-bit length into a native size
///
/// Lengths beyond the address space saturate so the OS rejects them instead of
/// silently truncating.
#[inline]
#[must_use]
pub fn native_len(length: Length) -> usize {
    usize::try_from(length).unwrap_or(usize::MAX)
}
