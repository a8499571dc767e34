/*!
 * Memory Advice
 * Residency hints, page pinning, and residency queries over mapped ranges
 *
 * Advice calls pass the raw OS result straight through: advice is a hint and a
 * failure never affects correctness. Pinning and residency queries translate
 * failures into `ErrorKind`.
 */

pub mod residency;

use crate::core::errno::{last_errno, last_error, OsCall};
use crate::core::errors::ErrorKind;
use crate::core::types::{native_len, Address, Length, OsResult};
use tracing::debug;

pub use residency::{page_size, resident_page_count, residency_vector_len};

/// Raw advice codes accepted by [`advise`]
pub mod codes {
    pub const NORMAL: i32 = libc::MADV_NORMAL;
    pub const RANDOM: i32 = libc::MADV_RANDOM;
    pub const SEQUENTIAL: i32 = libc::MADV_SEQUENTIAL;
    pub const WILL_NEED: i32 = libc::MADV_WILLNEED;
    pub const DONT_NEED: i32 = libc::MADV_DONTNEED;
}

/// Advise the OS with an arbitrary platform advice code
///
/// # Safety
/// The range must lie within a live mapping. Some codes (e.g. `DONT_NEED` on a
/// private mapping) discard page contents.
pub unsafe fn advise(address: Address, length: Length, advice: i32) -> OsResult {
    let rc = libc::madvise(address as *mut libc::c_void, native_len(length), advice);
    if rc != 0 {
        debug!(address, length, advice, errno = last_errno(), "madvise failed");
    }
    rc
}

/// Hint that the range will be accessed soon
///
/// # Safety
/// See [`advise`].
pub unsafe fn advise_will_need(address: Address, length: Length) -> OsResult {
    advise(address, length, codes::WILL_NEED)
}

/// Hint that the range will not be accessed soon
///
/// # Safety
/// See [`advise`]. Private anonymous pages read back as zero afterwards.
pub unsafe fn advise_dont_need(address: Address, length: Length) -> OsResult {
    advise(address, length, codes::DONT_NEED)
}

/// Pin the range in physical memory
///
/// # Safety
/// The range must lie within a live mapping.
pub unsafe fn lock(address: Address, length: Length) -> Result<(), ErrorKind> {
    if libc::mlock(address as *const libc::c_void, native_len(length)) != 0 {
        let kind = last_error(OsCall::Lock);
        debug!(address, length, kind = kind.as_str(), "mlock failed");
        return Err(kind);
    }
    Ok(())
}

/// Release a pin taken by [`lock`]
///
/// # Safety
/// The range must lie within a live mapping.
pub unsafe fn unlock(address: Address, length: Length) -> Result<(), ErrorKind> {
    if libc::munlock(address as *const libc::c_void, native_len(length)) != 0 {
        let kind = last_error(OsCall::Unlock);
        debug!(address, length, kind = kind.as_str(), "munlock failed");
        return Err(kind);
    }
    Ok(())
}

/// Fill `vector` with one byte per page of the range; bit 0 set means resident
///
/// `address` must be page aligned.
///
/// # Safety
/// `vector` must be valid for `residency_vector_len(length)` bytes. Capacity is
/// not checked here.
pub unsafe fn query_residency(
    address: Address,
    length: Length,
    vector: *mut u8,
) -> Result<(), ErrorKind> {
    if libc::mincore(address as *mut libc::c_void, native_len(length), vector.cast()) != 0 {
        let kind = last_error(OsCall::Residency);
        debug!(address, length, kind = kind.as_str(), "mincore failed");
        return Err(kind);
    }
    Ok(())
}
