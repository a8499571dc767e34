/*!
 * Memory Map Manager
 * Raw map, unmap, remap, and flush over file descriptors or anonymous memory
 *
 * Failures are signalled the way the OS signals them: `map`/`remap` return
 * `MAP_FAILED`, `unmap`/`flush` return the OS result code. Detail is available
 * from `last_errno()` on the same thread.
 */

use super::types::{MapFlags, Protection};
use crate::core::errno::last_errno;
use crate::core::limits::MAP_FAILED;
use crate::core::types::{native_len, Address, Length, OsResult, RawFd};
use std::ptr;
use tracing::{debug, trace};

/// Map `length` bytes of `fd` starting at `offset`
///
/// Returns the mapped address or `MAP_FAILED`. An undefined protection value
/// returns `MAP_FAILED` without calling the OS. The kernel chooses the address
/// (no fixed placement), so this cannot clobber existing mappings.
pub fn map(
    length: Length,
    protection: Protection,
    flags: MapFlags,
    fd: RawFd,
    offset: Length,
) -> Address {
    let Some(prot) = protection.to_os() else {
        debug!(protection = protection.raw(), "mmap rejected: undefined protection");
        return MAP_FAILED;
    };
    let Ok(offset) = libc::off_t::try_from(offset) else {
        debug!(offset, "mmap rejected: offset out of range");
        return MAP_FAILED;
    };

    let addr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            native_len(length),
            prot,
            flags.to_os(),
            fd,
            offset,
        )
    };

    if addr == libc::MAP_FAILED {
        debug!(length, fd, offset, errno = last_errno(), "mmap failed");
        return MAP_FAILED;
    }

    trace!(address = addr as usize, length, fd, "mmap");
    addr as Address
}

/// Unmap `length` bytes at `address`
///
/// # Safety
/// `address..address+length` must not be referenced after this call. Unmapping
/// a range this process did not map is undefined at the OS level.
pub unsafe fn unmap(address: Address, length: Length) -> OsResult {
    let rc = libc::munmap(address as *mut libc::c_void, native_len(length));
    if rc != 0 {
        debug!(address, length, errno = last_errno(), "munmap failed");
    } else {
        trace!(address, length, "munmap");
    }
    rc
}

/// Resize a mapping, allowing the kernel to move it
///
/// Returns the new address (possibly different from `address`) or
/// `MAP_FAILED`. On platforms without relocating remap this always fails and
/// the caller must unmap and map again.
///
/// # Safety
/// On success the old address is invalid; every reference to it must be
/// replaced before any other thread touches the region.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub unsafe fn remap(address: Address, old_length: Length, new_length: Length) -> Address {
    let addr = libc::mremap(
        address as *mut libc::c_void,
        native_len(old_length),
        native_len(new_length),
        libc::MREMAP_MAYMOVE,
    );
    if addr == libc::MAP_FAILED {
        debug!(address, old_length, new_length, errno = last_errno(), "mremap failed");
        return MAP_FAILED;
    }
    trace!(from = address, to = addr as usize, old_length, new_length, "mremap");
    addr as Address
}

/// Resize a mapping, allowing the kernel to move it
///
/// # Safety
/// See the Linux variant; this platform has no relocating remap.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub unsafe fn remap(address: Address, old_length: Length, new_length: Length) -> Address {
    debug!(address, old_length, new_length, "mremap unsupported on this platform");
    MAP_FAILED
}

/// Whether `remap` can succeed on this platform
#[must_use]
pub const fn remap_supported() -> bool {
    cfg!(any(target_os = "linux", target_os = "android"))
}

/// Synchronously flush `length` bytes at `address` to the backing file
///
/// Blocks until the OS reports the pages durable or fails.
///
/// # Safety
/// The range must lie within a live mapping.
pub unsafe fn flush(address: Address, length: Length) -> OsResult {
    let rc = libc::msync(
        address as *mut libc::c_void,
        native_len(length),
        libc::MS_SYNC,
    );
    if rc != 0 {
        debug!(address, length, errno = last_errno(), "msync failed");
    } else {
        trace!(address, length, "msync");
    }
    rc
}
