/*!
 * Memory Exports
 * mmap family, advice, pinning, residency, and raw copies
 */

use super::{address, length, managed, managed_mut, window};
use crate::advice;
use crate::copy;
use crate::core::errno::last_errno;
use crate::core::limits::{MAP_FAILED, MAP_FAILED_ABI};
use crate::core::types::Address;
use crate::mmap::{self, MapFlags, Protection};

#[inline]
fn to_abi(addr: Address) -> i64 {
    if addr == MAP_FAILED {
        MAP_FAILED_ABI
    } else {
        addr as i64
    }
}

#[inline]
fn status(result: Result<(), crate::core::errors::ErrorKind>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(kind) => kind.memory_code(),
    }
}

/// Map a file or anonymous memory; returns the address or -1
#[no_mangle]
pub extern "C" fn vmem_mmap(len: i64, prot: i32, flags: i32, fd: i32, offset: i64) -> i64 {
    let Ok(offset) = u64::try_from(offset) else {
        return MAP_FAILED_ABI;
    };
    to_abi(mmap::map(
        length(len),
        Protection::from_raw(prot),
        MapFlags::from_raw(flags),
        fd,
        offset,
    ))
}

/// # Safety
/// See [`mmap::unmap`].
#[no_mangle]
pub unsafe extern "C" fn vmem_munmap(addr: i64, len: i64) -> i32 {
    mmap::unmap(address(addr), length(len))
}

/// # Safety
/// See [`mmap::remap`].
#[no_mangle]
pub unsafe extern "C" fn vmem_mremap(addr: i64, old_len: i64, new_len: i64) -> i64 {
    to_abi(mmap::remap(address(addr), length(old_len), length(new_len)))
}

/// # Safety
/// See [`mmap::flush`].
#[no_mangle]
pub unsafe extern "C" fn vmem_msync(addr: i64, len: i64) -> i32 {
    mmap::flush(address(addr), length(len))
}

/// # Safety
/// See [`advice::advise`].
#[no_mangle]
pub unsafe extern "C" fn vmem_madvise_willneed(addr: i64, len: i64) -> i32 {
    advice::advise_will_need(address(addr), length(len))
}

/// # Safety
/// See [`advice::advise`].
#[no_mangle]
pub unsafe extern "C" fn vmem_madvise_dontneed(addr: i64, len: i64) -> i32 {
    advice::advise_dont_need(address(addr), length(len))
}

/// # Safety
/// See [`advice::advise`].
#[no_mangle]
pub unsafe extern "C" fn vmem_madvise(addr: i64, len: i64, advice_code: i32) -> i32 {
    advice::advise(address(addr), length(len), advice_code)
}

/// Last OS error number on the calling thread
#[no_mangle]
pub extern "C" fn vmem_errno() -> i32 {
    last_errno()
}

/// OS page size in bytes
#[no_mangle]
pub extern "C" fn vmem_page_size() -> i64 {
    advice::page_size() as i64
}

/// Returns 0 or an `ErrorKind::memory_code`
///
/// # Safety
/// See [`advice::lock`].
#[no_mangle]
pub unsafe extern "C" fn vmem_mlock(addr: i64, len: i64) -> i32 {
    status(advice::lock(address(addr), length(len)))
}

/// Returns 0 or an `ErrorKind::memory_code`
///
/// # Safety
/// See [`advice::unlock`].
#[no_mangle]
pub unsafe extern "C" fn vmem_munlock(addr: i64, len: i64) -> i32 {
    status(advice::unlock(address(addr), length(len)))
}

/// Returns 0 or an `ErrorKind::memory_code`
///
/// # Safety
/// `vec` must address at least one byte per page of the range.
#[no_mangle]
pub unsafe extern "C" fn vmem_mincore(addr: i64, len: i64, vec: i64) -> i32 {
    status(advice::query_residency(
        address(addr),
        length(len),
        address(vec) as *mut u8,
    ))
}

/// Copy native memory into a managed buffer; 0 on success, -1 if the range
/// does not fit the buffer
///
/// # Safety
/// `src` must be readable for `len` bytes; `dest` valid for `capacity` bytes.
#[no_mangle]
pub unsafe extern "C" fn vmem_copy_to_buffer(
    src: i64,
    dest: *mut u8,
    capacity: usize,
    offset: i32,
    len: i32,
) -> i32 {
    let (Some(buf), Some((offset, len))) =
        (managed_mut(dest, capacity), window(offset, len, capacity))
    else {
        return -1;
    };
    copy::copy_native_to_managed(address(src), buf, offset, len);
    0
}

/// Copy part of a managed buffer to native memory; 0 on success, -1 if the
/// range does not fit the buffer
///
/// # Safety
/// `src` valid for `capacity` bytes; `dest` writable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn vmem_copy_from_buffer(
    src: *const u8,
    capacity: usize,
    offset: i32,
    dest: i64,
    len: i32,
) -> i32 {
    let (Some(buf), Some((offset, len))) =
        (managed(src, capacity), window(offset, len, capacity))
    else {
        return -1;
    };
    copy::copy_managed_to_native(buf, offset, address(dest), len);
    0
}

/// Copy part of a byte array to native memory; 0 on success, -1 if the range
/// does not fit the array
///
/// # Safety
/// `src` valid for `src_len` bytes; `dest` writable for `len` bytes.
#[no_mangle]
pub unsafe extern "C" fn vmem_copy_from_array(
    src: *const u8,
    src_len: usize,
    offset: i32,
    len: i32,
    dest: i64,
) -> i32 {
    let (Some(array), Some((offset, len))) =
        (managed(src, src_len), window(offset, len, src_len))
    else {
        return -1;
    };
    copy::copy_managed_array_to_native(array, offset, len, address(dest));
    0
}

/// Copy native memory into a byte array; 0 on success, -1 if the range does
/// not fit the array
///
/// # Safety
/// `src` readable for `len` bytes; `dest` valid for `dest_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn vmem_copy_to_array(
    src: i64,
    len: i32,
    dest: *mut u8,
    dest_len: usize,
    offset: i32,
) -> i32 {
    let (Some(array), Some((offset, len))) =
        (managed_mut(dest, dest_len), window(offset, len, dest_len))
    else {
        return -1;
    };
    copy::copy_native_to_managed_array(address(src), len, array, offset);
    0
}

/// Copy between two native ranges, which may overlap; 0 on success, -1 for a
/// negative length
///
/// # Safety
/// See [`copy::copy_native`].
#[no_mangle]
pub unsafe extern "C" fn vmem_copy_native(src: i64, dest: i64, len: i64) -> i32 {
    let Ok(len) = usize::try_from(len) else {
        return -1;
    };
    copy::copy_native(address(src), address(dest), len);
    0
}
