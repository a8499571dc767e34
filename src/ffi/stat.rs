/*!
 * File Status Exports
 */

use super::address;
use crate::core::errors::ErrorKind;
use crate::stat;
use std::ffi::{c_char, CStr};

/// # Safety
/// `path` must be null or a valid NUL-terminated string; `out` writable for
/// `STAT_RECORD_SIZE` bytes.
unsafe fn stat_c(path: *const c_char, follow_links: bool, out: i64) -> i32 {
    if path.is_null() {
        return ErrorKind::Fault.stat_code();
    }
    stat::stat_by_c_path(CStr::from_ptr(path), follow_links, address(out))
}

/// stat(2) into the record at `out`; 0 or a status code
///
/// # Safety
/// See [`stat::stat_by_path`].
#[no_mangle]
pub unsafe extern "C" fn vmem_stat(path: *const c_char, out: i64) -> i32 {
    stat_c(path, true, out)
}

/// lstat(2) into the record at `out`; 0 or a status code
///
/// # Safety
/// See [`stat::stat_by_path_no_follow`].
#[no_mangle]
pub unsafe extern "C" fn vmem_lstat(path: *const c_char, out: i64) -> i32 {
    stat_c(path, false, out)
}

/// fstat(2) into the record at `out`; 0 or a status code
///
/// # Safety
/// See [`stat::stat_by_descriptor`].
#[no_mangle]
pub unsafe extern "C" fn vmem_fstat(fd: i32, out: i64) -> i32 {
    stat::stat_by_descriptor(fd, address(out))
}
