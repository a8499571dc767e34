/*!
 * C ABI
 * Exported entry points for the managed caller
 *
 * Addresses and lengths cross the boundary as signed 64-bit integers, the
 * width the caller stores them in. Managed containers arrive as a pointer plus
 * capacity; a range outside the container is rejected with -1 before any byte
 * is copied, since unwinding across this boundary would abort the host.
 */

mod memory;
mod stat;

pub use memory::*;
pub use stat::*;

use crate::core::config::BridgeConfig;
use crate::core::types::{Address, Length};
use crate::monitoring::init_tracing;

/// Install the tracing subscriber configured from the environment
///
/// Returns 1 if installed, 0 if a subscriber was already present.
#[no_mangle]
pub extern "C" fn vmem_init_tracing() -> i32 {
    i32::from(init_tracing(&BridgeConfig::from_env()))
}

#[inline]
fn address(raw: i64) -> Address {
    raw as Address
}

/// Negative lengths become `u64::MAX` so the OS rejects them
#[inline]
fn length(raw: i64) -> Length {
    u64::try_from(raw).unwrap_or(u64::MAX)
}

/// View caller memory as a byte slice, or `None` if the pointer is unusable
///
/// # Safety
/// A non-null `ptr` must be valid for `capacity` bytes.
unsafe fn managed<'a>(ptr: *const u8, capacity: usize) -> Option<&'a [u8]> {
    if capacity == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(ptr, capacity))
}

/// Mutable counterpart of [`managed`]
///
/// # Safety
/// A non-null `ptr` must be valid for `capacity` bytes and not aliased.
unsafe fn managed_mut<'a>(ptr: *mut u8, capacity: usize) -> Option<&'a mut [u8]> {
    if capacity == 0 {
        return Some(&mut []);
    }
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts_mut(ptr, capacity))
}

/// Validate `offset..offset+length` against a container of `capacity` bytes
#[inline]
fn window(offset: i32, length: i32, capacity: usize) -> Option<(usize, usize)> {
    let offset = usize::try_from(offset).ok()?;
    let length = usize::try_from(length).ok()?;
    let end = offset.checked_add(length)?;
    (end <= capacity).then_some((offset, length))
}
