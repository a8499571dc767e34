/*!
 * Residency Helpers
 * Page size and residency vector arithmetic
 */

use crate::core::limits::FALLBACK_PAGE_SIZE;
use crate::core::types::{native_len, Length};
use std::sync::OnceLock;

/// OS page size in bytes
pub fn page_size() -> usize {
    static PAGE_SIZE: OnceLock<usize> = OnceLock::new();
    *PAGE_SIZE.get_or_init(|| {
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        usize::try_from(size)
            .ok()
            .filter(|s| s.is_power_of_two())
            .unwrap_or(FALLBACK_PAGE_SIZE)
    })
}

/// Entries needed in a residency vector covering `length` bytes from a page
/// boundary
#[must_use]
pub fn residency_vector_len(length: Length) -> usize {
    native_len(length).div_ceil(page_size())
}

/// Number of entries with the residency bit set
#[must_use]
pub fn resident_page_count(vector: &[u8]) -> usize {
    vector.iter().filter(|&&b| b & 1 != 0).count()
}
