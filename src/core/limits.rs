/*!
 * Bridge Limits and Constants
 *
 * Numeric values shared with the managed caller. These are part of the public
 * contract: changing any of them is a compatibility break.
 */

use super::types::Address;

// =============================================================================
// MAPPING CONTRACT
// =============================================================================

/// Caller protection value: pages may be read
pub const PROT_READ_ONLY: i32 = 0;

/// Caller protection value: pages may be read and written
pub const PROT_READ_WRITE: i32 = 1;

/// Caller mapping flag: changes are visible to other mappings of the file
pub const MAP_SHARED: i32 = 1;

/// Caller mapping flag: copy-on-write mapping
pub const MAP_PRIVATE: i32 = 2;

/// Caller mapping flag: not backed by any file
pub const MAP_ANONYMOUS: i32 = 4;

/// Sentinel returned by `map`/`remap` on failure
/// All bits set, so it can never collide with a mapped address.
pub const MAP_FAILED: Address = Address::MAX;

/// Sentinel as seen through the 64-bit signed C ABI
pub const MAP_FAILED_ABI: i64 = -1;

// =============================================================================
// PAGES
// =============================================================================

/// Page size assumed when the OS refuses to report one
pub const FALLBACK_PAGE_SIZE: usize = 4096;

// =============================================================================
// FILE STATUS RECORD
// =============================================================================

/// Size of the serialized file status record
pub const STAT_RECORD_SIZE: usize = 92;

/// Multiplier applied to `st_blocks` to obtain allocated bytes
pub const STAT_BLOCK_UNIT: u64 = 512;

// =============================================================================
// FILE DESCRIPTORS
// =============================================================================

/// Returned by the descriptor extractor when a handle cannot be resolved
pub const NO_DESCRIPTOR: i32 = -1;
