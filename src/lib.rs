/*!
 * vmem-bridge
 * Virtual-memory primitives and raw file status for callers that cannot
 * issue system calls themselves
 *
 * - `mmap`: map, unmap, remap, and flush regions
 * - `advice`: residency hints, pinning, and residency queries
 * - `copy`: raw byte copies between native and managed memory
 * - `stat`: file metadata in a fixed 92-byte record
 * - `fd`: descriptor extraction from file handles
 * - `ffi`: the C ABI over all of the above
 */

pub mod advice;
pub mod copy;
pub mod core;
pub mod fd;
pub mod ffi;
pub mod mmap;
pub mod monitoring;
pub mod stat;

// Re-exports
pub use crate::core::errors::{BridgeError, BridgeResult, ErrorKind};
pub use crate::core::{last_errno, BridgeConfig};
pub use fd::{extract, FileHandle};
pub use mmap::{MapFlags, MappedRegion, Protection, Visibility};
pub use monitoring::init_tracing;
pub use stat::{FileStatus, FileStatusRecord};
