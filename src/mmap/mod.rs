/*!
 * Memory Mapping Module
 * File-backed and anonymous mappings
 */

pub mod manager;
pub mod region;
pub mod types;

// Re-export for convenience
pub use manager::{flush, map, remap, remap_supported, unmap};
pub use region::MappedRegion;
pub use types::{MapFlags, Protection, Visibility};
