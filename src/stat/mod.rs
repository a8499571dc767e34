/*!
 * File Status Module
 * Raw file metadata in a fixed binary layout
 */

pub mod reader;
pub mod record;
pub mod usage;

// Re-export for convenience
pub use reader::{
    fstat_descriptor, lstat_path, stat_by_c_path, stat_by_descriptor, stat_by_path,
    stat_by_path_no_follow, stat_path,
};
pub use record::{offsets, FileStatus, FileStatusRecord};
pub use usage::disk_usage;
