/*!
 * Disk Usage
 * Allocated bytes under a path, measured with lstat
 */

use super::reader::lstat_path;
use crate::core::errors::ErrorKind;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Total bytes allocated on disk for `path` and, for directories, everything
/// beneath it
///
/// Symbolic links are counted as themselves and never followed. A path that
/// does not exist counts as zero, and so does a directory that cannot be
/// listed.
pub fn disk_usage(path: impl AsRef<Path>) -> Result<u64, ErrorKind> {
    let path = path.as_ref();
    let status = match lstat_path(path) {
        Ok(status) => status,
        Err(ErrorKind::NotFound) => return Ok(0),
        Err(kind) => return Err(kind),
    };

    let own = status.allocated_bytes();
    if !status.is_directory() {
        return Ok(own);
    }

    let Ok(entries) = fs::read_dir(path) else {
        debug!(path = %path.display(), "directory not listable, counted as empty");
        return Ok(0);
    };

    let mut total = own;
    for entry in entries.flatten() {
        total = total.saturating_add(disk_usage(entry.path())?);
    }
    Ok(total)
}
