/*!
 * File Status Tests
 */

use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::os::unix::fs::{symlink, MetadataExt};
use tempfile::TempDir;
use vmem_bridge::core::limits::STAT_RECORD_SIZE;
use vmem_bridge::stat::{self, offsets, FileStatus, FileStatusRecord};
use vmem_bridge::{extract, ErrorKind};

fn record_of(buf: &[u8; STAT_RECORD_SIZE]) -> FileStatus {
    FileStatusRecord::from_bytes(*buf).decode()
}

#[test]
fn test_record_matches_os_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.bin");
    fs::write(&path, vec![1u8; 10_000]).unwrap();

    let mut buf = [0xABu8; STAT_RECORD_SIZE];
    let rc = unsafe { stat::stat_by_path(&path, buf.as_mut_ptr() as usize) };
    assert_eq!(rc, 0);

    let meta = fs::metadata(&path).unwrap();
    let status = record_of(&buf);
    assert_eq!(status.device, meta.dev());
    assert_eq!(status.inode, meta.ino());
    assert_eq!(status.mode, meta.mode());
    assert_eq!(status.links, meta.nlink());
    assert_eq!(status.uid, meta.uid());
    assert_eq!(status.gid, meta.gid());
    assert_eq!(status.rdev, meta.rdev());
    assert_eq!(status.size, meta.size() as i64);
    assert_eq!(status.size, 10_000);
    assert_eq!(status.block_size, meta.blksize() as i64);
    assert_eq!(status.blocks, meta.blocks() as i64);
    assert_eq!(status.atime, meta.atime());
    assert_eq!(status.mtime, meta.mtime());
    assert_eq!(status.ctime, meta.ctime());
    assert!(status.is_regular_file());
}

#[test]
fn test_size_lands_at_fixed_offset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sized");
    fs::write(&path, [0u8; 1234]).unwrap();

    let mut buf = [0u8; STAT_RECORD_SIZE];
    assert_eq!(unsafe { stat::stat_by_path(&path, buf.as_mut_ptr() as usize) }, 0);

    let mut size = [0u8; 8];
    size.copy_from_slice(&buf[offsets::SIZE..offsets::SIZE + 8]);
    assert_eq!(i64::from_ne_bytes(size), 1234);
}

#[test]
fn test_missing_path_leaves_buffer_untouched() {
    let mut buf = [0xABu8; STAT_RECORD_SIZE];
    let rc = unsafe { stat::stat_by_path("/nonexistent/vmem-bridge/x", buf.as_mut_ptr() as usize) };
    assert_eq!(rc, ErrorKind::NotFound.stat_code());
    assert_eq!(rc, 6);
    assert!(buf.iter().all(|&b| b == 0xAB));
}

#[test]
fn test_closed_set_of_failure_codes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain");
    fs::write(&file, b"x").unwrap();
    let a = dir.path().join("loop-a");
    let b = dir.path().join("loop-b");
    symlink(&b, &a).unwrap();
    symlink(&a, &b).unwrap();

    let mut buf = [0u8; STAT_RECORD_SIZE];
    let out = buf.as_mut_ptr() as usize;
    unsafe {
        assert_eq!(stat::stat_by_path(file.join("child"), out), 8);
        assert_eq!(stat::stat_by_path(&a, out), 4);
        let long = dir.path().join("n".repeat(4096));
        assert_eq!(stat::stat_by_path(&long, out), 5);
        assert_eq!(stat::stat_by_descriptor(-1, out), 2);
    }
}

#[test]
fn test_lstat_describes_the_link_itself() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("target");
    let link = dir.path().join("link");
    fs::write(&target, [0u8; 64]).unwrap();
    symlink(&target, &link).unwrap();

    let followed = stat::stat_path(&link).unwrap();
    let own = stat::lstat_path(&link).unwrap();

    assert!(followed.is_regular_file());
    assert_eq!(followed.size, 64);
    assert!(own.is_symlink());
    assert_eq!(own.inode, fs::symlink_metadata(&link).unwrap().ino());

    let mut buf = [0u8; STAT_RECORD_SIZE];
    assert_eq!(unsafe { stat::stat_by_path_no_follow(&link, buf.as_mut_ptr() as usize) }, 0);
    assert_eq!(record_of(&buf), own);
}

#[test]
fn test_fstat_through_extracted_descriptor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("opened");
    fs::write(&path, [9u8; 300]).unwrap();
    let file = File::open(&path).unwrap();

    let fd = extract(&file);
    assert!(fd >= 0);

    let mut buf = [0u8; STAT_RECORD_SIZE];
    assert_eq!(unsafe { stat::stat_by_descriptor(fd, buf.as_mut_ptr() as usize) }, 0);
    let status = record_of(&buf);
    assert_eq!(status, stat::fstat_descriptor(fd).unwrap());
    assert_eq!(status.size, 300);
    assert_eq!(status.inode, fs::metadata(&path).unwrap().ino());
}

#[test]
fn test_status_serializes() {
    let dir = TempDir::new().unwrap();
    let status = stat::stat_path(dir.path()).unwrap();
    assert!(status.is_directory());

    let json = serde_json::to_value(status).unwrap();
    assert_eq!(json["inode"], serde_json::json!(status.inode));
    assert_eq!(json["mode"], serde_json::json!(status.mode));

    let back: FileStatus = serde_json::from_value(json).unwrap();
    assert_eq!(back, status);
}
