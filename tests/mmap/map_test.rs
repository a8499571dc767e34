/*!
 * Raw Mapping Tests
 * map, unmap, remap, and flush against real files and anonymous memory
 */

use nix::errno::Errno;
use pretty_assertions::assert_eq;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::os::fd::AsRawFd;
use tempfile::TempDir;
use vmem_bridge::core::limits::MAP_FAILED;
use vmem_bridge::last_errno;
use vmem_bridge::mmap::{self, MapFlags, Protection};

fn page() -> u64 {
    vmem_bridge::advice::page_size() as u64
}

fn anonymous_page() -> usize {
    let flags = MapFlags::PRIVATE | MapFlags::ANONYMOUS;
    mmap::map(page(), Protection::READ_WRITE, flags, -1, 0)
}

fn file_with(dir: &TempDir, name: &str, contents: &[u8]) -> File {
    let path = dir.path().join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(contents).unwrap();
    drop(file);
    OpenOptions::new().read(true).write(true).open(path).unwrap()
}

#[test]
fn test_map_unmap_for_every_valid_combination() {
    let dir = TempDir::new().unwrap();
    let file = file_with(&dir, "data.bin", &vec![7u8; page() as usize * 2]);

    for protection in [Protection::READ_ONLY, Protection::READ_WRITE] {
        for flags in [MapFlags::SHARED, MapFlags::PRIVATE] {
            let addr = mmap::map(page() * 2, protection, flags, file.as_raw_fd(), 0);
            assert_ne!(addr, MAP_FAILED, "{protection:?} {flags:?}");
            assert_eq!(unsafe { *(addr as *const u8) }, 7);
            assert_eq!(unsafe { mmap::unmap(addr, page() * 2) }, 0);
        }
    }

    let addr = anonymous_page();
    assert_ne!(addr, MAP_FAILED);
    assert_eq!(unsafe { mmap::unmap(addr, page()) }, 0);
}

#[test]
fn test_offset_mapping_sees_later_bytes() {
    let dir = TempDir::new().unwrap();
    let mut contents = vec![1u8; page() as usize];
    contents.extend(vec![2u8; page() as usize]);
    let file = file_with(&dir, "offset.bin", &contents);

    let addr = mmap::map(page(), Protection::READ_ONLY, MapFlags::SHARED, file.as_raw_fd(), page());
    assert_ne!(addr, MAP_FAILED);
    assert_eq!(unsafe { *(addr as *const u8) }, 2);
    assert_eq!(unsafe { mmap::unmap(addr, page()) }, 0);
}

#[test]
fn test_undefined_protection_skips_the_os() {
    Errno::clear();
    let addr = mmap::map(page(), Protection::from_raw(3), MapFlags::SHARED, -1, 0);
    assert_eq!(addr, MAP_FAILED);
    // A real mmap on fd -1 would have set EBADF
    assert_ne!(last_errno(), libc::EBADF);
}

#[test]
fn test_failed_map_reports_sentinel_and_errno() {
    let addr = mmap::map(page(), Protection::READ_ONLY, MapFlags::SHARED, -1, 0);
    assert_eq!(addr, MAP_FAILED);
    assert_eq!(last_errno(), libc::EBADF);
}

#[test]
fn test_shared_writes_reach_the_file_after_flush() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.bin");
    let file = file_with(&dir, "shared.bin", &vec![0u8; page() as usize]);

    let addr = mmap::map(page(), Protection::READ_WRITE, MapFlags::SHARED, file.as_raw_fd(), 0);
    assert_ne!(addr, MAP_FAILED);
    unsafe {
        std::ptr::copy_nonoverlapping(b"hello".as_ptr(), addr as *mut u8, 5);
        assert_eq!(mmap::flush(addr, page()), 0);
        assert_eq!(mmap::unmap(addr, page()), 0);
    }

    let on_disk = fs::read(path).unwrap();
    assert_eq!(&on_disk[..5], b"hello");
}

#[test]
fn test_private_writes_stay_private() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("private.bin");
    let file = file_with(&dir, "private.bin", &vec![0u8; page() as usize]);

    let addr = mmap::map(page(), Protection::READ_WRITE, MapFlags::PRIVATE, file.as_raw_fd(), 0);
    assert_ne!(addr, MAP_FAILED);
    unsafe {
        *(addr as *mut u8) = 0xAA;
        assert_eq!(mmap::unmap(addr, page()), 0);
    }

    assert_eq!(fs::read(path).unwrap()[0], 0);
}

#[cfg(target_os = "linux")]
#[test]
fn test_remap_grows_and_keeps_contents() {
    let addr = anonymous_page();
    assert_ne!(addr, MAP_FAILED);
    unsafe { *(addr as *mut u8) = 42 };

    let moved = unsafe { mmap::remap(addr, page(), page() * 16) };
    assert_ne!(moved, MAP_FAILED);
    assert_eq!(unsafe { *(moved as *const u8) }, 42);
    unsafe { *((moved + (page() as usize) * 15) as *mut u8) = 1 };
    assert_eq!(unsafe { mmap::unmap(moved, page() * 16) }, 0);
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
#[test]
fn test_remap_unsupported_returns_sentinel() {
    let addr = anonymous_page();
    assert_eq!(unsafe { mmap::remap(addr, page(), page() * 2) }, MAP_FAILED);
    assert_eq!(unsafe { mmap::unmap(addr, page()) }, 0);
}

#[test]
fn test_sentinel_is_all_bits_set() {
    assert_eq!(MAP_FAILED, usize::MAX);
    assert_eq!(MAP_FAILED as i64, -1);
}
