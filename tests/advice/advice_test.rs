/*!
 * Advice and Pinning Tests
 */

use serial_test::serial;
use vmem_bridge::advice::{self, codes, page_size};
use vmem_bridge::core::limits::MAP_FAILED;
use vmem_bridge::mmap::{self, MapFlags, Protection};
use vmem_bridge::ErrorKind;

fn anonymous(pages: usize) -> (usize, u64) {
    let len = (page_size() * pages) as u64;
    let flags = MapFlags::PRIVATE | MapFlags::ANONYMOUS;
    let addr = mmap::map(len, Protection::READ_WRITE, flags, -1, 0);
    assert_ne!(addr, MAP_FAILED);
    (addr, len)
}

#[test]
fn test_named_advice_succeeds_on_live_mapping() {
    let (addr, len) = anonymous(4);
    unsafe {
        assert_eq!(advice::advise_will_need(addr, len), 0);
        assert_eq!(advice::advise_dont_need(addr, len), 0);
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}

#[test]
fn test_generic_advice_accepts_raw_codes() {
    let (addr, len) = anonymous(2);
    unsafe {
        assert_eq!(advice::advise(addr, len, codes::SEQUENTIAL), 0);
        assert_eq!(advice::advise(addr, len, codes::RANDOM), 0);
        assert_eq!(advice::advise(addr, len, codes::NORMAL), 0);
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}

#[test]
fn test_advice_failure_is_raw_passthrough() {
    let (addr, len) = anonymous(1);
    unsafe {
        // Misaligned start: EINVAL, surfaced untranslated
        assert_ne!(advice::advise_will_need(addr + 1, 16), 0);
        assert_eq!(vmem_bridge::last_errno(), libc::EINVAL);
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}

#[test]
fn test_dont_need_discards_private_anonymous_pages() {
    let (addr, len) = anonymous(1);
    unsafe {
        *(addr as *mut u8) = 0x5A;
        assert_eq!(advice::advise_dont_need(addr, len), 0);
        assert_eq!(*(addr as *const u8), 0);
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}

#[test]
#[serial]
fn test_zero_length_lock_is_idempotent() {
    let (addr, len) = anonymous(1);
    unsafe {
        for _ in 0..2 {
            assert_eq!(advice::lock(addr, 0), Ok(()));
            assert_eq!(advice::unlock(addr, 0), Ok(()));
        }
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}

#[test]
#[serial]
fn test_single_page_lock_round_trip() {
    let (addr, len) = anonymous(1);
    unsafe {
        match advice::lock(addr, len) {
            Ok(()) => assert_eq!(advice::unlock(addr, len), Ok(())),
            // RLIMIT_MEMLOCK may be zero in restricted environments
            Err(kind) => assert!(
                matches!(
                    kind,
                    ErrorKind::OutOfMemory | ErrorKind::PermissionDenied | ErrorKind::Again
                ),
                "unexpected {kind:?}"
            ),
        }
        assert_eq!(mmap::unmap(addr, len), 0);
    }
}
