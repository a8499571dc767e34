/*!
 * Native/Managed Copy Tests
 */

use bytes::BytesMut;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vmem_bridge::advice::page_size;
use vmem_bridge::copy::{
    copy_managed_array_to_native, copy_managed_to_native, copy_native,
    copy_native_to_managed, copy_native_to_managed_array,
};
use vmem_bridge::{MappedRegion, Protection};

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

#[test]
fn test_round_trip_through_anonymous_mapping() {
    for len in [0usize, 1, 4096, 1 << 20] {
        let capacity = len.max(page_size()) as u64;
        let region = MappedRegion::anonymous(capacity, Protection::READ_WRITE).unwrap();
        let mut rng = StdRng::seed_from_u64(len as u64);
        let source: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let mut back = vec![0u8; len];

        unsafe {
            copy_managed_array_to_native(&source, 0, len, region.address());
            copy_native_to_managed_array(region.address(), len, &mut back, 0);
        }
        assert_eq!(back, source, "length {len}");
        region.unmap().unwrap();
    }
}

#[test]
fn test_offsets_are_honoured() {
    let source = pattern(64);
    let mut native = vec![0u8; 16];
    let mut dest = vec![0xEEu8; 64];

    unsafe {
        copy_managed_to_native(source.as_slice(), 10, native.as_mut_ptr() as usize, 16);
        copy_native_to_managed(native.as_ptr() as usize, dest.as_mut_slice(), 40, 16);
    }

    assert_eq!(native, source[10..26].to_vec());
    assert_eq!(&dest[40..56], &source[10..26]);
    assert!(dest[..40].iter().all(|&b| b == 0xEE));
    assert!(dest[56..].iter().all(|&b| b == 0xEE));
}

#[test]
fn test_direct_buffer_accepts_bytes_mut() {
    let source = pattern(32);
    let mut buffer = BytesMut::zeroed(32);

    unsafe { copy_native_to_managed(source.as_ptr() as usize, &mut buffer, 0, 32) };

    assert_eq!(&buffer[..], source.as_slice());
}

#[test]
fn test_native_copy_handles_overlap() {
    let mut data = pattern(32);
    let expected: Vec<u8> = data[0..24].to_vec();
    let base = data.as_mut_ptr() as usize;

    unsafe { copy_native(base, base + 8, 24) };

    assert_eq!(&data[8..32], expected.as_slice());
}

#[test]
fn test_zero_length_copies_touch_nothing() {
    let mut dest = [7u8; 4];
    unsafe {
        copy_native_to_managed(0, &mut dest, 4, 0);
        copy_native(0, 0, 0);
    }
    assert_eq!(dest, [7u8; 4]);
}

#[test]
#[should_panic]
fn test_window_past_array_end_panics() {
    let source = [1u8; 8];
    let mut native = [0u8; 8];
    unsafe { copy_managed_array_to_native(&source, 4, 8, native.as_mut_ptr() as usize) };
}

proptest! {
    #[test]
    fn prop_copy_preserves_bytes(
        data in proptest::collection::vec(any::<u8>(), 0..4096),
        head in 0usize..64,
    ) {
        let mut native = vec![0u8; data.len()];
        let mut back = vec![0u8; head + data.len()];

        unsafe {
            copy_managed_array_to_native(&data, 0, data.len(), native.as_mut_ptr() as usize);
            copy_native_to_managed_array(native.as_ptr() as usize, data.len(), &mut back, head);
        }

        prop_assert_eq!(&back[head..], data.as_slice());
        prop_assert!(back[..head].iter().all(|&b| b == 0));
    }
}
