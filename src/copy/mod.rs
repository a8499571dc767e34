/*!
 * Raw Buffer Copies
 * Byte-exact copies between native addresses and managed byte containers
 *
 * Ranges inside managed containers are checked by the container itself (slice
 * indexing panics when out of range). Native addresses are trusted as given.
 */

use crate::core::types::Address;
use bytes::BytesMut;
use std::ptr;

/// A managed byte container exposing contiguous storage
///
/// Stands in for an opaque direct-buffer view: the bridge only needs its bytes.
pub trait DirectBuffer {
    fn as_bytes(&self) -> &[u8];
    fn as_bytes_mut(&mut self) -> &mut [u8];
}

impl DirectBuffer for [u8] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl<const N: usize> DirectBuffer for [u8; N] {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl DirectBuffer for Vec<u8> {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

impl DirectBuffer for BytesMut {
    fn as_bytes(&self) -> &[u8] {
        self
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}

/// Copy `length` bytes from `src` into `dest` starting at `dest_offset`
///
/// # Safety
/// `src` must be readable for `length` bytes and must not overlap `dest`.
///
/// # Panics
/// If `dest_offset + length` exceeds the buffer.
pub unsafe fn copy_native_to_managed<B: DirectBuffer + ?Sized>(
    src: Address,
    dest: &mut B,
    dest_offset: usize,
    length: usize,
) {
    let window = &mut dest.as_bytes_mut()[dest_offset..dest_offset + length];
    if length == 0 {
        return;
    }
    ptr::copy_nonoverlapping(src as *const u8, window.as_mut_ptr(), length);
}

/// Copy `length` bytes of `src` starting at `src_offset` to `dest`
///
/// # Safety
/// `dest` must be writable for `length` bytes and must not overlap `src`.
///
/// # Panics
/// If `src_offset + length` exceeds the buffer.
pub unsafe fn copy_managed_to_native<B: DirectBuffer + ?Sized>(
    src: &B,
    src_offset: usize,
    dest: Address,
    length: usize,
) {
    let window = &src.as_bytes()[src_offset..src_offset + length];
    if length == 0 {
        return;
    }
    ptr::copy_nonoverlapping(window.as_ptr(), dest as *mut u8, length);
}

/// Copy `length` bytes of a byte array starting at `offset` to `dest`
///
/// # Safety
/// `dest` must be writable for `length` bytes and must not overlap `src`.
///
/// # Panics
/// If `offset + length` exceeds the array.
pub unsafe fn copy_managed_array_to_native(
    src: &[u8],
    offset: usize,
    length: usize,
    dest: Address,
) {
    copy_managed_to_native(src, offset, dest, length)
}

/// Copy `length` bytes from `src` into a byte array starting at `offset`
///
/// # Safety
/// `src` must be readable for `length` bytes and must not overlap `dest`.
///
/// # Panics
/// If `offset + length` exceeds the array.
pub unsafe fn copy_native_to_managed_array(
    src: Address,
    length: usize,
    dest: &mut [u8],
    offset: usize,
) {
    copy_native_to_managed(src, dest, offset, length)
}

/// Copy `length` bytes between two native addresses; the ranges may overlap
///
/// # Safety
/// `src` must be readable and `dest` writable for `length` bytes.
pub unsafe fn copy_native(src: Address, dest: Address, length: usize) {
    if length == 0 {
        return;
    }
    ptr::copy(src as *const u8, dest as *mut u8, length);
}
