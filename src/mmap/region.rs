/*!
 * Mapped Region Handle
 *
 * Typed view over one successful `map` call. The handle is an explicit
 * resource: it is released only by `unmap`, never on drop. Remapping takes
 * `&mut self`, so the relocated address is published to every holder of the
 * handle before anyone can touch the region again.
 */

use super::manager;
use super::types::{MapFlags, Protection, Visibility};
use crate::advice;
use crate::copy;
use crate::core::errno::last_errno;
use crate::core::errors::{BridgeError, BridgeResult, ErrorKind};
use crate::core::limits::MAP_FAILED;
use crate::core::types::{Address, Length};
use crate::fd::{self, FileHandle};
use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing::{info, instrument};

/// A live memory mapping owned by the caller
#[must_use = "a mapped region is only released by `unmap`"]
#[derive(Debug, PartialEq, Eq)]
pub struct MappedRegion {
    address: Address,
    length: Length,
    protection: Protection,
    visibility: Visibility,
    anonymous: bool,
}

impl MappedRegion {
    /// Map `length` bytes of an open file starting at `offset`
    ///
    /// A zero length produces an empty region without calling the OS.
    pub fn map_file<H: FileHandle + ?Sized>(
        handle: &H,
        offset: Length,
        length: Length,
        protection: Protection,
        visibility: Visibility,
    ) -> BridgeResult<Self> {
        let descriptor = fd::extract(handle);
        if descriptor < 0 {
            return Err(ErrorKind::BadDescriptor.into());
        }
        Self::establish(length, protection, visibility, false, descriptor, offset)
    }

    /// Map `length` bytes of zero-filled memory not backed by any file
    pub fn anonymous(length: Length, protection: Protection) -> BridgeResult<Self> {
        Self::establish(length, protection, Visibility::Private, true, -1, 0)
    }

    /// Open `path` and map `length` bytes of it as a shared region
    ///
    /// Read-write mappings grow the file to `offset + length` when it is
    /// shorter; read-only mappings of a short file are rejected. The file is
    /// closed once mapped.
    #[instrument(level = "debug", skip_all, fields(offset = offset, length = length), err)]
    pub fn open(
        path: impl AsRef<Path>,
        offset: Length,
        length: Length,
        protection: Protection,
    ) -> BridgeResult<Self> {
        let path = path.as_ref();
        let file = Self::open_file(path, protection)?;
        let required = offset.saturating_add(length);
        let current = file.metadata()?.len();

        if current < required {
            if protection.is_writable() {
                file.set_len(required)?;
            } else {
                return Err(BridgeError::OutOfBounds {
                    position: offset,
                    length,
                    capacity: current,
                });
            }
        }

        let region = Self::map_file(&file, offset, length, protection, Visibility::Shared)?;
        info!(path = %path.display(), offset, length, address = region.address, "mapped file");
        Ok(region)
    }

    fn open_file(path: &Path, protection: Protection) -> BridgeResult<File> {
        let mut options = OpenOptions::new();
        options.read(true);
        if protection.is_writable() {
            options.write(true).create(true).truncate(false);
        }
        Ok(options.open(path)?)
    }

    fn establish(
        length: Length,
        protection: Protection,
        visibility: Visibility,
        anonymous: bool,
        descriptor: i32,
        offset: Length,
    ) -> BridgeResult<Self> {
        if protection.to_os().is_none() {
            return Err(BridgeError::InvalidProtection(protection.raw()));
        }

        let address = if length == 0 {
            0
        } else {
            let mut flags = MapFlags::from(visibility);
            if anonymous {
                flags = flags | MapFlags::ANONYMOUS;
            }
            let address = manager::map(length, protection, flags, descriptor, offset);
            if address == MAP_FAILED {
                return Err(BridgeError::MapFailed {
                    length,
                    offset,
                    errno: last_errno(),
                });
            }
            address
        };

        Ok(Self {
            address,
            length,
            protection,
            visibility,
            anonymous,
        })
    }

    #[inline]
    pub fn address(&self) -> Address {
        self.address
    }

    #[inline]
    pub fn len(&self) -> Length {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    #[inline]
    pub fn protection(&self) -> Protection {
        self.protection
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    /// Release the mapping
    pub fn unmap(self) -> BridgeResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        let rc = unsafe { manager::unmap(self.address, self.length) };
        if rc != 0 {
            return Err(BridgeError::UnmapFailed {
                address: self.address,
                length: self.length,
                errno: last_errno(),
            });
        }
        Ok(())
    }

    /// Resize the mapping in place or by relocation
    ///
    /// On failure the region is left untouched and still valid.
    pub fn remap(&mut self, new_length: Length) -> BridgeResult<()> {
        if self.is_empty() || new_length == 0 {
            return Err(BridgeError::RemapFailed {
                old_length: self.length,
                new_length,
                errno: libc::EINVAL,
            });
        }

        let address = unsafe { manager::remap(self.address, self.length, new_length) };
        if address == MAP_FAILED {
            let errno = if manager::remap_supported() {
                last_errno()
            } else {
                libc::ENOSYS
            };
            return Err(BridgeError::RemapFailed {
                old_length: self.length,
                new_length,
                errno,
            });
        }

        self.address = address;
        self.length = new_length;
        Ok(())
    }

    /// Synchronously flush the whole region
    pub fn flush(&self) -> BridgeResult<()> {
        self.flush_range(0, self.length)
    }

    /// Synchronously flush part of the region
    ///
    /// The start is aligned down to a page boundary and the length clamped to
    /// the end of the region.
    pub fn flush_range(&self, position: Length, length: Length) -> BridgeResult<()> {
        let Some((address, length)) = self.page_span(position, length)? else {
            return Ok(());
        };
        if unsafe { manager::flush(address, length) } != 0 {
            return Err(BridgeError::FlushFailed {
                address,
                length,
                errno: last_errno(),
            });
        }
        Ok(())
    }

    /// Hint that part of the region will be needed soon
    pub fn advise_range(&self, position: Length, length: Length) -> BridgeResult<()> {
        let Some((address, length)) = self.page_span(position, length)? else {
            return Ok(());
        };
        if unsafe { advice::advise_will_need(address, length) } != 0 {
            return Err(BridgeError::AdviseFailed {
                address,
                length,
                errno: last_errno(),
            });
        }
        Ok(())
    }

    /// Hint that the region's pages may be dropped
    pub fn advise_dont_need(&self) -> BridgeResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        if unsafe { advice::advise_dont_need(self.address, self.length) } != 0 {
            return Err(BridgeError::AdviseFailed {
                address: self.address,
                length: self.length,
                errno: last_errno(),
            });
        }
        Ok(())
    }

    /// Pin part of the region in physical memory
    pub fn lock_range(&self, position: Length, length: Length) -> BridgeResult<()> {
        self.check_bounds(position, length)?;
        unsafe { advice::lock(self.address + position as usize, length) }?;
        Ok(())
    }

    /// Undo `lock_range`
    pub fn unlock_range(&self, position: Length, length: Length) -> BridgeResult<()> {
        self.check_bounds(position, length)?;
        unsafe { advice::unlock(self.address + position as usize, length) }?;
        Ok(())
    }

    /// Report page residency for part of the region, one byte per page
    ///
    /// `vector` must hold one entry per page touched by the aligned span.
    pub fn residency(
        &self,
        position: Length,
        length: Length,
        vector: &mut [u8],
    ) -> BridgeResult<()> {
        self.check_bounds(position, length)?;
        let Some((address, length)) = self.page_span(position, length)? else {
            return Ok(());
        };
        let required = advice::residency_vector_len(length);
        if vector.len() < required {
            return Err(BridgeError::VectorTooSmall {
                required,
                provided: vector.len(),
            });
        }
        unsafe { advice::query_residency(address, length, vector.as_mut_ptr()) }?;
        Ok(())
    }

    /// Copy bytes out of the region
    pub fn read_into(&self, position: Length, dest: &mut [u8]) -> BridgeResult<()> {
        self.check_bounds(position, dest.len() as Length)?;
        if dest.is_empty() {
            return Ok(());
        }
        let len = dest.len();
        unsafe {
            copy::copy_native_to_managed_array(self.address + position as usize, len, dest, 0)
        };
        Ok(())
    }

    /// Copy bytes into the region
    pub fn write_from(&self, position: Length, src: &[u8]) -> BridgeResult<()> {
        self.check_bounds(position, src.len() as Length)?;
        if src.is_empty() {
            return Ok(());
        }
        if !self.protection.is_writable() {
            return Err(ErrorKind::AccessDenied.into());
        }
        unsafe {
            copy::copy_managed_array_to_native(src, 0, src.len(), self.address + position as usize)
        };
        Ok(())
    }

    fn check_bounds(&self, position: Length, length: Length) -> BridgeResult<()> {
        match position.checked_add(length) {
            Some(end) if end <= self.length => Ok(()),
            _ => Err(BridgeError::OutOfBounds {
                position,
                length,
                capacity: self.length,
            }),
        }
    }

    /// Page-aligned `(address, length)` covering `[position, position+length)`
    /// clamped to the region; `None` when nothing remains
    fn page_span(
        &self,
        position: Length,
        length: Length,
    ) -> BridgeResult<Option<(Address, Length)>> {
        if position > self.length {
            return Err(BridgeError::OutOfBounds {
                position,
                length,
                capacity: self.length,
            });
        }
        let length = length.min(self.length - position);
        if length == 0 {
            return Ok(None);
        }

        let page = advice::page_size();
        let start = self.address + position as usize;
        let aligned = start / page * page;
        Ok(Some((aligned, length + (start - aligned) as Length)))
    }
}
