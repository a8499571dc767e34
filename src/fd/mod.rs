/*!
 * File Descriptor Extraction
 * Resolves the OS descriptor behind an opaque file handle
 */

use crate::core::limits::NO_DESCRIPTOR;
use crate::core::types::RawFd;
use std::fs::File;
use std::os::fd::{AsRawFd, BorrowedFd, OwnedFd};

/// A handle whose underlying OS descriptor may be looked up
///
/// `None` means the handle's type could not be resolved to a descriptor.
pub trait FileHandle {
    fn descriptor(&self) -> Option<RawFd>;
}

impl FileHandle for File {
    fn descriptor(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl FileHandle for OwnedFd {
    fn descriptor(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl FileHandle for BorrowedFd<'_> {
    fn descriptor(&self) -> Option<RawFd> {
        Some(self.as_raw_fd())
    }
}

impl<H: FileHandle> FileHandle for Option<H> {
    fn descriptor(&self) -> Option<RawFd> {
        self.as_ref().and_then(FileHandle::descriptor)
    }
}

impl<H: FileHandle + ?Sized> FileHandle for &H {
    fn descriptor(&self) -> Option<RawFd> {
        (**self).descriptor()
    }
}

/// Descriptor carried by value, e.g. one received from the managed side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignDescriptor(pub RawFd);

impl FileHandle for ForeignDescriptor {
    fn descriptor(&self) -> Option<RawFd> {
        (self.0 >= 0).then_some(self.0)
    }
}

/// Extract the OS descriptor from a handle
///
/// Returns `NO_DESCRIPTOR` (-1) when the handle cannot be resolved; the caller
/// raises its own diagnostic in that case.
#[must_use]
pub fn extract<H: FileHandle + ?Sized>(handle: &H) -> RawFd {
    match handle.descriptor() {
        Some(fd) => fd,
        None => {
            tracing::debug!("file handle did not resolve to a descriptor");
            NO_DESCRIPTOR
        }
    }
}
