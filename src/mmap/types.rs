/*!
 * Mapping Types
 * Caller-facing protection and flag values and their OS translation
 */

use crate::core::limits::{
    MAP_ANONYMOUS, MAP_PRIVATE, MAP_SHARED, PROT_READ_ONLY, PROT_READ_WRITE,
};
use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// Memory protection as supplied by the caller
///
/// Only `READ_ONLY` and `READ_WRITE` are defined; any other raw value is a
/// contract violation and never reaches the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Protection(i32);

impl Protection {
    pub const READ_ONLY: Self = Self(PROT_READ_ONLY);
    pub const READ_WRITE: Self = Self(PROT_READ_WRITE);

    /// Wrap a raw caller value without validating it
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// OS protection bits, or `None` for an undefined value
    #[must_use]
    pub const fn to_os(self) -> Option<libc::c_int> {
        match self.0 {
            PROT_READ_ONLY => Some(libc::PROT_READ),
            PROT_READ_WRITE => Some(libc::PROT_READ | libc::PROT_WRITE),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_writable(self) -> bool {
        self.0 == PROT_READ_WRITE
    }
}

/// Mapping flags as supplied by the caller
///
/// `SHARED`, `PRIVATE` and `ANONYMOUS` are independent bits. They are not
/// checked for mutual exclusion here; the OS decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MapFlags(i32);

impl MapFlags {
    pub const NONE: Self = Self(0);
    pub const SHARED: Self = Self(MAP_SHARED);
    pub const PRIVATE: Self = Self(MAP_PRIVATE);
    pub const ANONYMOUS: Self = Self(MAP_ANONYMOUS);

    #[inline]
    #[must_use]
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// OS mapping flags; unknown caller bits are ignored
    #[must_use]
    pub const fn to_os(self) -> libc::c_int {
        let mut os = 0;
        if self.0 & MAP_SHARED != 0 {
            os |= libc::MAP_SHARED;
        }
        if self.0 & MAP_PRIVATE != 0 {
            os |= libc::MAP_PRIVATE;
        }
        if self.0 & MAP_ANONYMOUS != 0 {
            os |= libc::MAP_ANON;
        }
        os
    }
}

impl BitOr for MapFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Whether writes to a region are visible to other mappings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    Shared,
    Private,
}

impl From<Visibility> for MapFlags {
    fn from(visibility: Visibility) -> Self {
        match visibility {
            Visibility::Shared => MapFlags::SHARED,
            Visibility::Private => MapFlags::PRIVATE,
        }
    }
}
