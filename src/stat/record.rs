/*!
 * File Status Record
 *
 * Fixed 92-byte layout shared with the managed caller. Fields are written at
 * explicit offsets in native byte order; nothing here depends on Rust struct
 * layout.
 *
 * | Offset | Width | Field          |
 * |--------|-------|----------------|
 * | 0      | 8     | st_dev         |
 * | 8      | 8     | st_ino         |
 * | 16     | 4     | st_mode        |
 * | 20     | 8     | st_nlink       |
 * | 28     | 4     | st_uid         |
 * | 32     | 4     | st_gid         |
 * | 36     | 8     | st_rdev        |
 * | 44     | 8     | st_size        |
 * | 52     | 8     | st_blksize     |
 * | 60     | 8     | st_blocks      |
 * | 68     | 8     | st_atime       |
 * | 76     | 8     | st_mtime       |
 * | 84     | 8     | st_ctime       |
 */

use crate::core::limits::STAT_RECORD_SIZE;
use crate::core::types::Address;
use serde::{Deserialize, Serialize};
use std::ptr;

/// Byte offsets of each record field
pub mod offsets {
    pub const DEVICE: usize = 0;
    pub const INODE: usize = 8;
    pub const MODE: usize = 16;
    pub const LINKS: usize = 20;
    pub const UID: usize = 28;
    pub const GID: usize = 32;
    pub const RDEV: usize = 36;
    pub const SIZE: usize = 44;
    pub const BLOCK_SIZE: usize = 52;
    pub const BLOCKS: usize = 60;
    pub const ATIME: usize = 68;
    pub const MTIME: usize = 76;
    pub const CTIME: usize = 84;
}

// st_mode bits
const S_IFMT: u32 = 0o170000;
const S_IFSOCK: u32 = 0o140000;
const S_IFLNK: u32 = 0o120000;
const S_IFREG: u32 = 0o100000;
const S_IFBLK: u32 = 0o060000;
const S_IFDIR: u32 = 0o040000;
const S_IFCHR: u32 = 0o020000;
const S_IFIFO: u32 = 0o010000;
const S_ISUID: u32 = 0o4000;
const S_ISGID: u32 = 0o2000;
const S_ISVTX: u32 = 0o1000;

/// Serialized file status, exactly as written to caller memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStatusRecord([u8; STAT_RECORD_SIZE]);

impl FileStatusRecord {
    /// Wrap bytes previously produced by `FileStatus::encode`
    #[must_use]
    pub const fn from_bytes(bytes: [u8; STAT_RECORD_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; STAT_RECORD_SIZE] {
        &self.0
    }

    /// Copy the record to caller memory in a single write
    ///
    /// # Safety
    /// `out` must be writable for `STAT_RECORD_SIZE` bytes. No alignment is
    /// required.
    pub unsafe fn write_to(&self, out: Address) {
        ptr::copy_nonoverlapping(self.0.as_ptr(), out as *mut u8, STAT_RECORD_SIZE);
    }

    /// Read a record from caller memory
    ///
    /// # Safety
    /// `src` must be readable for `STAT_RECORD_SIZE` bytes.
    #[must_use]
    pub unsafe fn read_from(src: Address) -> Self {
        let mut bytes = [0u8; STAT_RECORD_SIZE];
        ptr::copy_nonoverlapping(src as *const u8, bytes.as_mut_ptr(), STAT_RECORD_SIZE);
        Self(bytes)
    }

    fn put_u32(&mut self, offset: usize, value: u32) {
        self.0[offset..offset + 4].copy_from_slice(&value.to_ne_bytes());
    }

    fn put_u64(&mut self, offset: usize, value: u64) {
        self.0[offset..offset + 8].copy_from_slice(&value.to_ne_bytes());
    }

    fn u32_at(&self, offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.0[offset..offset + 4]);
        u32::from_ne_bytes(raw)
    }

    fn u64_at(&self, offset: usize) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&self.0[offset..offset + 8]);
        u64::from_ne_bytes(raw)
    }

    /// Decode every field
    #[must_use]
    pub fn decode(&self) -> FileStatus {
        FileStatus {
            device: self.u64_at(offsets::DEVICE),
            inode: self.u64_at(offsets::INODE),
            mode: self.u32_at(offsets::MODE),
            links: self.u64_at(offsets::LINKS),
            uid: self.u32_at(offsets::UID),
            gid: self.u32_at(offsets::GID),
            rdev: self.u64_at(offsets::RDEV),
            size: self.u64_at(offsets::SIZE) as i64,
            block_size: self.u64_at(offsets::BLOCK_SIZE) as i64,
            blocks: self.u64_at(offsets::BLOCKS) as i64,
            atime: self.u64_at(offsets::ATIME) as i64,
            mtime: self.u64_at(offsets::MTIME) as i64,
            ctime: self.u64_at(offsets::CTIME) as i64,
        }
    }
}

/// Decoded file metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileStatus {
    pub device: u64,
    pub inode: u64,
    pub mode: u32,
    pub links: u64,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: i64,
    pub block_size: i64,
    pub blocks: i64,
    /// Seconds since the epoch
    pub atime: i64,
    pub mtime: i64,
    pub ctime: i64,
}

impl FileStatus {
    /// Serialize into the fixed record; unused bytes are zero
    #[must_use]
    pub fn encode(&self) -> FileStatusRecord {
        let mut record = FileStatusRecord([0u8; STAT_RECORD_SIZE]);
        record.put_u64(offsets::DEVICE, self.device);
        record.put_u64(offsets::INODE, self.inode);
        record.put_u32(offsets::MODE, self.mode);
        record.put_u64(offsets::LINKS, self.links);
        record.put_u32(offsets::UID, self.uid);
        record.put_u32(offsets::GID, self.gid);
        record.put_u64(offsets::RDEV, self.rdev);
        record.put_u64(offsets::SIZE, self.size as u64);
        record.put_u64(offsets::BLOCK_SIZE, self.block_size as u64);
        record.put_u64(offsets::BLOCKS, self.blocks as u64);
        record.put_u64(offsets::ATIME, self.atime as u64);
        record.put_u64(offsets::MTIME, self.mtime as u64);
        record.put_u64(offsets::CTIME, self.ctime as u64);
        record
    }

    fn file_type(&self) -> u32 {
        self.mode & S_IFMT
    }

    pub fn is_regular_file(&self) -> bool {
        self.file_type() == S_IFREG
    }

    pub fn is_directory(&self) -> bool {
        self.file_type() == S_IFDIR
    }

    pub fn is_symlink(&self) -> bool {
        self.file_type() == S_IFLNK
    }

    pub fn is_char_device(&self) -> bool {
        self.file_type() == S_IFCHR
    }

    pub fn is_block_device(&self) -> bool {
        self.file_type() == S_IFBLK
    }

    pub fn is_fifo(&self) -> bool {
        self.file_type() == S_IFIFO
    }

    pub fn is_socket(&self) -> bool {
        self.file_type() == S_IFSOCK
    }

    pub fn is_setuid(&self) -> bool {
        self.mode & S_ISUID != 0
    }

    pub fn is_setgid(&self) -> bool {
        self.mode & S_ISGID != 0
    }

    pub fn is_sticky(&self) -> bool {
        self.mode & S_ISVTX != 0
    }

    /// Permission bits (lower nine bits of the mode)
    pub fn permissions(&self) -> u32 {
        self.mode & 0o777
    }

    pub fn is_user_readable(&self) -> bool {
        self.mode & 0o400 != 0
    }

    pub fn is_user_writable(&self) -> bool {
        self.mode & 0o200 != 0
    }

    pub fn is_user_executable(&self) -> bool {
        self.mode & 0o100 != 0
    }

    pub fn is_group_readable(&self) -> bool {
        self.mode & 0o040 != 0
    }

    pub fn is_group_writable(&self) -> bool {
        self.mode & 0o020 != 0
    }

    pub fn is_group_executable(&self) -> bool {
        self.mode & 0o010 != 0
    }

    pub fn is_other_readable(&self) -> bool {
        self.mode & 0o004 != 0
    }

    pub fn is_other_writable(&self) -> bool {
        self.mode & 0o002 != 0
    }

    pub fn is_other_executable(&self) -> bool {
        self.mode & 0o001 != 0
    }

    /// Bytes allocated on disk
    pub fn allocated_bytes(&self) -> u64 {
        (self.blocks.max(0) as u64).saturating_mul(crate::core::limits::STAT_BLOCK_UNIT)
    }
}

// Field widths differ between platforms; every cast widens to the record's width.
#[allow(clippy::unnecessary_cast)]
impl From<&libc::stat> for FileStatus {
    fn from(st: &libc::stat) -> Self {
        Self {
            device: st.st_dev as u64,
            inode: st.st_ino as u64,
            mode: st.st_mode as u32,
            links: st.st_nlink as u64,
            uid: st.st_uid as u32,
            gid: st.st_gid as u32,
            rdev: st.st_rdev as u64,
            size: st.st_size as i64,
            block_size: st.st_blksize as i64,
            blocks: st.st_blocks as i64,
            atime: st.st_atime as i64,
            mtime: st.st_mtime as i64,
            ctime: st.st_ctime as i64,
        }
    }
}
