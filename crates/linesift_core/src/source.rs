//! Random-access view of the reference source used for exact-match
//! verification.
//!
//! Queries re-read line bytes by (offset, len) out of an immutable mapping,
//! so verification never repositions a sequential cursor. The file must stay
//! unmodified for the lifetime of the map; the mapping does not observe
//! concurrent writers.

use crate::errors::Result;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

pub struct SourceMap {
    _f: File,
    // None for zero-length files, which cannot be mapped on every platform.
    map: Option<Mmap>,
}

impl SourceMap {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::open(path)?;
        let len = f.metadata()?.len();
        let map = if len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&f)? })
        };
        Ok(Self { _f: f, map })
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_none()
    }

    pub fn bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    /// Bounds-checked positioned read; None when the range leaves the source.
    pub fn bytes_at(&self, offset: u64, len: u32) -> Option<&[u8]> {
        let data = self.bytes();
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(len as usize)?;
        if end > data.len() {
            return None;
        }
        Some(&data[start..end])
    }
}
