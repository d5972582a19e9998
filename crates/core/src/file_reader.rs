// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size-based file reading: small files are read directly, larger ones
//! are memory-mapped to avoid copying the whole content into the heap
//! just to scan it for exports or imports.

use std::fs::File;
use std::io;
use std::path::Path;

/// Above this size, prefer a memory map over a direct read.
const MMAP_THRESHOLD_BYTES: u64 = 256 * 1024;

pub enum FileContent {
    Owned(Vec<u8>),
    Mapped(memmap2::Mmap),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Owned(bytes) => bytes,
            FileContent::Mapped(mmap) => mmap,
        }
    }
}

pub fn read_file(path: &Path) -> io::Result<FileContent> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    if len < MMAP_THRESHOLD_BYTES {
        return Ok(FileContent::Owned(std::fs::read(path)?));
    }

    // SAFETY: the mapping is read-only and dropped before the analysis
    // pass returns; concurrent external writers to the same file during a
    // scan are outside this crate's consistency guarantees.
    #[allow(unsafe_code)]
    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    Ok(FileContent::Mapped(mmap))
}
