//! Container size, offset and padding arithmetic
//!
//! Everything here must be known before the top header is written, since the
//! header embeds the final file size.

use super::header::{BinaHeader, DataChunkHeader, PxanHeader, DATA_ORIGIN};

/// Size of all headers preceding the payload (0x80)
pub const CONTAINER_HEADER_SIZE: usize = BinaHeader::SIZE + DataChunkHeader::SIZE + PxanHeader::SIZE;

/// Offset of the main track, relative to [`DATA_ORIGIN`]
pub const MAIN_TRACK_OFFSET: u64 = (CONTAINER_HEADER_SIZE - DATA_ORIGIN) as u64;

/// Size of the footer tag closing the payload
pub const FOOTER_SIZE: usize = 4;

/// Zero bytes appended after `n` bytes to reach a multiple of `k`.
///
/// This is always `k - n % k`, so an already aligned `n` gets a full block of
/// padding. Runtimes reading these files expect exactly this.
pub const fn pad_len(n: usize, k: usize) -> usize {
    k - n % k
}

/// `n` rounded up to the next multiple of `k`, see [`pad_len`]
pub const fn align(n: usize, k: usize) -> usize {
    n + pad_len(n, k)
}

/// Sizes and offsets of a container with the given compressed track sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLayout {
    pub main_size: usize,
    /// Compressed root motion size, 0 when absent
    pub root_size: usize,
    /// Main track plus its trailing padding
    pub main_chunk: usize,
    /// Root track plus its trailing padding, 0 when absent
    pub root_chunk: usize,
    pub file_size: usize,
    /// Root track offset relative to [`DATA_ORIGIN`], 0 when absent
    pub root_track_offset: u64,
}

impl ContainerLayout {
    pub fn compute(main_size: usize, root_size: Option<usize>) -> Self {
        match root_size {
            Some(root_size) if root_size > 0 => {
                let main_chunk = align(main_size, 16);
                let root_chunk = align(root_size, 4);
                Self {
                    main_size,
                    root_size,
                    main_chunk,
                    root_chunk,
                    file_size: CONTAINER_HEADER_SIZE + main_chunk + root_chunk + FOOTER_SIZE,
                    root_track_offset: (main_chunk as u64) + MAIN_TRACK_OFFSET,
                }
            }
            _ => {
                let main_chunk = align(main_size, 4);
                Self {
                    main_size,
                    root_size: 0,
                    main_chunk,
                    root_chunk: 0,
                    file_size: CONTAINER_HEADER_SIZE + main_chunk + FOOTER_SIZE,
                    root_track_offset: 0,
                }
            }
        }
    }

    pub fn has_root(&self) -> bool {
        self.root_chunk > 0
    }

    /// Padding written after the main track
    pub fn main_padding(&self) -> usize {
        self.main_chunk - self.main_size
    }

    /// Padding written after the root track
    pub fn root_padding(&self) -> usize {
        self.root_chunk - self.root_size
    }

    /// Absolute file offset of the root track, if present
    pub fn root_track_start(&self) -> Option<usize> {
        self.has_root()
            .then(|| DATA_ORIGIN + self.root_track_offset as usize)
    }
}
