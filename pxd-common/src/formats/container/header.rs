//! Container header structures
//!
//! Offsets inside the `NAXP` block are relative to the start of the `DATA`
//! chunk's content, which sits at [`DATA_ORIGIN`] in the file.

use super::{BINA_MAGIC, DATA_MAGIC, PXAN_MAGIC};

/// File offset that `NAXP` track offsets are relative to
pub const DATA_ORIGIN: usize = 0x40;

/// `NAXP` format version written by the exporter
pub const PXAN_VERSION: u32 = 0x200;

/// Compression type byte for compressed tracks
pub const COMPRESSION_COMPRESSED: u8 = 8;

/// Top-level container header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct BinaHeader {
    /// Total file size in bytes
    pub file_size: u32,
    /// Number of chunks following the header (always 1)
    pub chunk_count: u32,
}

impl BinaHeader {
    pub const SIZE: usize = 16;

    pub fn new(file_size: u32) -> Self {
        Self {
            file_size,
            chunk_count: 1,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..8].copy_from_slice(BINA_MAGIC);
        bytes[8..12].copy_from_slice(&self.file_size.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.chunk_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes (returns `None` on short input or wrong tag)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || &bytes[0..8] != BINA_MAGIC {
            return None;
        }
        Some(Self {
            file_size: read_u32(bytes, 8),
            chunk_count: read_u32(bytes, 12),
        })
    }
}

/// `DATA` chunk header (48 bytes, including 24 reserved bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct DataChunkHeader {
    /// Chunk size (file size minus the top header)
    pub chunk_size: u32,
    /// Chunk size minus the fixed 0x34 bytes of chunk bookkeeping
    pub payload_size: u32,
    pub string_table_size: u32,
    pub offset_table_size: u32,
    pub additional_data_size: u32,
}

impl DataChunkHeader {
    pub const SIZE: usize = 48;

    /// Bytes of chunk bookkeeping excluded from `payload_size`
    pub const BOOKKEEPING: u32 = 0x34;

    pub fn new(file_size: u32) -> Self {
        let chunk_size = file_size - BinaHeader::SIZE as u32;
        Self {
            chunk_size,
            payload_size: chunk_size - Self::BOOKKEEPING,
            string_table_size: 0,
            offset_table_size: 4,
            additional_data_size: 0x18,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(DATA_MAGIC);
        bytes[4..8].copy_from_slice(&self.chunk_size.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.payload_size.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.string_table_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.offset_table_size.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.additional_data_size.to_le_bytes());
        // 24..48 reserved, zero
        bytes
    }

    /// Read header from bytes (returns `None` on short input or wrong tag)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || &bytes[0..4] != DATA_MAGIC {
            return None;
        }
        Some(Self {
            chunk_size: read_u32(bytes, 4),
            payload_size: read_u32(bytes, 8),
            string_table_size: read_u32(bytes, 12),
            offset_table_size: read_u32(bytes, 16),
            additional_data_size: read_u32(bytes, 20),
        })
    }
}

/// `NAXP` payload description block (64 bytes)
///
/// # Layout
/// ```text
/// 0x00: "NAXP"
/// 0x04: version u32          - 0x200
/// 0x08: additive u8          - 1 if the clip blends on top of another
/// 0x09: compression u8       - 8 if tracks are compressed, else 0
/// 0x0A: reserved [u8; 6]
/// 0x10: info_offset u64      - 0x18, points at the clip info below
/// 0x18: duration f32
/// 0x1C: frame_count u32
/// 0x20: bone_count u32
/// 0x24: reserved u32
/// 0x28: main_track_offset u64 - Always 0x40
/// 0x30: root_track_offset u64 - 0 when no root motion track
/// 0x38: reserved u64
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct PxanHeader {
    pub version: u32,
    pub additive: bool,
    pub compression: u8,
    pub info_offset: u64,
    pub duration: f32,
    pub frame_count: u32,
    pub bone_count: u32,
    pub main_track_offset: u64,
    pub root_track_offset: u64,
}

impl PxanHeader {
    pub const SIZE: usize = 64;

    /// Offset of the clip info block within the `NAXP` block
    pub const INFO_OFFSET: u64 = 0x18;

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(PXAN_MAGIC);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8] = self.additive as u8;
        bytes[9] = self.compression;
        bytes[16..24].copy_from_slice(&self.info_offset.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.duration.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.frame_count.to_le_bytes());
        bytes[32..36].copy_from_slice(&self.bone_count.to_le_bytes());
        bytes[40..48].copy_from_slice(&self.main_track_offset.to_le_bytes());
        bytes[48..56].copy_from_slice(&self.root_track_offset.to_le_bytes());
        bytes
    }

    /// Read header from bytes (returns `None` on short input or wrong tag)
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || &bytes[0..4] != PXAN_MAGIC {
            return None;
        }
        Some(Self {
            version: read_u32(bytes, 4),
            additive: bytes[8] != 0,
            compression: bytes[9],
            info_offset: read_u64(bytes, 16),
            duration: f32::from_bits(read_u32(bytes, 24)),
            frame_count: read_u32(bytes, 28),
            bone_count: read_u32(bytes, 32),
            main_track_offset: read_u64(bytes, 40),
            root_track_offset: read_u64(bytes, 48),
        })
    }

    /// Whether the tracks are stored compressed
    pub fn is_compressed(&self) -> bool {
        self.compression == COMPRESSION_COMPRESSED
    }
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}
