//! PXD animation container (.anm.pxd)
//!
//! # Layout
//! ```text
//! 0x00: BinaHeader (16 bytes)       - "BINA210L", file_size, chunk_count
//! 0x10: DataChunkHeader (48 bytes)  - "DATA", chunk sizes, reserved
//! 0x40: PxanHeader (64 bytes)       - "NAXP", flags, clip info, track offsets
//! 0x80: main track                  - Compressed, zero padded
//!       root track (optional)       - Starts 16-byte aligned, zero padded to 4
//!       footer u32                  - FOOTER_ROOT_PRESENT or FOOTER_ROOT_ABSENT
//! ```

mod header;
mod layout;


pub use header::{
    BinaHeader, DataChunkHeader, PxanHeader, COMPRESSION_COMPRESSED, DATA_ORIGIN, PXAN_VERSION,
};
pub use layout::{align, pad_len, ContainerLayout, CONTAINER_HEADER_SIZE, FOOTER_SIZE, MAIN_TRACK_OFFSET};

/// Container tag: format, version 2.1.0, little-endian
pub const BINA_MAGIC: &[u8; 8] = b"BINA210L";

/// Data chunk tag
pub const DATA_MAGIC: &[u8; 4] = b"DATA";

/// Payload description tag ("PXAN" byte-reversed)
pub const PXAN_MAGIC: &[u8; 4] = b"NAXP";

/// Footer when a root motion track follows the main track
pub const FOOTER_ROOT_PRESENT: u32 = 0x0042_4644;

/// Footer when only the main track is present
pub const FOOTER_ROOT_ABSENT: u32 = 0x0000_4644;

/// Errors produced while parsing a container
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("missing or invalid {0} header")]
    BadHeader(&'static str),

    #[error("header declares {declared} bytes but file has {actual}")]
    SizeMismatch { declared: usize, actual: usize },

    #[error("unknown footer tag {0:#010x}")]
    BadFooter(u32),

    #[error("root track offset {offset:#x} is out of bounds")]
    BadRootOffset { offset: u64 },

    #[error("footer and NAXP header disagree on root track presence (footer_has_root = {footer_has_root})")]
    RootMismatch { footer_has_root: bool },
}

/// Clip metadata stored in the `NAXP` block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetadata {
    pub duration: f32,
    pub frame_count: u32,
    pub bone_count: u32,
    pub additive: bool,
    pub compressed: bool,
}

/// Assemble a complete container from already compressed track buffers
///
/// A `root` of `Some(&[])` is treated as absent. Callers are expected to reject
/// empty compressed buffers before getting here.
pub fn build_container(meta: &ContainerMetadata, main: &[u8], root: Option<&[u8]>) -> Vec<u8> {
    let root = root.filter(|r| !r.is_empty());
    let layout = ContainerLayout::compute(main.len(), root.map(<[u8]>::len));

    let pxan = PxanHeader {
        version: PXAN_VERSION,
        additive: meta.additive,
        compression: if meta.compressed {
            COMPRESSION_COMPRESSED
        } else {
            0
        },
        info_offset: PxanHeader::INFO_OFFSET,
        duration: meta.duration,
        frame_count: meta.frame_count,
        bone_count: meta.bone_count,
        main_track_offset: MAIN_TRACK_OFFSET,
        root_track_offset: layout.root_track_offset,
    };

    let mut out = Vec::with_capacity(layout.file_size);
    out.extend_from_slice(&BinaHeader::new(layout.file_size as u32).to_bytes());
    out.extend_from_slice(&DataChunkHeader::new(layout.file_size as u32).to_bytes());
    out.extend_from_slice(&pxan.to_bytes());

    out.extend_from_slice(main);
    out.resize(out.len() + layout.main_padding(), 0);

    let footer = match root {
        Some(root) => {
            out.extend_from_slice(root);
            out.resize(out.len() + layout.root_padding(), 0);
            FOOTER_ROOT_PRESENT
        }
        None => FOOTER_ROOT_ABSENT,
    };
    out.extend_from_slice(&footer.to_le_bytes());

    debug_assert_eq!(out.len(), layout.file_size, "container layout mismatch");
    out
}

/// Borrowed view over a parsed container
///
/// Track slices include the zero padding that follows them; the compressed
/// size itself is not stored in the file.
#[derive(Debug, Clone)]
pub struct ContainerFile<'a> {
    pub bina: BinaHeader,
    pub data: DataChunkHeader,
    pub pxan: PxanHeader,
    pub main_track: &'a [u8],
    pub root_track: Option<&'a [u8]>,
    pub footer: u32,
}

impl<'a> ContainerFile<'a> {
    /// Parse and validate a container
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FormatError> {
        let min = CONTAINER_HEADER_SIZE + FOOTER_SIZE;
        if bytes.len() < min {
            return Err(FormatError::TooShort {
                expected: min,
                actual: bytes.len(),
            });
        }

        let bina = BinaHeader::from_bytes(bytes).ok_or(FormatError::BadHeader("BINA"))?;
        let data = DataChunkHeader::from_bytes(&bytes[BinaHeader::SIZE..])
            .ok_or(FormatError::BadHeader("DATA"))?;
        let pxan =
            PxanHeader::from_bytes(&bytes[DATA_ORIGIN..]).ok_or(FormatError::BadHeader("NAXP"))?;

        if bina.file_size as usize != bytes.len() {
            return Err(FormatError::SizeMismatch {
                declared: bina.file_size as usize,
                actual: bytes.len(),
            });
        }

        let footer_at = bytes.len() - FOOTER_SIZE;
        let footer = u32::from_le_bytes([
            bytes[footer_at],
            bytes[footer_at + 1],
            bytes[footer_at + 2],
            bytes[footer_at + 3],
        ]);
        let has_root = match footer {
            FOOTER_ROOT_PRESENT => true,
            FOOTER_ROOT_ABSENT => false,
            other => return Err(FormatError::BadFooter(other)),
        };
        if has_root != (pxan.root_track_offset != 0) {
            return Err(FormatError::RootMismatch {
                footer_has_root: has_root,
            });
        }

        let (main_track, root_track) = if has_root {
            let root_start = DATA_ORIGIN as u64 + pxan.root_track_offset;
            if root_start < CONTAINER_HEADER_SIZE as u64 || root_start > footer_at as u64 {
                return Err(FormatError::BadRootOffset {
                    offset: pxan.root_track_offset,
                });
            }
            let root_start = root_start as usize;
            (
                &bytes[CONTAINER_HEADER_SIZE..root_start],
                Some(&bytes[root_start..footer_at]),
            )
        } else {
            (&bytes[CONTAINER_HEADER_SIZE..footer_at], None)
        };

        Ok(Self {
            bina,
            data,
            pxan,
            main_track,
            root_track,
            footer,
        })
    }

    pub fn has_root_motion(&self) -> bool {
        self.root_track.is_some()
    }
}
