//! Shared binary format types for PXD animation assets
//!
//! This crate provides the on-disk layout shared between:
//! - `pxd-export` (clip sampling and container assembly)
//! - tooling that inspects exported `.anm.pxd` files
//!
//! # Modules
//!
//! - [`formats`] - Raw track records, container headers and layout arithmetic

pub mod formats;

// Re-export commonly used format items
pub use formats::{
    align,
    build_container,
    decode_track,
    encode_track,
    pad_len,
    AxisConvention,
    BinaHeader,
    ContainerFile,
    ContainerLayout,
    ContainerMetadata,
    DataChunkHeader,
    FormatError,
    PxanHeader,
    TrackHeader,
    TrackRecord,
    TrackWriter,
    // Constants
    ANIMATION_EXT,
    BINA_MAGIC,
    CONTAINER_HEADER_SIZE,
    DATA_MAGIC,
    FOOTER_ROOT_ABSENT,
    FOOTER_ROOT_PRESENT,
    MAIN_TRACK_OFFSET,
    PXAN_MAGIC,
    TRACK_RECORD_SIZE,
};
