//! PXD binary animation formats
//!
//! Two layers live here:
//! - [`track`]: the raw (pre-compression) track buffers, a 16-byte header
//!   followed by fixed 48-byte bone records
//! - [`container`]: the `BINA`/`DATA`/`NAXP` container that wraps the
//!   compressed track buffers
//!
//! All multi-byte fields are little-endian.

pub mod container;
pub mod track;

pub use container::*;
pub use track::*;

/// File extension used for exported animation containers
pub const ANIMATION_EXT: &str = "anm.pxd";
