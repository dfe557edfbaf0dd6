//! Raw animation track buffers (pre-compression)
//!
//! Both the main skeletal track and the optional root motion track share this
//! layout. The root motion track always carries exactly one bone.
//!
//! # Layout
//! ```text
//! Header (16 bytes):
//! 0x00: duration f32 LE      - (frame_count - 1) / frame_rate, or 0 for a single frame
//! 0x04: frame_rate f32 LE    - Frames per second
//! 0x08: frame_count i32 LE   - Number of recorded frames
//! 0x0C: bone_count i32 LE    - Records per frame
//!
//! Records (frame_count × bone_count × 48 bytes):
//! 0x00: rotation [f32; 4]    - Quaternion, components in the active axis order, w last
//! 0x10: translation [f32; 3] - Components in the active axis order
//! 0x1C: length f32           - Rest length × scale on the length axis
//! 0x20: scale [f32; 3]       - Components in the active axis order
//! 0x2C: tail f32             - Always 1.0
//! ```
//!
//! Records are stored frame-major: [frame0_bone0, frame0_bone1, ..., frame1_bone0, ...]

mod axis;
mod header;
mod types;
mod writer;

#[cfg(test)]
mod tests;

pub use axis::AxisConvention;
pub use header::{clip_duration, TrackHeader};
pub use types::{TrackRecord, TRACK_RECORD_SIZE, TRACK_RECORD_TAIL};
pub use writer::{encode_track, TrackWriter};

/// Decode a raw (uncompressed) track buffer into its header and records
///
/// Returns `None` if the buffer is shorter than its header claims, or the
/// header's counts describe a buffer too large to address.
pub fn decode_track(bytes: &[u8]) -> Option<(TrackHeader, Vec<TrackRecord>)> {
    let header = TrackHeader::from_bytes(bytes)?;
    let data = bytes.get(TrackHeader::SIZE..header.buffer_size()?)?;
    let records = data
        .chunks_exact(TRACK_RECORD_SIZE)
        .map(TrackRecord::from_bytes)
        .collect();
    Some((header, records))
}
