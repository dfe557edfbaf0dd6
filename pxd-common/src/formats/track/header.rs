//! Track header structure and operations

use super::TRACK_RECORD_SIZE;

/// Raw track header (16 bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct TrackHeader {
    /// Clip duration in seconds
    pub duration: f32,
    /// Sampling rate in frames per second
    pub frame_rate: f32,
    /// Number of recorded frames
    pub frame_count: u32,
    /// Number of bone records per frame
    pub bone_count: u32,
}

impl TrackHeader {
    pub const SIZE: usize = 16;

    pub fn new(frame_rate: f32, frame_count: u32, bone_count: u32) -> Self {
        Self {
            duration: clip_duration(frame_count, frame_rate),
            frame_rate,
            frame_count,
            bone_count,
        }
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            duration: f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            frame_rate: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            frame_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            bone_count: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }

    /// Expected record data size (excluding header), `None` on overflow
    pub fn data_size(&self) -> Option<usize> {
        (self.frame_count as usize)
            .checked_mul(self.bone_count as usize)?
            .checked_mul(TRACK_RECORD_SIZE)
    }

    /// Total raw buffer size (header + records), `None` on overflow
    pub fn buffer_size(&self) -> Option<usize> {
        self.data_size()?.checked_add(Self::SIZE)
    }
}

/// Clip duration for `frame_count` frames sampled at `frame_rate`
pub fn clip_duration(frame_count: u32, frame_rate: f32) -> f32 {
    if frame_count > 1 {
        (frame_count - 1) as f32 / frame_rate
    } else {
        0.0
    }
}
