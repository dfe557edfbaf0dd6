//! Track record types

/// Size of one bone record in a raw track (48 bytes)
pub const TRACK_RECORD_SIZE: usize = 48;

/// Constant written after every record
pub const TRACK_RECORD_TAIL: f32 = 1.0;

/// One bone transform for one frame, already in the active axis order
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct TrackRecord {
    /// Quaternion rotation, w last
    pub rotation: [f32; 4],
    pub translation: [f32; 3],
    /// Rest length multiplied by the scale on the length axis
    pub length: f32,
    pub scale: [f32; 3],
    /// Trailing constant, 1.0 in every exported record
    pub tail: f32,
}

impl Default for TrackRecord {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TrackRecord {
    /// Identity transform with zero length
    pub const IDENTITY: Self = Self {
        rotation: [0.0, 0.0, 0.0, 1.0],
        translation: [0.0, 0.0, 0.0],
        length: 0.0,
        scale: [1.0, 1.0, 1.0],
        tail: TRACK_RECORD_TAIL,
    };

    pub fn new(rotation: [f32; 4], translation: [f32; 3], length: f32, scale: [f32; 3]) -> Self {
        Self {
            rotation,
            translation,
            length,
            scale,
            tail: TRACK_RECORD_TAIL,
        }
    }

    /// Parse from raw bytes (48 bytes)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() >= TRACK_RECORD_SIZE);
        let f = |i: usize| {
            let o = i * 4;
            f32::from_le_bytes([bytes[o], bytes[o + 1], bytes[o + 2], bytes[o + 3]])
        };
        Self {
            rotation: [f(0), f(1), f(2), f(3)],
            translation: [f(4), f(5), f(6)],
            length: f(7),
            scale: [f(8), f(9), f(10)],
            tail: f(11),
        }
    }
}
