//! Main skeletal track serialization
//!
//! Writes the 16-byte track header followed by one 48-byte record per bone per
//! frame.

use pxd_common::{AxisConvention, TrackHeader, TrackWriter};
use std::io;

use crate::animation::AnimationClip;

/// Encode the main skeletal track of `clip`
///
/// Records are written frame by frame, bones in skeleton order.
pub fn serialize_main_track(clip: &AnimationClip, convention: AxisConvention) -> io::Result<Vec<u8>> {
    let header = TrackHeader::new(clip.frame_rate, clip.frame_count, clip.bones.len() as u32);
    let mut writer = TrackWriter::new(
        Vec::with_capacity(header.buffer_size().unwrap_or_default()),
        &header,
    )?;

    for frame in &clip.main_track {
        for transform in frame {
            writer.write_record(&transform.to_record(convention))?;
        }
    }

    debug_assert_eq!(
        writer.records_written(),
        clip.frame_count as usize * clip.bones.len()
    );
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ResolvedTransform;
    use crate::skeleton::{Bone, Skeleton};
    use glam::{Quat, Vec3};
    use pxd_common::decode_track;

    fn clip(frames: usize, bones: usize) -> AnimationClip {
        let skeleton = Skeleton::new(
            (0..bones)
                .map(|i| Bone::new(format!("b{}", i), i.checked_sub(1), 1.0))
                .collect(),
        );
        AnimationClip::new(
            "test",
            &skeleton,
            30.0,
            vec![vec![ResolvedTransform::IDENTITY; bones]; frames],
            None,
        )
    }

    #[test]
    fn test_main_track_size() {
        for (frames, bones) in [(1, 1), (3, 2), (10, 7), (4, 0)] {
            let bytes = serialize_main_track(&clip(frames, bones), AxisConvention::Native).unwrap();
            assert_eq!(bytes.len(), 16 + frames * bones * 48);
        }
    }

    #[test]
    fn test_alternate_record_bytes() {
        let mut c = clip(1, 2);
        c.main_track[0][1] = ResolvedTransform {
            rotation: Quat::from_xyzw(0.1, 0.2, 0.3, 0.9),
            translation: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::new(1.0, 2.0, 4.0),
            bone_length: 1.5,
        };

        let bytes = serialize_main_track(&c, AxisConvention::Alternate).unwrap();
        let record = &bytes[16 + 48..];
        let f = |i: usize| f32::from_le_bytes(record[i * 4..i * 4 + 4].try_into().unwrap());

        // y z x w, y z x, length * scale.y, y z x, tail
        assert_eq!([f(0), f(1), f(2), f(3)], [0.2, 0.3, 0.1, 0.9]);
        assert_eq!([f(4), f(5), f(6)], [2.0, 3.0, 1.0]);
        assert_eq!(f(7), 3.0);
        assert_eq!([f(8), f(9), f(10)], [2.0, 4.0, 1.0]);
        assert_eq!(f(11), 1.0);
    }

    #[test]
    fn test_main_track_is_frame_major() {
        let mut c = clip(2, 2);
        c.main_track[1][0].translation = Vec3::new(9.0, 0.0, 0.0);
        c.main_track[0][1].rotation = Quat::from_xyzw(0.0, 1.0, 0.0, 0.0);

        let bytes = serialize_main_track(&c, AxisConvention::Native).unwrap();
        let (header, records) = decode_track(&bytes).unwrap();
        assert_eq!(header.frame_count, 2);
        assert_eq!(header.bone_count, 2);
        assert_eq!(records[1].rotation, [0.0, 1.0, 0.0, 0.0]);
        assert_eq!(records[2].translation, [9.0, 0.0, 0.0]);
    }

    #[test]
    fn test_main_track_is_deterministic() {
        let c = clip(5, 3);
        let a = serialize_main_track(&c, AxisConvention::Alternate).unwrap();
        let b = serialize_main_track(&c, AxisConvention::Alternate).unwrap();
        assert_eq!(a, b);
    }
}
