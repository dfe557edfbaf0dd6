//! Root motion track
//!
//! Captures the animated object's own transform as a single-bone track. The
//! host's Z-up basis is converted once to the runtime's Y-up basis; this is a
//! fixed correction, not an invertible toggle.

use glam::{Quat, Vec3};
use pxd_common::{TrackHeader, TrackRecord, TrackWriter};
use std::f32::consts::FRAC_1_SQRT_2;
use std::io;

use crate::animation::AnimationClip;
use crate::skeleton::ObjectPose;

/// -90° about X, composed in front of every object rotation
pub const ROOT_MOTION_CORRECTION: Quat = Quat::from_xyzw(-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2);

/// Object transform for one frame, in the runtime's basis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RootTransform {
    pub rotation: Quat,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl RootTransform {
    pub fn from_object_pose(pose: &ObjectPose) -> Self {
        Self {
            rotation: correct_root_rotation(pose.rotation),
            translation: correct_root_location(pose.location),
            scale: pose.scale,
        }
    }

    /// Encode as a track record; the length field is always zero
    pub fn to_record(&self) -> TrackRecord {
        TrackRecord::new(
            self.rotation.to_array(),
            self.translation.to_array(),
            0.0,
            self.scale.to_array(),
        )
    }
}

pub fn correct_root_rotation(rotation: Quat) -> Quat {
    ROOT_MOTION_CORRECTION * rotation
}

/// `(x, y, z)` to `(x, z, -y)`
pub fn correct_root_location(location: Vec3) -> Vec3 {
    Vec3::new(location.x, location.z, -location.y)
}

/// Encode the root motion track of `clip`, if it has one
pub fn serialize_root_track(clip: &AnimationClip) -> Option<io::Result<Vec<u8>>> {
    let root_track = clip.root_track.as_ref()?;
    Some(write_root_track(clip, root_track))
}

fn write_root_track(clip: &AnimationClip, root_track: &[RootTransform]) -> io::Result<Vec<u8>> {
    let header = TrackHeader::new(clip.frame_rate, clip.frame_count, 1);
    let mut writer = TrackWriter::new(
        Vec::with_capacity(header.buffer_size().unwrap_or_default()),
        &header,
    )?;
    for transform in root_track {
        writer.write_record(&transform.to_record())?;
    }
    Ok(writer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::Skeleton;
    use pxd_common::decode_track;

    #[test]
    fn test_location_swap() {
        let v = correct_root_location(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vec3::new(1.0, 3.0, -2.0));
    }

    #[test]
    fn test_location_swap_is_not_an_involution() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_ne!(correct_root_location(correct_root_location(v)), v);
    }

    #[test]
    fn test_correction_applied_twice_differs() {
        let q = Quat::from_rotation_y(0.3);
        let once = correct_root_rotation(q);
        let twice = correct_root_rotation(once);
        assert!(once.dot(twice).abs() < 0.999);
    }

    #[test]
    fn test_identity_object_pose() {
        let root = RootTransform::from_object_pose(&ObjectPose::IDENTITY);
        assert!(root.rotation.abs_diff_eq(ROOT_MOTION_CORRECTION, 1e-6));
        assert_eq!(root.translation, Vec3::ZERO);
        assert_eq!(root.scale, Vec3::ONE);

        let record = root.to_record();
        assert_eq!(record.length, 0.0);
        assert_eq!(record.tail, 1.0);
        assert_eq!(record.rotation, [-FRAC_1_SQRT_2, 0.0, 0.0, FRAC_1_SQRT_2]);
    }

    #[test]
    fn test_scale_passes_through() {
        let pose = ObjectPose {
            scale: Vec3::new(1.0, 2.0, 3.0),
            ..ObjectPose::IDENTITY
        };
        let root = RootTransform::from_object_pose(&pose);
        assert_eq!(root.scale, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_root_track_size() {
        let root = vec![RootTransform::from_object_pose(&ObjectPose::IDENTITY); 2];
        let clip = AnimationClip::new(
            "walk",
            &Skeleton::default(),
            30.0,
            vec![vec![]; 2],
            Some(root),
        );
        let bytes = serialize_root_track(&clip).unwrap().unwrap();
        assert_eq!(bytes.len(), 16 + 2 * 48);
        assert_eq!(bytes.len(), 112);

        let (header, records) = decode_track(&bytes).unwrap();
        assert_eq!(header.bone_count, 1);
        assert_eq!(header.frame_count, 2);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_no_root_track() {
        let clip = AnimationClip::new("idle", &Skeleton::default(), 30.0, vec![vec![]], None);
        assert!(serialize_root_track(&clip).is_none());
    }
}
