//! Hierarchical transform resolver
//!
//! Turns armature-space bone matrices into parent-relative transforms.
//!
//! Scale and position/rotation are resolved separately. Each bone's scale is
//! divided by its parent's armature-space scale, which leaves only the scale
//! introduced at that bone (by constraints, for example). Positions and
//! rotations are composed from matrices with scale stripped, so scale never
//! accumulates down the chain.

use glam::{Mat4, Quat, Vec3};
use pxd_common::{AxisConvention, TrackRecord};

use crate::skeleton::{RawPose, Skeleton};

/// Rotation composed onto root bones under [`AxisConvention::Alternate`]
///
/// Swaps a Y-forward bone basis to the X-forward basis the runtime expects.
pub const ALTERNATE_ROOT_CORRECTION: Quat = Quat::from_xyzw(0.5, 0.5, 0.5, 0.5);

/// Parent-relative transform of one bone for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTransform {
    /// Unit quaternion rotation relative to the parent
    pub rotation: Quat,
    /// Translation in the parent's unscaled space
    pub translation: Vec3,
    /// Scale relative to the parent's scale
    pub scale: Vec3,
    /// Rest length, 0 for root bones
    pub bone_length: f32,
}

impl ResolvedTransform {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
        bone_length: 0.0,
    };

    /// Encode as a track record in the given axis order
    pub fn to_record(&self, convention: AxisConvention) -> TrackRecord {
        let scale = self.scale.to_array();
        TrackRecord::new(
            convention.permute_quat(self.rotation.to_array()),
            convention.permute_vec3(self.translation.to_array()),
            self.bone_length * scale[convention.length_axis()],
            convention.permute_vec3(scale),
        )
    }
}

/// Resolve one frame of armature-space poses into parent-relative transforms
///
/// `poses` must hold one entry per bone, in skeleton order.
pub fn resolve_frame(
    skeleton: &Skeleton,
    poses: &[RawPose],
    convention: AxisConvention,
) -> Vec<ResolvedTransform> {
    debug_assert_eq!(skeleton.len(), poses.len(), "one pose per bone");

    let decomposed: Vec<(Vec3, Quat, Vec3)> = poses
        .iter()
        .map(|pose| pose.matrix.to_scale_rotation_translation())
        .collect();

    // Unscaled matrices and constraint-local scales
    let mut unscaled = Vec::with_capacity(decomposed.len());
    let mut scales = Vec::with_capacity(decomposed.len());
    for (bone, &(scale, rotation, location)) in skeleton.bones.iter().zip(&decomposed) {
        let scale = match bone.parent {
            Some(parent) => scale / decomposed[parent].0,
            None => scale,
        };
        unscaled.push(Mat4::from_rotation_translation(rotation, location));
        scales.push(scale);
    }

    skeleton
        .bones
        .iter()
        .enumerate()
        .map(|(i, bone)| {
            let (parent_matrix, bone_length) = match bone.parent {
                Some(parent) => (unscaled[parent], bone.length),
                None => (Mat4::IDENTITY, 0.0),
            };
            let local = parent_matrix.inverse() * unscaled[i];
            let (_, mut rotation, translation) = local.to_scale_rotation_translation();

            if bone.parent.is_none() && convention == AxisConvention::Alternate {
                rotation = rotation * ALTERNATE_ROOT_CORRECTION;
            }

            ResolvedTransform {
                rotation,
                translation,
                scale: scales[i],
                bone_length,
            }
        })
        .collect()
}
