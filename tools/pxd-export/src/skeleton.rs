//! Skeleton description and pose source interface
//!
//! The exporter never walks a live scene graph. Bones reference their parent
//! by index into a flat, ordered array, and poses are pulled one frame at a
//! time through [`PoseSource`].

use glam::{Mat4, Quat, Vec3};

/// A single bone of a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for a root
    pub parent: Option<usize>,
    /// Rest length along the bone's primary axis
    pub length: f32,
}

impl Bone {
    pub fn new(name: impl Into<String>, parent: Option<usize>, length: f32) -> Self {
        Self {
            name: name.into(),
            parent,
            length,
        }
    }
}

/// Ordered bone list
///
/// Bone order is the record order in every exported frame. The hierarchy must
/// be a rooted tree with every parent index in range; this is not checked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}

impl Skeleton {
    pub fn new(bones: Vec<Bone>) -> Self {
        Self { bones }
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

/// Armature-space pose of one bone for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPose {
    /// Bone-to-armature matrix (location, rotation and scale combined)
    pub matrix: Mat4,
}

impl RawPose {
    pub const IDENTITY: Self = Self {
        matrix: Mat4::IDENTITY,
    };

    pub fn new(matrix: Mat4) -> Self {
        Self { matrix }
    }
}

/// Transform of the animated object itself, in the host's basis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectPose {
    pub location: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl ObjectPose {
    pub const IDENTITY: Self = Self {
        location: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

impl Default for ObjectPose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Stateful frame-by-frame pose oracle
///
/// Callers must call [`set_frame`](PoseSource::set_frame) before reading poses,
/// and must visit frames in ascending order: sources backed by simulations only
/// produce correct poses when stepped sequentially.
pub trait PoseSource {
    /// Advance the source to `frame`
    fn set_frame(&mut self, frame: u32);

    /// Pose of bone `bone` (index into the skeleton) at the current frame
    fn bone_pose(&self, bone: usize) -> RawPose;

    /// Transform of the animated object at the current frame
    fn object_pose(&self) -> ObjectPose;
}
