//! Clip sampling
//!
//! Steps a [`PoseSource`] through a frame range and resolves every recorded
//! frame into bone transforms (and root motion, when requested).

use pxd_common::formats::clip_duration;
use pxd_common::AxisConvention;

use crate::resolver::{resolve_frame, ResolvedTransform};
use crate::root_motion::RootTransform;
use crate::skeleton::{Bone, PoseSource, Skeleton};

/// Inclusive range of frames to record
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRange {
    pub start: u32,
    pub end: u32,
}

impl FrameRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.end >= self.start
    }

    /// Number of recorded frames (`end - start + 1`)
    pub fn frame_count(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// How frames are visited while sampling
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleOptions {
    pub convention: AxisConvention,
    pub root_motion: bool,
    /// Step the source from frame 0 even when recording starts later, so
    /// simulations have settled by the first recorded frame
    pub from_frame_zero: bool,
}

/// A fully sampled clip, ready for serialization
#[derive(Clone, Debug)]
pub struct AnimationClip {
    pub name: String,
    pub frame_rate: f32,
    pub frame_count: u32,
    pub duration: f32,
    pub bones: Vec<Bone>,
    /// One entry per frame, each holding one transform per bone
    pub main_track: Vec<Vec<ResolvedTransform>>,
    pub root_track: Option<Vec<RootTransform>>,
}

impl AnimationClip {
    pub fn new(
        name: impl Into<String>,
        skeleton: &Skeleton,
        frame_rate: f32,
        main_track: Vec<Vec<ResolvedTransform>>,
        root_track: Option<Vec<RootTransform>>,
    ) -> Self {
        let frame_count = main_track.len() as u32;
        Self {
            name: name.into(),
            frame_rate,
            frame_count,
            duration: clip_duration(frame_count, frame_rate),
            bones: skeleton.bones.clone(),
            main_track,
            root_track,
        }
    }

    pub fn bone_count(&self) -> u32 {
        self.bones.len() as u32
    }
}

/// Sample `range` from `source`
///
/// Frames are visited strictly in ascending order. With `from_frame_zero`,
/// frames before `range.start` are visited but not recorded.
pub fn sample_clip<S: PoseSource + ?Sized>(
    name: &str,
    skeleton: &Skeleton,
    source: &mut S,
    range: FrameRange,
    frame_rate: f32,
    options: &SampleOptions,
) -> AnimationClip {
    let frame_count = range.frame_count() as usize;
    let mut main_track = Vec::with_capacity(frame_count);
    let mut root_track = options.root_motion.then(|| Vec::with_capacity(frame_count));

    let first = if options.from_frame_zero { 0 } else { range.start };
    let mut poses = Vec::with_capacity(skeleton.len());

    for frame in first..=range.end {
        source.set_frame(frame);
        if frame < range.start {
            tracing::trace!("Settling frame {} (not recorded)", frame);
            continue;
        }

        poses.clear();
        poses.extend((0..skeleton.len()).map(|bone| source.bone_pose(bone)));
        main_track.push(resolve_frame(skeleton, &poses, options.convention));

        if let Some(root_track) = root_track.as_mut() {
            root_track.push(RootTransform::from_object_pose(&source.object_pose()));
        }
    }

    AnimationClip::new(name, skeleton, frame_rate, main_track, root_track)
}

/// Pose source that always reports the same poses, for tests
#[cfg(test)]
pub(crate) struct StaticPoses {
    pub bones: Vec<crate::skeleton::RawPose>,
    pub object: crate::skeleton::ObjectPose,
    pub visited: Vec<u32>,
}

#[cfg(test)]
impl StaticPoses {
    pub fn identity(bone_count: usize) -> Self {
        Self {
            bones: vec![crate::skeleton::RawPose::IDENTITY; bone_count],
            object: crate::skeleton::ObjectPose::IDENTITY,
            visited: Vec::new(),
        }
    }
}

#[cfg(test)]
impl PoseSource for StaticPoses {
    fn set_frame(&mut self, frame: u32) {
        self.visited.push(frame);
    }

    fn bone_pose(&self, bone: usize) -> crate::skeleton::RawPose {
        self.bones[bone]
    }

    fn object_pose(&self) -> crate::skeleton::ObjectPose {
        self.object
    }
}
