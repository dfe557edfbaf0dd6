//! pxd-export library
//!
//! Samples skeletal clips from a [`PoseSource`](skeleton::PoseSource), encodes
//! them as raw bone tracks and wraps the compressed tracks in a `.anm.pxd`
//! container.

pub mod animation;
pub mod compression;
pub mod export;
pub mod inspect;
pub mod manifest;
pub mod resolver;
pub mod root_motion;
pub mod scene;
pub mod skeleton;
pub mod track;

// Re-export the export entry points
pub use export::{export_animation, export_to_memory, ClipInfo, ExportError, ExportOptions};

pub use animation::{sample_clip, AnimationClip, FrameRange};
pub use compression::{Compressor, CompressorKind, Lz4Compressor, Passthrough, TrackKind};
pub use skeleton::{Bone, ObjectPose, PoseSource, RawPose, Skeleton};
