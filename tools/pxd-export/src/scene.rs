//! Scene document loader
//!
//! A scene document is a JSON snapshot of a host scene: its objects, which one
//! is active, the scene frame range and rate, and for every armature the
//! per-frame bone matrices and object transform. Baked frames are indexed from
//! the scene's start frame.
//!
//! ```json
//! {
//!   "active_object": "Hero",
//!   "frame_start": 1,
//!   "frame_end": 30,
//!   "fps": 30,
//!   "fps_base": 1.0,
//!   "objects": [
//!     {
//!       "name": "Hero",
//!       "type": "armature",
//!       "action": "walk",
//!       "bones": [{ "name": "pelvis", "parent": null, "length": 0.2 }],
//!       "frames": [{ "bones": [[1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1]] }]
//!     }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use glam::{Mat4, Quat, Vec3};
use hashbrown::HashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::compression::Compressor;
use crate::export::{export_animation, ClipInfo, ExportError, ExportOptions};
use crate::skeleton::{Bone, ObjectPose, PoseSource, RawPose, Skeleton};

/// Root of a scene document
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDocument {
    #[serde(default)]
    pub active_object: Option<String>,
    #[serde(default)]
    pub frame_start: u32,
    /// Defaults to the last baked frame
    #[serde(default)]
    pub frame_end: Option<u32>,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_fps_base")]
    pub fps_base: f32,
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

fn default_fps() -> u32 {
    30
}

fn default_fps_base() -> f32 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Armature,
    Mesh,
    Empty,
    Camera,
    Light,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Name of the assigned action, used as the clip name
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub bones: Vec<BoneEntry>,
    #[serde(default)]
    pub frames: Vec<FrameEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoneEntry {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub length: f32,
}

/// One baked frame
#[derive(Debug, Clone, Deserialize)]
pub struct FrameEntry {
    /// Armature-space matrix per bone, column-major
    #[serde(default)]
    pub bones: Vec<[f32; 16]>,
    #[serde(default)]
    pub object: ObjectTransform,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ObjectTransform {
    pub location: [f32; 3],
    /// `[x, y, z, w]`
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            location: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

impl From<ObjectTransform> for ObjectPose {
    fn from(t: ObjectTransform) -> Self {
        ObjectPose {
            location: Vec3::from_array(t.location),
            rotation: Quat::from_array(t.rotation).normalize(),
            scale: Vec3::from_array(t.scale),
        }
    }
}

impl SceneDocument {
    /// Load a scene document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scene: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse scene document")
    }

    /// Scene frame rate (`fps / fps_base`)
    pub fn frame_rate(&self) -> f32 {
        self.fps as f32 / self.fps_base
    }

    /// Pick the armature to export: `name`, or the active object
    pub fn select_armature(&self, name: Option<&str>) -> Result<&SceneObject, ExportError> {
        let name = name.or(self.active_object.as_deref()).ok_or_else(|| {
            ExportError::InvalidSelection(
                "No active object. Please select an armature as your active object.".to_string(),
            )
        })?;

        let object = self
            .objects
            .iter()
            .find(|o| o.name == name)
            .ok_or_else(|| ExportError::InvalidSelection(format!("Object \"{name}\" not found.")))?;

        if object.kind != ObjectKind::Armature {
            return Err(ExportError::InvalidSelection(format!(
                "Active object \"{name}\" is not an armature."
            )));
        }
        Ok(object)
    }
}

impl SceneObject {
    /// Build the flat bone array, resolving parents by name
    pub fn skeleton(&self) -> Result<Skeleton> {
        let indices: HashMap<&str, usize> = self
            .bones
            .iter()
            .enumerate()
            .map(|(i, bone)| (bone.name.as_str(), i))
            .collect();

        let bones = self
            .bones
            .iter()
            .map(|entry| {
                let parent = match entry.parent.as_deref() {
                    Some(parent) => Some(*indices.get(parent).with_context(|| {
                        format!("Bone {:?} has unknown parent {:?}", entry.name, parent)
                    })?),
                    None => None,
                };
                Ok(Bone::new(entry.name.clone(), parent, entry.length))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Skeleton::new(bones))
    }

    /// Check that every baked frame carries one matrix per bone and a usable
    /// object rotation
    pub fn validate_frames(&self, bone_count: usize) -> Result<()> {
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.bones.len() != bone_count {
                anyhow::bail!(
                    "Frame {} of {:?} has {} bone matrices, expected {}",
                    i,
                    self.name,
                    frame.bones.len(),
                    bone_count
                );
            }
            let length = Quat::from_array(frame.object.rotation).length();
            if !length.is_finite() || length == 0.0 {
                anyhow::bail!("Frame {} of {:?} has an invalid object rotation", i, self.name);
            }
        }
        Ok(())
    }

    /// Clip name: the assigned action, or the object name
    pub fn clip_name(&self) -> &str {
        self.action.as_deref().unwrap_or(&self.name)
    }
}

/// Pose source replaying baked frames
///
/// Frames past the last baked one hold the last pose.
pub struct ScenePoseSource<'a> {
    object: &'a SceneObject,
    first_frame: u32,
    current: usize,
}

impl<'a> ScenePoseSource<'a> {
    pub fn new(object: &'a SceneObject, first_frame: u32) -> Self {
        Self {
            object,
            first_frame,
            current: 0,
        }
    }

    fn frame(&self) -> Option<&'a FrameEntry> {
        self.object.frames.get(self.current)
    }
}

impl PoseSource for ScenePoseSource<'_> {
    fn set_frame(&mut self, frame: u32) {
        let last = self.object.frames.len().saturating_sub(1);
        self.current = (frame.saturating_sub(self.first_frame) as usize).min(last);
    }

    fn bone_pose(&self, bone: usize) -> RawPose {
        self.frame()
            .and_then(|frame| frame.bones.get(bone))
            .map_or(RawPose::IDENTITY, |m| {
                RawPose::new(Mat4::from_cols_array(m))
            })
    }

    fn object_pose(&self) -> ObjectPose {
        self.frame()
            .map_or(ObjectPose::IDENTITY, |frame| frame.object.into())
    }
}

/// Command-line or manifest overrides for a scene export
#[derive(Debug, Clone, Default)]
pub struct ClipOverrides {
    /// Armature to export instead of the active object
    pub object: Option<String>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub frame_rate: Option<f32>,
}

/// Export one armature of a scene document
///
/// `output_for` receives the clip name and returns the output path. Returns the
/// path written.
pub fn export_scene(
    scene_path: &Path,
    output_for: impl FnOnce(&str) -> PathBuf,
    overrides: &ClipOverrides,
    options: &ExportOptions,
    compressor: &dyn Compressor,
) -> Result<PathBuf> {
    let scene = SceneDocument::load(scene_path)?;
    let object = scene.select_armature(overrides.object.as_deref())?;
    let skeleton = object.skeleton()?;

    if object.frames.is_empty() {
        anyhow::bail!("Armature {:?} has no baked frames", object.name);
    }
    object.validate_frames(skeleton.len())?;

    let baked_end = u32::try_from(object.frames.len() - 1)
        .ok()
        .and_then(|last| scene.frame_start.checked_add(last))
        .with_context(|| {
            format!(
                "Armature {:?}: {} frames starting at {} exceed the frame range",
                object.name,
                object.frames.len(),
                scene.frame_start
            )
        })?;
    let clip = ClipInfo::new(
        object.clip_name(),
        overrides.start.unwrap_or(scene.frame_start),
        overrides.end.or(scene.frame_end).unwrap_or(baked_end),
        overrides.frame_rate.unwrap_or_else(|| scene.frame_rate()),
    );

    let output = output_for(&clip.name);
    tracing::info!(
        "Exporting {:?} frames {}..={} from {:?} -> {:?}",
        clip.name,
        clip.range.start,
        clip.range.end,
        scene_path,
        output
    );

    let mut source = ScenePoseSource::new(object, scene.frame_start);
    export_animation(&output, &skeleton, &mut source, &clip, options, compressor)
        .with_context(|| format!("Failed to export {:?}", clip.name))?;
    Ok(output)
}
