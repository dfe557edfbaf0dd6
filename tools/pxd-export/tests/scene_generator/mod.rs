//! Programmatic scene document generation for integration tests.
//!
//! Generates a scene with:
//! - A camera (non-armature object)
//! - 3-bone armature (Root -> Spine -> Head), set as the active object
//! - 10 baked frames of a wave, with the object walking along +Y

use serde_json::{json, Value};
use std::f32::consts::TAU;
use std::path::Path;

/// Bone count for the test armature
pub const BONE_COUNT: usize = 3;
/// Baked frame count
pub const FRAME_COUNT: usize = 10;
/// First scene frame
pub const FRAME_START: u32 = 1;
/// Segment height between bones
const SEGMENT_HEIGHT: f32 = 1.0;

/// Column-major matrix: rotation about Z by `angle`, then translation
fn matrix(angle: f32, translation: [f32; 3]) -> [f32; 16] {
    let (s, c) = angle.sin_cos();
    [
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        translation[0], translation[1], translation[2], 1.0,
    ]
}

fn frames() -> Vec<Value> {
    (0..FRAME_COUNT)
        .map(|f| {
            let t = f as f32 / FRAME_COUNT as f32;
            let sway = (t * TAU).sin() * 0.2;
            let bones: Vec<[f32; 16]> = (0..BONE_COUNT)
                .map(|b| matrix(sway * b as f32, [0.0, b as f32 * SEGMENT_HEIGHT, 0.0]))
                .collect();
            json!({
                "bones": bones,
                "object": {
                    "location": [0.0, f as f32 * 0.1, 0.0],
                    "rotation": [0.0, 0.0, 0.0, 1.0],
                    "scale": [1.0, 1.0, 1.0]
                }
            })
        })
        .collect()
}

/// Build the scene document
pub fn scene_json(active_object: Option<&str>) -> Value {
    json!({
        "active_object": active_object,
        "frame_start": FRAME_START,
        "fps": 30,
        "fps_base": 1.0,
        "objects": [
            { "name": "Camera", "type": "camera" },
            {
                "name": "Rig",
                "type": "armature",
                "action": "wave",
                "bones": [
                    { "name": "Root", "length": SEGMENT_HEIGHT },
                    { "name": "Spine", "parent": "Root", "length": SEGMENT_HEIGHT },
                    { "name": "Head", "parent": "Spine", "length": 0.5 }
                ],
                "frames": frames()
            }
        ]
    })
}

/// Write the scene document to `path`
pub fn write_scene(path: &Path, active_object: Option<&str>) -> std::io::Result<()> {
    let text = serde_json::to_string_pretty(&scene_json(active_object))?;
    std::fs::write(path, text)
}
