//! pxd.toml batch manifest
//!
//! ```toml
//! output_dir = "build/anims"
//! compressor = "lz4"
//!
//! [defaults]
//! alternate_axis_convention = true
//! export_root_motion = true
//!
//! [[clips]]
//! scene = "scenes/hero_walk.json"
//! output = "hero_walk.anm.pxd"
//! export_root_motion = false
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use hashbrown::HashSet;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::compression::CompressorKind;
use crate::export::ExportOptions;
use crate::scene::{export_scene, ClipOverrides};
use pxd_common::ANIMATION_EXT;

/// Parsed manifest
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub compressor: CompressorKind,
    #[serde(default)]
    pub defaults: ExportOptions,
    #[serde(default)]
    pub clips: Vec<ClipEntry>,

    /// Directory containing the manifest, set by [`load_manifest`]
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

/// One clip to export
#[derive(Debug, Clone, Deserialize)]
pub struct ClipEntry {
    /// Scene document to read
    pub scene: PathBuf,
    /// Armature to export (default: the scene's active object)
    pub object: Option<String>,
    /// Output file name (default: `<clip name>.anm.pxd`)
    pub output: Option<PathBuf>,
    pub start: Option<u32>,
    pub end: Option<u32>,
    pub frame_rate: Option<f32>,

    // Per-clip option overrides
    pub alternate_axis_convention: Option<bool>,
    pub export_root_motion: Option<bool>,
    pub additive: Option<bool>,
    pub compress: Option<bool>,
    pub sample_from_frame_zero: Option<bool>,
}

impl ClipEntry {
    /// `defaults` with this entry's overrides applied
    pub fn options(&self, defaults: &ExportOptions) -> ExportOptions {
        ExportOptions {
            alternate_axis_convention: self
                .alternate_axis_convention
                .unwrap_or(defaults.alternate_axis_convention),
            export_root_motion: self.export_root_motion.unwrap_or(defaults.export_root_motion),
            additive: self.additive.unwrap_or(defaults.additive),
            compress: self.compress.unwrap_or(defaults.compress),
            sample_from_frame_zero: self
                .sample_from_frame_zero
                .unwrap_or(defaults.sample_from_frame_zero),
        }
    }

    pub fn overrides(&self) -> ClipOverrides {
        ClipOverrides {
            object: self.object.clone(),
            start: self.start,
            end: self.end,
            frame_rate: self.frame_rate,
        }
    }
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pxd.toml")
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Load a manifest from disk
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
    let mut manifest = Manifest::parse(&content)?;
    manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(manifest)
}

/// Check the manifest without exporting anything
pub fn validate(manifest: &Manifest) -> Result<()> {
    if manifest.clips.is_empty() {
        anyhow::bail!("Manifest lists no clips");
    }

    let mut outputs = HashSet::new();
    for (i, clip) in manifest.clips.iter().enumerate() {
        let scene = manifest.resolve(&clip.scene);
        if !scene.exists() {
            anyhow::bail!("Clip {}: scene not found: {}", i, scene.display());
        }
        if let (Some(start), Some(end)) = (clip.start, clip.end) {
            if end < start {
                anyhow::bail!("Clip {}: end frame {} is before start frame {}", i, end, start);
            }
        }
        if let Some(output) = &clip.output {
            if !outputs.insert(output.clone()) {
                anyhow::bail!("Clip {}: duplicate output {}", i, output.display());
            }
        }
    }
    Ok(())
}

/// Export every clip, returning the written paths
///
/// With `verbose`, each clip's resolved options are logged before export.
pub fn build_all(
    manifest: &Manifest,
    output_override: Option<&Path>,
    verbose: bool,
) -> Result<Vec<PathBuf>> {
    let output_dir = match output_override {
        Some(dir) => dir.to_path_buf(),
        None => manifest.resolve(&manifest.output_dir),
    };
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    let compressor = manifest.compressor.compressor();
    let mut written = Vec::with_capacity(manifest.clips.len());

    for clip in &manifest.clips {
        let scene = manifest.resolve(&clip.scene);
        let options = clip.options(&manifest.defaults);
        if verbose {
            tracing::info!("{}: {:?}", scene.display(), options);
        }
        let path = export_scene(
            &scene,
            |name| match &clip.output {
                Some(output) => output_dir.join(output),
                None => output_dir.join(format!("{name}.{ANIMATION_EXT}")),
            },
            &clip.overrides(),
            &options,
            compressor.as_ref(),
        )?;
        if verbose {
            tracing::info!("  -> {}", path.display());
        }
        written.push(path);
    }

    tracing::info!("Exported {} clip(s) to {:?}", written.len(), output_dir);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_defaults() {
        let manifest = Manifest::parse(
            r#"
            [[clips]]
            scene = "hero.json"
            "#,
        )
        .unwrap();

        assert_eq!(manifest.output_dir, PathBuf::from("output"));
        assert_eq!(manifest.compressor, CompressorKind::Lz4);
        assert_eq!(manifest.defaults, ExportOptions::default());
        assert_eq!(manifest.clips.len(), 1);
        assert!(manifest.clips[0].output.is_none());
    }

    #[test]
    fn test_clip_overrides() {
        let manifest = Manifest::parse(
            r#"
            compressor = "passthrough"

            [defaults]
            additive = true

            [[clips]]
            scene = "hero.json"
            export_root_motion = false
            start = 2
            "#,
        )
        .unwrap();

        assert_eq!(manifest.compressor, CompressorKind::Passthrough);
        let clip = &manifest.clips[0];
        let options = clip.options(&manifest.defaults);
        assert!(options.additive);
        assert!(!options.export_root_motion);
        assert!(options.alternate_axis_convention);
        assert_eq!(clip.overrides().start, Some(2));
    }

    #[test]
    fn test_validate_empty() {
        let manifest = Manifest::parse("").unwrap();
        assert!(validate(&manifest).is_err());
    }

    #[test]
    fn test_validate_missing_scene() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pxd.toml");
        std::fs::write(&path, "[[clips]]\nscene = \"missing.json\"\n").unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.base_dir, dir.path());
        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("scene not found"));
    }

    #[test]
    fn test_validate_duplicate_outputs() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let path = dir.path().join("pxd.toml");
        std::fs::write(
            &path,
            r#"
            [[clips]]
            scene = "a.json"
            output = "same.anm.pxd"

            [[clips]]
            scene = "a.json"
            output = "same.anm.pxd"
            "#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("duplicate output"));
    }

    #[test]
    fn test_build_all_writes_every_clip() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{
                "active_object": "Rig",
                "objects": [{
                    "name": "Rig",
                    "type": "armature",
                    "action": "idle",
                    "bones": [{ "name": "root" }],
                    "frames": [
                        { "bones": [[1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]] },
                        { "bones": [[1,0,0,0, 0,1,0,0, 0,0,1,0, 0,0,0,1]] }
                    ]
                }]
            }"#,
        )
        .unwrap();
        let path = dir.path().join("pxd.toml");
        std::fs::write(
            &path,
            r#"
            compressor = "passthrough"

            [[clips]]
            scene = "a.json"

            [[clips]]
            scene = "a.json"
            output = "idle_first.anm.pxd"
            end = 0
            "#,
        )
        .unwrap();

        let manifest = load_manifest(&path).unwrap();
        let out = dir.path().join("out");
        let written = build_all(&manifest, Some(&out), true).unwrap();
        assert_eq!(
            written,
            vec![out.join("idle.anm.pxd"), out.join("idle_first.anm.pxd")]
        );
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_validate_reversed_range() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        let path = dir.path().join("pxd.toml");
        std::fs::write(&path, "[[clips]]\nscene = \"a.json\"\nstart = 4\nend = 1\n").unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert!(validate(&manifest).is_err());
    }
}
