//! Animation export pipeline
//!
//! sample -> serialize -> compress -> assemble -> write. The output file is
//! only created once every buffer has been produced, so a failed export never
//! leaves a partial file behind.

use pxd_common::{build_container, AxisConvention, ContainerMetadata};
use serde::Deserialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::animation::{sample_clip, FrameRange, SampleOptions};
use crate::compression::{compress_track, Compressor, TrackKind};
use crate::root_motion::serialize_root_track;
use crate::skeleton::{PoseSource, Skeleton};
use crate::track::serialize_main_track;

/// Errors raised by an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{0}")]
    InvalidSelection(String),

    #[error("Compression of the {track} track failed for clip \"{clip}\"")]
    CompressionFailure { clip: String, track: TrackKind },

    #[error("Uncompressed export is not supported")]
    UnsupportedUncompressed,

    #[error("Invalid frame range: end frame {end} is before start frame {start}")]
    InvalidFrameRange { start: u32, end: u32 },

    #[error("Invalid frame rate: {0}")]
    InvalidFrameRate(f32),

    #[error("Failed to encode track: {0}")]
    Encode(#[from] io::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Export toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Write records in the alternate (Y, Z, X) axis order
    pub alternate_axis_convention: bool,
    pub export_root_motion: bool,
    pub additive: bool,
    pub compress: bool,
    /// Step the pose source from frame 0 before recording
    pub sample_from_frame_zero: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            alternate_axis_convention: true,
            export_root_motion: true,
            additive: false,
            compress: true,
            sample_from_frame_zero: false,
        }
    }
}

impl ExportOptions {
    pub fn axis_convention(&self) -> AxisConvention {
        AxisConvention::from_alternate(self.alternate_axis_convention)
    }

    fn sample_options(&self) -> SampleOptions {
        SampleOptions {
            convention: self.axis_convention(),
            root_motion: self.export_root_motion,
            from_frame_zero: self.sample_from_frame_zero,
        }
    }
}

/// Name and timing of the clip to export
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub name: String,
    pub range: FrameRange,
    pub frame_rate: f32,
}

impl ClipInfo {
    pub fn new(name: impl Into<String>, start: u32, end: u32, frame_rate: f32) -> Self {
        Self {
            name: name.into(),
            range: FrameRange::new(start, end),
            frame_rate,
        }
    }
}

fn validate(clip: &ClipInfo, options: &ExportOptions) -> Result<(), ExportError> {
    if !options.compress {
        return Err(ExportError::UnsupportedUncompressed);
    }
    if !clip.range.is_valid() {
        return Err(ExportError::InvalidFrameRange {
            start: clip.range.start,
            end: clip.range.end,
        });
    }
    if !clip.frame_rate.is_finite() || clip.frame_rate <= 0.0 {
        return Err(ExportError::InvalidFrameRate(clip.frame_rate));
    }
    Ok(())
}

/// Run the whole pipeline and return the container bytes
pub fn export_to_memory<S: PoseSource + ?Sized>(
    skeleton: &Skeleton,
    source: &mut S,
    clip: &ClipInfo,
    options: &ExportOptions,
    compressor: &dyn Compressor,
) -> Result<Vec<u8>, ExportError> {
    validate(clip, options)?;

    let sampled = sample_clip(
        &clip.name,
        skeleton,
        source,
        clip.range,
        clip.frame_rate,
        &options.sample_options(),
    );

    let main_raw = serialize_main_track(&sampled, options.axis_convention())?;
    let main = compress_track(compressor, &sampled, TrackKind::Main, &main_raw)?;

    let root = match serialize_root_track(&sampled).transpose()? {
        Some(root_raw) => Some(compress_track(compressor, &sampled, TrackKind::Root, &root_raw)?),
        None => None,
    };

    let meta = ContainerMetadata {
        duration: sampled.duration,
        frame_count: sampled.frame_count,
        bone_count: sampled.bone_count(),
        additive: options.additive,
        compressed: options.compress,
    };
    let bytes = build_container(&meta, &main, root.as_deref());

    tracing::debug!(
        "Container for '{}': main {} bytes, root {} bytes, file {} bytes",
        sampled.name,
        main.len(),
        root.as_ref().map_or(0, Vec::len),
        bytes.len()
    );
    tracing::info!(
        "Exported '{}': {} bones, {} frames @ {} fps ({:.3}s)",
        sampled.name,
        sampled.bone_count(),
        sampled.frame_count,
        sampled.frame_rate,
        sampled.duration
    );

    Ok(bytes)
}

/// Export a clip to `output`
///
/// Nothing is created at `output` unless the whole container was produced and
/// written.
pub fn export_animation<S: PoseSource + ?Sized>(
    output: &Path,
    skeleton: &Skeleton,
    source: &mut S,
    clip: &ClipInfo,
    options: &ExportOptions,
    compressor: &dyn Compressor,
) -> Result<(), ExportError> {
    let bytes = export_to_memory(skeleton, source, clip, options, compressor)?;
    write_file(output, &bytes)?;
    tracing::info!("Wrote {:?} ({} bytes)", output, bytes.len());
    Ok(())
}

/// Write `bytes` to a temporary file next to `output`, then move it into place
fn write_file(output: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source| ExportError::Io {
        path: output.to_path_buf(),
        source,
    };
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    file.persist(output).map_err(|e| io_err(e.error))?;
    Ok(())
}
