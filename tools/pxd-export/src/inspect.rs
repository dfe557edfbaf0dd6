//! Container inspection for the `info` command

use anyhow::{Context, Result};
use pxd_common::{decode_track, ContainerFile, TrackHeader, TrackRecord};
use std::fmt::Write as _;
use std::path::Path;

/// Human-readable summary of a container
pub fn describe_container(bytes: &[u8], decode_tracks: bool) -> Result<String> {
    let file = ContainerFile::parse(bytes).context("Not a valid PXD animation container")?;
    let pxan = &file.pxan;

    let mut out = String::new();
    writeln!(out, "File size:      {} bytes", file.bina.file_size)?;
    writeln!(out, "Format version: {:#x}", pxan.version)?;
    writeln!(out, "Duration:       {:.4}s", pxan.duration)?;
    writeln!(out, "Frames:         {}", pxan.frame_count)?;
    writeln!(out, "Bones:          {}", pxan.bone_count)?;
    writeln!(out, "Additive:       {}", pxan.additive)?;
    writeln!(out, "Compressed:     {}", pxan.is_compressed())?;
    writeln!(out, "Main track:     {:#x} ({} bytes)", pxan.main_track_offset, file.main_track.len())?;
    match file.root_track {
        Some(root) => writeln!(
            out,
            "Root motion:    {:#x} ({} bytes)",
            pxan.root_track_offset,
            root.len()
        )?,
        None => writeln!(out, "Root motion:    none")?,
    }

    if decode_tracks {
        describe_track(&mut out, "Main", file.main_track)?;
        if let Some(root) = file.root_track {
            describe_track(&mut out, "Root", root)?;
        }
    }

    Ok(out)
}

fn describe_track(out: &mut String, label: &str, bytes: &[u8]) -> std::fmt::Result {
    match decode_raw(bytes) {
        Some((header, records)) => {
            writeln!(
                out,
                "{} track: {} frames x {} bones @ {} fps",
                label, header.frame_count, header.bone_count, header.frame_rate
            )?;
            for (i, record) in records.iter().enumerate() {
                writeln!(
                    out,
                    "  [{}] rot {:?} pos {:?} len {} scale {:?}",
                    i, record.rotation, record.translation, record.length, record.scale
                )?;
            }
        }
        None => writeln!(out, "{} track: opaque compressed data", label)?,
    }
    Ok(())
}

/// Decode a track stored without compression
///
/// The header must agree with the amount of data present, otherwise the buffer
/// is assumed to be compressed.
fn decode_raw(bytes: &[u8]) -> Option<(TrackHeader, Vec<TrackRecord>)> {
    let (header, records) = decode_track(bytes)?;
    let expected = header.frame_count as usize * header.bone_count as usize;
    (header.frame_rate.is_finite() && header.frame_rate > 0.0 && records.len() == expected)
        .then_some((header, records))
}

/// Read and describe a container file
pub fn describe_file(path: &Path, decode_tracks: bool) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    describe_container(&bytes, decode_tracks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::StaticPoses;
    use crate::compression::Passthrough;
    use crate::export::{export_to_memory, ClipInfo, ExportOptions};
    use crate::skeleton::{Bone, Skeleton};

    fn container() -> Vec<u8> {
        let skeleton = Skeleton::new(vec![Bone::new("root", None, 1.0)]);
        let mut source = StaticPoses::identity(1);
        let clip = ClipInfo::new("idle", 0, 1, 30.0);
        export_to_memory(&skeleton, &mut source, &clip, &ExportOptions::default(), &Passthrough)
            .unwrap()
    }

    #[test]
    fn test_describe_header() {
        let text = describe_container(&container(), false).unwrap();
        assert!(text.contains("Frames:         2"));
        assert!(text.contains("Bones:          1"));
        assert!(text.contains("Compressed:     true"));
        assert!(!text.contains("Root motion:    none"));
    }

    #[test]
    fn test_decode_raw_tracks() {
        let text = describe_container(&container(), true).unwrap();
        assert!(text.contains("Main track: 2 frames x 1 bones @ 30 fps"));
        assert!(text.contains("Root track: 2 frames x 1 bones @ 30 fps"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(describe_container(&[0u8; 16], false).is_err());
    }
}
