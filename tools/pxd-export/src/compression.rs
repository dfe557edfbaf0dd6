//! Track compression adapter
//!
//! The container stores compressed track blobs verbatim. Any codec can be
//! plugged in through [`Compressor`]; a codec that returns an empty buffer has
//! failed and aborts the export.

use serde::Deserialize;
use std::fmt;

use crate::animation::AnimationClip;
use crate::export::ExportError;

/// Turns a raw serialized track into an opaque compressed blob
///
/// An empty result signals failure.
pub trait Compressor {
    fn compress(&self, raw: &[u8]) -> Vec<u8>;
}

impl<F> Compressor for F
where
    F: Fn(&[u8]) -> Vec<u8>,
{
    fn compress(&self, raw: &[u8]) -> Vec<u8> {
        self(raw)
    }
}

/// LZ4 block compression with the uncompressed size prepended
#[derive(Debug, Clone, Copy, Default)]
pub struct Lz4Compressor;

impl Compressor for Lz4Compressor {
    fn compress(&self, raw: &[u8]) -> Vec<u8> {
        lz4_flex::compress_prepend_size(raw)
    }
}

/// Stores tracks as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Compressor for Passthrough {
    fn compress(&self, raw: &[u8]) -> Vec<u8> {
        raw.to_vec()
    }
}

/// Compressor selectable from the command line or a manifest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressorKind {
    #[default]
    Lz4,
    Passthrough,
}

impl CompressorKind {
    pub fn compressor(self) -> Box<dyn Compressor> {
        match self {
            CompressorKind::Lz4 => Box::new(Lz4Compressor),
            CompressorKind::Passthrough => Box::new(Passthrough),
        }
    }
}

/// Which of a clip's tracks is being compressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Main,
    Root,
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackKind::Main => f.write_str("main"),
            TrackKind::Root => f.write_str("root motion"),
        }
    }
}

/// Compress one serialized track, mapping an empty result to an error
pub fn compress_track(
    compressor: &dyn Compressor,
    clip: &AnimationClip,
    kind: TrackKind,
    raw: &[u8],
) -> Result<Vec<u8>, ExportError> {
    let compressed = compressor.compress(raw);
    if compressed.is_empty() {
        tracing::warn!("Compression of the {} track of '{}' failed", kind, clip.name);
        return Err(ExportError::CompressionFailure {
            clip: clip.name.clone(),
            track: kind,
        });
    }

    tracing::debug!(
        "Compressed {} track of '{}': {} -> {} bytes",
        kind,
        clip.name,
        raw.len(),
        compressed.len()
    );
    Ok(compressed)
}
