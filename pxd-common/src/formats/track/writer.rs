//! Raw track buffer writer

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Write};

use super::{TrackHeader, TrackRecord};

/// Writer for raw (uncompressed) track buffers
///
/// Emits the 16-byte header on creation, then one 48-byte record per call.
pub struct TrackWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl<W: Write> TrackWriter<W> {
    /// Create a writer and emit the track header
    pub fn new(mut writer: W, header: &TrackHeader) -> io::Result<Self> {
        writer.write_f32::<LittleEndian>(header.duration)?;
        writer.write_f32::<LittleEndian>(header.frame_rate)?;
        writer.write_u32::<LittleEndian>(header.frame_count)?;
        writer.write_u32::<LittleEndian>(header.bone_count)?;
        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    /// Write one 48-byte record
    pub fn write_record(&mut self, record: &TrackRecord) -> io::Result<()> {
        for &f in &record.rotation {
            self.writer.write_f32::<LittleEndian>(f)?;
        }
        for &f in &record.translation {
            self.writer.write_f32::<LittleEndian>(f)?;
        }
        self.writer.write_f32::<LittleEndian>(record.length)?;
        for &f in &record.scale {
            self.writer.write_f32::<LittleEndian>(f)?;
        }
        self.writer.write_f32::<LittleEndian>(record.tail)?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Encode a whole track into a new buffer
pub fn encode_track(header: &TrackHeader, records: &[TrackRecord]) -> io::Result<Vec<u8>> {
    let mut writer = TrackWriter::new(
        Vec::with_capacity(header.buffer_size().unwrap_or_default()),
        header,
    )?;
    for record in records {
        writer.write_record(record)?;
    }
    Ok(writer.into_inner())
}
