//! Tests for raw track format

use super::*;

// ========================================================================
// Header Tests
// ========================================================================

#[test]
fn test_track_header_roundtrip() {
    let header = TrackHeader::new(30.0, 91, 25);
    assert_eq!(header.frame_count, 91);
    assert_eq!(header.bone_count, 25);
    assert_eq!(header.duration, 3.0);

    let bytes = encode_track(&header, &[]).unwrap();
    assert_eq!(bytes.len(), TrackHeader::SIZE);

    let parsed = TrackHeader::from_bytes(&bytes).unwrap();
    assert_eq!(parsed, header);
}

#[test]
fn test_track_header_layout() {
    let header = TrackHeader::new(60.0, 3, 2);
    let bytes = encode_track(&header, &[]).unwrap();
    assert_eq!(&bytes[0..4], &(2.0f32 / 60.0).to_le_bytes());
    assert_eq!(&bytes[4..8], &60.0f32.to_le_bytes());
    assert_eq!(&bytes[8..12], &3i32.to_le_bytes());
    assert_eq!(&bytes[12..16], &2i32.to_le_bytes());
}

#[test]
fn test_single_frame_has_zero_duration() {
    assert_eq!(clip_duration(1, 30.0), 0.0);
    assert_eq!(clip_duration(0, 30.0), 0.0);
    assert_eq!(TrackHeader::new(24.0, 1, 10).duration, 0.0);
}

#[test]
fn test_track_buffer_size() {
    // 16 + F × N × 48
    let header = TrackHeader::new(30.0, 3, 2);
    assert_eq!(header.buffer_size(), Some(16 + 3 * 2 * 48));
    assert_eq!(header.buffer_size(), Some(304));

    // Root motion track: one bone
    let root = TrackHeader::new(30.0, 2, 1);
    assert_eq!(root.buffer_size(), Some(112));
}

#[test]
fn test_zero_bone_track() {
    let header = TrackHeader::new(30.0, 5, 0);
    assert_eq!(header.data_size(), Some(0));
    assert_eq!(header.buffer_size(), Some(TrackHeader::SIZE));
}

#[test]
fn test_huge_counts_do_not_overflow() {
    let header = TrackHeader {
        duration: 0.0,
        frame_rate: 30.0,
        frame_count: u32::MAX,
        bone_count: u32::MAX,
    };
    // u32::MAX² × 48 does not fit in 64 bits
    assert_eq!(header.data_size(), None);
    assert_eq!(header.buffer_size(), None);

    let bytes = encode_track(&header, &[]).unwrap();
    assert!(decode_track(&bytes).is_none());
}

#[test]
fn test_track_header_from_short_bytes() {
    assert!(TrackHeader::from_bytes(&[0u8; 15]).is_none());
}

// ========================================================================
// Record Tests
// ========================================================================

#[test]
fn test_record_size() {
    assert_eq!(TRACK_RECORD_SIZE, 48);
    let header = TrackHeader::new(30.0, 1, 1);
    let bytes = encode_track(&header, &[TrackRecord::IDENTITY]).unwrap();
    assert_eq!(bytes.len(), TrackHeader::SIZE + TRACK_RECORD_SIZE);
}

#[test]
fn test_record_field_offsets() {
    let record = TrackRecord::new(
        [0.1, 0.2, 0.3, 0.9],
        [1.0, 2.0, 3.0],
        4.5,
        [5.0, 6.0, 7.0],
    );
    let encoded = encode_track(&TrackHeader::new(30.0, 1, 1), &[record]).unwrap();
    let bytes = &encoded[TrackHeader::SIZE..];

    assert_eq!(&bytes[0..4], &0.1f32.to_le_bytes());
    assert_eq!(&bytes[12..16], &0.9f32.to_le_bytes());
    assert_eq!(&bytes[16..20], &1.0f32.to_le_bytes());
    assert_eq!(&bytes[24..28], &3.0f32.to_le_bytes());
    assert_eq!(&bytes[28..32], &4.5f32.to_le_bytes());
    assert_eq!(&bytes[32..36], &5.0f32.to_le_bytes());
    assert_eq!(&bytes[40..44], &7.0f32.to_le_bytes());
    assert_eq!(&bytes[44..48], &1.0f32.to_le_bytes());

    assert_eq!(TrackRecord::from_bytes(bytes), record);
}

#[test]
fn test_writer_counts_records() {
    let header = TrackHeader::new(30.0, 2, 1);
    let mut writer = TrackWriter::new(Vec::new(), &header).unwrap();
    writer.write_record(&TrackRecord::IDENTITY).unwrap();
    writer.write_record(&TrackRecord::IDENTITY).unwrap();
    assert_eq!(writer.records_written(), 2);
    assert_eq!(writer.into_inner().len(), 112);
}

#[test]
fn test_record_tail_is_always_one() {
    let record = TrackRecord::new([0.0; 4], [0.0; 3], 0.0, [0.0; 3]);
    assert_eq!(record.tail, 1.0);
    assert_eq!(TrackRecord::default().tail, 1.0);
}

// ========================================================================
// Axis Convention Tests
// ========================================================================

#[test]
fn test_native_axis_is_identity_permutation() {
    let c = AxisConvention::Native;
    assert_eq!(c.length_axis(), 0);
    assert_eq!(c.permute_vec3([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
    assert_eq!(c.permute_quat([1.0, 2.0, 3.0, 4.0]), [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_alternate_axis_rotates_components() {
    let c = AxisConvention::Alternate;
    assert_eq!(c.length_axis(), 1);
    assert_eq!(c.permute_vec3([1.0, 2.0, 3.0]), [2.0, 3.0, 1.0]);
    // w is never moved
    assert_eq!(c.permute_quat([1.0, 2.0, 3.0, 4.0]), [2.0, 3.0, 1.0, 4.0]);
}

#[test]
fn test_alternate_is_default() {
    assert_eq!(AxisConvention::default(), AxisConvention::Alternate);
    assert_eq!(AxisConvention::from_alternate(false), AxisConvention::Native);
}

// ========================================================================
// Full Buffer Tests
// ========================================================================

#[test]
fn test_decode_track() {
    let header = TrackHeader::new(30.0, 2, 1);
    let first = TrackRecord::IDENTITY;
    let second = TrackRecord::new([0.0, 1.0, 0.0, 0.0], [1.0, 0.0, -1.0], 0.0, [2.0; 3]);

    let buffer = encode_track(&header, &[first, second]).unwrap();
    assert_eq!(Some(buffer.len()), header.buffer_size());

    let (parsed, records) = decode_track(&buffer).unwrap();
    assert_eq!(parsed, header);
    assert_eq!(records, vec![first, second]);
}

#[test]
fn test_decode_truncated_track() {
    let header = TrackHeader::new(30.0, 2, 1);
    let buffer = encode_track(&header, &[TrackRecord::IDENTITY]).unwrap();
    assert!(decode_track(&buffer).is_none());
}
