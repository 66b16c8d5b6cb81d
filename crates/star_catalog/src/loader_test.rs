use std::io::Cursor;

use glam::Vec3;

use super::*;

fn record(identity: u32, ra: f32, dec: f32, parallax: f32, app_mag: f32, parallax_error: u8) -> StarRecord {
  StarRecord {
    identity,
    right_ascension: ra,
    declination: dec,
    parallax,
    scaled_apparent_magnitude: (app_mag * 256.0) as i16,
    stellar_class: 0x0426,
    parallax_error,
  }
}

fn encode_catalog(records: &[StarRecord]) -> Vec<u8> {
  let mut bytes = Vec::new();
  write_catalog(&mut bytes, records).expect("writing to a Vec cannot fail");
  bytes
}

// =========================================================================
// Record layout
// =========================================================================

/// Fields sit at their documented little-endian offsets.
#[test]
fn test_record_layout() {
  let bytes = record(0x0403_0201, 0.0, 0.0, 0.0, 1.0, 7).encode();
  assert_eq!(bytes.len(), RECORD_SIZE);
  assert_eq!(&bytes[0..4], &[1, 2, 3, 4]);
  assert_eq!(&bytes[16..18], &256i16.to_le_bytes());
  assert_eq!(&bytes[18..20], &[0x26, 0x04]);
  assert_eq!(bytes[20], 7);
}

#[test]
fn test_record_decode_inverts_encode() {
  let original = record(118_322, 279.234_7, 38.783_7, 130.23, 0.03, 1);
  assert_eq!(StarRecord::decode(&original.encode()), original);
}

// =========================================================================
// Conversion
// =========================================================================

/// 100 mas parallax is 10 pc, where apparent equals absolute magnitude.
#[test]
fn test_to_star_at_ten_parsecs() {
  let star = record(42, 0.0, 0.0, 100.0, 1.0, 0).to_star().expect("finite record");
  assert_eq!(star.identity(), 42);
  assert!((star.absolute_magnitude() - 1.0).abs() < 1e-5);
  assert!((star.position() - Vec3::new(32.6, 0.0, 0.0)).length() < 1e-3, "{:?}", star.position());
  assert_eq!(star.stellar_class().to_string(), "G2 V");
}

/// Every tenfold increase in distance dims by 5 magnitudes.
#[test]
fn test_absolute_magnitude_scales_with_distance() {
  let near = record(1, 0.0, 0.0, 100.0, 5.0, 0);
  let far = record(2, 0.0, 0.0, 10.0, 5.0, 0);
  assert!((near.absolute_magnitude() - far.absolute_magnitude() - 5.0).abs() < 1e-4);
}

/// Non-positive parallax is placed very far away instead of failing.
#[test]
fn test_non_positive_parallax_is_distant() {
  let star = record(3, 90.0, 0.0, -2.0, 9.0, 0).to_star().expect("finite record");
  let distance = star.position().length();
  assert!((distance / 3.26e6 - 1.0).abs() < 1e-3, "distance {}", distance);
  assert!((record(4, 0.0, 0.0, 0.0, 9.0, 0).distance_ly() - 3.26e6).abs() < 1e-3);
}

/// Tiny positive parallaxes are clamped like non-positive ones, so the star
/// stays at a finite, queryable position.
#[test]
fn test_tiny_parallax_is_clamped() {
  let tiny = record(7, 45.0, 30.0, 1e-40, 8.0, 0);
  assert!((tiny.distance_ly() - 3.26e6).abs() < 1e-3, "distance {}", tiny.distance_ly());

  let star = tiny.to_star().expect("clamped record");
  assert!(star.position().is_finite(), "position {:?}", star.position());
  assert!(star.absolute_magnitude().is_finite());
  let distance = star.position().length();
  assert!((distance / 3.26e6 - 1.0).abs() < 1e-3, "distance {}", distance);

  let (stars, report) = read_catalog(Cursor::new(encode_catalog(&[tiny]))).expect("valid catalog");
  assert_eq!(report.stars, 1);
  assert!(stars[0].position().is_finite());
}

#[test]
fn test_non_finite_coordinates_rejected() {
  let err = record(5, f32::NAN, 0.0, 10.0, 1.0, 0).to_star().unwrap_err();
  assert!(matches!(err, CatalogError::NonFiniteCoordinates { identity: 5, .. }));

  let err = record(6, 0.0, 0.0, f32::INFINITY, 1.0, 0).to_star().unwrap_err();
  assert!(matches!(err, CatalogError::NonFiniteCoordinates { identity: 6, .. }));
}

// =========================================================================
// Catalog streams
// =========================================================================

#[test]
fn test_read_catalog() {
  let records = [
    record(10, 10.0, 20.0, 50.0, 3.0, 0),
    record(11, 200.0, -45.0, 5.0, 8.5, 80),
    record(12, 300.0, 60.0, 2.0, 4.0, 51),
    record(13, 45.0, 0.0, 20.0, 7.0, 50),
  ];
  let (stars, report) = read_catalog(Cursor::new(encode_catalog(&records))).expect("valid catalog");

  let ids: Vec<u32> = stars.iter().map(|s| s.identity()).collect();
  assert_eq!(ids, vec![10, 11, 12, 13]);
  assert_eq!(report.stars, 4);
  assert_eq!(report.uncertain_faint, 1, "error 80% at m8.5");
  assert_eq!(report.uncertain_bright, 1, "error 51% at m4.0");
  assert_eq!(report.uncertain(), 2);
}

#[test]
fn test_empty_catalog() {
  let (stars, report) = read_catalog(Cursor::new(encode_catalog(&[]))).expect("valid catalog");
  assert!(stars.is_empty());
  assert_eq!(report, LoadReport::default());
}

#[test]
fn test_missing_header() {
  let err = read_catalog(Cursor::new(vec![1u8, 0])).unwrap_err();
  assert!(matches!(err, CatalogError::Header(_)));
}

/// A stream shorter than its header announces is an error, not a short load.
#[test]
fn test_truncated_catalog() {
  let mut bytes = encode_catalog(&[record(1, 0.0, 0.0, 10.0, 1.0, 0), record(2, 0.0, 0.0, 10.0, 1.0, 0)]);
  bytes.truncate(bytes.len() - 5);

  let err = read_catalog(Cursor::new(bytes)).unwrap_err();
  match err {
    CatalogError::Truncated { index, expected, .. } => {
      assert_eq!(index, 1);
      assert_eq!(expected, 2);
    }
    other => panic!("expected truncation, got {:?}", other),
  }
}

/// A huge announced count does not allocate up front.
#[test]
fn test_huge_count_with_no_records() {
  let bytes = u32::MAX.to_le_bytes().to_vec();
  let err = read_catalog(Cursor::new(bytes)).unwrap_err();
  assert!(matches!(err, CatalogError::Truncated { index: 0, .. }));
}

// =========================================================================
// Cross index streams
// =========================================================================

fn cross_entries() -> Vec<CrossIndexEntry> {
  vec![
    CrossIndexEntry {
      catalog_number: 48915,
      identity: 32349,
    },
    CrossIndexEntry {
      catalog_number: 358,
      identity: 677,
    },
  ]
}

/// Header is the magic and version; records follow as LE pairs.
#[test]
fn test_cross_index_layout() {
  let mut bytes = Vec::new();
  write_cross_index(&mut bytes, &cross_entries()).expect("write to Vec");
  assert_eq!(bytes.len(), 10 + 2 * CROSS_INDEX_RECORD_SIZE);
  assert_eq!(&bytes[0..8], b"CELINDEX");
  assert_eq!(&bytes[8..10], &[0x00, 0x01]);
  assert_eq!(&bytes[10..14], &48915u32.to_le_bytes());
  assert_eq!(&bytes[14..18], &32349u32.to_le_bytes());
}

#[test]
fn test_read_cross_index() {
  let mut bytes = Vec::new();
  write_cross_index(&mut bytes, &cross_entries()).expect("write to Vec");

  let index = read_cross_index(Cursor::new(bytes), CrossCatalog::HenryDraper).expect("valid cross index");
  assert_eq!(index.catalog(), CrossCatalog::HenryDraper);
  assert_eq!(index.len(), 2);
  assert_eq!(index.find(358), Some(677));
  assert_eq!(index.find(48915), Some(32349));
}

#[test]
fn test_cross_index_bad_header() {
  let mut bytes = b"CELSTARS".to_vec();
  bytes.extend_from_slice(&CROSS_INDEX_VERSION.to_le_bytes());
  let err = read_cross_index(Cursor::new(bytes), CrossCatalog::Sao).unwrap_err();
  assert!(matches!(err, CatalogError::CrossIndexHeader { version: 0x0100, .. }));

  let mut bytes = CROSS_INDEX_MAGIC.to_vec();
  bytes.extend_from_slice(&0x0200u16.to_le_bytes());
  let err = read_cross_index(Cursor::new(bytes), CrossCatalog::Sao).unwrap_err();
  assert!(matches!(err, CatalogError::CrossIndexHeader { version: 0x0200, .. }));

  let err = read_cross_index(Cursor::new(b"CELIN".to_vec()), CrossCatalog::Sao).unwrap_err();
  assert!(matches!(err, CatalogError::CrossIndexRead(_)));
}

/// A partial trailing record rejects the whole index.
#[test]
fn test_cross_index_partial_record() {
  let mut bytes = Vec::new();
  write_cross_index(&mut bytes, &cross_entries()).expect("write to Vec");
  bytes.truncate(bytes.len() - 3);
  let err = read_cross_index(Cursor::new(bytes), CrossCatalog::HenryDraper).unwrap_err();
  assert!(matches!(err, CatalogError::CrossIndexTruncated { trailing: 5 }));
}

#[test]
fn test_empty_cross_index_stream() {
  let mut bytes = Vec::new();
  write_cross_index(&mut bytes, &[]).expect("write to Vec");
  let index = read_cross_index(Cursor::new(bytes), CrossCatalog::Sao).expect("header only");
  assert!(index.is_empty());
}
