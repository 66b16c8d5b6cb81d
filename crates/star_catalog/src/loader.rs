//! Binary star catalog reader and writer.
//!
//! # Format
//!
//! Little-endian throughout. A `u32` star count followed by that many
//! fixed-width records:
//!
//! | offset | type  | field                                  |
//! |--------|-------|----------------------------------------|
//! | 0      | `u32` | catalog identity                       |
//! | 4      | `f32` | right ascension (degrees)              |
//! | 8      | `f32` | declination (degrees)                  |
//! | 12     | `f32` | parallax (milliarcseconds)             |
//! | 16     | `i16` | apparent magnitude × 256               |
//! | 18     | `u16` | packed stellar class                   |
//! | 20     | `u8`  | parallax error (percent)               |
//!
//! A cross index starts with the 8 bytes `CELINDEX` and a `u16` version
//! (`0x0100`), followed by `(catalog number: u32, identity: u32)` pairs up to
//! the end of the stream.

use std::io::{Read, Write};

use byteorder::{ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::astro::{self, CATALOG_LY_PER_PARSEC};
use crate::designation::{CrossCatalog, CrossIndex, CrossIndexEntry};
use crate::error::CatalogError;
use crate::star::{Star, StellarClass};

/// Size of one encoded record in bytes.
pub const RECORD_SIZE: usize = 21;

/// Records with a parallax error above this percentage have unreliable
/// distances.
pub const UNCERTAIN_PARALLAX_ERROR: u8 = 50;

/// Uncertain stars fainter than this apparent magnitude are counted apart
/// from the bright ones.
pub const FAINT_APPARENT_MAGNITUDE: f32 = 6.0;

/// Smallest parallax (arcseconds) used for distances. Non-positive and
/// tinier measurements are raised to it, capping distances near 3.26e6 ly.
const MIN_PARALLAX_ARCSEC: f64 = 1e-6;

/// Upper bound on the up-front allocation driven by the header count.
const MAX_INITIAL_RESERVE: usize = 1 << 20;

/// Leading bytes of a cross index.
pub const CROSS_INDEX_MAGIC: [u8; 8] = *b"CELINDEX";

/// Supported cross index version.
pub const CROSS_INDEX_VERSION: u16 = 0x0100;

/// Size of one cross index record in bytes.
pub const CROSS_INDEX_RECORD_SIZE: usize = 8;

/// One catalog record as stored on disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarRecord {
  pub identity: u32,
  pub right_ascension: f32,
  pub declination: f32,
  pub parallax: f32,
  pub scaled_apparent_magnitude: i16,
  pub stellar_class: u16,
  pub parallax_error: u8,
}

impl StarRecord {
  /// Decode a record from its fixed-width form.
  pub fn decode(bytes: &[u8; RECORD_SIZE]) -> Self {
    Self {
      identity: LittleEndian::read_u32(&bytes[0..4]),
      right_ascension: LittleEndian::read_f32(&bytes[4..8]),
      declination: LittleEndian::read_f32(&bytes[8..12]),
      parallax: LittleEndian::read_f32(&bytes[12..16]),
      scaled_apparent_magnitude: LittleEndian::read_i16(&bytes[16..18]),
      stellar_class: LittleEndian::read_u16(&bytes[18..20]),
      parallax_error: bytes[20],
    }
  }

  /// Encode the record into its fixed-width form.
  pub fn encode(&self) -> [u8; RECORD_SIZE] {
    let mut bytes = [0u8; RECORD_SIZE];
    LittleEndian::write_u32(&mut bytes[0..4], self.identity);
    LittleEndian::write_f32(&mut bytes[4..8], self.right_ascension);
    LittleEndian::write_f32(&mut bytes[8..12], self.declination);
    LittleEndian::write_f32(&mut bytes[12..16], self.parallax);
    LittleEndian::write_i16(&mut bytes[16..18], self.scaled_apparent_magnitude);
    LittleEndian::write_u16(&mut bytes[18..20], self.stellar_class);
    bytes[20] = self.parallax_error;
    bytes
  }

  /// Read one record.
  pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<Self> {
    let mut bytes = [0u8; RECORD_SIZE];
    reader.read_exact(&mut bytes)?;
    Ok(Self::decode(&bytes))
  }

  /// Write one record.
  pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
    writer.write_all(&self.encode())
  }

  /// Apparent magnitude as seen from Earth.
  #[inline]
  pub fn apparent_magnitude(&self) -> f32 {
    f32::from(self.scaled_apparent_magnitude) / 256.0
  }

  /// Distance in light-years derived from the parallax.
  pub fn distance_ly(&self) -> f64 {
    let parallax_arcsec = (f64::from(self.parallax) / 1000.0).max(MIN_PARALLAX_ARCSEC);
    CATALOG_LY_PER_PARSEC / parallax_arcsec
  }

  /// Absolute magnitude from the apparent magnitude and parallax distance.
  pub fn absolute_magnitude(&self) -> f32 {
    let distance = self.distance_ly();
    (f64::from(self.apparent_magnitude()) + 5.0 - 5.0 * (distance / CATALOG_LY_PER_PARSEC).log10()) as f32
  }

  /// Whether the parallax error is too large to trust the distance.
  #[inline]
  pub fn is_parallax_uncertain(&self) -> bool {
    self.parallax_error > UNCERTAIN_PARALLAX_ERROR
  }

  /// Convert to an indexed star.
  ///
  /// # Errors
  /// [`CatalogError::NonFiniteCoordinates`] if RA, declination or parallax
  /// is NaN or infinite, or if the derived position or absolute magnitude
  /// is not finite.
  pub fn to_star(&self) -> Result<Star, CatalogError> {
    let non_finite = || CatalogError::NonFiniteCoordinates {
      identity: self.identity,
      ra: self.right_ascension,
      dec: self.declination,
      parallax: self.parallax,
    };
    if !(self.right_ascension.is_finite() && self.declination.is_finite() && self.parallax.is_finite()) {
      return Err(non_finite());
    }

    let position = astro::equatorial_to_cartesian(
      self.right_ascension,
      self.declination,
      self.distance_ly() as f32,
    );
    let absolute_magnitude = self.absolute_magnitude();
    if !(position.is_finite() && absolute_magnitude.is_finite()) {
      return Err(non_finite());
    }

    Ok(
      Star::new(self.identity, position, absolute_magnitude)
        .with_stellar_class(StellarClass::from_packed(self.stellar_class)),
    )
  }
}

/// Summary of a catalog load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
  /// Stars successfully loaded.
  pub stars: usize,
  /// Uncertain-parallax stars fainter than [`FAINT_APPARENT_MAGNITUDE`].
  pub uncertain_faint: usize,
  /// Uncertain-parallax stars at or brighter than [`FAINT_APPARENT_MAGNITUDE`].
  pub uncertain_bright: usize,
}

impl LoadReport {
  fn record(&mut self, record: &StarRecord) {
    self.stars += 1;
    if record.is_parallax_uncertain() {
      if record.apparent_magnitude() > FAINT_APPARENT_MAGNITUDE {
        self.uncertain_faint += 1;
      } else {
        self.uncertain_bright += 1;
      }
    }
  }

  /// Total stars with an uncertain parallax.
  pub fn uncertain(&self) -> usize {
    self.uncertain_faint + self.uncertain_bright
  }
}

/// Read a whole catalog.
///
/// Pass a buffered reader; records are read one at a time.
///
/// # Errors
/// - [`CatalogError::Header`] if the star count cannot be read
/// - [`CatalogError::Truncated`] if the stream ends before the announced
///   number of records
/// - [`CatalogError::NonFiniteCoordinates`] for a record that cannot be placed
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "catalog::read"))]
pub fn read_catalog<R: Read>(mut reader: R) -> Result<(Vec<Star>, LoadReport), CatalogError> {
  let expected = reader.read_u32::<LittleEndian>().map_err(CatalogError::Header)?;

  let mut stars = Vec::with_capacity((expected as usize).min(MAX_INITIAL_RESERVE));
  let mut report = LoadReport::default();
  for index in 0..expected {
    let record = StarRecord::read_from(&mut reader).map_err(|source| CatalogError::Truncated {
      index,
      expected,
      source,
    })?;
    stars.push(record.to_star()?);
    report.record(&record);
  }

  #[cfg(feature = "tracing")]
  tracing::debug!(
    stars = report.stars,
    uncertain_faint = report.uncertain_faint,
    uncertain_bright = report.uncertain_bright,
    "catalog loaded"
  );

  Ok((stars, report))
}

/// Write a whole catalog: the record count followed by every record.
pub fn write_catalog<W: Write>(mut writer: W, records: &[StarRecord]) -> Result<(), CatalogError> {
  let count = u32::try_from(records.len()).map_err(|_| {
    CatalogError::Write(std::io::Error::new(
      std::io::ErrorKind::InvalidInput,
      "more than u32::MAX records",
    ))
  })?;
  writer.write_u32::<LittleEndian>(count).map_err(CatalogError::Write)?;
  for record in records {
    record.write_to(&mut writer).map_err(CatalogError::Write)?;
  }
  writer.flush().map_err(CatalogError::Write)
}

/// Read a cross index for `catalog`.
///
/// # Errors
/// - [`CatalogError::CrossIndexRead`] on I/O failure or a short header
/// - [`CatalogError::CrossIndexHeader`] on a wrong magic or version
/// - [`CatalogError::CrossIndexTruncated`] if the stream ends mid-record
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "cross_index::read"))]
pub fn read_cross_index<R: Read>(mut reader: R, catalog: CrossCatalog) -> Result<CrossIndex, CatalogError> {
  let mut magic = [0u8; 8];
  reader.read_exact(&mut magic).map_err(CatalogError::CrossIndexRead)?;
  let version = reader.read_u16::<LittleEndian>().map_err(CatalogError::CrossIndexRead)?;
  if magic != CROSS_INDEX_MAGIC || version != CROSS_INDEX_VERSION {
    return Err(CatalogError::CrossIndexHeader { magic, version });
  }

  let mut bytes = Vec::new();
  reader.read_to_end(&mut bytes).map_err(CatalogError::CrossIndexRead)?;
  let records = bytes.chunks_exact(CROSS_INDEX_RECORD_SIZE);
  let trailing = records.remainder().len();
  if trailing != 0 {
    return Err(CatalogError::CrossIndexTruncated { trailing });
  }

  let entries: Vec<CrossIndexEntry> = records
    .map(|record| CrossIndexEntry {
      catalog_number: LittleEndian::read_u32(&record[0..4]),
      identity: LittleEndian::read_u32(&record[4..8]),
    })
    .collect();

  #[cfg(feature = "tracing")]
  tracing::debug!(catalog = catalog.prefix(), entries = entries.len(), "cross index loaded");

  Ok(CrossIndex::new(catalog, entries))
}

/// Write a cross index: header, then every entry in order.
pub fn write_cross_index<W: Write>(mut writer: W, entries: &[CrossIndexEntry]) -> Result<(), CatalogError> {
  writer.write_all(&CROSS_INDEX_MAGIC).map_err(CatalogError::Write)?;
  writer
    .write_u16::<LittleEndian>(CROSS_INDEX_VERSION)
    .map_err(CatalogError::Write)?;
  for entry in entries {
    writer
      .write_u32::<LittleEndian>(entry.catalog_number)
      .map_err(CatalogError::Write)?;
    writer.write_u32::<LittleEndian>(entry.identity).map_err(CatalogError::Write)?;
  }
  writer.flush().map_err(CatalogError::Write)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;
