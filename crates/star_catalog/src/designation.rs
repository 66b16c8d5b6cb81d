//! Catalog designations and cross indices.
//!
//! Star identities are Hipparcos numbers up to [`MAX_HIPPARCOS_NUMBER`];
//! larger identities encode a Tycho designation `TYC a-b-c` as
//! `c * TYC3_MULTIPLIER + b * TYC2_MULTIPLIER + a`. Other catalogs (HD, SAO)
//! resolve through a [`CrossIndex`] that maps their numbers onto identities.
//!
//! Accepted names, prefixes matched case-insensitively:
//!
//! | form               | meaning                        |
//! |--------------------|--------------------------------|
//! | `#123`             | raw identity                   |
//! | `HIP 32349`        | Hipparcos number = identity    |
//! | `TYC 9537-12121-3` | Tycho triple, encoded          |
//! | `HD 48915`         | Henry Draper, via cross index  |
//! | `SAO 151881`       | SAO, via cross index           |

use std::fmt;

use rayon::slice::ParallelSliceMut;

/// Largest identity displayed as a Hipparcos number.
pub const MAX_HIPPARCOS_NUMBER: u32 = 999_999;

/// Weight of the second Tycho component in an encoded identity.
pub const TYC2_MULTIPLIER: u32 = 10_000;

/// Weight of the third Tycho component in an encoded identity.
pub const TYC3_MULTIPLIER: u32 = 1_000_000_000;

const TYC123_MIN: u32 = 1;
const TYC1_MAX: u32 = 9_999;
const TYC2_MAX: u32 = 99_999;
const TYC3_MAX: u32 = 3;

// TDSC adds a single TYC3 = 4 entry (TYC 2907-1276-4).
const TDSC_TYC3_MAX: u32 = 4;
const TDSC_TYC3_MAX_RANGE_TYC1: u32 = 2_907;

/// Cross indices at least this large are sorted on the rayon pool.
const PARALLEL_SORT_THRESHOLD: usize = 16 * 1024;

/// Catalog whose numbers map onto identities through a [`CrossIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CrossCatalog {
  HenryDraper,
  Sao,
}

impl CrossCatalog {
  /// Name prefix, without the separating space.
  pub fn prefix(self) -> &'static str {
    match self {
      CrossCatalog::HenryDraper => "HD",
      CrossCatalog::Sao => "SAO",
    }
  }
}

/// A parsed star designation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Designation {
  /// `#<n>`: the identity itself.
  Identity(u32),
  Hipparcos(u32),
  Tycho { tyc1: u32, tyc2: u32, tyc3: u32 },
  Cross(CrossCatalog, u32),
}

impl Designation {
  /// Display designation of a star identity: `HIP n` for Hipparcos-range
  /// identities, the decoded Tycho triple otherwise.
  pub fn of(identity: u32) -> Self {
    if identity <= MAX_HIPPARCOS_NUMBER {
      return Designation::Hipparcos(identity);
    }
    let tyc3 = identity / TYC3_MULTIPLIER;
    let rest = identity % TYC3_MULTIPLIER;
    Designation::Tycho {
      tyc1: rest % TYC2_MULTIPLIER,
      tyc2: rest / TYC2_MULTIPLIER,
      tyc3,
    }
  }

  /// Parse a designation. Trailing blanks are allowed, any other suffix is
  /// not.
  pub fn parse(name: &str) -> Option<Self> {
    if let Some(rest) = name.strip_prefix('#') {
      return whole_number(rest).map(Designation::Identity);
    }
    if let Some(rest) = strip_catalog_prefix(name, "HIP") {
      return whole_number(rest).map(Designation::Hipparcos);
    }
    if let Some(rest) = strip_catalog_prefix(name, "TYC") {
      return parse_tycho(rest);
    }
    [CrossCatalog::HenryDraper, CrossCatalog::Sao]
      .into_iter()
      .find_map(|catalog| {
        let rest = strip_catalog_prefix(name, catalog.prefix())?;
        whole_number(rest).map(|number| Designation::Cross(catalog, number))
      })
  }

  /// Identity named directly by this designation.
  ///
  /// `None` for cross-catalog numbers, and for Tycho triples whose encoding
  /// does not fit in a `u32`.
  pub fn identity(&self) -> Option<u32> {
    match *self {
      Designation::Identity(identity) | Designation::Hipparcos(identity) => Some(identity),
      Designation::Tycho { tyc1, tyc2, tyc3 } => tyc3
        .checked_mul(TYC3_MULTIPLIER)?
        .checked_add(tyc2.checked_mul(TYC2_MULTIPLIER)?)?
        .checked_add(tyc1),
      Designation::Cross(..) => None,
    }
  }
}

impl fmt::Display for Designation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Designation::Identity(identity) => write!(f, "#{}", identity),
      Designation::Hipparcos(number) => write!(f, "HIP {}", number),
      Designation::Tycho { tyc1, tyc2, tyc3 } => write!(f, "TYC {}-{}-{}", tyc1, tyc2, tyc3),
      Designation::Cross(catalog, number) => write!(f, "{} {}", catalog.prefix(), number),
    }
  }
}

/// Remainder after `prefix`, one space and any further blanks. The prefix is
/// matched without regard to ASCII case.
fn strip_catalog_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
  let head = name.get(..prefix.len())?;
  if !head.eq_ignore_ascii_case(prefix) {
    return None;
  }
  let rest = name[prefix.len()..].strip_prefix(' ')?;
  Some(rest.trim_start_matches([' ', '\t']))
}

/// Leading decimal digits of `text` and what follows them.
fn leading_number(text: &str) -> Option<(u32, &str)> {
  let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
  let value = text[..end].parse().ok()?;
  Some((value, &text[end..]))
}

/// A number followed only by blanks.
fn whole_number(text: &str) -> Option<u32> {
  let (value, rest) = leading_number(text)?;
  is_blank(rest).then_some(value)
}

fn is_blank(text: &str) -> bool {
  text.trim_start_matches([' ', '\t']).is_empty()
}

fn parse_tycho(text: &str) -> Option<Designation> {
  let (tyc1, rest) = leading_number(text)?;
  let rest = rest.strip_prefix('-')?;
  let (tyc2, rest) = leading_number(rest)?;
  let rest = rest.strip_prefix('-')?;
  let (tyc3, rest) = leading_number(rest)?;

  let tyc3_valid = tyc3 <= TYC3_MAX || (tyc3 == TDSC_TYC3_MAX && tyc1 <= TDSC_TYC3_MAX_RANGE_TYC1);
  let valid = (TYC123_MIN..=TYC1_MAX).contains(&tyc1)
    && (TYC123_MIN..=TYC2_MAX).contains(&tyc2)
    && tyc3 >= TYC123_MIN
    && tyc3_valid
    && is_blank(rest);
  valid.then_some(Designation::Tycho { tyc1, tyc2, tyc3 })
}

/// One `(catalog number, identity)` pair of a cross index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrossIndexEntry {
  pub catalog_number: u32,
  pub identity: u32,
}

/// Map from another catalog's numbers to star identities, sorted by catalog
/// number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossIndex {
  catalog: CrossCatalog,
  entries: Vec<CrossIndexEntry>,
}

impl CrossIndex {
  /// Sort `entries` into an index. The sort is stable, so the first of
  /// several entries for one catalog number wins.
  pub fn new(catalog: CrossCatalog, mut entries: Vec<CrossIndexEntry>) -> Self {
    if entries.len() >= PARALLEL_SORT_THRESHOLD {
      entries.par_sort_by_key(|e| e.catalog_number);
    } else {
      entries.sort_by_key(|e| e.catalog_number);
    }
    Self { catalog, entries }
  }

  #[inline]
  pub fn catalog(&self) -> CrossCatalog {
    self.catalog
  }

  /// Identity of the star with `catalog_number` in this catalog.
  pub fn find(&self, catalog_number: u32) -> Option<u32> {
    let at = self.entries.partition_point(|e| e.catalog_number < catalog_number);
    self
      .entries
      .get(at)
      .filter(|e| e.catalog_number == catalog_number)
      .map(|e| e.identity)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  #[inline]
  pub fn entries(&self) -> &[CrossIndexEntry] {
    &self.entries
  }
}

#[cfg(test)]
#[path = "designation_test.rs"]
mod designation_test;
