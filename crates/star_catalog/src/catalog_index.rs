//! Identity lookup over the spatially sorted star array.

use rayon::slice::ParallelSliceMut;

use crate::star::Star;

/// Catalogs at least this large are sorted on the rayon pool.
const PARALLEL_SORT_THRESHOLD: usize = 16 * 1024;

/// One `(identity, star_index)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogEntry {
  pub identity: u32,
  /// Position of the star in the flat star array.
  pub star_index: u32,
}

/// Entries sorted ascending by identity; lookup is a binary search.
#[derive(Clone, Debug, Default)]
pub struct CatalogIndex {
  entries: Vec<CatalogEntry>,
}

impl CatalogIndex {
  /// Index `stars` by identity.
  ///
  /// The sort is stable, so duplicated identities keep array order and
  /// [`find`](Self::find) returns the lowest star index among them.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "catalog_index::build", fields(stars = stars.len())))]
  pub fn build(stars: &[Star]) -> Self {
    let mut entries: Vec<CatalogEntry> = stars
      .iter()
      .enumerate()
      .map(|(index, star)| CatalogEntry {
        identity: star.identity(),
        star_index: index as u32,
      })
      .collect();

    if entries.len() >= PARALLEL_SORT_THRESHOLD {
      entries.par_sort_by_key(|e| e.identity);
    } else {
      entries.sort_by_key(|e| e.identity);
    }

    Self { entries }
  }

  /// Index into the star array of the star with `identity`.
  pub fn find(&self, identity: u32) -> Option<usize> {
    let at = self.entries.partition_point(|e| e.identity < identity);
    self
      .entries
      .get(at)
      .filter(|e| e.identity == identity)
      .map(|e| e.star_index as usize)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// All entries, sorted by identity.
  #[inline]
  pub fn entries(&self) -> &[CatalogEntry] {
    &self.entries
  }
}

#[cfg(test)]
#[path = "catalog_index_test.rs"]
mod catalog_index_test;
