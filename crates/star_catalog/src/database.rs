//! StarDatabase - the built, query-ready star index.
//!
//! Construction is a single batch pass:
//!
//! ```text
//! Vec<Star> ─fit root─▶ DynamicOctree ─compact─▶ StarOctree + sorted stars ─▶ CatalogIndex
//! ```
//!
//! After that nothing mutates, so a `StarDatabase` can be shared across
//! threads and queried concurrently without locking.

use std::io::Read;

use glam::{Quat, Vec3};
use web_time::Instant;

use crate::catalog_index::CatalogIndex;
use crate::designation::{CrossCatalog, CrossIndex, Designation};
use crate::error::{CatalogError, ConfigError};
use crate::frustum::Frustum;
use crate::handler::StarHandler;
use crate::loader::{self, LoadReport};
use crate::octree::{BuildTimings, DynamicOctree, OctreeConfig, OctreeStats, StarOctree};
use crate::star::Star;

/// Read-only star catalog with spatial and identity lookup.
#[derive(Clone, Debug)]
pub struct StarDatabase {
  stars: Vec<Star>,
  octree: StarOctree,
  index: CatalogIndex,
  config: OctreeConfig,
  stats: OctreeStats,
  timings: BuildTimings,
  cross_indices: Vec<CrossIndex>,
}

impl StarDatabase {
  /// Build with the default [`OctreeConfig`].
  pub fn build(stars: Vec<Star>) -> Self {
    Self::build_validated(stars, OctreeConfig::DEFAULT)
  }

  /// Build with a custom configuration.
  ///
  /// The root cube is doubled around its center until it encloses every
  /// star with a finite position, so `config` only needs to be a good guess.
  ///
  /// # Errors
  /// Returns [`ConfigError`] if `config` fails [`OctreeConfig::validate`].
  pub fn build_with_config(stars: Vec<Star>, config: OctreeConfig) -> Result<Self, ConfigError> {
    config.validate()?;
    Ok(Self::build_validated(stars, config))
  }

  /// Load a binary catalog and build the index over it.
  pub fn read<R: Read>(reader: R, config: OctreeConfig) -> Result<(Self, LoadReport), CatalogError> {
    config.validate()?;
    let (stars, report) = loader::read_catalog(reader)?;
    Ok((Self::build_validated(stars, config), report))
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "star_database::build", fields(stars = stars.len())))]
  fn build_validated(stars: Vec<Star>, config: OctreeConfig) -> Self {
    let insert_start = Instant::now();
    let fitted = config.enclosing(stars.iter().map(|s| s.position()));
    #[cfg(feature = "tracing")]
    if fitted.root_half_size != config.root_half_size {
      tracing::warn!(
        configured = config.root_half_size,
        fitted = fitted.root_half_size,
        "stars outside the root cube, expanding it"
      );
    }

    let mut tree = DynamicOctree::with_capacity(fitted, stars.len());
    {
      #[cfg(feature = "tracing")]
      let _span = tracing::info_span!("insert").entered();
      tree.extend(stars);
    }
    let insert_us = insert_start.elapsed().as_micros() as u64;

    let compact_start = Instant::now();
    let (octree, stars) = tree.rebuild_and_sort();
    let compact_us = compact_start.elapsed().as_micros() as u64;

    let index_start = Instant::now();
    let index = CatalogIndex::build(&stars);
    let index_us = index_start.elapsed().as_micros() as u64;

    let stats = OctreeStats::from_octree(&octree);
    let timings = BuildTimings {
      insert_us,
      compact_us,
      index_us,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
      stars = stats.star_count,
      nodes = stats.node_count,
      leaves = stats.leaf_count,
      max_depth = stats.max_depth,
      total_us = timings.total_us(),
      "star database built"
    );

    Self {
      stars,
      octree,
      index,
      config: fitted,
      stats,
      timings,
      cross_indices: Vec::new(),
    }
  }

  /// Attach a cross index, replacing any earlier one for the same catalog.
  pub fn with_cross_index(mut self, cross_index: CrossIndex) -> Self {
    self.cross_indices.retain(|x| x.catalog() != cross_index.catalog());
    self.cross_indices.push(cross_index);
    self
  }

  pub fn cross_index(&self, catalog: CrossCatalog) -> Option<&CrossIndex> {
    self.cross_indices.iter().find(|x| x.catalog() == catalog)
  }

  // =========================================================================
  // Lookup
  // =========================================================================

  /// Star with catalog `identity`, if present.
  pub fn find(&self, identity: u32) -> Option<&Star> {
    self.find_index(identity).map(|i| &self.stars[i])
  }

  /// Position of the star with catalog `identity` in [`stars`](Self::stars).
  #[inline]
  pub fn find_index(&self, identity: u32) -> Option<usize> {
    self.index.find(identity)
  }

  /// Star named by a designation such as `HIP 32349`, `TYC 9537-12121-3`,
  /// `#32349` or `HD 48915`.
  ///
  /// HD and SAO numbers need the matching cross index attached with
  /// [`with_cross_index`](Self::with_cross_index).
  pub fn find_by_designation(&self, name: &str) -> Option<&Star> {
    let identity = match Designation::parse(name)? {
      Designation::Cross(catalog, number) => self.cross_index(catalog)?.find(number)?,
      designation => designation.identity()?,
    };
    self.find(identity)
  }

  /// Catalog designation of `star`: `HIP n`, or `TYC a-b-c` for identities
  /// above the Hipparcos range.
  pub fn designation(&self, star: &Star) -> String {
    Designation::of(star.identity()).to_string()
  }

  // =========================================================================
  // Spatial queries
  // =========================================================================

  /// Report every star visible from `position` looking along `orientation`
  /// whose apparent magnitude is at most `limiting_magnitude`.
  ///
  /// The camera looks down its local `-Z` axis with `+Y` up; `fov_y` is the
  /// vertical field of view in radians and `aspect_ratio` is width / height.
  /// The handler receives each star with its distance and apparent magnitude.
  pub fn find_visible_stars<H>(
    &self,
    handler: &mut H,
    position: Vec3,
    orientation: Quat,
    fov_y: f32,
    aspect_ratio: f32,
    limiting_magnitude: f32,
  ) where
    H: StarHandler + ?Sized,
  {
    let frustum = Frustum::infinite(position, orientation, fov_y, aspect_ratio);
    self
      .octree
      .find_visible_stars(&self.stars, handler, &frustum, limiting_magnitude);
  }

  /// Report every star within `radius` light-years of `position`.
  pub fn find_close_stars<H>(&self, handler: &mut H, position: Vec3, radius: f32)
  where
    H: StarHandler + ?Sized,
  {
    self.octree.find_close_stars(&self.stars, handler, position, radius);
  }

  /// Closest star to `position` within `max_radius`, with its distance.
  ///
  /// Equal distances resolve to the lower identity.
  pub fn find_nearest(&self, position: Vec3, max_radius: f32) -> Option<(&Star, f32)> {
    let mut best: Option<(usize, f32)> = None;
    self
      .octree
      .visit_close(&self.stars, position, max_radius, |index, distance| {
        let closer = match best {
          None => true,
          Some((best_index, best_distance)) => {
            distance < best_distance
              || (distance == best_distance && self.stars[index].identity() < self.stars[best_index].identity())
          }
        };
        if closer {
          best = Some((index, distance));
        }
      });
    best.map(|(index, distance)| (&self.stars[index], distance))
  }

  // =========================================================================
  // Accessors
  // =========================================================================

  /// All stars, in spatial order.
  #[inline]
  pub fn stars(&self) -> &[Star] {
    &self.stars
  }

  #[inline]
  pub fn get(&self, index: usize) -> Option<&Star> {
    self.stars.get(index)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.stars.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.stars.is_empty()
  }

  pub fn octree(&self) -> &StarOctree {
    &self.octree
  }

  pub fn catalog_index(&self) -> &CatalogIndex {
    &self.index
  }

  /// Configuration the tree was built with, after root fitting.
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  pub fn stats(&self) -> &OctreeStats {
    &self.stats
  }

  pub fn timings(&self) -> &BuildTimings {
    &self.timings
  }
}

#[cfg(test)]
#[path = "database_test.rs"]
mod database_test;
