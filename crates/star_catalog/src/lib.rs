//! star_catalog - spatial index for star catalogs.
//!
//! Holds tens of thousands of stars and answers two per-frame questions:
//! which stars are inside the view frustum and bright enough to see, and which
//! stars lie within a radius of a point.
//!
//! Stars are inserted into an adaptive octree whose nodes carry the brightest
//! absolute magnitude below them, then compacted once into a flat,
//! spatially sorted array. Queries prune whole subtrees on geometry and on
//! magnitude, and report matches through a [`StarHandler`].
//!
//! ```ignore
//! use star_catalog::{Star, StarDatabase};
//!
//! let db = StarDatabase::build(stars);
//! db.find_visible_stars(
//!   &mut |star: &Star, distance, app_mag| draw(star, distance, app_mag),
//!   eye, orientation, fov_y, aspect, 6.5,
//! );
//! ```

pub mod astro;
pub mod catalog_index;
pub mod database;
pub mod designation;
pub mod error;
pub mod frustum;
pub mod handler;
pub mod loader;
pub mod octree;
pub mod query;
pub mod star;

// Re-exports
pub use catalog_index::{CatalogEntry, CatalogIndex};
pub use database::StarDatabase;
pub use designation::{CrossCatalog, CrossIndex, CrossIndexEntry, Designation};
pub use error::{CatalogError, ConfigError};
pub use frustum::{Frustum, Plane};
pub use handler::StarHandler;
pub use loader::{read_catalog, read_cross_index, write_catalog, write_cross_index, LoadReport, StarRecord};
pub use octree::{
  BuildTimings, Cube, DynamicOctree, FlatNode, LevelStatistics, OctreeConfig, OctreeStats, StarOctree,
};
pub use star::{LuminosityClass, SpectralClass, Star, StarType, StellarClass};
