//! Star octree: adaptive build-time tree and its compacted read-only form.
//!
//! Every node is a cube with a `brightest_bound`, the minimum absolute
//! magnitude of all stars below it (`+inf` when empty). Internal nodes always
//! have all 8 children, indexed by octant (see [`Cube::octant_of`]).
//!
//! # Lifecycle
//!
//! ```text
//! stars ──insert──▶ DynamicOctree ──rebuild_and_sort──▶ (StarOctree, Vec<Star>)
//!       (arena, mutable)           (one pass, consumes)  (flat, read-only)
//! ```
//!
//! # Module Structure
//!
//! - [`bounds`]: `Cube` - node region and octant math
//! - [`config`]: `OctreeConfig` - root cube and split policy
//! - [`builder`]: `DynamicOctree` - incremental insertion and splitting
//! - [`compact`]: depth-first compaction into the flat tree
//! - [`flat`]: `StarOctree` / `FlatNode` - array-backed tree queried at runtime
//! - [`stats`]: `OctreeStats`, `BuildTimings`

pub mod bounds;
pub mod builder;
pub mod compact;
pub mod config;
pub mod flat;
pub mod stats;

// Re-exports
pub use bounds::{Cube, X_POS, Y_POS, Z_POS};
pub use builder::DynamicOctree;
pub use config::{OctreeConfig, DEFAULT_MIN_HALF_SIZE, DEFAULT_ROOT_HALF_SIZE, DEFAULT_SPLIT_THRESHOLD};
pub use flat::{FlatNode, StarOctree};
pub use stats::{BuildTimings, LevelStatistics, OctreeStats};
