//! Tree statistics and build timings.

use smallvec::SmallVec;

use super::StarOctree;

/// Node and star counts for one depth of the tree.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelStatistics {
  pub node_count: usize,
  pub leaf_count: usize,
  /// Stars held by leaves at this depth.
  pub star_count: usize,
  pub half_size: f32,
}

/// Shape of a compacted octree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OctreeStats {
  pub node_count: usize,
  pub leaf_count: usize,
  /// Leaves holding at least one star.
  pub nonempty_leaf_count: usize,
  pub star_count: usize,
  /// Depth of the deepest leaf (root = 0).
  pub max_depth: u32,
  /// Per-depth breakdown, indexed by depth.
  pub levels: Vec<LevelStatistics>,
}

impl OctreeStats {
  /// Walk the tree once and collect counts per depth.
  pub fn from_octree(octree: &StarOctree) -> Self {
    let mut stats = Self::default();
    let mut stack: SmallVec<[(usize, u32); 64]> = SmallVec::new();
    stack.push((StarOctree::ROOT, 0));

    while let Some((index, depth)) = stack.pop() {
      let node = octree.node(index);
      let level = depth as usize;
      if stats.levels.len() <= level {
        stats.levels.resize(level + 1, LevelStatistics::default());
      }
      let entry = &mut stats.levels[level];
      entry.node_count += 1;
      entry.half_size = node.cube().half_size;
      stats.node_count += 1;

      match node.children() {
        Some(children) => stack.extend(children.map(|c| (c, depth + 1))),
        None => {
          entry.leaf_count += 1;
          entry.star_count += node.star_count();
          stats.leaf_count += 1;
          if !node.is_empty() {
            stats.nonempty_leaf_count += 1;
          }
          stats.star_count += node.star_count();
          stats.max_depth = stats.max_depth.max(depth);
        }
      }
    }

    stats
  }

  /// Average stars per non-empty leaf.
  pub fn mean_leaf_occupancy(&self) -> f32 {
    if self.nonempty_leaf_count == 0 {
      0.0
    } else {
      self.star_count as f32 / self.nonempty_leaf_count as f32
    }
  }
}

/// Wall-clock duration of each build phase, in microseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildTimings {
  /// Root fitting plus inserting every star into the dynamic tree.
  pub insert_us: u64,
  /// Compacting into the flat tree.
  pub compact_us: u64,
  /// Sorting the catalog index.
  pub index_us: u64,
}

impl BuildTimings {
  pub fn total_us(&self) -> u64 {
    self.insert_us + self.compact_us + self.index_us
  }
}
