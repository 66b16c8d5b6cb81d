//! DynamicOctree - build-time star octree.
//!
//! Stars are inserted one at a time from the unsorted load stream. Nodes live
//! in an arena (`Vec<DynamicNode>`) and reference their children by index, so
//! the whole tree is freed in one go when it is compacted into a
//! [`StarOctree`](super::StarOctree).
//!
//! # Splitting
//!
//! A leaf splits once it holds more than `split_threshold` stars and its
//! half-size is still above `min_half_size`. All 8 children are created
//! together (empty octants become empty leaves), the leaf's stars are
//! redistributed by octant, and any child that is itself over capacity is
//! split in turn.

use smallvec::SmallVec;

use super::{Cube, OctreeConfig};
use crate::star::Star;

/// Arena index of the root node.
pub(crate) const ROOT: usize = 0;

#[derive(Clone, Debug)]
pub(crate) enum NodeContent {
  /// Indices into the builder's unsorted star array.
  Leaf(Vec<u32>),
  /// Arena indices of the 8 children, by octant.
  Internal([u32; 8]),
}

#[derive(Clone, Debug)]
pub(crate) struct DynamicNode {
  pub(crate) cube: Cube,
  /// Minimum absolute magnitude of all stars below this node.
  pub(crate) brightest: f32,
  pub(crate) content: NodeContent,
}

impl DynamicNode {
  fn leaf(cube: Cube) -> Self {
    Self {
      cube,
      brightest: f32::INFINITY,
      content: NodeContent::Leaf(Vec::new()),
    }
  }
}

/// Build-time octree over an unsorted star array.
///
/// Not queryable: call [`rebuild_and_sort`](Self::rebuild_and_sort) once all
/// stars are inserted to obtain the read-only tree.
#[derive(Debug)]
pub struct DynamicOctree {
  pub(crate) config: OctreeConfig,
  pub(crate) nodes: Vec<DynamicNode>,
  pub(crate) stars: Vec<Star>,
}

impl DynamicOctree {
  /// Create an empty tree whose root is the configured cube.
  ///
  /// The root never grows; see [`insert`](Self::insert).
  pub fn new(config: OctreeConfig) -> Self {
    Self::with_capacity(config, 0)
  }

  /// Create an empty tree with room for `stars` stars.
  pub fn with_capacity(config: OctreeConfig, stars: usize) -> Self {
    Self {
      config,
      nodes: vec![DynamicNode::leaf(config.root_cube())],
      stars: Vec::with_capacity(stars),
    }
  }

  /// Number of stars inserted so far.
  pub fn len(&self) -> usize {
    self.stars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stars.is_empty()
  }

  /// Number of nodes, including empty leaves.
  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Brightest absolute magnitude in the whole tree (`+inf` when empty).
  pub fn brightest(&self) -> f32 {
    self.nodes[ROOT].brightest
  }

  /// Insert a star.
  ///
  /// Descends by octant from the root, tightening every visited node's
  /// brightness bound, and appends the star to the leaf it lands in. O(depth).
  ///
  /// The root cube must contain every finite star position. Fit the
  /// configuration with [`OctreeConfig::enclosing`] before inserting, as
  /// [`StarDatabase`](crate::StarDatabase) does. A star outside the root
  /// still lands in a leaf, but that leaf's cube does not contain it and
  /// queries may prune it away.
  ///
  /// # Panics
  /// In debug builds, if a finite position lies outside the root cube.
  pub fn insert(&mut self, star: Star) {
    debug_assert!(
      !star.position().is_finite() || self.nodes[ROOT].cube.contains_point(star.position()),
      "star {} at {:?} lies outside the root cube",
      star.identity(),
      star.position()
    );
    debug_assert!(self.stars.len() < u32::MAX as usize, "star count exceeds u32 range");

    let star_index = self.stars.len() as u32;
    let position = star.position();
    let abs_mag = star.absolute_magnitude();
    self.stars.push(star);

    let mut current = ROOT;
    loop {
      let node = &mut self.nodes[current];
      node.brightest = node.brightest.min(abs_mag);
      let cube = node.cube;
      match &mut node.content {
        NodeContent::Internal(children) => {
          current = children[usize::from(cube.octant_of(position))] as usize;
        }
        NodeContent::Leaf(members) => {
          members.push(star_index);
          if self.config.should_split(members.len(), cube.half_size) {
            self.split(current);
          }
          return;
        }
      }
    }
  }

  /// Split a leaf into 8 children, cascading into children that are still
  /// over capacity.
  fn split(&mut self, leaf: usize) {
    let mut pending: SmallVec<[usize; 8]> = SmallVec::new();
    pending.push(leaf);

    while let Some(current) = pending.pop() {
      let parent_cube = self.nodes[current].cube;
      let members = match &mut self.nodes[current].content {
        NodeContent::Leaf(members) => std::mem::take(members),
        NodeContent::Internal(_) => continue,
      };

      let mut buckets: [Vec<u32>; 8] = Default::default();
      for &star_index in &members {
        let octant = parent_cube.octant_of(self.stars[star_index as usize].position());
        buckets[usize::from(octant)].push(star_index);
      }

      let first_child = self.nodes.len() as u32;
      for (octant, bucket) in buckets.into_iter().enumerate() {
        let cube = parent_cube.child(octant as u8);
        let brightest = bucket
          .iter()
          .map(|&s| self.stars[s as usize].absolute_magnitude())
          .fold(f32::INFINITY, f32::min);
        if self.config.should_split(bucket.len(), cube.half_size) {
          pending.push(self.nodes.len());
        }
        self.nodes.push(DynamicNode {
          cube,
          brightest,
          content: NodeContent::Leaf(bucket),
        });
      }

      self.nodes[current].content =
        NodeContent::Internal(std::array::from_fn(|octant| first_child + octant as u32));
    }
  }
}

impl Extend<Star> for DynamicOctree {
  fn extend<T: IntoIterator<Item = Star>>(&mut self, iter: T) {
    for star in iter {
      self.insert(star);
    }
  }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod builder_test;
