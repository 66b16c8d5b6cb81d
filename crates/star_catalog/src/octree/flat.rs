//! StarOctree - read-only, array-backed star octree.
//!
//! Produced once by [`DynamicOctree::rebuild_and_sort`](super::DynamicOctree::rebuild_and_sort).
//! The 8 children of an internal node occupy consecutive slots, allocated
//! during a depth-first walk in octant order. Every node references the contiguous range of the flat
//! star array covered by its subtree; for leaves that range is exactly the
//! leaf's own stars.

use std::ops::Range;

use super::Cube;

/// Sentinel for "no children" in [`FlatNode`].
const NO_CHILDREN: u32 = u32::MAX;

/// A node of the flat octree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlatNode {
  cube: Cube,
  brightest_bound: f32,
  first_child: u32,
  star_start: u32,
  star_end: u32,
}

impl FlatNode {
  pub(crate) fn leaf(cube: Cube, brightest_bound: f32, stars: Range<u32>) -> Self {
    Self {
      cube,
      brightest_bound,
      first_child: NO_CHILDREN,
      star_start: stars.start,
      star_end: stars.end,
    }
  }

  pub(crate) fn internal(cube: Cube, brightest_bound: f32, first_child: u32, stars: Range<u32>) -> Self {
    debug_assert!(first_child != NO_CHILDREN, "internal node needs children");
    Self {
      cube,
      brightest_bound,
      first_child,
      star_start: stars.start,
      star_end: stars.end,
    }
  }

  /// Cube covered by this node.
  #[inline]
  pub fn cube(&self) -> Cube {
    self.cube
  }

  /// Minimum absolute magnitude below this node (`+inf` when empty).
  #[inline]
  pub fn brightest_bound(&self) -> f32 {
    self.brightest_bound
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.first_child == NO_CHILDREN
  }

  /// Node indices of the 8 children, by octant. `None` for leaves.
  #[inline]
  pub fn children(&self) -> Option<Range<usize>> {
    if self.is_leaf() {
      None
    } else {
      let first = self.first_child as usize;
      Some(first..first + 8)
    }
  }

  /// Range of the flat star array covered by this subtree.
  #[inline]
  pub fn star_range(&self) -> Range<usize> {
    self.star_start as usize..self.star_end as usize
  }

  #[inline]
  pub fn star_count(&self) -> usize {
    (self.star_end - self.star_start) as usize
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.star_start == self.star_end
  }
}

/// Read-only octree over a spatially sorted star array.
///
/// The tree does not own the stars; it stores ranges into the array returned
/// alongside it by the compactor.
#[derive(Clone, Debug)]
pub struct StarOctree {
  nodes: Vec<FlatNode>,
}

impl StarOctree {
  pub(crate) fn from_nodes(nodes: Vec<FlatNode>) -> Self {
    debug_assert!(!nodes.is_empty(), "flat octree needs a root");
    Self { nodes }
  }

  /// Index of the root node.
  pub const ROOT: usize = 0;

  #[inline]
  pub fn root(&self) -> &FlatNode {
    &self.nodes[Self::ROOT]
  }

  #[inline]
  pub fn node(&self, index: usize) -> &FlatNode {
    &self.nodes[index]
  }

  /// All nodes in storage order; the root is first.
  #[inline]
  pub fn nodes(&self) -> &[FlatNode] {
    &self.nodes
  }

  /// Total number of nodes, root included.
  pub fn count_nodes(&self) -> usize {
    self.nodes.len()
  }

  /// Total number of stars referenced by the tree.
  pub fn count_stars(&self) -> usize {
    self.root().star_count()
  }

  /// Iterate over leaf nodes in storage order.
  pub fn leaves(&self) -> impl Iterator<Item = &FlatNode> + '_ {
    self.nodes.iter().filter(|n| n.is_leaf())
  }
}
