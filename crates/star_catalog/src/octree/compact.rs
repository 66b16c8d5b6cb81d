//! Compaction of the build-time tree into a [`StarOctree`].
//!
//! One depth-first pass in octant order 0..7. Each leaf appends its stars to
//! the output array and records the `[start, end)` range it wrote; internal
//! nodes reserve 8 consecutive slots for their children before descending, so
//! a node's children are always `first_child..first_child + 8`.

use super::builder::{DynamicOctree, NodeContent, ROOT};
use super::flat::{FlatNode, StarOctree};
use crate::star::Star;

impl DynamicOctree {
  /// Consume the tree, producing the flat octree and the spatially sorted
  /// star array it indexes.
  ///
  /// The returned array holds every inserted star exactly once; stars of one
  /// leaf are contiguous and keep their insertion order.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "octree::compact"))]
  pub fn rebuild_and_sort(self) -> (StarOctree, Vec<Star>) {
    let mut nodes = Vec::with_capacity(self.nodes.len());
    let mut sorted = Vec::with_capacity(self.stars.len());

    let root_cube = self.nodes[ROOT].cube;
    nodes.push(FlatNode::leaf(root_cube, f32::INFINITY, 0..0));
    compact_node(&self, ROOT, StarOctree::ROOT, &mut nodes, &mut sorted);

    debug_assert_eq!(
      sorted.len(),
      self.stars.len(),
      "compaction lost or duplicated stars"
    );
    debug_assert_eq!(nodes.len(), self.nodes.len(), "compaction changed the node count");

    (StarOctree::from_nodes(nodes), sorted)
  }
}

/// Write `source` node into `slot`, appending its subtree's stars to `sorted`.
fn compact_node(
  tree: &DynamicOctree,
  source: usize,
  slot: usize,
  nodes: &mut Vec<FlatNode>,
  sorted: &mut Vec<Star>,
) {
  let node = &tree.nodes[source];
  let start = sorted.len() as u32;

  match &node.content {
    NodeContent::Leaf(members) => {
      sorted.extend(members.iter().map(|&s| tree.stars[s as usize]));
      let end = sorted.len() as u32;
      nodes[slot] = FlatNode::leaf(node.cube, node.brightest, start..end);
    }
    NodeContent::Internal(children) => {
      let first_child = nodes.len();
      for &child in children {
        let cube = tree.nodes[child as usize].cube;
        nodes.push(FlatNode::leaf(cube, f32::INFINITY, 0..0));
      }
      for (octant, &child) in children.iter().enumerate() {
        compact_node(tree, child as usize, first_child + octant, nodes, sorted);
      }
      let end = sorted.len() as u32;
      nodes[slot] = FlatNode::internal(node.cube, node.brightest, first_child as u32, start..end);
    }
  }
}

#[cfg(test)]
#[path = "compact_test.rs"]
mod compact_test;
