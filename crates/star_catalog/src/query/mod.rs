//! Read-only traversals of the flat [`StarOctree`](crate::octree::StarOctree).
//!
//! Both engines walk the tree with an explicit stack, prune whole subtrees
//! with conservative bounds, and test every surviving star exactly, so their
//! results match a brute-force scan of the star array.
//!
//! - [`visible`]: frustum + limiting magnitude
//! - [`close`]: radius around a point

pub mod close;
pub mod visible;

use glam::Vec3;
use smallvec::SmallVec;

use crate::octree::Cube;

/// Traversal stack. Holds at most `7 * depth + 1` entries.
pub(crate) type NodeStack = SmallVec<[u32; 64]>;

/// Relative tolerance on cube distances.
const DISTANCE_SLACK: f32 = 1e-5;

/// Lower bound on the distance from `point` to any star inside `cube`, as
/// the per-star distance computation would round it.
#[inline]
pub(crate) fn conservative_min_distance(cube: &Cube, point: Vec3) -> f32 {
  let scale = point.abs().max_element() + cube.center.abs().max_element() + cube.half_size;
  cube.min_distance_to(point) - DISTANCE_SLACK * scale
}

/// Push the children of an internal node so that octant 0 pops first.
#[inline]
pub(crate) fn push_children(stack: &mut NodeStack, children: std::ops::Range<usize>) {
  stack.extend(children.rev().map(|c| c as u32));
}
