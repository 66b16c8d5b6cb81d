//! Visibility query: stars inside a frustum and brighter than a limit.
//!
//! A node is skipped when its cube lies outside any frustum plane, or when
//! even its brightest star placed at the nearest point of the cube would be
//! fainter than the limiting magnitude. Near or inside a cube the distance
//! bound collapses to zero and only the frustum prunes.

use super::{conservative_min_distance, push_children, NodeStack};
use crate::astro;
use crate::frustum::Frustum;
use crate::handler::StarHandler;
use crate::octree::{FlatNode, StarOctree};
use crate::star::Star;

/// Tolerance on the magnitude bound, in magnitudes.
const MAGNITUDE_SLACK: f32 = 1e-4;

impl StarOctree {
  /// Report every star inside `frustum` whose apparent magnitude seen from
  /// the frustum apex is at most `limiting_magnitude`.
  ///
  /// `stars` must be the array returned with this tree by
  /// [`rebuild_and_sort`](crate::octree::DynamicOctree::rebuild_and_sort).
  /// Stars are reported in no particular order.
  pub fn find_visible_stars<H>(
    &self,
    stars: &[Star],
    handler: &mut H,
    frustum: &Frustum,
    limiting_magnitude: f32,
  ) where
    H: StarHandler + ?Sized,
  {
    debug_assert_eq!(stars.len(), self.count_stars(), "star array does not belong to this tree");

    let observer = frustum.position();
    let mut stack = NodeStack::new();
    stack.push(StarOctree::ROOT as u32);

    while let Some(index) = stack.pop() {
      let node = self.node(index as usize);
      if node.is_empty() || !frustum.may_intersect(&node.cube()) {
        continue;
      }
      if too_faint(node, observer, limiting_magnitude) {
        continue;
      }

      match node.children() {
        Some(children) => push_children(&mut stack, children),
        None => {
          for star in &stars[node.star_range()] {
            if !frustum.contains_point(star.position()) {
              continue;
            }
            let (distance, apparent) = star.apparent_magnitude_from(observer);
            if apparent <= limiting_magnitude {
              handler.process(star, distance, apparent);
            }
          }
        }
      }
    }
  }
}

/// Whether no star below `node` can reach `limiting_magnitude`.
#[inline]
fn too_faint(node: &FlatNode, observer: glam::Vec3, limiting_magnitude: f32) -> bool {
  let min_distance = conservative_min_distance(&node.cube(), observer);
  if min_distance <= 0.0 {
    return false;
  }
  astro::abs_to_app_mag(node.brightest_bound(), min_distance) > limiting_magnitude + MAGNITUDE_SLACK
}

#[cfg(test)]
#[path = "visible_test.rs"]
mod visible_test;
