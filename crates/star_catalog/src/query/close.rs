//! Proximity query: stars within a radius of a point.

use glam::Vec3;

use super::{conservative_min_distance, push_children, NodeStack};
use crate::handler::StarHandler;
use crate::octree::StarOctree;
use crate::star::Star;

impl StarOctree {
  /// Report every star whose distance from `position` is at most `radius`
  /// light-years, along with its apparent magnitude seen from `position`.
  ///
  /// No magnitude filter is applied. A negative or NaN radius matches
  /// nothing.
  pub fn find_close_stars<H>(&self, stars: &[Star], handler: &mut H, position: Vec3, radius: f32)
  where
    H: StarHandler + ?Sized,
  {
    self.visit_close(stars, position, radius, |index, distance| {
      let star = &stars[index];
      handler.process(star, distance, star.apparent_magnitude(distance));
    });
  }

  /// Call `visit(star_index, distance)` for every star within `radius`.
  pub(crate) fn visit_close<F>(&self, stars: &[Star], position: Vec3, radius: f32, mut visit: F)
  where
    F: FnMut(usize, f32),
  {
    debug_assert_eq!(stars.len(), self.count_stars(), "star array does not belong to this tree");
    if radius.is_nan() || radius < 0.0 {
      return;
    }

    let mut stack = NodeStack::new();
    stack.push(StarOctree::ROOT as u32);

    while let Some(index) = stack.pop() {
      let node = self.node(index as usize);
      if node.is_empty() || conservative_min_distance(&node.cube(), position) > radius {
        continue;
      }

      match node.children() {
        Some(children) => push_children(&mut stack, children),
        None => {
          for star_index in node.star_range() {
            let distance = position.distance(stars[star_index].position());
            if distance <= radius {
              visit(star_index, distance);
            }
          }
        }
      }
    }
  }
}

#[cfg(test)]
#[path = "close_test.rs"]
mod close_test;
