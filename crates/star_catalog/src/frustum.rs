//! Infinite view frustum as 5 half-spaces through the eye.
//!
//! Camera convention: in camera space the observer looks down `-Z` with `+Y`
//! up. The orientation quaternion rotates camera-space vectors into world
//! space, so `orientation * Vec3::NEG_Z` is the view direction.
//!
//! The four side planes and the near plane all pass through the observer
//! position; there is no far plane.

use glam::{Quat, Vec3};

use crate::octree::Cube;

/// Relative tolerance applied when culling cubes.
///
/// Keeps the cube test conservative against rounding so that a star which
/// passes the per-star test is never hidden behind a culled node.
const CULL_SLACK: f32 = 1e-5;

/// Oriented plane `normal · p = d`. The positive side is inside.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
  pub normal: Vec3,
  pub d: f32,
}

impl Plane {
  /// Plane with unit `normal` passing through `point`.
  #[inline]
  pub fn through(normal: Vec3, point: Vec3) -> Self {
    Self {
      normal,
      d: normal.dot(point),
    }
  }

  /// Signed distance from the plane; negative means outside.
  #[inline]
  pub fn signed_distance(&self, point: Vec3) -> f32 {
    self.normal.dot(point) - self.d
  }

  /// Whether `cube` lies entirely on the negative side.
  ///
  /// Conservative: a cube grazing the plane is never reported outside.
  #[inline]
  pub fn cube_outside(&self, cube: &Cube) -> bool {
    let along = self.normal.dot(cube.center);
    let radius = cube.half_size * self.normal.abs().element_sum();
    let magnitude = self.normal.abs().dot(cube.center.abs());
    let slack = CULL_SLACK * (magnitude + self.d.abs() + radius);
    along - self.d < -(radius + slack)
  }
}

/// Infinite pyramidal frustum with its apex at the observer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
  position: Vec3,
  planes: [Plane; 5],
}

impl Frustum {
  /// Build the frustum for an observer at `position` with the given
  /// orientation, vertical field of view (radians, in `(0, π)`) and
  /// width / height aspect ratio.
  pub fn infinite(position: Vec3, orientation: Quat, fov_y: f32, aspect_ratio: f32) -> Self {
    debug_assert!(fov_y > 0.0 && fov_y < std::f32::consts::PI, "fov_y out of range: {}", fov_y);
    debug_assert!(aspect_ratio > 0.0, "aspect ratio must be positive");

    let h = (fov_y * 0.5).tan();
    let w = h * aspect_ratio;
    let orientation = orientation.normalize();
    let local = [
      Vec3::new(0.0, 1.0, -h),
      Vec3::new(0.0, -1.0, -h),
      Vec3::new(1.0, 0.0, -w),
      Vec3::new(-1.0, 0.0, -w),
      Vec3::NEG_Z,
    ];

    Self {
      position,
      planes: local.map(|n| Plane::through(orientation * n.normalize(), position)),
    }
  }

  /// Apex of the frustum.
  #[inline]
  pub fn position(&self) -> Vec3 {
    self.position
  }

  /// Bottom, top, left, right and near planes, in that order.
  #[inline]
  pub fn planes(&self) -> &[Plane; 5] {
    &self.planes
  }

  /// Whether `point` is inside or on the boundary of every plane.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    self.planes.iter().all(|plane| plane.signed_distance(point) >= 0.0)
  }

  /// Whether some part of `cube` may be inside.
  ///
  /// False only when the cube is entirely outside one plane, so a `true`
  /// result does not guarantee an intersection.
  #[inline]
  pub fn may_intersect(&self, cube: &Cube) -> bool {
    !self.planes.iter().any(|plane| plane.cube_outside(cube))
  }
}

#[cfg(test)]
#[path = "frustum_test.rs"]
mod frustum_test;
