use std::f32::consts::{FRAC_PI_2, FRAC_PI_3};

use super::*;

fn looking(direction: Vec3) -> Quat {
  Quat::from_rotation_arc(Vec3::NEG_Z, direction.normalize())
}

// =========================================================================
// Points
// =========================================================================

/// The identity orientation looks down -Z.
#[test]
fn test_identity_looks_down_neg_z() {
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 1.0);
  assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -10.0)));
  assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)), "behind the eye");
  assert!(!frustum.contains_point(Vec3::new(0.0, 20.0, -10.0)), "above the top plane");
  assert!(!frustum.contains_point(Vec3::new(-20.0, 0.0, -10.0)), "left of the left plane");
}

/// 90 degree vertical FOV: the edges sit at 45 degrees.
#[test]
fn test_side_planes_at_half_fov() {
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 1.0);
  assert!(frustum.contains_point(Vec3::new(0.0, 9.9, -10.0)));
  assert!(!frustum.contains_point(Vec3::new(0.0, 10.1, -10.0)));
  assert!(frustum.contains_point(Vec3::new(0.0, -9.9, -10.0)));
  assert!(!frustum.contains_point(Vec3::new(0.0, -10.1, -10.0)));
}

/// Aspect ratio widens the horizontal extent only.
#[test]
fn test_aspect_ratio_widens_horizontally() {
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 2.0);
  assert!(frustum.contains_point(Vec3::new(19.0, 0.0, -10.0)));
  assert!(!frustum.contains_point(Vec3::new(21.0, 0.0, -10.0)));
  assert!(!frustum.contains_point(Vec3::new(0.0, 11.0, -10.0)));
}

/// The orientation rotates the view direction into world space.
#[test]
fn test_orientation_and_translation() {
  let eye = Vec3::new(100.0, -50.0, 3.0);
  let frustum = Frustum::infinite(eye, looking(Vec3::X), FRAC_PI_3, 1.5);
  assert!(frustum.contains_point(eye + Vec3::new(10.0, 0.0, 0.0)));
  assert!(!frustum.contains_point(eye + Vec3::new(-10.0, 0.0, 0.0)));
  assert!(!frustum.contains_point(eye + Vec3::new(0.0, 0.0, -10.0)));
  assert_eq!(frustum.position(), eye);
}

/// All planes pass through the observer.
#[test]
fn test_planes_pass_through_eye() {
  let eye = Vec3::new(1.0, 2.0, 3.0);
  let frustum = Frustum::infinite(eye, looking(Vec3::new(1.0, 1.0, 0.0)), 0.8, 1.3);
  for plane in frustum.planes() {
    assert!(plane.signed_distance(eye).abs() < 1e-5);
    assert!((plane.normal.length() - 1.0).abs() < 1e-5);
  }
  assert!(frustum.contains_point(eye), "apex is on every boundary");
}

// =========================================================================
// Cubes
// =========================================================================

#[test]
fn test_cube_outside_plane() {
  let plane = Plane::through(Vec3::X, Vec3::ZERO);
  assert!(plane.cube_outside(&Cube::new(Vec3::new(-5.0, 0.0, 0.0), 1.0)));
  assert!(!plane.cube_outside(&Cube::new(Vec3::new(-0.5, 0.0, 0.0), 1.0)), "straddles");
  assert!(!plane.cube_outside(&Cube::new(Vec3::new(-1.0, 0.0, 0.0), 1.0)), "touches");
  assert!(!plane.cube_outside(&Cube::new(Vec3::new(5.0, 0.0, 0.0), 1.0)));
}

/// A cube containing the eye always survives culling.
#[test]
fn test_cube_around_eye_survives() {
  let frustum = Frustum::infinite(Vec3::splat(3.0), looking(Vec3::Y), 0.5, 1.0);
  assert!(frustum.may_intersect(&Cube::new(Vec3::ZERO, 4.0)));
}

#[test]
fn test_cube_behind_is_culled() {
  let frustum = Frustum::infinite(Vec3::ZERO, looking(Vec3::X), FRAC_PI_2, 1.0);
  assert!(!frustum.may_intersect(&Cube::new(Vec3::new(-50.0, 0.0, 0.0), 10.0)));
  assert!(frustum.may_intersect(&Cube::new(Vec3::new(50.0, 0.0, 0.0), 10.0)));
}
