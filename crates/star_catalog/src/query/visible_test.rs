use std::f32::consts::{FRAC_PI_2, PI};

use glam::{EulerRot, Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::octree::{DynamicOctree, OctreeConfig};

fn random_catalog(rng: &mut ChaCha8Rng, count: u32) -> (StarOctree, Vec<Star>) {
  let config = OctreeConfig {
    split_threshold: 8,
    min_half_size: 0.5,
    ..OctreeConfig::with_root(Vec3::ZERO, 128.0)
  };
  let mut tree = DynamicOctree::new(config);
  for identity in 0..count {
    let position = Vec3::new(
      rng.random_range(-100.0..100.0),
      rng.random_range(-100.0..100.0),
      rng.random_range(-100.0..100.0),
    );
    tree.insert(Star::new(identity, position, rng.random_range(-5.0..15.0)));
  }
  tree.rebuild_and_sort()
}

fn query(octree: &StarOctree, stars: &[Star], frustum: &Frustum, limit: f32) -> Vec<u32> {
  let mut found = Vec::new();
  octree.find_visible_stars(
    stars,
    &mut |star: &Star, _: f32, _: f32| found.push(star.identity()),
    frustum,
    limit,
  );
  found.sort_unstable();
  found
}

fn brute_force(stars: &[Star], frustum: &Frustum, limit: f32) -> Vec<u32> {
  let mut found: Vec<u32> = stars
    .iter()
    .filter(|s| frustum.contains_point(s.position()))
    .filter(|s| s.apparent_magnitude_from(frustum.position()).1 <= limit)
    .map(|s| s.identity())
    .collect();
  found.sort_unstable();
  found
}

// =========================================================================
// Brute-force equivalence
// =========================================================================

/// Random views from inside and outside the star cloud report exactly the
/// brute-force set.
#[test]
fn test_matches_brute_force_random_views() {
  let mut rng = ChaCha8Rng::seed_from_u64(42);
  let (octree, stars) = random_catalog(&mut rng, 5_000);

  let mut total = 0;
  for _ in 0..200 {
    let eye = Vec3::new(
      rng.random_range(-150.0..150.0),
      rng.random_range(-150.0..150.0),
      rng.random_range(-150.0..150.0),
    );
    let orientation = Quat::from_euler(
      EulerRot::YXZ,
      rng.random_range(-PI..PI),
      rng.random_range(-1.5..1.5),
      rng.random_range(-PI..PI),
    );
    let fov = rng.random_range(0.2..2.5);
    let aspect = rng.random_range(0.5..2.5);
    let limit = rng.random_range(-2.0..12.0);
    let frustum = Frustum::infinite(eye, orientation, fov, aspect);

    let expected = brute_force(&stars, &frustum, limit);
    assert_eq!(query(&octree, &stars, &frustum, limit), expected, "eye {:?} limit {}", eye, limit);
    total += expected.len();
  }
  assert!(total > 0, "random views should see some stars");
}

/// With no magnitude limit only the frustum filters.
#[test]
fn test_unbounded_limit_is_pure_frustum() {
  let mut rng = ChaCha8Rng::seed_from_u64(9);
  let (octree, stars) = random_catalog(&mut rng, 2_000);
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 1.0);

  let found = query(&octree, &stars, &frustum, f32::INFINITY);
  let in_frustum = stars.iter().filter(|s| frustum.contains_point(s.position())).count();
  assert_eq!(found.len(), in_frustum);
}

/// Handler receives the exact distance and apparent magnitude.
#[test]
fn test_reports_distance_and_magnitude() {
  let mut tree = DynamicOctree::new(OctreeConfig::with_root(Vec3::ZERO, 64.0));
  tree.insert(Star::new(7, Vec3::new(0.0, 0.0, -32.615_638), 0.0));
  let (octree, stars) = tree.rebuild_and_sort();
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 1.0);

  let mut reports = Vec::new();
  octree.find_visible_stars(
    &stars,
    &mut |star: &Star, distance: f32, apparent: f32| reports.push((star.identity(), distance, apparent)),
    &frustum,
    6.0,
  );
  assert_eq!(reports.len(), 1);
  let (id, distance, apparent) = reports[0];
  assert_eq!(id, 7);
  assert!((distance - 32.615_638).abs() < 1e-4);
  assert!((apparent - 0.0).abs() < 1e-3, "10 pc keeps absolute magnitude, got {}", apparent);
}

// =========================================================================
// Edge cases
// =========================================================================

#[test]
fn test_empty_tree_reports_nothing() {
  let (octree, stars) = DynamicOctree::new(OctreeConfig::default()).rebuild_and_sort();
  let frustum = Frustum::infinite(Vec3::ZERO, Quat::IDENTITY, FRAC_PI_2, 1.0);
  assert!(query(&octree, &stars, &frustum, 100.0).is_empty());
}

/// A star at the observer position has infinite brightness and sits on
/// every frustum boundary.
#[test]
fn test_star_at_observer_is_visible() {
  let eye = Vec3::new(5.0, 5.0, 5.0);
  let mut tree = DynamicOctree::new(OctreeConfig::with_root(Vec3::ZERO, 16.0));
  tree.insert(Star::new(1, eye, 20.0));
  let (octree, stars) = tree.rebuild_and_sort();
  let frustum = Frustum::infinite(eye, Quat::IDENTITY, 1.0, 1.0);
  assert_eq!(query(&octree, &stars, &frustum, -10.0), vec![1]);
}

/// A limit brighter than every star reports nothing.
#[test]
fn test_limit_below_all_stars() {
  let mut rng = ChaCha8Rng::seed_from_u64(1);
  let (octree, stars) = random_catalog(&mut rng, 500);
  let frustum = Frustum::infinite(Vec3::splat(500.0), Quat::IDENTITY, 2.0, 1.0);
  assert!(query(&octree, &stars, &frustum, -20.0).is_empty());
}
