//! Axis-aligned cube covered by an octree node.

use glam::Vec3;

/// Octant bit for the `+X` half.
pub const X_POS: u8 = 1;
/// Octant bit for the `+Y` half.
pub const Y_POS: u8 = 2;
/// Octant bit for the `+Z` half.
pub const Z_POS: u8 = 4;

/// Cube region of an octree node.
///
/// Side length is `2 * half_size`. Octants are numbered 0-7 where bits
/// represent `+X`, `+Y`, `+Z` offsets from `center`:
/// - bit 0: X offset (0 = below center, 1 = at or above)
/// - bit 1: Y offset
/// - bit 2: Z offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cube {
  /// Center of the cube.
  pub center: Vec3,
  /// Half the side length.
  pub half_size: f32,
}

impl Cube {
  /// Create a cube from center and half-size.
  ///
  /// # Panics
  /// Debug-asserts that `half_size` is positive.
  pub fn new(center: Vec3, half_size: f32) -> Self {
    debug_assert!(half_size > 0.0, "cube half_size must be positive");
    Self { center, half_size }
  }

  /// Minimum corner (inclusive).
  #[inline]
  pub fn min(&self) -> Vec3 {
    self.center - Vec3::splat(self.half_size)
  }

  /// Maximum corner (inclusive).
  #[inline]
  pub fn max(&self) -> Vec3 {
    self.center + Vec3::splat(self.half_size)
  }

  /// Check if the cube contains a point (boundary inclusive).
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    let d = (point - self.center).abs();
    d.x <= self.half_size && d.y <= self.half_size && d.z <= self.half_size
  }

  /// Octant of `point` relative to the cube center.
  ///
  /// Ties go to the positive side, so every point maps to exactly one octant.
  #[inline]
  pub fn octant_of(&self, point: Vec3) -> u8 {
    let mut octant = 0;
    if point.x >= self.center.x {
      octant |= X_POS;
    }
    if point.y >= self.center.y {
      octant |= Y_POS;
    }
    if point.z >= self.center.z {
      octant |= Z_POS;
    }
    octant
  }

  /// Child cube for the given octant (0-7).
  #[inline]
  pub fn child(&self, octant: u8) -> Self {
    let quarter = self.half_size * 0.5;
    let offset = Vec3::new(
      if octant & X_POS != 0 { quarter } else { -quarter },
      if octant & Y_POS != 0 { quarter } else { -quarter },
      if octant & Z_POS != 0 { quarter } else { -quarter },
    );
    Self {
      center: self.center + offset,
      half_size: quarter,
    }
  }

  /// Smallest distance from `point` to any point of the cube.
  ///
  /// Zero when the point lies inside or on the boundary.
  #[inline]
  pub fn min_distance_to(&self, point: Vec3) -> f32 {
    let outside = ((point - self.center).abs() - Vec3::splat(self.half_size)).max(Vec3::ZERO);
    outside.length()
  }

  /// Double the cube around its center.
  #[inline]
  pub fn doubled(&self) -> Self {
    Self {
      center: self.center,
      half_size: self.half_size * 2.0,
    }
  }
}
