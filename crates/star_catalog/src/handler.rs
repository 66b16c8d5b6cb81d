//! Per-star callback used by the query engines.

use crate::star::Star;

/// Receives each star reported by a query.
///
/// Closures of the form `|star, distance, apparent_magnitude| ...` implement
/// this trait directly.
pub trait StarHandler {
  /// Called once per matching star, with its distance from the query point
  /// in light-years and the apparent magnitude seen from there.
  fn process(&mut self, star: &Star, distance: f32, apparent_magnitude: f32);
}

impl<F> StarHandler for F
where
  F: FnMut(&Star, f32, f32),
{
  #[inline]
  fn process(&mut self, star: &Star, distance: f32, apparent_magnitude: f32) {
    self(star, distance, apparent_magnitude)
  }
}
