//! Astronomical unit conversions used by the index and the catalog loader.
//!
//! Distances are in light-years throughout the crate. Magnitudes follow the
//! usual astronomical convention: lower values are brighter.

use std::f64::consts::PI;

use glam::Vec3;

/// Light-years per parsec.
pub const LY_PER_PARSEC: f32 = 3.261_563_8;

/// Light-years per parsec as used by the binary catalog format.
///
/// Catalog files were produced with this truncated constant, so the loader
/// must use it to recover the same distances.
pub const CATALOG_LY_PER_PARSEC: f64 = 3.26;

/// Convert light-years to parsecs.
#[inline]
pub fn ly_to_parsecs(ly: f32) -> f32 {
  ly / LY_PER_PARSEC
}

/// Convert parsecs to light-years.
#[inline]
pub fn parsecs_to_ly(pc: f32) -> f32 {
  pc * LY_PER_PARSEC
}

/// Distance modulus `m - M` for a distance in light-years.
///
/// Returns `-inf` at zero distance: an observer sitting on a star sees it
/// infinitely bright.
#[inline]
pub fn distance_modulus(ly: f32) -> f32 {
  5.0 * ly_to_parsecs(ly).log10() - 5.0
}

/// Apparent magnitude of a star with absolute magnitude `abs_mag` seen from
/// `ly` light-years away.
#[inline]
pub fn abs_to_app_mag(abs_mag: f32, ly: f32) -> f32 {
  abs_mag + distance_modulus(ly)
}

/// Absolute magnitude of a star with apparent magnitude `app_mag` at `ly`
/// light-years.
#[inline]
pub fn app_to_abs_mag(app_mag: f32, ly: f32) -> f32 {
  app_mag - distance_modulus(ly)
}

/// Convert equatorial coordinates to a Cartesian position.
///
/// `ra_deg` and `dec_deg` are in degrees, `distance` in light-years. The
/// celestial north pole maps to `+Y`, RA 0h on the equator to `+X` and RA 6h
/// to `-Z`.
pub fn equatorial_to_cartesian(ra_deg: f32, dec_deg: f32, distance: f32) -> Vec3 {
  let theta = f64::from(ra_deg).to_radians() + PI;
  let phi = (f64::from(dec_deg) / 90.0 - 1.0) * PI / 2.0;
  let (stheta, ctheta) = theta.sin_cos();
  let (sphi, cphi) = phi.sin_cos();
  let distance = f64::from(distance);

  Vec3::new(
    (ctheta * sphi * distance) as f32,
    (cphi * distance) as f32,
    (-stheta * sphi * distance) as f32,
  )
}

#[cfg(test)]
#[path = "astro_test.rs"]
mod astro_test;
