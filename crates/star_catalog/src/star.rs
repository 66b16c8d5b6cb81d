//! Star - immutable point datum stored in the catalog.

use std::fmt;

use glam::Vec3;

use crate::astro;

/// Broad physical category of a star (top nibble of the packed class code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarType {
  /// Ordinary star.
  Normal,
  /// White dwarf remnant.
  WhiteDwarf,
  /// Neutron star remnant.
  NeutronStar,
  /// Black hole.
  BlackHole,
  /// Code not known to this crate.
  Other(u8),
}

/// Spectral class letter (second nibble of the packed class code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpectralClass {
  O,
  B,
  A,
  F,
  G,
  K,
  M,
  R,
  S,
  N,
  WC,
  WN,
  Unknown,
  L,
  T,
  C,
}

impl SpectralClass {
  const ALL: [Self; 16] = [
    Self::O,
    Self::B,
    Self::A,
    Self::F,
    Self::G,
    Self::K,
    Self::M,
    Self::R,
    Self::S,
    Self::N,
    Self::WC,
    Self::WN,
    Self::Unknown,
    Self::L,
    Self::T,
    Self::C,
  ];

  fn from_nibble(code: u8) -> Self {
    Self::ALL[usize::from(code & 0xf)]
  }

  fn label(self) -> &'static str {
    match self {
      Self::O => "O",
      Self::B => "B",
      Self::A => "A",
      Self::F => "F",
      Self::G => "G",
      Self::K => "K",
      Self::M => "M",
      Self::R => "R",
      Self::S => "S",
      Self::N => "N",
      Self::WC => "WC",
      Self::WN => "WN",
      Self::Unknown => "?",
      Self::L => "L",
      Self::T => "T",
      Self::C => "C",
    }
  }
}

/// Yerkes luminosity class (low nibble of the packed class code).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LuminosityClass {
  Ia0,
  Ia,
  Ib,
  II,
  III,
  IV,
  V,
  VI,
  Unknown,
}

impl LuminosityClass {
  fn from_nibble(code: u8) -> Self {
    match code & 0xf {
      0 => Self::Ia0,
      1 => Self::Ia,
      2 => Self::Ib,
      3 => Self::II,
      4 => Self::III,
      5 => Self::IV,
      6 => Self::V,
      7 => Self::VI,
      _ => Self::Unknown,
    }
  }

  fn label(self) -> &'static str {
    match self {
      Self::Ia0 => "Ia-0",
      Self::Ia => "Ia",
      Self::Ib => "Ib",
      Self::II => "II",
      Self::III => "III",
      Self::IV => "IV",
      Self::V => "V",
      Self::VI => "VI",
      Self::Unknown => "",
    }
  }
}

/// Packed stellar classification.
///
/// Stored exactly as it appears in the catalog (4 bits each, most significant
/// first: star type, spectral class, spectral subclass, luminosity class) so
/// that unknown codes survive a load/save cycle unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct StellarClass(u16);

impl StellarClass {
  /// Wrap a packed class code.
  #[inline]
  pub const fn from_packed(code: u16) -> Self {
    Self(code)
  }

  /// Build a class code for an ordinary star.
  pub fn normal(spectral: SpectralClass, subclass: u8, luminosity: LuminosityClass) -> Self {
    let spectral_code = SpectralClass::ALL
      .iter()
      .position(|&s| s == spectral)
      .unwrap_or(12) as u16;
    let luminosity_code = match luminosity {
      LuminosityClass::Ia0 => 0,
      LuminosityClass::Ia => 1,
      LuminosityClass::Ib => 2,
      LuminosityClass::II => 3,
      LuminosityClass::III => 4,
      LuminosityClass::IV => 5,
      LuminosityClass::V => 6,
      LuminosityClass::VI => 7,
      LuminosityClass::Unknown => 8,
    };
    Self((spectral_code << 8) | (u16::from(subclass & 0xf) << 4) | luminosity_code)
  }

  /// The packed code as stored in the catalog.
  #[inline]
  pub const fn packed(self) -> u16 {
    self.0
  }

  pub fn star_type(self) -> StarType {
    match (self.0 >> 12) as u8 {
      0 => StarType::Normal,
      1 => StarType::WhiteDwarf,
      2 => StarType::NeutronStar,
      3 => StarType::BlackHole,
      other => StarType::Other(other),
    }
  }

  pub fn spectral_class(self) -> SpectralClass {
    SpectralClass::from_nibble((self.0 >> 8) as u8)
  }

  /// Spectral subclass digit (0-9 in practice).
  pub fn subclass(self) -> u8 {
    ((self.0 >> 4) & 0xf) as u8
  }

  pub fn luminosity_class(self) -> LuminosityClass {
    LuminosityClass::from_nibble(self.0 as u8)
  }
}

impl fmt::Display for StellarClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.star_type() {
      StarType::WhiteDwarf => return f.write_str("WD"),
      StarType::NeutronStar => return f.write_str("Q"),
      StarType::BlackHole => return f.write_str("X"),
      StarType::Normal | StarType::Other(_) => {}
    }
    write!(f, "{}{}", self.spectral_class().label(), self.subclass())?;
    let lum = self.luminosity_class().label();
    if !lum.is_empty() {
      write!(f, " {}", lum)?;
    }
    Ok(())
  }
}

/// A single catalog star.
///
/// Immutable once created; the catalog owns all stars in one flat array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
  position: Vec3,
  absolute_magnitude: f32,
  stellar_class: StellarClass,
  identity: u32,
}

impl Star {
  /// Create a star from its catalog identity, position (light-years) and
  /// absolute magnitude.
  pub fn new(identity: u32, position: Vec3, absolute_magnitude: f32) -> Self {
    Self {
      position,
      absolute_magnitude,
      stellar_class: StellarClass::default(),
      identity,
    }
  }

  /// Attach a stellar classification.
  pub fn with_stellar_class(mut self, stellar_class: StellarClass) -> Self {
    self.stellar_class = stellar_class;
    self
  }

  #[inline]
  pub fn identity(&self) -> u32 {
    self.identity
  }

  /// Position in light-years.
  #[inline]
  pub fn position(&self) -> Vec3 {
    self.position
  }

  #[inline]
  pub fn absolute_magnitude(&self) -> f32 {
    self.absolute_magnitude
  }

  #[inline]
  pub fn stellar_class(&self) -> StellarClass {
    self.stellar_class
  }

  /// Apparent magnitude seen from `distance` light-years.
  #[inline]
  pub fn apparent_magnitude(&self, distance: f32) -> f32 {
    astro::abs_to_app_mag(self.absolute_magnitude, distance)
  }

  /// Apparent magnitude seen from `observer`, along with the distance.
  #[inline]
  pub fn apparent_magnitude_from(&self, observer: Vec3) -> (f32, f32) {
    let distance = observer.distance(self.position);
    (distance, self.apparent_magnitude(distance))
  }
}

#[cfg(test)]
#[path = "star_test.rs"]
mod star_test;
