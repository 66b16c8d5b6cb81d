//! Error types for configuration and catalog loading.
//!
//! The index itself is total over well-formed input; these errors only cover
//! rejected configuration and malformed catalog streams.

use thiserror::Error;

/// Invalid [`OctreeConfig`](crate::octree::OctreeConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
  #[error("root half-size must be finite and positive, got {0}")]
  InvalidRootHalfSize(f32),
  #[error("minimum leaf half-size must be finite and positive, got {0}")]
  InvalidMinHalfSize(f32),
  #[error("minimum leaf half-size {min} exceeds root half-size {root}")]
  MinHalfSizeExceedsRoot { min: f32, root: f32 },
  #[error("split threshold must be at least 1")]
  ZeroSplitThreshold,
  #[error("root center must be finite")]
  NonFiniteRootCenter,
}

/// Failure while reading or writing a binary star catalog or cross index.
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read catalog header")]
  Header(#[source] std::io::Error),
  #[error("catalog truncated at record {index} of {expected}")]
  Truncated {
    index: u32,
    expected: u32,
    #[source]
    source: std::io::Error,
  },
  #[error("star {identity} has non-finite coordinates (ra={ra}, dec={dec}, parallax={parallax})")]
  NonFiniteCoordinates {
    identity: u32,
    ra: f32,
    dec: f32,
    parallax: f32,
  },
  #[error("failed to write catalog")]
  Write(#[source] std::io::Error),
  #[error("failed to read cross index")]
  CrossIndexRead(#[source] std::io::Error),
  #[error("cross index header has magic {magic:?} and version {version:#06x}")]
  CrossIndexHeader { magic: [u8; 8], version: u16 },
  #[error("cross index ends inside a record ({trailing} trailing bytes)")]
  CrossIndexTruncated { trailing: usize },
  #[error(transparent)]
  Config(#[from] ConfigError),
}
