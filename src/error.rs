// src/error.rs

use thiserror::Error;

/// Errors raised while building, transforming, writing or rendering structures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
  /// The structure has no atoms.
  #[error("structure is empty (no atoms)")]
  EmptyStructure,

  /// An atom carries a NaN or infinite coordinate.
  #[error("atom {index} has a non-finite position {position:?}")]
  NonFinitePosition {
    /// Index of the offending atom.
    index: usize,
    /// The offending position.
    position: [f64; 3],
  },

  /// A generator or transform parameter is out of range.
  #[error("invalid parameter `{name}`: {reason}")]
  InvalidParameter {
    /// Parameter name.
    name: &'static str,
    /// What is wrong with it.
    reason: String,
  },

  /// Rotation axis has zero length.
  #[error("rotation axis must have non-zero length, got {0:?}")]
  InvalidAxis([f64; 3]),

  /// The cell has zero length along an axis that needs one.
  #[error("cell vector {0} has zero length")]
  DegenerateCell(usize),

  /// Malformed camera specification string.
  #[error("invalid camera specification `{spec}`: {reason}")]
  Camera {
    /// The full specification string.
    spec: String,
    /// What failed to parse.
    reason: String,
  },

  /// Unknown file extension.
  #[error("unsupported file format: {0}")]
  UnsupportedFormat(String),

  /// Malformed structure file.
  #[error("parse error on line {line}: {reason}")]
  Parse {
    /// 1-based line number.
    line: usize,
    /// Description.
    reason: String,
  },

  /// Cairo drawing or surface failure.
  #[error("render failed: {0}")]
  Render(String),

  /// External animation tool failed or is missing.
  #[error("animation assembly failed: {0}")]
  Animation(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl BuildError {
  pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    BuildError::InvalidParameter {
      name,
      reason: reason.into(),
    }
  }
}

impl From<cairo::Error> for BuildError {
  fn from(e: cairo::Error) -> Self {
    BuildError::Render(e.to_string())
  }
}

impl From<cairo::IoError> for BuildError {
  fn from(e: cairo::IoError) -> Self {
    BuildError::Render(e.to_string())
  }
}

pub type Result<T> = std::result::Result<T, BuildError>;
