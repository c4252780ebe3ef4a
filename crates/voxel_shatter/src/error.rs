//! Error type for shell construction and host input.
//!
//! Impacts that find nothing to act on are outcomes, not errors; see
//! [`crate::mutation::ImpactOutcome`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShatterError {
  #[error("grid dimensions {dims:?} must be at least 2 on every axis")]
  InvalidDimensions { dims: [usize; 3] },

  #[error("spacing must be finite and positive, got {0}")]
  InvalidSpacing(f32),

  #[error("attenuator must be finite and positive, got {0}")]
  InvalidAttenuator(f32),

  #[error("cell {cell} is out of range, lattice has {cells} cells")]
  CellOutOfRange { cell: usize, cells: usize },

  #[error("occupancy has {actual} entries but the dimensions need {expected}")]
  GridSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ShatterError>;
