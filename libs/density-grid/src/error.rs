//! # Grid Errors
//!
//! Error types for density grid construction.

use thiserror::Error;

/// Errors that can occur while building a density grid or mask.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// A grid axis has zero cells.
    #[error("Invalid grid dimensions: {nx}x{ny}x{nz}")]
    InvalidDimensions {
        /// Cells along x
        nx: usize,
        /// Cells along y
        ny: usize,
        /// Cells along z
        nz: usize,
    },

    /// The cell count `nx * ny * nz` does not fit in `usize`.
    #[error("Grid {nx}x{ny}x{nz} has too many cells")]
    TooManyCells {
        /// Cells along x
        nx: usize,
        /// Cells along y
        ny: usize,
        /// Cells along z
        nz: usize,
    },

    /// A physical extent is zero, negative or not finite.
    #[error("Invalid physical extent: {message}")]
    InvalidExtent {
        /// Description of the offending extent
        message: String,
    },

    /// A density value lies outside the admissible band.
    #[error("Density {value} at cell {index} is outside [{min}, {max}]")]
    DensityOutOfRange {
        /// Flat cell index
        index: usize,
        /// Offending value
        value: f64,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// The number of supplied cells does not match the dimensions.
    #[error("Expected {expected} cells, got {actual}")]
    LengthMismatch {
        /// Cell count implied by the dimensions
        expected: usize,
        /// Cell count supplied
        actual: usize,
    },
}

impl GridError {
    /// Creates an invalid extent error.
    pub fn invalid_extent(message: impl Into<String>) -> Self {
        Self::InvalidExtent {
            message: message.into(),
        }
    }
}

/// Result type alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;
