//! # Optimizer Errors
//!
//! Error types for topology optimization. Numeric edge cases inside the
//! iteration loop are absorbed by floors and clamps and never reach this
//! enum; only caller mistakes do.

use density_grid::GridError;
use thiserror::Error;

/// Errors that can occur while configuring or running the optimizer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimizerError {
    /// A construction or call parameter is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// `optimize` was called before loads and constraints were applied.
    #[error("Optimizer not configured: apply loads and constraints before optimizing")]
    NotConfigured,

    /// The density grid rejected its input.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl OptimizerError {
    /// Creates an invalid parameter error.
    pub fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

/// Result type alias for optimizer operations.
pub type OptimizerResult<T> = Result<T, OptimizerError>;
