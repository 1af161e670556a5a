//! # Mesh Errors
//!
//! Error types for voxel mesh generation and export.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a geometry kernel. Always recoverable by falling back to
/// direct triangulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    /// No kernel is configured.
    #[error("Geometry kernel unavailable")]
    Unavailable,

    /// Nothing to union.
    #[error("No boxes to union")]
    NoBoxes,

    /// The kernel cannot handle the given boxes.
    #[error("Unsupported geometry: {message}")]
    Unsupported {
        /// What the kernel rejected
        message: String,
    },
}

impl KernelError {
    /// Creates an unsupported geometry error.
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            message: message.into(),
        }
    }
}

/// Errors that can occur while generating or exporting a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// No voxel meets the threshold; nothing was written.
    #[error("No voxel at or above density threshold {threshold}")]
    EmptyResult {
        /// Threshold that selected nothing
        threshold: f64,
    },

    /// Invalid threshold value.
    #[error("Invalid threshold: {threshold}")]
    InvalidThreshold {
        /// Rejected threshold
        threshold: f64,
    },

    /// The geometry kernel failed.
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    /// Writing the mesh file failed.
    #[error("Failed to write {path:?}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl MeshError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
