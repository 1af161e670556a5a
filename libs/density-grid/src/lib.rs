//! # Density Grid
//!
//! The discretized design domain shared by the optimizer and the mesh
//! exporter.
//!
//! ## Architecture
//!
//! ```text
//! simp-optimizer (mutates DensityGrid) → voxel-mesh (reads DensityGrid)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use density_grid::{DensityGrid, GridDims};
//! use glam::DVec3;
//!
//! let dims = GridDims::cubic(5).unwrap();
//! let grid = DensityGrid::filled(dims, DVec3::splat(100.0), 0.4).unwrap();
//! assert_eq!(grid.voxel_size(), DVec3::splat(20.0));
//! ```

pub mod dims;
pub mod error;
pub mod grid;
pub mod mask;

pub use dims::GridDims;
pub use error::{GridError, GridResult};
pub use grid::DensityGrid;
pub use mask::CellMask;
