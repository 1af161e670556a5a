//! # Voxel Mesh
//!
//! Converts an optimized density field into a printable surface mesh and
//! reports geometric and mass metrics.
//!
//! ## Architecture
//!
//! ```text
//! DensityGrid → MeshGenerator → [KernelExporter → binary STL]
//!                                  ↓ on failure
//!                               [TriangulationExporter → ASCII STL]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use voxel_mesh::{ExportStrategy, MeshGenerator};
//! use density_grid::{DensityGrid, GridDims};
//! use glam::DVec3;
//!
//! let grid = DensityGrid::filled(GridDims::cubic(2).unwrap(), DVec3::splat(10.0), 1.0).unwrap();
//! let dir = tempfile::tempdir().unwrap();
//! let output = MeshGenerator::new(grid)
//!     .generate_mesh_to(0.5, dir.path().join("part.stl"))
//!     .unwrap();
//! assert_eq!(output.strategy, ExportStrategy::Kernel);
//! assert_eq!(output.triangle_count, 48);
//! ```

pub mod error;
pub mod export;
pub mod generator;
pub mod kernel;
pub mod mesh;
pub mod metrics;
pub mod stl;

pub use error::{KernelError, MeshError, MeshResult};
pub use export::{ExportStrategy, ExportedMesh, KernelExporter, MeshExporter, TriangulationExporter};
pub use generator::{default_output_path, MeshGenerator, MeshOutput};
pub use kernel::{GeometryKernel, VoxelBox, VoxelUnionKernel};
pub use mesh::VoxelMesh;
pub use metrics::{GeometryMetrics, MassMetrics};
