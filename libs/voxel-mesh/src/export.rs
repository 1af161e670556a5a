//! # Mesh Exporters
//!
//! An exporter turns the solid voxels into a mesh and writes it to disk.
//! Two strategies exist:
//!
//! - [`KernelExporter`]: unions the voxel boxes through a
//!   [`GeometryKernel`] and writes binary STL.
//! - [`TriangulationExporter`]: emits every voxel as an independent cube and
//!   writes ASCII STL. Adjacent voxels produce coincident, unmerged faces.
//!
//! The generator tries its exporters in order; any failure other than the
//! last one's is logged and the next strategy is tried.

use crate::error::{MeshError, MeshResult};
use crate::kernel::{GeometryKernel, VoxelBox};
use crate::mesh::VoxelMesh;
use crate::stl::{write_ascii_stl, write_binary_stl};
use config::constants::STL_SOLID_NAME;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Which export strategy produced a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStrategy {
    /// Geometry kernel union, binary STL
    Kernel,
    /// Per-voxel triangulation, ASCII STL
    Triangulation,
}

impl fmt::Display for ExportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportStrategy::Kernel => write!(f, "kernel"),
            ExportStrategy::Triangulation => write!(f, "triangulation"),
        }
    }
}

/// Counts of an exported mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExportedMesh {
    /// Strategy that wrote the file
    pub strategy: ExportStrategy,
    /// Vertices in the exported mesh
    pub vertex_count: usize,
    /// Triangles in the exported mesh
    pub triangle_count: usize,
}

/// One mesh export strategy.
pub trait MeshExporter {
    /// Strategy tag reported in the output.
    fn strategy(&self) -> ExportStrategy;

    /// Builds the mesh for `boxes`.
    fn build(&self, boxes: &[VoxelBox]) -> MeshResult<VoxelMesh>;

    /// Serializes `mesh`.
    fn write(&self, mesh: &VoxelMesh, writer: &mut dyn Write) -> io::Result<()>;

    /// Builds the mesh and writes it to `path`, replacing any existing file.
    fn export(&self, boxes: &[VoxelBox], path: &Path) -> MeshResult<ExportedMesh> {
        let mesh = self.build(boxes)?;
        let file = File::create(path).map_err(|e| MeshError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write(&mesh, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| MeshError::io(path, e))?;
        Ok(ExportedMesh {
            strategy: self.strategy(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
        })
    }
}

/// Unions voxel boxes through a geometry kernel; writes binary STL.
#[derive(Debug, Clone, Default)]
pub struct KernelExporter<K> {
    kernel: K,
}

impl<K: GeometryKernel> KernelExporter<K> {
    /// Wraps `kernel`.
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<K: GeometryKernel> MeshExporter for KernelExporter<K> {
    fn strategy(&self) -> ExportStrategy {
        ExportStrategy::Kernel
    }

    fn build(&self, boxes: &[VoxelBox]) -> MeshResult<VoxelMesh> {
        match self.kernel.union_boxes(boxes) {
            Ok(mesh) => Ok(mesh),
            Err(err) => {
                warn!(kernel = self.kernel.name(), error = %err, "Kernel union failed");
                Err(err.into())
            }
        }
    }

    fn write(&self, mesh: &VoxelMesh, mut writer: &mut dyn Write) -> io::Result<()> {
        write_binary_stl(mesh, &mut writer)
    }
}

/// Writes each voxel as an independent closed cube in ASCII STL.
#[derive(Debug, Clone)]
pub struct TriangulationExporter {
    solid_name: String,
}

impl Default for TriangulationExporter {
    fn default() -> Self {
        Self::new(STL_SOLID_NAME)
    }
}

impl TriangulationExporter {
    /// Creates an exporter writing a solid called `solid_name`.
    pub fn new(solid_name: impl Into<String>) -> Self {
        Self {
            solid_name: solid_name.into(),
        }
    }
}

impl MeshExporter for TriangulationExporter {
    fn strategy(&self) -> ExportStrategy {
        ExportStrategy::Triangulation
    }

    fn build(&self, boxes: &[VoxelBox]) -> MeshResult<VoxelMesh> {
        let mut mesh = VoxelMesh::with_capacity(8 * boxes.len(), 12 * boxes.len());
        for b in boxes {
            mesh.add_box(b.min, b.max);
        }
        Ok(mesh)
    }

    fn write(&self, mesh: &VoxelMesh, mut writer: &mut dyn Write) -> io::Result<()> {
        write_ascii_stl(mesh, &self.solid_name, &mut writer)
    }
}
