//! # Mesh Generator
//!
//! Thresholds a density field into solid voxels and exports them through a
//! chain of [`MeshExporter`] strategies. By default the chain is the
//! box-union kernel followed by the triangulation fallback.

use crate::error::{KernelError, MeshError, MeshResult};
use crate::export::{ExportStrategy, KernelExporter, MeshExporter, TriangulationExporter};
use crate::kernel::{GeometryKernel, VoxelBox, VoxelUnionKernel};
use crate::metrics::{GeometryMetrics, MassMetrics};
use config::constants::{DEFAULT_MESH_FILE_NAME, SCRATCH_DIR_NAME};
use density_grid::DensityGrid;
use glam::DVec3;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

type BoxedExporter = Box<dyn MeshExporter + Send + Sync>;

/// Result of a successful mesh export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshOutput {
    /// Written file
    pub path: PathBuf,
    /// Strategy that produced the file
    pub strategy: ExportStrategy,
    /// Solid voxels exported
    pub solid_voxels: usize,
    /// Vertices in the written mesh
    pub vertex_count: usize,
    /// Triangles in the written mesh
    pub triangle_count: usize,
}

/// Converts a density grid into a surface mesh file and metrics.
///
/// # Example
///
/// ```rust,no_run
/// use voxel_mesh::MeshGenerator;
/// use density_grid::{DensityGrid, GridDims};
/// use glam::DVec3;
///
/// let grid = DensityGrid::filled(GridDims::cubic(4).unwrap(), DVec3::splat(40.0), 1.0).unwrap();
/// let generator = MeshGenerator::new(grid);
/// let output = generator.generate_mesh(0.5).unwrap();
/// println!("{} triangles in {:?}", output.triangle_count, output.path);
/// ```
pub struct MeshGenerator {
    grid: DensityGrid,
    exporters: Vec<BoxedExporter>,
}

impl fmt::Debug for MeshGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategies: Vec<ExportStrategy> = self.exporters.iter().map(|e| e.strategy()).collect();
        f.debug_struct("MeshGenerator")
            .field("dims", &self.grid.dims())
            .field("strategies", &strategies)
            .finish()
    }
}

impl MeshGenerator {
    /// Creates a generator using the built-in box-union kernel with the
    /// triangulation fallback.
    pub fn new(grid: DensityGrid) -> Self {
        Self::with_kernel(grid, VoxelUnionKernel)
    }

    /// Creates a generator that unions through `kernel` and falls back to
    /// triangulation.
    pub fn with_kernel<K>(grid: DensityGrid, kernel: K) -> Self
    where
        K: GeometryKernel + Send + Sync + 'static,
    {
        let exporters: Vec<BoxedExporter> = vec![
            Box::new(KernelExporter::new(kernel)),
            Box::new(TriangulationExporter::default()),
        ];
        Self { grid, exporters }
    }

    /// Creates a generator with no geometry kernel; always triangulates.
    pub fn without_kernel(grid: DensityGrid) -> Self {
        let exporters: Vec<BoxedExporter> = vec![Box::new(TriangulationExporter::default())];
        Self { grid, exporters }
    }

    /// The density field being meshed.
    pub fn grid(&self) -> &DensityGrid {
        &self.grid
    }

    /// Physical size of one voxel.
    pub fn voxel_size(&self) -> DVec3 {
        self.grid.voxel_size()
    }

    /// Strategies in the order they are tried.
    pub fn strategies(&self) -> Vec<ExportStrategy> {
        self.exporters.iter().map(|e| e.strategy()).collect()
    }

    /// Box primitives of every cell at or above `threshold`, in grid order.
    /// Each box is one voxel in size, placed at the cell's physical center.
    pub fn solid_boxes(&self, threshold: f64) -> Vec<VoxelBox> {
        let size = self.grid.voxel_size();
        self.grid
            .cells_at_least(threshold)
            .into_iter()
            .map(|(i, j, k)| VoxelBox::centered(self.grid.cell_center(i, j, k), size))
            .collect()
    }

    /// Exports the mesh to the default scratch location,
    /// `<temp>/topology_optimization/optimized_part.stl`.
    pub fn generate_mesh(&self, threshold: f64) -> MeshResult<MeshOutput> {
        let boxes = self.select(threshold)?;
        let path = default_output_path()?;
        self.export_boxes(&boxes, &path)
    }

    /// Exports the mesh to `path`, replacing any existing file.
    ///
    /// Fails with [`MeshError::EmptyResult`] before touching the file
    /// system if no voxel meets `threshold`.
    pub fn generate_mesh_to(&self, threshold: f64, path: impl AsRef<Path>) -> MeshResult<MeshOutput> {
        let boxes = self.select(threshold)?;
        self.export_boxes(&boxes, path.as_ref())
    }

    /// Volume metrics at `threshold`.
    pub fn compute_metrics(&self, threshold: f64) -> GeometryMetrics {
        GeometryMetrics::measure(&self.grid, threshold)
    }

    /// Mass of the solid part at `threshold` for a material density in
    /// kg/m³.
    pub fn compute_mass(&self, threshold: f64, material_density: f64) -> MassMetrics {
        self.compute_metrics(threshold).mass(material_density)
    }

    fn select(&self, threshold: f64) -> MeshResult<Vec<VoxelBox>> {
        if threshold.is_nan() {
            return Err(MeshError::InvalidThreshold { threshold });
        }
        let boxes = self.solid_boxes(threshold);
        if boxes.is_empty() {
            return Err(MeshError::EmptyResult { threshold });
        }
        debug!(solid_voxels = boxes.len(), threshold, "Selected solid voxels");
        Ok(boxes)
    }

    fn export_boxes(&self, boxes: &[VoxelBox], path: &Path) -> MeshResult<MeshOutput> {
        let last = self.exporters.len().saturating_sub(1);
        for (position, exporter) in self.exporters.iter().enumerate() {
            match exporter.export(boxes, path) {
                Ok(exported) => {
                    info!(
                        strategy = %exported.strategy,
                        vertices = exported.vertex_count,
                        triangles = exported.triangle_count,
                        path = %path.display(),
                        "Mesh exported"
                    );
                    return Ok(MeshOutput {
                        path: path.to_path_buf(),
                        strategy: exported.strategy,
                        solid_voxels: boxes.len(),
                        vertex_count: exported.vertex_count,
                        triangle_count: exported.triangle_count,
                    });
                }
                Err(err) if position < last => {
                    warn!(
                        strategy = %exporter.strategy(),
                        error = %err,
                        "Export strategy failed, falling back"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        Err(KernelError::Unavailable.into())
    }
}

/// Default export path, creating the scratch directory if needed.
pub fn default_output_path() -> MeshResult<PathBuf> {
    let dir = std::env::temp_dir().join(SCRATCH_DIR_NAME);
    std::fs::create_dir_all(&dir).map_err(|e| MeshError::io(&dir, e))?;
    Ok(dir.join(DEFAULT_MESH_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use density_grid::GridDims;

    fn grid(cells: Vec<f64>, n: usize) -> DensityGrid {
        DensityGrid::from_cells(GridDims::cubic(n).unwrap(), DVec3::splat(10.0), cells).unwrap()
    }

    #[test]
    fn test_default_chain() {
        let generator = MeshGenerator::new(grid(vec![1.0], 1));
        assert_eq!(
            generator.strategies(),
            vec![ExportStrategy::Kernel, ExportStrategy::Triangulation]
        );
        let fallback_only = MeshGenerator::without_kernel(grid(vec![1.0], 1));
        assert_eq!(fallback_only.strategies(), vec![ExportStrategy::Triangulation]);
    }

    #[test]
    fn test_solid_boxes_follow_cell_bounds() {
        let mut cells = vec![0.1; 8];
        cells[GridDims::cubic(2).unwrap().index(1, 0, 1)] = 0.9;
        let generator = MeshGenerator::new(grid(cells, 2));
        let boxes = generator.solid_boxes(0.5);
        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes[0].min, DVec3::new(5.0, 0.0, 5.0));
        assert_eq!(boxes[0].max, DVec3::new(10.0, 5.0, 10.0));
    }

    #[test]
    fn test_solid_boxes_sit_on_cell_centers() {
        let dims = GridDims::new(3, 2, 4).unwrap();
        let grid = DensityGrid::filled(dims, DVec3::new(30.0, 10.0, 8.0), 1.0).unwrap();
        let generator = MeshGenerator::new(grid);
        let boxes = generator.solid_boxes(0.5);
        assert_eq!(boxes.len(), 24);
        for (b, (i, j, k)) in boxes.iter().zip(dims.iter_coords()) {
            assert_eq!(b.center(), generator.grid().cell_center(i, j, k));
            assert_eq!(b.size(), DVec3::new(10.0, 5.0, 2.0));
        }
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let generator = MeshGenerator::new(grid(vec![1.0], 1));
        let result = generator.generate_mesh_to(f64::NAN, dir.path().join("x.stl"));
        assert!(matches!(result, Err(MeshError::InvalidThreshold { .. })));
    }

    #[test]
    fn test_debug_lists_strategies() {
        let generator = MeshGenerator::new(grid(vec![1.0], 1));
        let text = format!("{generator:?}");
        assert!(text.contains("Kernel"));
        assert!(text.contains("Triangulation"));
    }

    #[test]
    fn test_default_output_path_location() {
        let path = default_output_path().unwrap();
        assert!(path.ends_with(Path::new(SCRATCH_DIR_NAME).join(DEFAULT_MESH_FILE_NAME)));
        assert!(path.parent().unwrap().is_dir());
    }
}
