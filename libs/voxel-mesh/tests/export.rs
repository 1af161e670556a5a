//! Mesh export and metric integration tests.

use approx::assert_relative_eq;
use density_grid::{DensityGrid, GridDims};
use glam::DVec3;
use std::fs::File;
use voxel_mesh::{
    ExportStrategy, GeometryKernel, KernelError, MeshError, MeshGenerator, VoxelBox, VoxelMesh,
};

/// Kernel that rejects everything, standing in for a broken backend.
struct FailingKernel;

impl GeometryKernel for FailingKernel {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn union_boxes(&self, _boxes: &[VoxelBox]) -> Result<VoxelMesh, KernelError> {
        Err(KernelError::unsupported("backend offline"))
    }
}

/// Grid whose first `solid` cells (storage order) are 1.0, the rest 0.1.
fn grid_with_solids(n: usize, extent: f64, solid: usize) -> DensityGrid {
    let dims = GridDims::cubic(n).unwrap();
    let cells = (0..dims.len())
        .map(|index| if index < solid { 1.0 } else { 0.1 })
        .collect();
    DensityGrid::from_cells(dims, DVec3::splat(extent), cells).unwrap()
}

#[test]
fn test_single_voxel_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("single.stl");
    let grid = DensityGrid::filled(GridDims::cubic(1).unwrap(), DVec3::splat(10.0), 1.0).unwrap();

    let output = MeshGenerator::without_kernel(grid)
        .generate_mesh_to(0.5, &path)
        .unwrap();

    assert_eq!(output.strategy, ExportStrategy::Triangulation);
    assert_eq!(output.vertex_count, 8);
    assert_eq!(output.triangle_count, 12);
    assert_eq!(output.path, path);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid"));
    assert!(text.trim_end().ends_with("endsolid OptimizedPart"));
    assert_eq!(text.matches("facet normal").count(), 12);
}

#[test]
fn test_empty_selection_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.stl");
    let grid = grid_with_solids(3, 30.0, 0);

    for generator in [MeshGenerator::new(grid.clone()), MeshGenerator::without_kernel(grid)] {
        let result = generator.generate_mesh_to(0.5, &path);
        assert!(matches!(result, Err(MeshError::EmptyResult { threshold }) if threshold == 0.5));
        assert!(!path.exists());
    }
}

#[test]
fn test_half_solid_metrics() {
    let grid = grid_with_solids(10, 10.0, 500);
    let metrics = MeshGenerator::new(grid).compute_metrics(0.5);

    assert_eq!(metrics.solid_voxels, 500);
    assert_eq!(metrics.total_voxels, 1000);
    assert_eq!(metrics.volume_fraction, 0.5);
    assert_eq!(metrics.volume_optimized, 500.0);
    assert_eq!(metrics.volume_reduction, 50.0);
}

#[test]
fn test_triangulation_counts_scale_with_solids() {
    let dir = tempfile::tempdir().unwrap();
    for solid in [1, 7, 27, 64] {
        let path = dir.path().join(format!("s{solid}.stl"));
        let output = MeshGenerator::without_kernel(grid_with_solids(4, 8.0, solid))
            .generate_mesh_to(0.5, &path)
            .unwrap();
        assert_eq!(output.solid_voxels, solid);
        assert_eq!(output.vertex_count, 8 * solid);
        assert_eq!(output.triangle_count, 12 * solid);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("solid"));
        assert!(text.trim_end().ends_with("endsolid OptimizedPart"));
    }
}

#[test]
fn test_metric_consistency_across_thresholds() {
    let dims = GridDims::cubic(5).unwrap();
    let cells: Vec<f64> = (0..dims.len()).map(|i| 0.001 + (i % 10) as f64 * 0.1).collect();
    let grid = DensityGrid::from_cells(dims, DVec3::new(50.0, 25.0, 10.0), cells).unwrap();
    let generator = MeshGenerator::new(grid);
    let voxel_volume = generator.grid().voxel_volume();

    for threshold in [0.0, 0.25, 0.5, 0.75, 0.95, 1.5] {
        let m = generator.compute_metrics(threshold);
        assert_eq!(m.volume_optimized, m.solid_voxels as f64 * voxel_volume);
        assert_eq!(
            m.volume_reduction,
            (m.volume_initial - m.volume_optimized) / m.volume_initial * 100.0
        );
        assert_eq!(m.volume_initial, 50.0 * 25.0 * 10.0);
    }
}

#[test]
fn test_kernel_output_is_welded_binary_stl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("welded.stl");
    // Cells 0 and 1 in storage order are (0, 0, 0) and (0, 0, 1).
    let output = MeshGenerator::new(grid_with_solids(3, 30.0, 2))
        .generate_mesh_to(0.5, &path)
        .unwrap();

    assert_eq!(output.strategy, ExportStrategy::Kernel);
    assert_eq!(output.triangle_count, 20);
    assert_eq!(output.vertex_count, 12);

    let mut file = File::open(&path).unwrap();
    let stl = stl_io::read_stl(&mut file).unwrap();
    assert_eq!(stl.faces.len(), 20);
    assert_eq!(stl.vertices.len(), 12);
    for face in &stl.faces {
        let [x, y, z] = face.normal.0;
        assert_relative_eq!(x.abs() + y.abs() + z.abs(), 1.0);
    }
}

#[test]
fn test_failing_kernel_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fallback.stl");
    let output = MeshGenerator::with_kernel(grid_with_solids(3, 30.0, 2), FailingKernel)
        .generate_mesh_to(0.5, &path)
        .unwrap();

    assert_eq!(output.strategy, ExportStrategy::Triangulation);
    assert_eq!(output.vertex_count, 16);
    assert_eq!(output.triangle_count, 24);
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("solid OptimizedPart"));
}

#[test]
fn test_fallback_error_reaches_caller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_such_dir").join("part.stl");
    let result = MeshGenerator::with_kernel(grid_with_solids(2, 2.0, 1), FailingKernel)
        .generate_mesh_to(0.5, &path);
    assert!(matches!(result, Err(MeshError::Io { .. })));
}

#[test]
fn test_mass_of_aluminium_block() {
    // 10 x 10 x 10 mm fully solid
    let grid = grid_with_solids(2, 10.0, 8);
    let mass = MeshGenerator::new(grid).compute_mass(0.5, 2700.0);
    assert_eq!(mass.mass_kg, 0.003);
    assert_eq!(mass.mass_g, 2.7);
}
