//! Metrics report printed by the commands.

use std::path::PathBuf;

use density_grid::DensityGrid;
use serde::Serialize;
use simp_optimizer::OptimizationMetrics;
use voxel_mesh::{ExportStrategy, GeometryMetrics, MassMetrics, MeshOutput};

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub material: String,
    pub density_threshold: f64,
    #[serde(flatten)]
    pub geometry: GeometryMetrics,
    pub final_compliance: f64,
    pub final_volume_fraction: f64,
    pub iterations_completed: usize,
    pub compliance_history: Vec<f64>,
    pub volume_history: Vec<f64>,
    pub unsatisfied_iterations: usize,
    pub volume_constraint_satisfied: bool,
    pub mass_kg: f64,
    pub mass_g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stl_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<ExportStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triangle_count: Option<usize>,
    /// Final densities, only with `--density-field`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_field: Option<DensityGrid>,
}

impl Report {
    pub fn new(
        material: &str,
        density_threshold: f64,
        geometry: GeometryMetrics,
        optimization: &OptimizationMetrics,
        mass: MassMetrics,
    ) -> Self {
        Self {
            material: material.to_string(),
            density_threshold,
            geometry,
            final_compliance: optimization.final_compliance,
            final_volume_fraction: optimization.final_volume_fraction,
            iterations_completed: optimization.iterations_completed,
            compliance_history: optimization.compliance_history.clone(),
            volume_history: optimization.volume_history.clone(),
            unsatisfied_iterations: optimization.unsatisfied_iterations,
            volume_constraint_satisfied: optimization.volume_constraint_satisfied(),
            mass_kg: mass.mass_kg,
            mass_g: mass.mass_g,
            stl_path: None,
            strategy: None,
            triangle_count: None,
            density_field: None,
        }
    }

    /// Attaches the final density field.
    pub fn with_density_field(mut self, grid: &DensityGrid) -> Self {
        self.density_field = Some(grid.clone());
        self
    }

    /// Attaches the exported mesh.
    pub fn with_mesh(mut self, mesh: &MeshOutput) -> Self {
        self.stl_path = Some(mesh.path.clone());
        self.strategy = Some(mesh.strategy);
        self.triangle_count = Some(mesh.triangle_count);
        self
    }

    pub fn print_text(&self) {
        println!("Topology Optimization");
        println!("  Material: {}", self.material);
        println!(
            "  Iterations: {} (final compliance {:.6})",
            self.iterations_completed, self.final_compliance
        );
        println!("  Final volume fraction: {:.4}", self.final_volume_fraction);
        if !self.volume_constraint_satisfied {
            println!(
                "  Volume target missed in {} iteration(s)",
                self.unsatisfied_iterations
            );
        }
        println!(
            "  Solid voxels: {} / {} at threshold {}",
            self.geometry.solid_voxels, self.geometry.total_voxels, self.density_threshold
        );
        println!(
            "  Volume: {:.2} mm³ -> {:.2} mm³ ({:.2}% reduction)",
            self.geometry.volume_initial, self.geometry.volume_optimized, self.geometry.volume_reduction
        );
        println!("  Mass: {} kg ({} g)", self.mass_kg, self.mass_g);
        if let (Some(path), Some(strategy)) = (&self.stl_path, self.strategy) {
            println!("  Mesh: {} ({})", path.display(), strategy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use density_grid::GridDims;
    use glam::DVec3;

    fn sample() -> Report {
        let geometry = GeometryMetrics {
            volume_initial: 1000.0,
            volume_optimized: 400.0,
            volume_reduction: 60.0,
            volume_fraction: 0.4,
            solid_voxels: 4,
            total_voxels: 10,
        };
        let optimization = OptimizationMetrics {
            final_compliance: 2.5,
            final_volume_fraction: 0.41,
            iterations_completed: 2,
            compliance_history: vec![3.0, 2.5],
            volume_history: vec![0.4, 0.41],
            unsatisfied_iterations: 0,
            bisection_history: Vec::new(),
        };
        let mass = MassMetrics::from_volume(geometry.volume_optimized, 2700.0);
        Report::new("aluminium", 0.5, geometry, &optimization, mass)
    }

    #[test]
    fn test_json_is_flat() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "volume_initial",
            "volume_optimized",
            "volume_reduction",
            "volume_fraction",
            "solid_voxels",
            "total_voxels",
            "final_compliance",
            "final_volume_fraction",
            "iterations_completed",
            "compliance_history",
            "volume_history",
            "mass_kg",
            "mass_g",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(!object.contains_key("stl_path"));
        assert!(!object.contains_key("density_field"));
        assert_eq!(object["volume_constraint_satisfied"], true);
    }

    #[test]
    fn test_with_mesh_adds_path() {
        let mesh = MeshOutput {
            path: PathBuf::from("/tmp/part.stl"),
            strategy: ExportStrategy::Kernel,
            solid_voxels: 4,
            vertex_count: 8,
            triangle_count: 12,
        };
        let value = serde_json::to_value(sample().with_mesh(&mesh)).unwrap();
        assert_eq!(value["stl_path"], "/tmp/part.stl");
        assert_eq!(value["strategy"], "kernel");
        assert_eq!(value["triangle_count"], 12);
    }

    #[test]
    fn test_density_field_is_opt_in() {
        let dims = GridDims::new(1, 1, 2).unwrap();
        let grid = DensityGrid::from_cells(dims, DVec3::splat(10.0), vec![1.0, 0.25]).unwrap();
        let value = serde_json::to_value(sample().with_density_field(&grid)).unwrap();
        assert_eq!(value["density_field"]["cells"], serde_json::json!([1.0, 0.25]));
        assert_eq!(value["density_field"]["dims"]["nz"], 2);
        assert_eq!(value["volume_history"], serde_json::json!([0.4, 0.41]));
    }
}
