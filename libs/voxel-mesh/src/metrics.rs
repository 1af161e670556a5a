//! # Geometry Metrics
//!
//! Volume and mass figures of a thresholded density field.

use config::constants::MM3_PER_M3;
use density_grid::DensityGrid;
use serde::Serialize;

/// Volumes and voxel counts of the solid part at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryMetrics {
    /// Bounding-box volume of the design domain (mm³)
    pub volume_initial: f64,
    /// Solid voxel count times voxel volume (mm³)
    pub volume_optimized: f64,
    /// `(initial - optimized) / initial * 100`
    pub volume_reduction: f64,
    /// Solid voxels over total voxels
    pub volume_fraction: f64,
    /// Cells at or above the threshold
    pub solid_voxels: usize,
    /// All cells
    pub total_voxels: usize,
}

impl GeometryMetrics {
    /// Measures `grid` at `threshold`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voxel_mesh::GeometryMetrics;
    /// use density_grid::{DensityGrid, GridDims};
    /// use glam::DVec3;
    ///
    /// let grid = DensityGrid::filled(GridDims::cubic(2).unwrap(), DVec3::splat(10.0), 1.0).unwrap();
    /// let metrics = GeometryMetrics::measure(&grid, 0.5);
    /// assert_eq!(metrics.solid_voxels, 8);
    /// assert_eq!(metrics.volume_reduction, 0.0);
    /// ```
    pub fn measure(grid: &DensityGrid, threshold: f64) -> Self {
        let solid_voxels = grid.count_at_least(threshold);
        let total_voxels = grid.len();
        let volume_initial = grid.domain_volume();
        let volume_optimized = solid_voxels as f64 * grid.voxel_volume();
        Self {
            volume_initial,
            volume_optimized,
            volume_reduction: (volume_initial - volume_optimized) / volume_initial * 100.0,
            volume_fraction: solid_voxels as f64 / total_voxels as f64,
            solid_voxels,
            total_voxels,
        }
    }

    /// Mass of the optimized volume for a material density in kg/m³.
    pub fn mass(&self, material_density: f64) -> MassMetrics {
        MassMetrics::from_volume(self.volume_optimized, material_density)
    }
}

/// Mass of a solid volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassMetrics {
    /// Mass in kilograms, rounded to 3 decimals
    pub mass_kg: f64,
    /// Mass in grams, rounded to 1 decimal
    pub mass_g: f64,
}

impl MassMetrics {
    /// Converts a volume in mm³ and a density in kg/m³ to a mass.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voxel_mesh::MassMetrics;
    ///
    /// // 1000 cm³ of steel
    /// let mass = MassMetrics::from_volume(1.0e6, 7850.0);
    /// assert_eq!(mass.mass_kg, 7.85);
    /// assert_eq!(mass.mass_g, 7850.0);
    /// ```
    pub fn from_volume(volume_mm3: f64, material_density: f64) -> Self {
        let mass_kg = volume_mm3 / MM3_PER_M3 * material_density;
        Self {
            mass_kg: round_to(mass_kg, 3),
            mass_g: round_to(mass_kg * 1000.0, 1),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use density_grid::GridDims;
    use glam::DVec3;

    #[test]
    fn test_half_solid_grid() {
        let dims = GridDims::cubic(2).unwrap();
        let cells = vec![1.0, 0.2, 1.0, 0.2, 1.0, 0.2, 1.0, 0.2];
        let grid = DensityGrid::from_cells(dims, DVec3::new(10.0, 20.0, 40.0), cells).unwrap();
        let metrics = GeometryMetrics::measure(&grid, 0.5);

        assert_eq!(metrics.solid_voxels, 4);
        assert_eq!(metrics.total_voxels, 8);
        assert_eq!(metrics.volume_fraction, 0.5);
        assert_relative_eq!(metrics.volume_initial, 8000.0);
        assert_relative_eq!(metrics.volume_optimized, 4000.0);
        assert_relative_eq!(metrics.volume_reduction, 50.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let dims = GridDims::cubic(1).unwrap();
        let grid = DensityGrid::from_cells(dims, DVec3::ONE, vec![0.5]).unwrap();
        assert_eq!(GeometryMetrics::measure(&grid, 0.5).solid_voxels, 1);
        assert_eq!(GeometryMetrics::measure(&grid, 0.5001).solid_voxels, 0);
    }

    #[test]
    fn test_empty_selection_reduces_everything() {
        let dims = GridDims::cubic(3).unwrap();
        let grid = DensityGrid::filled(dims, DVec3::splat(3.0), 0.1).unwrap();
        let metrics = GeometryMetrics::measure(&grid, 0.5);
        assert_eq!(metrics.volume_optimized, 0.0);
        assert_eq!(metrics.volume_reduction, 100.0);
    }

    #[test]
    fn test_mass_rounding() {
        // 123.456 cm³ of aluminium at 2700 kg/m³ = 0.3333312 kg
        let mass = MassMetrics::from_volume(123_456.0, 2700.0);
        assert_eq!(mass.mass_kg, 0.333);
        assert_eq!(mass.mass_g, 333.3);
    }

    #[test]
    fn test_mass_from_metrics() {
        let dims = GridDims::cubic(10).unwrap();
        let grid = DensityGrid::filled(dims, DVec3::splat(100.0), 1.0).unwrap();
        let mass = GeometryMetrics::measure(&grid, 0.5).mass(1000.0);
        assert_eq!(mass.mass_kg, 1.0);
        assert_eq!(mass.mass_g, 1000.0);
    }
}
