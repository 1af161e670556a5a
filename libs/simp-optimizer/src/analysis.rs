//! # Proxy Structural Analysis
//!
//! A lightweight stand-in for a finite-element solve. Compliance is taken as
//! the sum of inverse SIMP stiffnesses, and sensitivities follow a heuristic
//! that is strongest under the load, slightly weaker on supports, and decays
//! with distance from the top-center of the domain elsewhere.
//!
//! This does not model stress or strain. Results must stay comparable with
//! earlier runs, so the arithmetic is fixed.

use config::constants::{
    COMPLIANCE_EPSILON, LOAD_SENSITIVITY, MIN_FIELD_SENSITIVITY, SENSITIVITY_DECAY,
    SENSITIVITY_DENSITY_FLOOR, SUPPORT_SENSITIVITY,
};
use density_grid::{CellMask, DensityGrid, GridDims};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of one proxy analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyAnalysis {
    /// Scalar compliance of the current density field
    pub compliance: f64,
    /// Penalized sensitivity per cell, in storage order
    pub sensitivity: Vec<f64>,
}

/// Compliance `Σ 1 / (ρ^p + ε)` over all cells.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::analysis::compliance;
///
/// let c = compliance(&[1.0, 1.0], 3.0);
/// assert!((c - 2.0).abs() < 1e-6);
/// ```
pub fn compliance(densities: &[f64], penal: f64) -> f64 {
    densities
        .iter()
        .map(|&rho| 1.0 / (rho.powf(penal) + COMPLIANCE_EPSILON))
        .sum()
}

/// Heuristic sensitivity of cell `(i, j, k)` before density weighting.
///
/// Load cells take precedence over support cells.
pub fn raw_sensitivity(
    dims: GridDims,
    i: usize,
    j: usize,
    k: usize,
    on_load: bool,
    on_support: bool,
) -> f64 {
    if on_load {
        return LOAD_SENSITIVITY;
    }
    if on_support {
        return SUPPORT_SENSITIVITY;
    }
    let dx = i as f64 - dims.nx as f64 / 2.0;
    let dy = j as f64 - dims.ny as f64 / 2.0;
    let dz = k as f64 - dims.nz as f64;
    let distance = (dx * dx + dy * dy + dz * dz).sqrt();
    -MIN_FIELD_SENSITIVITY.max(1.0 / (1.0 + distance * SENSITIVITY_DECAY))
}

/// Runs the proxy analysis on the current density field.
///
/// Raw sensitivities are scaled by `-p · max(ρ, 1e-6)^(p-1)`.
pub fn analyze(grid: &DensityGrid, supports: &CellMask, load: &CellMask, penal: f64) -> ProxyAnalysis {
    let dims = grid.dims();
    let cells = grid.cells();

    let cell_sensitivity = |index: usize| {
        let (i, j, k) = dims.coords(index);
        let raw = raw_sensitivity(dims, i, j, k, load.contains(index), supports.contains(index));
        let rho = cells[index].max(SENSITIVITY_DENSITY_FLOOR);
        raw * (-penal * rho.powf(penal - 1.0))
    };

    #[cfg(feature = "parallel")]
    let sensitivity: Vec<f64> = (0..cells.len()).into_par_iter().map(cell_sensitivity).collect();
    #[cfg(not(feature = "parallel"))]
    let sensitivity: Vec<f64> = (0..cells.len()).map(cell_sensitivity).collect();

    ProxyAnalysis {
        compliance: compliance(cells, penal),
        sensitivity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::DVec3;

    #[test]
    fn test_compliance_uniform_field() {
        // 8 cells at 0.5 with p = 3: 8 / 0.125
        let c = compliance(&[0.5; 8], 3.0);
        assert_relative_eq!(c, 64.0, max_relative = 1e-6);
    }

    #[test]
    fn test_compliance_grows_as_material_is_removed() {
        assert!(compliance(&[0.2; 4], 3.0) > compliance(&[0.8; 4], 3.0));
    }

    #[test]
    fn test_raw_sensitivity_precedence() {
        let dims = GridDims::cubic(5).unwrap();
        assert_eq!(raw_sensitivity(dims, 2, 2, 4, true, true), -1.0);
        assert_eq!(raw_sensitivity(dims, 2, 2, 0, false, true), -0.8);
    }

    #[test]
    fn test_raw_sensitivity_distance_decay() {
        let dims = GridDims::cubic(10).unwrap();
        // (5, 5, 9) is one cell below the far z edge at the center column.
        assert_relative_eq!(raw_sensitivity(dims, 5, 5, 9, false, false), -1.0 / 1.1);
        let near = raw_sensitivity(dims, 5, 5, 9, false, false);
        let far = raw_sensitivity(dims, 0, 0, 0, false, false);
        assert!(far > near, "distant cells are less sensitive");
    }

    #[test]
    fn test_raw_sensitivity_floor() {
        let dims = GridDims::cubic(200).unwrap();
        assert_eq!(raw_sensitivity(dims, 0, 0, 0, false, false), -0.1);
    }

    #[test]
    fn test_analyze_scales_by_penalized_density() {
        let dims = GridDims::cubic(2).unwrap();
        let grid = DensityGrid::filled(dims, DVec3::ONE, 0.5).unwrap();
        let supports = CellMask::new(dims);
        let mut load = CellMask::new(dims);
        load.insert(0, 0, 1);

        let analysis = analyze(&grid, &supports, &load, 3.0);
        let index = dims.index(0, 0, 1);
        // -1 * (-3 * 0.5^2)
        assert_relative_eq!(analysis.sensitivity[index], 0.75);
        assert!(analysis.sensitivity.iter().all(|&s| s > 0.0));
        assert_relative_eq!(analysis.compliance, 64.0, max_relative = 1e-6);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_map_matches_sequential() {
        use crate::faces::Face;
        use crate::masks::{boundary_mask, load_patch};

        let dims = GridDims::new(7, 6, 5).unwrap();
        let cells: Vec<f64> = (0..dims.len())
            .map(|index| 0.001 + (index * 37 % 100) as f64 / 101.0)
            .collect();
        let grid = DensityGrid::from_cells(dims, DVec3::new(70.0, 60.0, 50.0), cells).unwrap();
        let supports = boundary_mask(dims, &[Face::Bottom, Face::Left]);
        let load = load_patch(dims);

        let analysis = analyze(&grid, &supports, &load, 3.0);

        let expected: Vec<f64> = (0..dims.len())
            .map(|index| {
                let (i, j, k) = dims.coords(index);
                let raw = raw_sensitivity(dims, i, j, k, load.contains(index), supports.contains(index));
                let rho = grid.cells()[index].max(SENSITIVITY_DENSITY_FLOOR);
                raw * (-3.0 * rho.powf(2.0))
            })
            .collect();
        assert_eq!(analysis.sensitivity, expected);
        assert_eq!(analysis.compliance, compliance(grid.cells(), 3.0));
    }
}
