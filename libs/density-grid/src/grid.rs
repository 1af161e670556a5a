//! # Density Grid
//!
//! The scalar density field of the design domain together with the physical
//! extents it maps onto. Every cell stays inside
//! `[DENSITY_MIN, DENSITY_MAX]`; the only mutators clamp.

use crate::dims::GridDims;
use crate::error::{GridError, GridResult};
use crate::mask::CellMask;
use config::constants::{clamp_density, DENSITY_MAX, DENSITY_MIN};
use glam::DVec3;
use serde::Serialize;

/// A 3D density field over a box-shaped physical domain.
///
/// # Example
///
/// ```rust
/// use density_grid::{DensityGrid, GridDims};
/// use glam::DVec3;
///
/// let dims = GridDims::cubic(10).unwrap();
/// let grid = DensityGrid::filled(dims, DVec3::splat(10.0), 0.4).unwrap();
/// assert_eq!(grid.len(), 1000);
/// assert_eq!(grid.voxel_size(), DVec3::splat(1.0));
/// assert!((grid.mean() - 0.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityGrid {
    dims: GridDims,
    /// Physical length, width and height (mm)
    extent: DVec3,
    cells: Vec<f64>,
}

impl DensityGrid {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(dims: GridDims, extent: DVec3, value: f64) -> GridResult<Self> {
        Self::from_cells(dims, extent, vec![value; dims.len()])
    }

    /// Creates a grid from explicit cell values in storage order.
    ///
    /// Fails if the cell count does not match `dims` or a value lies
    /// outside the admissible density band.
    pub fn from_cells(dims: GridDims, extent: DVec3, cells: Vec<f64>) -> GridResult<Self> {
        validate_dims(dims)?;
        validate_extent(extent)?;
        if cells.len() != dims.len() {
            return Err(GridError::LengthMismatch {
                expected: dims.len(),
                actual: cells.len(),
            });
        }
        if let Some((index, &value)) = cells
            .iter()
            .enumerate()
            .find(|(_, v)| !(DENSITY_MIN..=DENSITY_MAX).contains(*v))
        {
            return Err(GridError::DensityOutOfRange {
                index,
                value,
                min: DENSITY_MIN,
                max: DENSITY_MAX,
            });
        }
        Ok(Self { dims, extent, cells })
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Physical extents of the domain.
    #[inline]
    pub fn extent(&self) -> DVec3 {
        self.extent
    }

    /// Physical size of one voxel along each axis.
    pub fn voxel_size(&self) -> DVec3 {
        DVec3::new(
            self.extent.x / self.dims.nx as f64,
            self.extent.y / self.dims.ny as f64,
            self.extent.z / self.dims.nz as f64,
        )
    }

    /// Physical volume of one voxel.
    pub fn voxel_volume(&self) -> f64 {
        let size = self.voxel_size();
        size.x * size.y * size.z
    }

    /// Volume of the whole bounding box.
    pub fn domain_volume(&self) -> f64 {
        self.extent.x * self.extent.y * self.extent.z
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell values in storage order.
    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// Density of cell `(i, j, k)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> f64 {
        self.cells[self.dims.index(i, j, k)]
    }

    /// Sets cell `(i, j, k)`, clamped into the density band.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, k: usize, value: f64) {
        let index = self.dims.index(i, j, k);
        self.cells[index] = clamp_density(value);
    }

    /// Replaces all cells, clamping each into the density band.
    pub fn assign(&mut self, cells: Vec<f64>) -> GridResult<()> {
        if cells.len() != self.cells.len() {
            return Err(GridError::LengthMismatch {
                expected: self.cells.len(),
                actual: cells.len(),
            });
        }
        self.cells = cells;
        for value in &mut self.cells {
            *value = clamp_density(*value);
        }
        Ok(())
    }

    /// Sets every cell selected by `mask` to `value` (clamped).
    pub fn fill_masked(&mut self, mask: &CellMask, value: f64) {
        let value = clamp_density(value);
        for index in mask.iter_set() {
            self.cells[index] = value;
        }
    }

    /// Mean density over all cells.
    pub fn mean(&self) -> f64 {
        self.cells.iter().sum::<f64>() / self.cells.len() as f64
    }

    /// Number of cells with density at or above `threshold`.
    pub fn count_at_least(&self, threshold: f64) -> usize {
        self.cells.iter().filter(|&&v| v >= threshold).count()
    }

    /// Coordinates of every cell with density at or above `threshold`,
    /// in storage order.
    pub fn cells_at_least(&self, threshold: f64) -> Vec<(usize, usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v >= threshold)
            .map(|(index, _)| self.dims.coords(index))
            .collect()
    }

    /// Physical min and max corners of cell `(i, j, k)`.
    pub fn cell_bounds(&self, i: usize, j: usize, k: usize) -> (DVec3, DVec3) {
        let size = self.voxel_size();
        let min = DVec3::new(i as f64 * size.x, j as f64 * size.y, k as f64 * size.z);
        (min, min + size)
    }

    /// Physical center of cell `(i, j, k)`.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        let (min, _) = self.cell_bounds(i, j, k);
        min + self.voxel_size() / 2.0
    }
}

fn validate_dims(dims: GridDims) -> GridResult<()> {
    GridDims::new(dims.nx, dims.ny, dims.nz).map(|_| ())
}

fn validate_extent(extent: DVec3) -> GridResult<()> {
    if !extent.is_finite() || extent.min_element() <= 0.0 {
        return Err(GridError::invalid_extent(format!(
            "extents must be positive and finite, got {extent:?}"
        )));
    }
    Ok(())
}
