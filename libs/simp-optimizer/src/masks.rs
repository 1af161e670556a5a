//! # Boundary and Load Masks
//!
//! Builds the fixed-support mask from named faces and the load patch on the
//! top face. Both are created once per load setup and never mutated.

use crate::error::{OptimizerError, OptimizerResult};
use crate::faces::Face;
use config::constants::LOAD_PATCH_HALF_WIDTH;
use density_grid::{CellMask, GridDims};
use glam::DVec3;
use serde::Serialize;

/// External force applied on the load patch.
///
/// The proxy analysis only uses the patch location; magnitude and
/// direction are kept for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadCase {
    /// Force magnitude (N)
    pub magnitude: f64,
    /// Unit force direction
    pub direction: DVec3,
}

impl LoadCase {
    /// Creates a load case, normalizing the direction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simp_optimizer::LoadCase;
    /// use glam::DVec3;
    ///
    /// let load = LoadCase::new(1000.0, DVec3::new(0.0, 0.0, -2.0)).unwrap();
    /// assert_eq!(load.direction, DVec3::NEG_Z);
    /// assert!(LoadCase::new(1000.0, DVec3::ZERO).is_err());
    /// ```
    pub fn new(magnitude: f64, direction: DVec3) -> OptimizerResult<Self> {
        if !magnitude.is_finite() {
            return Err(OptimizerError::invalid(
                "force_magnitude",
                format!("must be finite, got {magnitude}"),
            ));
        }
        let direction = direction.try_normalize().ok_or_else(|| {
            OptimizerError::invalid(
                "force_direction",
                format!("must be a non-zero finite vector, got {direction:?}"),
            )
        })?;
        Ok(Self {
            magnitude,
            direction,
        })
    }

    /// Force vector (magnitude times direction).
    pub fn force(&self) -> DVec3 {
        self.direction * self.magnitude
    }
}

/// Marks one boundary layer of cells for each fixed face.
///
/// # Example
///
/// ```rust
/// use simp_optimizer::{masks::boundary_mask, Face};
/// use density_grid::GridDims;
///
/// let dims = GridDims::cubic(5).unwrap();
/// let mask = boundary_mask(dims, &[Face::Bottom]);
/// assert_eq!(mask.count(), 25);
/// assert!(mask.get(3, 4, 0));
/// ```
pub fn boundary_mask(dims: GridDims, faces: &[Face]) -> CellMask {
    let mut mask = CellMask::new(dims);
    for face in faces {
        match face {
            Face::Bottom => mask.insert_z_layer(0),
            Face::Top => mask.insert_z_layer(dims.nz - 1),
            Face::Left => mask.insert_x_layer(0),
            Face::Right => mask.insert_x_layer(dims.nx - 1),
        }
    }
    mask
}

/// Marks the 4x4 load patch centered on the top face.
///
/// The patch spans `[c - 2, c + 2)` around `c = n / 2` on both in-plane
/// axes, cut off at the grid edge on grids narrower than four cells.
pub fn load_patch(dims: GridDims) -> CellMask {
    let mut mask = CellMask::new(dims);
    let k = dims.nz - 1;
    for i in patch_range(dims.nx) {
        for j in patch_range(dims.ny) {
            mask.insert(i, j, k);
        }
    }
    mask
}

fn patch_range(n: usize) -> std::ops::Range<usize> {
    let center = n / 2;
    let start = center.saturating_sub(LOAD_PATCH_HALF_WIDTH);
    let end = (center + LOAD_PATCH_HALF_WIDTH).min(n);
    start..end
}
