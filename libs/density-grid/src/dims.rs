//! # Grid Dimensions
//!
//! Cell counts per axis and the row-major flat indexing shared by every
//! field in the pipeline. `z` varies fastest, then `y`, then `x`.

use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Number of cells along each axis of a 3D grid.
///
/// # Example
///
/// ```rust
/// use density_grid::GridDims;
///
/// let dims = GridDims::cubic(4).unwrap();
/// assert_eq!(dims.len(), 64);
/// assert_eq!(dims.index(0, 0, 1), 1);
/// assert_eq!(dims.index(0, 1, 0), 4);
/// assert_eq!(dims.coords(dims.index(3, 2, 1)), (3, 2, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    /// Cells along x
    pub nx: usize,
    /// Cells along y
    pub ny: usize,
    /// Cells along z
    pub nz: usize,
}

impl GridDims {
    /// Creates dimensions, rejecting empty axes and cell counts that
    /// overflow `usize`.
    pub fn new(nx: usize, ny: usize, nz: usize) -> GridResult<Self> {
        if nx == 0 || ny == 0 || nz == 0 {
            return Err(GridError::InvalidDimensions { nx, ny, nz });
        }
        if Self::cell_count(nx, ny, nz).is_none() {
            return Err(GridError::TooManyCells { nx, ny, nz });
        }
        Ok(Self { nx, ny, nz })
    }

    /// `nx * ny * nz`, or `None` on overflow.
    pub fn cell_count(nx: usize, ny: usize, nz: usize) -> Option<usize> {
        nx.checked_mul(ny).and_then(|v| v.checked_mul(nz))
    }

    /// Creates dimensions with the same resolution on all three axes.
    pub fn cubic(resolution: usize) -> GridResult<Self> {
        Self::new(resolution, resolution, resolution)
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Always false for validated dimensions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat index of cell `(i, j, k)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.ny + j) * self.nz + k
    }

    /// Inverse of [`GridDims::index`].
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let k = index % self.nz;
        let rest = index / self.nz;
        (rest / self.ny, rest % self.ny, k)
    }

    /// Returns true if `(i, j, k)` lies inside the grid.
    #[inline]
    pub fn contains(&self, i: usize, j: usize, k: usize) -> bool {
        i < self.nx && j < self.ny && k < self.nz
    }

    /// Cell counts as an array, indexed by axis.
    #[inline]
    pub fn axes(&self) -> [usize; 3] {
        [self.nx, self.ny, self.nz]
    }

    /// Distance between consecutive cells along `axis` in flat storage.
    #[inline]
    pub fn stride(&self, axis: usize) -> usize {
        match axis {
            0 => self.ny * self.nz,
            1 => self.nz,
            _ => 1,
        }
    }

    /// Iterates all `(i, j, k)` triples in storage order.
    pub fn iter_coords(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (0..self.len()).map(move |index| self.coords(index))
    }
}
