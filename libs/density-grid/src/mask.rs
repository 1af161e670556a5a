//! # Cell Masks
//!
//! Boolean selections over a grid, used for fixed supports and load patches.

use crate::dims::GridDims;

/// A boolean flag per grid cell.
///
/// # Example
///
/// ```rust
/// use density_grid::{CellMask, GridDims};
///
/// let dims = GridDims::cubic(3).unwrap();
/// let mut mask = CellMask::new(dims);
/// mask.insert(1, 1, 2);
/// assert!(mask.get(1, 1, 2));
/// assert_eq!(mask.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellMask {
    dims: GridDims,
    cells: Vec<bool>,
}

impl CellMask {
    /// Creates an empty mask.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![false; dims.len()],
        }
    }

    /// Dimensions of the masked grid.
    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Marks cell `(i, j, k)`.
    #[inline]
    pub fn insert(&mut self, i: usize, j: usize, k: usize) {
        let index = self.dims.index(i, j, k);
        self.cells[index] = true;
    }

    /// Returns whether cell `(i, j, k)` is marked.
    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> bool {
        self.cells[self.dims.index(i, j, k)]
    }

    /// Returns whether the cell at flat `index` is marked.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.cells[index]
    }

    /// Number of marked cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&set| set).count()
    }

    /// Returns true when nothing is marked.
    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&set| set)
    }

    /// Flat indices of marked cells in storage order.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, &set)| set.then_some(index))
    }

    /// Marks every cell of the slab `x = i`.
    pub fn insert_x_layer(&mut self, i: usize) {
        for j in 0..self.dims.ny {
            for k in 0..self.dims.nz {
                self.insert(i, j, k);
            }
        }
    }

    /// Marks every cell of the slab `z = k`.
    pub fn insert_z_layer(&mut self, k: usize) {
        for i in 0..self.dims.nx {
            for j in 0..self.dims.ny {
                self.insert(i, j, k);
            }
        }
    }
}
