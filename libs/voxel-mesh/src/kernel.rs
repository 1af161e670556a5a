//! # Geometry Kernels
//!
//! A geometry kernel turns a set of box primitives into one unioned solid.
//! The built-in [`VoxelUnionKernel`] handles the case the mesh generator
//! produces: equally sized boxes on a regular lattice. It removes every
//! face shared by two boxes and welds coincident corners, so the result is
//! a closed surface without internal walls.

use crate::error::KernelError;
use crate::mesh::{VoxelMesh, CUBE_CORNERS, CUBE_FACES};
use config::constants::LATTICE_TOLERANCE;
use glam::{DVec3, I64Vec3};
use std::collections::{HashMap, HashSet};

/// An axis-aligned box primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelBox {
    /// Minimum corner (mm)
    pub min: DVec3,
    /// Maximum corner (mm)
    pub max: DVec3,
}

impl VoxelBox {
    /// Creates a box from its minimum and maximum corners.
    pub fn from_bounds(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates a box of `size` centered on `center`.
    pub fn centered(center: DVec3, size: DVec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center position.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

/// Boolean union of box primitives.
pub trait GeometryKernel {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Unions `boxes` into one closed triangle mesh.
    fn union_boxes(&self, boxes: &[VoxelBox]) -> Result<VoxelMesh, KernelError>;
}

/// Exact union of lattice-aligned, equally sized boxes.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::{GeometryKernel, VoxelBox, VoxelUnionKernel};
/// use glam::DVec3;
///
/// let boxes = [
///     VoxelBox::from_bounds(DVec3::ZERO, DVec3::ONE),
///     VoxelBox::from_bounds(DVec3::X, DVec3::new(2.0, 1.0, 1.0)),
/// ];
/// let mesh = VoxelUnionKernel.union_boxes(&boxes).unwrap();
/// assert_eq!(mesh.vertex_count(), 12);
/// assert_eq!(mesh.triangle_count(), 20);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct VoxelUnionKernel;

impl GeometryKernel for VoxelUnionKernel {
    fn name(&self) -> &'static str {
        "voxel-union"
    }

    fn union_boxes(&self, boxes: &[VoxelBox]) -> Result<VoxelMesh, KernelError> {
        let first = boxes.first().ok_or(KernelError::NoBoxes)?;
        let size = first.size();
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(KernelError::unsupported(format!(
                "box size must be positive, got {size:?}"
            )));
        }
        let origin = first.min;

        let cells = boxes
            .iter()
            .map(|b| lattice_cell(b, origin, size))
            .collect::<Result<Vec<_>, _>>()?;
        let occupied: HashSet<I64Vec3> = cells.iter().copied().collect();

        let mut mesh = VoxelMesh::new();
        let mut welded: HashMap<I64Vec3, u32> = HashMap::new();
        let mut emitted: HashSet<I64Vec3> = HashSet::with_capacity(cells.len());

        for cell in cells {
            if !emitted.insert(cell) {
                continue;
            }
            for (direction, triangles) in CUBE_FACES {
                if occupied.contains(&(cell + I64Vec3::from_array(direction))) {
                    continue;
                }
                for corners in triangles {
                    let [a, b, c] = corners.map(|corner| {
                        let lattice = cell + I64Vec3::from_array(CUBE_CORNERS[corner]);
                        *welded.entry(lattice).or_insert_with(|| {
                            mesh.add_vertex(origin + lattice.as_dvec3() * size)
                        })
                    });
                    mesh.add_triangle(a, b, c);
                }
            }
        }
        Ok(mesh)
    }
}

/// Lattice coordinates of `b`, or an error if it does not sit on the
/// lattice defined by `origin` and `size`.
fn lattice_cell(b: &VoxelBox, origin: DVec3, size: DVec3) -> Result<I64Vec3, KernelError> {
    if ((b.size() - size).abs() / size).max_element() > LATTICE_TOLERANCE {
        return Err(KernelError::unsupported(format!(
            "mixed box sizes {:?} and {:?}",
            size,
            b.size()
        )));
    }
    let offset = (b.min - origin) / size;
    let rounded = offset.round();
    if !offset.is_finite() || (offset - rounded).abs().max_element() > LATTICE_TOLERANCE {
        return Err(KernelError::unsupported(format!(
            "box at {:?} is off the voxel lattice",
            b.center()
        )));
    }
    Ok(rounded.as_i64vec3())
}
