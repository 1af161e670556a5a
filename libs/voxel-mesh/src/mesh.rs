//! # Voxel Mesh
//!
//! Triangle mesh built from voxel boxes, plus the shared cube topology used
//! by both export strategies.

use glam::DVec3;

/// Corner offsets of a unit cell, bottom ring then top ring.
pub(crate) const CUBE_CORNERS: [[i64; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Outward direction and two CCW triangles (as corner indices) per face.
pub(crate) const CUBE_FACES: [([i64; 3], [[usize; 3]; 2]); 6] = [
    ([0, 0, -1], [[0, 2, 1], [0, 3, 2]]),
    ([0, 0, 1], [[4, 5, 6], [4, 6, 7]]),
    ([0, -1, 0], [[0, 1, 5], [0, 5, 4]]),
    ([0, 1, 0], [[2, 3, 7], [2, 7, 6]]),
    ([-1, 0, 0], [[3, 0, 4], [3, 4, 7]]),
    ([1, 0, 0], [[1, 2, 6], [1, 6, 5]]),
];

/// A triangle mesh with `f64` vertices.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::VoxelMesh;
/// use glam::DVec3;
///
/// let mut mesh = VoxelMesh::new();
/// mesh.add_box(DVec3::ZERO, DVec3::splat(10.0));
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoxelMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl VoxelMesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Appends an axis-aligned box as 8 fresh vertices and 12 triangles.
    ///
    /// No vertex is shared with geometry already in the mesh.
    pub fn add_box(&mut self, min: DVec3, max: DVec3) {
        let size = max - min;
        let base = self.vertices.len() as u32;
        for [x, y, z] in CUBE_CORNERS {
            self.vertices
                .push(min + size * DVec3::new(x as f64, y as f64, z as f64));
        }
        for (_, triangles) in CUBE_FACES {
            for [a, b, c] in triangles {
                self.add_triangle(base + a as u32, base + b as u32, base + c as u32);
            }
        }
    }

    /// Returns the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Corner positions of triangle `index`.
    pub fn triangle_corners(&self, index: usize) -> [DVec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.vertices[a as usize],
            self.vertices[b as usize],
            self.vertices[c as usize],
        ]
    }

    /// Unit normal of triangle `index` from its winding, or zero if
    /// degenerate.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [v0, v1, v2] = self.triangle_corners(index);
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.vertices.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Returns true if every triangle references existing vertices.
    pub fn validate(&self) -> bool {
        let n = self.vertices.len() as u32;
        self.triangles.iter().all(|t| t.iter().all(|&i| i < n))
    }

    /// Signed enclosed volume (divergence theorem). Positive for a closed
    /// mesh with outward winding.
    pub fn signed_volume(&self) -> f64 {
        (0..self.triangles.len())
            .map(|t| {
                let [v0, v1, v2] = self.triangle_corners(t);
                v0.dot(v1.cross(v2)) / 6.0
            })
            .sum()
    }
}
