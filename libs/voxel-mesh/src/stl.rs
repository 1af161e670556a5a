//! # STL Writers
//!
//! ASCII STL for the triangulation fallback and binary STL (via `stl_io`)
//! for kernel output.

use crate::mesh::VoxelMesh;
use std::io::{self, Write};

/// Writes `mesh` as an ASCII STL solid called `name`.
///
/// Every facet carries the placeholder normal `0 0 1`; readers recompute
/// normals from the vertex winding.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::{stl::write_ascii_stl, VoxelMesh};
/// use glam::DVec3;
///
/// let mut mesh = VoxelMesh::new();
/// mesh.add_box(DVec3::ZERO, DVec3::ONE);
/// let mut out = Vec::new();
/// write_ascii_stl(&mesh, "Part", &mut out).unwrap();
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.starts_with("solid Part\n"));
/// assert!(text.ends_with("endsolid Part\n"));
/// assert_eq!(text.matches("endfacet").count(), 12);
/// ```
pub fn write_ascii_stl<W: Write>(mesh: &VoxelMesh, name: &str, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "solid {name}")?;
    for index in 0..mesh.triangle_count() {
        writeln!(writer, "  facet normal 0 0 1")?;
        writeln!(writer, "    outer loop")?;
        for v in mesh.triangle_corners(index) {
            writeln!(writer, "      vertex {} {} {}", v.x, v.y, v.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {name}")?;
    Ok(())
}

/// Writes `mesh` as binary STL with per-facet normals from the winding.
pub fn write_binary_stl<W: Write>(mesh: &VoxelMesh, writer: &mut W) -> io::Result<()> {
    let triangles: Vec<stl_io::Triangle> = (0..mesh.triangle_count())
        .map(|index| {
            let n = mesh.face_normal(index);
            let [v0, v1, v2] = mesh.triangle_corners(index);
            stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [
                    stl_io::Vertex::new([v0.x as f32, v0.y as f32, v0.z as f32]),
                    stl_io::Vertex::new([v1.x as f32, v1.y as f32, v1.z as f32]),
                    stl_io::Vertex::new([v2.x as f32, v2.y as f32, v2.z as f32]),
                ],
            }
        })
        .collect();
    stl_io::write_stl(writer, triangles.iter())
}
