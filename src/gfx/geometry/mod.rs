//! # Procedural Geometry Generation
//!
//! The house is built entirely from procedural primitives, so there is no
//! model loading step.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box with per-face normals
//! - **Cone**: closed cone with a configurable number of radial segments
//! - **Plane**: flat plane in the XY plane facing +Z
//!
//! ## Usage
//!
//! ```rust
//! use house_viewer::gfx::geometry::{generate_box, generate_cone, generate_plane};
//!
//! let walls = generate_box(2.0, 1.5, 2.0);
//! let roof = generate_cone(1.8, 1.0, 4);
//! let ground = generate_plane(20.0, 20.0, 1, 1);
//! assert_eq!(walls.triangle_count(), 12);
//! assert_eq!(roof.vertex_count(), 15);
//! assert_eq!(ground.vertex_count(), 4);
//! ```

pub mod primitives;

pub use primitives::*;

use std::collections::HashSet;

use crate::gfx::scene::vertex::Vertex3D;

/// Generated geometry ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z), one per vertex
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends a vertex and returns its index
    fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3]) -> u32 {
        self.vertices.push(position);
        self.normals.push(normal);
        (self.vertices.len() - 1) as u32
    }

    /// Line-list indices covering every triangle edge exactly once
    ///
    /// Used for wireframe drawing. Edges are deduplicated by vertex index,
    /// so edges shared across split vertices (box corners, for example)
    /// are still drawn once per distinct index pair.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::new();
        let mut lines = Vec::new();

        for triangle in self.indices.chunks_exact(3) {
            for (a, b) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }

        lines
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_scene_format(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices: Vec<Vertex3D> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_edges_are_deduplicated() {
        let plane = generate_plane(1.0, 1.0, 1, 1);
        // 4 outer edges + 1 diagonal
        assert_eq!(plane.edge_indices().len(), 5 * 2);
    }

    #[test]
    fn box_edges_include_face_diagonals() {
        let walls = generate_box(2.0, 1.5, 2.0);
        assert_eq!(walls.edge_indices().len(), 6 * 5 * 2);
    }

    #[test]
    fn scene_format_keeps_counts() {
        let roof = generate_cone(1.8, 1.0, 4);
        let (vertices, indices) = roof.to_scene_format();
        assert_eq!(vertices.len(), roof.vertex_count());
        assert_eq!(indices.len(), roof.indices.len());
    }
}
