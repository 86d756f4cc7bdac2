//! Triangle mesh data structure
//!
//! A mesh is assembled from a point cloud (vertex positions) and a set of
//! triangle index triples produced by the triangulator. Per-vertex normals
//! are derived from face geometry, never read from input.

use crate::point::{Point3d, Vector3d};
use serde::{Deserialize, Serialize};

/// A triangle mesh with vertices, faces and optional per-vertex normals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3d>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3d>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3d>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Calculate face normals
    ///
    /// The returned vectors are unnormalized cross products, so their
    /// magnitude is twice the face area. Vertex normal accumulation relies
    /// on this for area weighting.
    pub fn face_normals(&self) -> Vec<Vector3d> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                (v1 - v0).cross(&(v2 - v0))
            })
            .collect()
    }

    /// Compute per-vertex normals as the area-weighted average of adjacent
    /// face normals and store them on the mesh.
    ///
    /// Vertices with no adjacent faces (or a degenerate accumulation) fall
    /// back to +Z so the normal array stays parallel to the vertex array.
    pub fn compute_vertex_normals(&mut self) {
        let face_normals = self.face_normals();
        let mut accumulated = vec![Vector3d::zeros(); self.vertices.len()];

        for (face, normal) in self.faces.iter().zip(&face_normals) {
            for &index in face {
                accumulated[index] += normal;
            }
        }

        let normals = accumulated
            .into_iter()
            .map(|n| {
                if n.norm() > 1e-12 {
                    n.normalize()
                } else {
                    Vector3d::new(0.0, 0.0, 1.0)
                }
            })
            .collect();

        self.normals = Some(normals);
    }

    /// Set vertex normals, ignoring arrays of the wrong length
    pub fn set_normals(&mut self, normals: Vec<Vector3d>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_triangle() -> TriangleMesh {
        TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn test_face_normals_area_weighted() {
        let mesh = flat_triangle();
        let normals = mesh.face_normals();
        assert_eq!(normals.len(), 1);
        // Unit right triangle in the XY plane: area 0.5, cross product magnitude 1.
        assert_relative_eq!(normals[0].norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normals[0].z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_normals_flat_mesh() {
        let mut mesh = flat_triangle();
        mesh.compute_vertex_normals();

        let normals = mesh.normals.as_ref().unwrap();
        assert_eq!(normals.len(), 3);
        for n in normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_vertex_normals_average_adjacent_faces() {
        // Two triangles forming a ridge along the Y axis.
        let mut mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(-1.0, 0.0, 0.0),
                Point3d::new(0.0, 0.0, 1.0),
                Point3d::new(1.0, 0.0, 0.0),
                Point3d::new(-1.0, 1.0, 0.0),
                Point3d::new(0.0, 1.0, 1.0),
                Point3d::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 4], [0, 4, 3], [1, 2, 5], [1, 5, 4]],
        );
        mesh.compute_vertex_normals();

        let normals = mesh.normals.as_ref().unwrap();
        // The ridge vertex sits between both slopes: its averaged normal
        // points straight up while slope vertices lean outward.
        assert_relative_eq!(normals[1].x, 0.0, epsilon = 1e-9);
        assert!(normals[1].z > 0.9);
        assert!(normals[0].x < 0.0);
        assert!(normals[2].x > 0.0);
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriangleMesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }
}
