//! 2.5D Delaunay triangulation over the XY projection
//!
//! Points keep their full 3D position; only X and Y take part in the
//! triangulation. Inserted vertices carry their original cloud index so
//! faces can be reported as index triples without any position matching.

use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};
use terramesh_core::{Error, PointCloud3d, Result, TriangleMesh};

/// A projected point tagged with its index in the source cloud
struct ProjectedVertex {
    position: Point2<f64>,
    index: usize,
}

impl HasPosition for ProjectedVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// Triangulate the XY projection of a point cloud.
///
/// Returns triangle index triples into the cloud. The enumeration order of
/// triangles is defined by spade and must not be relied upon; the set of
/// triangles covers the convex hull of the projected points.
///
/// Fails with a geometry error when fewer than 3 points are given or when
/// the projection is degenerate (all points collinear, or duplicates
/// collapsing below 3 distinct positions).
pub fn triangulate_xy(cloud: &PointCloud3d) -> Result<Vec<[usize; 3]>> {
    if cloud.len() < 3 {
        return Err(Error::Geometry(format!(
            "need at least 3 points for triangulation, got {}",
            cloud.len()
        )));
    }

    let mut triangulation: DelaunayTriangulation<ProjectedVertex> = DelaunayTriangulation::new();

    for (index, point) in cloud.iter().enumerate() {
        triangulation
            .insert(ProjectedVertex {
                position: Point2::new(point.x, point.y),
                index,
            })
            .map_err(|e| {
                Error::Geometry(format!(
                    "cannot triangulate: point {} has invalid XY coordinates ({:?})",
                    index, e
                ))
            })?;
    }

    let triangles: Vec<[usize; 3]> = triangulation
        .inner_faces()
        .map(|face| {
            let [a, b, c] = face.vertices();
            [a.data().index, b.data().index, c.data().index]
        })
        .collect();

    if triangles.is_empty() {
        return Err(Error::Geometry(format!(
            "degenerate input: {} points are collinear or duplicate in the XY projection",
            cloud.len()
        )));
    }

    Ok(triangles)
}

/// Reconstruct a surface mesh from a point cloud.
///
/// Vertices keep their full X, Y, Z positions; faces come from the XY
/// Delaunay triangulation; per-vertex normals are computed from the face
/// geometry.
pub fn delaunay_surface_mesh(cloud: &PointCloud3d) -> Result<TriangleMesh> {
    let faces = triangulate_xy(cloud)?;
    let mut mesh = TriangleMesh::from_vertices_and_faces(cloud.points.clone(), faces);
    mesh.compute_vertex_normals();
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terramesh_core::Point3d;

    #[test]
    fn test_single_triangle() {
        let cloud = PointCloud3d::from_points(vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        ]);

        let triangles = triangulate_xy(&cloud).unwrap();
        assert_eq!(triangles.len(), 1);

        let mut indices = triangles[0].to_vec();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_too_few_points() {
        let cloud = PointCloud3d::from_points(vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
        ]);

        let err = triangulate_xy(&cloud).unwrap_err();
        match err {
            Error::Geometry(message) => assert!(message.contains("got 2")),
            other => panic!("expected geometry error, got {other:?}"),
        }
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let cloud: PointCloud3d = (0..5)
            .map(|i| Point3d::new(i as f64, 2.0 * i as f64, 0.5))
            .collect();

        let err = triangulate_xy(&cloud).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn test_duplicate_projection_is_degenerate() {
        // Distinct Z values but only two distinct XY positions.
        let cloud = PointCloud3d::from_points(vec![
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(0.0, 0.0, 1.0),
            Point3d::new(1.0, 1.0, 2.0),
        ]);

        let err = triangulate_xy(&cloud).unwrap_err();
        assert!(matches!(err, Error::Geometry(_)));
    }

    #[test]
    fn test_grid_triangulation_indices_valid() {
        let cloud: PointCloud3d = (0..4)
            .flat_map(|i| (0..4).map(move |j| Point3d::new(i as f64, j as f64, (i + j) as f64)))
            .collect();

        let triangles = triangulate_xy(&cloud).unwrap();
        // A triangulated 4x4 grid of its convex hull has 2*(n-1)^2 triangles.
        assert_eq!(triangles.len(), 18);

        for triple in &triangles {
            assert!(triple.iter().all(|&i| i < cloud.len()));
            assert_ne!(triple[0], triple[1]);
            assert_ne!(triple[1], triple[2]);
            assert_ne!(triple[0], triple[2]);
        }
    }

    #[test]
    fn test_surface_mesh_keeps_z_and_normals() {
        let cloud = PointCloud3d::from_points(vec![
            Point3d::new(0.0, 0.0, 1.5),
            Point3d::new(1.0, 0.0, 1.5),
            Point3d::new(0.0, 1.0, 1.5),
            Point3d::new(1.0, 1.0, 1.5),
        ]);

        let mesh = delaunay_surface_mesh(&cloud).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert!(mesh.vertices.iter().all(|v| v.z == 1.5));

        // Flat horizontal surface: every averaged normal points up.
        let normals = mesh.normals.as_ref().unwrap();
        assert_eq!(normals.len(), 4);
        for n in normals {
            assert!(n.z > 0.99);
        }
    }
}
