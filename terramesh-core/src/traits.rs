//! Core traits for terramesh

use crate::{mesh::TriangleMesh, point::Point3d, point_cloud::PointCloud};

/// Trait for drawable/renderable objects
///
/// The viewer uses the bounding box to frame the camera around whatever it
/// is asked to display.
pub trait Drawable {
    /// Get the axis-aligned bounding box of the object
    fn bounding_box(&self) -> (Point3d, Point3d);

    /// Get the center point of the object
    fn center(&self) -> Point3d {
        let (min, max) = self.bounding_box();
        Point3d::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        )
    }
}

fn bounds_of(points: &[Point3d]) -> (Point3d, Point3d) {
    if points.is_empty() {
        return (Point3d::origin(), Point3d::origin());
    }

    let mut min = points[0];
    let mut max = points[0];

    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        min.z = min.z.min(p.z);

        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
        max.z = max.z.max(p.z);
    }

    (min, max)
}

impl Drawable for PointCloud<Point3d> {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds_of(&self.points)
    }
}

impl Drawable for TriangleMesh {
    fn bounding_box(&self) -> (Point3d, Point3d) {
        bounds_of(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_bounding_box_and_center() {
        let cloud = PointCloud::from_points(vec![
            Point3d::new(-1.0, 0.0, 2.0),
            Point3d::new(3.0, -2.0, 0.0),
            Point3d::new(1.0, 4.0, 6.0),
        ]);

        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3d::new(-1.0, -2.0, 0.0));
        assert_eq!(max, Point3d::new(3.0, 4.0, 6.0));
        assert_eq!(cloud.center(), Point3d::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn test_empty_cloud_bounding_box() {
        let cloud: PointCloud<Point3d> = PointCloud::new();
        let (min, max) = cloud.bounding_box();
        assert_eq!(min, Point3d::origin());
        assert_eq!(max, Point3d::origin());
    }
}
