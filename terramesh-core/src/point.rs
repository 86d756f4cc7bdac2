//! Point and vector type aliases
//!
//! The pipeline works in double precision end to end: input files carry
//! 6-decimal fixed point values and the cleaned copy must round-trip them
//! exactly. Conversion to `f32` happens only at the GPU vertex boundary.

use nalgebra::{Point2, Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 2D point with double precision coordinates
pub type Point2d = Point2<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;
