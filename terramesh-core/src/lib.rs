//! Core data structures for terramesh
//!
//! This crate provides the fundamental types shared by the terramesh
//! pipeline: points, point clouds, triangle meshes, and the error
//! taxonomy used across every stage.

pub mod error;
pub mod mesh;
pub mod point;
pub mod point_cloud;
pub mod traits;

pub use error::*;
pub use mesh::*;
pub use point::*;
pub use point_cloud::*;
pub use traits::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector3};

/// Common result type for terramesh operations
pub type Result<T> = std::result::Result<T, Error>;
