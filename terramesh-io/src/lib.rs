//! I/O operations for terramesh point clouds and meshes
//!
//! This crate covers the two file formats the pipeline touches: the
//! whitespace-delimited XYZ text format scans arrive in (with its cleaning
//! rules) and OBJ for exported surface meshes.

pub mod obj;
pub mod xyz;

pub use obj::{ObjReader, ObjWriter};
pub use xyz::{cleaned_output_path, XyzReader, XyzWriter};

use terramesh_core::{PointCloud3d, Result, TriangleMesh};
use std::path::Path;

/// Trait for reading point clouds from files
pub trait PointCloudReader {
    fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud3d>;
}

/// Trait for writing point clouds to files
pub trait PointCloudWriter {
    fn write_point_cloud<P: AsRef<Path>>(cloud: &PointCloud3d, path: P) -> Result<()>;
}

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}
