//! Interactive visualization for terramesh
//!
//! Renders point clouds and reconstructed surface meshes in a native
//! window using wgpu and winit:
//! - height-colored point cloud rendering
//! - shaded mesh rendering with per-vertex normals
//! - orbit/pan/zoom camera controls (Z-up, matching the 2.5D data)
//!
//! The viewer blocks the calling thread until the user closes the window;
//! it is the pipeline's only suspension point.

pub mod camera;
pub mod renderer;
pub mod viewer;

pub use camera::OrbitCamera;
pub use renderer::{MeshVertex, PointVertex, RenderConfig, Renderer};
pub use viewer::Viewer;

use terramesh_core::{PointCloud3d, Result, TriangleMesh};

/// Show a point cloud in a blocking interactive viewer
pub fn show_point_cloud(cloud: &PointCloud3d) -> Result<()> {
    Viewer::point_cloud(cloud).run()
}

/// Show a mesh in a blocking interactive viewer
pub fn show_mesh(mesh: &TriangleMesh) -> Result<()> {
    Viewer::mesh(mesh).run()
}
