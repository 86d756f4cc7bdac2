//! Surface reconstruction for terramesh
//!
//! Reconstructs a 2.5D surface mesh from a cleaned point cloud by Delaunay
//! triangulation over the XY projection. The triangulation itself is
//! delegated to the `spade` crate (incremental Delaunay); this crate owns
//! the projection, index bookkeeping and degeneracy handling around it.

pub mod delaunay;

pub use delaunay::{delaunay_surface_mesh, triangulate_xy};
