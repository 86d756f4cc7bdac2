//! Blocking interactive viewer
//!
//! Displays either a raw point cloud (height colored) or a reconstructed
//! surface mesh (shaded with per-vertex normals). `run` takes over the
//! calling thread until the user closes the window.

use crate::camera::OrbitCamera;
use crate::renderer::{MeshVertex, PointVertex, RenderConfig, Renderer};
use nalgebra::Point3;
use std::sync::Arc;
use terramesh_core::{Drawable, Error, PointCloud3d, Result, TriangleMesh};
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::WindowBuilder,
};

const MESH_COLOR: [f32; 3] = [0.55, 0.6, 0.65];

/// Data the viewer can display
enum ViewData {
    PointCloud(PointCloud3d),
    Mesh(TriangleMesh),
}

/// Vertex data uploaded once per viewer run
enum GpuData {
    Points(Vec<PointVertex>),
    Mesh(Vec<MeshVertex>, Vec<u32>),
}

/// Interactive 3D viewer
///
/// Controls: left drag orbits, right drag pans, scroll zooms, `r` resets
/// the camera.
pub struct Viewer {
    data: ViewData,
    bounds: (Point3<f32>, Point3<f32>),
}

impl Viewer {
    /// Create a viewer showing a raw point cloud
    pub fn point_cloud(cloud: &PointCloud3d) -> Self {
        let bounds = bounds_f32(cloud);
        Self {
            data: ViewData::PointCloud(cloud.clone()),
            bounds,
        }
    }

    /// Create a viewer showing a shaded mesh
    ///
    /// Meshes without normals get them computed so shading always works.
    pub fn mesh(mesh: &TriangleMesh) -> Self {
        let bounds = bounds_f32(mesh);
        let mut mesh = mesh.clone();
        if mesh.normals.is_none() {
            mesh.compute_vertex_normals();
        }
        Self {
            data: ViewData::Mesh(mesh),
            bounds,
        }
    }

    /// Open the window and block until the user closes it
    pub fn run(self) -> Result<()> {
        let gpu_data = match &self.data {
            ViewData::PointCloud(cloud) => GpuData::Points(height_colored_vertices(cloud)),
            ViewData::Mesh(mesh) => {
                let (vertices, indices) = mesh_buffers(mesh);
                GpuData::Mesh(vertices, indices)
            }
        };

        let event_loop = EventLoop::new()
            .map_err(|e| Error::Render(format!("failed to create event loop: {e}")))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title("terramesh viewer")
                .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0))
                .build(&event_loop)
                .map_err(|e| Error::Render(format!("failed to create window: {e}")))?,
        );

        let mut renderer =
            pollster::block_on(Renderer::new(window.clone(), RenderConfig::default()))?;

        let size = window.inner_size();
        let aspect_ratio = size.width.max(1) as f32 / size.height.max(1) as f32;
        let (bounds_min, bounds_max) = self.bounds;
        let mut camera = OrbitCamera::framing(bounds_min, bounds_max, aspect_ratio);

        let mut last_mouse_pos: Option<PhysicalPosition<f64>> = None;
        let mut left_pressed = false;
        let mut right_pressed = false;

        event_loop
            .run(move |event, target| {
                target.set_control_flow(ControlFlow::Poll);

                if let Event::WindowEvent { event, .. } = event {
                    match event {
                        WindowEvent::CloseRequested => target.exit(),
                        WindowEvent::Resized(new_size) => {
                            renderer.resize(new_size);
                            camera.aspect_ratio =
                                new_size.width.max(1) as f32 / new_size.height.max(1) as f32;
                        }
                        WindowEvent::MouseInput { state, button, .. } => match button {
                            MouseButton::Left => left_pressed = state == ElementState::Pressed,
                            MouseButton::Right => right_pressed = state == ElementState::Pressed,
                            _ => {}
                        },
                        WindowEvent::CursorMoved { position, .. } => {
                            if let Some(last) = last_mouse_pos {
                                let dx = (position.x - last.x) as f32;
                                let dy = (position.y - last.y) as f32;
                                if left_pressed {
                                    camera.orbit(dx * 0.01, dy * 0.01);
                                } else if right_pressed {
                                    camera.pan(dx * 0.002, dy * 0.002);
                                }
                            }
                            last_mouse_pos = Some(position);
                        }
                        WindowEvent::MouseWheel { delta, .. } => {
                            let scroll = match delta {
                                MouseScrollDelta::LineDelta(_, y) => y,
                                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                            };
                            camera.zoom(scroll * 0.1);
                        }
                        WindowEvent::KeyboardInput { event, .. } => {
                            if event.state == ElementState::Pressed {
                                if let Key::Character(c) = &event.logical_key {
                                    if c.as_str() == "r" || c.as_str() == "R" {
                                        camera = OrbitCamera::framing(
                                            bounds_min,
                                            bounds_max,
                                            camera.aspect_ratio,
                                        );
                                    }
                                }
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            renderer.update_camera(
                                camera.view_matrix(),
                                camera.projection_matrix(),
                                camera.position.coords,
                            );

                            let outcome = match &gpu_data {
                                GpuData::Points(vertices) => renderer.render_points(vertices),
                                GpuData::Mesh(vertices, indices) => {
                                    renderer.render_mesh(vertices, indices)
                                }
                            };
                            if let Err(e) = outcome {
                                eprintln!("render error: {e}");
                            }

                            window.request_redraw();
                        }
                        _ => {}
                    }
                }
            })
            .map_err(|e| Error::Render(format!("event loop error: {e}")))?;

        Ok(())
    }
}

fn bounds_f32(drawable: &impl Drawable) -> (Point3<f32>, Point3<f32>) {
    let (min, max) = drawable.bounding_box();
    (
        Point3::new(min.x as f32, min.y as f32, min.z as f32),
        Point3::new(max.x as f32, max.y as f32, max.z as f32),
    )
}

/// Color raw points by height (blue at the bottom of the Z range, red at
/// the top) so unshaded clouds stay legible.
fn height_colored_vertices(cloud: &PointCloud3d) -> Vec<PointVertex> {
    let min_z = cloud.iter().map(|p| p.z).fold(f64::INFINITY, f64::min);
    let max_z = cloud.iter().map(|p| p.z).fold(f64::NEG_INFINITY, f64::max);
    let z_range = max_z - min_z;

    cloud
        .iter()
        .map(|point| {
            let t = if z_range > 0.0 {
                ((point.z - min_z) / z_range) as f32
            } else {
                0.5
            };
            PointVertex {
                position: [point.x as f32, point.y as f32, point.z as f32],
                color: [t, 0.35, 1.0 - t],
            }
        })
        .collect()
}

/// Flatten a mesh into GPU vertex and index buffers
fn mesh_buffers(mesh: &TriangleMesh) -> (Vec<MeshVertex>, Vec<u32>) {
    let fallback = nalgebra::Vector3::new(0.0, 0.0, 1.0);
    let vertices = mesh
        .vertices
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let n = mesh
                .normals
                .as_ref()
                .map(|normals| normals[i])
                .unwrap_or(fallback);
            MeshVertex {
                position: [v.x as f32, v.y as f32, v.z as f32],
                normal: [n.x as f32, n.y as f32, n.z as f32],
                color: MESH_COLOR,
            }
        })
        .collect();

    let indices = mesh
        .faces
        .iter()
        .flat_map(|f| [f[0] as u32, f[1] as u32, f[2] as u32])
        .collect();

    (vertices, indices)
}
