//! Orbit camera for the viewer
//!
//! The pipeline's data is 2.5D over the XY plane, so the camera is Z-up:
//! yaw rotates around the vertical Z axis, pitch tilts toward the horizon.

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

const MIN_RADIUS: f32 = 0.05;
const MAX_PITCH: f32 = 1.54; // just short of straight up/down

/// A Z-up orbit camera for viewing point clouds and meshes
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far).into_inner()
    }

    /// Frame the camera around an axis-aligned bounding box so the whole
    /// object is visible, looking down at it from the south-west.
    pub fn framing(min: Point3<f32>, max: Point3<f32>, aspect_ratio: f32) -> Self {
        let target = Point3::new(
            (min.x + max.x) / 2.0,
            (min.y + max.y) / 2.0,
            (min.z + max.z) / 2.0,
        );
        let radius = ((max - min).norm() * 1.2).max(1.0);

        Self {
            position: target + Vector3::new(-radius * 0.6, -radius * 0.6, radius * 0.55),
            target,
            up: Vector3::z(),
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio,
            near: (radius / 1000.0).max(1e-3),
            far: radius * 100.0,
        }
    }

    /// Rotate the camera around the target (yaw around Z, pitch clamped
    /// short of the poles).
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm().max(MIN_RADIUS);

        let horizontal = (offset.x * offset.x + offset.y * offset.y).sqrt();
        let mut yaw_angle = offset.y.atan2(offset.x) - yaw;
        let mut pitch_angle = offset.z.atan2(horizontal) + pitch;
        pitch_angle = pitch_angle.clamp(-MAX_PITCH, MAX_PITCH);
        yaw_angle %= std::f32::consts::TAU;

        let (sin_pitch, cos_pitch) = pitch_angle.sin_cos();
        let (sin_yaw, cos_yaw) = yaw_angle.sin_cos();

        self.position = self.target
            + Vector3::new(
                radius * cos_pitch * cos_yaw,
                radius * cos_pitch * sin_yaw,
                radius * sin_pitch,
            );
    }

    /// Slide target and position parallel to the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let screen_up = right.cross(&forward);

        let radius = (self.target - self.position).norm();
        let shift = (right * -dx + screen_up * dy) * radius;

        self.position += shift;
        self.target += shift;
    }

    /// Move toward (positive) or away from (negative) the target
    pub fn zoom(&mut self, amount: f32) {
        let offset = self.position - self.target;
        let radius = (offset.norm() * (1.0 - amount)).max(MIN_RADIUS);
        self.position = self.target + offset.normalize() * radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> OrbitCamera {
        OrbitCamera::framing(
            Point3::new(-1.0, -1.0, 0.0),
            Point3::new(1.0, 1.0, 2.0),
            16.0 / 9.0,
        )
    }

    #[test]
    fn test_framing_targets_center() {
        let cam = camera();
        assert_relative_eq!(cam.target, Point3::new(0.0, 0.0, 1.0));
        assert!((cam.position - cam.target).norm() > 1.0);
        assert!(cam.near > 0.0 && cam.far > cam.near);
    }

    #[test]
    fn test_orbit_preserves_radius_and_target() {
        let mut cam = camera();
        let target = cam.target;
        let radius = (cam.position - cam.target).norm();

        cam.orbit(0.7, -0.3);

        assert_relative_eq!(cam.target, target);
        assert_relative_eq!((cam.position - cam.target).norm(), radius, epsilon = 1e-4);
    }

    #[test]
    fn test_orbit_pitch_is_clamped() {
        let mut cam = camera();
        for _ in 0..100 {
            cam.orbit(0.0, 0.5);
        }
        // Never flips past the pole.
        let offset = cam.position - cam.target;
        let horizontal = (offset.x * offset.x + offset.y * offset.y).sqrt();
        assert!(horizontal > 0.0);
        assert!(offset.z.atan2(horizontal) <= MAX_PITCH + 1e-4);
    }

    #[test]
    fn test_zoom_keeps_minimum_distance() {
        let mut cam = camera();
        for _ in 0..200 {
            cam.zoom(0.5);
        }
        assert!((cam.position - cam.target).norm() >= MIN_RADIUS - 1e-6);
    }

    #[test]
    fn test_pan_moves_target_and_position_together() {
        let mut cam = camera();
        let before = cam.target - cam.position;
        cam.pan(0.1, -0.2);
        let after = cam.target - cam.position;
        assert_relative_eq!(before, after, epsilon = 1e-5);
    }
}
