//! Orbit camera for the island view.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Keeps the polar angle off the poles to avoid gimbal flip at the zenith.
pub const POLAR_EPSILON: f32 = 0.1;

/// Perspective camera orbiting a fixed look-at target.
///
/// Drag deltas move the eye on a sphere around the target; zoom moves it
/// along the eye-target axis. The camera re-aims at the target after every
/// update, so the view matrix is always a plain look-at.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Eye position.
    pub eye: Vec3,
    /// Fixed look-at target.
    pub target: Vec3,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Orbit sensitivity in radians per device pixel.
    pub rotation_speed: f32,
    /// Closest allowed eye distance to the target.
    pub min_distance: f32,
    /// Farthest allowed eye distance to the target.
    pub max_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(800.0, 600.0, 800.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 5000.0,
            aspect: 16.0 / 9.0,
            rotation_speed: 0.005,
            min_distance: 200.0,
            max_distance: 2000.0,
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Apply a pointer drag: convert pixel deltas to spherical deltas,
    /// clamp the polar angle into `[ε, π − ε]`, and recompute the eye.
    pub fn orbit(&mut self, delta: Vec2) {
        let offset = self.eye - self.target;
        let radius = offset.length();
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

        azimuth -= delta.x * self.rotation_speed;
        polar -= delta.y * self.rotation_speed;
        polar = polar.clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);

        let sin_polar = polar.sin();
        self.eye = self.target
            + Vec3::new(
                radius * sin_polar * azimuth.sin(),
                radius * polar.cos(),
                radius * sin_polar * azimuth.cos(),
            );
    }

    /// Apply a zoom request: change the orbit radius by `delta` world
    /// units, clamped to `[min_distance, max_distance]`.
    pub fn zoom(&mut self, delta: f32) {
        let offset = self.eye - self.target;
        let radius = (offset.length() + delta).clamp(self.min_distance, self.max_distance);
        self.eye = self.target + offset.normalize() * radius;
    }

    /// Current eye distance to the target.
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// Current polar angle in radians (0 = straight above the target).
    pub fn polar_angle(&self) -> f32 {
        let offset = self.eye - self.target;
        (offset.y / offset.length()).clamp(-1.0, 1.0).acos()
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Camera uniform data for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub position: [f32; 4], // w unused, padding
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            view: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 4],
        }
    }

    pub fn update(&mut self, camera: &OrbitCamera) {
        self.view = camera.view_matrix().to_cols_array_2d();
        self.view_proj = camera.view_projection_matrix().to_cols_array_2d();
        self.position = [camera.eye.x, camera.eye.y, camera.eye.z, 1.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The polar angle never leaves `[ε, π − ε]`, no matter how far the
    /// user drags.
    #[test]
    fn polar_angle_clamped_under_extreme_drags() {
        let mut camera = OrbitCamera::new();
        for _ in 0..500 {
            camera.orbit(Vec2::new(3.0, 40.0)); // hard upward drags
        }
        assert!(camera.polar_angle() >= POLAR_EPSILON - 1e-4);
        for _ in 0..1000 {
            camera.orbit(Vec2::new(-5.0, -40.0)); // hard downward drags
        }
        assert!(camera.polar_angle() <= std::f32::consts::PI - POLAR_EPSILON + 1e-4);
    }

    /// Orbiting never changes the distance to the target.
    #[test]
    fn orbit_preserves_radius() {
        let mut camera = OrbitCamera::new();
        let before = camera.distance();
        for i in 0..200 {
            camera.orbit(Vec2::new((i % 17) as f32 - 8.0, (i % 11) as f32 - 5.0));
        }
        assert!((camera.distance() - before).abs() < 0.5);
    }

    /// Zoom keeps the eye within `[min, max]` distance.
    #[test]
    fn zoom_clamped_to_distance_range() {
        let mut camera = OrbitCamera::new();
        for _ in 0..100 {
            camera.zoom(-500.0);
        }
        assert!((camera.distance() - camera.min_distance).abs() < 1e-2);
        for _ in 0..100 {
            camera.zoom(500.0);
        }
        assert!((camera.distance() - camera.max_distance).abs() < 1e-2);
    }

    /// Zoom moves the eye along the eye-target axis only.
    #[test]
    fn zoom_keeps_direction() {
        let mut camera = OrbitCamera::new();
        let dir_before = (camera.eye - camera.target).normalize();
        camera.zoom(300.0);
        let dir_after = (camera.eye - camera.target).normalize();
        assert!((dir_before - dir_after).length() < 1e-5);
    }

    /// The view matrix always looks at the target: the target should land
    /// on the view-space -Z axis.
    #[test]
    fn view_matrix_centers_target() {
        let mut camera = OrbitCamera::new();
        camera.orbit(Vec2::new(120.0, -35.0));
        let v = camera.view_matrix().transform_point3(camera.target);
        assert!(v.x.abs() < 1e-3 && v.y.abs() < 1e-3);
        assert!(v.z < 0.0);
    }
}
