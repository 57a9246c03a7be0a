//! First-person camera
//!
//! Position/target/up camera with a pending movement intent and look delta.
//! The motion controller consumes both once per frame.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec2, Vec3, Mat4, Mat4Ext, utils};
use crate::physics::Ray;

/// Requested movement for the current frame, in view-relative units
///
/// `forward` runs along the view direction, `strafe` along the right vector
/// (positive is rightward). Speeds are multiplied by the controller's move
/// speed and the frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementIntent {
    /// Forward (+) / backward (-) component
    pub forward: f32,
    /// Right (+) / left (-) component
    pub strafe: f32,
}

/// 3D perspective camera
///
/// Uses a right-handed Y-up view space looking down -Z, OpenGL clip depth.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Movement requested for the next update
    pub intent: MovementIntent,

    /// Look delta (screen units) waiting to be applied
    pub look_delta: Vec2,
}

impl Camera {
    /// Create a perspective camera at `position` looking at `target`
    pub fn perspective(position: Vec3, target: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target,
            up: Vec3::y(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
            intent: MovementIntent::default(),
            look_delta: Vec2::zeros(),
        }
    }

    /// Set the aspect ratio after a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Normalized view direction
    ///
    /// Falls back to -Z when position and target coincide.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| -Vec3::z())
    }

    /// Normalized `forward x up`
    ///
    /// Falls back to +X when looking straight along `up`.
    pub fn right(&self) -> Vec3 {
        self.forward()
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::x)
    }

    /// Shift position and target together
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.target += offset;
    }

    /// Integrate the movement intent: forward first, then strafe
    pub fn integrate(&mut self, intent: MovementIntent, speed: f32, dt: f32) {
        let forward = self.forward();
        self.translate(forward * (intent.forward * speed * dt));

        let right = forward.cross(&self.up).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::x);
        self.translate(right * (intent.strafe * speed * dt));
    }

    /// Apply and clear the pending look delta
    ///
    /// `dy` pitches about the right vector, `dx` yaws about `up`, both in
    /// radians after scaling by `sensitivity`. The target keeps its distance.
    pub fn apply_look(&mut self, sensitivity: f32) {
        let delta = std::mem::take(&mut self.look_delta);
        if delta == Vec2::zeros() {
            return;
        }

        let distance = (self.target - self.position).magnitude();
        let rotation = Mat4::rotation_axis(&self.right(), delta.y * sensitivity)
            * Mat4::rotation_axis(&self.up, delta.x * sensitivity);
        let direction = utils::transform_vector(&rotation, &self.forward());

        self.target = self.position + direction * distance;
    }

    /// Ray from the camera along the view direction
    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }

    /// Get view matrix (world-to-camera transform)
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Get projection matrix (OpenGL clip depth)
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Get combined projection * view matrix
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 0.0, -1.5), Vec3::new(0.0, 0.0, -2.5), 90.0, 16.0 / 9.0, 0.1, 200.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants;
    use approx::assert_relative_eq;

    fn looking_down_negative_z() -> Camera {
        Camera::perspective(Vec3::zeros(), Vec3::new(0.0, 0.0, -1.0), 90.0, 1.0, 0.1, 100.0)
    }

    #[test]
    fn test_basis_vectors() {
        let camera = looking_down_negative_z();
        assert_relative_eq!(camera.forward(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(camera.right(), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_integrate_moves_target_with_position() {
        let mut camera = looking_down_negative_z();
        camera.integrate(MovementIntent { forward: 2.0, strafe: 1.5 }, 5.0, 0.1);

        assert_relative_eq!(camera.position, Vec3::new(0.75, 0.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(camera.target - camera.position, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_look_yaws_left_and_resets() {
        let mut camera = looking_down_negative_z();
        camera.target = Vec3::new(0.0, 0.0, -3.0);
        camera.look_delta = Vec2::new(250.0, 0.0);

        // 250 * pi * 0.002 = pi / 2: a quarter turn toward -X
        camera.apply_look(constants::PI * 0.002);
        assert_relative_eq!(camera.target, Vec3::new(-3.0, 0.0, 0.0), epsilon = 1e-4);
        assert_eq!(camera.look_delta, Vec2::zeros());
    }

    #[test]
    fn test_look_pitches_up() {
        let mut camera = looking_down_negative_z();
        camera.look_delta = Vec2::new(0.0, 250.0);
        camera.apply_look(constants::PI * 0.002);
        assert_relative_eq!(camera.forward(), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_camera_has_fallback_axes() {
        let mut camera = looking_down_negative_z();
        camera.target = camera.position;
        assert_eq!(camera.forward(), -Vec3::z());

        camera.target = Vec3::new(0.0, 5.0, 0.0);
        assert_eq!(camera.right(), Vec3::x());
    }

    #[test]
    fn test_view_matrix_maps_target_ahead() {
        let camera = looking_down_negative_z();
        let view_target = utils::transform_point(&camera.get_view_matrix(), &camera.target);
        assert_relative_eq!(view_target, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_aim_ray_follows_view() {
        let mut camera = looking_down_negative_z();
        camera.target = Vec3::new(4.0, 0.0, 0.0);
        let ray = camera.aim_ray();
        assert_eq!(ray.origin, camera.position);
        assert_relative_eq!(ray.direction, Vec3::x(), epsilon = 1e-6);
    }
}
