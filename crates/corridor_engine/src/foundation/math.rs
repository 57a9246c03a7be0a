//! Math utilities and types
//!
//! Provides fundamental math types for the collision and camera code. All
//! matrices follow the OpenGL clip convention (right-handed view space,
//! clip depth in `[-w, w]`), which is what the frustum extraction expects.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::*;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Transform a position by a 4x4 matrix (w = 1, with perspective divide)
    pub fn transform_point(matrix: &Mat4, point: &Vec3) -> Vec3 {
        matrix.transform_point(&Point3::from(*point)).coords
    }

    /// Transform a direction by a 4x4 matrix (w = 0, translation ignored)
    pub fn transform_vector(matrix: &Mat4, vector: &Vec3) -> Vec3 {
        matrix.transform_vector(vector)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary axis (axis need not be normalized)
    fn rotation_axis(axis: &Vec3, angle: f32) -> Mat4;

    /// Euler rotation in degrees, applied X first, then Y, then Z (`Rz * Ry * Rx`)
    fn rotation_euler_deg(degrees: &Vec3) -> Mat4;

    /// Create a perspective projection matrix (OpenGL depth range)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn rotation_axis(axis: &Vec3, angle: f32) -> Mat4 {
        match Unit::try_new(*axis, f32::EPSILON) {
            Some(unit) => Mat4::from_axis_angle(&unit, angle),
            None => Mat4::identity(),
        }
    }

    fn rotation_euler_deg(degrees: &Vec3) -> Mat4 {
        Mat4::rotation_z(utils::deg_to_rad(degrees.z))
            * Mat4::rotation_y(utils::deg_to_rad(degrees.y))
            * Mat4::rotation_x(utils::deg_to_rad(degrees.x))
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_rotation_y_turns_forward_to_the_left() {
        // Looking down -Z with +Y up, a positive yaw swings toward -X (left)
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let rotated = utils::transform_vector(&Mat4::rotation_y(constants::PI * 0.5), &forward);
        assert_relative_eq!(rotated, Vec3::new(-1.0, 0.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_euler_order_is_x_then_y_then_z() {
        let degrees = Vec3::new(90.0, 90.0, 0.0);
        let expected = Mat4::rotation_y(constants::PI * 0.5) * Mat4::rotation_x(constants::PI * 0.5);
        assert_relative_eq!(Mat4::rotation_euler_deg(&degrees), expected, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_axis_gives_identity() {
        assert_eq!(Mat4::rotation_axis(&Vec3::zeros(), 1.0), Mat4::identity());
    }

    #[test]
    fn test_transform_point_applies_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(
            utils::transform_point(&matrix, &Vec3::zeros()),
            Vec3::new(1.0, 2.0, 3.0),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            utils::transform_vector(&matrix, &Vec3::x()),
            Vec3::x(),
            epsilon = EPSILON
        );
    }
}
