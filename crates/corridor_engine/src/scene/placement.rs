//! Object placement: move / rotate / scale composed into a model matrix

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Vec3, Mat4, Mat4Ext};

/// Authoritative placement of a scene object
///
/// Rotation is Euler degrees applied X, then Y, then Z and pivots around the
/// object's model-space bounding center. The composed matrix is
/// `T(position) * [T(c) * R * T(-c)] * S(scale)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// World-space translation
    pub position: Vec3,
    /// Euler rotation in degrees
    pub rotation_deg: Vec3,
    /// Per-axis scale factors (negative values mirror)
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation_deg: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Placement {
    /// Placement at a position with no rotation or scale
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder pattern: Set rotation (degrees)
    pub fn with_rotation_deg(mut self, rotation_deg: Vec3) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// Builder pattern: Set scale (non-uniform)
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Compose the model matrix, rotating about `pivot` (model space)
    pub fn to_matrix(&self, pivot: &Vec3) -> Mat4 {
        let rotation = Mat4::new_translation(pivot)
            * Mat4::rotation_euler_deg(&self.rotation_deg)
            * Mat4::new_translation(&-pivot);

        Mat4::new_translation(&self.position) * rotation * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::utils;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_identity() {
        assert_relative_eq!(Placement::default().to_matrix(&Vec3::new(3.0, 1.0, 2.0)), Mat4::identity());
    }

    #[test]
    fn test_rotation_pivots_on_center() {
        let pivot = Vec3::new(2.0, 0.0, 0.0);
        let matrix = Placement::default()
            .with_rotation_deg(Vec3::new(0.0, 180.0, 0.0))
            .to_matrix(&pivot);

        // The pivot itself does not move; a point one unit past it swings around
        assert_relative_eq!(utils::transform_point(&matrix, &pivot), pivot, epsilon = 1e-5);
        assert_relative_eq!(
            utils::transform_point(&matrix, &Vec3::new(3.0, 0.0, 0.0)),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_scale_then_rotate_then_move() {
        let matrix = Placement::at(Vec3::new(0.0, 0.0, -10.0))
            .with_scale(Vec3::new(-1.0, 1.0, 1.0))
            .to_matrix(&Vec3::zeros());
        assert_relative_eq!(
            utils::transform_point(&matrix, &Vec3::new(1.0, 2.0, 0.0)),
            Vec3::new(-1.0, 2.0, -10.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_deserializes_partial_toml() {
        let placement: Placement = toml::from_str("position = [1.0, 2.0, 3.0]").unwrap();
        assert_eq!(placement.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(placement.scale, Vec3::new(1.0, 1.0, 1.0));
    }
}
