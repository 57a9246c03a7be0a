//! Axis-aligned bounding volumes

use crate::foundation::math::{Vec3, Mat4, utils};
use crate::physics::collision::vertex_extents;

/// Axis-Aligned Bounding Box for culling and proximity queries
///
/// `min`/`max` are in MODEL SPACE and fixed once computed from the mesh.
/// `center` starts as the model-space midpoint and is re-projected into
/// world space every time the owning object's placement changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Minimum corner (model space)
    pub min: Vec3,
    /// Maximum corner (model space)
    pub max: Vec3,
    /// Center (world space once the object is placed)
    pub center: Vec3,
}

impl BoundingVolume {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min,
            max,
            center: Self::midpoint(&min, &max),
        }
    }

    /// Compute the box of a raw vertex stream
    ///
    /// An empty stream gives a degenerate box at the origin.
    pub fn from_vertices(vertices: &[Vec3]) -> Self {
        vertex_extents(vertices)
            .map_or_else(|| Self::new(Vec3::zeros(), Vec3::zeros()), |(min, max)| Self::new(min, max))
    }

    /// Model-space midpoint of min/max
    pub fn local_center(&self) -> Vec3 {
        Self::midpoint(&self.min, &self.max)
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight model-space corners
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Re-derive the world-space center from a model matrix
    pub fn update_center(&mut self, model_matrix: &Mat4) {
        self.center = utils::transform_point(model_matrix, &self.local_center());
    }

    fn midpoint(min: &Vec3, max: &Vec3) -> Vec3 {
        (min + max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_vertices() {
        let bounds = BoundingVolume::from_vertices(&[
            Vec3::new(1.0, -2.0, 0.0),
            Vec3::new(-1.0, 4.0, 2.0),
            Vec3::new(0.0, 0.0, -2.0),
        ]);
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 4.0, 2.0));
        assert_eq!(bounds.center, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(bounds.extents(), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_empty_stream_is_degenerate() {
        let bounds = BoundingVolume::from_vertices(&[]);
        assert_eq!(bounds.min, Vec3::zeros());
        assert_eq!(bounds.max, Vec3::zeros());
    }

    #[test]
    fn test_update_center_keeps_local_box() {
        let mut bounds = BoundingVolume::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        bounds.update_center(&Mat4::new_translation(&Vec3::new(10.0, 0.0, -5.0)));
        assert_relative_eq!(bounds.center, Vec3::new(11.0, 1.0, -4.0), epsilon = 1e-5);
        assert_eq!(bounds.min, Vec3::zeros());
        assert_eq!(bounds.local_center(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_corners_are_distinct() {
        let bounds = BoundingVolume::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let corners = bounds.corners();
        for (i, a) in corners.iter().enumerate() {
            for b in &corners[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
