//! View-frustum culling
//!
//! Planes are extracted from a projection * view * model matrix, so the test
//! runs against the object's model-space box and never needs a world-space
//! AABB.

use crate::foundation::math::{Vec3, Vec4, Mat4, Point3};
use super::bounds::BoundingVolume;
use super::object::Renderable;

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Normal vector (normalized, pointing into the frustum)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Plane from `(a, b, c, d)` coefficients, normalized by `|(a, b, c)|`
    ///
    /// A zero-length normal leaves the coefficients untouched; such a plane
    /// rejects nothing.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length = normal.magnitude();
        if length <= f32::EPSILON {
            return Self::new(normal, coefficients.w);
        }
        Self::new(normal / length, coefficients.w / length)
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: &Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }
}

/// Frustum for visibility culling
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Six planes: left, right, bottom, top, near, far
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a clip matrix (Gribb-Hartmann)
    ///
    /// Assumes the OpenGL clip volume `-w <= x, y, z <= w`; the near plane is
    /// therefore `row3 + row2`.
    pub fn from_matrix(clip: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { clip.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(r3 + r2),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// True when every corner of `bounds` is behind a single plane
    pub fn excludes_box(&self, bounds: &BoundingVolume) -> bool {
        let corners = bounds.corners();
        self.planes
            .iter()
            .any(|plane| corners.iter().all(|corner| plane.distance_to_point(corner) < 0.0))
    }
}

/// Homogeneous copy of the model-space box used by the last cull test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullExtents {
    /// `(min, 1)`
    pub min: Vec4,
    /// `(max, 1)`
    pub max: Vec4,
}

impl CullExtents {
    /// Homogeneous extents of a bounding volume
    pub fn from_bounds(bounds: &BoundingVolume) -> Self {
        Self {
            min: bounds.min.push(1.0),
            max: bounds.max.push(1.0),
        }
    }
}

/// Frustum test for renderables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumCuller {
    /// Also reject boxes outside the frustum's own bounding box
    pub corner_reject: bool,
}

impl Default for FrustumCuller {
    fn default() -> Self {
        Self { corner_reject: true }
    }
}

impl FrustumCuller {
    /// Create a culler
    pub fn new(corner_reject: bool) -> Self {
        Self { corner_reject }
    }

    /// Visibility of a renderable under `pvm = projection * view * applied_model`
    ///
    /// Refreshes [`Renderable::cull_extents`]; the authoritative bounds are
    /// left untouched.
    pub fn is_visible(&self, pvm: &Mat4, renderable: &mut Renderable) -> bool {
        renderable.cull_extents = Some(CullExtents::from_bounds(&renderable.bounds));
        self.is_box_visible(pvm, &renderable.bounds)
    }

    /// Visibility of a model-space box under `pvm`
    pub fn is_box_visible(&self, pvm: &Mat4, bounds: &BoundingVolume) -> bool {
        if Frustum::from_matrix(pvm).excludes_box(bounds) {
            return false;
        }

        if self.corner_reject {
            if let Some((frustum_min, frustum_max)) = frustum_corner_extents(pvm) {
                let disjoint = (0..3).any(|axis| {
                    bounds.max[axis] < frustum_min[axis] || bounds.min[axis] > frustum_max[axis]
                });
                if disjoint {
                    return false;
                }
            }
        }

        true
    }
}

/// Model-space box around the eight frustum corners
///
/// `None` when `pvm` cannot be inverted.
fn frustum_corner_extents(pvm: &Mat4) -> Option<(Vec3, Vec3)> {
    let inverse = pvm.try_inverse()?;

    let mut min = Vec3::repeat(f32::INFINITY);
    let mut max = Vec3::repeat(f32::NEG_INFINITY);
    for i in 0..8 {
        let ndc = Point3::new(
            if i & 1 == 0 { -1.0 } else { 1.0 },
            if i & 2 == 0 { -1.0 } else { 1.0 },
            if i & 4 == 0 { -1.0 } else { 1.0 },
        );
        let corner = inverse.transform_point(&ndc).coords;
        min = min.inf(&corner);
        max = max.sup(&corner);
    }

    Some((min, max))
}
