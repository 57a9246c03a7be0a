//! Primitive collision shapes and intersection algorithms
//!
//! Provides the ray and triangle primitives used by the triangle store, the
//! whisker probe and the aim/shoot rays.

use crate::foundation::math::{Vec3, Mat4, Mat4Ext, utils};

/// Below this length a direction is treated as "no direction at all"
pub const MIN_DIRECTION_LENGTH: f32 = f32::EPSILON;

/// A ray for ray casting
///
/// A zero direction stays zero so queries can reject it instead of producing
/// NaNs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (not required to be normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray, normalizing the direction when it has a usable length
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.try_normalize(MIN_DIRECTION_LENGTH).unwrap_or(direction);
        Self { origin, direction }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// True when the direction is too short to define a ray
    pub fn is_degenerate(&self) -> bool {
        self.direction.magnitude() < MIN_DIRECTION_LENGTH
    }
}

/// A ray cast request: ray, distance window and optional angular offset
///
/// `t_min`/`t_max` bound the accepted world-space hit distance. A result
/// without a hit corresponds to a distance of [`RayQuery::miss_distance`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    /// World-space ray
    pub ray: Ray,
    /// Hits closer than this are ignored
    pub t_min: f32,
    /// Hits at or beyond this are ignored
    pub t_max: f32,
    /// Degrees about the X axis applied to the direction before casting
    pub angle_x_deg: f32,
    /// Degrees about the Y (vertical) axis applied to the direction before casting
    pub angle_y_deg: f32,
}

impl RayQuery {
    /// Default far bound, large enough to never clip level geometry
    pub const DEFAULT_T_MAX: f32 = 1.0e15;

    /// Unbounded query along `direction` from `origin`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            ray: Ray { origin, direction },
            t_min: 0.0,
            t_max: Self::DEFAULT_T_MAX,
            angle_x_deg: 0.0,
            angle_y_deg: 0.0,
        }
    }

    /// Set the accepted distance window
    pub fn with_range(mut self, t_min: f32, t_max: f32) -> Self {
        self.t_min = t_min;
        self.t_max = t_max;
        self
    }

    /// Set the far bound only
    pub fn with_max_distance(mut self, t_max: f32) -> Self {
        self.t_max = t_max;
        self
    }

    /// Rotate the cast direction by fixed angles (degrees)
    pub fn with_angular_offset(mut self, angle_x_deg: f32, angle_y_deg: f32) -> Self {
        self.angle_x_deg = angle_x_deg;
        self.angle_y_deg = angle_y_deg;
        self
    }

    /// Distance reported when nothing is hit
    pub fn miss_distance(&self) -> f32 {
        self.t_max
    }

    /// Malformed queries never report a hit
    pub fn is_malformed(&self) -> bool {
        self.t_max < self.t_min || self.ray.is_degenerate()
    }

    /// World-space direction after the angular offset (`Rx * Ry * dir`)
    pub fn cast_direction(&self) -> Vec3 {
        if self.angle_x_deg == 0.0 && self.angle_y_deg == 0.0 {
            return self.ray.direction;
        }
        let rotation = Mat4::rotation_x(utils::deg_to_rad(self.angle_x_deg))
            * Mat4::rotation_y(utils::deg_to_rad(self.angle_y_deg));
        utils::transform_vector(&rotation, &self.ray.direction)
    }
}

/// Result of a successful ray cast against one object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space distance from the ray origin to the hit point
    pub distance: f32,
    /// Index of the triangle that was hit
    pub primitive: usize,
    /// World-space hit point
    pub point: Vec3,
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Point from barycentric weights `(w0, w1, w2)`
    pub fn barycentric_point(&self, w0: f32, w1: f32, w2: f32) -> Vec3 {
        self.v0 * w0 + self.v1 * w1 + self.v2 * w2
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    ///
    /// Both faces are hit; `t` is parametric along `direction`. The hit point
    /// is `(1 - u - v) * v0 + u * v1 + v * v2`.
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, origin: &Vec3, direction: &Vec3) -> Option<(f32, f32, f32)> {
        const EPSILON: f32 = 0.000001;  // Very small value for numerical stability

        // Calculate edges from v0
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        // Calculate determinant
        let h = direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = origin - self.v0;
        let u = f * s.dot(&h);

        // Hit outside triangle on u axis?
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * direction.dot(&q);

        // Hit outside triangle on v axis?
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        // Calculate t (distance along ray)
        let t = f * edge2.dot(&q);

        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None // Behind ray origin
        }
    }
}
