//! Radial "whisker" proximity probe
//!
//! Casts a fan of rays around the vertical axis from one origin and reports
//! the hit distance per bearing. Index 0 is the base heading, index `i` is
//! rotated by `i * 360 / count` degrees about +Y, so with a -Z forward and
//! +Y up the fan sweeps forward, left, back, right.
//!
//! Cost is `count * triangles` per object, so callers filter candidates by a
//! cheap distance test first.

use crate::foundation::math::{Vec3, Mat4};
use super::collision::{RayQuery, TriangleStore};

/// Distance recorded for a whisker that hit nothing
///
/// Larger than any gameplay threshold, so "miss" and "nothing nearby" are
/// the same thing to the consumer.
pub const WHISKER_MISS_DISTANCE: f32 = 999.0;

/// Fan of rays sampling obstacle distance around an origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiskerProbe {
    /// Number of rays in the fan
    pub count: usize,
    /// Hits closer than this are ignored
    pub t_min: f32,
    /// Hits at or beyond this are ignored
    pub t_max: f32,
}

impl WhiskerProbe {
    /// Probe with `count` rays and an unbounded distance window
    pub fn new(count: usize) -> Self {
        Self {
            count,
            t_min: 0.0,
            t_max: RayQuery::DEFAULT_T_MAX,
        }
    }

    /// Bearing of ray `index` in degrees about the vertical axis
    pub fn bearing_deg(&self, index: usize) -> f32 {
        if self.count == 0 {
            return 0.0;
        }
        index as f32 * 360.0 / self.count as f32
    }

    /// Cast the fan against one object
    ///
    /// Returns exactly `count` distances ordered by ray index; misses are
    /// [`WHISKER_MISS_DISTANCE`].
    pub fn probe(
        &self,
        origin: Vec3,
        base_direction: Vec3,
        world_matrix: &Mat4,
        store: &TriangleStore,
        model_matrix: &Mat4,
    ) -> Vec<f32> {
        (0..self.count)
            .map(|index| {
                let query = RayQuery::new(origin, base_direction)
                    .with_range(self.t_min, self.t_max)
                    .with_angular_offset(0.0, self.bearing_deg(index));

                store
                    .intersect_ray(&query, world_matrix, model_matrix)
                    .map_or(WHISKER_MISS_DISTANCE, |hit| hit.distance)
            })
            .collect()
    }
}
