//! Triangle-soup collision mesh
//!
//! Triangles are stored in MODEL SPACE and never modified. Rays are brought
//! into model space for the per-triangle test, hit points are carried back out
//! so distances are always compared in world space.

use crate::foundation::math::{Vec3, Mat4, utils};
use super::primitives::{RayHit, RayQuery, Triangle};

/// Error for vertex streams that cannot be split into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("vertex stream of length {len} is not a multiple of 3")]
pub struct RaggedVertexStream {
    /// Offending stream length
    pub len: usize,
}

/// Ordered triangle list built from a flat vertex stream
///
/// Every 3 consecutive vertices form one triangle; triangle order is the
/// mesh authoring order and decides nearest-hit ties.
#[derive(Debug, Clone, Default)]
pub struct TriangleStore {
    triangles: Vec<Triangle>,
}

impl TriangleStore {
    /// Split a non-indexed vertex stream into triangles
    pub fn from_vertex_stream(vertices: &[Vec3]) -> Result<Self, RaggedVertexStream> {
        if vertices.len() % 3 != 0 {
            return Err(RaggedVertexStream { len: vertices.len() });
        }

        let triangles = vertices
            .chunks_exact(3)
            .map(|chunk| Triangle::new(chunk[0], chunk[1], chunk[2]))
            .collect();

        Ok(Self { triangles })
    }

    /// Build from already assembled triangles
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True when there is no geometry to hit
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Model-space triangles in authoring order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Nearest hit of `query` against this store
    ///
    /// `world_matrix * model_matrix` maps model space to world space; its
    /// inverse brings the ray into model space where the direction is
    /// re-normalized. A candidate wins when its world-space distance is
    /// `>= t_min` and strictly below the best so far (which starts at
    /// `t_max`), so the lowest triangle index keeps exact ties.
    ///
    /// Returns `None` for malformed queries, non-invertible transforms and
    /// misses; a miss is the same as a hit at [`RayQuery::miss_distance`].
    pub fn intersect_ray(&self, query: &RayQuery, world_matrix: &Mat4, model_matrix: &Mat4) -> Option<RayHit> {
        if query.is_malformed() {
            return None;
        }

        let model_to_world = world_matrix * model_matrix;
        let Some(world_to_model) = model_to_world.try_inverse() else {
            log::warn!("Skipping ray cast against a non-invertible transform");
            return None;
        };

        let origin_wcs = query.ray.origin;
        let origin_local = utils::transform_point(&world_to_model, &origin_wcs);
        let direction_local = utils::transform_vector(&world_to_model, &query.cast_direction())
            .try_normalize(f32::EPSILON)?;

        let mut closest = query.t_max;
        let mut best: Option<RayHit> = None;

        for (index, triangle) in self.triangles.iter().enumerate() {
            let Some((_t, u, v)) = triangle.intersect_ray(&origin_local, &direction_local) else {
                continue;
            };

            let point_local = triangle.barycentric_point(1.0 - u - v, u, v);
            let point_wcs = utils::transform_point(&model_to_world, &point_local);
            let distance = (point_wcs - origin_wcs).magnitude();

            if distance < closest && distance >= query.t_min {
                closest = distance;
                best = Some(RayHit {
                    distance,
                    primitive: index,
                    point: point_wcs,
                });
            }
        }

        if let Some(hit) = &best {
            log::trace!("Ray hit triangle {} at distance {:.3}", hit.primitive, hit.distance);
        }

        best
    }
}

/// Compute min/max of a vertex stream (model space)
///
/// Returns `None` for an empty stream.
pub fn vertex_extents(vertices: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let first = *vertices.first()?;
    Some(vertices.iter().fold((first, first), |(min, max), v| (min.inf(v), max.sup(v))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Quad spanning x,y in [-1, 1] on the plane z = `z`, two triangles
    fn quad_at_z(z: f32) -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
        ]
    }

    fn identity() -> Mat4 {
        Mat4::identity()
    }

    #[test]
    fn test_store_splits_stream_in_order() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(0.0)).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.triangles()[1].v2, Vec3::new(-1.0, 1.0, 0.0));
    }

    #[test]
    fn test_store_rejects_ragged_stream() {
        let mut vertices = quad_at_z(0.0);
        vertices.pop();
        assert_eq!(
            TriangleStore::from_vertex_stream(&vertices).unwrap_err(),
            RaggedVertexStream { len: 5 }
        );
    }

    #[test]
    fn test_inverted_range_never_hits() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(5.0)).unwrap();
        let query = RayQuery::new(Vec3::zeros(), Vec3::z()).with_range(10.0, 1.0);
        assert!(store.intersect_ray(&query, &identity(), &identity()).is_none());
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(5.0)).unwrap();
        let query = RayQuery::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0e-9));
        assert!(store.intersect_ray(&query, &identity(), &identity()).is_none());
    }

    #[test]
    fn test_single_triangle_analytic_distance() {
        let store = TriangleStore::from_vertex_stream(&[
            Vec3::new(-1.0, -1.0, 3.0),
            Vec3::new(1.0, -1.0, 3.0),
            Vec3::new(0.0, 1.0, 3.0),
        ])
        .unwrap();
        let origin = Vec3::new(0.0, 0.0, -1.0);
        let direction = Vec3::new(0.0, 0.1, 1.0);
        let hit = store
            .intersect_ray(&RayQuery::new(origin, direction), &identity(), &identity())
            .expect("ray crosses the triangle");

        // Plane z = 3 is reached after travelling 4 along z, 0.4 along y
        let expected = (0.4f32 * 0.4 + 4.0 * 4.0).sqrt();
        assert_relative_eq!(hit.distance, expected, epsilon = 1e-4);
        assert_eq!(hit.primitive, 0);
    }

    #[test]
    fn test_nearest_of_several_layers_wins() {
        let mut vertices = quad_at_z(9.0);
        vertices.extend(quad_at_z(4.0));
        vertices.extend(quad_at_z(6.0));
        let store = TriangleStore::from_vertex_stream(&vertices).unwrap();

        let hit = store
            .intersect_ray(&RayQuery::new(Vec3::new(0.2, -0.3, 0.0), Vec3::z()), &identity(), &identity())
            .unwrap();
        assert_relative_eq!(hit.distance, 4.0, epsilon = 1e-4);
        assert!(hit.primitive == 2 || hit.primitive == 3);
    }

    #[test]
    fn test_t_min_and_t_max_window() {
        let mut vertices = quad_at_z(4.0);
        vertices.extend(quad_at_z(6.0));
        let store = TriangleStore::from_vertex_stream(&vertices).unwrap();
        let origin = Vec3::new(0.2, -0.3, 0.0);

        let skip_near = RayQuery::new(origin, Vec3::z()).with_range(5.0, 100.0);
        let hit = store.intersect_ray(&skip_near, &identity(), &identity()).unwrap();
        assert_relative_eq!(hit.distance, 6.0, epsilon = 1e-4);

        let too_short = RayQuery::new(origin, Vec3::z()).with_max_distance(3.0);
        assert!(store.intersect_ray(&too_short, &identity(), &identity()).is_none());
    }

    #[test]
    fn test_exact_tie_keeps_lowest_index() {
        // Same quad twice: identical distances, first triangles must win
        let mut vertices = quad_at_z(5.0);
        vertices.extend(quad_at_z(5.0));
        let store = TriangleStore::from_vertex_stream(&vertices).unwrap();

        let hit = store
            .intersect_ray(&RayQuery::new(Vec3::new(0.5, -0.5, 0.0), Vec3::z()), &identity(), &identity())
            .unwrap();
        assert_eq!(hit.primitive, 0);
    }

    #[test]
    fn test_distance_is_measured_in_world_space() {
        // Unit quad at local z = 1, scaled by 5 and pushed 10 along z
        let store = TriangleStore::from_vertex_stream(&quad_at_z(1.0)).unwrap();
        let model = Mat4::new_translation(&Vec3::new(0.0, 0.0, 10.0)) * Mat4::new_scaling(5.0);

        let hit = store
            .intersect_ray(&RayQuery::new(Vec3::new(0.3, -0.2, 0.0), Vec3::z()), &identity(), &model)
            .unwrap();
        assert_relative_eq!(hit.distance, 15.0, epsilon = 1e-3);
        assert_relative_eq!(hit.point, Vec3::new(0.3, -0.2, 15.0), epsilon = 1e-3);
    }

    #[test]
    fn test_world_matrix_is_applied_before_model() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(0.0)).unwrap();
        let world = Mat4::new_translation(&Vec3::new(0.0, 0.0, 7.0));

        let hit = store
            .intersect_ray(&RayQuery::new(Vec3::new(0.3, -0.2, 0.0), Vec3::z()), &world, &identity())
            .unwrap();
        assert_relative_eq!(hit.distance, 7.0, epsilon = 1e-4);
    }

    #[test]
    fn test_singular_model_matrix_is_a_miss() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(5.0)).unwrap();
        let flat = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 1.0, 0.0));
        assert!(store
            .intersect_ray(&RayQuery::new(Vec3::zeros(), Vec3::z()), &identity(), &flat)
            .is_none());
    }

    #[test]
    fn test_repeat_cast_is_identical() {
        let store = TriangleStore::from_vertex_stream(&quad_at_z(5.0)).unwrap();
        let query = RayQuery::new(Vec3::new(0.1, 0.1, 0.0), Vec3::new(0.05, 0.0, 1.0));
        let first = store.intersect_ray(&query, &identity(), &identity());
        let second = store.intersect_ray(&query, &identity(), &identity());
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn test_vertex_extents() {
        assert!(vertex_extents(&[]).is_none());
        let (min, max) = vertex_extents(&quad_at_z(2.0)).unwrap();
        assert_eq!(min, Vec3::new(-1.0, -1.0, 2.0));
        assert_eq!(max, Vec3::new(1.0, 1.0, 2.0));
    }
}
