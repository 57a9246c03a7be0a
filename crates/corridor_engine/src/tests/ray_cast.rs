#[cfg(test)]
mod tests {
    use crate::foundation::math::{Mat4, Vec3};
    use crate::physics::{RayQuery, Triangle, TriangleStore};
    use approx::assert_relative_eq;

    fn facing_triangle() -> TriangleStore {
        TriangleStore::from_triangles(vec![Triangle::new(
            Vec3::new(-1.0, -1.0, 5.0),
            Vec3::new(1.0, -1.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        )])
    }

    #[test]
    fn test_wall_straight_ahead() {
        let query = RayQuery::new(Vec3::zeros(), Vec3::z()).with_max_distance(10.0);
        let hit = facing_triangle()
            .intersect_ray(&query, &Mat4::identity(), &Mat4::identity())
            .expect("triangle is in range");

        assert_relative_eq!(hit.distance, 5.0, epsilon = 1e-4);
        assert_eq!(hit.primitive, 0);
        assert_relative_eq!(hit.point, Vec3::new(0.0, 0.0, 5.0), epsilon = 1e-4);
    }

    #[test]
    fn test_wall_beyond_range() {
        let query = RayQuery::new(Vec3::zeros(), Vec3::z()).with_max_distance(4.0);
        assert!(facing_triangle()
            .intersect_ray(&query, &Mat4::identity(), &Mat4::identity())
            .is_none());
    }

    #[test]
    fn test_distance_is_measured_in_world_space() {
        // Doubling the model scale moves the triangle to z=10
        let model = Mat4::new_scaling(2.0);
        let query = RayQuery::new(Vec3::zeros(), Vec3::z()).with_max_distance(20.0);
        let hit = facing_triangle()
            .intersect_ray(&query, &Mat4::identity(), &model)
            .expect("scaled triangle is in range");

        assert_relative_eq!(hit.distance, 10.0, epsilon = 1e-4);
    }
}
