//! Scene objects as composed capabilities
//!
//! Every object can be drawn ([`Renderable`]); collidable objects also carry
//! a [`Collider`]. There is no inheritance between "geometry" and
//! "collidable" nodes.

use slotmap::new_key_type;

use crate::assets::{AssetKind, MeshPart};
use crate::foundation::math::{Vec3, Mat4};
use crate::physics::{CollisionLayers, RayHit, RayQuery, TriangleStore};
use super::bounds::BoundingVolume;
use super::frustum::CullExtents;
use super::placement::Placement;

new_key_type! {
    /// Stable handle to a scene object
    ///
    /// Removing other objects never invalidates it; once its own object is
    /// removed the handle stays dead.
    pub struct ObjectId;
}

/// Drawable state of an object
#[derive(Debug, Clone)]
pub struct Renderable {
    /// Authoritative placement
    pub placement: Placement,
    /// Authoritative model matrix (changes only at placement or relocation)
    pub model_matrix: Mat4,
    /// Per-frame snapshot of `model_matrix` used by all queries and drawing
    pub applied_model_matrix: Mat4,
    /// Model-space box with world-space center
    pub bounds: BoundingVolume,
    /// Material ranges for the render driver
    pub parts: Vec<MeshPart>,
    /// Scratch written by the frustum culler
    pub cull_extents: Option<CullExtents>,
    /// Collidable drawn directly because it has no visual twin
    pub opaque_hull: bool,
}

impl Renderable {
    /// Place a mesh with the given box
    pub fn new(placement: Placement, bounds: BoundingVolume, parts: Vec<MeshPart>) -> Self {
        let mut renderable = Self {
            placement,
            model_matrix: Mat4::identity(),
            applied_model_matrix: Mat4::identity(),
            bounds,
            parts,
            cull_extents: None,
            opaque_hull: false,
        };
        renderable.apply_placement();
        renderable.applied_model_matrix = renderable.model_matrix;
        renderable
    }

    /// Recompose `model_matrix` from `placement` and re-derive the world center
    pub fn apply_placement(&mut self) {
        self.model_matrix = self.placement.to_matrix(&self.bounds.local_center());
        self.bounds.update_center(&self.model_matrix);
    }

    /// Move to a new world position, keeping rotation and scale
    pub fn relocate(&mut self, position: Vec3) {
        self.placement.position = position;
        self.apply_placement();
    }

    /// Copy the authoritative matrix into the per-frame snapshot
    pub fn snapshot(&mut self) {
        self.applied_model_matrix = self.model_matrix;
    }

    /// World-space bounding center
    pub fn world_center(&self) -> Vec3 {
        self.bounds.center
    }
}

/// Collision capability
#[derive(Debug, Clone)]
pub struct Collider {
    /// Model-space triangles
    pub store: TriangleStore,
    /// Layers this object is registered on
    pub layers: CollisionLayers,
}

/// Object in the level arena
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Prefab this object was built from
    pub kind: AssetKind,
    /// Drawable state
    pub renderable: Renderable,
    /// Present on collidable hulls only
    pub collider: Option<Collider>,
}

impl SceneObject {
    /// True when the object has a collider on any layer in `mask`
    pub fn collides_on(&self, mask: CollisionLayers) -> bool {
        self.collider
            .as_ref()
            .is_some_and(|collider| collider.layers.matches(mask))
    }

    /// Cast against this object's hull with its applied transform
    pub fn cast(&self, query: &RayQuery, world_matrix: &Mat4) -> Option<RayHit> {
        let collider = self.collider.as_ref()?;
        collider
            .store
            .intersect_ray(query, world_matrix, &self.renderable.applied_model_matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> BoundingVolume {
        BoundingVolume::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_new_places_center_in_world() {
        let renderable = Renderable::new(Placement::at(Vec3::new(0.0, 0.0, -20.0)), unit_box(), Vec::new());
        assert_relative_eq!(renderable.world_center(), Vec3::new(0.0, 0.0, -20.0), epsilon = 1e-5);
        assert_eq!(renderable.applied_model_matrix, renderable.model_matrix);
    }

    #[test]
    fn test_relocate_defers_applied_matrix_until_snapshot() {
        let mut renderable = Renderable::new(Placement::default(), unit_box(), Vec::new());
        renderable.relocate(Vec3::new(0.0, -1000.0, 0.0));

        assert_relative_eq!(renderable.world_center(), Vec3::new(0.0, -1000.0, 0.0), epsilon = 1e-3);
        assert_eq!(renderable.applied_model_matrix, Mat4::identity());

        renderable.snapshot();
        assert_eq!(renderable.applied_model_matrix, renderable.model_matrix);
    }

    #[test]
    fn test_render_only_object_does_not_collide() {
        let object = SceneObject {
            kind: AssetKind::Wall,
            renderable: Renderable::new(Placement::default(), unit_box(), Vec::new()),
            collider: None,
        };
        assert!(!object.collides_on(CollisionLayers::all()));
        assert!(object.cast(&RayQuery::new(Vec3::zeros(), Vec3::z()), &Mat4::identity()).is_none());
    }
}
