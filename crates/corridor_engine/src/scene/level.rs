//! Level arena, level descriptions and level construction
//!
//! The [`Scene`] owns every object in a slotmap arena and keeps two ordered
//! id lists: render-only static objects and collidable objects. List order is
//! authoring order and is the iteration order for every query.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::assets::{AssetError, AssetKind, MeshData, MeshRole, MeshSource};
use crate::config::Config;
use crate::foundation::math::{Vec3, Mat4};
use crate::physics::TriangleStore;
use super::bounds::BoundingVolume;
use super::links::LinkTable;
use super::object::{Collider, ObjectId, Renderable, SceneObject};
use super::placement::Placement;

/// Level construction errors
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    /// A prefab mesh could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The description places nothing
    #[error("Level description contains no placements")]
    EmptyLevel,
}

/// Object arena plus the static and collidable lists
#[derive(Debug, Clone)]
pub struct Scene {
    objects: SlotMap<ObjectId, SceneObject>,
    static_nodes: Vec<ObjectId>,
    collidable_nodes: Vec<ObjectId>,
    links: LinkTable,
    world_matrix: Mat4,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with an identity world matrix
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            static_nodes: Vec::new(),
            collidable_nodes: Vec::new(),
            links: LinkTable::new(),
            world_matrix: Mat4::identity(),
        }
    }

    /// Add a render-only object at the end of the static list
    pub fn add_static(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.static_nodes.push(id);
        id
    }

    /// Add an object at the end of the collidable list
    pub fn add_collidable(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.collidable_nodes.push(id);
        id
    }

    /// Look up a live object
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Look up a live object mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// True while `id` refers to a live object
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Render-only objects in authoring order
    pub fn static_nodes(&self) -> &[ObjectId] {
        &self.static_nodes
    }

    /// Collidable objects in authoring order
    pub fn collidable_nodes(&self) -> &[ObjectId] {
        &self.collidable_nodes
    }

    /// Collidable objects with their ids, in list order
    pub fn collidables(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.collidable_nodes
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Render-only objects with their ids, in list order
    pub fn statics(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> + '_ {
        self.static_nodes
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|object| (id, object)))
    }

    /// Object links
    pub fn links(&self) -> &LinkTable {
        &self.links
    }

    /// Object links, mutable
    pub fn links_mut(&mut self) -> &mut LinkTable {
        &mut self.links
    }

    /// Scene-wide world matrix applied before every model matrix
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when no objects are alive
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Copy every authoritative model matrix into its applied snapshot
    pub fn snapshot_transforms(&mut self) {
        for object in self.objects.values_mut() {
            object.renderable.snapshot();
        }
    }

    /// Remove an object from the arena, both lists and the link table
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let object = self.objects.remove(id)?;
        self.static_nodes.retain(|&other| other != id);
        self.collidable_nodes.retain(|&other| other != id);
        self.links.remove(id);
        Some(object)
    }

    /// Move an object to `position`; the applied matrix follows at the next snapshot
    pub fn relocate(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.renderable.relocate(position);
                true
            }
            None => false,
        }
    }

    /// Mutable access to the arena for per-frame passes over both lists
    pub(crate) fn parts_mut(&mut self) -> (&[ObjectId], &[ObjectId], &mut SlotMap<ObjectId, SceneObject>) {
        (&self.static_nodes, &self.collidable_nodes, &mut self.objects)
    }
}

/// One prefab placement in a level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementEntry {
    /// Prefab to place
    pub kind: AssetKind,
    /// World-space position
    pub position: Vec3,
    /// Euler rotation in degrees
    #[serde(default = "PlacementEntry::zero_rotation")]
    pub rotation_deg: Vec3,
    /// Per-axis scale
    #[serde(default = "PlacementEntry::unit_scale")]
    pub scale: Vec3,
    /// Placements sharing a group are linked
    #[serde(default)]
    pub group: Option<String>,
}

impl PlacementEntry {
    /// Entry at a position with default rotation, scale and no group
    pub fn new(kind: AssetKind, position: Vec3) -> Self {
        Self {
            kind,
            position,
            rotation_deg: Self::zero_rotation(),
            scale: Self::unit_scale(),
            group: None,
        }
    }

    /// Builder pattern: Set rotation (degrees)
    pub fn with_rotation_deg(mut self, rotation_deg: Vec3) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder pattern: Set group
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The placement this entry describes
    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            rotation_deg: self.rotation_deg,
            scale: self.scale,
        }
    }

    fn zero_rotation() -> Vec3 {
        Vec3::zeros()
    }

    fn unit_scale() -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }
}

/// Serialized level layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    /// Level name for logging
    #[serde(default)]
    pub name: String,
    /// Placements in authoring order
    pub placements: Vec<PlacementEntry>,
}

impl Config for LevelDescription {}

impl LevelDescription {
    /// Description with the given placements
    pub fn new(name: impl Into<String>, placements: Vec<PlacementEntry>) -> Self {
        Self {
            name: name.into(),
            placements,
        }
    }
}

/// Builds a [`Scene`] from a description and a mesh source
pub struct LevelBuilder<'a, S: MeshSource + ?Sized> {
    source: &'a S,
}

impl<'a, S: MeshSource + ?Sized> LevelBuilder<'a, S> {
    /// Builder reading meshes from `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Place every entry in order
    ///
    /// Prefabs with a visual twin add the visual object to the static list
    /// and the hull to the collidable list, linked. Curves add only a hull,
    /// drawn as opaque geometry. Any asset failure aborts the build.
    pub fn build(&self, description: &LevelDescription) -> Result<Scene, LevelError> {
        if description.placements.is_empty() {
            return Err(LevelError::EmptyLevel);
        }

        let mut scene = Scene::new();
        let mut groups: HashMap<&str, Vec<ObjectId>> = HashMap::new();

        for entry in &description.placements {
            let placement = entry.placement();
            let mut placed = Vec::with_capacity(2);

            if entry.kind.has_visual_twin() {
                let mesh = self.source.load(entry.kind, MeshRole::Visual)?;
                let object = Self::visual_object(entry.kind, &mesh, placement)?;
                placed.push(scene.add_static(object));
            }

            let mesh = self.source.load(entry.kind, MeshRole::Hull)?;
            let mut object = Self::hull_object(entry.kind, &mesh, placement)?;
            object.renderable.opaque_hull = !entry.kind.has_visual_twin();
            placed.push(scene.add_collidable(object));

            scene.links_mut().link_group(&placed);
            if let Some(group) = entry.group.as_deref() {
                groups.entry(group).or_default().extend(placed);
            }
        }

        for members in groups.values() {
            scene.links_mut().link_group(members);
        }

        log::info!(
            "Level '{}' built: {} static objects, {} collidable objects, {} linked",
            description.name,
            scene.static_nodes().len(),
            scene.collidable_nodes().len(),
            scene.links().len()
        );

        Ok(scene)
    }

    fn visual_object(kind: AssetKind, mesh: &MeshData, placement: Placement) -> Result<SceneObject, AssetError> {
        check_stream(kind, mesh)?;
        Ok(SceneObject {
            kind,
            renderable: Renderable::new(placement, BoundingVolume::from_vertices(&mesh.vertices), mesh.parts.clone()),
            collider: None,
        })
    }

    fn hull_object(kind: AssetKind, mesh: &MeshData, placement: Placement) -> Result<SceneObject, AssetError> {
        let store = TriangleStore::from_vertex_stream(&mesh.vertices)
            .map_err(|err| AssetError::MalformedVertexStream { kind, len: err.len })?;
        Ok(SceneObject {
            kind,
            renderable: Renderable::new(placement, BoundingVolume::from_vertices(&mesh.vertices), mesh.parts.clone()),
            collider: Some(Collider {
                store,
                layers: kind.collision_layers(),
            }),
        })
    }
}

fn check_stream(kind: AssetKind, mesh: &MeshData) -> Result<(), AssetError> {
    if mesh.vertices.len() % 3 != 0 {
        return Err(AssetError::MalformedVertexStream {
            kind,
            len: mesh.vertices.len(),
        });
    }
    Ok(())
}
