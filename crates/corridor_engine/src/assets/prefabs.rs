//! Procedural prefab meshes
//!
//! Box-built stand-ins for the authored corridor kit. Corridors are open
//! tubes along Z (40 units long, 40 wide, 8 high) so the camera can travel
//! through them; props are solid boxes.
//!
//! Side walls sit farther from the corridor axis than the default whisker
//! reaction distance, otherwise a camera on the axis could not move at all.

use std::collections::HashMap;

use crate::foundation::math::Vec3;
use super::{AssetError, AssetKind, MeshData, MeshPart, MeshRole, MeshSource};

const CORRIDOR_HALF_LENGTH: f32 = 20.0;
const CORRIDOR_HALF_WIDTH: f32 = 20.0;
const CORRIDOR_HALF_HEIGHT: f32 = 4.0;
const WALL_HALF_HEIGHT: f32 = 2.0;

/// In-memory [`MeshSource`] filled with procedural prefabs
#[derive(Debug, Clone)]
pub struct PrefabLibrary {
    meshes: HashMap<(AssetKind, MeshRole), MeshData>,
}

impl Default for PrefabLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefabLibrary {
    /// Library with a visual and a hull mesh for every prefab kind
    pub fn new() -> Self {
        let mut library = Self::empty();
        for kind in AssetKind::ALL {
            let vertices = prefab_vertices(kind);
            library.insert(kind, MeshRole::Hull, mesh_with_single_part(kind, MeshRole::Hull, vertices.clone()));
            if kind.has_visual_twin() {
                library.insert(kind, MeshRole::Visual, mesh_with_single_part(kind, MeshRole::Visual, vertices));
            }
        }
        library
    }

    /// Library with no meshes at all
    pub fn empty() -> Self {
        Self { meshes: HashMap::new() }
    }

    /// Register or replace a mesh
    pub fn insert(&mut self, kind: AssetKind, role: MeshRole, mesh: MeshData) {
        self.meshes.insert((kind, role), mesh);
    }

    /// Drop a mesh, returning it if present
    pub fn remove(&mut self, kind: AssetKind, role: MeshRole) -> Option<MeshData> {
        self.meshes.remove(&(kind, role))
    }

    /// Number of registered meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

impl MeshSource for PrefabLibrary {
    fn load(&self, kind: AssetKind, role: MeshRole) -> Result<MeshData, AssetError> {
        self.meshes
            .get(&(kind, role))
            .cloned()
            .ok_or(AssetError::NotFound { kind, role })
    }
}

fn mesh_with_single_part(kind: AssetKind, role: MeshRole, vertices: Vec<Vec3>) -> MeshData {
    let part = MeshPart {
        start_offset: 0,
        count: vertices.len() as u32,
        diffuse: prefab_color(kind),
        material: format!("{kind}_{role:?}").to_lowercase(),
    };
    MeshData {
        vertices,
        parts: vec![part],
    }
}

fn prefab_color(kind: AssetKind) -> Vec3 {
    match kind {
        AssetKind::Cannon => Vec3::new(0.8, 0.2, 0.1),
        AssetKind::Iris => Vec3::new(0.9, 0.7, 0.1),
        AssetKind::Pipe | AssetKind::Beam => Vec3::new(0.5, 0.5, 0.55),
        _ => Vec3::new(0.35, 0.38, 0.42),
    }
}

fn prefab_vertices(kind: AssetKind) -> Vec<Vec3> {
    let (w, h, l) = (CORRIDOR_HALF_WIDTH, CORRIDOR_HALF_HEIGHT, CORRIDOR_HALF_LENGTH);
    match kind {
        AssetKind::Beam => cuboid(Vec3::new(-0.25, -2.0, -0.25), Vec3::new(0.25, 2.0, 0.25)),
        AssetKind::Cannon => cuboid(Vec3::new(-0.5, -0.5, -1.0), Vec3::new(0.5, 0.5, 1.0)),
        AssetKind::Iris => cuboid(Vec3::new(-w, -h, -0.1), Vec3::new(w, h, 0.1)),
        AssetKind::Pipe => cuboid(Vec3::new(-0.3, -0.3, -3.0), Vec3::new(0.3, 0.3, 3.0)),
        AssetKind::Wall => cuboid(
            Vec3::new(-0.25, -WALL_HALF_HEIGHT, -3.0),
            Vec3::new(0.25, WALL_HALF_HEIGHT, 3.0),
        ),
        AssetKind::CorridorStraight | AssetKind::CorridorCurve => tube(true, true),
        AssetKind::CorridorLeft => tube(false, true),
        AssetKind::CorridorRight => tube(true, false),
        AssetKind::CorridorFork => {
            let mut vertices = tube(false, false);
            // Far wall closing the junction
            vertices.extend(quad(
                Vec3::new(-w, -h, -l),
                Vec3::new(2.0 * w, 0.0, 0.0),
                Vec3::new(0.0, 2.0 * h, 0.0),
            ));
            vertices
        }
    }
}

/// Open corridor along Z; each side wall can be left out for a turn-off
fn tube(left_wall: bool, right_wall: bool) -> Vec<Vec3> {
    let (w, h, l) = (CORRIDOR_HALF_WIDTH, CORRIDOR_HALF_HEIGHT, CORRIDOR_HALF_LENGTH);
    let along = Vec3::new(0.0, 0.0, 2.0 * l);
    let across = Vec3::new(2.0 * w, 0.0, 0.0);
    let up = Vec3::new(0.0, 2.0 * h, 0.0);

    let mut vertices = Vec::with_capacity(24);
    vertices.extend(quad(Vec3::new(-w, -h, -l), across, along));
    vertices.extend(quad(Vec3::new(-w, h, -l), across, along));
    if left_wall {
        vertices.extend(quad(Vec3::new(-w, -h, -l), up, along));
    }
    if right_wall {
        vertices.extend(quad(Vec3::new(w, -h, -l), up, along));
    }
    vertices
}

/// Closed box, two triangles per face
fn cuboid(min: Vec3, max: Vec3) -> Vec<Vec3> {
    let size = max - min;
    let dx = Vec3::new(size.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, size.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, size.z);

    let mut vertices = Vec::with_capacity(36);
    vertices.extend(quad(min, dx, dy));
    vertices.extend(quad(min + dz, dx, dy));
    vertices.extend(quad(min, dx, dz));
    vertices.extend(quad(min + dy, dx, dz));
    vertices.extend(quad(min, dy, dz));
    vertices.extend(quad(min + dx, dy, dz));
    vertices
}

fn quad(corner: Vec3, edge_a: Vec3, edge_b: Vec3) -> [Vec3; 6] {
    [
        corner,
        corner + edge_a,
        corner + edge_a + edge_b,
        corner,
        corner + edge_a + edge_b,
        corner + edge_b,
    ]
}
