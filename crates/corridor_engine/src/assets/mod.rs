//! Asset boundary
//!
//! The core never parses mesh files. It asks a [`MeshSource`] for the raw
//! vertex stream of a prefab and treats the material ranges as opaque data
//! for the render driver. [`PrefabLibrary`] is the built-in procedural source.

pub mod prefabs;

pub use prefabs::PrefabLibrary;

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;
use crate::physics::CollisionLayers;

/// Prefab catalog tag
///
/// Decides which meshes are loaded for a placement, which collision layers
/// the hull sits on and what happens when it is shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// Structural beam
    Beam,
    /// Wall-mounted cannon, destroyed when shot
    Cannon,
    /// Corridor junction
    CorridorFork,
    /// Straight corridor segment
    CorridorStraight,
    /// Corridor turning left
    CorridorLeft,
    /// Corridor turning right
    CorridorRight,
    /// Curved corridor (hull only, drawn from the collidable list)
    CorridorCurve,
    /// Iris door, sent out of the level when shot
    Iris,
    /// Pipe
    Pipe,
    /// Wall panel
    Wall,
}

impl AssetKind {
    /// Every prefab kind, in catalog order
    pub const ALL: [AssetKind; 10] = [
        AssetKind::Beam,
        AssetKind::Cannon,
        AssetKind::CorridorFork,
        AssetKind::CorridorStraight,
        AssetKind::CorridorLeft,
        AssetKind::CorridorRight,
        AssetKind::CorridorCurve,
        AssetKind::Iris,
        AssetKind::Pipe,
        AssetKind::Wall,
    ];

    /// Whether a placement also creates a render-only visual twin
    pub fn has_visual_twin(self) -> bool {
        self != AssetKind::CorridorCurve
    }

    /// Layers the collision hull is registered on
    pub fn collision_layers(self) -> CollisionLayers {
        match self {
            AssetKind::Cannon | AssetKind::Iris => CollisionLayers::TARGET | CollisionLayers::BLOCKING,
            _ => CollisionLayers::ENVIRONMENT | CollisionLayers::BLOCKING,
        }
    }

    /// What a successful shot does to this kind
    pub fn shot_effect(self) -> ShotEffect {
        match self {
            AssetKind::Cannon => ShotEffect::Destroy,
            AssetKind::Iris => ShotEffect::Banish,
            _ => ShotEffect::Ignore,
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Reaction of a prefab to being shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotEffect {
    /// Remove the object and everything linked to it
    Destroy,
    /// Move the object and everything linked to it out of the level
    Banish,
    /// Shots pass without effect
    Ignore,
}

/// Which mesh of a prefab to load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshRole {
    /// Detailed render mesh
    Visual,
    /// Simplified collision hull
    Hull,
}

/// Material range inside a vertex stream
///
/// Only the render driver interprets these; the core carries them along.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    /// First vertex of the range
    pub start_offset: u32,
    /// Number of vertices in the range
    pub count: u32,
    /// Diffuse color
    pub diffuse: Vec3,
    /// Material name for the driver's lookup
    pub material: String,
}

/// Raw mesh as delivered by a [`MeshSource`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Non-indexed positions, three per triangle
    pub vertices: Vec<Vec3>,
    /// Material ranges
    pub parts: Vec<MeshPart>,
}

/// Provider of prefab meshes
pub trait MeshSource {
    /// Load the mesh for a prefab kind and role
    fn load(&self, kind: AssetKind, role: MeshRole) -> Result<MeshData, AssetError>;
}

/// Asset loading errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The source has no mesh for this prefab
    #[error("No {role:?} mesh for prefab {kind}")]
    NotFound {
        /// Requested prefab
        kind: AssetKind,
        /// Requested mesh role
        role: MeshRole,
    },

    /// Vertex count does not split into triangles
    #[error("Mesh for prefab {kind} has {len} vertices, not a multiple of 3")]
    MalformedVertexStream {
        /// Offending prefab
        kind: AssetKind,
        /// Vertex stream length
        len: usize,
    },
}
