//! Scene management
//!
//! Objects, their placement and bounds, the level arena with its static and
//! collidable lists, object links and frustum culling.

pub mod bounds;
pub mod frustum;
pub mod level;
pub mod links;
pub mod object;
pub mod placement;

pub use bounds::BoundingVolume;
pub use frustum::{CullExtents, Frustum, FrustumCuller, Plane};
pub use level::{LevelBuilder, LevelDescription, LevelError, PlacementEntry, Scene};
pub use links::LinkTable;
pub use object::{Collider, ObjectId, Renderable, SceneObject};
pub use placement::Placement;
