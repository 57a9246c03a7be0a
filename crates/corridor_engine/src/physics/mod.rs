//! Physics module for camera collision and aim rays
//!
//! Provides triangle-soup ray casting, collision layers for filtering which
//! objects block movement or can be shot, and the radial whisker probe used
//! to keep the camera off walls.

pub mod collision;
pub mod collision_layers;
pub mod whisker;

pub use collision::{Ray, RayHit, RayQuery, Triangle, TriangleStore};
pub use collision_layers::CollisionLayers;
pub use whisker::{WhiskerProbe, WHISKER_MISS_DISTANCE};
