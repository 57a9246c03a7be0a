//! Rendering boundary
//!
//! The core issues no GPU calls. Each frame it assembles a [`FrameView`] with
//! the camera matrices and the objects to draw and hands it to a
//! [`RenderDriver`] supplied by the application.

pub mod camera;

pub use camera::{Camera, MovementIntent};

use crate::assets::{AssetKind, MeshPart};
use crate::foundation::math::{Vec3, Mat4};
use crate::scene::ObjectId;

/// One object to draw this frame
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    /// Object handle
    pub id: ObjectId,
    /// Prefab tag
    pub kind: AssetKind,
    /// `world * applied_model`
    pub world_matrix: Mat4,
    /// Material ranges
    pub parts: &'a [MeshPart],
    /// Drawn as visible geometry; otherwise the driver may draw it depth-only
    pub opaque: bool,
}

/// Everything a driver needs to draw one frame
#[derive(Debug, Clone)]
pub struct FrameView<'a> {
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Camera position (world space)
    pub camera_position: Vec3,
    /// Camera view direction
    pub camera_direction: Vec3,
    /// Seconds since the engine started
    pub continuous_time: f32,
    /// Frustum-visible render-only objects, list order
    pub static_items: Vec<DrawItem<'a>>,
    /// Every collidable object, list order
    pub collidable_items: Vec<DrawItem<'a>>,
    /// A shot landed recently enough to flash
    pub hit_flash: bool,
}

impl FrameView<'_> {
    /// Total number of draw items
    pub fn item_count(&self) -> usize {
        self.static_items.len() + self.collidable_items.len()
    }
}

/// External renderer fed by the engine once per frame
pub trait RenderDriver {
    /// Draw a frame
    fn draw(&mut self, frame: &FrameView<'_>);
}
