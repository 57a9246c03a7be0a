//! Round-robin aim hover detection
//!
//! Testing the aim ray against every collidable each frame is wasteful, so a
//! cursor walks the collidable list and tests one object per frame.

use crate::assets::AssetKind;
use crate::physics::RayQuery;
use crate::render::Camera;
use crate::scene::{ObjectId, Scene};

/// Object under the aim ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimHover {
    /// Hovered object
    pub id: ObjectId,
    /// Its prefab
    pub kind: AssetKind,
    /// World distance to the hit
    pub distance: f32,
}

/// Position in the collidable list to test next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AimCursor {
    next: usize,
}

impl AimCursor {
    /// Cursor starting at the first collidable
    pub fn new() -> Self {
        Self::default()
    }

    /// Index that the next [`AimCursor::step`] will test
    pub fn position(&self) -> usize {
        self.next
    }

    /// Test one collidable and advance, wrapping at the end of the list
    ///
    /// When the list has shrunk below the cursor it restarts at zero.
    pub fn step(&mut self, scene: &Scene, camera: &Camera) -> Option<AimHover> {
        let nodes = scene.collidable_nodes();
        if nodes.is_empty() {
            self.next = 0;
            return None;
        }
        if self.next >= nodes.len() {
            self.next = 0;
        }

        let id = nodes[self.next];
        self.next = (self.next + 1) % nodes.len();

        let object = scene.get(id)?;
        let aim = camera.aim_ray();
        let query = RayQuery::new(aim.origin, aim.direction);
        let hit = object.cast(&query, scene.world_matrix()).filter(|hit| hit.distance > 0.0)?;

        match object.kind {
            AssetKind::Wall => log::debug!("Aiming at a wall ({:.2})", hit.distance),
            AssetKind::Beam => log::debug!("Aiming at a beam ({:.2})", hit.distance),
            kind => log::debug!("Aiming at {} ({:.2})", kind, hit.distance),
        }

        Some(AimHover {
            id,
            kind: object.kind,
            distance: hit.distance,
        })
    }
}
