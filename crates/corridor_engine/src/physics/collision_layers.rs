//! Collision layer system for filtering collision queries
//!
//! Each collidable object sits on one or more layers; every query (camera
//! whiskers, aim ray, shoot ray) carries a mask of the layers it cares about.

use bitflags::bitflags;

bitflags! {
    /// Collision layer definitions using bitflags for efficient filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        /// Static level geometry (corridors, walls, pipes, beams)
        const ENVIRONMENT = 1 << 0;
        /// Things the player can shoot (cannons, iris doors)
        const TARGET = 1 << 1;
        /// Geometry that stops the camera
        const BLOCKING = 1 << 2;
    }
}

impl CollisionLayers {
    /// Layers the camera whiskers test against
    pub const MOTION_MASK: Self = Self::BLOCKING;

    /// Layers the shoot ray tests against
    pub const SHOOT_MASK: Self = Self::TARGET;

    /// Check if an object on `self` should be considered by a query with `mask`
    pub fn matches(self, mask: Self) -> bool {
        self.intersects(mask)
    }
}

impl Default for CollisionLayers {
    fn default() -> Self {
        Self::ENVIRONMENT | Self::BLOCKING
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_blocks_but_is_not_a_target() {
        let wall = CollisionLayers::default();
        assert!(wall.matches(CollisionLayers::MOTION_MASK));
        assert!(!wall.matches(CollisionLayers::SHOOT_MASK));
    }

    #[test]
    fn test_target_can_also_block() {
        let cannon = CollisionLayers::TARGET | CollisionLayers::BLOCKING;
        assert!(cannon.matches(CollisionLayers::MOTION_MASK));
        assert!(cannon.matches(CollisionLayers::SHOOT_MASK));
    }

    #[test]
    fn test_empty_layer_matches_nothing() {
        assert!(!CollisionLayers::empty().matches(CollisionLayers::all()));
    }
}
