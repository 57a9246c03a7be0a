//! Shoot resolution
//!
//! A shot is a single ray from the camera along its view direction, tested
//! against targets in collidable-list order. The first target hit takes the
//! shot; its linked objects are resolved before the scene is touched.

use crate::assets::{AssetKind, ShotEffect};
use crate::core::ShootConfig;
use crate::physics::{CollisionLayers, RayQuery};
use crate::render::Camera;
use crate::scene::{ObjectId, Scene};

/// Result of one shot
#[derive(Debug, Clone, PartialEq)]
pub enum ShotOutcome {
    /// No target in range was hit; nothing changed
    Miss,
    /// Target and linked objects removed from the level
    Destroyed {
        /// Object the ray hit
        target: ObjectId,
        /// Prefab of the hit object
        kind: AssetKind,
        /// Every removed object, target first
        removed: Vec<ObjectId>,
        /// World distance to the hit
        distance: f32,
    },
    /// Target and linked objects moved to the banish position
    Banished {
        /// Object the ray hit
        target: ObjectId,
        /// Prefab of the hit object
        kind: AssetKind,
        /// Every moved object, target first
        moved: Vec<ObjectId>,
        /// World distance to the hit
        distance: f32,
    },
}

impl ShotOutcome {
    /// True for anything but [`ShotOutcome::Miss`]
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Time of the last successful shot, for the hit-flash effect
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HitFlash {
    /// Continuous time of the last hit
    pub last_hit_time: Option<f32>,
    /// Seconds the flash stays on
    pub duration: f32,
}

impl HitFlash {
    /// True while `now` is within `duration` of the last hit
    pub fn is_active(&self, now: f32) -> bool {
        self.last_hit_time
            .is_some_and(|hit| now >= hit && now - hit < self.duration)
    }
}

/// Applies shots to the scene
#[derive(Debug, Clone)]
pub struct ShootResolver {
    config: ShootConfig,
    flash: HitFlash,
}

impl ShootResolver {
    /// Create a resolver
    pub fn new(config: ShootConfig) -> Self {
        let flash = HitFlash {
            last_hit_time: None,
            duration: config.hit_flash_duration,
        };
        Self { config, flash }
    }

    /// Hit-flash state
    pub fn flash(&self) -> &HitFlash {
        &self.flash
    }

    /// Fire from the camera at continuous time `now`
    pub fn resolve(&mut self, scene: &mut Scene, camera: &Camera, now: f32) -> ShotOutcome {
        let aim = camera.aim_ray();
        let query = RayQuery::new(aim.origin, aim.direction);

        let hit = scene.collidables().find_map(|(id, object)| {
            if !object.collides_on(CollisionLayers::SHOOT_MASK) || object.kind.shot_effect() == ShotEffect::Ignore {
                return None;
            }
            if (object.renderable.world_center() - camera.position).magnitude() > self.config.range {
                return None;
            }
            object
                .cast(&query, scene.world_matrix())
                .map(|hit| (id, object.kind, hit.distance))
        });

        let Some((target, kind, distance)) = hit else {
            log::debug!("Shot missed");
            return ShotOutcome::Miss;
        };

        let affected = scene.links().closure(target);

        match kind.shot_effect() {
            ShotEffect::Destroy => {
                self.flash.last_hit_time = Some(now);
                for &id in &affected {
                    scene.remove(id);
                }
                log::info!("Destroyed {} at {:.2} ({} objects removed)", kind, distance, affected.len());
                ShotOutcome::Destroyed {
                    target,
                    kind,
                    removed: affected,
                    distance,
                }
            }
            ShotEffect::Banish => {
                self.flash.last_hit_time = Some(now);
                for &id in &affected {
                    scene.relocate(id, self.config.banish_position);
                }
                log::info!("Opened {} at {:.2} ({} objects moved)", kind, distance, affected.len());
                ShotOutcome::Banished {
                    target,
                    kind,
                    moved: affected,
                    distance,
                }
            }
            ShotEffect::Ignore => ShotOutcome::Miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PrefabLibrary;
    use crate::foundation::math::Vec3;
    use crate::scene::{LevelBuilder, LevelDescription, PlacementEntry};
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.1, 0.2, 0.0), Vec3::new(0.1, 0.2, -1.0), 90.0, 1.0, 0.1, 200.0)
    }

    fn build(entries: Vec<PlacementEntry>) -> Scene {
        LevelBuilder::new(&PrefabLibrary::new())
            .build(&LevelDescription::new("shoot", entries))
            .unwrap()
    }

    #[test]
    fn test_iris_is_banished_with_its_twin() {
        let mut scene = build(vec![PlacementEntry::new(AssetKind::Iris, Vec3::new(0.0, 0.0, -10.0))]);
        let mut resolver = ShootResolver::new(ShootConfig::default());

        let outcome = resolver.resolve(&mut scene, &camera(), 3.0);
        let ShotOutcome::Banished { moved, distance, .. } = outcome else {
            panic!("expected the iris to be banished, got {outcome:?}");
        };
        assert_eq!(moved.len(), 2);
        assert_relative_eq!(distance, 9.9, epsilon = 1e-3);

        for id in moved {
            let center = scene.get(id).unwrap().renderable.world_center();
            assert_relative_eq!(center, Vec3::new(0.0, -1000.0, 0.0), epsilon = 1e-2);
        }
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_target_out_of_range_is_ignored() {
        let mut scene = build(vec![PlacementEntry::new(AssetKind::Cannon, Vec3::new(0.0, 0.0, -80.0))]);
        let mut resolver = ShootResolver::new(ShootConfig::default());

        assert_eq!(resolver.resolve(&mut scene, &camera(), 0.0), ShotOutcome::Miss);
        assert_eq!(scene.len(), 2);
        assert!(!resolver.flash().is_active(0.0));
    }

    #[test]
    fn test_list_order_beats_distance() {
        // The farther cannon was placed first, so it takes the shot
        let mut scene = build(vec![
            PlacementEntry::new(AssetKind::Cannon, Vec3::new(0.0, 0.0, -20.0)),
            PlacementEntry::new(AssetKind::Cannon, Vec3::new(0.0, 0.0, -10.0)),
        ]);
        let far_hull = scene.collidable_nodes()[0];
        let mut resolver = ShootResolver::new(ShootConfig::default());

        let outcome = resolver.resolve(&mut scene, &camera(), 0.0);
        assert!(matches!(outcome, ShotOutcome::Destroyed { target, .. } if target == far_hull));
        assert_eq!(scene.collidable_nodes().len(), 1);
    }

    #[test]
    fn test_shots_pass_through_environment() {
        let mut scene = build(vec![
            PlacementEntry::new(AssetKind::Wall, Vec3::new(0.0, 0.0, -5.0)).with_rotation_deg(Vec3::new(0.0, 90.0, 0.0)),
            PlacementEntry::new(AssetKind::Cannon, Vec3::new(0.0, 0.0, -10.0)),
        ]);
        let mut resolver = ShootResolver::new(ShootConfig::default());
        assert!(resolver.resolve(&mut scene, &camera(), 0.0).is_hit());
    }

    #[test]
    fn test_hit_flash_window() {
        let flash = HitFlash {
            last_hit_time: Some(2.0),
            duration: 0.25,
        };
        assert!(flash.is_active(2.0));
        assert!(flash.is_active(2.2));
        assert!(!flash.is_active(2.25));
        assert!(!flash.is_active(1.9));
        assert!(!HitFlash::default().is_active(0.0));
    }
}
