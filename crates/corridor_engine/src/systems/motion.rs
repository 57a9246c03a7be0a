//! Camera motion with whisker-based wall avoidance
//!
//! Per frame: broad-phase the collidables by bounding-center distance, cast a
//! whisker fan against each survivor, let the band table zero any movement
//! component that points into a close obstacle, integrate, then apply the
//! pending look rotation.

use crate::core::MotionConfig;
use crate::physics::{CollisionLayers, WhiskerProbe};
use crate::render::Camera;
use crate::scene::Scene;

/// Summary of one motion update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionReport {
    /// Collidables that passed the broad phase
    pub candidates: usize,
    /// Band corrections applied to the intent
    pub corrections: usize,
    /// Closest whisker distance seen this frame
    pub nearest: Option<f32>,
}

/// Moves the camera while keeping it off blocking geometry
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
    probe: WhiskerProbe,
}

impl MotionController {
    /// Create a controller
    pub fn new(config: MotionConfig) -> Self {
        let probe = WhiskerProbe::new(config.whisker_count);
        Self { config, probe }
    }

    /// Active configuration
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Run one frame of camera motion
    ///
    /// Corrections apply to this frame's movement only; the camera's stored
    /// intent keeps reflecting the held keys.
    pub fn update(&self, camera: &mut Camera, scene: &Scene, dt: f32) -> MotionReport {
        let origin = camera.position;
        let forward = camera.forward();
        let threshold = self.config.proximity_threshold;
        let mut intent = camera.intent;
        let mut report = MotionReport::default();

        for (id, object) in scene.collidables() {
            if !object.collides_on(CollisionLayers::MOTION_MASK) {
                continue;
            }
            if (object.renderable.world_center() - origin).magnitude() > threshold {
                continue;
            }
            let Some(collider) = object.collider.as_ref() else {
                continue;
            };

            report.candidates += 1;
            let distances = self.probe.probe(
                origin,
                forward,
                scene.world_matrix(),
                &collider.store,
                &object.renderable.applied_model_matrix,
            );

            if let Some(closest) = distances.iter().copied().reduce(f32::min) {
                report.nearest = Some(report.nearest.map_or(closest, |n| n.min(closest)));
            }

            let fired = self.config.bands.apply(&distances, threshold, &mut intent);
            if fired > 0 {
                log::debug!("{} whisker corrections against {:?} ({:?})", fired, id, object.kind);
            }
            report.corrections += fired;
        }

        camera.integrate(intent, self.config.move_speed, dt);
        camera.apply_look(self.config.look_sensitivity);

        log::trace!(
            "Motion: {} candidates, {} corrections, camera at {:?}",
            report.candidates,
            report.corrections,
            camera.position
        );

        report
    }
}
