//! Core engine implementation
//!
//! Owns the scene, the camera and the per-frame systems. The application
//! feeds input events, calls [`Engine::update`] once per frame and then
//! [`Engine::render`] with its driver.

use thiserror::Error;

use crate::{
    assets::MeshSource,
    config::ConfigError,
    core::EngineConfig,
    foundation::math::Mat4,
    input::{InputEvent, InputState},
    render::{Camera, DrawItem, FrameView, RenderDriver},
    scene::{FrustumCuller, LevelBuilder, LevelDescription, LevelError, ObjectId, Scene, SceneObject},
    systems::{self, AimCursor, AimHover, MotionController, MotionReport, ShootResolver, ShotOutcome},
};

/// What happened during one [`Engine::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Camera motion summary
    pub motion: MotionReport,
    /// Outcome of a shot fired this frame
    pub shot: Option<ShotOutcome>,
    /// Object under the aim ray, if the cursor found one this frame
    pub hover: Option<AimHover>,
    /// Continuous time after this frame
    pub continuous_time: f32,
}

/// Main engine struct
///
/// Single-threaded and frame-stepped: all mutation happens inside
/// [`Engine::update`].
pub struct Engine {
    config: EngineConfig,
    scene: Scene,
    camera: Camera,
    input: InputState,
    motion: MotionController,
    shooter: ShootResolver,
    aim: AimCursor,
    culler: Option<FrustumCuller>,
    continuous_time: f32,
    frame_count: u64,
}

impl Engine {
    /// Create an engine around an already built scene
    pub fn new(config: EngineConfig, scene: Scene) -> Result<Self, EngineError> {
        config.validate().map_err(|e| EngineError::Config(ConfigError::Invalid(e)))?;
        log::info!(
            "Initializing engine: {} static, {} collidable objects",
            scene.static_nodes().len(),
            scene.collidable_nodes().len()
        );

        Ok(Self {
            camera: config.camera.to_camera(),
            input: InputState::new(config.input.clone()),
            motion: MotionController::new(config.motion.clone()),
            shooter: ShootResolver::new(config.shoot.clone()),
            aim: AimCursor::new(),
            culler: config.culling.enabled.then(|| config.culling.culler()),
            continuous_time: 0.0,
            frame_count: 0,
            config,
            scene,
        })
    }

    /// Build the level from a description, then create the engine
    pub fn from_description<S: MeshSource + ?Sized>(
        config: EngineConfig,
        description: &LevelDescription,
        source: &S,
    ) -> Result<Self, EngineError> {
        let scene = LevelBuilder::new(source).build(description)?;
        Self::new(config, scene)
    }

    /// Feed one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        self.input.handle_event(event, &mut self.camera);
    }

    /// Advance one frame
    ///
    /// Snapshot transforms, move the camera, resolve a pending shot, then
    /// test one collidable for aim hover.
    pub fn update(&mut self, dt: f32) -> FrameReport {
        self.frame_count += 1;
        self.scene.snapshot_transforms();

        let motion = self.motion.update(&mut self.camera, &self.scene, dt);

        let shot = if self.input.take_shoot() {
            Some(self.shooter.resolve(&mut self.scene, &self.camera, self.continuous_time))
        } else {
            None
        };

        let hover = self.aim.step(&self.scene, &self.camera);
        self.continuous_time += dt;

        FrameReport {
            frame: self.frame_count,
            motion,
            shot,
            hover,
            continuous_time: self.continuous_time,
        }
    }

    /// Cull and hand the frame to `driver`; returns the number of draw items
    pub fn render(&mut self, driver: &mut dyn RenderDriver) -> usize {
        let view = self.camera.get_view_matrix();
        let projection = self.camera.get_projection_matrix();
        let visible = systems::visible_statics(&mut self.scene, &(projection * view), self.culler.as_ref());

        let world = *self.scene.world_matrix();
        let static_items = visible
            .iter()
            .filter_map(|&id| self.scene.get(id).map(|object| draw_item(id, object, &world, true)))
            .collect();
        let collidable_items = self
            .scene
            .collidables()
            .map(|(id, object)| draw_item(id, object, &world, object.renderable.opaque_hull))
            .collect();

        let frame = FrameView {
            view,
            projection,
            camera_position: self.camera.position,
            camera_direction: self.camera.forward(),
            continuous_time: self.continuous_time,
            static_items,
            collidable_items,
            hit_flash: self.shooter.flash().is_active(self.continuous_time),
        };

        driver.draw(&frame);
        frame.item_count()
    }

    /// Level arena
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Level arena, mutable
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera, mutable
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seconds accumulated over all updates
    pub fn continuous_time(&self) -> f32 {
        self.continuous_time
    }

    /// Number of updates run
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

fn draw_item<'a>(id: ObjectId, object: &'a SceneObject, world: &Mat4, opaque: bool) -> DrawItem<'a> {
    DrawItem {
        id,
        kind: object.kind,
        world_matrix: world * object.renderable.applied_model_matrix,
        parts: &object.renderable.parts,
        opaque,
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Level could not be built
    #[error("Level error: {0}")]
    Level(#[from] LevelError),
}
