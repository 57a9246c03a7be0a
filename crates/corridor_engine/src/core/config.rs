//! # Engine Configuration
//!
//! Tuning for the camera, input mapping, motion/collision, shooting and
//! culling. Every section has defaults matching the shipped demo, so a
//! config file only needs to name what it changes.
//!
//! ## Configuration Categories
//!
//! - **Camera**: start pose and projection
//! - **Input**: intent values produced by movement keys and mouse look
//! - **Motion**: move speed, whisker fan and reaction bands
//! - **Shoot**: range, banish position and hit-flash timing
//! - **Culling**: frustum test switches

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::{Vec3, constants};
use crate::physics::WHISKER_MISS_DISTANCE;
use crate::render::Camera;
use crate::scene::FrustumCuller;
use crate::systems::bands::BandTable;

/// # Camera Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Start position
    pub position: Vec3,
    /// Start look-at point
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -1.5),
            target: Vec3::new(0.0, 0.0, -2.5),
            fov_degrees: 90.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

impl CameraConfig {
    /// Build the camera described by this section
    pub fn to_camera(&self) -> Camera {
        Camera::perspective(self.position, self.target, self.fov_degrees, self.aspect, self.near, self.far)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if (self.target - self.position).magnitude() <= f32::EPSILON {
            return Err("Camera target must differ from camera position".to_string());
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(format!("Field of view must be in (0, 180) degrees, got {}", self.fov_degrees));
        }
        if self.aspect <= 0.0 {
            return Err("Aspect ratio must be positive".to_string());
        }
        if self.near <= 0.0 || self.far <= self.near {
            return Err(format!("Clip planes must satisfy 0 < near < far, got {} / {}", self.near, self.far));
        }
        Ok(())
    }
}

/// # Input Configuration
///
/// Values written into the camera's movement intent while keys are held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Forward intent
    pub forward: f32,
    /// Backward intent (negative)
    pub backward: f32,
    /// Strafe intent magnitude
    pub strafe: f32,
    /// Multiplier on forward intent while zoom is held
    pub zoom_factor: f32,
    /// Multiplier on raw look deltas
    pub look_scale: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            forward: 2.0,
            backward: -1.25,
            strafe: 1.5,
            zoom_factor: 2.0,
            look_scale: 1.5,
        }
    }
}

impl InputConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.forward <= 0.0 || self.backward >= 0.0 || self.strafe <= 0.0 {
            return Err("Forward and strafe intents must be positive, backward negative".to_string());
        }
        if self.zoom_factor <= 0.0 {
            return Err("Zoom factor must be positive".to_string());
        }
        Ok(())
    }
}

/// # Motion Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// World units per second per unit of intent
    pub move_speed: f32,
    /// Radians per unit of look delta
    pub look_sensitivity: f32,
    /// Broad-phase radius and whisker reaction distance
    pub proximity_threshold: f32,
    /// Rays per whisker fan
    pub whisker_count: usize,
    /// Whisker reaction table
    pub bands: BandTable,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_sensitivity: constants::PI * 0.002,
            proximity_threshold: 17.0,
            whisker_count: 8,
            bands: BandTable::default(),
        }
    }
}

impl MotionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.move_speed <= 0.0 {
            return Err("Move speed must be positive".to_string());
        }
        if self.proximity_threshold <= 0.0 {
            return Err("Proximity threshold must be positive".to_string());
        }
        // Misses report the sentinel distance and must never trigger a band
        if self.proximity_threshold >= WHISKER_MISS_DISTANCE {
            return Err(format!(
                "Proximity threshold must be below the whisker miss distance ({WHISKER_MISS_DISTANCE})"
            ));
        }
        self.bands.validate(self.whisker_count)
    }
}

/// # Shoot Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootConfig {
    /// Targets whose center is farther than this are not tested
    pub range: f32,
    /// Where banished objects are sent
    pub banish_position: Vec3,
    /// Seconds the hit flash stays on after a hit
    pub hit_flash_duration: f32,
}

impl Default for ShootConfig {
    fn default() -> Self {
        Self {
            range: 60.0,
            banish_position: Vec3::new(0.0, -1000.0, 0.0),
            hit_flash_duration: 0.25,
        }
    }
}

impl ShootConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.range <= 0.0 {
            return Err("Shoot range must be positive".to_string());
        }
        if self.hit_flash_duration < 0.0 {
            return Err("Hit flash duration cannot be negative".to_string());
        }
        Ok(())
    }
}

/// # Culling Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Frustum-test static objects; when off everything is drawn
    pub enabled: bool,
    /// Also reject boxes outside the frustum's corner box
    pub corner_reject: bool,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            corner_reject: true,
        }
    }
}

impl CullingConfig {
    /// Culler for this configuration
    pub fn culler(&self) -> FrustumCuller {
        FrustumCuller::new(self.corner_reject)
    }
}

/// # Engine Configuration
///
/// Top-level configuration loaded from `.toml` or `.ron`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Camera start pose and projection
    pub camera: CameraConfig,
    /// Input mapping
    pub input: InputConfig,
    /// Motion and collision tuning
    pub motion: MotionConfig,
    /// Shooting
    pub shoot: ShootConfig,
    /// Frustum culling
    pub culling: CullingConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Set camera configuration
    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    /// Set input configuration
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    /// Set motion configuration
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set shoot configuration
    pub fn with_shoot(mut self, shoot: ShootConfig) -> Self {
        self.shoot = shoot;
        self
    }

    /// Set culling configuration
    pub fn with_culling(mut self, culling: CullingConfig) -> Self {
        self.culling = culling;
        self
    }

    /// Set the whisker count and rebuild the default quadrant bands for it
    pub fn with_whisker_count(mut self, count: usize) -> Self {
        self.motion.whisker_count = count;
        self.motion.bands = BandTable::quadrants(count);
        self
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.camera.validate()?;
        self.input.validate()?;
        self.motion.validate()?;
        self.shoot.validate()?;
        if self.shoot.range <= self.motion.proximity_threshold {
            return Err("Shoot range must be larger than the proximity threshold".to_string());
        }
        Ok(())
    }

    /// Load from file and validate
    pub fn load_validated(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = Self::load_from_file(path)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}
