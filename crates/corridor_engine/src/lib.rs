//! # Corridor Engine
//!
//! Collision, camera-motion and culling core for a first-person corridor
//! shooter built from reusable mesh prefabs.
//!
//! ## Features
//!
//! - **Triangle-Soup Ray Casting**: nearest-hit Möller-Trumbore against
//!   model-space collision hulls with world-space distances
//! - **Whisker Collision**: a fan of rays around the camera that zeroes
//!   movement toward nearby walls through a configurable band table
//! - **Shooting and Aim Hover**: single-ray target resolution with linked
//!   objects destroyed or banished together
//! - **Frustum Culling**: Gribb-Hartmann planes plus a frustum-corner box test
//! - **Config Files**: engine tuning and level layouts in TOML or RON
//!
//! Drawing is delegated to a [`render::RenderDriver`] supplied by the
//! application; the core issues no GPU calls.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use corridor_engine::prelude::*;
//!
//! struct NullDriver;
//!
//! impl RenderDriver for NullDriver {
//!     fn draw(&mut self, _frame: &FrameView<'_>) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let description = LevelDescription::load_from_file("assets/level.ron")?;
//!     let mut engine = Engine::from_description(EngineConfig::default(), &description, &PrefabLibrary::new())?;
//!
//!     engine.handle_event(InputEvent::MoveForward(true));
//!     engine.update(1.0 / 60.0);
//!     engine.render(&mut NullDriver);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

// Core engine modules
pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod physics;
pub mod scene;
pub mod render;
pub mod input;
pub mod systems;

mod engine;

pub use engine::{Engine, EngineError, FrameReport};

#[cfg(test)]
mod tests;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Engine, EngineError, FrameReport,
        assets::{AssetKind, MeshSource, PrefabLibrary},
        config::Config,
        core::EngineConfig,
        foundation::{
            math::{Vec2, Vec3, Mat4},
            time::{Timer, Stopwatch},
        },
        input::InputEvent,
        physics::{RayQuery, RayHit, TriangleStore},
        render::{Camera, DrawItem, FrameView, RenderDriver},
        scene::{LevelDescription, ObjectId, PlacementEntry, Scene},
        systems::ShotOutcome,
    };
}
