//! Corridor shooter demo
//!
//! Builds a level from the prefab library, then drives the engine with a
//! scripted input tour and a logging render driver. Configuration is read
//! from `assets/engine.toml` and `assets/level.ron` next to this crate's
//! manifest when present.

mod driver;
mod script;

use std::path::{Path, PathBuf};

use corridor_engine::{
    assets::{AssetKind, PrefabLibrary},
    config::{Config, ConfigError},
    core::EngineConfig,
    foundation::{
        logging,
        math::Vec3,
        time::{Stopwatch, Timer},
    },
    scene::{LevelDescription, PlacementEntry},
    systems::ShotOutcome,
    Engine, EngineError,
};
use thiserror::Error;

use driver::LoggingRenderDriver;
use script::InputScript;

const ENGINE_CONFIG_FILE: &str = "engine.toml";
const LEVEL_FILE: &str = "level.ron";

/// Simulated frame time
const FRAME_DT: f32 = 1.0 / 60.0;

/// Frames simulated after the last scripted event
const SETTLE_FRAMES: u64 = 30;

#[derive(Error, Debug)]
enum ShooterError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// `assets/<file>` under this crate, independent of the working directory
fn asset_path(file: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(file)
}

fn load_engine_config() -> Result<EngineConfig, ShooterError> {
    let path = asset_path(ENGINE_CONFIG_FILE);
    if path.exists() {
        log::info!("Loading engine configuration from {}", path.display());
        Ok(EngineConfig::load_validated(&path)?)
    } else {
        log::warn!("{} not found, using default engine configuration", path.display());
        Ok(EngineConfig::default())
    }
}

fn load_level() -> Result<LevelDescription, ShooterError> {
    let path = asset_path(LEVEL_FILE);
    if path.exists() {
        log::info!("Loading level from {}", path.display());
        Ok(LevelDescription::load_from_file(&path)?)
    } else {
        log::warn!("{} not found, using the built-in level", path.display());
        Ok(builtin_level())
    }
}

/// Straight run ending in a fork, with a cannon and a gated iris
///
/// Props stay off the camera's path and out of the whisker plane so the
/// tour can walk the corridor; the gate stops it until it is shot open.
fn builtin_level() -> LevelDescription {
    LevelDescription::new(
        "builtin",
        vec![
            PlacementEntry::new(AssetKind::CorridorStraight, Vec3::new(0.0, 0.0, -18.5)),
            PlacementEntry::new(AssetKind::CorridorStraight, Vec3::new(0.0, 0.0, -58.5)),
            PlacementEntry::new(AssetKind::CorridorFork, Vec3::new(0.0, 0.0, -98.5)),
            PlacementEntry::new(AssetKind::Pipe, Vec3::new(5.0, 3.0, -20.0)),
            PlacementEntry::new(AssetKind::Pipe, Vec3::new(-5.0, 3.0, -20.0)),
            PlacementEntry::new(AssetKind::Cannon, Vec3::new(0.2, 0.1, -30.0)),
            PlacementEntry::new(AssetKind::Iris, Vec3::new(0.0, 0.0, -38.0)).with_group("gate"),
            PlacementEntry::new(AssetKind::Beam, Vec3::new(19.5, 0.0, -38.0)).with_group("gate"),
            PlacementEntry::new(AssetKind::Beam, Vec3::new(-19.5, 0.0, -38.0)).with_group("gate"),
        ],
    )
}

/// What a scripted tour did
#[derive(Debug, Clone, PartialEq)]
struct TourSummary {
    frames: u64,
    hits: usize,
    start: Vec3,
    end: Vec3,
    average_frame_millis: f32,
}

/// Replay `script` until its last event plus a short settle period
fn run_tour(engine: &mut Engine, script: &mut InputScript, driver: &mut LoggingRenderDriver) -> TourSummary {
    let start = engine.camera().position;
    let mut timer = Timer::new();
    let mut hits = 0usize;

    let last_frame = script.last_frame() + SETTLE_FRAMES;
    for frame in 0..=last_frame {
        timer.update();
        for event in script.events_for(frame) {
            log::debug!("Frame {}: {:?}", frame, event);
            engine.handle_event(event);
        }

        let report = engine.update(FRAME_DT);
        match &report.shot {
            Some(ShotOutcome::Miss) => log::info!("Frame {}: shot missed", frame),
            Some(outcome) => {
                hits += 1;
                log::info!("Frame {}: {:?}", frame, outcome);
            }
            None => {}
        }
        if report.motion.corrections > 0 {
            log::debug!(
                "Frame {}: {} whisker corrections, nearest {:?}",
                frame,
                report.motion.corrections,
                report.motion.nearest
            );
        }

        engine.render(driver);
    }

    if !script.is_finished() {
        log::warn!("Input script ended with undelivered events");
    }

    TourSummary {
        frames: last_frame + 1,
        hits,
        start,
        end: engine.camera().position,
        average_frame_millis: timer.average_frame_millis(),
    }
}

fn run() -> Result<(), ShooterError> {
    let config = load_engine_config()?;
    let level = load_level()?;
    let library = PrefabLibrary::new();

    let build_time = Stopwatch::start_new();
    let mut engine = Engine::from_description(config, &level, &library)?;
    log::info!(
        "Level '{}' ready in {:.2}ms ({} objects)",
        level.name,
        build_time.elapsed_millis(),
        engine.scene().len()
    );

    let mut script = InputScript::demo_tour();
    let mut driver = LoggingRenderDriver::new(30);
    let summary = run_tour(&mut engine, &mut script, &mut driver);

    log::info!(
        "Simulated {} frames ({:.3}s of game time), {:.3}ms per frame",
        summary.frames,
        engine.continuous_time(),
        summary.average_frame_millis
    );
    log::info!(
        "{} hits, {} flash frames, {} draw items, {} objects left",
        summary.hits,
        driver.flash_frames(),
        driver.items(),
        engine.scene().len()
    );
    log::info!("Camera moved from {:?} to {:?}", summary.start, summary.end);
    debug_assert_eq!(driver.frames(), engine.frame_count());

    Ok(())
}

fn main() {
    logging::init("info");
    log::info!("Starting corridor shooter demo");

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }

    log::info!("Corridor shooter demo finished successfully");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_moves_camera_and_opens_gate() {
        let mut engine = Engine::from_description(EngineConfig::default(), &builtin_level(), &PrefabLibrary::new())
            .unwrap();
        let mut driver = LoggingRenderDriver::new(1000);

        let summary = run_tour(&mut engine, &mut InputScript::demo_tour(), &mut driver);

        assert_eq!(summary.hits, 2);
        assert_eq!(driver.frames(), summary.frames);
        // Walked about 16.7 units forward, strafed 2.5 left, backed off about 4.2
        assert!(summary.end.z < summary.start.z - 10.0, "camera ended at {:?}", summary.end);
        assert!(summary.end.x < -2.0, "camera ended at {:?}", summary.end);
        assert!(summary.end.z > -20.0, "camera ended at {:?}", summary.end);
    }

    #[test]
    fn test_shipped_assets_load() {
        let config = load_engine_config().unwrap();
        assert_eq!(config.motion.proximity_threshold, 17.0);
        assert_eq!(config.shoot.range, 60.0);

        let level = load_level().unwrap();
        assert_eq!(level.name, "opening_run");
        assert!(Engine::from_description(config, &level, &PrefabLibrary::new()).is_ok());
    }
}
