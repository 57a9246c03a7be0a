//! Per-frame systems
//!
//! Motion with whisker avoidance, shoot resolution, round-robin aim hover and
//! the frustum pass. Each runs inside [`crate::Engine::update`] or
//! [`crate::Engine::render`].

pub mod aim;
pub mod bands;
pub mod motion;
pub mod shoot;
pub mod visibility;

pub use aim::{AimCursor, AimHover};
pub use bands::{Band, BandTable, BlockedSign, MovementAxis};
pub use motion::{MotionController, MotionReport};
pub use shoot::{HitFlash, ShootResolver, ShotOutcome};
pub use visibility::visible_statics;
