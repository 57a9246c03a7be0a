//! Input mapping
//!
//! The windowing layer translates device events into [`InputEvent`]s;
//! [`InputState`] turns them into the camera's movement intent, a look delta
//! and a latched shoot trigger.

use crate::core::InputConfig;
use crate::foundation::math::Vec2;
use crate::render::Camera;

/// Device-independent input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Forward key pressed / released
    MoveForward(bool),
    /// Backward key pressed / released
    MoveBackward(bool),
    /// Strafe-left key pressed / released
    StrafeLeft(bool),
    /// Strafe-right key pressed / released
    StrafeRight(bool),
    /// Relative pointer motion (x right, y down)
    Look(f32, f32),
    /// Fire once
    Shoot,
    /// Zoom held / released
    Zoom(bool),
}

/// Held-key state plus the latched shoot trigger
#[derive(Debug, Clone, Default)]
pub struct InputState {
    config: InputConfig,
    forward_held: bool,
    backward_held: bool,
    zoom_held: bool,
    shoot_latched: bool,
}

impl InputState {
    /// Create an input state using `config` intents
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Apply one event to the camera and the trigger latch
    ///
    /// Like a keyboard, a press writes its value into the intent and a release
    /// zeroes the component, so the most recent key on an axis wins. Look
    /// deltas are inverted (pointer right turns left as a positive yaw) and
    /// accumulate until the motion controller consumes them.
    pub fn handle_event(&mut self, event: InputEvent, camera: &mut Camera) {
        match event {
            InputEvent::MoveForward(pressed) => {
                self.forward_held = pressed;
                camera.intent.forward = if pressed { self.forward_intent() } else { 0.0 };
            }
            InputEvent::MoveBackward(pressed) => {
                self.backward_held = pressed;
                camera.intent.forward = if pressed { self.config.backward } else { 0.0 };
            }
            InputEvent::StrafeLeft(pressed) => {
                camera.intent.strafe = if pressed { -self.config.strafe } else { 0.0 };
            }
            InputEvent::StrafeRight(pressed) => {
                camera.intent.strafe = if pressed { self.config.strafe } else { 0.0 };
            }
            InputEvent::Look(dx, dy) => {
                camera.look_delta += Vec2::new(-dx, -dy) * self.config.look_scale;
            }
            InputEvent::Shoot => {
                self.shoot_latched = true;
            }
            InputEvent::Zoom(held) => {
                self.zoom_held = held;
                if self.forward_held && !self.backward_held {
                    camera.intent.forward = self.forward_intent();
                }
            }
        }
    }

    /// Take the shoot trigger; true at most once per press
    pub fn take_shoot(&mut self) -> bool {
        std::mem::take(&mut self.shoot_latched)
    }

    /// True while a shot is waiting to be resolved
    pub fn shoot_pending(&self) -> bool {
        self.shoot_latched
    }

    fn forward_intent(&self) -> f32 {
        if self.zoom_held {
            self.config.forward * self.config.zoom_factor
        } else {
            self.config.forward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MovementIntent;

    fn setup() -> (InputState, Camera) {
        (InputState::new(InputConfig::default()), Camera::default())
    }

    #[test]
    fn test_key_intents() {
        let (mut input, mut camera) = setup();

        input.handle_event(InputEvent::MoveForward(true), &mut camera);
        input.handle_event(InputEvent::StrafeLeft(true), &mut camera);
        assert_eq!(camera.intent, MovementIntent { forward: 2.0, strafe: -1.5 });

        input.handle_event(InputEvent::MoveForward(false), &mut camera);
        input.handle_event(InputEvent::MoveBackward(true), &mut camera);
        input.handle_event(InputEvent::StrafeLeft(false), &mut camera);
        assert_eq!(camera.intent, MovementIntent { forward: -1.25, strafe: 0.0 });
    }

    #[test]
    fn test_zoom_scales_forward_only() {
        let (mut input, mut camera) = setup();
        input.handle_event(InputEvent::Zoom(true), &mut camera);
        input.handle_event(InputEvent::MoveForward(true), &mut camera);
        assert_eq!(camera.intent.forward, 4.0);

        input.handle_event(InputEvent::Zoom(false), &mut camera);
        assert_eq!(camera.intent.forward, 2.0);

        input.handle_event(InputEvent::MoveForward(false), &mut camera);
        input.handle_event(InputEvent::Zoom(true), &mut camera);
        assert_eq!(camera.intent.forward, 0.0);
    }

    #[test]
    fn test_shoot_is_consumed_once() {
        let (mut input, mut camera) = setup();
        input.handle_event(InputEvent::Shoot, &mut camera);
        input.handle_event(InputEvent::Shoot, &mut camera);
        assert!(input.shoot_pending());
        assert!(input.take_shoot());
        assert!(!input.take_shoot());
    }

    #[test]
    fn test_look_accumulates_inverted_and_scaled() {
        let (mut input, mut camera) = setup();
        input.handle_event(InputEvent::Look(2.0, -1.0), &mut camera);
        input.handle_event(InputEvent::Look(2.0, 0.0), &mut camera);
        assert_eq!(camera.look_delta, Vec2::new(-6.0, 1.5));
    }
}
