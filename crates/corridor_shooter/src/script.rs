//! Scripted input for the headless demo
//!
//! Stands in for a window's event loop: each step fires one input event on a
//! given frame.

use corridor_engine::input::InputEvent;

/// One scripted event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    /// Frame on which the event is delivered, starting at 0
    pub frame: u64,
    /// Event to deliver
    pub event: InputEvent,
}

/// Ordered list of scripted events
#[derive(Debug, Clone, Default)]
pub struct InputScript {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl InputScript {
    /// Build a script; steps are sorted by frame, keeping insertion order for
    /// steps on the same frame
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|step| step.frame);
        Self { steps, cursor: 0 }
    }

    /// Walk forward, sweep the view, shoot whatever is ahead, then back off
    pub fn demo_tour() -> Self {
        let step = |frame, event| ScriptStep { frame, event };
        Self::new(vec![
            step(0, InputEvent::Shoot),
            step(10, InputEvent::MoveForward(true)),
            step(40, InputEvent::Zoom(true)),
            step(60, InputEvent::Zoom(false)),
            step(90, InputEvent::MoveForward(false)),
            step(100, InputEvent::Look(12.0, 0.0)),
            step(110, InputEvent::Look(-12.0, 0.0)),
            step(120, InputEvent::Shoot),
            step(130, InputEvent::StrafeLeft(true)),
            step(150, InputEvent::StrafeLeft(false)),
            step(160, InputEvent::MoveBackward(true)),
            step(200, InputEvent::MoveBackward(false)),
        ])
    }

    /// Events scheduled for `frame`
    ///
    /// Frames must be visited in increasing order; steps for frames already
    /// passed are dropped.
    pub fn events_for(&mut self, frame: u64) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while let Some(step) = self.steps.get(self.cursor) {
            if step.frame > frame {
                break;
            }
            if step.frame == frame {
                events.push(step.event);
            }
            self.cursor += 1;
        }
        events
    }

    /// Frame of the last scripted event
    pub fn last_frame(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.frame)
    }

    /// True once every step has been delivered
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_delivered_in_frame_order() {
        let mut script = InputScript::new(vec![
            ScriptStep { frame: 5, event: InputEvent::Shoot },
            ScriptStep { frame: 2, event: InputEvent::MoveForward(true) },
            ScriptStep { frame: 5, event: InputEvent::Zoom(true) },
        ]);
        assert_eq!(script.last_frame(), 5);

        assert!(script.events_for(0).is_empty());
        assert_eq!(script.events_for(2), vec![InputEvent::MoveForward(true)]);
        assert_eq!(script.events_for(5), vec![InputEvent::Shoot, InputEvent::Zoom(true)]);
        assert!(script.is_finished());
    }

    #[test]
    fn test_skipped_frames_drop_events() {
        let mut script = InputScript::new(vec![ScriptStep { frame: 1, event: InputEvent::Shoot }]);
        assert!(script.events_for(3).is_empty());
        assert!(script.is_finished());
    }

    #[test]
    fn test_demo_tour_starts_with_a_shot() {
        let mut script = InputScript::demo_tour();
        assert_eq!(script.events_for(0), vec![InputEvent::Shoot]);
        assert_eq!(script.last_frame(), 200);
    }
}
