//! Render driver that logs frames instead of drawing them

use corridor_engine::render::{FrameView, RenderDriver};

/// Counts and logs what each frame would draw
#[derive(Debug, Default)]
pub struct LoggingRenderDriver {
    frames: u64,
    items: usize,
    flash_frames: u64,
    /// Log every `log_every`-th frame at info; the rest go to trace
    log_every: u64,
}

impl LoggingRenderDriver {
    /// Driver that logs one frame in `log_every` at info level
    pub fn new(log_every: u64) -> Self {
        Self {
            log_every: log_every.max(1),
            ..Self::default()
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw items submitted over all frames
    pub fn items(&self) -> usize {
        self.items
    }

    /// Frames drawn with the hit flash on
    pub fn flash_frames(&self) -> u64 {
        self.flash_frames
    }
}

impl RenderDriver for LoggingRenderDriver {
    fn draw(&mut self, frame: &FrameView<'_>) {
        self.frames += 1;
        self.items += frame.item_count();
        if frame.hit_flash {
            self.flash_frames += 1;
        }

        let hulls = frame.collidable_items.iter().filter(|item| item.opaque).count();
        if self.frames % self.log_every == 0 {
            log::info!(
                "Frame {}: {} static, {} collidable ({} opaque hulls), camera {:?} facing {:?}{}",
                self.frames,
                frame.static_items.len(),
                frame.collidable_items.len(),
                hulls,
                frame.camera_position,
                frame.camera_direction,
                if frame.hit_flash { " [flash]" } else { "" }
            );
        } else {
            log::trace!("Frame {}: {} items", self.frames, frame.item_count());
        }
    }
}
