use std::time::{Duration, Instant};

use tumorscan_core::config::ProgressConfig;
use tumorscan_core::controller::Generation;
use tumorscan_core::progress::{CosmeticProgress, ProgressPhase, ProgressStage};

/// Wall-clock driver for the cosmetic progress of one selection.
pub struct PresentationClock {
    generation: Generation,
    progress: CosmeticProgress,
    last: Instant,
    signaled: bool,
}

impl PresentationClock {
    pub fn start(generation: Generation, config: &ProgressConfig) -> Self {
        Self {
            generation,
            progress: CosmeticProgress::new(config.clone()),
            last: Instant::now(),
            signaled: false,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Advance to `now`. Returns true exactly once, on the frame the
    /// hold finishes.
    pub fn tick(&mut self, now: Instant) -> bool {
        let phase = self.progress.advance(now.saturating_duration_since(self.last));
        self.last = now;
        if phase == ProgressPhase::Complete && !self.signaled {
            self.signaled = true;
            return true;
        }
        false
    }

    pub fn fraction(&self) -> f32 {
        self.progress.fraction() as f32
    }

    pub fn stage(&self) -> ProgressStage {
        self.progress.stage()
    }

    pub fn interval(&self) -> Duration {
        self.progress.tick()
    }
}
