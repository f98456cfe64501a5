//! Cosmetic progress model.
//!
//! The bar fills at a fixed pace regardless of how long the backend takes,
//! then stays full for a hold period before signaling completion. The model
//! is a pure function of accumulated time; front ends feed it elapsed time
//! from whatever clock they have.

use std::time::Duration;

use crate::config::ProgressConfig;

/// Caption shown under the bar, chosen by fill fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressStage {
    Preparing,
    Detecting,
    Modeling,
    Completing,
}

impl ProgressStage {
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction < 0.3 {
            Self::Preparing
        } else if fraction < 0.6 {
            Self::Detecting
        } else if fraction < 0.9 {
            Self::Modeling
        } else {
            Self::Completing
        }
    }
}

impl std::fmt::Display for ProgressStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preparing => write!(f, "Preparing scan for analysis..."),
            Self::Detecting => write!(f, "Detecting tissue anomalies..."),
            Self::Modeling => write!(f, "Applying deep learning models..."),
            Self::Completing => write!(f, "Completing analysis..."),
        }
    }
}

/// Where the animation is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProgressPhase {
    Filling { fraction: f64 },
    Holding,
    Complete,
}

#[derive(Clone, Debug)]
pub struct CosmeticProgress {
    config: ProgressConfig,
    elapsed: Duration,
}

impl CosmeticProgress {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            elapsed: Duration::ZERO,
        }
    }

    /// Add `dt` of wall time and return the new phase.
    pub fn advance(&mut self, dt: Duration) -> ProgressPhase {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.phase()
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Interval between visible updates.
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms.max(1))
    }

    /// Ticks needed to reach a full bar.
    fn ticks_to_full(&self) -> u64 {
        if self.config.step <= 0.0 {
            return 1;
        }
        // The epsilon keeps 1/0.01 from rounding up to 101 ticks.
        (((1.0 / self.config.step) - 1e-9).ceil() as u64).max(1)
    }

    fn ticks_elapsed(&self) -> u64 {
        (self.elapsed.as_millis() / self.tick().as_millis()) as u64
    }

    /// Time at which the bar first shows full.
    pub fn full_at(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms.max(1).saturating_mul(self.ticks_to_full()))
    }

    /// Fill time plus hold: when completion is signaled.
    pub fn nominal_duration(&self) -> Duration {
        self.full_at()
            .saturating_add(Duration::from_millis(self.config.hold_ms))
    }

    pub fn fraction(&self) -> f64 {
        let ticks = self.ticks_elapsed();
        if ticks >= self.ticks_to_full() {
            1.0
        } else {
            (ticks as f64 * self.config.step).min(1.0)
        }
    }

    pub fn phase(&self) -> ProgressPhase {
        if self.elapsed >= self.nominal_duration() {
            ProgressPhase::Complete
        } else if self.elapsed >= self.full_at() {
            ProgressPhase::Holding
        } else {
            ProgressPhase::Filling {
                fraction: self.fraction(),
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase() == ProgressPhase::Complete
    }

    pub fn stage(&self) -> ProgressStage {
        ProgressStage::from_fraction(self.fraction())
    }
}
