use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::analysis::AnalysisResult;
use crate::candidate::ValidatedImage;
use crate::config::BackendConfig;
use crate::error::BackendError;

/// Something that can classify a scan.
///
/// Called on a worker thread; may block. The controller validates the
/// returned confidence, so implementors need not.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(&self, image: &ValidatedImage) -> Result<AnalysisResult, BackendError>;
}

impl<F> AnalysisBackend for F
where
    F: Fn(&ValidatedImage) -> Result<AnalysisResult, BackendError> + Send + Sync,
{
    fn analyze(&self, image: &ValidatedImage) -> Result<AnalysisResult, BackendError> {
        self(image)
    }
}

/// Stand-in backend: waits, then returns a random canned answer.
pub struct SimulatedBackend {
    delay: Duration,
    results: Vec<AnalysisResult>,
    rng: Mutex<StdRng>,
}

impl SimulatedBackend {
    pub fn new(delay: Duration, results: Vec<AnalysisResult>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            delay,
            results,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_ms),
            config.results.clone(),
            config.seed,
        )
    }

    fn pick(&self) -> Option<AnalysisResult> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        self.results.choose(&mut *rng).cloned()
    }
}

impl AnalysisBackend for SimulatedBackend {
    fn analyze(&self, image: &ValidatedImage) -> Result<AnalysisResult, BackendError> {
        tracing::debug!(name = %image.name, delay_ms = self.delay.as_millis() as u64, "simulated analysis");
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.pick()
            .ok_or_else(|| BackendError::Unavailable("no canned results configured".into()))
    }
}
