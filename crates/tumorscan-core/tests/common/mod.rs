#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tumorscan_core::analysis::AnalysisResult;
use tumorscan_core::backend::AnalysisBackend;
use tumorscan_core::candidate::{ImageCandidate, ValidatedImage};
use tumorscan_core::config::ScannerConfig;
use tumorscan_core::controller::{BackendOutcome, ScanController};
use tumorscan_core::error::BackendError;
use tumorscan_core::notify::CollectingSink;

pub const MIB: u64 = 1024 * 1024;

/// Generous bound for worker threads in tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// Candidate with real (zeroed) bytes of the given length.
pub fn candidate(name: &str, mime: &str, size: usize) -> ImageCandidate {
    ImageCandidate::new(name, mime, vec![0u8; size])
}

pub fn jpeg(name: &str, size: usize) -> ImageCandidate {
    candidate(name, "image/jpeg", size)
}

pub fn png(name: &str, size: usize) -> ImageCandidate {
    candidate(name, "image/png", size)
}

pub fn result(prediction: &str, confidence: f32) -> AnalysisResult {
    AnalysisResult {
        prediction: prediction.to_string(),
        confidence,
    }
}

pub fn no_tumor() -> AnalysisResult {
    result("No Tumor Detected", 0.92)
}

/// Backend that answers every call with the same outcome.
pub fn fixed_backend(outcome: BackendOutcome) -> Arc<dyn AnalysisBackend> {
    Arc::new(move |_: &ValidatedImage| outcome.clone())
}

pub fn failing_backend() -> Arc<dyn AnalysisBackend> {
    fixed_backend(Err(BackendError::Unavailable("connection refused".into())))
}

/// Backend that counts calls before answering.
pub struct CountingBackend {
    pub calls: Mutex<usize>,
    pub outcome: BackendOutcome,
}

impl CountingBackend {
    pub fn new(outcome: BackendOutcome) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(0),
            outcome,
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl AnalysisBackend for CountingBackend {
    fn analyze(&self, _image: &ValidatedImage) -> Result<AnalysisResult, BackendError> {
        *self.calls.lock().unwrap() += 1;
        self.outcome.clone()
    }
}

/// Backend whose calls block until the test releases them, one gate per
/// image name.
pub struct GatedBackend {
    gates: Mutex<HashMap<String, mpsc::Receiver<BackendOutcome>>>,
}

impl GatedBackend {
    pub fn new(names: &[&str]) -> (Arc<Self>, HashMap<String, mpsc::Sender<BackendOutcome>>) {
        let mut gates = HashMap::new();
        let mut senders = HashMap::new();
        for name in names {
            let (tx, rx) = mpsc::channel();
            gates.insert(name.to_string(), rx);
            senders.insert(name.to_string(), tx);
        }
        (
            Arc::new(Self {
                gates: Mutex::new(gates),
            }),
            senders,
        )
    }
}

impl AnalysisBackend for GatedBackend {
    fn analyze(&self, image: &ValidatedImage) -> Result<AnalysisResult, BackendError> {
        let gate = self.gates.lock().unwrap().remove(&image.name);
        match gate {
            Some(rx) => rx
                .recv()
                .unwrap_or_else(|e| Err(BackendError::WorkerLost(e.to_string()))),
            None => Err(BackendError::Unavailable(format!("no gate for {}", image.name))),
        }
    }
}

pub fn test_config() -> ScannerConfig {
    let mut config = ScannerConfig::default();
    config.backend.delay_ms = 0;
    config
}

pub fn controller_with(backend: Arc<dyn AnalysisBackend>) -> (ScanController, Arc<CollectingSink>) {
    controller_with_config(&test_config(), backend)
}

pub fn controller_with_config(
    config: &ScannerConfig,
    backend: Arc<dyn AnalysisBackend>,
) -> (ScanController, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let controller = ScanController::new(config, backend, sink.clone());
    (controller, sink)
}

/// Drive a selection through backend settlement and presentation.
pub fn run_to_completion(controller: &mut ScanController) {
    assert!(controller.wait_for_backend(WAIT), "backend did not settle");
    let generation = controller.generation();
    controller.presentation_complete(generation);
}

pub fn assert_invariants(controller: &ScanController) {
    if let Err(violation) = controller.session().check_invariants() {
        panic!("session invariant violated: {violation}");
    }
}
