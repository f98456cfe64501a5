//! Scan session controller.
//!
//! Owns the single `ScanSession` and is the only code that mutates it. The
//! backend runs on a worker thread and reports back over a channel; every
//! report is tagged with the session generation that started it, so a
//! settlement for an image the user has since replaced or cleared is dropped
//! instead of overwriting the newer session.
//!
//! A session leaves `Processing` only when two signals have arrived for the
//! current generation: the backend settled, and the progress presenter
//! finished its animation. The second requirement can be turned off for
//! front ends without a presenter.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::analysis::AnalysisResult;
use crate::backend::{AnalysisBackend, SimulatedBackend};
use crate::candidate::{ImageCandidate, ValidatedImage};
use crate::config::ScannerConfig;
use crate::consts::ANALYSIS_ERROR_MESSAGE;
use crate::display::{format_byte_limit, Outcome, ResultSummary};
use crate::error::{BackendError, Result, ScanError};
use crate::notify::{Notification, NotificationSink};
use crate::preview::PreviewStore;
use crate::session::{ScanSession, SessionStatus};

/// Monotonic session counter. Advanced by every selection and every reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type BackendOutcome = std::result::Result<AnalysisResult, BackendError>;

/// A backend report, as sent from the worker thread.
#[derive(Debug)]
pub struct Settlement {
    pub generation: Generation,
    pub outcome: BackendOutcome,
}

/// What the controller did with an incoming signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    /// Accepted; the session is still waiting on the other signal, or was
    /// already resolved by it.
    Recorded,
    /// Accepted, and it moved the session to `Success` or `Error`.
    Resolved,
    /// Tagged with a generation that is no longer current. Ignored.
    Stale,
    /// Second signal of the same kind for the current generation. Ignored.
    Duplicate,
}

#[derive(Default)]
struct PendingAnalysis {
    outcome: Option<BackendOutcome>,
    presentation_complete: bool,
    resolved: bool,
}

pub struct ScanController {
    max_upload_bytes: u64,
    hold_for_presentation: bool,
    backend: Arc<dyn AnalysisBackend>,
    notifier: Arc<dyn NotificationSink>,
    previews: PreviewStore,
    session: ScanSession,
    generation: Generation,
    pending: PendingAnalysis,
    settled_tx: mpsc::Sender<Settlement>,
    settled_rx: mpsc::Receiver<Settlement>,
}

impl ScanController {
    pub fn new(
        config: &ScannerConfig,
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        let (settled_tx, settled_rx) = mpsc::channel();
        Self {
            max_upload_bytes: config.upload.max_bytes,
            hold_for_presentation: config.session.hold_for_presentation,
            backend,
            notifier,
            previews: PreviewStore::new(),
            session: ScanSession::default(),
            generation: Generation::default(),
            pending: PendingAnalysis::default(),
            settled_tx,
            settled_rx,
        }
    }

    /// Controller backed by the simulated backend described in `config`.
    pub fn simulated(config: &ScannerConfig, notifier: Arc<dyn NotificationSink>) -> Self {
        let backend = Arc::new(SimulatedBackend::from_config(&config.backend));
        Self::new(config, backend, notifier)
    }

    pub fn session(&self) -> &ScanSession {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    pub fn is_backend_settled(&self) -> bool {
        self.pending.outcome.is_some()
    }

    pub fn is_presentation_complete(&self) -> bool {
        self.pending.presentation_complete
    }

    /// Display summary of the current result, if the session succeeded.
    pub fn summary(&self) -> Option<ResultSummary> {
        self.session.result().map(ResultSummary::from_result)
    }

    /// Validate `candidate` and, if it passes, start a new analysis.
    ///
    /// On rejection the session is left exactly as it was and the sink is
    /// told why.
    pub fn select_image(&mut self, candidate: ImageCandidate) -> Result<Generation> {
        let image = match candidate.validate(self.max_upload_bytes) {
            Ok(image) => image,
            Err(e) => {
                tracing::info!(error = %e, "upload rejected");
                self.notify_rejection(&e);
                return Err(e);
            }
        };

        if self.session.status() == SessionStatus::Processing {
            tracing::debug!(superseded = %self.generation, "replacing in-flight analysis");
        }

        self.generation = self.generation.next();
        self.pending = PendingAnalysis::default();
        self.session.clear();
        let preview = self.previews.create(&image);
        self.session.begin(image.clone(), preview);

        tracing::info!(
            generation = %self.generation,
            name = %image.name,
            size = image.size,
            "analysis started"
        );
        self.dispatch(image, self.generation);
        Ok(self.generation)
    }

    /// Return to `Idle`, releasing the preview. No-op when already idle.
    pub fn reset(&mut self) {
        if self.session.is_idle() {
            return;
        }
        self.generation = self.generation.next();
        self.pending = PendingAnalysis::default();
        self.session.clear();
        tracing::info!(generation = %self.generation, "session reset");
    }

    /// Record a backend outcome for `generation`.
    pub fn on_backend_settled(
        &mut self,
        generation: Generation,
        outcome: BackendOutcome,
    ) -> Disposition {
        if generation != self.generation {
            tracing::debug!(%generation, current = %self.generation, "dropping stale settlement");
            return Disposition::Stale;
        }
        if self.pending.outcome.is_some() {
            tracing::warn!(%generation, "duplicate settlement ignored");
            return Disposition::Duplicate;
        }

        let outcome = outcome.and_then(|result| {
            result.validated().map_err(|e| {
                tracing::error!(%generation, error = %e, "backend violated confidence contract");
                BackendError::MalformedResponse(e.to_string())
            })
        });
        self.pending.outcome = Some(outcome);
        self.try_resolve()
    }

    /// Record that the progress presenter finished for `generation`.
    pub fn presentation_complete(&mut self, generation: Generation) -> Disposition {
        if generation != self.generation {
            return Disposition::Stale;
        }
        if self.pending.presentation_complete {
            return Disposition::Duplicate;
        }
        self.pending.presentation_complete = true;
        self.try_resolve()
    }

    /// Apply every settlement already waiting on the channel.
    pub fn poll(&mut self) -> Vec<Disposition> {
        let mut applied = Vec::new();
        while let Ok(settlement) = self.settled_rx.try_recv() {
            applied.push(self.on_backend_settled(settlement.generation, settlement.outcome));
        }
        applied
    }

    /// Block up to `timeout` for one settlement and apply it.
    pub fn process_next(&mut self, timeout: Duration) -> Option<Disposition> {
        let settlement = self.settled_rx.recv_timeout(timeout).ok()?;
        Some(self.on_backend_settled(settlement.generation, settlement.outcome))
    }

    /// Block until the current generation's backend call settles or
    /// `timeout` passes. Returns whether it settled.
    pub fn wait_for_backend(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.is_backend_settled() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || self.process_next(remaining).is_none() {
                break;
            }
        }
        self.is_backend_settled()
    }

    fn dispatch(&self, image: ValidatedImage, generation: Generation) {
        let backend = Arc::clone(&self.backend);
        let tx = self.settled_tx.clone();
        let spawned = std::thread::Builder::new()
            .name("tumorscan-analysis".into())
            .spawn(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| backend.analyze(&image)))
                    .unwrap_or_else(|_| Err(BackendError::WorkerLost("backend panicked".into())));
                let _ = tx.send(Settlement {
                    generation,
                    outcome,
                });
            });

        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn analysis worker");
            let _ = self.settled_tx.send(Settlement {
                generation,
                outcome: Err(BackendError::WorkerLost(e.to_string())),
            });
        }
    }

    fn try_resolve(&mut self) -> Disposition {
        if self.pending.resolved {
            return Disposition::Recorded;
        }
        if self.hold_for_presentation && !self.pending.presentation_complete {
            return Disposition::Recorded;
        }
        let Some(outcome) = self.pending.outcome.clone() else {
            return Disposition::Recorded;
        };

        match outcome {
            Ok(result) => {
                let outcome = Outcome::classify(&result.prediction);
                tracing::info!(
                    generation = %self.generation,
                    prediction = %result.prediction,
                    confidence = result.confidence,
                    "analysis complete"
                );
                let notification = if outcome.is_favorable() {
                    Notification::info("Analysis Complete", result.prediction.clone())
                } else {
                    Notification::destructive("Analysis Complete", result.prediction.clone())
                };
                self.session.succeed(result);
                self.notifier.notify(notification);
            }
            Err(e) => {
                tracing::warn!(generation = %self.generation, error = %e, "analysis failed");
                self.session.fail(ANALYSIS_ERROR_MESSAGE);
                self.notifier.notify(Notification::destructive(
                    "Analysis Failed",
                    "There was an error processing your image",
                ));
            }
        }
        self.pending.resolved = true;
        Disposition::Resolved
    }

    fn notify_rejection(&self, error: &ScanError) {
        let notification = match error {
            ScanError::InvalidType { .. } => Notification::destructive(
                "Invalid file type",
                "Please upload an image file (JPG, PNG, etc.)",
            ),
            ScanError::TooLarge { limit, .. } => Notification::destructive(
                "File too large",
                format!(
                    "Please upload an image smaller than {}",
                    format_byte_limit(*limit)
                ),
            ),
            other => Notification::destructive("Upload failed", other.to_string()),
        };
        self.notifier.notify(notification);
    }
}
