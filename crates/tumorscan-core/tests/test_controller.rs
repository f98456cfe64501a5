mod common;

use std::sync::Arc;

use common::*;
use tumorscan_core::analysis::AnalysisResult;
use tumorscan_core::backend::AnalysisBackend;
use tumorscan_core::candidate::ValidatedImage;
use tumorscan_core::consts::ANALYSIS_ERROR_MESSAGE;
use tumorscan_core::controller::{Disposition, Generation};
use tumorscan_core::display::{ConfidenceLabel, Outcome};
use tumorscan_core::error::{BackendError, ScanError};
use tumorscan_core::notify::Severity;
use tumorscan_core::session::SessionStatus;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn test_valid_selection_enters_processing() {
    let (backend, _gates) = GatedBackend::new(&["scan.jpg"]);
    let (mut c, _sink) = controller_with(backend);

    let generation = c.select_image(jpeg("scan.jpg", 1024)).unwrap();

    assert_eq!(generation, c.generation());
    assert_eq!(c.status(), SessionStatus::Processing);
    assert!(c.session().preview().is_some());
    assert_eq!(c.session().selected_image().unwrap().name, "scan.jpg");
    assert!(c.session().result().is_none());
    assert!(c.session().error_message().is_none());
    assert_invariants(&c);
}

#[test]
fn test_selection_clears_prior_result() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(no_tumor())));
    c.select_image(jpeg("first.jpg", 1024)).unwrap();
    run_to_completion(&mut c);
    assert_eq!(c.status(), SessionStatus::Success);

    c.select_image(jpeg("second.jpg", 1024)).unwrap();

    assert_eq!(c.status(), SessionStatus::Processing);
    assert!(c.session().result().is_none());
    assert!(c.session().error_message().is_none());
    assert_invariants(&c);
}

#[test]
fn test_rejected_selection_leaves_session_untouched() {
    let (mut c, sink) = controller_with(fixed_backend(Ok(no_tumor())));
    c.select_image(jpeg("good.jpg", 1024)).unwrap();
    run_to_completion(&mut c);
    sink.drain();

    let generation = c.generation();
    let preview_id = c.session().preview().unwrap().id();

    let err = c.select_image(candidate("notes.txt", "text/plain", 10)).unwrap_err();
    assert!(matches!(err, ScanError::InvalidType { .. }));

    assert_eq!(c.generation(), generation);
    assert_eq!(c.status(), SessionStatus::Success);
    assert_eq!(c.session().selected_image().unwrap().name, "good.jpg");
    assert_eq!(c.session().preview().unwrap().id(), preview_id);
    assert_eq!(c.session().result().unwrap(), &no_tumor());

    let notes = sink.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Invalid file type");
    assert_eq!(notes[0].severity, Severity::Destructive);
}

#[test]
fn test_rejection_while_processing_keeps_inflight_call() {
    let (backend, gates) = GatedBackend::new(&["a.jpg"]);
    let (mut c, sink) = controller_with(backend);

    let generation = c.select_image(jpeg("a.jpg", 4096)).unwrap();
    let preview_id = c.session().preview().unwrap().id();

    let err = c.select_image(candidate("notes.txt", "text/plain", 10)).unwrap_err();
    assert!(matches!(err, ScanError::InvalidType { .. }));
    assert_eq!(c.generation(), generation);
    assert_eq!(c.status(), SessionStatus::Processing);
    assert_eq!(c.session().selected_image().unwrap().name, "a.jpg");
    assert_eq!(c.session().preview().unwrap().id(), preview_id);
    assert_invariants(&c);

    gates["a.jpg"].send(Ok(no_tumor())).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Success);
    assert_eq!(c.session().result().unwrap(), &no_tumor());

    let titles: Vec<String> = sink.drain().into_iter().map(|n| n.title).collect();
    assert_eq!(titles, vec!["Invalid file type", "Analysis Complete"]);
}

#[test]
fn test_rejection_never_reaches_backend() {
    let backend = CountingBackend::new(Ok(no_tumor()));
    let (mut c, sink) = controller_with(backend.clone());

    let err = c.select_image(png("big.png", 6 * MIB as usize)).unwrap_err();
    assert!(matches!(err, ScanError::TooLarge { .. }));
    assert_eq!(c.status(), SessionStatus::Idle);
    assert!(c.session().preview().is_none());
    assert_eq!(c.generation(), Generation::default());

    assert!(!c.wait_for_backend(std::time::Duration::from_millis(50)));
    assert_eq!(backend.calls(), 0);

    let notes = sink.drain();
    assert_eq!(notes[0].title, "File too large");
    assert_eq!(notes[0].description, "Please upload an image smaller than 5MB");
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_no_tumor_success() {
    let (mut c, sink) = controller_with(fixed_backend(Ok(no_tumor())));

    c.select_image(jpeg("brain.jpg", 2 * MIB as usize)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Success);
    assert_invariants(&c);
    let summary = c.summary().unwrap();
    assert_eq!(summary.outcome, Outcome::Favorable);
    assert_eq!(summary.label, ConfidenceLabel::VeryHigh);
    assert_eq!(summary.label.to_string(), "Very High");
    assert_eq!(summary.percent, 92);

    let notes = sink.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Analysis Complete");
    assert_eq!(notes[0].description, "No Tumor Detected");
    assert_eq!(notes[0].severity, Severity::Info);
}

#[test]
fn test_unfavorable_result_notifies_destructive() {
    let glioma = result("Tumor Detected - Glioma", 0.87);
    let (mut c, sink) = controller_with(fixed_backend(Ok(glioma.clone())));

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.session().result().unwrap(), &glioma);
    assert_eq!(c.summary().unwrap().outcome, Outcome::Unfavorable);
    assert_eq!(sink.drain()[0].severity, Severity::Destructive);
}

#[test]
fn test_negative_result_notifies_info() {
    let negative = result("Negative", 0.64);
    let (mut c, sink) = controller_with(fixed_backend(Ok(negative)));

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    // Toast severity follows the same classification as the result panel.
    assert_eq!(c.summary().unwrap().outcome, Outcome::Favorable);
    assert_eq!(sink.drain()[0].severity, Severity::Info);
}

#[test]
fn test_scenario_backend_failure_then_reset() {
    let (mut c, sink) = controller_with(failing_backend());

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Error);
    assert_eq!(c.session().error_message(), Some(ANALYSIS_ERROR_MESSAGE));
    assert!(c.session().result().is_none());
    assert_invariants(&c);

    let notes = sink.drain();
    assert_eq!(notes[0].title, "Analysis Failed");
    // The backend's cause stays out of user-facing text.
    assert!(!notes[0].description.contains("connection refused"));

    c.reset();
    assert_eq!(c.status(), SessionStatus::Idle);
    assert!(c.session().selected_image().is_none());
    assert!(c.session().error_message().is_none());
    assert_eq!(c.previews().live_count(), 0);
    assert_invariants(&c);
}

#[test]
fn test_out_of_range_confidence_is_failure_not_clamp() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(result("No Tumor Detected", 1.3))));

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Error);
    assert!(c.session().result().is_none());
}

#[test]
fn test_nan_confidence_is_failure() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(result("No Tumor Detected", f32::NAN))));

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Error);
}

#[test]
fn test_panicking_backend_becomes_error() {
    let backend: Arc<dyn AnalysisBackend> =
        Arc::new(|_: &ValidatedImage| -> Result<AnalysisResult, BackendError> {
            panic!("model crashed")
        });
    let (mut c, _sink) = controller_with(backend);

    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    assert_eq!(c.status(), SessionStatus::Error);
}

// ---------------------------------------------------------------------------
// Two-signal rule
// ---------------------------------------------------------------------------

#[test]
fn test_result_held_until_presentation_completes() {
    let (mut c, sink) = controller_with(fixed_backend(Ok(no_tumor())));

    let generation = c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    assert!(c.wait_for_backend(WAIT));

    assert!(c.is_backend_settled());
    assert_eq!(c.status(), SessionStatus::Processing);
    assert!(c.session().result().is_none());
    assert!(sink.is_empty());
    assert_invariants(&c);

    assert_eq!(c.presentation_complete(generation), Disposition::Resolved);
    assert_eq!(c.status(), SessionStatus::Success);
}

#[test]
fn test_presentation_first_waits_for_backend() {
    let (backend, gates) = GatedBackend::new(&["brain.jpg"]);
    let (mut c, _sink) = controller_with(backend);

    let generation = c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    assert_eq!(c.presentation_complete(generation), Disposition::Recorded);
    assert_eq!(c.status(), SessionStatus::Processing);

    gates["brain.jpg"].send(Ok(no_tumor())).unwrap();
    assert_eq!(c.process_next(WAIT), Some(Disposition::Resolved));
    assert_eq!(c.status(), SessionStatus::Success);
}

#[test]
fn test_no_hold_resolves_on_settlement() {
    let mut config = test_config();
    config.session.hold_for_presentation = false;
    let (mut c, _sink) = controller_with_config(&config, fixed_backend(Ok(no_tumor())));

    let generation = c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    assert!(c.wait_for_backend(WAIT));
    assert_eq!(c.status(), SessionStatus::Success);

    // A late presenter signal is accepted but changes nothing.
    assert_eq!(c.presentation_complete(generation), Disposition::Recorded);
    assert_eq!(c.status(), SessionStatus::Success);
}

#[test]
fn test_duplicate_signals_ignored() {
    let (mut c, sink) = controller_with(fixed_backend(Ok(no_tumor())));

    let generation = c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);
    sink.drain();

    assert_eq!(
        c.on_backend_settled(generation, Err(BackendError::Rejected("late".into()))),
        Disposition::Duplicate
    );
    assert_eq!(c.presentation_complete(generation), Disposition::Duplicate);
    assert_eq!(c.status(), SessionStatus::Success);
    assert!(sink.is_empty());
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_stale_settlement_does_not_touch_newer_session() {
    let (backend, gates) = GatedBackend::new(&["a.jpg", "b.jpg"]);
    let (mut c, _sink) = controller_with(backend);

    let gen_a = c.select_image(jpeg("a.jpg", 4096)).unwrap();
    let gen_b = c.select_image(jpeg("b.jpg", 4096)).unwrap();
    assert!(gen_b > gen_a);

    gates["a.jpg"]
        .send(Ok(result("Tumor Detected - Glioma", 0.87)))
        .unwrap();
    assert_eq!(c.process_next(WAIT), Some(Disposition::Stale));
    assert_eq!(c.presentation_complete(gen_a), Disposition::Stale);

    assert_eq!(c.status(), SessionStatus::Processing);
    assert_eq!(c.session().selected_image().unwrap().name, "b.jpg");
    assert!(!c.is_backend_settled());
    assert!(!c.is_presentation_complete());

    gates["b.jpg"].send(Ok(no_tumor())).unwrap();
    assert!(c.wait_for_backend(WAIT));
    assert_eq!(c.presentation_complete(gen_b), Disposition::Resolved);
    assert_eq!(c.session().result().unwrap(), &no_tumor());
}

#[test]
fn test_settlement_after_reset_is_stale() {
    let (backend, gates) = GatedBackend::new(&["a.jpg"]);
    let (mut c, _sink) = controller_with(backend);

    let gen_a = c.select_image(jpeg("a.jpg", 4096)).unwrap();
    c.reset();
    assert_eq!(c.status(), SessionStatus::Idle);

    gates["a.jpg"].send(Ok(no_tumor())).unwrap();
    assert_eq!(c.process_next(WAIT), Some(Disposition::Stale));
    assert_eq!(c.presentation_complete(gen_a), Disposition::Stale);
    assert_eq!(c.status(), SessionStatus::Idle);
    assert!(c.session().result().is_none());
}

// ---------------------------------------------------------------------------
// Reset and preview lifetime
// ---------------------------------------------------------------------------

#[test]
fn test_reset_is_idempotent() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(no_tumor())));
    c.select_image(jpeg("brain.jpg", 4096)).unwrap();
    run_to_completion(&mut c);

    c.reset();
    let generation = c.generation();
    assert_eq!(c.status(), SessionStatus::Idle);
    assert_invariants(&c);

    c.reset();
    assert_eq!(c.generation(), generation);
    assert_eq!(c.status(), SessionStatus::Idle);
    assert!(c.session().selected_image().is_none());
    assert!(c.session().preview().is_none());
    assert!(c.session().result().is_none());
    assert!(c.session().error_message().is_none());
    assert_invariants(&c);
}

#[test]
fn test_reset_on_fresh_controller_is_noop() {
    let (mut c, sink) = controller_with(fixed_backend(Ok(no_tumor())));
    c.reset();
    assert_eq!(c.generation(), Generation::default());
    assert_eq!(c.status(), SessionStatus::Idle);
    assert!(sink.is_empty());
}

#[test]
fn test_superseded_preview_is_revoked() {
    let (backend, _gates) = GatedBackend::new(&["a.jpg", "b.jpg"]);
    let (mut c, _sink) = controller_with(backend);

    c.select_image(jpeg("a.jpg", 4096)).unwrap();
    let first = c.session().preview().unwrap().id();
    assert_eq!(c.previews().live_count(), 1);

    c.select_image(jpeg("b.jpg", 4096)).unwrap();
    let second = c.session().preview().unwrap().id();

    assert_ne!(first, second);
    assert!(!c.previews().is_live(first));
    assert!(c.previews().is_live(second));
    assert_eq!(c.previews().live_count(), 1);
}

#[test]
fn test_preview_released_when_controller_dropped() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(no_tumor())));
    c.select_image(jpeg("a.jpg", 4096)).unwrap();
    let store = c.previews().clone();
    assert_eq!(store.live_count(), 1);

    drop(c);
    assert_eq!(store.live_count(), 0);
}

#[test]
fn test_invariants_hold_across_a_session() {
    let (mut c, _sink) = controller_with(fixed_backend(Ok(no_tumor())));
    assert_invariants(&c);

    c.select_image(jpeg("a.jpg", 4096)).unwrap();
    assert_invariants(&c);
    assert!(c.wait_for_backend(WAIT));
    assert_invariants(&c);
    c.presentation_complete(c.generation());
    assert_invariants(&c);
    let _ = c.select_image(candidate("a.gif.exe", "application/x-msdownload", 10));
    assert_invariants(&c);
    c.select_image(png("b.png", 4096)).unwrap();
    assert_invariants(&c);
    c.reset();
    assert_invariants(&c);
}
