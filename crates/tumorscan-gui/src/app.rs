use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tumorscan_core::candidate::ImageCandidate;
use tumorscan_core::config::ScannerConfig;
use tumorscan_core::controller::ScanController;
use tumorscan_core::notify::{CollectingSink, Notification};
use tumorscan_core::session::SessionStatus;

use crate::convert::decode_preview;
use crate::messages::UiEvent;
use crate::panels;
use crate::presentation::PresentationClock;

/// How long a toast stays on screen.
const TOAST_LIFETIME: Duration = Duration::from_secs(5);

pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Texture for the preview handle currently held by the session.
pub struct PreviewTexture {
    pub id: u64,
    /// None when the bytes could not be decoded as an image.
    pub texture: Option<egui::TextureHandle>,
}

pub struct TumorScanApp {
    pub controller: ScanController,
    pub config: ScannerConfig,
    pub event_tx: mpsc::Sender<UiEvent>,
    pub event_rx: mpsc::Receiver<UiEvent>,
    pub clock: Option<PresentationClock>,
    pub preview: Option<PreviewTexture>,
    pub toasts: Vec<Toast>,
    pub show_about: bool,
    sink: Arc<CollectingSink>,
}

impl TumorScanApp {
    pub fn new(_ctx: &egui::Context, config: ScannerConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let sink = Arc::new(CollectingSink::new());
        let controller = ScanController::simulated(&config, sink.clone());

        Self {
            controller,
            config,
            event_tx,
            event_rx,
            clock: None,
            preview: None,
            toasts: Vec::new(),
            show_about: false,
            sink,
        }
    }

    /// Drain all pending events from dialog threads.
    fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                UiEvent::Picked(candidate) => self.select(candidate),
                UiEvent::ReadFailed { path, message } => {
                    tracing::warn!(path = %path.display(), "read failed: {message}");
                    self.push_toast(Notification::destructive(
                        "Upload failed",
                        format!("Could not read {}", path.display()),
                    ));
                }
                UiEvent::ConfigImported(config) => self.apply_config(config),
            }
        }
    }

    pub fn select(&mut self, candidate: ImageCandidate) {
        match self.controller.select_image(candidate) {
            Ok(generation) => {
                self.clock = Some(PresentationClock::start(generation, &self.config.progress));
            }
            // The controller already raised a toast for the rejection.
            Err(e) => tracing::debug!("selection rejected: {e}"),
        }
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.clock = None;
    }

    /// Replace the controller with one built from `config`. Any session in
    /// flight is abandoned.
    pub fn apply_config(&mut self, config: ScannerConfig) {
        self.controller = ScanController::simulated(&config, self.sink.clone());
        self.config = config;
        self.clock = None;
        self.preview = None;
        self.push_toast(Notification::info("Config imported", "New settings apply to the next scan"));
        tracing::info!("config applied");
    }

    /// Read `path` off the UI thread and feed it back as a candidate.
    pub fn load_path(&self, path: PathBuf) {
        let event_tx = self.event_tx.clone();
        let max_bytes = self.controller.max_upload_bytes();
        std::thread::spawn(move || {
            let _ = event_tx.send(UiEvent::read(path, max_bytes));
        });
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };
        if let Some(path) = file.path {
            self.load_path(path);
        } else if let Some(bytes) = file.bytes {
            self.select(ImageCandidate::new(file.name, file.mime, bytes));
        }
    }

    /// Apply backend settlements and advance the progress overlay.
    fn drive_presentation(&mut self, ctx: &egui::Context) {
        self.controller.poll();

        if self.controller.status() != SessionStatus::Processing {
            self.clock = None;
            return;
        }
        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        if clock.tick(Instant::now()) {
            self.controller.presentation_complete(clock.generation());
        }
        ctx.request_repaint_after(clock.interval());
    }

    /// Keep the preview texture in step with the session's preview handle.
    fn sync_preview(&mut self, ctx: &egui::Context) {
        let Some(handle) = self.controller.session().preview() else {
            self.preview = None;
            return;
        };
        if self.preview.as_ref().is_some_and(|p| p.id == handle.id()) {
            return;
        }

        let texture = match decode_preview(handle.bytes()) {
            Ok(image) => Some(ctx.load_texture(handle.url(), image, egui::TextureOptions::LINEAR)),
            Err(e) => {
                tracing::warn!(url = handle.url(), "{e:#}");
                None
            }
        };
        self.preview = Some(PreviewTexture {
            id: handle.id(),
            texture,
        });
    }

    fn push_toast(&mut self, notification: Notification) {
        self.toasts.push(Toast {
            notification,
            shown_at: Instant::now(),
        });
    }

    fn collect_toasts(&mut self, ctx: &egui::Context) {
        for notification in self.sink.drain() {
            self.push_toast(notification);
        }
        self.toasts.retain(|t| t.shown_at.elapsed() < TOAST_LIFETIME);
        if let Some(oldest) = self.toasts.first() {
            ctx.request_repaint_after(TOAST_LIFETIME.saturating_sub(oldest.shown_at.elapsed()));
        }
    }
}

impl eframe::App for TumorScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();
        self.handle_dropped_files(ctx);
        self.drive_presentation(ctx);
        self.sync_preview(ctx);
        self.collect_toasts(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        if self.controller.session().is_idle() {
            panels::uploader::show(ctx, self);
        } else {
            panels::scan::show(ctx, self);
        }
        panels::toasts::show(ctx, self);

        if self.show_about {
            egui::Window::new("About TumorScan")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("TumorScan");
                        ui.label("Brain scan upload and analysis");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        ui.small("Results are simulated and not a medical diagnosis.");
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
