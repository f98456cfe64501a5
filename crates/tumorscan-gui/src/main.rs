mod app;
mod convert;
mod messages;
mod panels;
mod presentation;

use std::path::PathBuf;

use tumorscan_core::config::ScannerConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("TumorScan"),
        ..Default::default()
    };

    eframe::run_native(
        "TumorScan",
        options,
        Box::new(move |cc| Ok(Box::new(app::TumorScanApp::new(&cc.egui_ctx, config)))),
    )
}

/// Optional config path as the first argument; falls back to defaults.
fn load_config(path: Option<PathBuf>) -> ScannerConfig {
    let Some(path) = path else {
        return ScannerConfig::default();
    };
    match ScannerConfig::load(&path) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "loaded config");
            config
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring config: {e}");
            ScannerConfig::default()
        }
    }
}
