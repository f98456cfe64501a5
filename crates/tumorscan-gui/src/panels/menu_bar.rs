use tumorscan_core::config::ScannerConfig;

use crate::app::TumorScanApp;
use crate::messages::UiEvent;

pub fn show(ctx: &egui::Context, app: &mut TumorScanApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    super::open_image_dialog(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Session", |ui| {
                let active = !app.controller.session().is_idle();
                if ui.add_enabled(active, egui::Button::new("Reset")).clicked() {
                    ui.close();
                    app.reset();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });
    });

    // Keyboard shortcuts (consumed outside menus)
    if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
        super::open_image_dialog(app);
    }
    if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

fn import_config(app: &TumorScanApp) {
    let event_tx = app.event_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new().add_filter("TOML", &["toml"]).pick_file() else {
            return;
        };
        match ScannerConfig::load(&path) {
            Ok(config) => {
                let _ = event_tx.send(UiEvent::ConfigImported(config));
            }
            Err(e) => tracing::warn!(path = %path.display(), "config import failed: {e}"),
        }
    });
}

fn export_config(app: &TumorScanApp) {
    let config = app.config.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("tumorscan.toml")
            .save_file()
        {
            let written = config
                .to_toml_string()
                .map_err(anyhow::Error::from)
                .and_then(|content| std::fs::write(&path, content).map_err(anyhow::Error::from));
            if let Err(e) = written {
                tracing::warn!(path = %path.display(), "config export failed: {e}");
            }
        }
    });
}
