use crate::app::TumorScanApp;

pub fn show(ctx: &egui::Context, app: &mut TumorScanApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let session = app.controller.session();
            ui.label(format!("Status: {}", session.status()));
            ui.separator();
            ui.label(format!("Session {}", app.controller.generation()));
            ui.separator();
            ui.label(format!("Previews: {}", app.controller.previews().live_count()));

            if let Some(image) = session.selected_image() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(format!("{} ({} bytes)", image.name, image.size));
                });
            }
        });
        ui.add_space(2.0);
    });
}
