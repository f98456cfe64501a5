use tumorscan_core::notify::Severity;

use crate::app::TumorScanApp;

const TOAST_WIDTH: f32 = 300.0;

pub fn show(ctx: &egui::Context, app: &TumorScanApp) {
    if app.toasts.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -40.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in &app.toasts {
                let n = &toast.notification;
                let fill = match n.severity {
                    Severity::Info => ui.visuals().window_fill,
                    Severity::Destructive => egui::Color32::from_rgb(127, 29, 29),
                };
                egui::Frame::popup(ui.style()).fill(fill).show(ui, |ui| {
                    ui.set_width(TOAST_WIDTH);
                    ui.strong(&n.title);
                    ui.label(&n.description);
                });
                ui.add_space(6.0);
            }
        });
}
