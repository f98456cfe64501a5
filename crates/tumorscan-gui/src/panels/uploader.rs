use tumorscan_core::display::format_byte_limit;

use crate::app::TumorScanApp;

const DROP_ZONE: egui::Vec2 = egui::vec2(420.0, 240.0);

pub fn show(ctx: &egui::Context, app: &mut TumorScanApp) {
    let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(32.0);
            ui.heading("Brain Scan Analysis");
            ui.label("Upload an MRI or CT scan to check for signs of a tumor.");
            ui.add_space(24.0);

            let (rect, response) = ui.allocate_exact_size(DROP_ZONE, egui::Sense::click());
            paint_drop_zone(ui, rect, hovering || response.hovered());
            if response.clicked() {
                super::open_image_dialog(app);
            }

            ui.add_space(16.0);
            if ui.button("Select Image").clicked() {
                super::open_image_dialog(app);
            }
            ui.add_space(8.0);
            ui.small(format!(
                "Supports image files up to {}",
                format_byte_limit(app.controller.max_upload_bytes())
            ));
        });
    });
}

fn paint_drop_zone(ui: &egui::Ui, rect: egui::Rect, highlighted: bool) {
    let (stroke, fill) = if highlighted {
        (ui.visuals().selection.stroke.color, ui.visuals().selection.bg_fill.gamma_multiply(0.2))
    } else {
        (egui::Color32::from_gray(90), egui::Color32::from_gray(30))
    };
    ui.painter().rect(
        rect,
        12.0,
        fill,
        egui::Stroke::new(2.0, stroke),
        egui::StrokeKind::Inside,
    );
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drag and drop a brain scan here\nor click to browse",
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(160),
    );
}
