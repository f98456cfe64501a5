use tumorscan_core::display::ResultSummary;
use tumorscan_core::session::SessionStatus;

use crate::app::TumorScanApp;
use crate::presentation::PresentationClock;

const PREVIEW_EDGE: f32 = 360.0;
const CARD_WIDTH: f32 = 420.0;

pub fn show(ctx: &egui::Context, app: &mut TumorScanApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            let rect = draw_preview(ui, app);

            match app.controller.status() {
                SessionStatus::Processing => {
                    if let Some(ref clock) = app.clock {
                        draw_progress_overlay(ui, rect, clock);
                    }
                }
                SessionStatus::Success => {
                    ui.add_space(16.0);
                    if let Some(summary) = app.controller.summary() {
                        result_card(ui, &summary, app);
                    }
                }
                SessionStatus::Error => {
                    ui.add_space(16.0);
                    let message = app.controller.session().error_message().unwrap_or_default().to_string();
                    error_card(ui, &message, app);
                }
                SessionStatus::Idle => {}
            }
        });
    });
}

/// Paint the preview into a square slot and return the slot.
fn draw_preview(ui: &mut egui::Ui, app: &TumorScanApp) -> egui::Rect {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(PREVIEW_EDGE, PREVIEW_EDGE), egui::Sense::hover());
    ui.painter().rect_filled(rect, 8.0, egui::Color32::from_gray(30));

    match app.preview.as_ref().and_then(|p| p.texture.as_ref()) {
        Some(texture) => {
            ui.painter().image(
                texture.id(),
                fit_rect(rect, texture.size_vec2()),
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Preview unavailable",
                egui::FontId::proportional(14.0),
                egui::Color32::from_gray(120),
            );
        }
    }
    rect
}

/// Largest rect with the image's aspect ratio centered inside `slot`.
fn fit_rect(slot: egui::Rect, image_size: egui::Vec2) -> egui::Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return slot;
    }
    let scale = (slot.width() / image_size.x).min(slot.height() / image_size.y);
    egui::Rect::from_center_size(slot.center(), image_size * scale)
}

fn draw_progress_overlay(ui: &egui::Ui, rect: egui::Rect, clock: &PresentationClock) {
    let painter = ui.painter();
    painter.rect_filled(rect, 8.0, egui::Color32::from_black_alpha(170));

    let bar = egui::Rect::from_center_size(rect.center(), egui::vec2(rect.width() - 64.0, 10.0));
    painter.rect_filled(bar, 5.0, egui::Color32::from_gray(70));
    let mut filled = bar;
    filled.set_width(bar.width() * clock.fraction());
    painter.rect_filled(filled, 5.0, ui.visuals().selection.bg_fill);

    painter.text(
        bar.center_top() - egui::vec2(0.0, 14.0),
        egui::Align2::CENTER_BOTTOM,
        clock.stage().to_string(),
        egui::FontId::proportional(15.0),
        egui::Color32::WHITE,
    );
    painter.text(
        bar.center_bottom() + egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_TOP,
        format!("{}%", (clock.fraction() * 100.0).round() as u32),
        egui::FontId::proportional(13.0),
        egui::Color32::from_gray(200),
    );
}

fn result_card(ui: &mut egui::Ui, summary: &ResultSummary, app: &mut TumorScanApp) {
    let color = if summary.outcome.is_favorable() {
        super::FAVORABLE
    } else {
        super::UNFAVORABLE
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical_centered(|ui| {
            ui.heading("Analysis Result");
            ui.add_space(8.0);
            ui.label(egui::RichText::new(&summary.prediction).size(20.0).strong().color(color));
            ui.add_space(8.0);
            ui.label(format!("Confidence: {} ({}%)", summary.label, summary.percent));
            ui.add(
                egui::ProgressBar::new(summary.percent as f32 / 100.0)
                    .desired_width(CARD_WIDTH - 40.0)
                    .fill(color),
            );
            ui.add_space(8.0);
            ui.small("This is not a medical diagnosis. Consult a qualified professional.");
            ui.add_space(8.0);
            if ui.button("New Scan").clicked() {
                app.reset();
            }
        });
    });
}

fn error_card(ui: &mut egui::Ui, message: &str, app: &mut TumorScanApp) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Analysis Error").color(super::UNFAVORABLE));
            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(8.0);
            if ui.button("Try Again").clicked() {
                app.reset();
            }
        });
    });
}
