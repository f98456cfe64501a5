use crate::app::TumorScanApp;
use crate::messages::UiEvent;

pub mod menu_bar;
pub mod scan;
pub mod status;
pub mod toasts;
pub mod uploader;

pub(crate) const FAVORABLE: egui::Color32 = egui::Color32::from_rgb(34, 197, 94);
pub(crate) const UNFAVORABLE: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);

/// File extensions offered by the open dialog.
pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif", "tif", "tiff"];

pub(crate) fn open_image_dialog(app: &TumorScanApp) {
    let event_tx = app.event_tx.clone();
    let max_bytes = app.controller.max_upload_bytes();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = event_tx.send(UiEvent::read(path, max_bytes));
        }
    });
}
