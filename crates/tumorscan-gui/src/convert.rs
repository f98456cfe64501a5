use anyhow::{Context, Result};

/// Longest edge of the preview texture. Larger scans are downscaled.
const MAX_PREVIEW_EDGE: u32 = 1024;

/// Decode preview bytes into an egui ColorImage.
pub fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage> {
    let mut img = image::load_from_memory(bytes).context("Failed to decode preview")?;
    if img.width() > MAX_PREVIEW_EDGE || img.height() > MAX_PREVIEW_EDGE {
        img = img.thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}
