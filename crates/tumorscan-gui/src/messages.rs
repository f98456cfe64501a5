use std::path::PathBuf;

use tumorscan_core::candidate::ImageCandidate;
use tumorscan_core::config::ScannerConfig;

/// Results sent from dialog threads back to the UI thread.
pub enum UiEvent {
    /// A file was picked or dropped and read into memory.
    Picked(ImageCandidate),
    /// The picked file could not be read.
    ReadFailed { path: PathBuf, message: String },
    /// A scanner config was imported from disk.
    ConfigImported(ScannerConfig),
}

impl UiEvent {
    /// Read `path` into a candidate, loading its bytes only when it fits
    /// `max_bytes`. Blocks on file I/O.
    pub fn read(path: PathBuf, max_bytes: u64) -> Self {
        match ImageCandidate::from_path(&path).and_then(|c| c.preload(max_bytes)) {
            Ok(candidate) => Self::Picked(candidate),
            Err(e) => Self::ReadFailed {
                path,
                message: e.to_string(),
            },
        }
    }
}
