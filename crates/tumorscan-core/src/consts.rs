/// Largest accepted upload, in bytes. Default: 5 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 5_242_880;

/// MIME prefix every accepted upload must declare.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Declared type for files whose extension maps to no known format.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Fixed user-facing message for any backend failure.
pub const ANALYSIS_ERROR_MESSAGE: &str =
    "We couldn't process this image. Please try uploading a different brain scan image.";

/// Cosmetic progress tick interval in milliseconds.
pub const DEFAULT_PROGRESS_TICK_MS: u64 = 30;

/// Progress added per tick. 0.01 at 30 ms gives a ~3 s fill.
pub const DEFAULT_PROGRESS_STEP: f64 = 0.01;

/// Smallest accepted progress step. Finer steps would take days to fill.
pub const MIN_PROGRESS_STEP: f64 = 1e-6;

/// How long a full progress bar stays visible before completion is signaled.
pub const DEFAULT_PROGRESS_HOLD_MS: u64 = 1000;

/// Simulated backend latency in milliseconds.
pub const DEFAULT_BACKEND_DELAY_MS: u64 = 3000;

/// Lower bounds of the confidence label buckets (inclusive).
pub const CONFIDENCE_VERY_HIGH: f32 = 0.90;
pub const CONFIDENCE_HIGH: f32 = 0.75;
pub const CONFIDENCE_MODERATE: f32 = 0.60;
pub const CONFIDENCE_LOW: f32 = 0.40;

/// Prediction fragments that mark a favorable outcome (matched lowercase).
pub const FAVORABLE_MARKERS: [&str; 2] = ["no tumor", "negative"];
