use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::consts::{
    DEFAULT_BACKEND_DELAY_MS, DEFAULT_PROGRESS_HOLD_MS, DEFAULT_PROGRESS_STEP,
    DEFAULT_PROGRESS_TICK_MS, MAX_UPLOAD_BYTES, MIN_PROGRESS_STEP,
};
use crate::error::{Result, ScanError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted file, in bytes.
    pub max_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub tick_ms: u64,
    /// Fraction added per tick, in (0, 1].
    pub step: f64,
    /// Time the full bar stays up before completion is signaled.
    pub hold_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_PROGRESS_TICK_MS,
            step: DEFAULT_PROGRESS_STEP,
            hold_ms: DEFAULT_PROGRESS_HOLD_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Simulated analysis latency.
    pub delay_ms: u64,
    /// Fixed RNG seed for reproducible answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Canned answers the simulated backend picks from.
    pub results: Vec<AnalysisResult>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_BACKEND_DELAY_MS,
            seed: None,
            results: default_canned_results(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Hold the backend outcome until the progress presenter signals
    /// completion. Headless callers may turn this off.
    pub hold_for_presentation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hold_for_presentation: true,
        }
    }
}

pub fn default_canned_results() -> Vec<AnalysisResult> {
    vec![
        AnalysisResult {
            prediction: "No Tumor Detected".into(),
            confidence: 0.92,
        },
        AnalysisResult {
            prediction: "Tumor Detected - Glioma".into(),
            confidence: 0.87,
        },
        AnalysisResult {
            prediction: "Tumor Detected - Meningioma".into(),
            confidence: 0.78,
        },
        AnalysisResult {
            prediction: "Tumor Detected - Pituitary".into(),
            confidence: 0.83,
        },
    ]
}

impl ScannerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ScanError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScanError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.upload.max_bytes == 0 {
            return Err(ScanError::Config("upload.max_bytes must be positive".into()));
        }
        if self.progress.tick_ms == 0 {
            return Err(ScanError::Config("progress.tick_ms must be positive".into()));
        }
        if !(self.progress.step >= MIN_PROGRESS_STEP && self.progress.step <= 1.0) {
            return Err(ScanError::Config(format!(
                "progress.step must be in [{MIN_PROGRESS_STEP}, 1], got {}",
                self.progress.step
            )));
        }
        if self.backend.results.is_empty() {
            return Err(ScanError::Config("backend.results must not be empty".into()));
        }
        for result in &self.backend.results {
            result.clone().validated()?;
        }
        Ok(())
    }
}
