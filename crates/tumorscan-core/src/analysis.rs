use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Classification returned by an analysis backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub prediction: String,
    /// Model confidence in [0, 1].
    pub confidence: f32,
}

impl AnalysisResult {
    /// Build a result, rejecting confidences outside [0, 1] (including NaN).
    pub fn new(prediction: impl Into<String>, confidence: f32) -> Result<Self> {
        Self {
            prediction: prediction.into(),
            confidence,
        }
        .validated()
    }

    /// Check the confidence range of a result that did not come through `new`,
    /// e.g. one decoded from a backend payload.
    pub fn validated(self) -> Result<Self> {
        if (0.0..=1.0).contains(&self.confidence) {
            Ok(self)
        } else {
            Err(ScanError::ConfidenceOutOfRange(self.confidence))
        }
    }
}
