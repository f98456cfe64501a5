//! Presentation rules derived from an analysis result. Not part of the
//! session state.

use crate::analysis::AnalysisResult;
use crate::consts::{
    CONFIDENCE_HIGH, CONFIDENCE_LOW, CONFIDENCE_MODERATE, CONFIDENCE_VERY_HIGH, FAVORABLE_MARKERS,
};

/// Coarse confidence bucket shown next to the percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfidenceLabel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ConfidenceLabel {
    /// Bucket a confidence. Each lower bound is inclusive.
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= CONFIDENCE_VERY_HIGH {
            Self::VeryHigh
        } else if confidence >= CONFIDENCE_HIGH {
            Self::High
        } else if confidence >= CONFIDENCE_MODERATE {
            Self::Moderate
        } else if confidence >= CONFIDENCE_LOW {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

impl std::fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryHigh => write!(f, "Very High"),
            Self::High => write!(f, "High"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Low => write!(f, "Low"),
            Self::VeryLow => write!(f, "Very Low"),
        }
    }
}

/// Whether a prediction reads as good or bad news.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Favorable,
    Unfavorable,
}

impl Outcome {
    /// Pure text rule: "no tumor" or "negative" anywhere, case-insensitive.
    pub fn classify(prediction: &str) -> Self {
        let lower = prediction.to_lowercase();
        if FAVORABLE_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::Favorable
        } else {
            Self::Unfavorable
        }
    }

    pub fn is_favorable(self) -> bool {
        self == Self::Favorable
    }
}

/// Confidence as a rounded whole percentage.
pub fn confidence_percent(confidence: f32) -> u32 {
    (confidence * 100.0).round() as u32
}

/// Everything the result panel needs, derived once.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultSummary {
    pub prediction: String,
    pub outcome: Outcome,
    pub label: ConfidenceLabel,
    pub percent: u32,
}

impl ResultSummary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            prediction: result.prediction.clone(),
            outcome: Outcome::classify(&result.prediction),
            label: ConfidenceLabel::from_confidence(result.confidence),
            percent: confidence_percent(result.confidence),
        }
    }
}

/// Render a byte limit the way upload hints phrase it, e.g. "5MB".
pub fn format_byte_limit(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}
