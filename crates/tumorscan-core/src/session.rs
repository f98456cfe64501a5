use crate::analysis::AnalysisResult;
use crate::candidate::ValidatedImage;
use crate::error::InvariantViolation;
use crate::preview::PreviewHandle;

/// Lifecycle state of a scan session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Processing,
    Success,
    Error,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Processing => write!(f, "Processing"),
            Self::Success => write!(f, "Success"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// State of one upload-to-result cycle. Only the controller mutates it.
#[derive(Debug, Default)]
pub struct ScanSession {
    selected_image: Option<ValidatedImage>,
    preview: Option<PreviewHandle>,
    status: SessionStatus,
    result: Option<AnalysisResult>,
    error_message: Option<String>,
}

impl ScanSession {
    pub fn selected_image(&self) -> Option<&ValidatedImage> {
        self.selected_image.as_ref()
    }

    pub fn preview(&self) -> Option<&PreviewHandle> {
        self.preview.as_ref()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, SessionStatus::Success | SessionStatus::Error)
    }

    /// Verify the shape invariants that must hold in every reachable state.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.preview.is_some() != self.selected_image.is_some() {
            return Err(InvariantViolation::PreviewMismatch);
        }
        let has_result = self.result.is_some();
        let has_error = self.error_message.is_some();
        match self.status {
            SessionStatus::Success if !has_result || has_error => {
                Err(InvariantViolation::SuccessShape("Success"))
            }
            SessionStatus::Error if has_result || !has_error => {
                Err(InvariantViolation::ErrorShape("Error"))
            }
            SessionStatus::Idle if has_result || has_error => {
                Err(InvariantViolation::IdleShape("Idle"))
            }
            SessionStatus::Processing if has_result || has_error => {
                Err(InvariantViolation::IdleShape("Processing"))
            }
            _ => Ok(()),
        }
    }

    /// Start processing `image`. Callers `clear` first so the old preview is
    /// revoked before the new one is created.
    pub(crate) fn begin(&mut self, image: ValidatedImage, preview: PreviewHandle) {
        self.selected_image = Some(image);
        self.preview = Some(preview);
        self.result = None;
        self.error_message = None;
        self.status = SessionStatus::Processing;
    }

    pub(crate) fn succeed(&mut self, result: AnalysisResult) {
        self.error_message = None;
        self.result = Some(result);
        self.status = SessionStatus::Success;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.result = None;
        self.error_message = Some(message.into());
        self.status = SessionStatus::Error;
    }

    /// Release everything and return to `Idle`.
    pub(crate) fn clear(&mut self) {
        self.preview = None;
        self.selected_image = None;
        self.result = None;
        self.error_message = None;
        self.status = SessionStatus::Idle;
    }
}
