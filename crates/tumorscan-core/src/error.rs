use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid file type: {mime}")]
    InvalidType { mime: String },

    #[error("File too large: {size} bytes (limit: {limit})")]
    TooLarge { size: u64, limit: u64 },

    #[error("Analysis backend failed: {0}")]
    BackendFailure(#[from] BackendError),

    #[error("Confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f32),

    #[error("Config error: {0}")]
    Config(String),
}

/// Failure reported by an analysis backend. The cause is for diagnostics only
/// and never reaches the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    #[error("backend rejected the image: {0}")]
    Rejected(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("analysis worker lost: {0}")]
    WorkerLost(String),
}

/// Violated session invariant, reported by `ScanSession::check_invariants`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("status {0} requires a result and no error message")]
    SuccessShape(&'static str),

    #[error("status {0} requires an error message and no result")]
    ErrorShape(&'static str),

    #[error("status {0} must carry neither result nor error message")]
    IdleShape(&'static str),

    #[error("preview handle present without a selected image, or vice versa")]
    PreviewMismatch,
}

pub type Result<T> = std::result::Result<T, ScanError>;
