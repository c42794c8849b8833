use resultsync_core_types::CycleId;
use thiserror::Error;

/// Result type alias using ResultSyncError
pub type Result<T> = std::result::Result<T, ResultSyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, log assertions and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidIndex,

    // Replay
    ReplayMismatch,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    ExternalService,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidIndex => "ERR_INVALID_INDEX",
            ExErrorKind::ReplayMismatch => "ERR_REPLAY_MISMATCH",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::ExternalService => "ERR_EXTERNAL_SERVICE",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional operation and cycle context
/// for logs and external reporting.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    cycle_id: Option<CycleId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            cycle_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add cycle context
    pub fn with_cycle_id(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn cycle_id(&self) -> Option<&CycleId> {
        self.cycle_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(cycle_id) = &self.cycle_id {
            write!(f, " (cycle_id: {})", cycle_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for resultsync operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResultSyncError {
    // ===== Collaborator Errors =====
    /// The store failed to produce a result set; the cycle was aborted
    #[error("Fetch failed in store {store}: {message}")]
    FetchFailed { store: String, message: String },

    // ===== Index Errors =====
    /// An index path component was negative
    #[error("Index path {component} must be non-negative, got {value}")]
    NegativeIndex { component: &'static str, value: i64 },

    // ===== Replay Errors =====
    /// Applying an edit script did not reproduce the target layout
    #[error("Edit script replay mismatch: {reason}")]
    ReplayMismatch { reason: String },

    // ===== Configuration Errors =====
    /// Configuration could not be parsed or is inconsistent
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // ===== Generic Errors =====
    /// IO error while reading collaborator input
    #[error("IO error: {message}")]
    Io { message: String },
}

/// Conversion from ResultSyncError to ExError
impl From<ResultSyncError> for ExError {
    fn from(err: ResultSyncError) -> Self {
        match err {
            ResultSyncError::FetchFailed { store, message } => {
                ExError::new(ExErrorKind::ExternalService)
                    .with_op("fetch")
                    .with_message(format!("store {}: {}", store, message))
            }

            ResultSyncError::NegativeIndex { component, value } => {
                ExError::new(ExErrorKind::InvalidIndex)
                    .with_message(format!("{} must be non-negative, got {}", component, value))
            }

            ResultSyncError::ReplayMismatch { reason } => {
                ExError::new(ExErrorKind::ReplayMismatch)
                    .with_op("replay")
                    .with_message(reason)
            }

            ResultSyncError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            ResultSyncError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),
        }
    }
}

impl From<toml::de::Error> for ResultSyncError {
    fn from(err: toml::de::Error) -> Self {
        ResultSyncError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ResultSyncError {
    fn from(err: std::io::Error) -> Self {
        ResultSyncError::Io {
            message: err.to_string(),
        }
    }
}
