//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: failures of a single fit (bad input or a numerically
//!   unsolvable configuration). The message is always safe to show verbatim.
//! - [`AppError`]: process-level failures carrying an exit code for the binary.

/// Exit code for usage, configuration and I/O problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for rejected fit input.
pub const EXIT_VALIDATION: u8 = 3;
/// Exit code for degenerate/numeric fit failures.
pub const EXIT_DEGENERATE: u8 = 4;
/// Exit code for failures reported by a remote fitting service.
pub const EXIT_REMOTE: u8 = 5;

/// Why a fit could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// Bad or insufficient input. Deterministic for the same request.
    Validation(String),
    /// The input passed validation but the model cannot be solved for it.
    Degenerate(String),
}

impl FitError {
    pub fn validation(message: impl Into<String>) -> Self {
        FitError::Validation(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        FitError::Degenerate(message.into())
    }

    /// The display-ready message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            FitError::Validation(m) | FitError::Degenerate(m) => m,
        }
    }
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FitError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        match err {
            FitError::Validation(m) => AppError::new(EXIT_VALIDATION, format!("Invalid input: {m}")),
            FitError::Degenerate(m) => AppError::new(EXIT_DEGENERATE, format!("Cannot fit: {m}")),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
