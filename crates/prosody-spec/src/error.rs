//! Error types for request handling and backend reporting.

use std::path::PathBuf;
use thiserror::Error;

/// Stable error codes reported across the process boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: Baseline audio does not exist
    InputNotFound,
    /// E002: Audio container is not mono/stereo 16-bit PCM
    UnsupportedFormat,
    /// E003: Non-numeric parameter value (absorbed, never fatal)
    MalformedParameter,
    /// E004: Job process failed or did not produce its output
    ProcessFailure,
    /// E005: Request document could not be read or parsed
    InvalidRequest,
    /// E006: Filesystem error outside the cases above
    Io,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InputNotFound => "E001",
            ErrorCode::UnsupportedFormat => "E002",
            ErrorCode::MalformedParameter => "E003",
            ErrorCode::ProcessFailure => "E004",
            ErrorCode::InvalidRequest => "E005",
            ErrorCode::Io => "E006",
        }
    }

    /// Returns the symbolic name of the code.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::InputNotFound => "InputNotFound",
            ErrorCode::UnsupportedFormat => "UnsupportedFormat",
            ErrorCode::MalformedParameter => "MalformedParameter",
            ErrorCode::ProcessFailure => "ProcessFailure",
            ErrorCode::InvalidRequest => "InvalidRequest",
            ErrorCode::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised while loading or writing a job request document.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Failed to read or write the document.
    #[error("failed to access request document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid request JSON.
    #[error("failed to parse request document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError for RequestError {
    fn code(&self) -> ErrorCode {
        match self {
            RequestError::Io { .. } => ErrorCode::Io,
            RequestError::Parse(_) => ErrorCode::InvalidRequest,
        }
    }

    fn category(&self) -> &'static str {
        "request"
    }
}

/// Common interface for errors that cross the job boundary.
///
/// Implementors give every failure a stable [`ErrorCode`] so diagnostics can be
/// matched by callers that only see the process's stderr.
///
/// ```
/// use prosody_spec::error::BackendError;
///
/// fn describe<E: BackendError>(err: &E) -> String {
///     format!("error[{}] {}: {}", err.code(), err.category(), err.message())
/// }
/// ```
pub trait BackendError: std::error::Error {
    /// Get the stable error code.
    fn code(&self) -> ErrorCode;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category ("request", "audio", "job").
    fn category(&self) -> &'static str;
}
