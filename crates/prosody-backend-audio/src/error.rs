//! Error types for audio backend.

use std::path::PathBuf;

use prosody_spec::{BackendError, ErrorCode};
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while transforming audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Baseline clip does not exist.
    #[error("baseline audio not found: {}", path.display())]
    InputNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Container is not mono/stereo 16-bit integer PCM.
    #[error("unsupported WAV format: {reason}")]
    UnsupportedFormat {
        /// What was found instead.
        reason: String,
    },

    /// Container could not be parsed.
    #[error("malformed WAV data: {message}")]
    MalformedWav {
        /// Parser message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an unsupported format error.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            reason: reason.into(),
        }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => AudioError::Io(e),
            hound::Error::Unsupported => {
                AudioError::unsupported("compressed or unknown encoding (only PCM is supported)")
            }
            hound::Error::FormatError(message) => AudioError::MalformedWav {
                message: message.to_string(),
            },
            other => AudioError::MalformedWav {
                message: other.to_string(),
            },
        }
    }
}

impl BackendError for AudioError {
    fn code(&self) -> ErrorCode {
        match self {
            AudioError::InputNotFound { .. } => ErrorCode::InputNotFound,
            AudioError::UnsupportedFormat { .. } | AudioError::MalformedWav { .. } => {
                ErrorCode::UnsupportedFormat
            }
            AudioError::InvalidParameter { .. } => ErrorCode::InvalidRequest,
            AudioError::Io(_) => ErrorCode::Io,
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}
