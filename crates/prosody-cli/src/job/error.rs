//! Error types for job submission.

use std::path::PathBuf;
use std::time::Duration;

use prosody_backend_audio::AudioError;
use prosody_spec::{BackendError, ErrorCode, RequestError};
use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors that can occur while submitting or running a job.
#[derive(Debug, Error)]
pub enum JobError {
    /// Failed to write the request document into the staging directory.
    #[error("failed to write job request {}: {source}", path.display())]
    WriteRequestFailed {
        path: PathBuf,
        #[source]
        source: RequestError,
    },

    /// Failed to read the request document before running it in-process.
    #[error("failed to load job request {}: {source}", path.display())]
    ReadRequestFailed {
        path: PathBuf,
        #[source]
        source: RequestError,
    },

    /// Failed to start the job process.
    #[error("failed to spawn job process '{}': {source}", executable.display())]
    SpawnFailed {
        executable: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The job process ran past the caller's deadline and was killed.
    #[error("job process timed out after {:.1}s", timeout.as_secs_f64())]
    Timeout { timeout: Duration },

    /// The job process exited unsuccessfully.
    #[error("job process exited with status {}: {}", code.map_or_else(|| "signal".to_string(), |c| c.to_string()), stderr.trim())]
    ProcessFailed {
        /// Exit code, or `None` when the process was terminated by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// The job reported success but its output file does not exist.
    #[error("job reported success but output file is missing: {}", path.display())]
    OutputMissing {
        path: PathBuf,
        stdout: String,
        stderr: String,
    },

    /// The in-process pipeline failed.
    #[error(transparent)]
    Pipeline(#[from] AudioError),
}

impl JobError {
    /// Captured stderr of the job process, when there is one.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            JobError::ProcessFailed { stderr, .. } | JobError::OutputMissing { stderr, .. } => {
                Some(stderr)
            }
            _ => None,
        }
    }
}

impl BackendError for JobError {
    fn code(&self) -> ErrorCode {
        match self {
            JobError::WriteRequestFailed { source, .. }
            | JobError::ReadRequestFailed { source, .. } => source.code(),
            JobError::SpawnFailed { .. }
            | JobError::Timeout { .. }
            | JobError::ProcessFailed { .. }
            | JobError::OutputMissing { .. } => ErrorCode::ProcessFailure,
            JobError::Pipeline(e) => e.code(),
        }
    }

    fn category(&self) -> &'static str {
        "job"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failed_message_includes_stderr() {
        let err = JobError::ProcessFailed {
            code: Some(2),
            stdout: String::new(),
            stderr: "error[E002]: unsupported WAV format\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "job process exited with status 2: error[E002]: unsupported WAV format"
        );
        assert_eq!(err.code(), ErrorCode::ProcessFailure);
        assert_eq!(err.stderr(), Some("error[E002]: unsupported WAV format\n"));
    }

    #[test]
    fn test_signal_exit_message() {
        let err = JobError::ProcessFailed {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(err.to_string().contains("status signal"));
    }

    #[test]
    fn test_pipeline_error_keeps_its_code() {
        let err = JobError::from(AudioError::InputNotFound {
            path: PathBuf::from("uploads/missing.wav"),
        });
        assert_eq!(err.code(), ErrorCode::InputNotFound);
        assert_eq!(err.to_string(), "baseline audio not found: uploads/missing.wav");
    }
}
