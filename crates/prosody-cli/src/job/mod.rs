//! Caller side of the job contract.
//!
//! A job is described by a [`JobRequest`] document written to the staging
//! directory. A [`JobRunner`] executes it and reports back; every runner
//! applies the same double check before declaring success:
//!
//! 1. the job must report success (exit status 0, or `Ok` in-process)
//! 2. the output file promised by the request must exist afterwards
//!
//! A successful status with no output is still a failure
//! ([`JobError::OutputMissing`]).
//!
//! # Runners
//!
//! - [`SubprocessRunner`] spawns `<exe> generate --request <path>` and waits,
//!   optionally with a timeout
//! - [`InProcessRunner`] calls the pipeline directly in this process

mod error;
mod in_process;
mod subprocess;

use std::path::{Path, PathBuf};
use std::time::Duration;

use prosody_spec::JobRequest;
use serde::Serialize;

pub use error::{JobError, JobResult};
pub use in_process::InProcessRunner;
pub use subprocess::{SubprocessConfig, SubprocessRunner, JOB_BIN_ENV};

/// What a successful job run looks like to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct JobOutcome {
    /// Exit code of the job (always 0 on success).
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// The output file that was verified to exist.
    pub output_path: PathBuf,
    /// Wall-clock time spent running the job.
    pub duration: Duration,
}

/// Runs a job described by a request document.
pub trait JobRunner {
    /// Runs the request at `request_path` and verifies that `expected_output`
    /// exists afterwards.
    fn run(&self, request_path: &Path, expected_output: &Path) -> JobResult<JobOutcome>;
}

/// Checks that a job which reported success actually produced its output.
pub(crate) fn verify_output(
    expected_output: &Path,
    stdout: String,
    stderr: String,
    duration: Duration,
) -> JobResult<JobOutcome> {
    if !expected_output.is_file() {
        return Err(JobError::OutputMissing {
            path: expected_output.to_path_buf(),
            stdout,
            stderr,
        });
    }
    Ok(JobOutcome {
        exit_code: 0,
        stdout,
        stderr,
        output_path: expected_output.to_path_buf(),
        duration,
    })
}

/// Writes `request` to `request_path` and runs it with `runner`.
///
/// The staging directory is created if needed. The expected output is the
/// request's own `output_path`.
pub fn submit<R: JobRunner + ?Sized>(
    runner: &R,
    request: &JobRequest,
    request_path: &Path,
) -> JobResult<JobOutcome> {
    request
        .write_to(request_path)
        .map_err(|source| JobError::WriteRequestFailed {
            path: request_path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        request = %request_path.display(),
        output = %request.output_path.display(),
        "submitting job"
    );

    let outcome = runner.run(request_path, &request.output_path)?;
    tracing::info!(
        output = %outcome.output_path.display(),
        elapsed_ms = outcome.duration.as_millis() as u64,
        "job finished"
    );
    Ok(outcome)
}
