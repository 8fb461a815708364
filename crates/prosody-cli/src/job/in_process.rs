//! Library-call job runner.

use std::path::Path;
use std::time::Instant;

use prosody_backend_audio::process_request;
use prosody_spec::JobRequest;

use super::{verify_output, JobError, JobOutcome, JobResult, JobRunner};

/// Runs the pipeline directly in the calling process.
///
/// Produces the same outcome shape as the subprocess runner: `stdout` holds
/// the line the `generate` command would print.
#[derive(Debug, Clone, Copy, Default)]
pub struct InProcessRunner;

impl JobRunner for InProcessRunner {
    fn run(&self, request_path: &Path, expected_output: &Path) -> JobResult<JobOutcome> {
        let start = Instant::now();
        let request =
            JobRequest::from_file(request_path).map_err(|source| JobError::ReadRequestFailed {
                path: request_path.to_path_buf(),
                source,
            })?;

        let report = process_request(&request)?;
        tracing::debug!(
            output = %report.output_path.display(),
            intensity = report.plan.intensity,
            "in-process job finished"
        );

        verify_output(
            expected_output,
            format!("Generated: {}\n", report.output_path.display()),
            String::new(),
            start.elapsed(),
        )
    }
}
