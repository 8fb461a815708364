//! Submit command implementation
//!
//! Runs an existing request document through a job runner and reports the
//! double-checked outcome.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use prosody_spec::JobRequest;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use super::reporting::{print_backend_error, print_captured};
use crate::job::{
    InProcessRunner, JobError, JobOutcome, JobResult, JobRunner, SubprocessConfig,
    SubprocessRunner,
};

/// Exit code when the job fails its double check.
pub const EXIT_JOB_FAILED: u8 = 2;

/// Builds the runner selected on the command line.
pub fn build_runner(timeout_secs: Option<f64>, in_process: bool) -> Result<Box<dyn JobRunner>> {
    if in_process {
        return Ok(Box::new(InProcessRunner));
    }
    let mut config = SubprocessConfig::default();
    if let Some(secs) = timeout_secs {
        if !secs.is_finite() || secs <= 0.0 {
            bail!("timeout must be a positive number of seconds, got {}", secs);
        }
        let timeout = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("timeout of {} seconds is too large", secs))?;
        config = config.with_timeout(timeout);
    }
    Ok(Box::new(SubprocessRunner::with_config(config)))
}

/// Run the submit command
///
/// # Returns
/// Exit code: 0 success, 1 unreadable request or bad flags, 2 job failure
pub fn run(request_path: &str, timeout_secs: Option<f64>, in_process: bool) -> Result<ExitCode> {
    let path = Path::new(request_path);
    let request = JobRequest::from_file(path)
        .with_context(|| format!("failed to load job request: {}", request_path))?;
    let runner = build_runner(timeout_secs, in_process)?;

    println!("{} {}", "Submitting:".cyan().bold(), request_path);
    Ok(report_outcome(runner.run(path, &request.output_path)))
}

/// Prints a job result and maps it to an exit code.
pub(crate) fn report_outcome(result: JobResult<JobOutcome>) -> ExitCode {
    match result {
        Ok(outcome) => {
            println!(
                "{} {} ({:.2}s)",
                "Generated:".green().bold(),
                outcome.output_path.display(),
                outcome.duration.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_backend_error(&e);
            if let JobError::ProcessFailed { stdout, stderr, .. }
            | JobError::OutputMissing { stdout, stderr, .. } = &e
            {
                print_captured("job stdout:", stdout);
                print_captured("job stderr:", stderr);
            }
            ExitCode::from(EXIT_JOB_FAILED)
        }
    }
}
