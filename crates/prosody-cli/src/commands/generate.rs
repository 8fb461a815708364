//! Generate command implementation
//!
//! Runs one job request through the transformation pipeline. This is the
//! process-boundary entry point spawned by `SubprocessRunner`.

use anyhow::{Context, Result};
use colored::Colorize;
use prosody_backend_audio::process_request;
use prosody_spec::JobRequest;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{GenerateOutput, JsonError};
use super::reporting::print_backend_error;

/// Exit code when the pipeline rejects the job.
pub const EXIT_PIPELINE_FAILED: u8 = 2;

/// Run the generate command
///
/// # Arguments
/// * `request_path` - Path to the job request document
/// * `json_output` - Print the job report as JSON instead of status lines
///
/// # Returns
/// Exit code: 0 success, 1 unreadable request, 2 pipeline failure
pub fn run(request_path: &str, json_output: bool) -> Result<ExitCode> {
    let request = JobRequest::from_file(Path::new(request_path))
        .with_context(|| format!("failed to load job request: {}", request_path))?;

    if !json_output {
        println!(
            "{} {}",
            "Generating:".cyan().bold(),
            request.baseline_path.display()
        );
    }

    match process_request(&request) {
        Ok(report) => {
            if json_output {
                let output = GenerateOutput::success(report);
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                if report.params.skipped_count > 0 {
                    println!(
                        "  {} skipped {} non-numeric parameter value(s)",
                        "!".yellow(),
                        report.params.skipped_count
                    );
                }
                println!(
                    "  {} intensity {:.3}, beep {:.0} Hz, speed x{:.2}, gain x{:.2}",
                    "->".dimmed(),
                    report.plan.intensity,
                    report.plan.beep_frequency_hz,
                    report.plan.speed_factor,
                    report.plan.gain
                );
                println!("{} {}", "Generated:".green().bold(), report.output_path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            if json_output {
                let output = GenerateOutput::failure(JsonError::from_backend(&e));
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            print_backend_error(&e);
            Ok(ExitCode::from(EXIT_PIPELINE_FAILED))
        }
    }
}
