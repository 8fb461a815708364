//! Request command implementation
//!
//! Writes the default request document for one example into the staging
//! directory, optionally submitting it right away.

use anyhow::{Context, Result};
use colored::Colorize;
use prosody_spec::{AudioId, JobRequest, Layout};
use std::process::ExitCode;

use super::submit::{build_runner, report_outcome};
use crate::job;

/// Arguments for the request command.
#[derive(Debug, Clone)]
pub struct RequestArgs<'a> {
    pub audio_id: &'a str,
    pub baseline: &'a str,
    pub original: Option<&'a str>,
    pub transcript: &'a str,
    /// 1-based example number.
    pub example: usize,
    pub root: &'a str,
    pub submit: bool,
    pub timeout_secs: Option<f64>,
    pub in_process: bool,
}

/// Parses an audio id, keeping purely numeric ids as numbers.
pub fn parse_audio_id(raw: &str) -> AudioId {
    match raw.parse::<u64>() {
        Ok(n) => AudioId::Number(n),
        Err(_) => AudioId::Text(raw.to_string()),
    }
}

/// Run the request command
pub fn run(args: &RequestArgs<'_>) -> Result<ExitCode> {
    let layout = Layout::new(args.root);
    let mut request = JobRequest::for_trial(
        parse_audio_id(args.audio_id),
        args.baseline,
        layout.output_path(args.example),
        args.transcript,
    );
    request.original_path = args.original.map(Into::into);
    let request_path = layout.request_path(args.example);

    if !args.submit {
        request
            .write_to(&request_path)
            .with_context(|| format!("failed to write {}", request_path.display()))?;
        println!("{} {}", "Request written:".green().bold(), request_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let runner = build_runner(args.timeout_secs, args.in_process)?;
    println!("{} {}", "Submitting:".cyan().bold(), request_path.display());
    Ok(report_outcome(job::submit(&*runner, &request, &request_path)))
}
