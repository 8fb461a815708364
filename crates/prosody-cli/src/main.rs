//! Prosody Lab CLI - run and submit prosody transformation jobs
//!
//! `generate` is the job entry point; the other commands prepare and submit
//! request documents on the caller's side.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use prosody_cli::commands;
use prosody_cli::commands::request::RequestArgs;

/// Prosody Lab - per-word prosody audition jobs
#[derive(Parser)]
#[command(name = "prosody")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one job request through the transformation pipeline
    Generate {
        /// Path to the job request document (JSON)
        #[arg(short, long)]
        request: String,

        /// Print the job report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run an existing request document and verify its output
    Submit {
        /// Path to the job request document (JSON)
        #[arg(short, long)]
        request: String,

        /// Kill the job after this many seconds
        #[arg(long, conflicts_with = "in_process")]
        timeout: Option<f64>,

        /// Call the pipeline directly instead of spawning a job process
        #[arg(long)]
        in_process: bool,
    },

    /// Write the default request document for an example
    Request {
        /// Identifier of the clip (numeric or text)
        #[arg(long)]
        audio_id: String,

        /// Baseline clip the job transforms
        #[arg(long)]
        baseline: String,

        /// Untouched source recording, for reference
        #[arg(long)]
        original: Option<String>,

        /// Transcript of the clip; one parameter record per word
        #[arg(long)]
        transcript: String,

        /// Example number (1-based), used for request and output file names
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        example: u32,

        /// Root of the uploads/requests/generated layout
        #[arg(long, default_value = ".")]
        root: String,

        /// Submit the request after writing it
        #[arg(long)]
        submit: bool,

        /// Kill the job after this many seconds (with --submit)
        #[arg(long, requires = "submit", conflicts_with = "in_process")]
        timeout: Option<f64>,

        /// Call the pipeline directly (with --submit)
        #[arg(long, requires = "submit")]
        in_process: bool,
    },

    /// Print format details and the PCM hash of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the uploads/requests/generated directories
    Init {
        /// Root directory
        #[arg(long, default_value = ".")]
        root: String,
    },
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Generate { request, json } => commands::generate::run(&request, json),
        Commands::Submit {
            request,
            timeout,
            in_process,
        } => commands::submit::run(&request, timeout, in_process),
        Commands::Request {
            audio_id,
            baseline,
            original,
            transcript,
            example,
            root,
            submit,
            timeout,
            in_process,
        } => commands::request::run(&RequestArgs {
            audio_id: &audio_id,
            baseline: &baseline,
            original: original.as_deref(),
            transcript: &transcript,
            example: example as usize,
            root: &root,
            submit,
            timeout_secs: timeout,
            in_process,
        }),
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Init { root } => commands::init::run(&root),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
