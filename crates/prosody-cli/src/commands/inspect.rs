//! Inspect command implementation
//!
//! Decodes a WAV file and prints its format and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use prosody_backend_audio::{decode, WavResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::InspectOutput;

/// Run the inspect command
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    let wave = decode(Path::new(input)).with_context(|| format!("failed to decode {}", input))?;
    let encoded = WavResult::from_waveform(&wave)?;

    let output = InspectOutput {
        path: input.to_string(),
        sample_rate: wave.sample_rate(),
        channels: wave.channels().count(),
        frames: wave.frame_count(),
        duration_seconds: wave.duration_seconds(),
        pcm_hash: encoded.pcm_hash,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "File:".cyan().bold(), output.path);
        println!("  {:<12} {} Hz", "Sample rate", output.sample_rate);
        println!("  {:<12} {}", "Channels", output.channels);
        println!("  {:<12} {}", "Frames", output.frames);
        println!("  {:<12} {:.3} s", "Duration", output.duration_seconds);
        println!("  {:<12} {}", "PCM hash", output.pcm_hash.dimmed());
    }
    Ok(ExitCode::SUCCESS)
}
