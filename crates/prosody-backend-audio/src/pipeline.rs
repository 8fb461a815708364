//! Baseline-to-output transformation.

use std::path::{Path, PathBuf};

use prosody_spec::{JobRequest, ParameterMap, ParameterSummary};
use serde::Serialize;

use crate::error::{AudioError, AudioResult};
use crate::gain::{apply_gain, gain_factor};
use crate::intensity::summarize;
use crate::speed::{change_speed, speed_factor};
use crate::tone::{beep_frequency, make_beep, BEEP_DURATION_SECONDS};
use crate::wav;
use crate::waveform::{Channels, Waveform};

/// Stage constants derived from one intensity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransformPlan {
    /// Control scalar in [0, 1].
    pub intensity: f64,
    /// Frequency of the prepended beep.
    pub beep_frequency_hz: f64,
    /// Length of the prepended beep.
    pub beep_duration_seconds: f64,
    /// Frame selection step for the speed change.
    pub speed_factor: f64,
    /// Linear gain applied last.
    pub gain: f64,
}

impl TransformPlan {
    /// Derives every stage constant from `intensity`.
    ///
    /// Values outside [0, 1] are clamped; NaN is treated as 0.
    pub fn from_intensity(intensity: f64) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        Self {
            intensity,
            beep_frequency_hz: beep_frequency(intensity),
            beep_duration_seconds: BEEP_DURATION_SECONDS,
            speed_factor: speed_factor(intensity),
            gain: gain_factor(intensity),
        }
    }
}

/// Summary of a finished transformation.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    /// Where the result was written.
    pub output_path: PathBuf,
    /// Sample rate of both input and output headers.
    pub sample_rate: u32,
    /// Channel layout of both input and output.
    pub channels: Channels,
    /// Frames in the decoded baseline.
    pub input_frames: usize,
    /// Frames in the prepended beep.
    pub beep_frames: usize,
    /// Frames written.
    pub output_frames: usize,
    /// Stage constants used.
    pub plan: TransformPlan,
    /// Validation result for the parameter map.
    pub params: ParameterSummary,
    /// BLAKE3 hash of the written PCM payload.
    pub pcm_hash: String,
}

/// Applies beep, speed change and gain to a decoded waveform.
///
/// The beep is generated at the waveform's own rate and layout and
/// prepended before the speed change, so it is sped up along with the speech.
pub fn transform(baseline: Waveform, plan: &TransformPlan) -> AudioResult<Waveform> {
    let beep = make_beep(
        baseline.sample_rate(),
        plan.beep_duration_seconds,
        plan.beep_frequency_hz,
        baseline.channels(),
    )?;
    let joined = beep.concat(baseline)?;
    let sped = change_speed(joined, plan.speed_factor)?;
    Ok(apply_gain(sped, plan.gain))
}

/// Reads `baseline`, transforms it according to `params` and writes `output`.
///
/// Nothing is written unless every stage succeeds. Output directories are
/// created on demand.
///
/// # Errors
/// - `InputNotFound` if `baseline` does not exist
/// - `UnsupportedFormat` / `MalformedWav` if it is not mono or stereo 16-bit PCM
/// - `Io` if the output cannot be written
pub fn process(baseline: &Path, output: &Path, params: &ParameterMap) -> AudioResult<JobReport> {
    if !baseline.is_file() {
        return Err(AudioError::InputNotFound {
            path: baseline.to_path_buf(),
        });
    }

    let input = wav::decode(baseline)?;
    let sample_rate = input.sample_rate();
    let channels = input.channels();
    let input_frames = input.frame_count();

    let summary = summarize(params);
    let plan = TransformPlan::from_intensity(summary.intensity());
    tracing::debug!(
        baseline = %baseline.display(),
        sample_rate,
        ?channels,
        input_frames,
        intensity = plan.intensity,
        "decoded baseline"
    );

    let beep_frames = (sample_rate as f64 * plan.beep_duration_seconds).floor() as usize;
    let transformed = transform(input, &plan)?;
    tracing::debug!(
        beep_hz = plan.beep_frequency_hz,
        speed_factor = plan.speed_factor,
        gain = plan.gain,
        output_frames = transformed.frame_count(),
        "transformed"
    );

    let written = wav::encode(&transformed, output)?;
    tracing::debug!(output = %output.display(), pcm_hash = %written.pcm_hash, "wrote output");

    Ok(JobReport {
        output_path: output.to_path_buf(),
        sample_rate,
        channels,
        input_frames,
        beep_frames,
        output_frames: written.num_frames,
        plan,
        params: summary,
        pcm_hash: written.pcm_hash,
    })
}

/// Runs [`process`] for a request document.
pub fn process_request(request: &JobRequest) -> AudioResult<JobReport> {
    process(
        &request.baseline_path,
        &request.output_path,
        &request.word_params,
    )
}
