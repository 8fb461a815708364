//! Sine beep generator.
//!
//! The beep marks the start of every generated clip. Its pitch rises with
//! intensity, so the strength of a submission can be heard before the speech
//! starts.

use std::f64::consts::PI;

use crate::error::{AudioError, AudioResult};
use crate::waveform::{Channels, Waveform};

/// Length of the beep.
pub const BEEP_DURATION_SECONDS: f64 = 0.18;

/// Peak amplitude of the beep, well below i16 full scale.
pub const BEEP_AMPLITUDE: f64 = 12000.0;

/// Beep pitch at zero intensity.
pub const BEEP_BASE_FREQUENCY_HZ: f64 = 440.0;

/// Longest tone `make_beep` will generate, in frames.
pub const MAX_BEEP_FRAMES: usize = u32::MAX as usize / 4;

/// Pitch added at full intensity.
pub const BEEP_FREQUENCY_SPAN_HZ: f64 = 660.0;

/// Beep pitch for an intensity: 440 Hz at 0, 1100 Hz at 1.
pub fn beep_frequency(intensity: f64) -> f64 {
    BEEP_BASE_FREQUENCY_HZ + BEEP_FREQUENCY_SPAN_HZ * intensity
}

/// Generates a constant-amplitude sine tone.
///
/// The tone has `floor(sample_rate * duration_seconds)` frames, evenly spaced
/// over `duration_seconds` with the end point excluded. Values are truncated
/// toward zero. Stereo output carries the same value in both channels.
///
/// # Errors
/// Fails when `sample_rate` is zero or the tone would exceed
/// [`MAX_BEEP_FRAMES`].
pub fn make_beep(
    sample_rate: u32,
    duration_seconds: f64,
    frequency_hz: f64,
    channels: Channels,
) -> AudioResult<Waveform> {
    // Negative or NaN durations saturate to zero frames.
    let num_frames = if duration_seconds.is_finite() {
        let frames = (sample_rate as f64 * duration_seconds).floor();
        if frames > MAX_BEEP_FRAMES as f64 {
            return Err(AudioError::invalid_param(
                "duration_seconds",
                format!(
                    "{} s at {} Hz exceeds {} frames",
                    duration_seconds, sample_rate, MAX_BEEP_FRAMES
                ),
            ));
        }
        frames as usize
    } else {
        0
    };
    let step = if num_frames > 0 {
        duration_seconds / num_frames as f64
    } else {
        0.0
    };
    let width = channels.count() as usize;

    let mut samples = Vec::with_capacity(num_frames * width);
    for i in 0..num_frames {
        let t = i as f64 * step;
        let value = (BEEP_AMPLITUDE * (2.0 * PI * frequency_hz * t).sin()) as i16;
        samples.extend(std::iter::repeat(value).take(width));
    }

    Waveform::new(sample_rate, channels, samples)
}
