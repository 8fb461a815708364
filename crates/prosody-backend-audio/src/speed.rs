//! Nearest-neighbour speed changer.
//!
//! Frames are picked at positions `0, factor, 2 * factor, ...` (truncated to
//! an index) until the position passes the end. The declared sample rate is
//! kept, so once encoded the clip plays faster and higher for `factor > 1`
//! and slower and lower for `factor < 1`. No interpolation or anti-aliasing
//! filter is applied.

use crate::error::{AudioError, AudioResult};
use crate::waveform::Waveform;

/// Speed factor at zero intensity.
pub const MIN_SPEED_FACTOR: f64 = 0.8;

/// Speed factor added at full intensity.
pub const SPEED_FACTOR_SPAN: f64 = 0.4;

/// Speed factor for an intensity: 0.8 at 0, 1.2 at 1.
pub fn speed_factor(intensity: f64) -> f64 {
    MIN_SPEED_FACTOR + SPEED_FACTOR_SPAN * intensity
}

/// Resamples `waveform` by selecting every `factor`-th frame.
///
/// Stereo frames are selected whole. A factor of exactly 1.0 returns the
/// input unchanged.
///
/// # Errors
/// `InvalidParameter` when `factor` is not a finite positive number.
pub fn change_speed(waveform: Waveform, factor: f64) -> AudioResult<Waveform> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(AudioError::invalid_param(
            "speed_factor",
            format!("must be a finite number greater than 0, got {}", factor),
        ));
    }
    if factor == 1.0 {
        return Ok(waveform);
    }

    let frame_count = waveform.frame_count();
    let width = waveform.channels().count() as usize;
    let end = frame_count as f64;
    let source = waveform.samples();
    // Tiny factors can ask for far more frames than we want to reserve up front.
    let estimate = ((end / factor).ceil() as usize).saturating_mul(width);
    let mut samples = Vec::with_capacity(estimate.min(source.len().saturating_mul(2)));
    // Position is recomputed from k each step so rounding does not accumulate.
    for k in 0u64.. {
        let position = k as f64 * factor;
        if position >= end {
            break;
        }
        let index = position as usize;
        samples.extend_from_slice(&source[index * width..(index + 1) * width]);
    }

    Ok(waveform.with_samples(samples))
}
