//! Saturating gain.

use crate::waveform::Waveform;

/// Gain added at full intensity.
pub const GAIN_SPAN: f64 = 0.4;

/// Linear gain for an intensity: 1.0 at 0, 1.4 at 1.
pub fn gain_factor(intensity: f64) -> f64 {
    1.0 + GAIN_SPAN * intensity
}

/// Scales one sample, saturating into the i16 range and truncating toward zero.
#[inline]
pub fn scale_sample(sample: i16, gain: f64) -> i16 {
    // NaN products become 0 in the cast.
    (sample as f64 * gain).clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Multiplies every sample by `gain`.
///
/// Results are clamped to [-32768, 32767] before truncation, so any gain,
/// including negative and non-finite values, yields valid samples.
pub fn apply_gain(waveform: Waveform, gain: f64) -> Waveform {
    let samples = waveform
        .samples()
        .iter()
        .map(|&s| scale_sample(s, gain))
        .collect();
    waveform.with_samples(samples)
}
