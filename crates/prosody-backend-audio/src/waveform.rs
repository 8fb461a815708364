//! In-memory 16-bit PCM audio.
//!
//! Samples are stored interleaved (`L R L R ...` for stereo). Pipeline stages
//! take a `Waveform` by value and return a new one.

use serde::Serialize;

use crate::error::{AudioError, AudioResult};

/// Channel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channels {
    Mono,
    Stereo,
}

impl Channels {
    /// Number of interleaved samples per frame.
    pub fn count(self) -> u16 {
        match self {
            Channels::Mono => 1,
            Channels::Stereo => 2,
        }
    }

    /// Maps a container channel count to a layout.
    pub fn from_count(count: u16) -> Option<Self> {
        match count {
            1 => Some(Channels::Mono),
            2 => Some(Channels::Stereo),
            _ => None,
        }
    }
}

/// A sequence of 16-bit PCM frames at a fixed sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    sample_rate: u32,
    channels: Channels,
    samples: Vec<i16>,
}

impl Waveform {
    /// Creates a waveform from interleaved samples.
    ///
    /// Fails when the sample rate is zero or the sample count is not a whole
    /// number of frames.
    pub fn new(sample_rate: u32, channels: Channels, samples: Vec<i16>) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::invalid_param(
                "sample_rate",
                "must be greater than 0",
            ));
        }
        let width = channels.count() as usize;
        if samples.len() % width != 0 {
            return Err(AudioError::invalid_param(
                "samples",
                format!(
                    "{} samples do not divide into {}-channel frames",
                    samples.len(),
                    width
                ),
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// Creates a mono waveform.
    pub fn mono(sample_rate: u32, samples: Vec<i16>) -> AudioResult<Self> {
        Self::new(sample_rate, Channels::Mono, samples)
    }

    /// Creates a stereo waveform from `(left, right)` frames.
    pub fn stereo(sample_rate: u32, frames: &[(i16, i16)]) -> AudioResult<Self> {
        let samples = frames.iter().flat_map(|&(l, r)| [l, r]).collect();
        Self::new(sample_rate, Channels::Stereo, samples)
    }

    /// Creates `frames` frames of digital silence.
    pub fn silence(sample_rate: u32, channels: Channels, frames: usize) -> AudioResult<Self> {
        Self::new(
            sample_rate,
            channels,
            vec![0; frames * channels.count() as usize],
        )
    }

    /// Same format as `self`, new samples. The caller keeps frames whole.
    pub(crate) fn with_samples(&self, samples: Vec<i16>) -> Self {
        debug_assert_eq!(samples.len() % self.channels.count() as usize, 0);
        Self {
            sample_rate: self.sample_rate,
            channels: self.channels,
            samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of frames (samples per channel).
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration implied by the frame count and the declared sample rate.
    pub fn duration_seconds(&self) -> f64 {
        self.frame_count() as f64 / self.sample_rate as f64
    }

    /// Iterates frames as slices of `channels.count()` samples.
    pub fn frames(&self) -> std::slice::ChunksExact<'_, i16> {
        self.samples.chunks_exact(self.channels.count() as usize)
    }

    /// Appends `other` after `self`. Both must share rate and layout.
    pub fn concat(self, other: Waveform) -> AudioResult<Waveform> {
        if self.sample_rate != other.sample_rate || self.channels != other.channels {
            return Err(AudioError::invalid_param(
                "waveform",
                format!(
                    "cannot join {} Hz {:?} with {} Hz {:?}",
                    self.sample_rate, self.channels, other.sample_rate, other.channels
                ),
            ));
        }
        let mut samples = self.samples;
        samples.extend_from_slice(&other.samples);
        Ok(Self { samples, ..other })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(Waveform::mono(0, vec![1, 2]).is_err());
    }

    #[test]
    fn test_rejects_partial_stereo_frame() {
        assert!(Waveform::new(8000, Channels::Stereo, vec![1, 2, 3]).is_err());
    }

    #[test]
    fn test_stereo_frames_are_interleaved() {
        let wave = Waveform::stereo(8000, &[(1, -1), (2, -2)]).unwrap();
        assert_eq!(wave.samples(), &[1, -1, 2, -2]);
        assert_eq!(wave.frame_count(), 2);
        let frames: Vec<&[i16]> = wave.frames().collect();
        assert_eq!(frames, vec![&[1, -1][..], &[2, -2][..]]);
    }

    #[test]
    fn test_duration() {
        let wave = Waveform::silence(16000, Channels::Mono, 8000).unwrap();
        assert_eq!(wave.duration_seconds(), 0.5);
    }

    #[test]
    fn test_concat_keeps_order() {
        let a = Waveform::mono(8000, vec![1, 2]).unwrap();
        let b = Waveform::mono(8000, vec![3]).unwrap();
        assert_eq!(a.concat(b).unwrap().samples(), &[1, 2, 3]);
    }

    #[test]
    fn test_concat_rejects_mismatched_format() {
        let a = Waveform::mono(8000, vec![1]).unwrap();
        let b = Waveform::mono(16000, vec![1]).unwrap();
        assert!(a.concat(b).is_err());

        let a = Waveform::mono(8000, vec![1, 2]).unwrap();
        let b = Waveform::stereo(8000, &[(1, 2)]).unwrap();
        assert!(a.concat(b).is_err());
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1), Some(Channels::Mono));
        assert_eq!(Channels::from_count(2), Some(Channels::Stereo));
        assert_eq!(Channels::from_count(6), None);
    }
}
