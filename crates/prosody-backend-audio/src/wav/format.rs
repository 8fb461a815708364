//! WAV file format parameters.

use crate::waveform::{Channels, Waveform};

/// WAV file format parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample (always 16 for this implementation).
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Creates a 16-bit format for the given layout.
    pub fn pcm16(sample_rate: u32, channels: Channels) -> Self {
        Self {
            channels: channels.count(),
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Format matching a waveform's rate and layout.
    pub fn for_waveform(waveform: &Waveform) -> Self {
        Self::pcm16(waveform.sample_rate(), waveform.channels())
    }

    /// Calculates bytes per sample (per channel).
    pub(crate) fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    /// Calculates block align (bytes per sample frame).
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Calculates byte rate (bytes per second).
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(self.block_align() as u32)
    }
}
