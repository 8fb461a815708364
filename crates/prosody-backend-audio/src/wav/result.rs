//! WAV encoding result type.

use serde::Serialize;

use crate::error::{AudioError, AudioResult};
use crate::waveform::{Channels, Waveform};

use super::format::WavFormat;
use super::pcm::pcm_hash;
use super::writer::{samples_to_pcm16, write_wav_to_vec, MAX_PCM_BYTES};

/// Result of WAV encoding.
#[derive(Debug, Clone, Serialize)]
pub struct WavResult {
    /// Complete WAV file bytes.
    #[serde(skip)]
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of PCM data only.
    pub pcm_hash: String,
    /// Channel layout.
    pub channels: Channels,
    /// Sample rate in the header, in Hz.
    pub sample_rate: u32,
    /// Number of frames.
    pub num_frames: usize,
}

impl WavResult {
    /// Encodes a waveform.
    pub fn from_waveform(waveform: &Waveform) -> AudioResult<Self> {
        let byte_len = waveform.samples().len() * 2;
        if byte_len > MAX_PCM_BYTES {
            return Err(AudioError::invalid_param(
                "waveform",
                format!("{} bytes of PCM do not fit in a WAV container", byte_len),
            ));
        }

        let pcm = samples_to_pcm16(waveform.samples());
        let format = WavFormat::for_waveform(waveform);

        Ok(Self {
            pcm_hash: pcm_hash(&pcm),
            wav_data: write_wav_to_vec(&format, &pcm),
            channels: waveform.channels(),
            sample_rate: waveform.sample_rate(),
            num_frames: waveform.frame_count(),
        })
    }

    /// Returns the duration in seconds at the header sample rate.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / self.sample_rate as f64
    }
}
