//! WAV decoding and deterministic encoding.
//!
//! Only uncompressed 16-bit integer PCM with one or two channels is accepted
//! on input. Output is always a canonical 44-byte-header PCM file with no
//! timestamps or variable metadata, so the PCM hash is stable across runs.

mod format;
mod pcm;
mod reader;
mod result;
mod writer;

#[cfg(test)]
mod tests;

use std::fs;
use std::path::Path;

use crate::error::AudioResult;
use crate::waveform::Waveform;

// Re-export public API
pub use format::WavFormat;
pub use pcm::{compute_pcm_hash, extract_pcm_data, pcm_hash};
pub use reader::{decode, decode_bytes};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec};

/// Encodes a waveform into complete WAV file bytes.
pub fn encode_to_vec(waveform: &Waveform) -> AudioResult<Vec<u8>> {
    Ok(WavResult::from_waveform(waveform)?.wav_data)
}

/// Writes a waveform to `path`, creating missing parent directories.
///
/// The header carries the waveform's own sample rate and channel count. The
/// file is written in a single call once encoding has succeeded.
pub fn encode(waveform: &Waveform, path: &Path) -> AudioResult<WavResult> {
    let result = WavResult::from_waveform(waveform)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &result.wav_data)?;
    Ok(result)
}
