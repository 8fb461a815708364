//! WAV decoding via `hound`.

use std::io::{Cursor, Read};
use std::path::Path;

use crate::error::{AudioError, AudioResult};
use crate::waveform::{Channels, Waveform};

/// Decodes a WAV file.
///
/// The caller is expected to have checked that `path` exists; a missing file
/// surfaces here as a plain I/O error.
///
/// # Errors
/// - `UnsupportedFormat` for compressed or float data, any bit depth other
///   than 16, or more than two channels
/// - `MalformedWav` when the container cannot be parsed
pub fn decode(path: &Path) -> AudioResult<Waveform> {
    let reader = hound::WavReader::open(path)?;
    decode_reader(reader)
}

/// Decodes WAV file bytes held in memory.
pub fn decode_bytes(wav_data: &[u8]) -> AudioResult<Waveform> {
    let reader = hound::WavReader::new(Cursor::new(wav_data))?;
    decode_reader(reader)
}

fn decode_reader<R: Read>(mut reader: hound::WavReader<R>) -> AudioResult<Waveform> {
    let spec = reader.spec();

    if spec.sample_format != hound::SampleFormat::Int {
        return Err(AudioError::unsupported(format!(
            "sample format {:?} (only integer PCM is supported)",
            spec.sample_format
        )));
    }
    if spec.bits_per_sample != 16 {
        return Err(AudioError::unsupported(format!(
            "{} bits per sample (only 16-bit PCM is supported)",
            spec.bits_per_sample
        )));
    }
    let channels = Channels::from_count(spec.channels).ok_or_else(|| {
        AudioError::unsupported(format!(
            "{} channels (only mono and stereo are supported)",
            spec.channels
        ))
    })?;

    let samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<i16>, _>>()?;

    tracing::debug!(
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        samples = samples.len(),
        "decoded wav"
    );

    Waveform::new(spec.sample_rate, channels, samples).map_err(|e| AudioError::MalformedWav {
        message: e.to_string(),
    })
}
