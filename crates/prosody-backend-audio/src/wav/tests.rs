//! Tests for the WAV codec.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use crate::error::AudioError;
use crate::waveform::{Channels, Waveform};

use super::format::WavFormat;
use super::pcm::{compute_pcm_hash, extract_pcm_data};
use super::result::WavResult;
use super::writer::{samples_to_pcm16, write_wav_to_vec};
use super::{decode, decode_bytes, encode, encode_to_vec};

/// Writes a WAV with hound so the decoder is exercised against a
/// second implementation.
fn hound_wav(spec: hound::WavSpec, samples: &[i32]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            match spec.bits_per_sample {
                8 => writer.write_sample(s as i8).unwrap(),
                16 => writer.write_sample(s as i16).unwrap(),
                _ => writer.write_sample(s).unwrap(),
            }
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn int_spec(channels: u16, bits_per_sample: u16) -> hound::WavSpec {
    hound::WavSpec {
        channels,
        sample_rate: 16000,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    }
}

// =========================================================================
// Format tests
// =========================================================================

#[test]
fn test_wav_format_pcm16() {
    let mono = WavFormat::pcm16(44100, Channels::Mono);
    assert_eq!(mono.channels, 1);
    assert_eq!(mono.bits_per_sample, 16);
    assert_eq!(mono.block_align(), 2);
    assert_eq!(mono.byte_rate(), 88200);

    let stereo = WavFormat::pcm16(48000, Channels::Stereo);
    assert_eq!(stereo.channels, 2);
    assert_eq!(stereo.block_align(), 4);
    assert_eq!(stereo.byte_rate(), 192000);
}

// =========================================================================
// Writer tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_little_endian() {
    let pcm = samples_to_pcm16(&[0, 1, -1, i16::MAX, i16::MIN]);
    assert_eq!(pcm, vec![0, 0, 1, 0, 0xFF, 0xFF, 0xFF, 0x7F, 0x00, 0x80]);
}

#[test]
fn test_header_layout() {
    let format = WavFormat::pcm16(16000, Channels::Mono);
    let wav = write_wav_to_vec(&format, &[1, 0, 2, 0]);

    assert_eq!(wav.len(), 48);
    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 40);
    assert_eq!(&wav[8..12], b"WAVE");
    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u16::from_le_bytes([wav[20], wav[21]]), 1); // PCM
    assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 16000);
    assert_eq!(u16::from_le_bytes([wav[34], wav[35]]), 16);
    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 4);
}

#[test]
fn test_encoding_is_deterministic() {
    let wave = Waveform::mono(22050, vec![5, -5, 300, -300]).unwrap();
    assert_eq!(encode_to_vec(&wave).unwrap(), encode_to_vec(&wave).unwrap());
}

#[test]
fn test_hound_reads_encoded_output() {
    let wave = Waveform::stereo(8000, &[(1, -1), (100, -100), (i16::MAX, i16::MIN)]).unwrap();
    let bytes = encode_to_vec(&wave).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 8000);
    assert_eq!(spec.bits_per_sample, 16);
    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, wave.samples());
}

// =========================================================================
// Round trip
// =========================================================================

#[test]
fn test_round_trip_mono_and_stereo() {
    let mono = Waveform::mono(16000, (-50..50).map(|i| i * 600).collect()).unwrap();
    assert_eq!(decode_bytes(&encode_to_vec(&mono).unwrap()).unwrap(), mono);

    let stereo = Waveform::stereo(44100, &[(0, 1), (i16::MIN, i16::MAX), (-7, 7)]).unwrap();
    assert_eq!(decode_bytes(&encode_to_vec(&stereo).unwrap()).unwrap(), stereo);
}

#[test]
fn test_round_trip_empty() {
    let empty = Waveform::mono(16000, Vec::new()).unwrap();
    let decoded = decode_bytes(&encode_to_vec(&empty).unwrap()).unwrap();
    assert!(decoded.is_empty());
    assert_eq!(decoded.sample_rate(), 16000);
}

#[test]
fn test_encode_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("generated").join("nested").join("out.wav");
    let wave = Waveform::mono(8000, vec![1, 2, 3]).unwrap();

    let result = encode(&wave, &path).unwrap();
    assert_eq!(result.num_frames, 3);
    assert_eq!(decode(&path).unwrap(), wave);

    // Second write into the existing directory
    encode(&wave, &path).unwrap();
}

// =========================================================================
// Decoder rejections
// =========================================================================

#[test]
fn test_decode_hound_written_16bit() {
    let bytes = hound_wav(int_spec(1, 16), &[0, 10, -10]);
    let wave = decode_bytes(&bytes).unwrap();
    assert_eq!(wave.samples(), &[0, 10, -10]);
    assert_eq!(wave.channels(), Channels::Mono);
}

#[test]
fn test_decode_rejects_8bit() {
    let bytes = hound_wav(int_spec(1, 8), &[0, 10, -10]);
    let err = decode_bytes(&bytes).unwrap_err();
    assert!(matches!(err, AudioError::UnsupportedFormat { .. }), "{err}");
    assert!(err.to_string().contains("8 bits"));
}

#[test]
fn test_decode_rejects_24bit() {
    let bytes = hound_wav(int_spec(2, 24), &[0, 1, 2, 3]);
    assert!(matches!(
        decode_bytes(&bytes),
        Err(AudioError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_decode_rejects_float() {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0.5f32).unwrap();
        writer.finalize().unwrap();
    }
    assert!(matches!(
        decode_bytes(&cursor.into_inner()),
        Err(AudioError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_decode_rejects_more_than_two_channels() {
    let bytes = hound_wav(int_spec(3, 16), &[0, 1, 2, 3, 4, 5]);
    let err = decode_bytes(&bytes).unwrap_err();
    assert!(err.to_string().contains("3 channels"));
}

#[test]
fn test_decode_rejects_compressed_format_tag() {
    let mut bytes = encode_to_vec(&Waveform::mono(8000, vec![0; 4]).unwrap()).unwrap();
    // IMA ADPCM
    bytes[20..22].copy_from_slice(&0x0011u16.to_le_bytes());
    assert!(matches!(
        decode_bytes(&bytes),
        Err(AudioError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(decode_bytes(b"definitely not a wav file").is_err());
}

// =========================================================================
// PCM extraction and hashing
// =========================================================================

#[test]
fn test_extract_pcm_data() {
    let wave = Waveform::mono(8000, vec![1, 2]).unwrap();
    let bytes = encode_to_vec(&wave).unwrap();
    assert_eq!(extract_pcm_data(&bytes), Some(&[1u8, 0, 2, 0][..]));
    assert_eq!(extract_pcm_data(b"RIFF"), None);
}

#[test]
fn test_pcm_hash_ignores_header_rate() {
    let a = Waveform::mono(8000, vec![1, 2, 3]).unwrap();
    let b = Waveform::mono(16000, vec![1, 2, 3]).unwrap();
    let hash_a = compute_pcm_hash(&encode_to_vec(&a).unwrap()).unwrap();
    let hash_b = compute_pcm_hash(&encode_to_vec(&b).unwrap()).unwrap();
    assert_eq!(hash_a, hash_b);
    assert_eq!(WavResult::from_waveform(&a).unwrap().pcm_hash, hash_a);
}
