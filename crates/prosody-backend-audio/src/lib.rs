//! Prosody Lab Audio Backend
//!
//! This crate turns a baseline clip plus a per-word parameter map into an
//! audibly modified clip. It stands in for a real prosody backend.
//!
//! # Overview
//!
//! Every stage is driven by a single scalar, the *intensity* in [0, 1],
//! derived from the parameter map:
//!
//! 1. **Decode** the baseline (mono or stereo 16-bit PCM WAV only)
//! 2. **Beep** - prepend a 0.18 s sine burst at `440 + 660 * intensity` Hz
//! 3. **Speed** - nearest-neighbour frame selection with factor `0.8 + 0.4 * intensity`
//! 4. **Gain** - multiply by `1.0 + 0.4 * intensity`, saturating to i16
//! 5. **Encode** with the *original* sample rate, so the speed change is heard
//!    as a combined tempo and pitch shift
//!
//! # Determinism
//!
//! The pipeline has no randomness. The same baseline and parameter map always
//! produce byte-identical output, and [`JobReport::pcm_hash`] can be compared
//! across runs.
//!
//! # Example
//!
//! ```ignore
//! use prosody_backend_audio::process;
//! use prosody_spec::ParameterMap;
//!
//! let report = process(
//!     Path::new("uploads/ex1_baseline.wav"),
//!     Path::new("generated/ex1_generated.wav"),
//!     &ParameterMap::new(),
//! )?;
//! println!("intensity {} -> {}", report.plan.intensity, report.output_path.display());
//! ```
//!
//! # Crate Structure
//!
//! - [`process()`] - Pipeline entry point
//! - [`waveform`] - In-memory PCM frames
//! - [`wav`] - WAV decoding and deterministic encoding
//! - [`intensity`] - Parameter map reduction
//! - [`tone`] - Sine beep generator
//! - [`speed`] - Speed changer
//! - [`gain`] - Saturating gain

pub mod error;
pub mod gain;
pub mod intensity;
pub mod pipeline;
pub mod speed;
pub mod tone;
pub mod wav;
pub mod waveform;

pub use error::{AudioError, AudioResult};
pub use gain::{apply_gain, gain_factor};
pub use intensity::compute_intensity;
pub use pipeline::{process, process_request, transform, JobReport, TransformPlan};
pub use speed::{change_speed, speed_factor};
pub use tone::{beep_frequency, make_beep, BEEP_AMPLITUDE, BEEP_DURATION_SECONDS};
pub use wav::{decode, encode, WavResult};
pub use waveform::{Channels, Waveform};
