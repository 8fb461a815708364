//! Prosody Lab Request Library
//!
//! This crate provides the types shared by the transformation pipeline and the
//! processes that drive it: the JSON job request document, the per-word
//! parameter map and its validation, stable error codes, and the on-disk
//! layout used by the surrounding tooling.
//!
//! # Example
//!
//! ```
//! use prosody_spec::{JobRequest, WordParams};
//!
//! let mut request = JobRequest::for_trial(
//!     "ex1",
//!     "uploads/ex1_baseline.wav",
//!     "generated/ex1_generated.wav",
//!     "the quick brown fox",
//! );
//! request.word_params.insert_word(2, WordParams { breathiness: 2.0, ..WordParams::default() });
//!
//! let summary = request.word_params.summarize();
//! assert_eq!(summary.valid_count, 20);
//! assert!((summary.intensity() - 0.05).abs() < 1e-12);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error codes and the backend error trait
//! - [`layout`]: Input/staging/output directory conventions
//! - [`params`]: Word parameter records and loose-map validation
//! - [`request`]: The job request document

pub mod error;
pub mod layout;
pub mod params;
pub mod request;

// Re-export commonly used types at the crate root
pub use error::{BackendError, ErrorCode, RequestError};
pub use layout::Layout;
pub use params::{coerce_number, ParameterMap, ParameterSummary, WordParams, PARAM_NAMES};
pub use request::{AudioId, JobRequest};
