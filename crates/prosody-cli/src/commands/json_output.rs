//! Machine-readable command output.

use prosody_backend_audio::JobReport;
use prosody_spec::BackendError;
use serde::Serialize;

/// A structured error for JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonError {
    /// Stable error code (e.g., "E002")
    pub code: String,
    /// Error category (e.g., "audio", "job")
    pub category: String,
    /// Human-readable error message
    pub message: String,
}

impl JsonError {
    /// Creates a JSON error from a backend error.
    pub fn from_backend<E: BackendError + ?Sized>(err: &E) -> Self {
        Self {
            code: err.code().code().to_string(),
            category: err.category().to_string(),
            message: err.message(),
        }
    }
}

/// Output of `generate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOutput {
    /// Whether the job succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Pipeline report (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<JobReport>,
}

impl GenerateOutput {
    pub fn success(report: JobReport) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            report: Some(report),
        }
    }

    pub fn failure(error: JsonError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            report: None,
        }
    }
}

/// Output of `inspect --json`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectOutput {
    pub path: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub frames: usize,
    pub duration_seconds: f64,
    pub pcm_hash: String,
}
