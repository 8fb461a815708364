//! Reduction of the parameter map to a single intensity.
//!
//! Every numeric value across every word and parameter is averaged; the mean
//! is halved and clamped into [0, 1]. Per-word and per-parameter distinctions
//! are not kept.

use prosody_spec::{ParameterMap, ParameterSummary};

/// Computes the intensity for a parameter map.
///
/// Non-numeric values are skipped. An empty map, or one with nothing numeric,
/// has intensity 0.0.
pub fn compute_intensity(params: &ParameterMap) -> f64 {
    summarize(params).intensity()
}

/// Validates the map and logs what was skipped.
pub fn summarize(params: &ParameterMap) -> ParameterSummary {
    let summary = params.summarize();
    if !summary.is_complete() {
        tracing::warn!(
            valid = summary.valid_count,
            skipped = summary.skipped_count,
            "parameter map had non-numeric values"
        );
    }
    summary
}
