//! The job request document.
//!
//! A request is written once by the caller, read once by the job, and never
//! modified in between. Only `baseline_path` and `output_path` are required;
//! the descriptive fields travel along for tooling and are ignored by the
//! transformation itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::params::ParameterMap;

/// Identifier of the clip a request was made for.
///
/// Built-in trials use their 1-based position, uploaded ones a string like
/// `user_1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AudioId {
    Number(u64),
    Text(String),
}

impl std::fmt::Display for AudioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioId::Number(n) => write!(f, "{}", n),
            AudioId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for AudioId {
    fn from(n: u64) -> Self {
        AudioId::Number(n)
    }
}

impl From<&str> for AudioId {
    fn from(s: &str) -> Self {
        AudioId::Text(s.to_string())
    }
}

impl From<String> for AudioId {
    fn from(s: String) -> Self {
        AudioId::Text(s)
    }
}

/// Descriptor handed from the caller to the transformation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Identifier of the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_id: Option<AudioId>,
    /// Untouched source recording, for reference only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<PathBuf>,
    /// Input clip; must exist when the job runs.
    pub baseline_path: PathBuf,
    /// Where the job writes its result. Parent directories are created.
    pub output_path: PathBuf,
    /// Transcript of the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Transcript split into words; indices match `word_params` keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<String>>,
    /// Per-word controls, keyed by word index.
    #[serde(default)]
    pub word_params: ParameterMap,
}

impl JobRequest {
    /// Creates a request with no metadata and an empty parameter map.
    pub fn new(baseline_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            audio_id: None,
            original_path: None,
            baseline_path: baseline_path.into(),
            output_path: output_path.into(),
            transcript: None,
            words: None,
            word_params: ParameterMap::new(),
        }
    }

    /// Creates the default request for a trial: every transcript word gets an
    /// all-zero parameter record.
    pub fn for_trial(
        audio_id: impl Into<AudioId>,
        baseline_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        transcript: &str,
    ) -> Self {
        let words: Vec<String> = transcript.split_whitespace().map(str::to_string).collect();
        Self {
            audio_id: Some(audio_id.into()),
            word_params: ParameterMap::dense(words.len()),
            transcript: Some(transcript.trim().to_string()),
            words: Some(words),
            ..Self::new(baseline_path, output_path)
        }
    }

    /// Sets the parameter map.
    pub fn with_word_params(mut self, word_params: ParameterMap) -> Self {
        self.word_params = word_params;
        self
    }

    /// Parses a request from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads and parses a request document.
    pub fn from_file(path: &Path) -> Result<Self, RequestError> {
        let text = fs::read_to_string(path).map_err(|source| RequestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_json(&text)?)
    }

    /// Serializes the request to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the request document, creating its directory if needed.
    pub fn write_to(&self, path: &Path) -> Result<(), RequestError> {
        let io_err = |source| RequestError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(io_err)
    }
}
