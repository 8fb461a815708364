//! On-disk layout shared by the request writer and the job.
//!
//! ```text
//! <root>/
//!   uploads/     input clips (baseline and optional original)
//!   requests/    ex{N}_request.json
//!   generated/   ex{N}_generated.wav
//! ```
//!
//! `N` is the 1-based example number. Naming outputs after the example keeps
//! concurrent submissions for different examples from colliding.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory for input clips.
pub const UPLOADS_DIR: &str = "uploads";
/// Directory for request documents.
pub const REQUESTS_DIR: &str = "requests";
/// Directory for generated clips.
pub const GENERATED_DIR: &str = "generated";

/// Directory layout rooted at a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Layout {
    /// Creates a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join(UPLOADS_DIR)
    }

    pub fn requests_dir(&self) -> PathBuf {
        self.root.join(REQUESTS_DIR)
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.root.join(GENERATED_DIR)
    }

    /// Request document path for a 1-based example number.
    pub fn request_path(&self, example: usize) -> PathBuf {
        self.requests_dir().join(format!("ex{}_request.json", example))
    }

    /// Generated clip path for a 1-based example number.
    pub fn output_path(&self, example: usize) -> PathBuf {
        self.generated_dir().join(format!("ex{}_generated.wav", example))
    }

    /// Upload path for a clip's baseline.
    pub fn baseline_upload_path(&self, audio_id: &str) -> PathBuf {
        self.uploads_dir().join(format!("{}_baseline.wav", audio_id))
    }

    /// Upload path for a clip's original recording.
    pub fn original_upload_path(&self, audio_id: &str) -> PathBuf {
        self.uploads_dir().join(format!("{}_original.wav", audio_id))
    }

    /// Creates all three directories. Existing directories are left alone.
    pub fn ensure(&self) -> io::Result<()> {
        for dir in [self.uploads_dir(), self.requests_dir(), self.generated_dir()] {
            fs::create_dir_all(&dir)?;
        }
        Ok(())
    }
}
