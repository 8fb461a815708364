//! Tests for the double check applied by job runners.
//!
//! The real `prosody` binary covers the success and pipeline-failure paths.
//! On Unix, `/bin/sh` stands in for a misbehaving job: the runner invokes
//! `sh generate --request <path>`, so `sh` runs a script named `generate`
//! from the working directory.

use std::path::PathBuf;
use std::time::Duration;

use tempfile::TempDir;

use prosody_backend_audio::{encode, Channels, Waveform};
use prosody_cli::job::{
    submit, InProcessRunner, JobError, JobRunner, SubprocessConfig, SubprocessRunner,
};
use prosody_spec::{BackendError, ErrorCode, JobRequest, Layout};

fn prosody_runner() -> SubprocessRunner {
    SubprocessRunner::with_config(
        SubprocessConfig::default()
            .with_executable(env!("CARGO_BIN_EXE_prosody"))
            .with_timeout(Duration::from_secs(60)),
    )
}

fn trial(dir: &TempDir, with_baseline: bool) -> (JobRequest, PathBuf) {
    let layout = Layout::new(dir.path());
    let baseline = layout.baseline_upload_path("1");
    if with_baseline {
        encode(&Waveform::silence(8000, Channels::Mono, 4000).unwrap(), &baseline).unwrap();
    }
    let request = JobRequest::for_trial(1u64, baseline, layout.output_path(1), "two words");
    (request, layout.request_path(1))
}

#[test]
fn subprocess_success_produces_output() {
    let dir = tempfile::tempdir().unwrap();
    let (request, request_path) = trial(&dir, true);

    let outcome = submit(&prosody_runner(), &request, &request_path).unwrap();
    assert_eq!(outcome.exit_code, 0);
    assert_eq!(outcome.output_path, request.output_path);
    assert!(outcome.stdout.contains("Generated:"));
    assert!(request.output_path.is_file());
}

#[test]
fn subprocess_pipeline_failure_is_process_failed() {
    let dir = tempfile::tempdir().unwrap();
    let (request, request_path) = trial(&dir, false);

    let err = submit(&prosody_runner(), &request, &request_path).unwrap_err();
    match &err {
        JobError::ProcessFailed { code, stderr, .. } => {
            assert_eq!(*code, Some(2));
            assert!(stderr.contains("E001"), "stderr: {}", stderr);
        }
        other => panic!("expected ProcessFailed, got {other:?}"),
    }
    assert_eq!(err.code(), ErrorCode::ProcessFailure);
    assert!(!request.output_path.exists());
}

#[test]
fn in_process_and_subprocess_write_identical_audio() {
    let dir = tempfile::tempdir().unwrap();
    let (request, request_path) = trial(&dir, true);

    submit(&prosody_runner(), &request, &request_path).unwrap();
    let via_subprocess = std::fs::read(&request.output_path).unwrap();
    std::fs::remove_file(&request.output_path).unwrap();

    submit(&InProcessRunner, &request, &request_path).unwrap();
    let via_library = std::fs::read(&request.output_path).unwrap();
    assert_eq!(via_subprocess, via_library);
}

#[cfg(unix)]
mod fake_jobs {
    use super::*;

    /// Runner that executes `script` via `/bin/sh` in a scratch directory.
    fn sh_runner(dir: &TempDir, script: &str, timeout: Option<Duration>) -> SubprocessRunner {
        std::fs::write(dir.path().join("generate"), script).unwrap();
        let mut config = SubprocessConfig::default()
            .with_executable("/bin/sh")
            .with_working_dir(dir.path());
        if let Some(timeout) = timeout {
            config = config.with_timeout(timeout);
        }
        SubprocessRunner::with_config(config)
    }

    #[test]
    fn exit_zero_without_output_is_output_missing() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(&dir, "echo pretending\nexit 0\n", None);
        let expected = dir.path().join("never-written.wav");

        let err = runner
            .run(&dir.path().join("req.json"), &expected)
            .unwrap_err();
        match err {
            JobError::OutputMissing { path, stdout, .. } => {
                assert_eq!(path, expected);
                assert_eq!(stdout.trim(), "pretending");
            }
            other => panic!("expected OutputMissing, got {other:?}"),
        }
    }

    #[test]
    fn non_zero_exit_carries_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(&dir, "echo boom >&2\nexit 3\n", None);

        let err = runner
            .run(&dir.path().join("req.json"), &dir.path().join("out.wav"))
            .unwrap_err();
        match &err {
            JobError::ProcessFailed { code, stderr, .. } => {
                assert_eq!(*code, Some(3));
                assert_eq!(stderr.trim(), "boom");
            }
            other => panic!("expected ProcessFailed, got {other:?}"),
        }
        assert_eq!(err.stderr().map(str::trim), Some("boom"));
    }

    #[test]
    fn non_zero_exit_fails_even_if_output_exists() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.wav");
        std::fs::write(&output, b"stale").unwrap();
        let runner = sh_runner(&dir, "exit 1\n", None);

        let err = runner
            .run(&dir.path().join("req.json"), &output)
            .unwrap_err();
        assert!(matches!(err, JobError::ProcessFailed { code: Some(1), .. }));
    }

    #[test]
    fn script_receives_request_path() {
        let dir = tempfile::tempdir().unwrap();
        // Succeeds only when invoked as `generate --request <path>`
        let runner = sh_runner(&dir, "[ \"$1\" = \"--request\" ] || exit 9\ntouch out.wav\n", None);

        let outcome = runner
            .run(&dir.path().join("req.json"), &dir.path().join("out.wav"))
            .unwrap();
        assert_eq!(outcome.exit_code, 0);
    }

    #[test]
    fn timeout_kills_job() {
        let dir = tempfile::tempdir().unwrap();
        let runner = sh_runner(&dir, "exec sleep 5\n", Some(Duration::from_millis(200)));

        let err = runner
            .run(&dir.path().join("req.json"), &dir.path().join("out.wav"))
            .unwrap_err();
        assert!(matches!(err, JobError::Timeout { .. }), "{err:?}");
        assert_eq!(err.code(), ErrorCode::ProcessFailure);
    }
}
