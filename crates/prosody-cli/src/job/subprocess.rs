//! Subprocess-based job runner.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use super::{verify_output, JobError, JobOutcome, JobResult, JobRunner};

/// Environment variable naming the executable that runs jobs.
pub const JOB_BIN_ENV: &str = "PROSODY_JOB_BIN";

/// Interval between exit checks while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the subprocess runner.
#[derive(Debug, Clone)]
pub struct SubprocessConfig {
    /// Executable to spawn. Falls back to `PROSODY_JOB_BIN`, then to the
    /// currently running executable.
    pub executable: Option<PathBuf>,
    /// Kill the job after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Working directory for the job.
    pub working_dir: Option<PathBuf>,
    /// Capture stdout/stderr instead of inheriting them.
    pub capture_output: bool,
}

impl Default for SubprocessConfig {
    fn default() -> Self {
        Self {
            executable: None,
            timeout: None,
            working_dir: None,
            capture_output: true,
        }
    }
}

impl SubprocessConfig {
    /// Sets the executable to spawn.
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = Some(executable.into());
        self
    }

    /// Sets a timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the working directory.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Sets whether output is captured.
    pub fn with_capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

/// Runs each job as a child process: `<exe> generate --request <path>`.
#[derive(Debug, Clone, Default)]
pub struct SubprocessRunner {
    config: SubprocessConfig,
}

impl SubprocessRunner {
    /// Creates a runner with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner with custom configuration.
    pub fn with_config(config: SubprocessConfig) -> Self {
        Self { config }
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &SubprocessConfig {
        &self.config
    }

    /// Resolves the executable to spawn.
    pub fn executable(&self) -> JobResult<PathBuf> {
        if let Some(exe) = &self.config.executable {
            return Ok(exe.clone());
        }
        if let Some(exe) = std::env::var_os(JOB_BIN_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(exe));
        }
        std::env::current_exe().map_err(|source| JobError::SpawnFailed {
            executable: PathBuf::from("<current executable>"),
            source,
        })
    }
}

impl JobRunner for SubprocessRunner {
    fn run(&self, request_path: &Path, expected_output: &Path) -> JobResult<JobOutcome> {
        let executable = self.executable()?;

        let mut cmd = Command::new(&executable);
        cmd.arg("generate").arg("--request").arg(request_path);
        cmd.stdin(Stdio::null());
        if self.config.capture_output {
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit());
            cmd.stderr(Stdio::inherit());
        }
        if let Some(ref cwd) = self.config.working_dir {
            cmd.current_dir(cwd);
        }

        tracing::info!(
            executable = %executable.display(),
            request = %request_path.display(),
            "spawning job"
        );
        let start = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|source| JobError::SpawnFailed { executable, source })?;

        // Pipes are drained on their own threads so a chatty job cannot block
        // on a full pipe while we wait for it.
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let status = wait_with_timeout(&mut child, self.config.timeout);
        let stdout = collect(stdout);
        let stderr = collect(stderr);
        let status = status?;
        let duration = start.elapsed();

        if !status.success() {
            tracing::debug!(code = ?status.code(), "job exited unsuccessfully");
            return Err(JobError::ProcessFailed {
                code: status.code(),
                stdout,
                stderr,
            });
        }

        verify_output(expected_output, stdout, stderr, duration)
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf).ok();
        buf
    })
}

fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}

/// Waits for a child process, killing it once `timeout` has elapsed.
fn wait_with_timeout(child: &mut Child, timeout: Option<Duration>) -> JobResult<ExitStatus> {
    let wait_error = |source| JobError::SpawnFailed {
        executable: PathBuf::from("<job process>"),
        source,
    };

    let Some(timeout) = timeout else {
        return child.wait().map_err(wait_error);
    };

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(timeout_ms = timeout.as_millis() as u64, "killed job after timeout");
                    return Err(JobError::Timeout { timeout });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(wait_error(e)),
        }
    }
}
