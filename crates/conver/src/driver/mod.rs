//! Blocking process driver for the automation backend.
//!
//! One dispatch spawns one backend process, passes the serialized request as
//! a command-line argument, and captures stdout/stderr plus the exit status.
//! Strictly synchronous: the calling thread blocks until the backend exits
//! or the deadline kills it. No retries happen at this layer.

use crate::backend::Backend;
use crate::error::ConvertError;
use crate::model::ConversionRequest;
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default dispatch deadline. Application startup dominates conversion
/// latency, so the default is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Captured output of one backend invocation.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub stdout: String,
    pub stderr: String,
    /// Process exit code; -1 when the process was killed by a signal.
    pub exit_code: i32,
}

impl RawResponse {
    /// Response text to interpret. `osascript` writes its result to stderr,
    /// so a blank stdout falls back to stderr.
    pub fn text(&self) -> &str {
        let out = self.stdout.trim();
        if out.is_empty() {
            self.stderr.trim()
        } else {
            out
        }
    }
}

/// Synchronous dispatcher: one request in flight, one backend process per
/// call. Owns the backend (and with it any materialized script file).
#[derive(Debug)]
pub struct Driver {
    backend: Backend,
    timeout: Duration,
}

impl Driver {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Driver for the host platform with the default deadline. Fails with
    /// code 99 before any process is spawned.
    pub fn detect() -> Result<Self, ConvertError> {
        Ok(Self::new(Backend::detect()?))
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Run one conversion request to completion and capture its output.
    ///
    /// A spawn failure is an IPC fault reported immediately: a backend that
    /// never started cannot have produced a structured response (unlike wire
    /// code 21, which a running script reports when the application itself
    /// fails to start). A deadline overrun kills the process so no
    /// application session is orphaned.
    pub fn dispatch(&self, request: &ConversionRequest) -> Result<RawResponse, ConvertError> {
        let payload = request.to_payload()?;
        let (program, args) = self.backend.command(&payload);
        debug!(
            backend = self.backend.name(),
            input = %request.input.display(),
            output = %request.output.display(),
            keep_open = request.keep_open,
            "dispatching conversion request"
        );

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                ConvertError::ipc(format!("failed to spawn backend '{program}': {err}"))
            })?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_deadline(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "backend deadline exceeded; terminating process"
                );
                let _ = child.kill();
                let _ = child.wait();
                join_capture(stdout);
                join_capture(stderr);
                return Err(ConvertError::ipc(format!(
                    "backend did not respond within {}s; process terminated",
                    self.timeout.as_secs()
                )));
            }
        };

        let stdout = join_capture(stdout);
        let stderr = join_capture(stderr);
        let exit_code = status.code().unwrap_or(-1);
        debug!(exit_code, stdout_bytes = stdout.len(), "backend exited");
        Ok(RawResponse {
            stdout,
            stderr,
            exit_code,
        })
    }
}

/// Collect a pipe on a reader thread so a chatty backend cannot dead-lock
/// against a full pipe buffer while we wait on it.
fn drain(pipe: Option<impl Read + Send + 'static>) -> Option<JoinHandle<String>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut bytes = Vec::new();
            let _ = pipe.read_to_end(&mut bytes);
            // Non-UTF-8 noise must not mask the structured response.
            String::from_utf8_lossy(&bytes).into_owned()
        })
    })
}

fn join_capture(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

fn wait_deadline(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>, ConvertError> {
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if Instant::now() >= deadline {
                    return Ok(None);
                }
                thread::sleep(Duration::from_millis(10));
            }
            Err(err) => {
                return Err(ConvertError::ipc(format!(
                    "failed to wait for backend: {err}"
                )));
            }
        }
    }
}
