//! Wire types for the request/response contract with the automation scripts.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single conversion order, ready to serialize for the backend.
///
/// Both paths are absolute by the time a request exists: the backend runs
/// with its own working context and must never have to guess what a relative
/// path means.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Absolute path to the source document.
    pub input: PathBuf,
    /// Absolute path the converted document should be written to; its
    /// extension selects the target format.
    pub output: PathBuf,
    /// Whether the application should stay open after this conversion.
    #[serde(rename = "keepOpen")]
    pub keep_open: bool,
}

impl ConversionRequest {
    /// Normalize caller-supplied paths into an unambiguous request.
    ///
    /// A leading `~` is expanded, relative paths are resolved against the
    /// current working directory, and a filename-only output is placed next
    /// to the input file. Fails with [`ConvertError::InvalidRequest`] when
    /// either path is empty. No filesystem existence check happens here;
    /// that is the backend's job (error code 11) or the caller's pre-flight.
    pub fn build(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        keep_open: bool,
    ) -> Result<Self, ConvertError> {
        let input = input.as_ref();
        let output = output.as_ref();
        if input.as_os_str().is_empty() {
            return Err(ConvertError::invalid_request("input path is empty"));
        }
        if output.as_os_str().is_empty() {
            return Err(ConvertError::invalid_request("output path is empty"));
        }

        let input = absolutize(&expand_user(input))?;
        let out_raw = expand_user(output);
        let output = if is_bare_filename(&out_raw) {
            match input.parent() {
                Some(dir) => dir.join(&out_raw),
                None => absolutize(&out_raw)?,
            }
        } else {
            absolutize(&out_raw)?
        };

        Ok(Self {
            input,
            output,
            keep_open,
        })
    }

    /// JSON payload passed to the backend as a single argv entry.
    pub fn to_payload(&self) -> Result<String, ConvertError> {
        serde_json::to_string(self)
            .map_err(|err| ConvertError::ipc(format!("failed to encode request: {err}")))
    }
}

/// Execution status reported by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Structured response parsed from the backend's output.
///
/// `status` and `error_code` are required; a response missing either is not
/// a conforming response at all and is treated as an IPC fault upstream.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversionResponse {
    pub status: ResponseStatus,
    /// Echo of the input path; may be null in early error cases.
    #[serde(default)]
    pub input: Option<String>,
    /// Path of the converted document; null on failure.
    #[serde(default)]
    pub output: Option<String>,
    /// `"OK"` on success, otherwise a human-readable error description.
    #[serde(default)]
    pub message: String,
    /// 0 on success; taxonomy code on failure.
    pub error_code: i32,
}

/// Output path with a parent of `""` or `"."`, i.e. just a filename.
fn is_bare_filename(path: &Path) -> bool {
    matches!(
        path.parent().and_then(|parent| parent.to_str()),
        Some("") | Some(".")
    )
}

/// Expand a leading `~` to the user's home directory, when known.
fn expand_user(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if text == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }
    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Resolve a path against the current working directory without touching the
/// filesystem (the output file usually does not exist yet).
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf, ConvertError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|err| {
        ConvertError::invalid_request(format!("cannot resolve relative path: {err}"))
    })?;
    Ok(cwd.join(path))
}
