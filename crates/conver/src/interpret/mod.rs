//! Response interpretation: raw backend output to a typed result.

use crate::driver::RawResponse;
use crate::error::ConvertError;
use crate::model::protocol::absolutize;
use crate::model::{ConversionResponse, ResponseStatus};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Interpret one captured backend response.
///
/// A pure function of its input: interpreting the same raw output twice
/// yields the same result or the same error. Output that does not parse as
/// the response schema is always an IPC-layer fault (code 98), regardless of
/// the process exit code; it is never surfaced as a domain error.
pub fn interpret(raw: &RawResponse) -> Result<PathBuf, ConvertError> {
    let response: ConversionResponse = serde_json::from_str(raw.text()).map_err(|err| {
        ConvertError::malformed_response(format!("invalid JSON output from backend: {err}"))
    })?;
    interpret_response(&response, raw.exit_code)
}

/// Interpret an already-parsed response against the error-code taxonomy.
///
/// `error_code` is authoritative for classification; the process exit code
/// is only cross-checked and a mismatch logged.
pub fn interpret_response(
    response: &ConversionResponse,
    exit_code: i32,
) -> Result<PathBuf, ConvertError> {
    if response.error_code != 0 {
        if exit_code == 0 {
            warn!(
                error_code = response.error_code,
                "backend exited cleanly but reported an error; trusting error_code"
            );
        }
        let message = if response.message.is_empty() {
            "unknown error".to_string()
        } else {
            response.message.clone()
        };
        return Err(ConvertError::from_code(response.error_code, message));
    }

    match response.status {
        ResponseStatus::Success => {
            if exit_code != 0 {
                warn!(
                    exit_code,
                    "backend exit code disagrees with error_code 0; trusting error_code"
                );
            }
            let output = response
                .output
                .as_deref()
                .filter(|path| !path.is_empty())
                .ok_or_else(|| {
                    ConvertError::malformed_response("success response missing output path")
                })?;
            absolutize(Path::new(output))
        }
        // status and error_code contradict each other; the schema invariant
        // `status == "success" iff error_code == 0` is part of the contract
        ResponseStatus::Error => Err(ConvertError::malformed_response(
            "backend reported status 'error' with error_code 0",
        )),
    }
}
