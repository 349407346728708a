//! High-level conversion API.
//!
//! The thin facade callers use: build a request, pre-flight what can be
//! checked locally, dispatch through the platform driver, interpret the
//! structured response. Batch mode shares one application session across
//! strictly sequential requests.

use crate::driver::Driver;
use crate::error::ConvertError;
use crate::interpret::interpret;
use crate::model::ConversionRequest;
use crate::session::Session;
use std::path::{Path, PathBuf};

/// Convert one document, selecting the backend for the host platform.
///
/// Returns the absolute path of the converted document.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    keep_open: bool,
) -> Result<PathBuf, ConvertError> {
    convert_with_driver(&Driver::detect()?, input, output, keep_open)
}

/// Convert one document through a caller-supplied driver.
pub fn convert_with_driver(
    driver: &Driver,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    keep_open: bool,
) -> Result<PathBuf, ConvertError> {
    let request = ConversionRequest::build(input, output, keep_open)?;
    ensure_input_exists(&request)?;
    let raw = driver.dispatch(&request)?;
    interpret(&raw)
}

/// Convert a sequence of documents through one shared application session.
///
/// All but the last request are dispatched with `keepOpen = true` regardless
/// of their own flag, so the application starts once for the whole batch;
/// the last request keeps its caller-supplied value and thereby decides the
/// session's final disposition. Requests run strictly sequentially and the
/// first failure aborts the batch.
pub fn convert_batch(requests: Vec<ConversionRequest>) -> Result<Vec<PathBuf>, ConvertError> {
    convert_batch_with_driver(&Driver::detect()?, requests)
}

/// Batch conversion through a caller-supplied driver.
pub fn convert_batch_with_driver(
    driver: &Driver,
    requests: Vec<ConversionRequest>,
) -> Result<Vec<PathBuf>, ConvertError> {
    let Some(last) = requests.last() else {
        return Ok(Vec::new());
    };
    let mut session = Session::new(last.keep_open);
    let total = requests.len();
    let mut outputs = Vec::with_capacity(total);

    for (index, mut request) in requests.into_iter().enumerate() {
        let is_last = index + 1 == total;
        request.keep_open = session.effective_keep_open(is_last);
        ensure_input_exists(&request)?;
        let raw = driver.dispatch(&request)?;
        session.note_dispatched(request.keep_open);
        outputs.push(interpret(&raw)?);
    }

    Ok(outputs)
}

/// Pre-flight existence check, so a missing input never costs an
/// application startup. The backend performs the same check (code 11).
fn ensure_input_exists(request: &ConversionRequest) -> Result<(), ConvertError> {
    if request.input.exists() {
        Ok(())
    } else {
        Err(ConvertError::input_not_found(&request.input))
    }
}
