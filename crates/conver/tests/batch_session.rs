// Test module - relaxed lint rules
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]
#![allow(missing_docs)]
#![cfg(unix)]

//! Batch conversion tests: session keep-open sequencing and fail-fast.

use conver::backend::Backend;
use conver::driver::Driver;
use conver::{convert_batch_with_driver, convert_with_driver, ConversionRequest, ConvertError};
use std::fs;
use std::path::Path;

const SUCCESS_JSON: &str =
    r#"{"status":"success","input":"/tmp/a.docx","output":"/tmp/a.pdf","message":"OK","error_code":0}"#;

/// Backend that appends each JSON payload to `log` and replies with canned
/// success, so tests can assert exactly what went over the wire.
fn recording_backend(log: &Path) -> Backend {
    let script = format!(
        "printf '%s\\n' \"$1\" >> '{}'; printf '%s' '{SUCCESS_JSON}'",
        log.display()
    );
    Backend::custom(
        "/bin/sh",
        vec!["-c".to_string(), script, "conver-backend".to_string()],
    )
}

/// `keepOpen` flags in dispatch order, read back from the payload log.
fn logged_keep_open(log: &Path) -> Vec<bool> {
    fs::read_to_string(log)
        .unwrap()
        .lines()
        .map(|line| {
            let payload: serde_json::Value = serde_json::from_str(line).unwrap();
            payload["keepOpen"].as_bool().unwrap()
        })
        .collect()
}

fn make_inputs(dir: &Path, count: usize) -> Vec<ConversionRequest> {
    (0..count)
        .map(|index| {
            let input = dir.join(format!("doc{index}.docx"));
            fs::write(&input, b"stub document").unwrap();
            let output = dir.join(format!("doc{index}.pdf"));
            ConversionRequest::build(&input, &output, false).unwrap()
        })
        .collect()
}

#[test]
fn batch_forces_keep_open_until_the_last_request() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let requests = make_inputs(dir.path(), 3);
    let outputs = convert_batch_with_driver(&driver, requests).unwrap();

    assert_eq!(outputs.len(), 3);
    assert_eq!(logged_keep_open(&log), vec![true, true, false]);
}

#[test]
fn last_request_carries_caller_keep_open_preference() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let mut requests = make_inputs(dir.path(), 3);
    for request in &mut requests {
        request.keep_open = true;
    }
    convert_batch_with_driver(&driver, requests).unwrap();

    assert_eq!(logged_keep_open(&log), vec![true, true, true]);
}

#[test]
fn single_request_batch_sends_the_caller_flag_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let requests = make_inputs(dir.path(), 1);
    convert_batch_with_driver(&driver, requests).unwrap();

    assert_eq!(logged_keep_open(&log), vec![false]);
}

#[test]
fn empty_batch_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let outputs = convert_batch_with_driver(&driver, Vec::new()).unwrap();
    assert!(outputs.is_empty());
    assert!(!log.exists(), "no dispatch should have happened");
}

#[test]
fn batch_aborts_on_the_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    // Succeeds once, then reports a save failure for every later request.
    let error_json =
        r#"{"status":"error","input":null,"output":null,"message":"save failed","error_code":31}"#;
    let script = format!(
        "printf '%s\\n' \"$1\" >> '{log}'; \
         if [ \"$(wc -l < '{log}')\" -ge 2 ]; then printf '%s' '{error_json}'; exit 31; \
         else printf '%s' '{SUCCESS_JSON}'; fi",
        log = log.display()
    );
    let driver = Driver::new(Backend::custom(
        "/bin/sh",
        vec!["-c".to_string(), script, "conver-backend".to_string()],
    ));

    let requests = make_inputs(dir.path(), 3);
    let err = convert_batch_with_driver(&driver, requests).unwrap_err();

    assert!(matches!(err, ConvertError::SaveError { .. }), "{err}");
    // The third request was never dispatched.
    assert_eq!(logged_keep_open(&log).len(), 2);
}

#[test]
fn batch_checks_input_existence_before_dispatching() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let missing = dir.path().join("missing.docx");
    let requests = vec![ConversionRequest::build(
        &missing,
        dir.path().join("missing.pdf"),
        false,
    )
    .unwrap()];
    let err = convert_batch_with_driver(&driver, requests).unwrap_err();

    assert!(matches!(err, ConvertError::InputFileNotFound { .. }), "{err}");
    assert!(!log.exists(), "missing input must not reach the backend");
}

#[test]
fn single_conversion_returns_the_reported_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("payloads.log");
    let driver = Driver::new(recording_backend(&log));

    let input = dir.path().join("one.docx");
    fs::write(&input, b"stub document").unwrap();
    let output = convert_with_driver(&driver, &input, dir.path().join("one.pdf"), false).unwrap();

    // The backend's reported path wins, not the requested one.
    assert_eq!(output, Path::new("/tmp/a.pdf"));
    assert_eq!(logged_keep_open(&log), vec![false]);
}
