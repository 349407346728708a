// Test module - relaxed lint rules
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]
#![allow(missing_docs)]

//! CLI argument-surface tests against the built binary.

use std::process::{Command, Output};

fn conver(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_conver"))
        .args(args)
        .output()
        .expect("failed to run conver binary")
}

#[test]
fn version_flag_prints_the_crate_version() {
    let output = conver(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "{stdout}");
}

#[test]
fn help_lists_the_format_flags() {
    let output = conver(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--pdf", "--docx", "--doc", "--rtf", "--odt", "--txt", "--html"] {
        assert!(stdout.contains(flag), "missing {flag} in help:\n{stdout}");
    }
    assert!(stdout.contains("--keep-open"), "{stdout}");
}

#[test]
fn missing_input_is_a_usage_error() {
    let output = conver(&[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("INPUT"), "{stderr}");
}

#[test]
fn two_format_flags_conflict() {
    let output = conver(&["--pdf", "--txt", "a.docx"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot be used with"), "{stderr}");
}

#[test]
fn output_conflicts_with_format_flags() {
    let output = conver(&["--pdf", "-o", "out.pdf", "a.docx"]);
    assert_eq!(output.status.code(), Some(2));
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn unsupported_platform_exits_with_code_99() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("a.docx");
    std::fs::write(&input, b"stub").unwrap();

    let output = conver(&[input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(99));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[99]"), "{stderr}");
}

#[cfg(all(unix, not(target_os = "macos")))]
#[test]
fn batch_with_scattered_inputs_needs_an_output_directory() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let one = dir_a.path().join("one.docx");
    let two = dir_b.path().join("two.docx");
    std::fs::write(&one, b"stub").unwrap();
    std::fs::write(&two, b"stub").unwrap();

    let output = conver(&[one.to_str().unwrap(), two.to_str().unwrap()]);
    // Inferring a common parent fails before platform detection runs.
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("different directories"), "{stderr}");
}
