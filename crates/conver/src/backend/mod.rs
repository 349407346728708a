//! Automation backend selection and process command construction.
//!
//! The backend is the external program that performs the actual conversion;
//! it is reachable only through the JSON argv contract and its stdout. This
//! module decides which backend fits the host platform and builds the exact
//! argv for one dispatch. Script internals are out of scope here: the driver
//! treats them as a function from request to response.

use crate::error::ConvertError;
use std::io::Write;
use std::path::Path;
use tempfile::TempPath;
use tracing::debug;

// Embedded platform scripts; shipped inside the binary so an installed
// `conver` has no loose files to locate.
const MACOS_SCRIPT: &str = include_str!("../../scripts/convert.jxa");
const WINDOWS_SCRIPT: &str = include_str!("../../scripts/convert.ps1");

/// An embedded script written out to a temp file for the lifetime of the
/// backend. The file is removed when the backend is dropped.
#[derive(Debug)]
pub struct ScriptFile {
    path: TempPath,
}

impl ScriptFile {
    fn materialize(suffix: &str, contents: &str) -> Result<Self, ConvertError> {
        let mut file = tempfile::Builder::new()
            .prefix("conver-convert")
            .suffix(suffix)
            .tempfile()
            .map_err(|err| {
                ConvertError::ipc(format!("failed to materialize automation script: {err}"))
            })?;
        file.write_all(contents.as_bytes()).map_err(|err| {
            ConvertError::ipc(format!("failed to write automation script: {err}"))
        })?;
        let path = file.into_temp_path();
        debug!(path = %path.display(), "materialized automation script");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A platform automation backend.
#[derive(Debug)]
pub enum Backend {
    /// `osascript` running the embedded JXA script.
    MacOs { script: ScriptFile },
    /// `powershell` running the embedded PS1 script.
    Windows { script: ScriptFile },
    /// Arbitrary program receiving the JSON payload as its last argument.
    /// Test seam: lets tests substitute a fake backend with canned output.
    Custom { program: String, args: Vec<String> },
}

impl Backend {
    /// Select the backend for the host operating system.
    ///
    /// Fails with [`ConvertError::PlatformNotSupported`] (code 99) on any
    /// other platform, before any process is spawned.
    pub fn detect() -> Result<Self, ConvertError> {
        Self::for_os(std::env::consts::OS)
    }

    /// Deterministic variant of [`Backend::detect`] keyed on an OS name as
    /// spelled by `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Result<Self, ConvertError> {
        match os {
            "macos" => Ok(Self::MacOs {
                script: ScriptFile::materialize(".jxa", MACOS_SCRIPT)?,
            }),
            "windows" => Ok(Self::Windows {
                script: ScriptFile::materialize(".ps1", WINDOWS_SCRIPT)?,
            }),
            other => Err(ConvertError::platform_not_supported(other)),
        }
    }

    /// Backend that runs `program` with `args` plus the JSON payload.
    pub fn custom(program: impl Into<String>, args: Vec<String>) -> Self {
        Self::Custom {
            program: program.into(),
            args,
        }
    }

    /// Short backend name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MacOs { .. } => "macos-jxa",
            Self::Windows { .. } => "windows-powershell",
            Self::Custom { .. } => "custom",
        }
    }

    /// Program and argv for one dispatch; `payload` is the serialized request.
    pub fn command(&self, payload: &str) -> (String, Vec<String>) {
        match self {
            Self::MacOs { script } => (
                "osascript".to_string(),
                vec![
                    "-l".to_string(),
                    "JavaScript".to_string(),
                    script.path().display().to_string(),
                    payload.to_string(),
                ],
            ),
            Self::Windows { script } => (
                "powershell".to_string(),
                vec![
                    "-ExecutionPolicy".to_string(),
                    "Bypass".to_string(),
                    "-File".to_string(),
                    script.path().display().to_string(),
                    "-jsonArgs".to_string(),
                    payload.to_string(),
                ],
            ),
            Self::Custom { program, args } => {
                let mut argv = args.clone();
                argv.push(payload.to_string());
                (program.clone(), argv)
            }
        }
    }
}
