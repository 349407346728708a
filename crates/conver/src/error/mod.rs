//! Typed conversion errors carrying the stable wire error-code taxonomy.
//!
//! Every failure the driver can surface maps to exactly one variant, and
//! every variant carries the numeric code the automation scripts use on the
//! wire, so callers can branch on kind or forward the code unchanged.

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error code the driver assigns to non-conforming backend output.
pub const MALFORMED_RESPONSE_CODE: i32 = 98;

/// Which side of a conversion an unsupported-format complaint refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatSide {
    /// The source document's format (wire code 2).
    Input,
    /// The requested target format (wire code 3).
    Output,
}

impl FormatSide {
    /// Wire error code for this side.
    pub fn code(self) -> i32 {
        match self {
            Self::Input => 2,
            Self::Output => 3,
        }
    }
}

/// Failure of a conversion request, one variant per wire error code.
///
/// Backend-reported errors keep the backend's original message; locally
/// detected faults (empty paths, unsupported host platform, IPC breakage)
/// use the same code space so the CLI can exit with the code directly.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Code 1: the request was malformed or incomplete.
    #[error("[1] {message}")]
    InvalidRequest {
        message: String,
    },

    /// Codes 2 (input) and 3 (output): a format the converter does not handle.
    #[error("[{}] {message}", .side.code())]
    UnsupportedFormat {
        side: FormatSide,
        message: String,
    },

    /// Code 11: the input file does not exist.
    #[error("[11] {message}")]
    InputFileNotFound {
        message: String,
    },

    /// Code 21: the word-processing application did not start in time.
    #[error("[21] {message}")]
    WordStartError {
        message: String,
    },

    /// Code 31: the document could not be saved in the target format.
    #[error("[31] {message}")]
    SaveError {
        message: String,
    },

    /// IPC-layer fault: spawn failure, timeout, malformed backend output
    /// (code 98), or an error code this driver does not recognize.
    #[error("[{code}] {message}")]
    Ipc {
        code: i32,
        message: String,
    },

    /// Code 99: no automation backend exists for the host platform.
    #[error("[99] {message}")]
    PlatformNotSupported {
        message: String,
    },
}

impl ConvertError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn input_not_found(path: &Path) -> Self {
        Self::InputFileNotFound {
            message: format!("input file does not exist: {}", path.display()),
        }
    }

    /// Generic IPC fault (spawn failure, timeout, protocol breakage).
    pub fn ipc(message: impl Into<String>) -> Self {
        Self::Ipc {
            code: MALFORMED_RESPONSE_CODE,
            message: message.into(),
        }
    }

    /// Backend output that could not be parsed as the response schema.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::Ipc {
            code: MALFORMED_RESPONSE_CODE,
            message: message.into(),
        }
    }

    pub fn platform_not_supported(os: &str) -> Self {
        Self::PlatformNotSupported {
            message: format!("unsupported platform '{os}'"),
        }
    }

    /// Map a backend-reported error code onto its taxonomy variant.
    ///
    /// Unknown codes become [`ConvertError::Ipc`] carrying the raw code and
    /// message; they are never swallowed or downgraded.
    pub fn from_code(code: i32, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            1 => Self::InvalidRequest { message },
            2 => Self::UnsupportedFormat {
                side: FormatSide::Input,
                message,
            },
            3 => Self::UnsupportedFormat {
                side: FormatSide::Output,
                message,
            },
            11 => Self::InputFileNotFound { message },
            21 => Self::WordStartError { message },
            31 => Self::SaveError { message },
            99 => Self::PlatformNotSupported { message },
            other => Self::Ipc {
                code: other,
                message,
            },
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidRequest { .. } => 1,
            Self::UnsupportedFormat { side, .. } => side.code(),
            Self::InputFileNotFound { .. } => 11,
            Self::WordStartError { .. } => 21,
            Self::SaveError { .. } => 31,
            Self::Ipc { code, .. } => *code,
            Self::PlatformNotSupported { .. } => 99,
        }
    }

    /// Human-readable detail without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidRequest { message }
            | Self::UnsupportedFormat { message, .. }
            | Self::InputFileNotFound { message }
            | Self::WordStartError { message }
            | Self::SaveError { message }
            | Self::Ipc { message, .. }
            | Self::PlatformNotSupported { message } => message,
        }
    }
}

impl Diagnostic for ConvertError {}
