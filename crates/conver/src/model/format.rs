//! Save-format table shared with the automation scripts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Document formats the converter handles, with the word processor's
/// save-format code for each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// Modern Word document.
    Docx,
    /// Legacy Word 97-2003 document.
    Doc,
    /// PDF export.
    Pdf,
    /// Rich Text Format.
    Rtf,
    /// OpenDocument Text.
    Odt,
    /// Plain text.
    Txt,
    /// HTML page.
    Html,
}

impl DocumentFormat {
    /// All supported formats, in table order.
    pub const ALL: &'static [DocumentFormat] = &[
        Self::Docx,
        Self::Doc,
        Self::Pdf,
        Self::Rtf,
        Self::Odt,
        Self::Txt,
        Self::Html,
    ];

    /// Save-format code consulted by the automation scripts.
    pub fn save_code(self) -> u32 {
        match self {
            Self::Docx => 16,
            Self::Doc => 0,
            Self::Pdf => 17,
            Self::Rtf => 6,
            Self::Odt => 19,
            Self::Txt => 7,
            Self::Html => 8,
        }
    }

    /// Canonical lowercase file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Pdf => "pdf",
            Self::Rtf => "rtf",
            Self::Odt => "odt",
            Self::Txt => "txt",
            Self::Html => "html",
        }
    }

    /// Case-insensitive extension lookup; accepts a leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.extension().eq_ignore_ascii_case(ext))
    }

    /// Format implied by a path's extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
