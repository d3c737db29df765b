//! OCR Types
//!
//! Defines the data passed to and returned from the OCR tool.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Everything the tool needs for one run. All paths live inside a job workspace.
#[derive(Debug, Clone)]
pub struct OcrInvocation {
    /// Staged upload
    pub input: PathBuf,
    /// Rendered OCR'd PDF (discarded after the run)
    pub output: PathBuf,
    /// Plain-text sidecar
    pub sidecar: PathBuf,
    /// Tesseract language code(s), e.g. `fra` or `eng+fra`
    pub language: String,
}

/// Captured result of a finished tool process
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Text extracted from one upload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Unsupported file type: {0:?}")]
    UnsupportedFileType(String),

    #[error("Invalid OCR language code: {0:?}")]
    UnsupportedLanguage(String),

    /// The tool ran and exited unsuccessfully. `stderr` is already decoded.
    #[error("OCR tool exited with status {code:?}")]
    ToolFailed { code: Option<i32>, stderr: String },

    #[error("OCR tool timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Workspace IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Case-insensitive `.pdf` suffix check. Content is never inspected.
pub fn is_pdf_filename(file_name: &str) -> bool {
    let bytes = file_name.as_bytes();
    bytes.len() >= 4 && bytes[bytes.len() - 4..].eq_ignore_ascii_case(b".pdf")
}

/// Decode UTF-8, dropping invalid byte sequences instead of failing.
pub fn decode_permissive(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
