//! OCR Tool
//!
//! The process-execution seam between the extractor and the external OCR
//! program, plus the `ocrmypdf` implementation used in production.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::types::{decode_permissive, OcrError, OcrInvocation, ToolOutput};

/// Something that can turn an input PDF into an OCR'd PDF plus a text sidecar
#[async_trait]
pub trait OcrTool: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Run one invocation to completion and capture its output.
    ///
    /// A non-zero exit is reported through [`ToolOutput::code`], not as an error.
    async fn run(&self, invocation: &OcrInvocation) -> Result<ToolOutput, OcrError>;
}

/// Validate language code to prevent argument injection
pub fn validate_language(lang: &str) -> Result<(), OcrError> {
    // Tesseract codes: "eng", "eng+deu", "chi_sim"
    if lang.is_empty() || lang.len() > 20 {
        return Err(OcrError::UnsupportedLanguage(lang.to_string()));
    }
    if !lang
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '_')
    {
        return Err(OcrError::UnsupportedLanguage(lang.to_string()));
    }
    Ok(())
}

/// `ocrmypdf` driven as a subprocess
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    program: String,
    leading_args: Vec<String>,
    timeout: Option<Duration>,
}

impl OcrMyPdf {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    /// Build from a command line such as `["python3", "-m", "ocrmypdf"]`.
    /// Returns `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, rest) = command.split_first()?;
        Some(Self::new(program.clone()).with_leading_args(rest.iter().cloned()))
    }

    /// Arguments placed before the OCR flags, e.g. a script path or `-m ocrmypdf`
    pub fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn base_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd
    }

    fn ocr_command(&self, invocation: &OcrInvocation) -> Command {
        let mut cmd = self.base_command();

        cmd.arg("--force-ocr")
            .arg("--language")
            .arg(&invocation.language)
            .arg("--sidecar")
            .arg(&invocation.sidecar)
            .arg(&invocation.input)
            .arg(&invocation.output);

        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // A timed-out or abandoned run must not outlive its workspace
            .kill_on_drop(true);

        cmd
    }

    /// Check if ocrmypdf is available
    pub async fn is_available(&self) -> bool {
        let result = self
            .base_command()
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        matches!(result, Ok(status) if status.success())
    }

    /// Get ocrmypdf version
    pub async fn version(&self) -> Result<String, OcrError> {
        let output = self
            .base_command()
            .arg("--version")
            .output()
            .await
            .map_err(|source| OcrError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OcrError::ToolFailed {
                code: output.status.code(),
                stderr: decode_permissive(&output.stderr),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl OcrTool for OcrMyPdf {
    fn name(&self) -> &str {
        "ocrmypdf"
    }

    async fn run(&self, invocation: &OcrInvocation) -> Result<ToolOutput, OcrError> {
        let mut cmd = self.ocr_command(invocation);
        let output = cmd.output();

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output)
                .await
                .map_err(|_| OcrError::Timeout(limit))?,
            None => output.await,
        }
        .map_err(|source| OcrError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        Ok(ToolOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
