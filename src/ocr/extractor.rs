//! Text Extractor
//!
//! Runs one extraction job: validate the upload name, stage the bytes in a
//! fresh workspace, run the OCR tool, read back the sidecar text.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use uuid::Uuid;

use super::{
    tool::{validate_language, OcrTool},
    types::{decode_permissive, is_pdf_filename, Extraction, OcrError, OcrInvocation},
    workspace::Workspace,
};

/// Extracts text from uploaded PDFs through an [`OcrTool`]
#[derive(Clone)]
pub struct TextExtractor {
    tool: Arc<dyn OcrTool>,
    language: String,
    work_dir: Option<PathBuf>,
}

impl std::fmt::Debug for TextExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextExtractor")
            .field("tool", &self.tool.name())
            .field("language", &self.language)
            .field("work_dir", &self.work_dir)
            .finish()
    }
}

impl TextExtractor {
    pub fn new(tool: Arc<dyn OcrTool>, language: impl Into<String>) -> Self {
        Self {
            tool,
            language: language.into(),
            work_dir: None,
        }
    }

    /// Create workspaces under `dir` instead of the system temp dir
    pub fn with_work_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.work_dir = dir;
        self
    }

    /// Reject language codes that could be read as extra tool arguments
    pub fn validate(&self) -> Result<(), OcrError> {
        validate_language(&self.language)
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Extract text from one uploaded file.
    ///
    /// The workspace is removed before this returns, whatever the outcome.
    /// A successful run that leaves no sidecar yields empty text.
    pub async fn extract(&self, file_name: &str, data: &[u8]) -> Result<Extraction, OcrError> {
        if !is_pdf_filename(file_name) {
            return Err(OcrError::UnsupportedFileType(file_name.to_string()));
        }

        let job_id = Uuid::new_v4();
        let start_time = Instant::now();

        let workspace = Workspace::create_async(self.work_dir.clone()).await?;
        let invocation = OcrInvocation {
            input: workspace.input_path(),
            output: workspace.output_path(),
            sidecar: workspace.sidecar_path(),
            language: self.language.clone(),
        };

        tokio::fs::write(&invocation.input, data).await?;

        tracing::debug!(
            job_id = %job_id,
            file_name = %file_name,
            size = data.len(),
            workspace = %workspace.path().display(),
            "Staged upload"
        );

        let output = self.tool.run(&invocation).await?;

        if !output.success() {
            let stderr = decode_permissive(&output.stderr);
            tracing::warn!(
                job_id = %job_id,
                tool = self.tool.name(),
                code = ?output.code,
                stderr = %stderr.trim_end(),
                "OCR tool failed"
            );
            return Err(OcrError::ToolFailed {
                code: output.code,
                stderr,
            });
        }

        let text = match tokio::fs::read(&invocation.sidecar).await {
            Ok(bytes) => decode_permissive(&bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(job_id = %job_id, "OCR tool produced no sidecar");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = workspace.remove().await {
            tracing::warn!(job_id = %job_id, "Failed to remove workspace: {}", e);
        }

        tracing::info!(
            job_id = %job_id,
            file_name = %file_name,
            chars = text.chars().count(),
            elapsed_secs = start_time.elapsed().as_secs_f64(),
            "Extraction complete"
        );

        Ok(Extraction { text })
    }
}
