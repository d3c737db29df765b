//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::ocr::{OcrError, OcrMyPdf, OcrTool, TextExtractor};

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("OCR command is empty")]
    EmptyCommand,

    #[error("Invalid OCR configuration: {0}")]
    InvalidOcrConfig(#[from] OcrError),
}

/// Shared application state
///
/// Holds only immutable configuration; every extraction job owns its own
/// workspace, so nothing here is locked.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: Config,
    extractor: TextExtractor,
}

impl AppState {
    /// Create application state backed by `ocrmypdf` as configured
    pub fn new(config: Config) -> Result<Self, StateError> {
        let tool = OcrMyPdf::from_command(&config.ocr.command)
            .ok_or(StateError::EmptyCommand)?
            .with_timeout(config.ocr.timeout());

        Self::with_tool(config, Arc::new(tool))
    }

    /// Create application state around any OCR tool
    pub fn with_tool(config: Config, tool: Arc<dyn OcrTool>) -> Result<Self, StateError> {
        let extractor = TextExtractor::new(tool, config.ocr.language.clone())
            .with_work_dir(config.ocr.work_dir.clone());
        extractor.validate()?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, extractor }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the text extractor
    pub fn extractor(&self) -> &TextExtractor {
        &self.inner.extractor
    }
}
