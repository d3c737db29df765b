//! OCR Module
//!
//! Turns an uploaded PDF into plain text by delegating recognition to
//! `ocrmypdf` and reading back its sidecar text file.
//!
//! ## Requirements
//!
//! - `ocrmypdf` must be installed and available in PATH (or configured via
//!   `OCRMYPDF_COMMAND`)
//! - The Tesseract language pack for the configured language must be installed
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ocr_extract_server::ocr::{OcrMyPdf, TextExtractor};
//!
//! let tool = Arc::new(OcrMyPdf::new("ocrmypdf"));
//! let extractor = TextExtractor::new(tool, "fra");
//!
//! let extraction = extractor.extract("scan.pdf", &pdf_bytes).await?;
//! println!("{}", extraction.text);
//! ```

mod extractor;
mod tool;
mod types;
mod workspace;

pub use extractor::TextExtractor;
pub use tool::{validate_language, OcrMyPdf, OcrTool};
pub use types::{decode_permissive, is_pdf_filename, Extraction, OcrError, OcrInvocation, ToolOutput};
pub use workspace::Workspace;
