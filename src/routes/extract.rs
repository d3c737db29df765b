//! Text extraction endpoint
//!
//! `POST /extract` takes a multipart upload with a `file` field, runs OCR on
//! it and answers `{"text": "..."}`.
//!
//! ```text
//! curl -F file=@scan.pdf http://localhost:8090/extract
//! ```

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::ocr::{is_pdf_filename, Extraction, OcrError};
use crate::state::AppState;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_text))
        // Size limits, if any, are enforced in front of this service
        .layer(DefaultBodyLimit::disable())
}

/// Extract text from an uploaded PDF
async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Extraction>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();

        // Validate before buffering the body
        if !is_pdf_filename(&file_name) {
            tracing::debug!(file_name = %file_name, "Rejected non-PDF upload");
            return Err(OcrError::UnsupportedFileType(file_name).into());
        }

        let data = field.bytes().await?;
        let extraction = state.extractor().extract(&file_name, &data).await?;

        return Ok(Json(extraction));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::BadRequest("Missing file".to_string()))
}
