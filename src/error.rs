//! Error types for the OCR extraction server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::ocr::OcrError;

/// Message returned for any upload whose name does not end in `.pdf`
pub const ONLY_PDF_MESSAGE: &str = "Only PDF supported";

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The OCR tool exited unsuccessfully; carries its stderr verbatim
    #[error("OCR tool error: {0}")]
    OcrTool(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::UnsupportedFileType(_) => AppError::BadRequest(ONLY_PDF_MESSAGE.to_string()),
            OcrError::ToolFailed { stderr, .. } => AppError::OcrTool(stderr),
            OcrError::Timeout(limit) => {
                AppError::Timeout(format!("OCR tool timed out after {:?}", limit))
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::OcrTool(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            AppError::BadRequest(msg) | AppError::OcrTool(msg) | AppError::Timeout(msg) => msg,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
