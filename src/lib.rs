//! OCR Extract Server Library
//!
//! Accepts PDF uploads over HTTP, runs `ocrmypdf` on them with a text
//! sidecar and returns the recognized text as JSON.
//!
//! # Modules
//!
//! - `config`: Environment-driven configuration
//! - `error`: HTTP error mapping
//! - `ocr`: Workspace staging and the OCR tool seam
//! - `routes`: `/extract` and `/health`
//! - `state`: Shared application state

pub mod config;
pub mod error;
pub mod ocr;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::app;
pub use state::AppState;
