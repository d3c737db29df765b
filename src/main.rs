//! OCR Extract Server
//!
//! Network-callable text extraction for PDFs, backed by `ocrmypdf`.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ocr_extract_server::{ocr::OcrMyPdf, routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "ocr_extract_server=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting OCR Extract Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("OCR command: {}", config.ocr.command.join(" "));
    tracing::info!("OCR language: {}", config.ocr.language);
    match config.ocr.timeout() {
        Some(limit) => tracing::info!("OCR timeout: {:?}", limit),
        None => tracing::info!("OCR timeout: none"),
    }

    // The server still starts without the tool; jobs will fail until it is installed
    if let Some(tool) = OcrMyPdf::from_command(&config.ocr.command) {
        if tool.is_available().await {
            match tool.version().await {
                Ok(version) => tracing::info!("ocrmypdf version {}", version),
                Err(e) => tracing::warn!("Could not read ocrmypdf version: {}", e),
            }
        } else {
            tracing::warn!("ocrmypdf is not available; extraction requests will fail");
        }
    }

    let app_state = AppState::new(config.clone()).context("Failed to initialize application state")?;

    let app = routes::app(app_state);

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid SERVER_HOST {:?}", config.server.host))?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("OCR Extract Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
