//! Helpers shared by the HTTP test suites

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ocr_extract_server::{app, AppState};

/// Parses the fixed ocrmypdf arguments into `$sidecar`, `$language`, `$input`, `$output`
pub const ARG_PARSER: &str = r#"
while [ $# -gt 0 ]; do
  case "$1" in
    --sidecar) sidecar="$2"; shift 2 ;;
    --language) language="$2"; shift 2 ;;
    --force-ocr) shift ;;
    *) break ;;
  esac
done
input="$1"
output="$2"
"#;

/// Write an `ocrmypdf` stand-in to `dir` and return the command that runs it
pub fn fake_tool_command(dir: &Path, body: &str) -> Vec<String> {
    let script: PathBuf = dir.join("fake-ocrmypdf.sh");
    std::fs::write(&script, format!("{ARG_PARSER}\n{body}\n")).unwrap();
    vec!["/bin/sh".to_string(), script.display().to_string()]
}

/// Serve the app on an ephemeral local port and return its address
pub async fn spawn_http(state: AppState) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });

    addr
}

/// Multipart form with a single `file` part
pub fn upload_form(file_name: &str, data: &[u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(data.to_vec())
        .file_name(file_name.to_string())
        .mime_str("application/pdf")
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}
