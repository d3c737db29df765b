//! Health endpoint tests

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use axum_test::TestServer;
use tower::ServiceExt;

use ocr_extract_server::{app, AppState, Config};

fn state() -> AppState {
    // Never spawned: health must not depend on the OCR tool
    let mut config = Config::default();
    config.ocr.command = vec!["/nonexistent/ocrmypdf".to_string()];
    AppState::new(config).unwrap()
}

#[tokio::test]
async fn test_health_returns_ok() {
    let response = app(state())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn test_health_is_repeatable() {
    let server = TestServer::new(app(state())).unwrap();

    for _ in 0..3 {
        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>(), serde_json::json!({ "ok": true }));
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = TestServer::new(app(state())).unwrap();

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[cfg(unix)]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_health_answers_while_extraction_runs() {
    use std::time::{Duration, Instant};

    let scratch = tempfile::TempDir::new().unwrap();
    let mut config = Config::default();
    config.ocr.command = common::fake_tool_command(scratch.path(), "sleep 1");
    config.ocr.work_dir = Some(scratch.path().to_path_buf());
    let addr = common::spawn_http(AppState::new(config).unwrap()).await;
    let client = reqwest::Client::new();

    let started = Instant::now();
    let extraction = {
        let client = client.clone();
        tokio::spawn(async move {
            let response = client
                .post(format!("http://{addr}/extract"))
                .multipart(common::upload_form("slow.pdf", b"%PDF-1.4"))
                .send()
                .await
                .unwrap();
            (response.status(), response.json::<serde_json::Value>().await.unwrap())
        })
    };

    // Let the upload reach the tool
    tokio::time::sleep(Duration::from_millis(200)).await;

    let response = client
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>().await.unwrap(),
        serde_json::json!({ "ok": true })
    );
    assert!(started.elapsed() < Duration::from_millis(800));
    assert!(!extraction.is_finished());

    let (status, body) = extraction.await.unwrap();
    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "text": "" }));
    assert!(started.elapsed() >= Duration::from_secs(1));
}
