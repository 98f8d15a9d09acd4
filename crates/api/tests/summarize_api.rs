//! Integration tests for job start and progress polling.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get, post_multipart, Part};
use summarizer_core::download::{render, DownloadFormat};
use summarizer_core::error::CoreError;
use summarizer_core::summarize::Summarizer;

/// Poll `/progress/{id}` until the job finishes or fails.
async fn wait_for_completion(app: &Router, session_id: &str) -> serde_json::Value {
    for _ in 0..200 {
        let json = body_json(get(app.clone(), &format!("/progress/{session_id}")).await).await;
        if json["progress"].as_u64().unwrap_or(0) >= 100 || json.get("error").is_some() {
            return json;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {session_id} did not finish");
}

async fn start(app: &Router, parts: &[Part<'_>]) -> String {
    let response = post_multipart(app.clone(), "/start_summarization", parts).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["session_id"]
        .as_str()
        .expect("session_id must be a string")
        .to_string()
}

#[tokio::test]
async fn text_field_is_summarized_chunk_by_chunk() {
    let app = common::build_test_app();
    let id = start(
        &app,
        &[Part::Text(
            "text",
            "Rust is fast and safe. It has a strict compiler that catches many bugs early on. \
             Tooling is great too. Cargo builds everything. The rest is detail.",
        )],
    )
    .await;

    let json = wait_for_completion(&app, &id).await;
    assert_eq!(json["progress"], 100);
    assert_eq!(
        json["summary"],
        "Rust is fast and safe. Cargo builds everything. The rest"
    );
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn uploaded_text_file_wins_over_text_field() {
    let app = common::build_test_app();
    let id = start(
        &app,
        &[
            Part::Text("text", "ignored words here"),
            Part::File {
                name: "file",
                filename: "NOTES.TXT",
                bytes: b"From the file.",
            },
        ],
    )
    .await;

    let json = wait_for_completion(&app, &id).await;
    assert_eq!(json["summary"], "From the file.");
}

#[tokio::test]
async fn empty_file_input_falls_back_to_text() {
    let app = common::build_test_app();
    let id = start(
        &app,
        &[
            Part::File {
                name: "file",
                filename: "",
                bytes: b"",
            },
            Part::Text("text", "Fallback text."),
        ],
    )
    .await;

    let json = wait_for_completion(&app, &id).await;
    assert_eq!(json["summary"], "Fallback text.");
}

#[tokio::test]
async fn blank_text_is_rejected() {
    let app = common::build_test_app();
    let response = post_multipart(app, "/start_summarization", &[Part::Text("text", "  \n ")]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No text provided.");
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn uploaded_docx_is_extracted() {
    let docx = render("The quarterly numbers look very strong.", DownloadFormat::Docx).unwrap();
    let app = common::build_test_app();
    let id = start(
        &app,
        &[Part::File {
            name: "file",
            filename: "report.docx",
            bytes: &docx.bytes,
        }],
    )
    .await;

    let json = wait_for_completion(&app, &id).await;
    assert_eq!(json["summary"], "The quarterly numbers look very strong.");
}

#[tokio::test]
async fn corrupt_pdf_upload_is_rejected() {
    let app = common::build_test_app();
    let response = post_multipart(
        app,
        "/start_summarization",
        &[Part::File {
            name: "file",
            filename: "paper.pdf",
            bytes: b"%PDF-1.7 truncated",
        }],
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_session_reports_zero_progress_without_caching() {
    let app = common::build_test_app();
    let response = get(app, "/progress/does-not-exist").await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "no-cache, no-store, must-revalidate"
    );
    assert_eq!(headers.get("pragma").unwrap(), "no-cache");
    assert_eq!(headers.get("expires").unwrap(), "0");

    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"progress": 0, "summary": ""}));
}

struct Broken;

impl Summarizer for Broken {
    fn summarize(&self, _chunk: &str) -> Result<String, CoreError> {
        Err(CoreError::Internal("model offline".into()))
    }
}

#[tokio::test]
async fn summarizer_failure_is_reported_on_progress() {
    let app = common::build_test_app_with(Arc::new(Broken));
    let id = start(&app, &[Part::Text("text", "anything at all")]).await;

    let json = wait_for_completion(&app, &id).await;
    assert_eq!(json["progress"], 0);
    assert!(json["error"].as_str().unwrap().contains("model offline"));
}
