//! Integration tests for the summary download endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, post_form};

#[tokio::test]
async fn txt_download_is_an_attachment() {
    let app = common::build_test_app();
    let response = post_form(app, "/download", "summary=Short+summary.&filetype=txt").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-disposition").unwrap(),
        "attachment; filename=\"summary.txt\""
    );
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_bytes(response).await, b"Short summary.");
}

#[tokio::test]
async fn missing_summary_is_rejected() {
    let app = common::build_test_app();
    let response = post_form(app, "/download", "filetype=pdf").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No summary to download.");
}

#[tokio::test]
async fn pdf_and_docx_are_attachments() {
    for (filetype, name, content_type) in [
        ("pdf", "summary.pdf", "application/pdf"),
        (
            "docx",
            "summary.docx",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ),
    ] {
        let app = common::build_test_app();
        let response = post_form(
            app,
            "/download",
            &format!("summary=Short+summary.&filetype={filetype}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], content_type);
        assert_eq!(
            response.headers()["content-disposition"],
            format!("attachment; filename=\"{name}\"").as_str()
        );
        assert!(!body_bytes(response).await.is_empty());
    }
}

#[tokio::test]
async fn unsupported_filetype_is_rejected() {
    let app = common::build_test_app();
    let response = post_form(app, "/download", "summary=x&filetype=rtf").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Unsupported file type.");
    assert_eq!(json["code"], "UNSUPPORTED");
}
