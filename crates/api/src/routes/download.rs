//! Follow-on download of a finished summary.

use axum::extract::Form;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use summarizer_core::download::render_named;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub filetype: String,
}

/// POST /download
async fn download(Form(form): Form<DownloadForm>) -> AppResult<impl IntoResponse> {
    let attachment = render_named(&form.summary, &form.filetype)?;
    tracing::debug!(file_name = attachment.file_name, bytes = attachment.bytes.len(), "Rendering download");

    Ok((
        [
            (CONTENT_TYPE, attachment.content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment.file_name),
            ),
        ],
        attachment.bytes,
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/download", post(download))
}
