//! Job start and progress polling.

use axum::extract::{Multipart, Path, State};
use axum::http::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use summarizer_core::error::CoreError;
use summarizer_core::extract::extract_text;
use summarizer_core::types::{SessionId, StartResponse};

use crate::error::AppResult;
use crate::jobs;
use crate::state::AppState;

/// Fields collected from the start form.
#[derive(Debug, Default)]
struct StartForm {
    /// `(filename, bytes)` of the `file` part, when one was chosen.
    file: Option<(String, Vec<u8>)>,
    text: Option<String>,
}

impl StartForm {
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    if !filename.is_empty() {
                        form.file = Some((filename, bytes.to_vec()));
                    }
                }
                Some("text") => form.text = Some(field.text().await?),
                _ => {}
            }
        }
        Ok(form)
    }

    /// Text to summarize: an uploaded file wins over the text field.
    fn into_text(self) -> AppResult<String> {
        match (self.file, self.text) {
            (Some((filename, bytes)), _) => Ok(extract_text(&filename, &bytes)?),
            (None, Some(text)) => Ok(text),
            (None, None) => Ok(String::new()),
        }
    }
}

/// POST /start_summarization
async fn start_summarization(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<StartResponse>> {
    let text = StartForm::read(multipart).await?.into_text()?;

    if text.trim().is_empty() {
        return Err(CoreError::Validation("No text provided.".to_string()).into());
    }

    let session_id = SessionId::generate();
    state.store.create(session_id.clone()).await;
    tracing::info!(session_id = %session_id, words = text.split_whitespace().count(), "Session created");

    jobs::spawn_summarization(&state, session_id.clone(), text);

    Ok(Json(StartResponse { session_id }))
}

/// GET /progress/{session_id}
///
/// Unknown sessions report `{progress: 0, summary: ""}`.
async fn get_progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    let snapshot = state
        .store
        .get(&SessionId::from(session_id))
        .await
        .unwrap_or_default();

    (
        [
            (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
            (PRAGMA, "no-cache"),
            (EXPIRES, "0"),
        ],
        Json(snapshot),
    )
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start_summarization", post(start_summarization))
        .route("/progress/{session_id}", get(get_progress))
}
