//! Background summarization jobs.
//!
//! A job splits the submitted text into chunks, summarizes them one at a
//! time on the blocking pool, and publishes progress to the
//! [`ProgressStore`] after each chunk. No automatic retry is performed on
//! failure; the error is recorded on the session instead.
//!
//! A sweeper task evicts finished sessions from the store.

use std::sync::Arc;
use std::time::Duration;

use summarizer_core::chunking::chunk_text;
use summarizer_core::error::CoreError;
use summarizer_core::progress::percent_complete;
use summarizer_core::summarize::Summarizer;
use summarizer_core::types::SessionId;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::store::ProgressStore;

/// How often the sweeper looks for expired sessions.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawn a tracked task that evicts sessions finished longer than
/// `session_ttl_secs` ago. It stops when the shutdown token is cancelled.
pub fn spawn_session_sweeper(state: &AppState) {
    let store = Arc::clone(&state.store);
    let ttl = Duration::from_secs(state.config.session_ttl_secs);
    let shutdown = state.shutdown.clone();

    state.jobs.spawn(async move {
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + SWEEP_INTERVAL,
            SWEEP_INTERVAL,
        );
        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let evicted = store.evict_finished(ttl).await;
                    if evicted > 0 {
                        tracing::debug!(evicted, "Evicted finished sessions");
                    }
                }
            }
        }
    });
}

/// Spawn a tracked summarization job for an already-created session.
pub fn spawn_summarization(state: &AppState, session_id: SessionId, text: String) {
    let store = Arc::clone(&state.store);
    let summarizer = Arc::clone(&state.summarizer);
    let chunk_words = state.config.chunk_words;
    let cancel = state.shutdown.child_token();

    state.jobs.spawn(async move {
        run_summarization(&store, summarizer, &session_id, &text, chunk_words, &cancel).await;
    });
}

/// Drive one job to completion, failure or cancellation.
pub async fn run_summarization(
    store: &ProgressStore,
    summarizer: Arc<dyn Summarizer>,
    session_id: &SessionId,
    text: &str,
    chunk_words: usize,
    cancel: &CancellationToken,
) {
    let chunks = chunk_text(text, chunk_words);
    let total = chunks.len();
    tracing::info!(session_id = %session_id, chunks = total, "Starting summarization");

    let mut summaries: Vec<String> = Vec::with_capacity(total);

    for (i, chunk) in chunks.into_iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(session_id = %session_id, "Summarization cancelled");
            store
                .fail(session_id, "Summarization was cancelled".to_string())
                .await;
            return;
        }

        match summarize_chunk(Arc::clone(&summarizer), chunk).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                tracing::error!(session_id = %session_id, chunk = i, error = %e, "Chunk summarization failed");
                store.fail(session_id, e.to_string()).await;
                return;
            }
        }

        let progress = percent_complete(i + 1, total);
        store
            .update(session_id, progress, summaries.join(" "))
            .await;
        tracing::debug!(session_id = %session_id, progress, "Progress updated");
    }

    tracing::info!(session_id = %session_id, "Summarization complete");
}

async fn summarize_chunk(summarizer: Arc<dyn Summarizer>, chunk: String) -> Result<String, CoreError> {
    tokio::task::spawn_blocking(move || summarizer.summarize(&chunk))
        .await
        .map_err(|e| CoreError::Internal(format!("summarizer task panicked: {e}")))?
}
