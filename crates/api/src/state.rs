use std::sync::Arc;

use summarizer_core::summarize::Summarizer;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::config::ServerConfig;
use crate::store::ProgressStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-session progress snapshots.
    pub store: Arc<ProgressStore>,
    /// Chunk summarizer used by background jobs.
    pub summarizer: Arc<dyn Summarizer>,
    /// Tracks spawned summarization jobs so shutdown can wait for them.
    pub jobs: TaskTracker,
    /// Cancelled during shutdown; jobs stop between chunks.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(config: ServerConfig, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(ProgressStore::new()),
            summarizer,
            jobs: TaskTracker::new(),
            shutdown: CancellationToken::new(),
        }
    }
}
