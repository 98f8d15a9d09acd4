//! In-memory progress store keyed by session.
//!
//! Nothing is persisted. Finished sessions are dropped by
//! [`ProgressStore::evict_finished`] once they have been settled for
//! longer than the configured TTL.

use std::collections::HashMap;
use std::time::Duration;

use summarizer_core::progress::ProgressSnapshot;
use summarizer_core::types::SessionId;
use tokio::sync::RwLock;
use tokio::time::Instant;

struct Entry {
    snapshot: ProgressSnapshot,
    /// Set when the session completes or fails.
    finished_at: Option<Instant>,
}

/// Thread-safe map of session id to the latest progress snapshot.
///
/// Designed to be wrapped in `Arc` and shared between request handlers
/// and background jobs.
pub struct ProgressStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
}

impl ProgressStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new session at 0% with an empty summary.
    pub async fn create(&self, session_id: SessionId) {
        self.sessions
            .write()
            .await
            .insert(
                session_id,
                Entry {
                    snapshot: ProgressSnapshot::default(),
                    finished_at: None,
                },
            );
    }

    /// Latest snapshot for a session, if it exists.
    pub async fn get(&self, session_id: &SessionId) -> Option<ProgressSnapshot> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|entry| entry.snapshot.clone())
    }

    /// Record progress and the summary accumulated so far.
    ///
    /// Unknown sessions are ignored.
    pub async fn update(&self, session_id: &SessionId, progress: u8, summary: String) {
        if let Some(entry) = self.sessions.write().await.get_mut(session_id) {
            entry.snapshot.progress = progress;
            entry.snapshot.summary = summary;
            if entry.snapshot.is_complete() && entry.finished_at.is_none() {
                entry.finished_at = Some(Instant::now());
            }
        }
    }

    /// Mark a session as failed with a human-readable message.
    pub async fn fail(&self, session_id: &SessionId, message: String) {
        if let Some(entry) = self.sessions.write().await.get_mut(session_id) {
            entry.snapshot.error = Some(message);
            entry.finished_at.get_or_insert_with(Instant::now);
        }
    }

    /// Number of sessions that have not yet completed or failed.
    pub async fn active_count(&self) -> usize {
        self.sessions
            .read()
            .await
            .values()
            .filter(|e| e.finished_at.is_none())
            .count()
    }

    /// Total number of sessions held, finished or not.
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop sessions that finished more than `ttl` ago. Returns how many
    /// were removed. Running sessions are never evicted.
    pub async fn evict_finished(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| match entry.finished_at {
            Some(at) => at.elapsed() < ttl,
            None => true,
        });
        before - sessions.len()
    }
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new()
    }
}
