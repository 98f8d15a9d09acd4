//! Cancellable fixed-cadence progress polling.
//!
//! [`poll_until_complete`] asks the backend for progress once per tick
//! until the job reports completion, fails, times out, or the
//! [`CancellationToken`] is triggered. Ticks are single-flight: a slow
//! response delays the next tick instead of overlapping with it, so
//! snapshots are always observed in request order.

use std::time::Duration;

use summarizer_core::progress::ProgressSnapshot;
use summarizer_core::types::SessionId;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::backend::JobBackend;
use crate::error::ApiError;

/// Tunable parameters for the polling loop.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Delay before the first poll and between subsequent polls.
    pub interval: Duration,
    /// Overall deadline measured from the start of polling.
    pub max_wait: Option<Duration>,
}

/// Poll `session_id` until it completes.
///
/// Returns `Ok(Some(snapshot))` with the completing snapshot, or
/// `Ok(None)` if `cancel` fired first. An in-flight request is dropped
/// on cancellation.
pub async fn poll_until_complete<B: JobBackend + ?Sized>(
    backend: &B,
    session_id: &SessionId,
    config: PollConfig,
    cancel: &CancellationToken,
) -> Result<Option<ProgressSnapshot>, ApiError> {
    let started = Instant::now();
    let deadline = config.max_wait.map(|wait| started + wait);

    let mut ticker = tokio::time::interval_at(started + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut polls = 0u32;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(session_id = %session_id, polls, "Polling cancelled");
                return Ok(None);
            }
            _ = ticker.tick() => {}
        }

        if let (Some(deadline), Some(wait)) = (deadline, config.max_wait) {
            if Instant::now() >= deadline {
                tracing::warn!(session_id = %session_id, polls, "Polling timed out");
                return Err(ApiError::TimedOut(wait));
            }
        }

        polls += 1;
        let snapshot = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(session_id = %session_id, polls, "Polling cancelled mid-request");
                return Ok(None);
            }
            result = backend.progress(session_id) => result?,
        };

        tracing::debug!(session_id = %session_id, progress = snapshot.progress, "Progress polled");

        if let Some(error) = snapshot.error {
            return Err(ApiError::JobFailed(error));
        }
        if snapshot.is_complete() {
            tracing::info!(session_id = %session_id, polls, "Job complete");
            return Ok(Some(snapshot));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use summarizer_core::types::StartResponse;

    use super::*;
    use crate::form::FormData;

    /// Replays a fixed list of snapshots and records when each poll happened.
    struct Replay {
        snapshots: Mutex<VecDeque<ProgressSnapshot>>,
        polled_at: Mutex<Vec<Instant>>,
    }

    impl Replay {
        fn new(progress: &[u8]) -> Self {
            let snapshots = progress
                .iter()
                .map(|&p| ProgressSnapshot {
                    progress: p,
                    summary: if p >= 100 { "done".into() } else { String::new() },
                    error: None,
                })
                .collect();
            Self {
                snapshots: Mutex::new(snapshots),
                polled_at: Mutex::new(Vec::new()),
            }
        }

        fn poll_count(&self) -> usize {
            self.polled_at.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl JobBackend for Replay {
        async fn start(&self, _form: &FormData) -> Result<StartResponse, ApiError> {
            unreachable!("poller never starts jobs")
        }

        async fn progress(&self, _session_id: &SessionId) -> Result<ProgressSnapshot, ApiError> {
            self.polled_at.lock().unwrap().push(Instant::now());
            let next = self.snapshots.lock().unwrap().pop_front();
            Ok(next.unwrap_or_default())
        }
    }

    fn config() -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(500),
            max_wait: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_fixed_cadence_until_complete() {
        let backend = Replay::new(&[10, 60, 100]);
        let started = Instant::now();

        let snap = poll_until_complete(&backend, &"s".into(), config(), &CancellationToken::new())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(snap.summary, "done");
        let times = backend.polled_at.lock().unwrap().clone();
        assert_eq!(times.len(), 3);
        assert_eq!(times[0] - started, Duration::from_millis(500));
        assert_eq!(times[1] - times[0], Duration::from_millis(500));
        assert_eq!(times[2] - times[1], Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_polling() {
        let backend = Replay::new(&[]);
        let cancel = CancellationToken::new();

        let canceller = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(1_250)).await;
            canceller.cancel();
        });

        let result = poll_until_complete(&backend, &"s".into(), config(), &cancel)
            .await
            .unwrap();
        assert!(result.is_none());
        assert_eq!(backend.poll_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn job_error_ends_polling() {
        let backend = Replay::new(&[]);
        backend.snapshots.lock().unwrap().push_back(ProgressSnapshot {
            progress: 20,
            summary: String::new(),
            error: Some("model offline".into()),
        });

        let err = poll_until_complete(&backend, &"s".into(), config(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::JobFailed(msg) if msg == "model offline"));
    }

    #[tokio::test(start_paused = true)]
    async fn max_wait_bounds_polling() {
        let backend = Replay::new(&[]);
        let cfg = PollConfig {
            max_wait: Some(Duration::from_secs(2)),
            ..config()
        };

        let err = poll_until_complete(&backend, &"s".into(), cfg, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::TimedOut(_)));
        // Polls at 0.5, 1.0 and 1.5 s; the 2.0 s tick hits the deadline.
        assert_eq!(backend.poll_count(), 3);
    }
}
