//! Job progress snapshots exchanged over `GET /progress/{session_id}`.

use serde::{Deserialize, Serialize};

/// Progress value at which a job is considered finished.
pub const COMPLETE_PERCENT: u8 = 100;

/// Point-in-time view of one summarization job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completion percentage, `0..=100`.
    pub progress: u8,
    /// Summary accumulated so far; final once `progress` reaches 100.
    #[serde(default)]
    pub summary: String,
    /// Set when the job stopped because of a failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProgressSnapshot {
    pub fn is_complete(&self) -> bool {
        self.progress >= COMPLETE_PERCENT
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Integer percentage after `done` of `total` chunks have finished.
///
/// Truncates like the job loop always has (`1 of 3` is 33, not 34) and
/// clamps to 100. An empty job counts as complete.
pub fn percent_complete(done: usize, total: usize) -> u8 {
    if total == 0 {
        return COMPLETE_PERCENT;
    }
    let pct = (done.min(total) * 100) / total;
    pct as u8
}
