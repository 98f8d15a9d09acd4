use std::time::Duration;

/// Default delay between progress polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the summarizer server (default: `http://127.0.0.1:5000`).
    pub base_url: String,
    /// Delay between progress polls (default: 500 ms).
    pub poll_interval: Duration,
    /// Per-request HTTP timeout (default: 30 s).
    pub request_timeout: Duration,
    /// Give up polling after this long. Unbounded when `None` (default).
    pub max_wait: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: Duration::from_secs(30),
            max_wait: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                  |
    /// |------------------------|--------------------------|
    /// | `SUMMARIZER_URL`       | `http://127.0.0.1:5000`  |
    /// | `POLL_INTERVAL_MS`     | `500`                    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                     |
    /// | `MAX_WAIT_SECS`        | unset (poll forever)     |
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let base_url = std::env::var("SUMMARIZER_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or(defaults.base_url);

        let poll_interval = env_u64("POLL_INTERVAL_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.poll_interval);

        let request_timeout = env_u64("REQUEST_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let max_wait = env_u64("MAX_WAIT_SECS").map(Duration::from_secs);

        Self {
            base_url,
            poll_interval,
            request_timeout,
            max_wait,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring invalid numeric setting");
            None
        }
    }
}
