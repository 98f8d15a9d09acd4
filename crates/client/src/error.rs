use std::time::Duration;

/// Errors from talking to the summarizer server.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, bad JSON, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Summarizer API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The server reported that the job itself failed.
    #[error("Summarization failed: {0}")]
    JobFailed(String),

    /// The job did not complete within the configured wait.
    #[error("Gave up waiting for the summary after {0:?}")]
    TimedOut(Duration),
}

/// Errors surfaced by the controller.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A required page element is not present.
    #[error("Page element not found: #{0}")]
    MissingElement(String),

    /// A newer submission or an explicit cancel replaced this one.
    #[error("Submission was superseded")]
    Superseded,
}
