//! HTTP seam between the controller and the summarizer server.
//!
//! [`JobBackend`] is what the controller talks to; [`HttpBackend`] is the
//! [`reqwest`] implementation used in production.

use std::time::Duration;

use async_trait::async_trait;
use summarizer_core::download::DownloadFormat;
use summarizer_core::progress::ProgressSnapshot;
use summarizer_core::types::{SessionId, StartResponse};

use crate::error::ApiError;
use crate::form::FormData;

/// Job-start and progress operations used by the controller.
#[async_trait]
pub trait JobBackend: Send + Sync {
    /// `POST /start_summarization` with the form's fields.
    async fn start(&self, form: &FormData) -> Result<StartResponse, ApiError>;

    /// `GET /progress/{session_id}`.
    async fn progress(&self, session_id: &SessionId) -> Result<ProgressSnapshot, ApiError>;
}

/// HTTP client for a summarizer server.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` (e.g. `http://host:5000`) with a
    /// per-request timeout.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(request_timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a backend reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the rendered download for a finished summary.
    ///
    /// Sends the same `summary` / `filetype` form the page's download
    /// button posts to `POST /download`.
    pub async fn download(
        &self,
        summary: &str,
        format: DownloadFormat,
    ) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .post(format!("{}/download", self.base_url))
            .form(&[("summary", summary), ("filetype", format.as_str())])
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, or turn it into
    /// [`ApiError::ApiError`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl JobBackend for HttpBackend {
    async fn start(&self, form: &FormData) -> Result<StartResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/start_summarization", self.base_url))
            .multipart(form.to_multipart())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn progress(&self, session_id: &SessionId) -> Result<ProgressSnapshot, ApiError> {
        let response = self
            .client
            .get(format!("{}/progress/{}", self.base_url, session_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }
}
