use async_trait::async_trait;
use s3scribe_core::{FetchError, TranscriptDocument};
use std::time::Duration;

/// Retrieves the result document a completed job points at.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(&self, uri: &str) -> Result<TranscriptDocument, FetchError>;
}

/// Plain HTTP GET. The service hands out pre-signed URLs, so no request
/// signing is needed here.
pub struct HttpTranscriptFetcher {
    client: reqwest::Client,
}

impl HttpTranscriptFetcher {
    /// Upper bound on a whole download, connect included.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TranscriptFetcher for HttpTranscriptFetcher {
    async fn fetch(&self, uri: &str) -> Result<TranscriptDocument, FetchError> {
        let response = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: uri.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        tracing::debug!(bytes = body.len(), "downloaded transcript document");

        TranscriptDocument::parse(&body)
    }
}
