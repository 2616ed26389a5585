use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("required setting is not set: {0}")]
    Missing(&'static str),

    #[error("invalid value for {setting}: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid object location: {0}")]
    InvalidLocation(String),

    #[error("object not found: {0}")]
    NotFound(String),

    #[error("object store request failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to download transcript: {0}")]
    Transport(String),

    #[error("transcript download from {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse transcript document: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum TranscribeError {
    #[error("failed to start transcription job: {0}")]
    Submit(String),

    #[error("failed to get transcription job: {0}")]
    Query(String),

    #[error("transcription job {job} failed: {}", .reason.as_deref().unwrap_or("no reason given"))]
    JobFailed { job: String, reason: Option<String> },

    #[error("transcription job {0} completed without a transcript location")]
    MissingTranscriptUri(String),

    #[error("transcription job {job} did not finish within {waited:?}")]
    TimedOut { job: String, waited: Duration },

    #[error("transcription of {0} was cancelled")]
    Cancelled(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
