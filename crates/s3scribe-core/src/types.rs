use crate::error::FetchError;
use serde::Deserialize;
use std::fmt;

/// A bucket/key pair addressing one object in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// `s3://<bucket>/<key>`, the form the transcription service expects.
    pub fn uri(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.key)
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub content_length: Option<i64>,
    pub content_type: Option<String>,
    pub e_tag: Option<String>,
}

/// Name of a submitted transcription job. Fixed for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobReference(String);

impl JobReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionRequest {
    pub job: JobReference,
    pub media_uri: String,
    pub media_format: String,
    pub identify_language: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed {
        transcript_uri: Option<String>,
        language_code: Option<String>,
    },
    Failed {
        reason: Option<String>,
    },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed { .. } | JobStatus::Failed { .. })
    }

    /// Wire name as reported by the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "QUEUED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Completed { .. } => "COMPLETED",
            JobStatus::Failed { .. } => "FAILED",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptResult {
    pub transcript_uri: String,
    pub language_code: Option<String>,
}

/// Final output of one driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub job: JobReference,
    pub language_code: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptDocument {
    pub results: TranscriptResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranscriptResults {
    #[serde(default)]
    pub transcripts: Vec<TranscriptAlternative>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptAlternative {
    #[serde(default)]
    pub transcript: String,
}

impl TranscriptDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(bytes).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Text of the first alternative, or an empty string when there is none.
    pub fn first_transcript(&self) -> &str {
        self.results
            .transcripts
            .first()
            .map(|t| t.transcript.as_str())
            .unwrap_or("")
    }
}
