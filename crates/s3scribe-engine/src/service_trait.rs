use async_trait::async_trait;
use s3scribe_core::{JobReference, JobStatus, TranscribeError, TranscriptionRequest};

/// A managed batch transcription service.
///
/// Implementations submit a job once and then answer status queries for it;
/// the polling cadence and the wait bound belong to the caller.
#[async_trait]
pub trait TranscriptionService: Send + Sync {
    /// Returns the service's name (e.g. `"aws"`, `"scripted"`).
    fn name(&self) -> &str;
    /// Submit a new job under `request.job`.
    async fn start_job(&self, request: &TranscriptionRequest) -> Result<(), TranscribeError>;
    /// Current status of a previously submitted job.
    async fn job_status(&self, job: &JobReference) -> Result<JobStatus, TranscribeError>;
}

#[async_trait]
impl<T: TranscriptionService + ?Sized> TranscriptionService for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn start_job(&self, request: &TranscriptionRequest) -> Result<(), TranscribeError> {
        (**self).start_job(request).await
    }

    async fn job_status(&self, job: &JobReference) -> Result<JobStatus, TranscribeError> {
        (**self).job_status(job).await
    }
}
