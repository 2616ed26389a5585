use crate::service_trait::TranscriptionService;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_transcribe::error::DisplayErrorContext;
use aws_sdk_transcribe::types::{Media, MediaFormat, TranscriptionJob, TranscriptionJobStatus};
use s3scribe_core::{JobReference, JobStatus, TranscribeError, TranscriptionRequest};

/// Amazon Transcribe batch jobs.
pub struct AwsTranscribeService {
    client: aws_sdk_transcribe::Client,
}

impl AwsTranscribeService {
    pub fn new(client: aws_sdk_transcribe::Client) -> Self {
        Self { client }
    }

    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        Self::new(aws_sdk_transcribe::Client::new(sdk_config))
    }
}

#[async_trait]
impl TranscriptionService for AwsTranscribeService {
    fn name(&self) -> &str {
        "aws"
    }

    async fn start_job(&self, request: &TranscriptionRequest) -> Result<(), TranscribeError> {
        self.client
            .start_transcription_job()
            .transcription_job_name(request.job.as_str())
            .media(
                Media::builder()
                    .media_file_uri(&request.media_uri)
                    .build(),
            )
            .media_format(MediaFormat::from(request.media_format.as_str()))
            .identify_language(request.identify_language)
            .send()
            .await
            .map_err(|e| TranscribeError::Submit(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn job_status(&self, job: &JobReference) -> Result<JobStatus, TranscribeError> {
        let output = self
            .client
            .get_transcription_job()
            .transcription_job_name(job.as_str())
            .send()
            .await
            .map_err(|e| TranscribeError::Query(DisplayErrorContext(&e).to_string()))?;

        let details = output.transcription_job().ok_or_else(|| {
            TranscribeError::Query(format!("no details returned for job {job}"))
        })?;
        status_from_job(details)
    }
}

fn status_from_job(details: &TranscriptionJob) -> Result<JobStatus, TranscribeError> {
    let status = details.transcription_job_status().ok_or_else(|| {
        TranscribeError::Query("job details carry no status".to_string())
    })?;

    match status {
        TranscriptionJobStatus::Queued => Ok(JobStatus::Queued),
        TranscriptionJobStatus::InProgress => Ok(JobStatus::InProgress),
        TranscriptionJobStatus::Completed => Ok(JobStatus::Completed {
            transcript_uri: details
                .transcript()
                .and_then(|t| t.transcript_file_uri())
                .map(str::to_string),
            language_code: details.language_code().map(|l| l.as_str().to_string()),
        }),
        TranscriptionJobStatus::Failed => Ok(JobStatus::Failed {
            reason: details.failure_reason().map(str::to_string),
        }),
        other => Err(TranscribeError::Query(format!(
            "unrecognised job status {}",
            other.as_str()
        ))),
    }
}
