use crate::service_trait::TranscriptionService;
use s3scribe_core::{JobReference, JobStatus, TranscribeError, TranscriptResult};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// How often to ask for a job's status and how long to keep asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_wait: Duration,
}

impl PollPolicy {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
    pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(3600);

    pub fn new(interval: Duration, max_wait: Duration) -> Self {
        Self { interval, max_wait }
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_WAIT)
    }
}

/// Query `job` until it reaches a terminal status.
///
/// Exactly one terminal status is observed per call: the loop returns as
/// soon as it sees `Completed` or `Failed` and never queries again. Between
/// non-terminal answers it sleeps `policy.interval`. The last sleep is cut
/// short so that one final query lands on the `policy.max_wait` deadline; a
/// non-terminal answer there ends the loop with [`TranscribeError::TimedOut`].
/// Cancelling `cancel` interrupts the sleep. Query errors are returned
/// immediately.
pub async fn poll_until_terminal(
    service: &dyn TranscriptionService,
    job: &JobReference,
    policy: PollPolicy,
    cancel: &CancellationToken,
) -> Result<TranscriptResult, TranscribeError> {
    let started = Instant::now();
    let mut queries: u32 = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(TranscribeError::Cancelled(job.to_string()));
        }

        let status = service.job_status(job).await?;
        queries += 1;

        match status {
            JobStatus::Completed {
                transcript_uri,
                language_code,
            } => {
                tracing::info!(job = %job, queries, "transcription job completed");
                let transcript_uri = transcript_uri
                    .ok_or_else(|| TranscribeError::MissingTranscriptUri(job.to_string()))?;
                return Ok(TranscriptResult {
                    transcript_uri,
                    language_code,
                });
            }
            JobStatus::Failed { reason } => {
                tracing::warn!(job = %job, queries, reason = ?reason, "transcription job failed");
                return Err(TranscribeError::JobFailed {
                    job: job.to_string(),
                    reason,
                });
            }
            JobStatus::Queued | JobStatus::InProgress => {
                tracing::debug!(job = %job, status = %status, queries, "job not finished yet");
            }
        }

        let waited = started.elapsed();
        if waited >= policy.max_wait {
            tracing::warn!(job = %job, ?waited, "giving up on transcription job");
            return Err(TranscribeError::TimedOut {
                job: job.to_string(),
                waited,
            });
        }

        let pause = policy.interval.min(policy.max_wait - waited);
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(job = %job, "stopped waiting for transcription job");
                return Err(TranscribeError::Cancelled(job.to_string()));
            }
            _ = tokio::time::sleep(pause) => {}
        }
    }
}
