use crate::fetch::TranscriptFetcher;
use crate::job_name::JobNameGenerator;
use crate::poller::{poll_until_terminal, PollPolicy};
use crate::service_trait::TranscriptionService;
use s3scribe_core::{
    JobReference, ObjectLocation, TranscribeError, Transcript, TranscriptResult,
    TranscriptionRequest,
};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Submit, wait, fetch. Each step stops the run on its first error.
pub struct TranscriptionDriver {
    service: Box<dyn TranscriptionService>,
    fetcher: Box<dyn TranscriptFetcher>,
    job_names: Box<dyn JobNameGenerator>,
    media_format: String,
    policy: PollPolicy,
}

impl TranscriptionDriver {
    pub fn new(
        service: Box<dyn TranscriptionService>,
        fetcher: Box<dyn TranscriptFetcher>,
        job_names: Box<dyn JobNameGenerator>,
    ) -> Self {
        Self {
            service,
            fetcher,
            job_names,
            media_format: "wav".to_string(),
            policy: PollPolicy::default(),
        }
    }

    pub fn with_media_format(mut self, media_format: &str) -> Self {
        self.media_format = media_format.to_string();
        self
    }

    pub fn with_poll_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start a job for `source` under a freshly generated name, asking the
    /// service to identify the spoken language itself.
    pub async fn submit(&self, source: &ObjectLocation) -> Result<JobReference, TranscribeError> {
        let request = TranscriptionRequest {
            job: self.job_names.next_name(),
            media_uri: source.uri(),
            media_format: self.media_format.clone(),
            identify_language: true,
        };

        tracing::info!(
            service = self.service.name(),
            job = %request.job,
            media = %request.media_uri,
            format = %request.media_format,
            "starting transcription job"
        );
        self.service.start_job(&request).await?;
        Ok(request.job)
    }

    pub async fn wait(
        &self,
        job: &JobReference,
        cancel: &CancellationToken,
    ) -> Result<TranscriptResult, TranscribeError> {
        poll_until_terminal(self.service.as_ref(), job, self.policy, cancel).await
    }

    /// Download the result document and return its first alternative.
    pub async fn fetch_text(&self, result: &TranscriptResult) -> Result<String, TranscribeError> {
        let document = self.fetcher.fetch(&result.transcript_uri).await?;
        Ok(document.first_transcript().to_string())
    }

    /// The whole pipeline. `cancel` stops it at any step, including an
    /// in-flight submit or download.
    pub async fn run(
        &self,
        source: &ObjectLocation,
        cancel: &CancellationToken,
    ) -> Result<Transcript, TranscribeError> {
        let job = until_cancelled(cancel, source.to_string(), self.submit(source)).await?;
        let result = self.wait(&job, cancel).await?;
        let text = until_cancelled(cancel, job.to_string(), self.fetch_text(&result)).await?;

        Ok(Transcript {
            job,
            language_code: result.language_code,
            text,
        })
    }
}

async fn until_cancelled<T>(
    cancel: &CancellationToken,
    what: String,
    step: impl Future<Output = Result<T, TranscribeError>>,
) -> Result<T, TranscribeError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!(target = %what, "transcription cancelled");
            Err(TranscribeError::Cancelled(what))
        }
        result = step => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScriptedService, SequentialJobNames};
    use async_trait::async_trait;
    use s3scribe_core::{FetchError, JobStatus, TranscriptDocument};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct StaticFetcher {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl StaticFetcher {
        fn new(body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                body,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl TranscriptFetcher for Arc<StaticFetcher> {
        async fn fetch(&self, _uri: &str) -> Result<TranscriptDocument, FetchError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            TranscriptDocument::parse(self.body.as_bytes())
        }
    }

    fn driver(service: &Arc<ScriptedService>, fetcher: &Arc<StaticFetcher>) -> TranscriptionDriver {
        TranscriptionDriver::new(
            Box::new(Arc::clone(service)),
            Box::new(Arc::clone(fetcher)),
            Box::new(SequentialJobNames::new("transcription-job")),
        )
        .with_poll_policy(PollPolicy::new(Duration::from_secs(5), Duration::from_secs(600)))
    }

    fn completed() -> JobStatus {
        JobStatus::Completed {
            transcript_uri: Some("https://results/job.json".to_string()),
            language_code: Some("fr-FR".to_string()),
        }
    }

    #[tokio::test]
    async fn test_submit_builds_request() {
        let service = Arc::new(ScriptedService::new());
        let fetcher = StaticFetcher::new("{}");
        let driver = driver(&service, &fetcher).with_media_format("mp3");

        let job = driver
            .submit(&ObjectLocation::new("media", "talk.mp3"))
            .await
            .unwrap();

        assert_eq!(job.as_str(), "transcription-job-1");
        let submitted = service.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].job, job);
        assert_eq!(submitted[0].media_uri, "s3://media/talk.mp3");
        assert_eq!(submitted[0].media_format, "mp3");
        assert!(submitted[0].identify_language);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_returns_text_and_language() {
        let service = Arc::new(ScriptedService::with_statuses(2, completed()));
        let fetcher =
            StaticFetcher::new(r#"{"results":{"transcripts":[{"transcript":"bonjour"}]}}"#);

        let transcript = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(transcript.text, "bonjour");
        assert_eq!(transcript.language_code.as_deref(), Some("fr-FR"));
        assert_eq!(transcript.job.as_str(), "transcription-job-1");
        assert_eq!(service.query_count(), 3);
        assert_eq!(fetcher.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_failed_job_skips_fetch() {
        let service = Arc::new(ScriptedService::with_statuses(
            0,
            JobStatus::Failed { reason: None },
        ));
        let fetcher = StaticFetcher::new("{}");

        let err = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TranscribeError::JobFailed { .. }));
        assert_eq!(service.query_count(), 1);
        assert_eq!(fetcher.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_run_submit_error_skips_polling() {
        let service = Arc::new(ScriptedService::with_statuses(0, completed()));
        service.fail_submit("LimitExceededException");
        let fetcher = StaticFetcher::new("{}");

        let err = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, TranscribeError::Submit(_)));
        assert_eq!(service.query_count(), 0);
        assert_eq!(fetcher.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_empty_document_yields_empty_text() {
        let service = Arc::new(ScriptedService::with_statuses(0, completed()));
        let fetcher = StaticFetcher::new(r#"{"results":{"transcripts":[]}}"#);

        let transcript = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(transcript.text, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_parse_error_is_fetch_error() {
        let service = Arc::new(ScriptedService::with_statuses(0, completed()));
        let fetcher = StaticFetcher::new("not json");

        let err = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TranscribeError::Fetch(FetchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_each_run_uses_new_job_name() {
        let service = Arc::new(ScriptedService::new());
        service.push_status(completed());
        service.push_status(completed());
        let fetcher = StaticFetcher::new(r#"{"results":{"transcripts":[]}}"#);
        let driver = driver(&service, &fetcher);
        let source = ObjectLocation::new("media", "a.wav");

        let a = driver.run(&source, &CancellationToken::new()).await.unwrap();
        let b = driver.run(&source, &CancellationToken::new()).await.unwrap();
        assert_ne!(a.job, b.job);
    }

    struct StalledFetcher;

    #[async_trait]
    impl TranscriptFetcher for StalledFetcher {
        async fn fetch(&self, _uri: &str) -> Result<TranscriptDocument, FetchError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cancelled_during_download() {
        let service = Arc::new(ScriptedService::with_statuses(1, completed()));
        let driver = TranscriptionDriver::new(
            Box::new(Arc::clone(&service)),
            Box::new(StalledFetcher),
            Box::new(SequentialJobNames::new("transcription-job")),
        )
        .with_poll_policy(PollPolicy::new(Duration::from_secs(5), Duration::from_secs(600)));
        let cancel = CancellationToken::new();

        let interrupt = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                cancel.cancel();
            })
        };

        let err = driver
            .run(&ObjectLocation::new("media", "a.wav"), &cancel)
            .await
            .unwrap_err();
        interrupt.await.unwrap();

        match err {
            TranscribeError::Cancelled(what) => assert_eq!(what, "transcription-job-1"),
            other => panic!("expected Cancelled, got {other:?}"),
        }
        // The job completed on the second query; the download never did.
        assert_eq!(service.query_count(), 2);
    }

    #[tokio::test]
    async fn test_run_cancelled_before_submit() {
        let service = Arc::new(ScriptedService::with_statuses(0, completed()));
        let fetcher = StaticFetcher::new("{}");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = driver(&service, &fetcher)
            .run(&ObjectLocation::new("media", "a.wav"), &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, TranscribeError::Cancelled(_)));
        assert!(service.submitted().is_empty());
        assert_eq!(fetcher.calls.load(Ordering::Relaxed), 0);
    }
}
