use crate::service_trait::TranscriptionService;
use async_trait::async_trait;
use s3scribe_core::{JobReference, JobStatus, TranscribeError, TranscriptionRequest};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Transcription service that replays a fixed sequence of answers.
///
/// Each status query consumes the next scripted entry. Once the script runs
/// out the job reports `InProgress` forever, which is how a stuck remote job
/// looks from the outside.
pub struct ScriptedService {
    script: Mutex<VecDeque<Result<JobStatus, String>>>,
    submit_error: Mutex<Option<String>>,
    submitted: Mutex<Vec<TranscriptionRequest>>,
    query_count: AtomicUsize,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            submit_error: Mutex::new(None),
            submitted: Mutex::new(Vec::new()),
            query_count: AtomicUsize::new(0),
        }
    }

    /// `in_progress` non-terminal answers followed by `terminal`.
    pub fn with_statuses(in_progress: usize, terminal: JobStatus) -> Self {
        let service = Self::new();
        for _ in 0..in_progress {
            service.push_status(JobStatus::InProgress);
        }
        service.push_status(terminal);
        service
    }

    pub fn push_status(&self, status: JobStatus) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(status));
        }
    }

    pub fn push_query_error(&self, message: &str) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(message.to_string()));
        }
    }

    pub fn fail_submit(&self, message: &str) {
        if let Ok(mut err) = self.submit_error.lock() {
            *err = Some(message.to_string());
        }
    }

    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::Relaxed)
    }

    pub fn submitted(&self) -> Vec<TranscriptionRequest> {
        self.submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptionService for ScriptedService {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn start_job(&self, request: &TranscriptionRequest) -> Result<(), TranscribeError> {
        if let Some(message) = self.submit_error.lock().ok().and_then(|e| e.clone()) {
            return Err(TranscribeError::Submit(message));
        }
        if let Ok(mut submitted) = self.submitted.lock() {
            submitted.push(request.clone());
        }
        tracing::trace!(job = %request.job, "ScriptedService accepted job");
        Ok(())
    }

    async fn job_status(&self, job: &JobReference) -> Result<JobStatus, TranscribeError> {
        let count = self.query_count.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::trace!(job = %job, "ScriptedService status query #{count}");

        let next = self
            .script
            .lock()
            .map_err(|_| TranscribeError::Query("script lock poisoned".to_string()))?
            .pop_front();

        match next {
            Some(Ok(status)) => Ok(status),
            Some(Err(message)) => Err(TranscribeError::Query(message)),
            None => Ok(JobStatus::InProgress),
        }
    }
}
