use s3scribe_core::JobReference;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of job names. Each call must return a name not used before.
pub trait JobNameGenerator: Send + Sync {
    fn next_name(&self) -> JobReference;
}

/// `<prefix>-<random uuid>`, unique across concurrent and past runs.
pub struct UuidJobNames {
    prefix: String,
}

impl UuidJobNames {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

impl Default for UuidJobNames {
    fn default() -> Self {
        Self::new("transcription-job")
    }
}

impl JobNameGenerator for UuidJobNames {
    fn next_name(&self) -> JobReference {
        JobReference::new(format!("{}-{}", self.prefix, Uuid::new_v4()))
    }
}

/// `<prefix>-1`, `<prefix>-2`, ... Deterministic, for tests.
pub struct SequentialJobNames {
    prefix: String,
    next: AtomicU64,
}

impl SequentialJobNames {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            next: AtomicU64::new(1),
        }
    }
}

impl JobNameGenerator for SequentialJobNames {
    fn next_name(&self) -> JobReference {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        JobReference::new(format!("{}-{n}", self.prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_names_have_prefix() {
        let names = UuidJobNames::default();
        let name = names.next_name();
        let suffix = name
            .as_str()
            .strip_prefix("transcription-job-")
            .expect("prefix");
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn test_uuid_names_are_unique() {
        let names = UuidJobNames::new("nightly");
        let a = names.next_name();
        let b = names.next_name();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("nightly-"));
    }

    #[test]
    fn test_sequential_names() {
        let names = SequentialJobNames::new("job");
        assert_eq!(names.next_name().as_str(), "job-1");
        assert_eq!(names.next_name().as_str(), "job-2");
    }

    #[test]
    fn test_generators_implement_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UuidJobNames>();
        assert_send_sync::<SequentialJobNames>();
    }
}
