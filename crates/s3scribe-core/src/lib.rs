pub mod aws;
pub mod config;
pub mod error;
pub mod types;

pub use aws::load_sdk_config;
pub use config::{AppConfig, CheckerSettings, DriverSettings, ServiceSettings, StaticCredentials};
pub use error::{ConfigError, FetchError, StoreError, TranscribeError};
pub use types::{
    JobReference, JobStatus, ObjectLocation, ObjectMetadata, Transcript, TranscriptDocument,
    TranscriptResult, TranscriptionRequest,
};
