pub mod aws_service;
pub mod driver;
pub mod fetch;
pub mod job_name;
pub mod poller;
pub mod scripted_service;
pub mod service_trait;

pub use aws_service::AwsTranscribeService;
pub use driver::TranscriptionDriver;
pub use fetch::{HttpTranscriptFetcher, TranscriptFetcher};
pub use job_name::{JobNameGenerator, SequentialJobNames, UuidJobNames};
pub use poller::{poll_until_terminal, PollPolicy};
pub use scripted_service::ScriptedService;
pub use service_trait::TranscriptionService;
