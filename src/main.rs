use anyhow::{Context, Result};
use clap::Parser;
use s3scribe_core::ObjectLocation;
use s3scribe_engine::{
    AwsTranscribeService, HttpTranscriptFetcher, PollPolicy, TranscriptionDriver, UuidJobNames,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "s3scribe", about = "Transcribe an audio object stored in S3")]
struct Cli {
    /// Optional TOML configuration file; environment variables take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    s3scribe::finish(run(cli).await)
}

async fn run(cli: Cli) -> Result<()> {
    let config = s3scribe::load_config(cli.config.as_deref())?;
    s3scribe::init_tracing(&config.general.log_level)?;

    // Validation happens before any client exists.
    let settings = config.driver_settings().context("invalid configuration")?;

    let sdk_config = s3scribe_core::load_sdk_config(&settings.service).await;
    let driver = TranscriptionDriver::new(
        Box::new(AwsTranscribeService::from_sdk_config(&sdk_config)),
        Box::new(HttpTranscriptFetcher::new().context("failed to build HTTP client")?),
        Box::new(UuidJobNames::new(&settings.job_name_prefix)),
    )
    .with_media_format(&settings.media_format)
    .with_poll_policy(PollPolicy::new(settings.poll_interval, settings.max_wait));

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, stopping the transcription run");
            on_interrupt.cancel();
        }
    });

    transcribe(&driver, &settings.object, &cancel, &mut std::io::stdout()).await
}

async fn transcribe(
    driver: &TranscriptionDriver,
    source: &ObjectLocation,
    cancel: &CancellationToken,
    out: &mut impl Write,
) -> Result<()> {
    let transcript = driver
        .run(source, cancel)
        .await
        .with_context(|| format!("could not transcribe {source}"))?;

    writeln!(
        out,
        "Transcription job {} completed with status: COMPLETED",
        transcript.job
    )?;
    writeln!(
        out,
        "Transcription completed. Detected language: {}",
        transcript.language_code.as_deref().unwrap_or("unknown")
    )?;
    writeln!(out, "Transcript: {}", transcript.text)?;
    Ok(())
}
