use anyhow::{Context, Result};
use clap::Parser;
use s3scribe_core::ObjectLocation;
use s3scribe_store::{confirmation_line, ExistenceChecker, S3ObjectStore};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "s3scribe-check", about = "Verify that the source audio object exists in S3")]
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

    let settings = config.checker_settings().context("invalid configuration")?;

    let sdk_config = s3scribe_core::load_sdk_config(&settings.service).await;
    let checker = ExistenceChecker::new(Box::new(S3ObjectStore::from_sdk_config(&sdk_config)));

    check(&checker, &settings.object, &mut std::io::stdout()).await
}

async fn check(
    checker: &ExistenceChecker,
    location: &ObjectLocation,
    out: &mut impl Write,
) -> Result<()> {
    let metadata = checker
        .check(location)
        .await
        .with_context(|| format!("cannot read {location}"))?;
    writeln!(out, "{}", confirmation_line(location, &metadata))?;
    Ok(())
}
