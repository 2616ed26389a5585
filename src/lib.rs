//! Process plumbing shared by the `s3scribe` and `s3scribe-check` binaries.

use anyhow::{Context, Result};
use s3scribe_core::AppConfig;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Optional TOML file, overlaid by the process environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let base = match path {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {path:?}"))?,
        None => AppConfig::default(),
    };
    base.with_env_overrides(|name| std::env::var(name).ok())
        .context("invalid configuration in environment")
}

/// Logs go to stderr so stdout carries only the result lines.
pub fn init_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

/// The one place that turns a run's outcome into a process exit status.
pub fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:#}");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
