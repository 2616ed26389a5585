use crate::error::ConfigError;
use crate::types::ObjectLocation;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_BUCKET: &str = "S3_BUCKET";
pub const ENV_AUDIO_FILE: &str = "AUDIO_FILE";
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const ENV_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const ENV_ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";
pub const ENV_MEDIA_FORMAT: &str = "TRANSCRIBE_MEDIA_FORMAT";
pub const ENV_JOB_PREFIX: &str = "TRANSCRIBE_JOB_PREFIX";
pub const ENV_POLL_INTERVAL: &str = "TRANSCRIBE_POLL_INTERVAL_SECS";
pub const ENV_MAX_WAIT: &str = "TRANSCRIBE_MAX_WAIT_SECS";
pub const ENV_LOG: &str = "S3SCRIBE_LOG";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub transcribe: TranscribeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AwsConfig {
    pub region: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourceConfig {
    pub bucket: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranscribeConfig {
    #[serde(default = "default_media_format")]
    pub media_format: String,

    #[serde(default = "default_job_name_prefix")]
    pub job_name_prefix: String,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_max_wait_secs")]
    pub max_wait_secs: u64,
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        Self {
            media_format: default_media_format(),
            job_name_prefix: default_job_name_prefix(),
            poll_interval_secs: default_poll_interval_secs(),
            max_wait_secs: default_max_wait_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_media_format() -> String {
    "wav".to_string()
}

fn default_job_name_prefix() -> String {
    "transcription-job".to_string()
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_max_wait_secs() -> u64 {
    3600
}

/// Static access key pair, used instead of the ambient credential chain.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &self.session_token.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}

/// Settings needed to build a client for either remote service.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub region: String,
    pub credentials: Option<StaticCredentials>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CheckerSettings {
    pub service: ServiceSettings,
    pub object: ObjectLocation,
}

#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub service: ServiceSettings,
    pub object: ObjectLocation,
    pub media_format: String,
    pub job_name_prefix: String,
    pub poll_interval: Duration,
    pub max_wait: Duration,
}

/// Interpolate `${VAR}` patterns with environment variable values.
fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}]+)\}").expect("interpolation pattern is valid");
    let mut result = input.to_string();
    let mut errors = Vec::new();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        match std::env::var(var_name) {
            Ok(val) => {
                result = result.replace(&cap[0], &val);
            }
            Err(_) => {
                errors.push(var_name.to_string());
            }
        }
    }

    if let Some(first_missing) = errors.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound(first_missing));
    }

    Ok(result)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_secs(setting: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Invalid {
        setting,
        reason: format!("expected a whole number of seconds, got {raw:?}"),
    })
}

impl AppConfig {
    /// Load configuration from a TOML file, with environment variable interpolation.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let interpolated = interpolate_env_vars(&content)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Parse configuration from a TOML string (for testing).
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(s)?;
        let config: AppConfig = toml::from_str(&interpolated)?;
        Ok(config)
    }

    /// Overlay values from `lookup` (normally the process environment).
    /// Empty values count as unset.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_empty(lookup(name));

        if let Some(v) = get(ENV_LOG) {
            self.general.log_level = v;
        }
        if let Some(v) = get(ENV_REGION) {
            self.aws.region = Some(v);
        }
        if let Some(v) = get(ENV_ACCESS_KEY_ID) {
            self.aws.access_key_id = Some(v);
        }
        if let Some(v) = get(ENV_SECRET_ACCESS_KEY) {
            self.aws.secret_access_key = Some(v);
        }
        if let Some(v) = get(ENV_SESSION_TOKEN) {
            self.aws.session_token = Some(v);
        }
        if let Some(v) = get(ENV_ENDPOINT_URL) {
            self.aws.endpoint_url = Some(v);
        }
        if let Some(v) = get(ENV_BUCKET) {
            self.source.bucket = Some(v);
        }
        if let Some(v) = get(ENV_AUDIO_FILE) {
            self.source.key = Some(v);
        }
        if let Some(v) = get(ENV_MEDIA_FORMAT) {
            self.transcribe.media_format = v;
        }
        if let Some(v) = get(ENV_JOB_PREFIX) {
            self.transcribe.job_name_prefix = v;
        }
        if let Some(v) = get(ENV_POLL_INTERVAL) {
            self.transcribe.poll_interval_secs = parse_secs(ENV_POLL_INTERVAL, &v)?;
        }
        if let Some(v) = get(ENV_MAX_WAIT) {
            self.transcribe.max_wait_secs = parse_secs(ENV_MAX_WAIT, &v)?;
        }

        Ok(self)
    }

    fn service_settings(&self) -> Result<ServiceSettings, ConfigError> {
        let region = non_empty(self.aws.region.clone()).ok_or(ConfigError::Missing(ENV_REGION))?;

        let credentials = match (
            non_empty(self.aws.access_key_id.clone()),
            non_empty(self.aws.secret_access_key.clone()),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token: non_empty(self.aws.session_token.clone()),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(ENV_SECRET_ACCESS_KEY)),
            (None, Some(_)) => return Err(ConfigError::Missing(ENV_ACCESS_KEY_ID)),
        };

        Ok(ServiceSettings {
            region,
            credentials,
            endpoint_url: non_empty(self.aws.endpoint_url.clone()),
        })
    }

    fn object_location(&self) -> Result<ObjectLocation, ConfigError> {
        let bucket = non_empty(self.source.bucket.clone()).ok_or(ConfigError::Missing(ENV_BUCKET))?;
        let key = non_empty(self.source.key.clone()).ok_or(ConfigError::Missing(ENV_AUDIO_FILE))?;
        Ok(ObjectLocation::new(bucket, key))
    }

    /// Validate everything the existence checker needs. Static credentials
    /// are mandatory here.
    pub fn checker_settings(&self) -> Result<CheckerSettings, ConfigError> {
        let service = self.service_settings()?;
        let object = self.object_location()?;
        if service.credentials.is_none() {
            return Err(ConfigError::Missing(ENV_ACCESS_KEY_ID));
        }
        Ok(CheckerSettings { service, object })
    }

    /// Validate everything the transcription driver needs. Without static
    /// credentials the ambient credential chain is used.
    pub fn driver_settings(&self) -> Result<DriverSettings, ConfigError> {
        let service = self.service_settings()?;
        let object = self.object_location()?;

        let media_format = self.transcribe.media_format.trim().to_ascii_lowercase();
        if media_format.is_empty() {
            return Err(ConfigError::Missing(ENV_MEDIA_FORMAT));
        }
        let job_name_prefix = self.transcribe.job_name_prefix.trim().to_string();
        if job_name_prefix.is_empty() {
            return Err(ConfigError::Missing(ENV_JOB_PREFIX));
        }
        if self.transcribe.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                setting: ENV_POLL_INTERVAL,
                reason: "must be at least one second".to_string(),
            });
        }
        if self.transcribe.max_wait_secs < self.transcribe.poll_interval_secs {
            return Err(ConfigError::Invalid {
                setting: ENV_MAX_WAIT,
                reason: format!(
                    "must not be shorter than the poll interval ({}s)",
                    self.transcribe.poll_interval_secs
                ),
            });
        }

        Ok(DriverSettings {
            service,
            object,
            media_format,
            job_name_prefix,
            poll_interval: Duration::from_secs(self.transcribe.poll_interval_secs),
            max_wait: Duration::from_secs(self.transcribe.max_wait_secs),
        })
    }
}
