use crate::config::ServiceSettings;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;

const CREDENTIALS_PROVIDER_NAME: &str = "s3scribe-static";

/// Build the shared SDK configuration for the S3 and Transcribe clients.
///
/// Static credentials take precedence over the ambient provider chain
/// (environment, profile, instance metadata). An endpoint override points
/// both clients at a compatible service such as MinIO or LocalStack.
pub async fn load_sdk_config(settings: &ServiceSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()));

    if let Some(ref creds) = settings.credentials {
        loader = loader.credentials_provider(Credentials::new(
            creds.access_key_id.clone(),
            creds.secret_access_key.clone(),
            creds.session_token.clone(),
            None,
            CREDENTIALS_PROVIDER_NAME,
        ));
    }

    if let Some(ref endpoint) = settings.endpoint_url {
        tracing::debug!(endpoint = %endpoint, "using endpoint override");
        loader = loader.endpoint_url(endpoint);
    }

    loader.load().await
}
