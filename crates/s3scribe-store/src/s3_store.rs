use crate::store_trait::ObjectStore;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use s3scribe_core::{ObjectLocation, ObjectMetadata, StoreError};

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }

    /// Build a client from shared SDK config. Path-style addressing is
    /// forced when an endpoint override is set, since S3-compatible servers
    /// rarely serve virtual-hosted buckets.
    pub fn from_sdk_config(sdk_config: &SdkConfig) -> Self {
        let path_style = sdk_config.endpoint_url().is_some();
        let config = aws_sdk_s3::config::Builder::from(sdk_config)
            .force_path_style(path_style)
            .build();
        Self::new(aws_sdk_s3::Client::from_conf(config))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn name(&self) -> &str {
        "s3"
    }

    async fn head_object(&self, location: &ObjectLocation) -> Result<ObjectMetadata, StoreError> {
        let output = self
            .client
            .head_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_not_found() => StoreError::NotFound(location.to_string()),
                _ => StoreError::Request(format!("{location}: {}", DisplayErrorContext(&err))),
            })?;

        Ok(ObjectMetadata {
            content_length: output.content_length(),
            content_type: output.content_type().map(str::to_string),
            e_tag: output.e_tag().map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::{BehaviorVersion, Region};

    fn sdk_config(endpoint: Option<&str>) -> SdkConfig {
        let mut builder = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"));
        if let Some(url) = endpoint {
            builder = builder.endpoint_url(url);
        }
        builder.build()
    }

    #[test]
    fn test_s3_store_name() {
        let store = S3ObjectStore::from_sdk_config(&sdk_config(None));
        assert_eq!(store.name(), "s3");
    }

    #[test]
    fn test_s3_store_builds_with_endpoint_override() {
        let store = S3ObjectStore::from_sdk_config(&sdk_config(Some("http://localhost:9000")));
        assert_eq!(store.name(), "s3");
    }

    #[test]
    fn test_s3_store_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<S3ObjectStore>();
    }
}
