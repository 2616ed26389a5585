use async_trait::async_trait;
use s3scribe_core::{ObjectLocation, ObjectMetadata, StoreError};

/// Read-only view of an object store.
///
/// Only metadata lookups are needed: the transcription service reads the
/// audio itself, so the object body never passes through this process.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the store's name (e.g. `"s3"`, `"memory"`).
    fn name(&self) -> &str;
    /// Metadata-only lookup of a single object.
    async fn head_object(&self, location: &ObjectLocation) -> Result<ObjectMetadata, StoreError>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn head_object(&self, location: &ObjectLocation) -> Result<ObjectMetadata, StoreError> {
        (**self).head_object(location).await
    }
}
