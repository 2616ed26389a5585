use crate::store_trait::ObjectStore;
use s3scribe_core::{ObjectLocation, ObjectMetadata, StoreError};

/// Confirms that a source object is reachable before any work is submitted.
pub struct ExistenceChecker {
    store: Box<dyn ObjectStore>,
}

impl ExistenceChecker {
    pub fn new(store: Box<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// One metadata lookup. Every failure is returned to the caller; a
    /// missing object and a transport error are reported differently but
    /// are equally fatal.
    pub async fn check(&self, location: &ObjectLocation) -> Result<ObjectMetadata, StoreError> {
        if location.bucket.is_empty() || location.key.is_empty() {
            return Err(StoreError::InvalidLocation(format!(
                "bucket and key must be non-empty (got {location})"
            )));
        }

        tracing::debug!(store = self.store.name(), object = %location, "looking up object");

        let metadata = self.store.head_object(location).await.inspect_err(|e| {
            tracing::error!(object = %location, "object lookup failed: {e}");
        })?;

        tracing::info!(
            object = %location,
            content_length = ?metadata.content_length,
            content_type = ?metadata.content_type,
            "object exists"
        );
        Ok(metadata)
    }
}

/// Human-readable success line printed by the checker binary.
pub fn confirmation_line(location: &ObjectLocation, metadata: &ObjectMetadata) -> String {
    match metadata.content_length {
        Some(len) => format!("Object {location} exists ({len} bytes)"),
        None => format!("Object {location} exists"),
    }
}
