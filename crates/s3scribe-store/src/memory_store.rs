use crate::store_trait::ObjectStore;
use async_trait::async_trait;
use s3scribe_core::{ObjectLocation, ObjectMetadata, StoreError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-process object store, for tests and dry runs.
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), ObjectMetadata>>,
    failure: Mutex<Option<String>>,
    lookup_count: AtomicUsize,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            failure: Mutex::new(None),
            lookup_count: AtomicUsize::new(0),
        }
    }

    pub fn insert(&self, location: &ObjectLocation, metadata: ObjectMetadata) {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert((location.bucket.clone(), location.key.clone()), metadata);
        }
    }

    /// Make every following lookup fail with a request error.
    pub fn fail_with(&self, message: &str) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(message.to_string());
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookup_count.load(Ordering::Relaxed)
    }
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn head_object(&self, location: &ObjectLocation) -> Result<ObjectMetadata, StoreError> {
        self.lookup_count.fetch_add(1, Ordering::Relaxed);

        if let Some(message) = self.failure.lock().ok().and_then(|f| f.clone()) {
            return Err(StoreError::Request(message));
        }

        let objects = self
            .objects
            .lock()
            .map_err(|_| StoreError::Request("store lock poisoned".to_string()))?;
        objects
            .get(&(location.bucket.clone(), location.key.clone()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(location.to_string()))
    }
}
