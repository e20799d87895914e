use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::ports::object_store::{ObjectStore, service_error_message};

type Bucket = HashMap<String, Vec<u8>>;

/// Process-local object store with the same error texts as S3.
///
/// Clones share the same buckets. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryObjectStore {
    buckets: Arc<RwLock<HashMap<String, Bucket>>>,
}

impl InMemoryObjectStore {
    /// Store holding a single empty bucket.
    pub fn with_bucket(name: &str) -> Self {
        let mut buckets = HashMap::new();
        buckets.insert(name.to_string(), Bucket::new());
        Self {
            buckets: Arc::new(RwLock::new(buckets)),
        }
    }

    pub async fn create_bucket(&self, name: &str) {
        self.buckets
            .write()
            .await
            .entry(name.to_string())
            .or_default();
    }

    /// Number of objects in `bucket` (0 when it does not exist).
    pub async fn object_count(&self, bucket: &str) -> usize {
        self.buckets.read().await.get(bucket).map_or(0, HashMap::len)
    }
}

fn no_such_bucket(operation: &str) -> StorageError {
    StorageError::backend(service_error_message(
        operation,
        "NoSuchBucket",
        "The specified bucket does not exist",
    ))
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn list_buckets(&self) -> StorageResult<Vec<String>> {
        let mut names: Vec<String> = self.buckets.read().await.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let guard = self.buckets.read().await;
        let objects = guard.get(bucket).ok_or_else(|| no_such_bucket("GetObject"))?;
        objects.get(key).cloned().ok_or_else(|| {
            StorageError::not_found(service_error_message(
                "GetObject",
                "NoSuchKey",
                "The specified key does not exist.",
            ))
        })
    }

    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> StorageResult<()> {
        let mut guard = self.buckets.write().await;
        let objects = guard
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket("PutObject"))?;
        objects.insert(key.to_string(), body);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<()> {
        let mut guard = self.buckets.write().await;
        let objects = guard
            .get_mut(bucket)
            .ok_or_else(|| no_such_bucket("DeleteObject"))?;
        objects.remove(key);
        Ok(())
    }
}
